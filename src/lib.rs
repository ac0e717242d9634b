//! Streams the rows of every user table out of a SQLite database file
//! presented as a sequence of byte chunks, without materializing the file
//! and without a general-purpose SQLite library.
//!
//! ```no_run
//! # fn chunks() -> impl Iterator<Item = Vec<u8>> { std::iter::empty() }
//! for table in sqlite_stream::stream_sqlite(chunks(), 8 * 1024 * 1024) {
//!     let table = table?;
//!     for row in table.rows {
//!         let _row = row?;
//!     }
//! }
//! # Ok::<(), sqlite_stream::Error>(())
//! ```

mod byte_reader;
mod dbheader;
mod engine;
mod error;
mod record;
mod schema;
mod serial_type;
mod sql_value;
mod varint;

pub use engine::{stream_sqlite, Rows, TableGroup, TableGroups};
pub use error::Error;
pub use schema::ColumnDef;
pub use sql_value::SqlValue;
