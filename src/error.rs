//! The single error type surfaced by this crate.
//!
//! Per the streaming contract, an error terminates the output iterator: no
//! partial row is ever emitted, and once an `Error` has been yielded, every
//! subsequent pull returns `None`.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("fewer bytes were available than the stream required")]
    TruncatedStream,

    #[error("the SQLite magic string was not found at the start of the stream")]
    BadHeader,

    #[error("unsupported text encoding (only UTF-8 is supported)")]
    BadEncoding,

    #[error("reserved space per page must be zero")]
    BadUsableSpace,

    #[error("the stream ended with one or more pages never classified")]
    UnusedPage,

    #[error("buffered page bytes exceeded the configured cap of {0} bytes")]
    BufferExceeded(usize),

    #[error("malformed cell, record, or page reference: {0}")]
    MalformedRecord(String),

    #[error("could not interpret the CREATE TABLE statement for {table:?}: {source}")]
    SchemaParse {
        table: String,
        #[source]
        source: crate::schema::Error,
    },
}
