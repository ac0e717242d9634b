//! Defines an enum of all the possible values that a decoded SQLite value
//! can have.

use enum_as_inner::EnumAsInner;

/// One decoded storage-class value. No schema-type casting is applied here;
/// the serial type determines the variant and nothing else does.
#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(x) => write!(f, "{x}"),
            SqlValue::Real(x) => write!(f, "{x}"),
            SqlValue::Text(x) => write!(f, "{x}"),
            SqlValue::Blob(_) => write!(f, "<BLOB>"),
        }
    }
}
