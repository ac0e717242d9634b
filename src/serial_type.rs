//! Serial types are how SQLite records describe the encoding of each value
//! they carry. This module turns a serial type code plus its raw
//! bytes into a `SqlValue`, with no awareness of (and no casting to) the
//! column's declared SQL type — this core preserves fidelity, not
//! validation.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::error::Error;
use crate::sql_value::SqlValue;

/// Number of body bytes that follow a serial type code.
pub fn value_len(serial_type: i64) -> Result<usize, Error> {
    Ok(match serial_type {
        0 | 8 | 9 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        4 => 4,
        5 => 6,
        6 | 7 => 8,
        10 | 11 => {
            return Err(Error::MalformedRecord(format!(
                "serial type {serial_type} is reserved for internal use"
            )))
        }
        n if n >= 12 => ((n as usize - 12) - (n as usize % 2)) / 2,
        n => return Err(Error::MalformedRecord(format!("negative serial type {n}"))),
    })
}

/// Decodes `data` (exactly `value_len(serial_type)` bytes).
pub fn decode_value(serial_type: i64, data: &[u8]) -> Result<SqlValue, Error> {
    use SqlValue::*;

    let mut c = Cursor::new(data);
    match serial_type {
        0 => Ok(Null),
        1 => Ok(Integer(c.read_i8().map_err(|_| truncated(serial_type))? as i64)),
        2 => Ok(Integer(
            c.read_i16::<BigEndian>().map_err(|_| truncated(serial_type))? as i64,
        )),
        3 => {
            let mut bytes = [0_u8; 4];
            c.read_exact(&mut bytes[1..])
                .map_err(|_| truncated(serial_type))?;
            bytes[0] = if bytes[1] & 0x80 != 0 { 0xff } else { 0x00 };
            Ok(Integer(i32::from_be_bytes(bytes) as i64))
        }
        4 => Ok(Integer(
            c.read_i32::<BigEndian>().map_err(|_| truncated(serial_type))? as i64,
        )),
        5 => {
            let mut bytes = [0_u8; 8];
            c.read_exact(&mut bytes[2..])
                .map_err(|_| truncated(serial_type))?;
            let fill = if bytes[2] & 0x80 != 0 { 0xff } else { 0x00 };
            bytes[0] = fill;
            bytes[1] = fill;
            Ok(Integer(i64::from_be_bytes(bytes)))
        }
        6 => Ok(Integer(
            c.read_i64::<BigEndian>().map_err(|_| truncated(serial_type))?,
        )),
        7 => Ok(Real(
            c.read_f64::<BigEndian>().map_err(|_| truncated(serial_type))?,
        )),
        8 => Ok(Integer(0)),
        9 => Ok(Integer(1)),
        10 | 11 => Err(Error::MalformedRecord(format!(
            "serial type {serial_type} is reserved for internal use"
        ))),
        n if n >= 12 && n % 2 == 0 => Ok(Blob(data.to_vec())),
        n if n >= 12 => Ok(Text(
            String::from_utf8(data.to_vec())
                .map_err(|e| Error::MalformedRecord(format!("invalid UTF-8 text value: {e}")))?,
        )),
        n => Err(Error::MalformedRecord(format!("negative serial type {n}"))),
    }
}

fn truncated(serial_type: i64) -> Error {
    Error::MalformedRecord(format!(
        "value for serial type {serial_type} ran past the end of its page"
    ))
}
