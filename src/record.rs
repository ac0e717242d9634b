//! Decodes a SQLite record body (header of serial types, followed by the
//! values themselves) into a row of `SqlValue`s.

use crate::error::Error;
use crate::serial_type;
use crate::sql_value::SqlValue;
use crate::varint::read_varint;

/// Decodes `payload` — a fully-reassembled cell payload, local or
/// overflow-joined — into its column values, in declaration order.
pub fn decode_record(payload: &[u8]) -> Result<Vec<SqlValue>, Error> {
    let (header_len, header_len_width) = read_varint(payload)?;
    let header_len = header_len as usize;
    if header_len > payload.len() {
        return Err(Error::MalformedRecord(
            "record header length exceeds the payload".into(),
        ));
    }

    let mut serial_types = Vec::new();
    let mut offset = header_len_width;
    while offset < header_len {
        let (serial_type, width) = read_varint(&payload[offset..])?;
        serial_types.push(serial_type);
        offset += width;
    }

    let mut values = Vec::with_capacity(serial_types.len());
    let mut body_offset = header_len;
    for serial_type in serial_types {
        let len = serial_type::value_len(serial_type)?;
        let end = body_offset
            .checked_add(len)
            .ok_or_else(|| Error::MalformedRecord("record value length overflowed".into()))?;
        let bytes = payload.get(body_offset..end).ok_or_else(|| {
            Error::MalformedRecord("record body ran past the end of its payload".into())
        })?;
        values.push(serial_type::decode_value(serial_type, bytes)?);
        body_offset = end;
    }

    Ok(values)
}
