//! Parses the 100-byte SQLite database header. Parsing is a pure
//! function over a byte slice — this core never opens a file itself, the
//! header arrives as the first bytes pulled off the chunk stream.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::error::Error;

pub const HEADER_LEN: usize = 100;

const MAGIC: &[u8; 16] = b"SQLite format 3\0";

/// The handful of header fields this core needs to walk the page stream.
/// Reserved/rollback/vacuum/application-id fields are read past but not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbHeader {
    pub page_size: u32,
    pub num_pages: u32,
    pub first_freelist_trunk: u32,
}

/// Parses `bytes`, which must be at least `HEADER_LEN` bytes long.
pub fn parse(bytes: &[u8]) -> Result<DbHeader, Error> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::TruncatedStream);
    }

    let mut c = Cursor::new(bytes);

    let mut magic = [0_u8; 16];
    c.read_exact(&mut magic).map_err(|_| Error::TruncatedStream)?;
    if &magic != MAGIC {
        return Err(Error::BadHeader);
    }

    let page_size = match c.read_u16::<BigEndian>().map_err(|_| Error::TruncatedStream)? {
        1 => 65536,
        n => n as u32,
    };

    // offset 18: write version, offset 19: read version — not validated, this
    // core never writes and treats WAL/legacy formats identically for reads.
    c.set_position(20);

    let reserved_space = c.read_u8().map_err(|_| Error::TruncatedStream)?;
    if reserved_space != 0 {
        return Err(Error::BadUsableSpace);
    }

    // offsets 21-23: payload fraction constants, fixed by the format, skipped.
    c.set_position(28);

    let num_pages = c.read_u32::<BigEndian>().map_err(|_| Error::TruncatedStream)?;
    let first_freelist_trunk = c.read_u32::<BigEndian>().map_err(|_| Error::TruncatedStream)?;

    c.set_position(56);
    let encoding = c.read_u32::<BigEndian>().map_err(|_| Error::TruncatedStream)?;
    if encoding != 0 && encoding != 1 {
        return Err(Error::BadEncoding);
    }

    Ok(DbHeader {
        page_size,
        num_pages,
        first_freelist_trunk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_header() -> Vec<u8> {
        let mut h = vec![0_u8; HEADER_LEN];
        h[0..16].copy_from_slice(MAGIC);
        h[16..18].copy_from_slice(&4096_u16.to_be_bytes());
        h[18] = 1;
        h[19] = 1;
        h[20] = 0;
        h[21] = 64;
        h[22] = 32;
        h[23] = 32;
        h[28..32].copy_from_slice(&2_u32.to_be_bytes());
        h[32..36].copy_from_slice(&0_u32.to_be_bytes());
        h[56..60].copy_from_slice(&1_u32.to_be_bytes());
        h
    }

    #[test]
    fn parses_a_well_formed_header() {
        let header = parse(&good_header()).unwrap();
        assert_eq!(header.page_size, 4096);
        assert_eq!(header.num_pages, 2);
        assert_eq!(header.first_freelist_trunk, 0);
    }

    #[test]
    fn page_size_one_means_65536() {
        let mut bytes = good_header();
        bytes[16..18].copy_from_slice(&1_u16.to_be_bytes());
        assert_eq!(parse(&bytes).unwrap().page_size, 65536);
    }

    #[test]
    fn truncated_header_is_truncated_stream() {
        assert!(matches!(parse(&[0_u8; 50]), Err(Error::TruncatedStream)));
    }

    #[test]
    fn bad_magic_is_bad_header() {
        let mut bytes = good_header();
        bytes[0] = 0x00;
        assert!(matches!(parse(&bytes), Err(Error::BadHeader)));
    }

    #[test]
    fn nonzero_reserved_space_is_bad_usable_space() {
        let mut bytes = good_header();
        bytes[20] = 1;
        assert!(matches!(parse(&bytes), Err(Error::BadUsableSpace)));
    }

    #[test]
    fn non_utf8_encoding_is_bad_encoding() {
        let mut bytes = good_header();
        bytes[56] = 99;
        assert!(matches!(parse(&bytes), Err(Error::BadEncoding)));
    }

    #[test]
    fn first_freelist_trunk_is_read() {
        let mut bytes = good_header();
        bytes[32..36].copy_from_slice(&7_u32.to_be_bytes());
        assert_eq!(parse(&bytes).unwrap().first_freelist_trunk, 7);
    }
}
