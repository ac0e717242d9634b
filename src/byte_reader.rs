//! The Byte Reader stage: turns a sequence of arbitrarily-sized chunks into
//! a "give me exactly N bytes" interface, holding only the current chunk and
//! an offset between calls.

use crate::error::Error;

pub struct ByteReader<C> {
    chunks: C,
    current: Vec<u8>,
    offset: usize,
}

impl<C: Iterator<Item = Vec<u8>>> ByteReader<C> {
    pub fn new(chunks: C) -> Self {
        ByteReader {
            chunks,
            current: Vec::new(),
            offset: 0,
        }
    }

    /// Returns exactly `n` bytes, concatenated across as many chunks as
    /// necessary. Empty chunks from the producer are tolerated. Fails with
    /// `Error::TruncatedStream` if the chunk sequence ends before `n` bytes
    /// have been supplied.
    pub fn take(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(n);
        let mut remaining = n;
        while remaining > 0 {
            if self.offset >= self.current.len() {
                match self.chunks.next() {
                    Some(chunk) => {
                        self.current = chunk;
                        self.offset = 0;
                        continue;
                    }
                    None => return Err(Error::TruncatedStream),
                }
            }
            let available = self.current.len() - self.offset;
            let take_now = available.min(remaining);
            out.extend_from_slice(&self.current[self.offset..self.offset + take_now]);
            self.offset += take_now;
            remaining -= take_now;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_spans_multiple_chunks() {
        let chunks = vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8, 9]];
        let mut r = ByteReader::new(chunks.into_iter());
        assert_eq!(r.take(2).unwrap(), vec![1, 2]);
        assert_eq!(r.take(5).unwrap(), vec![3, 4, 5, 6, 7]);
        assert_eq!(r.take(2).unwrap(), vec![8, 9]);
    }

    #[test]
    fn take_tolerates_empty_chunks() {
        let chunks = vec![vec![], vec![1], vec![], vec![], vec![2, 3]];
        let mut r = ByteReader::new(chunks.into_iter());
        assert_eq!(r.take(3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn take_past_end_is_truncated_stream() {
        let chunks = vec![vec![1, 2]];
        let mut r = ByteReader::new(chunks.into_iter());
        assert!(matches!(r.take(3), Err(Error::TruncatedStream)));
    }

    #[test]
    fn take_zero_is_always_ok() {
        let chunks: Vec<Vec<u8>> = vec![];
        let mut r = ByteReader::new(chunks.into_iter());
        assert_eq!(r.take(0).unwrap(), Vec::<u8>::new());
    }
}
