//! Deterministic binary primitives: fixed-width little-endian integers and
//! `u32`-length-prefixed byte strings. No field is ever encoded two ways, so
//! `decode(encode(x)) == x` and `encode` never needs a canonicalization pass.

use crate::error::WireError;

/// Caps any single length-prefixed field so a corrupt or hostile prefix
/// cannot force an allocation far larger than any real message would need.
pub const MAX_FIELD_LEN: usize = 16 * 1024 * 1024;

pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_fixed(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    pub fn put_prefixed(&mut self, v: &[u8]) {
        self.put_u32(v.len() as u32);
        self.buf.extend_from_slice(v);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < n {
            return Err(WireError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn get_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    pub fn get_u32(&mut self) -> Result<u32, WireError> {
        let bytes: [u8; 4] = self.take(4)?.try_into().expect("exactly 4 bytes");
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn get_u64(&mut self) -> Result<u64, WireError> {
        let bytes: [u8; 8] = self.take(8)?.try_into().expect("exactly 8 bytes");
        Ok(u64::from_le_bytes(bytes))
    }

    pub fn get_fixed(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        self.take(n)
    }

    pub fn get_prefixed(&mut self) -> Result<&'a [u8], WireError> {
        let len = self.get_u32()? as usize;
        if len > MAX_FIELD_LEN {
            return Err(WireError::FieldTooLong {
                field: "<prefixed>",
                max: MAX_FIELD_LEN,
                got: len,
            });
        }
        self.take(len)
    }

    /// Must be called once the caller believes decoding is complete; any
    /// unconsumed byte means the message was malformed or truncated wrong.
    pub fn finish(self) -> Result<(), WireError> {
        if self.pos != self.buf.len() {
            Err(WireError::TrailingBytes(self.buf.len() - self.pos))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_mixed_fields() {
        let mut w = Writer::new();
        w.put_u8(7);
        w.put_u32(1234);
        w.put_u64(9_999_999_999);
        w.put_fixed(&[1, 2, 3]);
        w.put_prefixed(b"hello");
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        assert_eq!(r.get_u8().unwrap(), 7);
        assert_eq!(r.get_u32().unwrap(), 1234);
        assert_eq!(r.get_u64().unwrap(), 9_999_999_999);
        assert_eq!(r.get_fixed(3).unwrap(), &[1, 2, 3]);
        assert_eq!(r.get_prefixed().unwrap(), b"hello");
        assert!(r.finish().is_ok());
    }

    #[test]
    fn truncated_input_errors_instead_of_panicking() {
        let mut r = Reader::new(&[1, 2]);
        assert!(matches!(r.get_u32(), Err(WireError::Truncated { .. })));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut w = Writer::new();
        w.put_u8(1);
        let mut bytes = w.into_bytes();
        bytes.push(0xff);
        let mut r = Reader::new(&bytes);
        let _ = r.get_u8().unwrap();
        assert!(matches!(r.finish(), Err(WireError::TrailingBytes(1))));
    }
}
