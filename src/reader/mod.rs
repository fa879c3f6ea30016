#![doc = r#"
Sequential big-endian reader for NRB streams

The [`Reader`] pulls fixed-width fields off any [`std::io::Read`] exactly once,
front to back, and never seeks. A stream that ends in the middle of a field
produces [`ReaderErrorKind::OutOfBounds`] rather than a panic.

The format reserves the top bit of every 32 and 64-bit field, so
[`Reader::read_u32`] and [`Reader::read_u64`] reject values with that bit set.
"#]

mod error;
pub use error::*;

use std::io::{self, Read};

use crate::ParseError;

/// Offset applied to a biased byte.
pub const BIAS: u8 = 128;

/// A forward-only reader over some byte source.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    position: usize,
}

impl<R: Read> Reader<R> {
    /// Wrap a byte source.
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// The number of bytes consumed so far.
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Returns the wrapped source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    pub(crate) fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut bytes = [0; N];
        match self.inner.read_exact(&mut bytes) {
            Ok(()) => {
                self.position += N;
                Ok(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(ReaderError::oob(self.position))
            }
            Err(e) => Err(ReaderError::new(self.position, e.into())),
        }
    }

    /// Read a single unsigned byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read a biased byte, decoding it to `[-128, 127]`.
    pub fn read_biased(&mut self) -> ReadResult<i8> {
        Ok(self.read_u8()?.wrapping_sub(BIAS) as i8)
    }

    /// Read a big-endian 16-bit value. All 16 bits are usable.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian 32-bit value whose top bit must be clear.
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        let start = self.position;
        let v = u32::from_be_bytes(self.read_exact_size()?);
        if v >> 31 != 0 {
            return Err(ReaderError::invalid(
                start,
                ParseError::ReservedBit(u64::from(v)),
            ));
        }
        Ok(v)
    }

    /// Read a big-endian 64-bit value whose top bit must be clear.
    ///
    /// The result always fits in an `i64`, which is how the format's
    /// microsecond offsets are represented in memory.
    pub fn read_u64(&mut self) -> ReadResult<i64> {
        let start = self.position;
        let v = u64::from_be_bytes(self.read_exact_size()?);
        if v >> 63 != 0 {
            return Err(ReaderError::invalid(start, ParseError::ReservedBit(v)));
        }
        Ok(v as i64)
    }
}

#[test]
fn reads_big_endian() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0x12, 0x34, //
        0x01, 0x02, 0x03, 0x04, //
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
    ];
    let mut reader = Reader::new(&bytes[..]);
    assert_eq!(reader.read_u16().unwrap(), 0x1234);
    assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
    assert_eq!(reader.read_u64().unwrap(), 256);
    assert_eq!(reader.buffer_position(), 14);
}

#[test]
fn biased_byte_range() {
    use pretty_assertions::assert_eq;
    let bytes = [0x00, 0x80, 0xFF, 0x59];
    let mut reader = Reader::new(&bytes[..]);
    assert_eq!(reader.read_biased().unwrap(), -128);
    assert_eq!(reader.read_biased().unwrap(), 0);
    assert_eq!(reader.read_biased().unwrap(), 127);
    assert_eq!(reader.read_biased().unwrap(), -39);
}

#[test]
fn short_read_is_out_of_bounds() {
    use pretty_assertions::assert_eq;
    let bytes = [0x00, 0x00, 0x01];
    let mut reader = Reader::new(&bytes[..]);
    let err = reader.read_u32().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 0);

    let mut reader = Reader::new(&bytes[..]);
    reader.read_u16().unwrap();
    let err = reader.read_u16().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 2);
}

#[test]
fn top_bit_is_reserved() {
    use pretty_assertions::assert_eq;
    let bytes = [0x80, 0x00, 0x00, 0x00];
    let err = Reader::new(&bytes[..]).read_u32().unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::ReservedBit(0x8000_0000)));

    let bytes = [0xFF; 8];
    let err = Reader::new(&bytes[..]).read_u64().unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::ReservedBit(u64::MAX)));

    // 16-bit fields use the full range
    let bytes = [0xFF, 0xFF];
    assert_eq!(Reader::new(&bytes[..]).read_u16().unwrap(), u16::MAX);
}
