#![doc = r#"
Sequential big-endian writer for NRB streams

Every value handed to a [`Writer`] comes out of a validated
[`Composition`](crate::Composition), so a value that does not fit its field is a
bug in the caller and panics. Only failures of the sink itself are returned.
"#]

use std::io::{self, Write};

use crate::reader::BIAS;

/// A forward-only writer over some byte sink.
#[derive(Debug)]
pub struct Writer<W> {
    inner: W,
}

impl<W: Write> Writer<W> {
    /// Wrap a byte sink.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Flush the wrapped sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Write a single unsigned byte.
    pub fn write_u8(&mut self, v: u8) -> io::Result<()> {
        self.inner.write_all(&[v])
    }

    /// Write a signed value as a biased byte.
    pub fn write_biased(&mut self, v: i8) -> io::Result<()> {
        self.write_u8((v as u8).wrapping_add(BIAS))
    }

    /// Write a big-endian 16-bit value.
    pub fn write_u16(&mut self, v: u16) -> io::Result<()> {
        self.inner.write_all(&v.to_be_bytes())
    }

    /// Write a big-endian 32-bit value.
    ///
    /// # Panics
    /// if the reserved top bit of `v` is set.
    pub fn write_u32(&mut self, v: u32) -> io::Result<()> {
        assert!(v >> 31 == 0, "32-bit field value {v:#x} has its top bit set");
        self.inner.write_all(&v.to_be_bytes())
    }

    /// Write a non-negative value as a big-endian 64-bit field.
    ///
    /// # Panics
    /// if `v` is negative.
    pub fn write_u64(&mut self, v: i64) -> io::Result<()> {
        assert!(v >= 0, "64-bit field value {v} is negative");
        self.inner.write_all(&(v as u64).to_be_bytes())
    }
}

#[test]
fn writes_big_endian() {
    use pretty_assertions::assert_eq;
    let mut writer = Writer::new(Vec::new());
    writer.write_u16(0x1234).unwrap();
    writer.write_u32(0x0102_0304).unwrap();
    writer.write_u64(256).unwrap();
    writer.write_biased(-39).unwrap();
    writer.write_biased(48).unwrap();
    assert_eq!(
        writer.into_inner(),
        [
            0x12, 0x34, //
            0x01, 0x02, 0x03, 0x04, //
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, //
            0x59, 0xB0,
        ]
    );
}

#[test]
#[should_panic]
fn top_bit_write_panics() {
    let mut writer = Writer::new(Vec::new());
    let _ = writer.write_u32(0x8000_0000);
}

#[test]
#[should_panic]
fn negative_write_panics() {
    let mut writer = Writer::new(Vec::new());
    let _ = writer.write_u64(-1);
}
