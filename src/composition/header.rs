use std::io::{self, Read, Write};

use crate::{
    HeaderError, MAX_NOTES, MAX_SECTIONS,
    reader::{ReadResult, Reader, ReaderError},
    version::{MAJOR_VERSION, MINOR_VERSION},
    writer::Writer,
};

/// The two signature fields that open every NRB stream.
pub const SIGNATURE: [u32; 2] = [1_928_196_216, 778_990_178];

/// Count of reserved 32-bit fields closing the header.
const RESERVED_FIELDS: usize = 4;

#[doc = r#"
The fixed-size header of an NRB stream.

```text
signature   u32 x 2
major       u8
minor       u8
sections    u16   [1, 65535]
notes       u32   [0, 1048576]
reserved    u32 x 4   zero on write, ignored on read
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    major: u8,
    minor: u8,
    section_count: u16,
    note_count: u32,
}

impl Header {
    /// A header for the version this library writes.
    pub const fn new(section_count: u16, note_count: u32) -> Self {
        Self {
            major: MAJOR_VERSION,
            minor: MINOR_VERSION,
            section_count,
            note_count,
        }
    }

    /// Reads the signature and the version bytes.
    ///
    /// Any failure here means the stream is not NRB.
    pub(crate) fn read_version<R: Read>(reader: &mut Reader<R>) -> ReadResult<(u8, u8)> {
        for expected in SIGNATURE {
            let position = reader.buffer_position();
            let found = reader.read_u32()?;
            if found != expected {
                return Err(ReaderError::invalid(
                    position,
                    HeaderError::Signature { found, expected }.into(),
                ));
            }
        }
        let major = reader.read_u8()?;
        let minor = reader.read_u8()?;
        Ok((major, minor))
    }

    /// Reads the table sizes and skips the reserved fields.
    pub(crate) fn read_counts<R: Read>(
        reader: &mut Reader<R>,
        major: u8,
        minor: u8,
    ) -> ReadResult<Self> {
        let position = reader.buffer_position();
        let section_count = reader.read_u16()?;
        if section_count == 0 || section_count as usize > MAX_SECTIONS {
            return Err(ReaderError::invalid(
                position,
                HeaderError::SectionCount(section_count).into(),
            ));
        }

        let position = reader.buffer_position();
        let note_count = reader.read_u32()?;
        if note_count as usize > MAX_NOTES {
            return Err(ReaderError::invalid(
                position,
                HeaderError::NoteCount(note_count).into(),
            ));
        }

        for _ in 0..RESERVED_FIELDS {
            reader.read_u32()?;
        }

        Ok(Self {
            major,
            minor,
            section_count,
            note_count,
        })
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for sig in SIGNATURE {
            writer.write_u32(sig)?;
        }
        writer.write_u8(self.major)?;
        writer.write_u8(self.minor)?;
        writer.write_u16(self.section_count)?;
        writer.write_u32(self.note_count)?;
        for _ in 0..RESERVED_FIELDS {
            writer.write_u32(0)?;
        }
        Ok(())
    }

    /// The declared major version
    pub const fn major(&self) -> u8 {
        self.major
    }

    /// The declared minor version
    pub const fn minor(&self) -> u8 {
        self.minor
    }

    /// Number of entries in the section table
    pub const fn section_count(&self) -> u16 {
        self.section_count
    }

    /// Number of entries in the note table
    pub const fn note_count(&self) -> u32 {
        self.note_count
    }
}

#[test]
fn header_layout() {
    use pretty_assertions::assert_eq;
    let mut writer = Writer::new(Vec::new());
    Header::new(2, 3).write(&mut writer).unwrap();
    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), 32);
    assert_eq!(&bytes[..8], &[0x72, 0xED, 0xF0, 0x78, 0x2E, 0x6E, 0x72, 0x62]);
    assert_eq!(&bytes[8..16], &[1, 0, 0, 2, 0, 0, 0, 3]);
    assert!(bytes[16..].iter().all(|&b| b == 0));

    let mut reader = Reader::new(&bytes[..]);
    let (major, minor) = Header::read_version(&mut reader).unwrap();
    let header = Header::read_counts(&mut reader, major, minor).unwrap();
    assert_eq!(header, Header::new(2, 3));
    assert_eq!(reader.buffer_position(), 32);
}
