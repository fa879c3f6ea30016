use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use super::{Composition, Header};
use crate::{
    HeaderError, Note, ParseError, SectionError,
    reader::{ReadResult, Reader, ReaderError},
    version::VersionStatus,
};

/// The outcome of parsing an NRB stream.
///
/// The version status is reported whether or not the parse succeeded: a
/// [`VersionStatus::MinorUnsupported`] stream may still produce a
/// composition, and the user should be warned either way.
#[derive(Debug)]
pub struct Parsed {
    /// How the declared version compares to what this library reads.
    pub version: VersionStatus,
    /// The composition, or why there is none.
    pub result: ReadResult<Composition>,
}

impl Parsed {
    /// True if a composition was produced.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The composition, if one was produced.
    pub fn composition(&self) -> Option<&Composition> {
        self.result.as_ref().ok()
    }

    /// Drops the version status.
    pub fn into_result(self) -> ReadResult<Composition> {
        self.result
    }
}

impl Composition {
    /// Parse an NRB stream.
    ///
    /// The stream is read sequentially from its current position and never
    /// seeked. Bytes after the note table are left unread. Either every rule
    /// of the format holds and a composition is returned, or nothing is.
    ///
    /// Reads are issued field by field, so wrap unbuffered sources in a
    /// [`BufReader`].
    pub fn parse<R: Read>(source: R) -> Parsed {
        let mut reader = Reader::new(source);

        let (major, minor) = match Header::read_version(&mut reader) {
            Ok(version) => version,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Not an NRB stream: {e}");
                return Parsed {
                    version: VersionStatus::Unreadable,
                    result: Err(e),
                };
            }
        };

        let version = VersionStatus::classify(major, minor);
        let result = match version {
            VersionStatus::MajorUnsupported => Err(ReaderError::invalid(
                reader.buffer_position() - 2,
                HeaderError::MajorVersion(major).into(),
            )),
            _ => Self::read_tables(&mut reader, major, minor),
        };

        #[cfg(feature = "tracing")]
        {
            if version.needs_warning() {
                tracing::warn!("NRB version {major}.{minor} is newer than this reader");
            }
            if let Err(e) = &result {
                tracing::debug!("NRB parse failed: {e}");
            }
        }

        Parsed { version, result }
    }

    /// Parse an NRB stream held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Parsed {
        Self::parse(bytes)
    }

    /// Open a file and parse it.
    ///
    /// A file that cannot be opened is reported as
    /// [`VersionStatus::Unreadable`].
    pub fn parse_path<P: AsRef<Path>>(path: P) -> Parsed {
        match File::open(path) {
            Ok(file) => Self::parse(BufReader::new(file)),
            Err(e) => Parsed {
                version: VersionStatus::Unreadable,
                result: Err(ReaderError::new(0, e.into())),
            },
        }
    }

    fn read_tables<R: Read>(reader: &mut Reader<R>, major: u8, minor: u8) -> ReadResult<Self> {
        let header = Header::read_counts(reader, major, minor)?;

        let section_count = header.section_count() as usize;
        let mut sections: Vec<i64> = Vec::with_capacity(section_count);
        for index in 0..section_count {
            let position = reader.buffer_position();
            let offset = reader.read_u64()?;
            let error = match sections.last() {
                None if offset != 0 => Some(SectionError::FirstOffset(offset)),
                Some(&previous) if offset < previous => Some(SectionError::Decreasing {
                    index,
                    offset,
                    previous,
                }),
                _ => None,
            };
            if let Some(error) = error {
                return Err(ReaderError::invalid(position, error.into()));
            }
            sections.push(offset);
        }

        let note_count = header.note_count() as usize;
        let mut notes = Vec::with_capacity(note_count);
        for _ in 0..note_count {
            let position = reader.buffer_position();
            let note = Note::read(reader)?;
            note.check(&sections)
                .map_err(|e| ReaderError::invalid(position, ParseError::Note(e)))?;
            notes.push(note);
        }

        Ok(Self { sections, notes })
    }
}
