use thiserror::Error;

#[doc = r#"
The set of ways NRB data can be malformed.

These are always recoverable: a stream that produces one of these is simply
not a valid NRB composition.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A 32 or 64-bit field had its reserved top bit set.
    #[error("Reserved top bit set in field value {0:#x}")]
    ReservedBit(u64),
    /// Header error
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// Section table error
    #[error("Section table: {0}")]
    Section(#[from] SectionError),
    /// Note table error
    #[error("Note table: {0}")]
    Note(#[from] NoteError),
}

/// Errors in the fixed-size file header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// One of the two signature fields did not match.
    #[error("Bad signature: found {found}, expected {expected}")]
    Signature {
        /// The value read
        found: u32,
        /// The value required
        expected: u32,
    },
    /// The major version is not one this library understands.
    #[error("Unsupported major version {0}")]
    MajorVersion(u8),
    /// Section count outside `[1, 65535]`
    #[error("Invalid section count {0}")]
    SectionCount(u16),
    /// Note count outside `[0, 1048576]`
    #[error("Invalid note count {0}")]
    NoteCount(u32),
}

/// Errors in the section table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    /// Section zero must begin at offset zero.
    #[error("First section starts at {0} instead of zero")]
    FirstOffset(i64),
    /// A section begins before the one preceding it.
    #[error("Section {index} starts at {offset}, before the previous section at {previous}")]
    Decreasing {
        /// Index of the offending section
        index: usize,
        /// Its offset
        offset: i64,
        /// The offset of the section before it
        previous: i64,
    },
}

/// Ways a single note can be invalid.
///
/// The same checks guard both parsing and the mutation methods on
/// [`Composition`](crate::Composition).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// Start time below zero
    #[error("Negative start time {0}")]
    NegativeStart(i64),
    /// Release not strictly after start
    #[error("Release {release} is not after start {start}")]
    Release {
        /// Start time
        start: i64,
        /// Release time
        release: i64,
    },
    /// Pitch outside `[-39, 48]`
    #[error("Pitch {0} out of range")]
    Pitch(i8),
    /// Articulation index 62 or 63
    #[error("Articulation index {0} out of range")]
    Articulation(u8),
    /// Ramp above 16384
    #[error("Ramp {0} out of range")]
    Ramp(u16),
    /// Section index past the end of the section table
    #[error("Section {section} does not exist ({count} sections)")]
    Section {
        /// The referenced section
        section: u16,
        /// Number of sections defined
        count: usize,
    },
    /// Start time earlier than the referenced section
    #[error("Start {start} precedes section {section} at {offset}")]
    BeforeSection {
        /// Start time
        start: i64,
        /// Referenced section
        section: u16,
        /// Offset of that section
        offset: i64,
    },
}

/// Returned when a composition is already holding as many sections or notes
/// as the format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// 65535 sections already defined
    #[error("Section table is full")]
    Sections,
    /// 1048576 notes already defined
    #[error("Note table is full")]
    Notes,
}

/// Errors produced while serializing a composition.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A composition must hold at least one note to be written.
    #[error("Composition has no notes")]
    Empty,
    /// The sink failed.
    #[error("I/O {0}")]
    Io(#[from] std::io::Error),
}
