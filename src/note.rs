use core::fmt;
use std::io::{self, Read, Write};

use crate::{
    NoteError,
    reader::{ReadResult, Reader},
    writer::Writer,
};

/// Lowest pitch, in semitones from middle C.
pub const MIN_PITCH: i8 = -39;

/// Highest pitch, in semitones from middle C.
pub const MAX_PITCH: i8 = 48;

/// Highest articulation index.
pub const MAX_ARTICULATION: u8 = 61;

/// Integer ramp value that encodes `1.0`.
pub const MAX_RAMP: u16 = 16384;

#[doc = r#"
A single performed note event.

Times are microseconds from the start of the composition. A note is a plain
value: a [`Composition`](crate::Composition) copies notes in and out and never
hands out references into its own storage.

# Example
```rust
# use nrb::prelude::*;
let mut composition = Composition::new();

let note = Note {
    start: 1_000,
    release: 2_000,
    pitch: 0,
    articulation: Articulation::new(0),
    ramp: Ramp::new(MAX_RAMP),
    section: 0,
    layer: 0,
};
composition.append_note(note).unwrap();

assert_eq!(composition.note(0).duration(), 1_000);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Starting time. Never negative, and never before the start of
    /// [`section`](Self::section).
    pub start: i64,
    /// Release time. Always strictly after `start`.
    pub release: i64,
    /// Semitones from middle C, in `[MIN_PITCH, MAX_PITCH]`.
    pub pitch: i8,
    /// Pedal and grace flags plus an articulation index.
    pub articulation: Articulation,
    /// Ramp value in `[0, MAX_RAMP]`.
    pub ramp: Ramp,
    /// Index of the section this note belongs to.
    pub section: u16,
    /// One less than the layer number within the section.
    pub layer: u16,
}

impl Note {
    /// How long the note sounds, in microseconds.
    #[inline]
    pub const fn duration(&self) -> i64 {
        self.release - self.start
    }

    /// The one-based layer number.
    #[inline]
    pub const fn layer_number(&self) -> u32 {
        self.layer as u32 + 1
    }

    /// Check every field against the format's rules, using `sections` to
    /// resolve the section reference.
    pub fn check(&self, sections: &[i64]) -> Result<(), NoteError> {
        if self.start < 0 {
            return Err(NoteError::NegativeStart(self.start));
        }
        if self.release <= self.start {
            return Err(NoteError::Release {
                start: self.start,
                release: self.release,
            });
        }
        if !(MIN_PITCH..=MAX_PITCH).contains(&self.pitch) {
            return Err(NoteError::Pitch(self.pitch));
        }
        if !self.articulation.is_valid() {
            return Err(NoteError::Articulation(self.articulation.index()));
        }
        if !self.ramp.is_valid() {
            return Err(NoteError::Ramp(self.ramp.value()));
        }
        let Some(&offset) = sections.get(self.section as usize) else {
            return Err(NoteError::Section {
                section: self.section,
                count: sections.len(),
            });
        };
        // notes may run past later sections; only the start is bounded
        if self.start < offset {
            return Err(NoteError::BeforeSection {
                start: self.start,
                section: self.section,
                offset,
            });
        }
        Ok(())
    }

    /// Reads one 24-byte note record. Field values are not checked here.
    pub(crate) fn read<R: Read>(reader: &mut Reader<R>) -> ReadResult<Self> {
        Ok(Self {
            start: reader.read_u64()?,
            release: reader.read_u64()?,
            pitch: reader.read_biased()?,
            articulation: Articulation(reader.read_u8()?),
            ramp: Ramp(reader.read_u16()?),
            section: reader.read_u16()?,
            layer: reader.read_u16()?,
        })
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.write_u64(self.start)?;
        writer.write_u64(self.release)?;
        writer.write_biased(self.pitch)?;
        writer.write_u8(self.articulation.byte())?;
        writer.write_u16(self.ramp.value())?;
        writer.write_u16(self.section)?;
        writer.write_u16(self.layer)
    }
}

#[doc = r#"
The articulation byte of a [`Note`].

```text
 7   6   5 ... 0
 P   G   index
```

`P` marks a note modified by the sustain pedal, `G` marks a grace note, and the
six low bits hold an articulation index in `[0, 61]`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Articulation(u8);

impl Articulation {
    const PEDAL: u8 = 0b1000_0000;
    const GRACE: u8 = 0b0100_0000;
    const INDEX: u8 = 0b0011_1111;

    /// Wrap a raw articulation byte without checking it.
    pub const fn new(byte: u8) -> Self {
        Self(byte)
    }

    /// Build an articulation from its parts.
    ///
    /// # Panics
    /// if `index` is greater than [`MAX_ARTICULATION`].
    pub const fn from_parts(index: u8, pedal: bool, grace: bool) -> Self {
        if index > MAX_ARTICULATION {
            panic!("Articulation index out of range");
        }
        let mut byte = index;
        if pedal {
            byte |= Self::PEDAL;
        }
        if grace {
            byte |= Self::GRACE;
        }
        Self(byte)
    }

    /// Returns the raw byte
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// The articulation index in the low six bits.
    pub const fn index(&self) -> u8 {
        self.0 & Self::INDEX
    }

    /// True if the note was modified by the sustain pedal.
    pub const fn pedal(&self) -> bool {
        self.0 & Self::PEDAL != 0
    }

    /// True if the note is a grace note.
    pub const fn grace(&self) -> bool {
        self.0 & Self::GRACE != 0
    }

    /// Indices 62 and 63 are reserved.
    pub const fn is_valid(&self) -> bool {
        self.index() <= MAX_ARTICULATION
    }
}

/// A value in `[0.0, 1.0]` quantized to steps of `1/16384`.
///
/// How the value is used is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ramp(u16);

impl Ramp {
    /// The ramp representing `0.0`
    pub const ZERO: Self = Self(0);
    /// The ramp representing `1.0`
    pub const FULL: Self = Self(MAX_RAMP);

    /// Wrap an integer ramp value without checking it.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Quantize a real value. Values outside `[0.0, 1.0]` are clamped and
    /// `NaN` becomes zero.
    pub fn from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        let scaled = (value.clamp(0., 1.) * MAX_RAMP as f32).round();
        Self(scaled as u16)
    }

    /// The integer encoding
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// The real value this ramp encodes
    pub const fn as_f32(&self) -> f32 {
        self.0 as f32 / MAX_RAMP as f32
    }

    /// True if within `[0, MAX_RAMP]`.
    pub const fn is_valid(&self) -> bool {
        self.0 <= MAX_RAMP
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
fn note() -> Note {
    Note {
        start: 1_000,
        release: 2_000,
        pitch: 0,
        articulation: Articulation::new(0),
        ramp: Ramp::ZERO,
        section: 0,
        layer: 0,
    }
}

#[test]
fn valid_note_passes() {
    assert_eq!(note().check(&[0]), Ok(()));
    assert_eq!(note().duration(), 1_000);
    assert_eq!(note().layer_number(), 1);
}

#[test]
fn note_field_errors() {
    use pretty_assertions::assert_eq;
    let sections = [0, 500, 5_000];

    let n = Note { start: -1, ..note() };
    assert_eq!(n.check(&sections), Err(NoteError::NegativeStart(-1)));

    let n = Note {
        release: 1_000,
        ..note()
    };
    assert_eq!(
        n.check(&sections),
        Err(NoteError::Release {
            start: 1_000,
            release: 1_000
        })
    );

    let n = Note { pitch: 49, ..note() };
    assert_eq!(n.check(&sections), Err(NoteError::Pitch(49)));
    let n = Note { pitch: -40, ..note() };
    assert_eq!(n.check(&sections), Err(NoteError::Pitch(-40)));

    let n = Note {
        articulation: Articulation::new(0b1100_0000 | 62),
        ..note()
    };
    assert_eq!(n.check(&sections), Err(NoteError::Articulation(62)));

    let n = Note {
        ramp: Ramp::new(MAX_RAMP + 1),
        ..note()
    };
    assert_eq!(n.check(&sections), Err(NoteError::Ramp(16385)));

    let n = Note { section: 3, ..note() };
    assert_eq!(
        n.check(&sections),
        Err(NoteError::Section {
            section: 3,
            count: 3
        })
    );

    let n = Note { section: 2, ..note() };
    assert_eq!(
        n.check(&sections),
        Err(NoteError::BeforeSection {
            start: 1_000,
            section: 2,
            offset: 5_000
        })
    );
}

#[test]
fn note_may_outlast_its_section() {
    let n = Note {
        release: 1_000_000,
        section: 1,
        ..note()
    };
    assert_eq!(n.check(&[0, 500, 5_000]), Ok(()));
}

#[test]
fn articulation_bits() {
    use pretty_assertions::assert_eq;
    let art = Articulation::from_parts(61, true, false);
    assert_eq!(art.byte(), 0b1011_1101);
    assert!(art.pedal());
    assert!(!art.grace());
    assert_eq!(art.index(), 61);
    assert!(art.is_valid());

    let art = Articulation::new(0b0111_1111);
    assert!(art.grace());
    assert!(!art.is_valid());
}

#[test]
fn ramp_quantization() {
    use pretty_assertions::assert_eq;
    assert_eq!(Ramp::from_f32(0.5).value(), 8192);
    assert_eq!(Ramp::from_f32(2.0), Ramp::FULL);
    assert_eq!(Ramp::from_f32(-1.0), Ramp::ZERO);
    assert_eq!(Ramp::from_f32(f32::NAN), Ramp::ZERO);
    assert_eq!(Ramp::FULL.as_f32(), 1.0);
}
