#![doc = r#"
The in-memory [`Composition`] and everything that reads or writes it.

A composition is either built in code:

```rust
# use nrb::prelude::*;
let mut composition = Composition::new();
composition.append_section(4_000_000).unwrap();

composition
    .append_note(Note {
        start: 4_500_000,
        release: 5_000_000,
        pitch: 7,
        articulation: Articulation::from_parts(3, false, false),
        ramp: Ramp::from_f32(0.75),
        section: 1,
        layer: 0,
    })
    .unwrap();

let bytes = composition.to_bytes().unwrap();
```

or parsed from a stream with [`Composition::parse`]. Either way, every value
stored in it satisfies the format's rules at all times.

# Two kinds of failure

Malformed *data* (a bad file, a full table) is reported through `Result`.
Malformed *arguments* (an index past the end, a note that breaks the rules, a
section that starts before the previous one) are bugs in the calling code and
panic.
"#]

mod header;
pub use header::*;

mod parse;
pub use parse::*;

mod report;
pub use report::*;

mod storage;
use storage::{NOTE_ALLOC_INIT, SECTION_ALLOC_INIT, reserve_one};

mod write;

use crate::{CapacityError, MAX_NOTES, MAX_SECTIONS, Note};

/// A decoded NRB document: a section table and a note table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    sections: Vec<i64>,
    notes: Vec<Note>,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    /// An empty composition: section zero at offset zero, and no notes.
    pub fn new() -> Self {
        let mut sections = Vec::with_capacity(SECTION_ALLOC_INIT);
        sections.push(0);
        Self {
            sections,
            notes: Vec::with_capacity(NOTE_ALLOC_INIT),
        }
    }

    /// Number of sections. Always in `[1, 65535]`.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of notes. Always in `[0, 1048576]`.
    #[inline]
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Start offset of a section, in microseconds.
    ///
    /// # Panics
    /// if `index` is not less than [`section_count`](Self::section_count).
    pub fn offset(&self, index: usize) -> i64 {
        match self.sections.get(index) {
            Some(&offset) => offset,
            None => panic!(
                "Section index {index} out of range ({} sections)",
                self.sections.len()
            ),
        }
    }

    /// All section offsets, in index order.
    pub fn sections(&self) -> &[i64] {
        &self.sections
    }

    /// All notes, in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns a copy of a note.
    ///
    /// # Panics
    /// if `index` is not less than [`note_count`](Self::note_count).
    pub fn note(&self, index: usize) -> Note {
        match self.notes.get(index) {
            Some(&note) => note,
            None => panic!(
                "Note index {index} out of range ({} notes)",
                self.notes.len()
            ),
        }
    }

    /// Replace the note at `index`.
    ///
    /// # Panics
    /// if `index` is out of range or `note` breaks any rule of
    /// [`Note::check`]. The stored note is left untouched in that case.
    pub fn set_note(&mut self, index: usize, note: Note) {
        let count = self.notes.len();
        if index >= count {
            panic!("Note index {index} out of range ({count} notes)");
        }
        self.assert_valid(&note);
        self.notes[index] = note;
    }

    /// Define a new section starting at `offset` microseconds.
    ///
    /// Returns [`CapacityError::Sections`] if 65535 sections are already
    /// defined.
    ///
    /// # Panics
    /// if `offset` is negative or earlier than the offset of the last
    /// section.
    pub fn append_section(&mut self, offset: i64) -> Result<(), CapacityError> {
        if offset < 0 {
            panic!("Negative section offset {offset}");
        }
        let last = self.offset(self.sections.len() - 1);
        if offset < last {
            panic!("Section offset {offset} is before the last section at {last}");
        }
        if self.sections.len() >= MAX_SECTIONS {
            return Err(CapacityError::Sections);
        }
        reserve_one(&mut self.sections, SECTION_ALLOC_INIT, MAX_SECTIONS);
        self.sections.push(offset);
        Ok(())
    }

    /// Add a note. Notes may be added in any order, but the section they
    /// reference must already exist.
    ///
    /// Returns [`CapacityError::Notes`] if 1048576 notes are already defined.
    ///
    /// # Panics
    /// if `note` breaks any rule of [`Note::check`].
    pub fn append_note(&mut self, note: Note) -> Result<(), CapacityError> {
        self.assert_valid(&note);
        if self.notes.len() >= MAX_NOTES {
            return Err(CapacityError::Notes);
        }
        reserve_one(&mut self.notes, NOTE_ALLOC_INIT, MAX_NOTES);
        self.notes.push(note);
        Ok(())
    }

    /// Order the notes by ascending start time.
    ///
    /// Notes that start together end up adjacent, in no particular order.
    pub fn sort(&mut self) {
        self.notes.sort_unstable_by_key(|note| note.start);
    }

    fn assert_valid(&self, note: &Note) {
        if let Err(e) = note.check(&self.sections) {
            panic!("Invalid note: {e}");
        }
    }
}
