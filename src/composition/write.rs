use std::io::Write;

use super::{Composition, Header};
use crate::{WriteError, writer::Writer};

impl Composition {
    /// Write the composition to `sink` in NRB format.
    ///
    /// Notes are written in their current order; call [`sort`](Self::sort)
    /// first for a file ordered by start time. Writing is fully sequential.
    ///
    /// Returns [`WriteError::Empty`] if there are no notes.
    pub fn serialize<W: Write>(&self, sink: W) -> Result<(), WriteError> {
        if self.notes.is_empty() {
            return Err(WriteError::Empty);
        }
        let mut writer = Writer::new(sink);

        // counts are bounded by the table limits
        Header::new(self.sections.len() as u16, self.notes.len() as u32).write(&mut writer)?;
        for &offset in &self.sections {
            writer.write_u64(offset)?;
        }
        for note in &self.notes {
            note.write(&mut writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serialize into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        let mut bytes = Vec::with_capacity(32 + self.sections.len() * 8 + self.notes.len() * 24);
        self.serialize(&mut bytes)?;
        Ok(bytes)
    }
}
