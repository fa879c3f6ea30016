use core::fmt;

use super::Composition;

#[doc = r#"
A plain-text dump of a [`Composition`].

```text
SECTIONS: 2
NOTES   : 1

SECTION 0 AT 0
SECTION 1 AT 500000

NOTE T=600000 DUR=250000 Pi=-3 Pd=1 Gr=0 A=133 R=16384 S=1 L=1
```

`Pd` and `Gr` are the pedal and grace flags, `A` is the whole articulation
byte, and `L` is the one-based layer number.
"#]
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    composition: &'a Composition,
}

impl Composition {
    /// Returns a [`Display`](fmt::Display) adapter that dumps this composition.
    pub fn report(&self) -> Report<'_> {
        Report { composition: self }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.composition;
        writeln!(f, "SECTIONS: {}", c.section_count())?;
        writeln!(f, "NOTES   : {}", c.note_count())?;
        writeln!(f)?;

        for (i, offset) in c.sections().iter().enumerate() {
            writeln!(f, "SECTION {i} AT {offset}")?;
        }
        writeln!(f)?;

        for note in c.notes() {
            writeln!(
                f,
                "NOTE T={} DUR={} Pi={} Pd={} Gr={} A={} R={} S={} L={}",
                note.start,
                note.duration(),
                note.pitch,
                u8::from(note.articulation.pedal()),
                u8::from(note.articulation.grace()),
                note.articulation.byte(),
                note.ramp,
                note.section,
                note.layer_number(),
            )?;
        }
        Ok(())
    }
}
