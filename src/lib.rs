#![doc = r#"
# nrb

Reader and writer for NoiR Binary (NRB) files.

An NRB file describes a musical performance as a flat list of note events on a
microsecond timeline. The timeline is split into sections; each note belongs
to a section and may not start before it, though it may ring on past the start
of any later section.

## Reading
```rust
use nrb::prelude::*;

# let bytes = {
#     let mut c = Composition::new();
#     c.append_note(Note {
#         start: 0,
#         release: 10,
#         pitch: 0,
#         articulation: Articulation::new(0),
#         ramp: Ramp::ZERO,
#         section: 0,
#         layer: 0,
#     }).unwrap();
#     c.to_bytes().unwrap()
# };
let parsed = Composition::from_bytes(&bytes);
if parsed.version.needs_warning() {
    eprintln!("file was written by a newer version of the format");
}
let composition = parsed.into_result().unwrap();

for note in composition.notes() {
    println!("{} +{}us", note.pitch, note.duration());
}
```

## Writing
Build a [`Composition`] by appending sections and notes, optionally
[`sort`](Composition::sort) it, then [`serialize`](Composition::serialize) it
to any [`std::io::Write`].

## Features
- `tracing`: log warnings and parse failures through [`tracing`](https://docs.rs/tracing)
- `serde`: derive `Serialize` and `Deserialize` on the value types
- `cli` (default): build the `nrbwalk` tool
"#]
#![warn(missing_docs)]

mod composition;
pub use composition::*;

mod error;
pub use error::*;

mod note;
pub use note::*;

pub mod reader;
pub mod version;
pub mod writer;

/// The maximum number of sections in a composition.
pub const MAX_SECTIONS: usize = 65535;

/// The maximum number of notes in a composition.
pub const MAX_NOTES: usize = 1_048_576;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        Articulation, CapacityError, Composition, MAX_ARTICULATION, MAX_NOTES, MAX_PITCH,
        MAX_RAMP, MAX_SECTIONS, MIN_PITCH, Note, NoteError, ParseError, Parsed, Ramp,
        WriteError,
        reader::{ReadResult, ReaderError, ReaderErrorKind},
        version::VersionStatus,
    };
}
