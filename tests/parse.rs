use nrb::prelude::*;
use nrb::{HeaderError, SectionError};
use pretty_assertions::assert_eq;

const SIG: [u32; 2] = [1_928_196_216, 778_990_178];

/// Helper to assemble the fixed header of an NRB file
fn header(major: u8, minor: u8, sections: u16, notes: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&SIG[0].to_be_bytes());
    bytes.extend_from_slice(&SIG[1].to_be_bytes());
    bytes.push(major);
    bytes.push(minor);
    bytes.extend_from_slice(&sections.to_be_bytes());
    bytes.extend_from_slice(&notes.to_be_bytes());
    bytes.extend_from_slice(&[0; 16]); // reserved
    bytes
}

fn push_section(bytes: &mut Vec<u8>, offset: u64) {
    bytes.extend_from_slice(&offset.to_be_bytes());
}

/// Appends a raw note record. `pitch` is the biased byte as stored.
#[allow(clippy::too_many_arguments)]
fn push_note(
    bytes: &mut Vec<u8>,
    start: u64,
    release: u64,
    pitch: u8,
    art: u8,
    ramp: u16,
    section: u16,
    layer: u16,
) {
    bytes.extend_from_slice(&start.to_be_bytes());
    bytes.extend_from_slice(&release.to_be_bytes());
    bytes.push(pitch);
    bytes.push(art);
    bytes.extend_from_slice(&ramp.to_be_bytes());
    bytes.extend_from_slice(&section.to_be_bytes());
    bytes.extend_from_slice(&layer.to_be_bytes());
}

/// Two sections, two notes, all valid.
fn simple_file(major: u8, minor: u8) -> Vec<u8> {
    let mut bytes = header(major, minor, 2, 2);
    push_section(&mut bytes, 0);
    push_section(&mut bytes, 500_000);
    push_note(&mut bytes, 0, 250_000, 128, 0, 16384, 0, 0);
    push_note(&mut bytes, 600_000, 850_000, 125, 0x85, 8192, 1, 2);
    bytes
}

fn parse_err(bytes: &[u8]) -> (VersionStatus, ReaderError) {
    let parsed = Composition::from_bytes(bytes);
    let version = parsed.version;
    (version, parsed.into_result().unwrap_err())
}

#[test]
fn parse_simple_file() {
    let parsed = Composition::from_bytes(&simple_file(1, 0));
    assert_eq!(parsed.version, VersionStatus::Ok);
    let composition = parsed.into_result().unwrap();

    assert_eq!(composition.section_count(), 2);
    assert_eq!(composition.offset(0), 0);
    assert_eq!(composition.offset(1), 500_000);
    assert_eq!(composition.note_count(), 2);

    let note = composition.note(1);
    assert_eq!(note.start, 600_000);
    assert_eq!(note.release, 850_000);
    assert_eq!(note.pitch, -3);
    assert!(note.articulation.pedal());
    assert!(!note.articulation.grace());
    assert_eq!(note.articulation.index(), 5);
    assert_eq!(note.ramp, Ramp::new(8192));
    assert_eq!(note.section, 1);
    assert_eq!(note.layer, 2);
    assert_eq!(note.layer_number(), 3);
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = simple_file(1, 0);
    bytes.extend_from_slice(b"anything at all");
    assert!(Composition::from_bytes(&bytes).is_ok());
}

#[test]
fn trailing_bytes_are_not_consumed() {
    let mut bytes = simple_file(1, 0);
    let len = bytes.len();
    bytes.extend_from_slice(&[0xAB, 0xCD]);

    let mut source = &bytes[..];
    let parsed = Composition::parse(&mut source);
    assert!(parsed.is_ok());
    assert_eq!(source, &bytes[len..]);
}

#[test]
fn bad_signature_is_unreadable() {
    let mut bytes = simple_file(1, 0);
    bytes[3] ^= 0x01;
    let (version, err) = parse_err(&bytes);
    assert_eq!(version, VersionStatus::Unreadable);
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::Header(HeaderError::Signature {
            found: SIG[0] ^ 1,
            expected: SIG[0],
        }))
    );

    let mut bytes = simple_file(1, 0);
    bytes[7] = 0;
    let (version, _) = parse_err(&bytes);
    assert_eq!(version, VersionStatus::Unreadable);
}

#[test]
fn empty_and_truncated_streams_are_unreadable() {
    let (version, err) = parse_err(&[]);
    assert_eq!(version, VersionStatus::Unreadable);
    assert!(err.is_out_of_bounds());

    let bytes = simple_file(1, 0);
    for len in [4, 8, 9] {
        let (version, err) = parse_err(&bytes[..len]);
        assert_eq!(version, VersionStatus::Unreadable);
        assert!(err.is_out_of_bounds());
    }
}

#[test]
fn major_version_two_is_rejected() {
    let (version, err) = parse_err(&simple_file(2, 0));
    assert_eq!(version, VersionStatus::MajorUnsupported);
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::Header(HeaderError::MajorVersion(2)))
    );
    assert_eq!(err.position(), 8);
}

#[test]
fn minor_version_one_still_parses() {
    let parsed = Composition::from_bytes(&simple_file(1, 1));
    assert_eq!(parsed.version, VersionStatus::MinorUnsupported);
    assert!(parsed.version.needs_warning());
    assert_eq!(parsed.composition().unwrap().note_count(), 2);
}

#[test]
fn minor_version_kept_when_body_fails() {
    let bytes = simple_file(1, 3);
    let (version, err) = parse_err(&bytes[..bytes.len() - 1]);
    assert_eq!(version, VersionStatus::MinorUnsupported);
    assert!(err.is_out_of_bounds());
}

#[test]
fn truncated_body_keeps_version_ok() {
    let bytes = simple_file(1, 0);
    for len in [10, 20, 40, 60, bytes.len() - 1] {
        let (version, err) = parse_err(&bytes[..len]);
        assert_eq!(version, VersionStatus::Ok);
        assert!(err.is_out_of_bounds(), "len {len}: {err}");
    }
}

#[test]
fn section_count_bounds() {
    let (version, err) = parse_err(&header(1, 0, 0, 0));
    assert_eq!(version, VersionStatus::Ok);
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::Header(HeaderError::SectionCount(0)))
    );

    let mut bytes = header(1, 0, 65535, 0);
    for _ in 0..65535 {
        push_section(&mut bytes, 0);
    }
    let composition = Composition::from_bytes(&bytes).into_result().unwrap();
    assert_eq!(composition.section_count(), MAX_SECTIONS);
    assert_eq!(composition.note_count(), 0);
}

#[test]
fn note_count_bounds() {
    let (_, err) = parse_err(&header(1, 0, 1, 1_048_577));
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::Header(HeaderError::NoteCount(1_048_577)))
    );

    // the maximum passes the header check and then runs out of data
    let mut bytes = header(1, 0, 1, 1_048_576);
    push_section(&mut bytes, 0);
    let (_, err) = parse_err(&bytes);
    assert!(err.is_out_of_bounds());
}

#[test]
fn zero_notes_parse_but_cannot_be_written() {
    let mut bytes = header(1, 0, 1, 0);
    push_section(&mut bytes, 0);
    let composition = Composition::from_bytes(&bytes).into_result().unwrap();
    assert_eq!(composition.note_count(), 0);
    assert!(matches!(composition.to_bytes(), Err(WriteError::Empty)));
}

#[test]
fn reserved_top_bit_fails() {
    let mut bytes = simple_file(1, 0);
    bytes[16] = 0x80;
    let (version, err) = parse_err(&bytes);
    assert_eq!(version, VersionStatus::Ok);
    assert_eq!(err.parse_error(), Some(&ParseError::ReservedBit(0x8000_0000)));

    // top bit of the note count
    let mut bytes = simple_file(1, 0);
    bytes[12] = 0x80;
    let (_, err) = parse_err(&bytes);
    assert!(matches!(err.parse_error(), Some(ParseError::ReservedBit(_))));
}

#[test]
fn first_section_must_be_zero() {
    let mut bytes = header(1, 0, 1, 0);
    push_section(&mut bytes, 5);
    let (_, err) = parse_err(&bytes);
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::Section(SectionError::FirstOffset(5)))
    );
    assert_eq!(err.position(), 32);
}

#[test]
fn sections_may_repeat_but_not_decrease() {
    let mut bytes = header(1, 0, 3, 0);
    push_section(&mut bytes, 0);
    push_section(&mut bytes, 0);
    push_section(&mut bytes, 10);
    assert!(Composition::from_bytes(&bytes).is_ok());

    let mut bytes = header(1, 0, 3, 0);
    push_section(&mut bytes, 0);
    push_section(&mut bytes, 10);
    push_section(&mut bytes, 9);
    let (_, err) = parse_err(&bytes);
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::Section(SectionError::Decreasing {
            index: 2,
            offset: 9,
            previous: 10
        }))
    );
}

#[test]
fn section_offset_top_bit_fails() {
    let mut bytes = header(1, 0, 2, 0);
    push_section(&mut bytes, 0);
    push_section(&mut bytes, 1 << 63);
    let (_, err) = parse_err(&bytes);
    assert_eq!(err.parse_error(), Some(&ParseError::ReservedBit(1 << 63)));
}

/// A one-section file holding exactly the given note record.
fn single_note(start: u64, release: u64, pitch: u8, art: u8, ramp: u16, section: u16) -> Vec<u8> {
    let mut bytes = header(1, 0, 2, 1);
    push_section(&mut bytes, 0);
    push_section(&mut bytes, 1_000);
    push_note(&mut bytes, start, release, pitch, art, ramp, section, 0);
    bytes
}

fn note_err(bytes: &[u8]) -> NoteError {
    let (_, err) = parse_err(bytes);
    assert_eq!(err.position(), 48);
    match err.parse_error() {
        Some(ParseError::Note(e)) => e.clone(),
        other => panic!("expected a note error, got {other:?}"),
    }
}

#[test]
fn note_field_ranges() {
    assert_eq!(
        note_err(&single_note(10, 10, 128, 0, 0, 0)),
        NoteError::Release {
            start: 10,
            release: 10
        }
    );
    assert_eq!(
        note_err(&single_note(10, 5, 128, 0, 0, 0)),
        NoteError::Release {
            start: 10,
            release: 5
        }
    );
    // biased pitch bounds
    assert!(Composition::from_bytes(&single_note(0, 1, 128 - 39, 0, 0, 0)).is_ok());
    assert!(Composition::from_bytes(&single_note(0, 1, 128 + 48, 0, 0, 0)).is_ok());
    assert_eq!(
        note_err(&single_note(0, 1, 128 - 40, 0, 0, 0)),
        NoteError::Pitch(-40)
    );
    assert_eq!(
        note_err(&single_note(0, 1, 128 + 49, 0, 0, 0)),
        NoteError::Pitch(49)
    );
    // articulation: flags are free, index must be at most 61
    assert!(Composition::from_bytes(&single_note(0, 1, 128, 0xC0 | 61, 0, 0)).is_ok());
    assert_eq!(
        note_err(&single_note(0, 1, 128, 62, 0, 0)),
        NoteError::Articulation(62)
    );
    assert_eq!(
        note_err(&single_note(0, 1, 128, 0xFF, 0, 0)),
        NoteError::Articulation(63)
    );
    assert_eq!(
        note_err(&single_note(0, 1, 128, 0, 16385, 0)),
        NoteError::Ramp(16385)
    );
    assert_eq!(
        note_err(&single_note(0, 1, 128, 0, 0, 2)),
        NoteError::Section {
            section: 2,
            count: 2
        }
    );
    assert_eq!(
        note_err(&single_note(999, 2_000, 128, 0, 0, 1)),
        NoteError::BeforeSection {
            start: 999,
            section: 1,
            offset: 1_000
        }
    );
}

#[test]
fn note_may_span_later_sections() {
    let bytes = single_note(0, 1_000_000, 128, 0, 0, 0);
    let composition = Composition::from_bytes(&bytes).into_result().unwrap();
    assert_eq!(composition.note(0).duration(), 1_000_000);
}

#[test]
fn one_bad_note_fails_whole_parse() {
    let mut bytes = header(1, 0, 1, 3);
    push_section(&mut bytes, 0);
    push_note(&mut bytes, 0, 10, 128, 0, 0, 0, 0);
    push_note(&mut bytes, 0, 10, 128, 0, 0, 0, 0);
    push_note(&mut bytes, 0, 10, 128, 0, 0, 1, 0);
    let parsed = Composition::from_bytes(&bytes);
    assert_eq!(parsed.version, VersionStatus::Ok);
    assert!(parsed.composition().is_none());
}

#[test]
fn parse_missing_path() {
    let parsed = Composition::parse_path("this/file/does/not/exist.nrb");
    assert_eq!(parsed.version, VersionStatus::Unreadable);
    let err = parsed.into_result().unwrap_err();
    assert!(matches!(err.error_kind(), ReaderErrorKind::Io(_)));
}
