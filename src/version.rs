#![doc = r#"
Version gating for NRB files

Every NRB header carries a major and a minor version byte. This library
understands version `1.0`:

- A different major version means the layout is unknown, and parsing stops.
- A newer minor version promises a compatible layout. Parsing continues, but
  the caller should still warn the user, whether or not the parse succeeds.

The numeric codes of [`VersionStatus`] are stable and may be used as exit or
status codes by tools.
"#]

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The major version written by and understood by this library.
pub const MAJOR_VERSION: u8 = 1;

/// The minor version written by this library.
pub const MINOR_VERSION: u8 = 0;

/// How the declared version of a stream compares to what this library reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VersionStatus {
    /// Major and minor version are supported.
    Ok = 0,
    /// The major version is supported but the minor version is newer.
    ///
    /// The parse may still succeed; the user should be warned either way.
    MinorUnsupported = 1,
    /// The major version is not supported. The parse always fails.
    MajorUnsupported = 2,
    /// The version could not be read, so the stream is not NRB at all.
    Unreadable = 3,
}

impl VersionStatus {
    /// Classify a major/minor version pair.
    pub const fn classify(major: u8, minor: u8) -> Self {
        if major != MAJOR_VERSION {
            Self::MajorUnsupported
        } else if minor != MINOR_VERSION {
            Self::MinorUnsupported
        } else {
            Self::Ok
        }
    }

    /// True if a stream with this status can never be parsed.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MajorUnsupported | Self::Unreadable)
    }

    /// True if the user should see a compatibility warning.
    pub const fn needs_warning(&self) -> bool {
        matches!(self, Self::MinorUnsupported)
    }
}

#[test]
fn classify_versions() {
    use pretty_assertions::assert_eq;
    assert_eq!(VersionStatus::classify(1, 0), VersionStatus::Ok);
    assert_eq!(VersionStatus::classify(1, 1), VersionStatus::MinorUnsupported);
    assert_eq!(VersionStatus::classify(1, 255), VersionStatus::MinorUnsupported);
    assert_eq!(VersionStatus::classify(2, 0), VersionStatus::MajorUnsupported);
    assert_eq!(VersionStatus::classify(0, 0), VersionStatus::MajorUnsupported);
}

#[test]
fn status_codes() {
    use pretty_assertions::assert_eq;
    assert_eq!(u8::from(VersionStatus::Ok), 0);
    assert_eq!(u8::from(VersionStatus::Unreadable), 3);
    assert_eq!(
        VersionStatus::try_from(2u8).unwrap(),
        VersionStatus::MajorUnsupported
    );
    assert!(VersionStatus::try_from(4u8).is_err());
}
