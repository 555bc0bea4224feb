//! Format revision tags.
//!
//! Every 4klang container starts with a 4-byte ASCII tag naming the format
//! revision that wrote it. The set of tags is closed; an unrecognized tag
//! is a decode failure, never a silent default.

use std::fmt;

use serde::{Serialize, Serializer};

/// Length of the version tag in bytes.
pub const TAG_LEN: usize = 4;

/// On-disk format revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionTag {
    /// `4k10`
    V10,
    /// `4k11`
    V11,
    /// `4k12`
    V12,
    /// `4k13`
    V13,
    /// `4k14`
    V14,
}

impl VersionTag {
    /// The revision written by current 4klang builds.
    pub const CURRENT: VersionTag = VersionTag::V14;

    /// All known revisions, oldest first.
    pub const ALL: [VersionTag; 5] = [
        VersionTag::V10,
        VersionTag::V11,
        VersionTag::V12,
        VersionTag::V13,
        VersionTag::V14,
    ];

    /// Look up a revision from its on-disk tag bytes.
    pub fn from_tag(tag: [u8; TAG_LEN]) -> Option<Self> {
        match &tag {
            b"4k10" => Some(VersionTag::V10),
            b"4k11" => Some(VersionTag::V11),
            b"4k12" => Some(VersionTag::V12),
            b"4k13" => Some(VersionTag::V13),
            b"4k14" => Some(VersionTag::V14),
            _ => None,
        }
    }

    /// The on-disk tag bytes for this revision.
    pub fn as_tag(self) -> [u8; TAG_LEN] {
        *match self {
            VersionTag::V10 => b"4k10",
            VersionTag::V11 => b"4k11",
            VersionTag::V12 => b"4k12",
            VersionTag::V13 => b"4k13",
            VersionTag::V14 => b"4k14",
        }
    }

    /// The tag as text.
    pub fn as_str(self) -> &'static str {
        match self {
            VersionTag::V10 => "4k10",
            VersionTag::V11 => "4k11",
            VersionTag::V12 => "4k12",
            VersionTag::V13 => "4k13",
            VersionTag::V14 => "4k14",
        }
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VersionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
