//! Fixed policy of the subsetter: which tables are discarded, which are
//! rebuilt, and the defaults used when the caller does not say otherwise.

use std::{collections::BTreeSet, ops::RangeInclusive};

use log::warn;
use read_fonts::types::Tag;

/// Suffix used when the caller does not supply one.
pub const DEFAULT_SUFFIX: &str = "subset";

/// Printable ASCII, optionally merged into the subset text.
pub const ASCII_PRINTABLE: RangeInclusive<char> = ' '..='~';

/// Tables dropped from every subset.
///
/// Layout, kerning, device metrics, vertical metrics and the digital
/// signature all reference glyph ids or whole-file bytes that subsetting
/// invalidates, so they are removed rather than rewritten.
pub const REMOVED_TABLES: &[&[u8; 4]] = &[
    b"GDEF", b"GPOS", b"GSUB", b"kern", b"hdmx", b"vmtx", b"VDMX", b"LTSH", b"DSIG", b"vhea",
    b"mort", b"morx",
];

/// Tables every input font must carry and that can never be removed.
pub const PROTECTED_TABLES: &[&[u8; 4]] = &[b"cmap", b"glyf", b"loca", b"name", b"head"];

/// Platform and encoding of the single character map written to subsets
/// (Windows, Unicode BMP).
pub const OUTPUT_CMAP_ENCODING: (u16, u16) = (3, 1);

/// Set of table tags discarded while rebuilding a font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPolicy {
    tags: BTreeSet<Tag>,
}

impl RemovalPolicy {
    /// Creates a policy removing exactly `tags`.
    ///
    /// Tags in [`PROTECTED_TABLES`] are ignored.
    pub fn new(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self::empty().with_tags(tags)
    }

    /// A policy that keeps every table.
    pub fn empty() -> Self {
        Self { tags: BTreeSet::new() }
    }

    /// Adds tags to the removal set.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        for tag in tags {
            if is_protected(tag) {
                warn!("Table '{tag}' is required for subsetting and cannot be removed");
                continue;
            }
            self.tags.insert(tag);
        }
        self
    }

    pub fn removes(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tags.iter().copied()
    }
}

impl Default for RemovalPolicy {
    fn default() -> Self {
        Self::new(REMOVED_TABLES.iter().map(|tag| Tag::new(tag)))
    }
}

fn is_protected(tag: Tag) -> bool {
    PROTECTED_TABLES.iter().any(|protected| Tag::new(protected) == tag)
}
