//! Newtypes for the two glyph id spaces involved in subsetting.
//!
//! Source ids index the input font; subset ids index the rebuilt one.
//! Keeping them apart stops a renumbered id from leaking back into a lookup
//! against the source tables.

use std::fmt;

use read_fonts::types::Tag;

macro_rules! u16_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u16);

        impl $name {
            /// The `.notdef` glyph.
            pub const NOTDEF: Self = Self(0);

            pub const fn new(id: u16) -> Self {
                Self(id)
            }

            pub const fn to_u16(self) -> u16 {
                self.0
            }

            pub const fn to_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u16> for $name {
            fn from(id: u16) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u16 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $label, self.0)
            }
        }
    };
}

u16_id!(
    /// A glyph id in the source font
    GlyphId,
    "GID"
);

impl From<GlyphId> for read_fonts::types::GlyphId {
    fn from(id: GlyphId) -> Self {
        Self::from(id.0)
    }
}

u16_id!(
    /// A glyph id in the subset font, dense from zero
    SubsetGlyphId,
    "SubsetGID"
);

pub(crate) const CMAP: Tag = Tag::new(b"cmap");
pub(crate) const GLYF: Tag = Tag::new(b"glyf");
pub(crate) const HEAD: Tag = Tag::new(b"head");
pub(crate) const HHEA: Tag = Tag::new(b"hhea");
pub(crate) const HMTX: Tag = Tag::new(b"hmtx");
pub(crate) const LOCA: Tag = Tag::new(b"loca");
pub(crate) const MAXP: Tag = Tag::new(b"maxp");
pub(crate) const NAME: Tag = Tag::new(b"name");
pub(crate) const POST: Tag = Tag::new(b"post");
