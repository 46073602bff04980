//! TrueType font subsetting for a fixed string.
//!
//! Given font bytes (a single font or a collection) and the text that will
//! be rendered, this crate keeps only the glyphs that text needs, the glyphs
//! those reference as composite components, and `.notdef`. Glyphs are
//! renumbered densely, `glyf`/`loca`/`cmap`/`hmtx` are rebuilt, layout and
//! other glyph-indexed tables are dropped, and the family name is suffixed
//! so the subset can be installed next to the original font.
//!
//! Everything operates on byte slices; there is no file I/O.
//!
//! # Example
//!
//! ```no_run
//! use read_fonts::types::Tag;
//! use subfont_subsetter::{RemovalPolicy, Subsetter, subset_family_name, subset_fonts};
//!
//! let font_data: &[u8] = &[];
//!
//! // One output per font in the input file
//! let subsets = subset_fonts(font_data, "Hello", Some("hello"), true);
//!
//! // Builder with a custom removal policy
//! let subsets = Subsetter::new()
//!     .with_suffix("hello")
//!     .include_ascii_printable(false)
//!     .with_removal_policy(RemovalPolicy::default().with_tags([Tag::new(b"gasp")]))
//!     .subset(font_data, "Hello");
//!
//! assert_eq!(subset_family_name("Noto Sans", Some("hello")), "Noto Sans+hello");
//! ```

mod bytes;
mod closure;
mod cmap;
pub mod config;
mod container;
mod error;
mod glyph;
pub mod name;
mod rebuild;
mod serialize;
mod subsetter;
mod suffix;
pub mod text_encoding;
mod types;

pub use closure::GlyphCoverage;
pub use cmap::CharMap;
pub use config::{DEFAULT_SUFFIX, RemovalPolicy};
pub use container::{Font, load_fonts};
pub use error::{ParseError, Result, SubsetError};
pub use name::rewrite_family_name;
pub use rebuild::{GlyphRenumbering, TableSet, rebuild};
pub use serialize::serialize;
pub use subsetter::Subsetter;
pub use suffix::{encode_suffix, subset_family_name};
pub use types::{GlyphId, SubsetGlyphId};

/// Subsets every logical font in `font_bytes` for `subset_text`.
///
/// Returns one binary per font, in collection order. `suffix` defaults to
/// [`DEFAULT_SUFFIX`]; with `include_ascii_printable` the printable ASCII
/// range is retained in addition to the text.
pub fn subset_fonts(
    font_bytes: &[u8],
    subset_text: &str,
    suffix: Option<&str>,
    include_ascii_printable: bool,
) -> Result<Vec<Vec<u8>>> {
    let mut subsetter = Subsetter::new().include_ascii_printable(include_ascii_printable);
    if let Some(suffix) = suffix {
        subsetter = subsetter.with_suffix(suffix);
    }
    subsetter.subset(font_bytes, subset_text)
}
