use std::result;

use read_fonts::{ReadError, types::Tag};
use thiserror::Error;

/// The input bytes are not a font this crate can subset.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read font: {0}")]
    Read(#[from] ReadError),

    #[error("font collection contains no fonts")]
    EmptyCollection,

    #[error("required table '{0}' not found")]
    MissingTable(Tag),

    #[error("table '{0}' extends past the end of the font data")]
    TruncatedTable(Tag),

    #[error("unsupported '{tag}' table version {version}")]
    UnexpectedTableVersion { tag: Tag, version: u32 },

    #[error("unexpected end of '{tag}' table data at offset {offset}")]
    UnexpectedEof { tag: Tag, offset: usize },
}

#[derive(Error, Debug)]
pub enum SubsetError {
    #[error("invalid font: {0}")]
    Parse(#[from] ParseError),

    #[error("font has no usable character map (format 12 or 4)")]
    NoUsableCMap,

    #[error("subset of {glyphs} glyphs exceeds the 16-bit glyph id space")]
    SubsetTooLarge { glyphs: usize },

    #[error("character map with {segments} segments does not fit a format 4 subtable")]
    CMapTooLarge { segments: usize },

    #[error("'{0}' table is too large to encode")]
    TableTooLarge(Tag),

    #[error("failed to write '{tag}' table: {reason}")]
    Write { tag: Tag, reason: String },
}

impl From<ReadError> for SubsetError {
    fn from(err: ReadError) -> Self {
        Self::Parse(ParseError::Read(err))
    }
}

pub type Result<T> = result::Result<T, SubsetError>;
