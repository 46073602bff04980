//! Parsed view over a font file or collection.

use std::collections::BTreeMap;

use log::debug;
use read_fonts::{CollectionRef, FileRef, FontRef, types::Tag};

use crate::{config::PROTECTED_TABLES, error::ParseError};

/// One logical font: its table directory resolved to byte slices of the
/// input buffer.
#[derive(Clone)]
pub struct Font<'a> {
    font: FontRef<'a>,
    tables: BTreeMap<Tag, &'a [u8]>,
    index: u32,
}

impl<'a> Font<'a> {
    /// Reads a single (non-collection) font.
    pub fn new(data: &'a [u8]) -> Result<Self, ParseError> {
        Self::from_ref(FontRef::new(data)?, 0)
    }

    fn from_ref(font: FontRef<'a>, index: u32) -> Result<Self, ParseError> {
        let mut tables = BTreeMap::new();
        for record in font.table_directory.table_records() {
            let tag = record.tag();
            let data = font.table_data(tag).ok_or(ParseError::TruncatedTable(tag))?;
            tables.insert(tag, data.as_bytes());
        }

        for tag in PROTECTED_TABLES {
            let tag = Tag::new(tag);
            if !tables.contains_key(&tag) {
                return Err(ParseError::MissingTable(tag));
            }
        }

        debug!("Font {index}: {} tables", tables.len());
        Ok(Self { font, tables, index })
    }

    /// Position of this font inside its collection, `0` for a single font.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Raw bytes of the table with the given tag.
    pub fn table(&self, tag: Tag) -> Option<&'a [u8]> {
        self.tables.get(&tag).copied()
    }

    /// All tables in ascending tag order.
    pub fn tables(&self) -> impl Iterator<Item = (Tag, &'a [u8])> + '_ {
        self.tables.iter().map(|(tag, data)| (*tag, *data))
    }

    pub(crate) fn font_ref(&self) -> &FontRef<'a> {
        &self.font
    }

    pub(crate) fn required_table(&self, tag: Tag) -> Result<&'a [u8], ParseError> {
        self.table(tag).ok_or(ParseError::MissingTable(tag))
    }
}

/// Reads every logical font from a font file or a font collection.
///
/// A single font yields one entry; a collection yields one per member in
/// collection order.
pub fn load_fonts(data: &[u8]) -> Result<Vec<Font<'_>>, ParseError> {
    match FileRef::new(data)? {
        FileRef::Font(font) => Ok(vec![Font::from_ref(font, 0)?]),
        FileRef::Collection(collection) => read_collection(&collection),
    }
}

fn read_collection<'a>(collection: &CollectionRef<'a>) -> Result<Vec<Font<'a>>, ParseError> {
    if collection.is_empty() {
        return Err(ParseError::EmptyCollection);
    }
    debug!("Font collection with {} fonts", collection.len());
    (0..collection.len())
        .map(|index| Font::from_ref(collection.get(index)?, index))
        .collect()
}
