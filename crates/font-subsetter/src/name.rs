//! `name` table parsing and family name rewriting.
//!
//! Records are kept as raw bytes so that strings in legacy encodings survive
//! untouched unless they are family names. The table is written by hand
//! because write-fonts only encodes UTF-16BE and Mac Roman strings.

use std::{collections::HashMap, result};

use log::debug;
use read_fonts::{FontData, FontRead, tables::name::Name};

use crate::{
    bytes::write_u16,
    error::{ParseError, Result, SubsetError},
    rebuild::TableSet,
    suffix::subset_family_name,
    text_encoding::TextEncoding,
    types::NAME,
};

pub const FAMILY_NAME_ID: u16 = 1;
pub const TYPOGRAPHIC_FAMILY_NAME_ID: u16 = 16;

const RECORD_LEN: usize = 12;
const LANG_TAG_RECORD_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub bytes: Vec<u8>,
}

impl NameRecord {
    pub fn encoding(&self) -> TextEncoding {
        TextEncoding::for_record(self.platform_id, self.encoding_id)
    }

    pub fn is_family_name(&self) -> bool {
        matches!(self.name_id, FAMILY_NAME_ID | TYPOGRAPHIC_FAMILY_NAME_ID)
    }

    /// The record's string, decoded with its platform encoding.
    pub fn text(&self) -> String {
        self.encoding().decode(&self.bytes)
    }
}

/// A `name` table in format 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    pub records: Vec<NameRecord>,
    /// Language tag strings of a format 1 table, `None` for format 0.
    pub lang_tags: Option<Vec<Vec<u8>>>,
}

impl NameTable {
    pub fn parse(data: &[u8]) -> result::Result<Self, ParseError> {
        let name = Name::read(FontData::new(data))?;
        let format = name.version();
        if format > 1 {
            return Err(ParseError::UnexpectedTableVersion { tag: NAME, version: format.into() });
        }

        let storage = name.string_data().as_bytes();
        let string = |offset: u32, length: u16| -> result::Result<Vec<u8>, ParseError> {
            let start = offset as usize;
            let end = start + usize::from(length);
            storage.get(start..end).map(<[u8]>::to_vec).ok_or(ParseError::UnexpectedEof {
                tag: NAME,
                offset: usize::from(name.storage_offset()) + end,
            })
        };

        let records = name
            .name_record()
            .iter()
            .map(|record| {
                Ok(NameRecord {
                    platform_id: record.platform_id(),
                    encoding_id: record.encoding_id(),
                    language_id: record.language_id(),
                    name_id: record.name_id().to_u16(),
                    bytes: string(record.string_offset().to_u32(), record.length())?,
                })
            })
            .collect::<result::Result<Vec<_>, ParseError>>()?;

        let lang_tags = name
            .lang_tag_record()
            .map(|tags| {
                tags.iter()
                    .map(|tag| string(tag.lang_tag_offset().to_u32(), tag.length()))
                    .collect::<result::Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self { records, lang_tags })
    }

    /// Serializes the table, sharing storage between identical strings.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let (format, header_len) = match &self.lang_tags {
            Some(tags) => (1, 6 + self.records.len() * RECORD_LEN + 2 + tags.len() * LANG_TAG_RECORD_LEN),
            None => (0, 6 + self.records.len() * RECORD_LEN),
        };
        let too_large = || SubsetError::TableTooLarge(NAME);
        let record_count = u16::try_from(self.records.len()).map_err(|_| too_large())?;
        let storage_offset = u16::try_from(header_len).map_err(|_| too_large())?;
        let mut storage = StringStorage::default();

        let mut writer = Vec::with_capacity(header_len);
        write_u16(&mut writer, format);
        write_u16(&mut writer, record_count);
        write_u16(&mut writer, storage_offset);
        for record in &self.records {
            let (length, offset) = storage.place(&record.bytes)?;
            write_u16(&mut writer, record.platform_id);
            write_u16(&mut writer, record.encoding_id);
            write_u16(&mut writer, record.language_id);
            write_u16(&mut writer, record.name_id);
            write_u16(&mut writer, length);
            write_u16(&mut writer, offset);
        }
        if let Some(tags) = &self.lang_tags {
            write_u16(&mut writer, u16::try_from(tags.len()).map_err(|_| too_large())?);
            for tag in tags {
                let (length, offset) = storage.place(tag)?;
                write_u16(&mut writer, length);
                write_u16(&mut writer, offset);
            }
        }
        writer.extend_from_slice(&storage.data);
        Ok(writer)
    }
}

/// String storage of a `name` table being written.
#[derive(Default)]
struct StringStorage<'a> {
    data: Vec<u8>,
    offsets: HashMap<&'a [u8], u16>,
}

impl<'a> StringStorage<'a> {
    /// Returns `(length, offset)` of `bytes`, appending them unless an
    /// identical string is already stored.
    fn place(&mut self, bytes: &'a [u8]) -> Result<(u16, u16)> {
        let length = u16::try_from(bytes.len()).map_err(|_| SubsetError::TableTooLarge(NAME))?;
        if let Some(&offset) = self.offsets.get(bytes) {
            return Ok((length, offset));
        }
        let offset =
            u16::try_from(self.data.len()).map_err(|_| SubsetError::TableTooLarge(NAME))?;
        self.data.extend_from_slice(bytes);
        self.offsets.insert(bytes, offset);
        Ok((length, offset))
    }
}

/// Appends `+<encoded suffix>` to every family and typographic family name
/// record of the `name` table, re-encoding each in its original encoding.
pub fn rewrite_family_name(tables: &mut TableSet, suffix: Option<&str>) -> Result<()> {
    let Some(data) = tables.get(NAME) else {
        return Err(ParseError::MissingTable(NAME).into());
    };
    let mut name = NameTable::parse(data)?;

    for record in name.records.iter_mut().filter(|record| record.is_family_name()) {
        let encoding = record.encoding();
        let family = encoding.decode(&record.bytes);
        let renamed = subset_family_name(&family, suffix);
        debug!(
            "name {} ({}, {}, {:#06x}): {family:?} -> {renamed:?}",
            record.name_id, record.platform_id, record.encoding_id, record.language_id
        );
        record.bytes = encoding.encode(&renamed);
    }

    tables.insert(NAME, name.to_bytes()?);
    Ok(())
}
