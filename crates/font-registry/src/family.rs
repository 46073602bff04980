//! Family names of registered fonts.

use std::result;

use read_fonts::{FileRef, FontRef, ReadError, TableProvider};

use crate::error::{RegistryError, Result};

const FAMILY_NAME_ID: u16 = 1;
const TYPOGRAPHIC_FAMILY_NAME_ID: u16 = 16;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_WINDOWS: u16 = 3;

/// Family names of every logical font in `data`, in collection order.
///
/// The typographic family name is preferred over the legacy family name,
/// and Windows or Unicode records over Macintosh ones.
pub fn family_names(data: &[u8]) -> Result<Vec<String>> {
    let fonts: Vec<FontRef> = match FileRef::new(data)? {
        FileRef::Font(font) => vec![font],
        FileRef::Collection(collection) => {
            collection.iter().collect::<result::Result<_, ReadError>>()?
        }
    };
    fonts
        .iter()
        .enumerate()
        .map(|(index, font)| {
            family_name(font).ok_or(RegistryError::MissingFamilyName { index: index as u32 })
        })
        .collect()
}

fn family_name(font: &FontRef) -> Option<String> {
    let name = font.name().ok()?;
    let mut best: Option<(u8, String)> = None;
    for record in name.name_record() {
        let id_rank = match record.name_id().to_u16() {
            TYPOGRAPHIC_FAMILY_NAME_ID => 0,
            FAMILY_NAME_ID => 2,
            _ => continue,
        };
        let platform_rank = match record.platform_id() {
            PLATFORM_WINDOWS | PLATFORM_UNICODE => 0,
            _ => 1,
        };
        let rank = id_rank + platform_rank;
        if best.as_ref().is_some_and(|(best_rank, _)| *best_rank <= rank) {
            continue;
        }
        let Ok(string) = record.string(name.string_data()) else {
            continue;
        };
        let string = string.chars().collect::<String>();
        if !string.is_empty() {
            best = Some((rank, string));
        }
    }
    best.map(|(_, name)| name)
}
