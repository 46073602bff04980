//! Selection of the character map used to resolve subset text.

use log::debug;
use read_fonts::{
    TableProvider,
    tables::cmap::{Cmap, CmapSubtable, PlatformId},
};

use crate::{
    container::Font,
    error::{Result, SubsetError},
    types::GlyphId,
};

/// The character map subtable chosen for a font.
///
/// Format 12 is preferred over format 4 regardless of platform; the first
/// matching record in table order wins.
pub struct CharMap<'a> {
    platform: PlatformId,
    encoding_id: u16,
    subtable: CmapSubtable<'a>,
}

impl<'a> CharMap<'a> {
    /// Selects the best usable subtable of the font's `cmap`.
    pub fn select(font: &Font<'a>) -> Result<Self> {
        Self::from_cmap(&font.font_ref().cmap()?)
    }

    pub fn from_cmap(cmap: &Cmap<'a>) -> Result<Self> {
        Self::find_format(cmap, 12)
            .or_else(|| Self::find_format(cmap, 4))
            .ok_or(SubsetError::NoUsableCMap)
            .inspect(|map| {
                debug!(
                    "Using cmap format {} ({:?}, encoding {})",
                    map.format(),
                    map.platform,
                    map.encoding_id
                )
            })
    }

    fn find_format(cmap: &Cmap<'a>, format: u16) -> Option<Self> {
        cmap.encoding_records().iter().find_map(|record| {
            let subtable = record.subtable(cmap.offset_data()).ok()?;
            (subtable_format(&subtable) == Some(format)).then(|| Self {
                platform: record.platform_id(),
                encoding_id: record.encoding_id(),
                subtable,
            })
        })
    }

    pub fn format(&self) -> u16 {
        subtable_format(&self.subtable).unwrap_or_default()
    }

    pub fn platform(&self) -> PlatformId {
        self.platform
    }

    pub fn encoding_id(&self) -> u16 {
        self.encoding_id
    }

    /// Maps a code point to its glyph, `.notdef` when unmapped.
    ///
    /// A mapping beyond the 16-bit glyph id space is treated as unmapped.
    pub fn lookup(&self, codepoint: u32) -> GlyphId {
        let gid = match &self.subtable {
            CmapSubtable::Format4(subtable) => subtable.map_codepoint(codepoint),
            CmapSubtable::Format12(subtable) => subtable.map_codepoint(codepoint),
            _ => None,
        };
        gid.and_then(|gid| u16::try_from(gid.to_u32()).ok())
            .map(GlyphId::new)
            .unwrap_or(GlyphId::NOTDEF)
    }
}

fn subtable_format(subtable: &CmapSubtable<'_>) -> Option<u16> {
    match subtable {
        CmapSubtable::Format4(_) => Some(4),
        CmapSubtable::Format12(_) => Some(12),
        _ => None,
    }
}
