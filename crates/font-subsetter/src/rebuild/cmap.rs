use log::debug;
use read_fonts::tables::cmap::PlatformId;
use write_fonts::tables::cmap::{Cmap, CmapSubtable, EncodingRecord};

use crate::{
    cmap::CharMap,
    config::OUTPUT_CMAP_ENCODING,
    error::{Result, SubsetError},
    rebuild::{GlyphRenumbering, dump_table},
    types::{GlyphId, SubsetGlyphId},
};

/// Contiguous run of code points mapped to contiguous glyph ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    start_code: u16,
    end_code: u16,
    id_delta: i16,
}

/// Builds the subset `cmap`: every BMP code point whose glyph survived,
/// remapped to subset glyph ids, in a single Windows Unicode BMP subtable.
pub(crate) fn subset_cmap(cmap: &CharMap<'_>, renumbering: &GlyphRenumbering) -> Result<Vec<u8>> {
    // 0xFFFF is reserved for the terminating segment
    let mappings: Vec<(u16, SubsetGlyphId)> = (0..0xFFFFu16)
        .filter_map(|codepoint| {
            let gid = cmap.lookup(u32::from(codepoint));
            if gid == GlyphId::NOTDEF {
                return None;
            }
            renumbering.get(gid).map(|new_gid| (codepoint, new_gid))
        })
        .collect();
    debug!("Subset cmap maps {} code points", mappings.len());
    dump_table(&format4_cmap(&mappings)?)
}

/// A `cmap` with one format 4 subtable under [`OUTPUT_CMAP_ENCODING`].
///
/// `mappings` must be sorted by code point. Every segment is delta-coded.
pub(crate) fn format4_cmap(mappings: &[(u16, SubsetGlyphId)]) -> Result<Cmap> {
    let segments = segments(mappings);
    if 16 + 8 * segments.len() > usize::from(u16::MAX) {
        return Err(SubsetError::CMapTooLarge { segments: segments.len() });
    }

    let subtable = CmapSubtable::format_4(
        0,
        segments.iter().map(|segment| segment.end_code).collect(),
        segments.iter().map(|segment| segment.start_code).collect(),
        segments.iter().map(|segment| segment.id_delta).collect(),
        vec![0; segments.len()],
        Vec::new(),
    );
    let (platform_id, encoding_id) = OUTPUT_CMAP_ENCODING;
    Ok(Cmap::new(vec![EncodingRecord::new(PlatformId::new(platform_id), encoding_id, subtable)]))
}

fn segments(mappings: &[(u16, SubsetGlyphId)]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut prev: Option<(u16, SubsetGlyphId)> = None;
    for &(codepoint, gid) in mappings {
        let extends = prev.is_some_and(|(prev_cp, prev_gid)| {
            u32::from(prev_cp) + 1 == u32::from(codepoint)
                && u32::from(prev_gid.to_u16()) + 1 == u32::from(gid.to_u16())
        });
        match segments.last_mut() {
            Some(segment) if extends => segment.end_code = codepoint,
            _ => segments.push(Segment {
                start_code: codepoint,
                end_code: codepoint,
                id_delta: gid.to_u16().wrapping_sub(codepoint) as i16,
            }),
        }
        prev = Some((codepoint, gid));
    }
    segments.push(Segment { start_code: 0xFFFF, end_code: 0xFFFF, id_delta: 1 });
    segments
}
