use log::warn;

use crate::{
    error::{Result, SubsetError},
    glyph::{Glyph, GlyphTable},
    rebuild::GlyphRenumbering,
    types::{GLYF, SubsetGlyphId},
};

/// `indexToLocFormat` of a rebuilt `loca` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocaFormat {
    Short,
    Long,
}

impl LocaFormat {
    pub(crate) fn head_value(self) -> i16 {
        match self {
            Self::Short => 0,
            Self::Long => 1,
        }
    }
}

pub(crate) struct SubsetOutlines {
    pub(crate) glyf: Vec<u8>,
    pub(crate) loca: Vec<u8>,
    pub(crate) format: LocaFormat,
}

/// Copies the retained outlines in subset order and writes a matching `loca`.
///
/// Simple outlines are copied unchanged. Composite outlines have their
/// component ids renumbered; a component outside the coverage can only come
/// from an id beyond the source glyph count and is pointed at `.notdef`.
pub(crate) fn subset_glyf(
    glyphs: &GlyphTable<'_>,
    renumbering: &GlyphRenumbering,
) -> Result<SubsetOutlines> {
    let mut glyf = Vec::new();
    let mut offsets = Vec::with_capacity(renumbering.len() + 1);
    offsets.push(0usize);

    for &gid in renumbering.source_glyphs() {
        match glyphs.glyph(gid)? {
            Glyph::Composite(composite) => {
                let data = composite.remapped(|component| {
                    renumbering
                        .get(component)
                        .unwrap_or_else(|| {
                            warn!("{gid}: component {component} not in subset, using .notdef");
                            SubsetGlyphId::NOTDEF
                        })
                        .to_u16()
                })?;
                glyf.extend_from_slice(&data);
            }
            glyph => glyf.extend_from_slice(glyph.data()),
        }
        if glyf.len() % 2 != 0 {
            glyf.push(0);
        }
        offsets.push(glyf.len());
    }

    let (loca, format) = write_loca(&offsets)?;
    Ok(SubsetOutlines { glyf, loca, format })
}

/// Writes `loca` in the short format whenever every offset fits.
fn write_loca(offsets: &[usize]) -> Result<(Vec<u8>, LocaFormat)> {
    let max = offsets.last().copied().unwrap_or_default();
    if max / 2 <= usize::from(u16::MAX) {
        let loca = offsets
            .iter()
            .flat_map(|offset| ((offset / 2) as u16).to_be_bytes())
            .collect();
        return Ok((loca, LocaFormat::Short));
    }

    if u32::try_from(max).is_err() {
        return Err(SubsetError::TableTooLarge(GLYF));
    }
    let loca = offsets
        .iter()
        .flat_map(|&offset| (offset as u32).to_be_bytes())
        .collect();
    Ok((loca, LocaFormat::Long))
}
