//! Glyph coverage: the transitive closure of glyphs a text needs.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::{
    cmap::CharMap,
    container::Font,
    error::Result,
    glyph::{Glyph, GlyphTable},
    types::GlyphId,
};

/// Source glyph ids retained in a subset.
///
/// Always contains `.notdef` and is closed under composite component
/// references. Iteration is in ascending glyph id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphCoverage {
    glyphs: BTreeSet<GlyphId>,
}

impl GlyphCoverage {
    /// Computes the glyphs needed to render `text` with `cmap`.
    ///
    /// Only Basic Multilingual Plane characters are resolved. Characters
    /// without a mapping contribute nothing, and glyph ids outside the
    /// font's `loca` are skipped.
    pub fn compute(font: &Font<'_>, cmap: &CharMap<'_>, text: &str) -> Result<Self> {
        let table = GlyphTable::new(font)?;

        let codepoints: BTreeSet<u32> = text.chars().map(u32::from).collect();
        let mut pending = vec![GlyphId::NOTDEF];
        for &codepoint in &codepoints {
            if codepoint > 0xFFFF {
                debug!("Skipping supplementary-plane character U+{codepoint:04X}");
                continue;
            }
            let gid = cmap.lookup(codepoint);
            if !table.contains(gid) {
                warn!("U+{codepoint:04X} maps to {gid}, beyond the glyph count; treating as unmapped");
                continue;
            }
            pending.push(gid);
        }

        let mut glyphs = BTreeSet::new();
        while let Some(gid) = pending.pop() {
            if !glyphs.insert(gid) {
                continue;
            }
            let Glyph::Composite(composite) = table.glyph(gid)? else {
                continue;
            };
            for component in composite.components()? {
                if !table.contains(component.glyph) {
                    warn!("{gid} references missing component {}", component.glyph);
                } else if !glyphs.contains(&component.glyph) {
                    pending.push(component.glyph);
                }
            }
        }

        debug!(
            "Coverage: {} glyphs for {} distinct characters",
            glyphs.len(),
            codepoints.len()
        );
        Ok(Self { glyphs })
    }

    /// Coverage of an explicit glyph set, plus `.notdef`.
    ///
    /// No composite closure is applied.
    pub fn from_glyphs(glyphs: impl IntoIterator<Item = GlyphId>) -> Self {
        let mut glyphs: BTreeSet<GlyphId> = glyphs.into_iter().collect();
        glyphs.insert(GlyphId::NOTDEF);
        Self { glyphs }
    }

    pub fn contains(&self, gid: GlyphId) -> bool {
        self.glyphs.contains(&gid)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Never true; `.notdef` is always covered.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Covered glyph ids in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = GlyphId> + '_ {
        self.glyphs.iter().copied()
    }
}
