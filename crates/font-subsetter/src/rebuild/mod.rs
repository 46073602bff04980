//! Rebuilding a font's tables around a glyph coverage.
//!
//! Tables that index glyphs are regenerated for the dense subset id space;
//! the rest are copied unchanged unless the removal policy drops them.

mod cmap;
mod glyf;
mod hmtx;
mod patch;

use std::collections::BTreeMap;

use log::{debug, info, warn};
use read_fonts::{TableProvider, TopLevelTable, types::Tag};
use write_fonts::{FontWrite, validate::Validate};

use crate::{
    closure::GlyphCoverage,
    cmap::CharMap,
    config::RemovalPolicy,
    container::Font,
    error::{Result, SubsetError},
    glyph::GlyphTable,
    types::{CMAP, GLYF, GlyphId, HEAD, HHEA, HMTX, LOCA, MAXP, POST, SubsetGlyphId},
};

/// Tables of a font being assembled, keyed and ordered by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSet {
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: Tag) -> Option<&[u8]> {
        self.tables.get(&tag).map(Vec::as_slice)
    }

    pub fn insert(&mut self, tag: Tag, data: Vec<u8>) {
        self.tables.insert(tag, data);
    }

    pub fn remove(&mut self, tag: Tag) -> Option<Vec<u8>> {
        self.tables.remove(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &[u8])> {
        self.tables.iter().map(|(tag, data)| (*tag, data.as_slice()))
    }
}

/// Order-preserving mapping from covered source glyphs to subset glyphs.
#[derive(Debug, Clone)]
pub struct GlyphRenumbering {
    old_to_new: BTreeMap<GlyphId, SubsetGlyphId>,
    new_to_old: Vec<GlyphId>,
}

impl GlyphRenumbering {
    /// Assigns subset ids `0..n` to the covered glyphs in ascending order.
    ///
    /// `numGlyphs` is a 16-bit field, so at most 65535 glyphs fit.
    pub fn new(coverage: &GlyphCoverage) -> Result<Self> {
        if coverage.len() > usize::from(u16::MAX) {
            return Err(SubsetError::SubsetTooLarge { glyphs: coverage.len() });
        }
        let new_to_old: Vec<GlyphId> = coverage.iter().collect();
        let old_to_new = new_to_old
            .iter()
            .enumerate()
            .map(|(new, old)| (*old, SubsetGlyphId::new(new as u16)))
            .collect();
        Ok(Self { old_to_new, new_to_old })
    }

    pub fn get(&self, old: GlyphId) -> Option<SubsetGlyphId> {
        self.old_to_new.get(&old).copied()
    }

    /// Source glyph ids indexed by subset glyph id.
    pub fn source_glyphs(&self) -> &[GlyphId] {
        &self.new_to_old
    }

    pub fn len(&self) -> usize {
        self.new_to_old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_to_old.is_empty()
    }
}

/// Encodes a typed table, reporting failures against its tag.
pub(crate) fn dump_table<T: FontWrite + Validate + TopLevelTable>(table: &T) -> Result<Vec<u8>> {
    write_fonts::dump_table(table)
        .map_err(|err| SubsetError::Write { tag: T::TAG, reason: err.to_string() })
}

/// Builds the subset's tables from the source font.
pub fn rebuild(
    font: &Font<'_>,
    cmap: &CharMap<'_>,
    coverage: &GlyphCoverage,
    policy: &RemovalPolicy,
) -> Result<TableSet> {
    let renumbering = GlyphRenumbering::new(coverage)?;
    let num_glyphs = renumbering.len();

    let mut tables = TableSet::new();
    for (tag, data) in font.tables() {
        if policy.removes(tag) {
            debug!("Dropping table '{tag}'");
            continue;
        }
        tables.insert(tag, data.to_vec());
    }

    let source = font.font_ref();
    let glyphs = GlyphTable::new(font)?;
    let outlines = glyf::subset_glyf(&glyphs, &renumbering)?;
    tables.insert(GLYF, outlines.glyf);
    tables.insert(LOCA, outlines.loca);
    tables.insert(CMAP, cmap::subset_cmap(cmap, &renumbering)?);
    tables.insert(HEAD, patch::patch_head(&source.head()?, outlines.format)?);

    if tables.contains(MAXP) {
        tables.insert(MAXP, patch::patch_maxp(&source.maxp()?, num_glyphs as u16)?);
    }

    match (tables.contains(HHEA), tables.contains(HMTX)) {
        (true, true) => {
            let metrics = hmtx::subset_hmtx(&source.hmtx()?, &renumbering)?;
            let hhea = patch::patch_hhea(&source.hhea()?, metrics.number_of_h_metrics)?;
            tables.insert(HHEA, hhea);
            tables.insert(HMTX, dump_table(&metrics.hmtx)?);
        }
        (false, true) => {
            warn!("Font {}: 'hmtx' without 'hhea' cannot be renumbered, dropping it", font.index());
            tables.remove(HMTX);
        }
        _ => {}
    }

    if tables.contains(POST) {
        tables.insert(POST, patch::truncate_post(&source.post()?)?);
    }

    info!(
        "Font {}: kept {} of {} glyphs, {} tables",
        font.index(),
        num_glyphs,
        glyphs.num_glyphs(),
        tables.len()
    );
    Ok(tables)
}
