use std::borrow::Cow;

use log::info;
use rayon::prelude::*;

use crate::{
    closure::GlyphCoverage,
    cmap::CharMap,
    config::{ASCII_PRINTABLE, RemovalPolicy},
    container::{Font, load_fonts},
    error::Result,
    name::rewrite_family_name,
    rebuild::rebuild,
    serialize::serialize,
};

/// Configurable font subsetter.
///
/// Defaults: the `"subset"` suffix, printable ASCII merged into the text,
/// and the standard [`RemovalPolicy`].
#[derive(Debug, Clone)]
pub struct Subsetter {
    suffix: Option<String>,
    include_ascii_printable: bool,
    removal_policy: RemovalPolicy,
}

impl Default for Subsetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsetter {
    pub fn new() -> Self {
        Self {
            suffix: None,
            include_ascii_printable: true,
            removal_policy: RemovalPolicy::default(),
        }
    }

    /// Sets the suffix appended to family names.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Sets whether U+0020..=U+007E are retained regardless of the text.
    pub fn include_ascii_printable(mut self, include: bool) -> Self {
        self.include_ascii_printable = include;
        self
    }

    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn removal_policy(&self) -> &RemovalPolicy {
        &self.removal_policy
    }

    /// The text whose characters are resolved, after the ASCII option.
    pub fn effective_text<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.include_ascii_printable {
            Cow::Owned(ASCII_PRINTABLE.chain(text.chars()).collect())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Subsets every logical font in `data`, a font file or collection.
    ///
    /// Outputs are in collection order. Fails as a whole if any font fails.
    pub fn subset(&self, data: &[u8], text: &str) -> Result<Vec<Vec<u8>>> {
        let fonts = load_fonts(data)?;
        let text = self.effective_text(text);
        let outputs = fonts
            .par_iter()
            .map(|font| self.subset_font(font, &text))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Subset {} font(s): {} -> {} bytes",
            outputs.len(),
            data.len(),
            outputs.iter().map(Vec::len).sum::<usize>()
        );
        Ok(outputs)
    }

    /// Subsets one logical font with `text` used as is.
    pub fn subset_font(&self, font: &Font<'_>, text: &str) -> Result<Vec<u8>> {
        let cmap = CharMap::select(font)?;
        let coverage = GlyphCoverage::compute(font, &cmap, text)?;
        let mut tables = rebuild(font, &cmap, &coverage, &self.removal_policy)?;
        rewrite_family_name(&mut tables, self.suffix())?;
        Ok(serialize(&tables))
    }
}
