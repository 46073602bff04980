//! Access to `glyf` outlines through `loca`.
//!
//! Outlines are parsed with read-fonts only as far as needed to find the
//! component glyph ids of composites; their bytes are copied as is.

use read_fonts::{
    FontData, FontRead, TableProvider,
    tables::{
        glyf::{CompositeGlyph as CompositeOutline, CompositeGlyphFlags, Glyph as Outline},
        loca::Loca,
    },
};

use crate::{
    bytes::write_u16_at,
    container::Font,
    error::ParseError,
    types::{GLYF, GlyphId},
};

/// Size of the glyph header: numberOfContours plus the bounding box.
const GLYPH_HEADER_LEN: usize = 10;

pub(crate) struct GlyphTable<'a> {
    loca: Loca<'a>,
    glyf: &'a [u8],
}

impl<'a> GlyphTable<'a> {
    pub(crate) fn new(font: &Font<'a>) -> Result<Self, ParseError> {
        Ok(Self {
            loca: font.font_ref().loca(None)?,
            glyf: font.required_table(GLYF)?,
        })
    }

    /// Number of glyphs addressable through `loca`.
    pub(crate) fn num_glyphs(&self) -> usize {
        self.loca.len()
    }

    pub(crate) fn contains(&self, gid: GlyphId) -> bool {
        gid.to_usize() < self.num_glyphs()
    }

    /// The outline bytes of `gid`, including any padding up to the next
    /// `loca` entry.
    pub(crate) fn glyph(&self, gid: GlyphId) -> Result<Glyph<'a>, ParseError> {
        let idx = gid.to_usize();
        let (Some(start), Some(end)) = (self.loca.get_raw(idx), self.loca.get_raw(idx + 1)) else {
            return Err(ParseError::UnexpectedEof { tag: GLYF, offset: self.glyf.len() });
        };
        let (start, end) = (start as usize, end as usize);
        let data = self
            .glyf
            .get(start..end)
            .ok_or(ParseError::UnexpectedEof { tag: GLYF, offset: start.max(end) })?;
        Glyph::parse(data)
    }
}

pub(crate) enum Glyph<'a> {
    Empty,
    Simple(&'a [u8]),
    Composite(CompositeGlyph<'a>),
}

impl<'a> Glyph<'a> {
    fn parse(data: &'a [u8]) -> Result<Self, ParseError> {
        if data.is_empty() {
            return Ok(Self::Empty);
        }
        match Outline::read(FontData::new(data))? {
            Outline::Simple(_) => Ok(Self::Simple(data)),
            Outline::Composite(outline) => Ok(Self::Composite(CompositeGlyph { data, outline })),
        }
    }

    pub(crate) fn data(&self) -> &'a [u8] {
        match self {
            Self::Empty => &[],
            Self::Simple(data) => *data,
            Self::Composite(glyph) => glyph.data,
        }
    }
}

/// A component reference inside a composite glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Component {
    pub(crate) glyph: GlyphId,
    /// Offset of the glyph index field within the outline.
    id_offset: usize,
}

pub(crate) struct CompositeGlyph<'a> {
    data: &'a [u8],
    outline: CompositeOutline<'a>,
}

impl CompositeGlyph<'_> {
    /// The component references in outline order.
    ///
    /// Fails if the component list ends before a record without
    /// `MORE_COMPONENTS`.
    pub(crate) fn components(&self) -> Result<Vec<Component>, ParseError> {
        let mut components = Vec::new();
        let mut offset = GLYPH_HEADER_LEN;
        let mut more = true;
        for component in self.outline.components() {
            components.push(Component {
                glyph: GlyphId::new(component.glyph.to_u16()),
                id_offset: offset + 2,
            });
            offset += component_len(component.flags);
            more = component.flags.contains(CompositeGlyphFlags::MORE_COMPONENTS);
        }
        if more {
            return Err(ParseError::UnexpectedEof { tag: GLYF, offset: self.data.len() });
        }
        Ok(components)
    }

    /// Copies the outline with every component id passed through `remap`.
    ///
    /// Flags, transforms, instructions and padding are kept byte for byte.
    pub(crate) fn remapped(
        &self,
        mut remap: impl FnMut(GlyphId) -> u16,
    ) -> Result<Vec<u8>, ParseError> {
        let mut out = self.data.to_vec();
        for component in self.components()? {
            write_u16_at(&mut out, component.id_offset, remap(component.glyph), GLYF)?;
        }
        Ok(out)
    }
}

/// Encoded length of one component record with the given flags.
fn component_len(flags: CompositeGlyphFlags) -> usize {
    let args = if flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS) { 4 } else { 2 };
    let transform = if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
        2
    } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
        4
    } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
        8
    } else {
        0
    };
    4 + args + transform
}
