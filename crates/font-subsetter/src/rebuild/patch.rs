//! Fixed-layout tables carried over with their glyph-dependent fields updated.

use log::debug;
use read_fonts::{
    tables::{
        head::Head as SourceHead, hhea::Hhea as SourceHhea, maxp::Maxp as SourceMaxp,
        post::Post as SourcePost,
    },
    types::Version16Dot16,
};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{head::Head, hhea::Hhea, maxp::Maxp, post::Post},
};

use crate::{
    error::{ParseError, Result},
    rebuild::{dump_table, glyf::LocaFormat},
    types::POST,
};

const POST_VERSIONS: [Version16Dot16; 4] = [
    Version16Dot16::VERSION_1_0,
    Version16Dot16::VERSION_2_0,
    Version16Dot16::VERSION_2_5,
    Version16Dot16::VERSION_3_0,
];

pub(crate) fn patch_head(head: &SourceHead<'_>, format: LocaFormat) -> Result<Vec<u8>> {
    let mut head: Head = head.to_owned_table();
    head.index_to_loc_format = format.head_value();
    dump_table(&head)
}

pub(crate) fn patch_maxp(maxp: &SourceMaxp<'_>, num_glyphs: u16) -> Result<Vec<u8>> {
    let mut maxp: Maxp = maxp.to_owned_table();
    maxp.num_glyphs = num_glyphs;
    dump_table(&maxp)
}

pub(crate) fn patch_hhea(hhea: &SourceHhea<'_>, number_of_h_metrics: u16) -> Result<Vec<u8>> {
    let mut hhea: Hhea = hhea.to_owned_table();
    hhea.number_of_h_metrics = number_of_h_metrics;
    dump_table(&hhea)
}

/// Drops glyph names, leaving a version 3.0 `post` table.
pub(crate) fn truncate_post(post: &SourcePost<'_>) -> Result<Vec<u8>> {
    let version = post.version();
    if !POST_VERSIONS.contains(&version) {
        let version = u32::from_be_bytes(version.to_be_bytes());
        return Err(ParseError::UnexpectedTableVersion { tag: POST, version }.into());
    }
    if version != Version16Dot16::VERSION_3_0 {
        debug!("Dropping glyph names from post version {version}");
    }

    let post = Post {
        version: Version16Dot16::VERSION_3_0,
        italic_angle: post.italic_angle(),
        underline_position: post.underline_position(),
        underline_thickness: post.underline_thickness(),
        is_fixed_pitch: post.is_fixed_pitch(),
        min_mem_type42: post.min_mem_type42(),
        max_mem_type42: post.max_mem_type42(),
        min_mem_type1: post.min_mem_type1(),
        max_mem_type1: post.max_mem_type1(),
        num_glyphs: None,
        glyph_name_index: None,
        string_data: None,
    };
    dump_table(&post)
}
