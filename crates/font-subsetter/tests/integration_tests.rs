//! End-to-end subsetting of synthetic fonts built with write-fonts.

use read_fonts::{
    FontRef, TableProvider,
    tables::cmap::PlatformId,
    types::{GlyphId, Tag, Version16Dot16},
};
use subfont_subsetter::{
    ParseError, RemovalPolicy, SubsetError, Subsetter, subset_family_name, subset_fonts,
};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        name::{Name, NameRecord},
        post::Post,
    },
};

// ============================================================================
// Font construction
// ============================================================================

/// Simple outline with one on-curve point at `(x, 0)`; 19 bytes long.
fn simple(x: i16) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&1i16.to_be_bytes());
    for v in [x, 0, x, 0] {
        data.extend_from_slice(&v.to_be_bytes());
    }
    data.extend_from_slice(&0u16.to_be_bytes()); // endPtsOfContours[0]
    data.extend_from_slice(&0u16.to_be_bytes()); // instructionLength
    data.push(0x01);
    data.extend_from_slice(&x.to_be_bytes());
    data.extend_from_slice(&0i16.to_be_bytes());
    data
}

/// Composite outline referencing `components`, offset by word arguments.
fn composite(components: &[u16]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(-1i16).to_be_bytes());
    data.extend_from_slice(&[0u8; 8]);
    for (i, gid) in components.iter().enumerate() {
        let more = if i + 1 < components.len() { 0x0020 } else { 0 };
        data.extend_from_slice(&(0x0003u16 | more).to_be_bytes());
        data.extend_from_slice(&gid.to_be_bytes());
        data.extend_from_slice(&(10 * i as i16).to_be_bytes());
        data.extend_from_slice(&0i16.to_be_bytes());
    }
    data
}

/// Raw `glyf` and long-format `loca`, each outline padded to an even length.
fn glyf_loca(glyphs: &[Vec<u8>]) -> (Vec<u8>, Vec<u8>) {
    let mut glyf = Vec::new();
    let mut loca = 0u32.to_be_bytes().to_vec();
    for glyph in glyphs {
        glyf.extend_from_slice(glyph);
        if glyf.len() % 2 != 0 {
            glyf.push(0);
        }
        loca.extend_from_slice(&(glyf.len() as u32).to_be_bytes());
    }
    (glyf, loca)
}

/// Builder holding every table of a test font except `name`.
fn font_builder(glyphs: &[Vec<u8>], mappings: &[(char, u16)]) -> FontBuilder<'static> {
    let num_glyphs = glyphs.len() as u16;
    let (glyf, loca) = glyf_loca(glyphs);

    let cmap = Cmap::from_mappings(
        mappings.iter().map(|(c, gid)| (*c, GlyphId::new(u32::from(*gid)))),
    )
    .expect("cmap");

    let head = Head {
        font_revision: font_types::Fixed::from_f64(1.0),
        checksum_adjustment: 0,
        magic_number: 0x5F0F3CF5,
        flags: write_fonts::tables::head::Flags::empty(),
        units_per_em: 1000,
        created: font_types::LongDateTime::new(0),
        modified: font_types::LongDateTime::new(0),
        x_min: 0,
        y_min: 0,
        x_max: 500,
        y_max: 700,
        mac_style: write_fonts::tables::head::MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: 1,
    };

    let hhea = Hhea {
        ascender: font_types::FWord::new(700),
        descender: font_types::FWord::new(-200),
        line_gap: font_types::FWord::new(0),
        advance_width_max: font_types::UfWord::new(500 + num_glyphs),
        min_left_side_bearing: font_types::FWord::new(0),
        min_right_side_bearing: font_types::FWord::new(0),
        x_max_extent: font_types::FWord::new(500),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
    };

    let hmtx = Hmtx {
        h_metrics: (0..num_glyphs)
            .map(|gid| LongMetric { advance: 500 + gid, side_bearing: gid as i16 })
            .collect(),
        left_side_bearings: vec![],
    };

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(1),
        max_contours: Some(1),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(2),
        max_component_depth: Some(1),
    };

    let post = Post {
        version: Version16Dot16::VERSION_3_0,
        italic_angle: font_types::Fixed::from_f64(0.0),
        underline_position: font_types::FWord::new(-100),
        underline_thickness: font_types::FWord::new(50),
        is_fixed_pitch: 0,
        min_mem_type42: 0,
        max_mem_type42: 0,
        min_mem_type1: 0,
        max_mem_type1: 0,
        num_glyphs: None,
        glyph_name_index: None,
        string_data: None,
    };

    let mut builder = FontBuilder::new();
    builder.add_table(&head).unwrap();
    builder.add_table(&hhea).unwrap();
    builder.add_table(&hmtx).unwrap();
    builder.add_table(&maxp).unwrap();
    builder.add_table(&cmap).unwrap();
    builder.add_table(&post).unwrap();
    builder.add_raw(Tag::new(b"glyf"), glyf);
    builder.add_raw(Tag::new(b"loca"), loca);
    builder
}

fn name_table(family: &str) -> Name {
    let record = |platform: u16, encoding: u16, language: u16, id: u16, value: &str| {
        NameRecord::new(platform, encoding, language, read_fonts::types::NameId::new(id), value.to_string().into())
    };
    Name::new(vec![
        record(1, 0, 0, 1, family),
        record(3, 1, 0x409, 1, family),
        record(3, 1, 0x409, 2, "Regular"),
        record(3, 1, 0x409, 4, &format!("{family} Regular")),
        record(3, 1, 0x409, 16, family),
    ])
}

fn make_font(glyphs: &[Vec<u8>], mappings: &[(char, u16)], family: &str) -> Vec<u8> {
    let mut builder = font_builder(glyphs, mappings);
    builder.add_table(&name_table(family)).unwrap();
    builder.build()
}

/// Glyphs of the standard test font:
///
/// | gid | char   | outline                         |
/// |-----|--------|---------------------------------|
/// | 0   |        | simple (.notdef)                |
/// | 1   | A      | simple                          |
/// | 2   | B      | simple                          |
/// | 3   |        | simple (acute)                  |
/// | 4   | Á      | composite 1 + 3                 |
/// | 5   | C      | simple                          |
/// | 6   | Z      | composite referencing itself    |
/// | 7   | Y      | composite 8                     |
/// | 8   |        | composite 7                     |
/// | 9   | D      | composite 10                    |
/// | 10  |        | composite 1                     |
/// | 11  | !      | empty                           |
/// | 12  | E      | composite 99 (out of range)     |
/// | 13  | U+1F600| simple                          |
fn standard_glyphs() -> Vec<Vec<u8>> {
    vec![
        simple(0),
        simple(1),
        simple(2),
        simple(3),
        composite(&[1, 3]),
        simple(5),
        composite(&[6]),
        composite(&[8]),
        composite(&[7]),
        composite(&[10]),
        composite(&[1]),
        vec![],
        composite(&[99]),
        simple(13),
    ]
}

const STANDARD_MAPPINGS: &[(char, u16)] = &[
    ('A', 1),
    ('B', 2),
    ('\u{C1}', 4),
    ('C', 5),
    ('Z', 6),
    ('Y', 7),
    ('D', 9),
    ('!', 11),
    ('E', 12),
    ('\u{1F600}', 13),
];

fn standard_font() -> Vec<u8> {
    make_font(&standard_glyphs(), STANDARD_MAPPINGS, "Test Sans")
}

/// Packs complete fonts into a TrueType collection, rebasing their table
/// offsets.
fn make_collection(fonts: &[Vec<u8>]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let mut bases = Vec::new();
    let mut body = Vec::new();
    for font in fonts {
        let base = header_len + body.len();
        bases.push(base as u32);
        let mut font = font.clone();
        let num_tables = u16::from_be_bytes([font[4], font[5]]) as usize;
        for i in 0..num_tables {
            let at = 12 + 16 * i + 8;
            let offset = u32::from_be_bytes(font[at..at + 4].try_into().unwrap());
            font[at..at + 4].copy_from_slice(&(offset + base as u32).to_be_bytes());
        }
        body.extend_from_slice(&font);
        while body.len() % 4 != 0 {
            body.push(0);
        }
    }

    let mut data = Vec::new();
    data.extend_from_slice(b"ttcf");
    data.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    data.extend_from_slice(&(fonts.len() as u32).to_be_bytes());
    for base in bases {
        data.extend_from_slice(&base.to_be_bytes());
    }
    data.extend_from_slice(&body);
    data
}

// ============================================================================
// Inspection helpers
// ============================================================================

fn subset(font: &[u8], text: &str) -> Vec<u8> {
    let mut outputs = subset_fonts(font, text, Some("test"), false).expect("subset failed");
    assert_eq!(outputs.len(), 1);
    outputs.remove(0)
}

fn num_glyphs(font: &FontRef) -> u16 {
    font.maxp().expect("maxp").num_glyphs()
}

fn glyph_bytes<'a>(font: &FontRef<'a>, gid: u16) -> &'a [u8] {
    let loca = font.loca(None).expect("loca");
    let glyf = font.table_data(Tag::new(b"glyf")).expect("glyf").as_bytes();
    let start = loca.get_raw(gid as usize).unwrap() as usize;
    let end = loca.get_raw(gid as usize + 1).unwrap() as usize;
    &glyf[start..end]
}

fn components(outline: &[u8]) -> Vec<u16> {
    let mut gids = Vec::new();
    let mut offset = 10;
    loop {
        let flags = u16::from_be_bytes([outline[offset], outline[offset + 1]]);
        gids.push(u16::from_be_bytes([outline[offset + 2], outline[offset + 3]]));
        offset += if flags & 0x0001 != 0 { 8 } else { 6 };
        if flags & 0x0020 == 0 {
            break;
        }
    }
    gids
}

fn mapped(font: &FontRef, c: char) -> Option<u32> {
    font.cmap().expect("cmap").map_codepoint(c).map(|gid| gid.to_u32())
}

fn names(font: &FontRef, name_id: u16) -> Vec<String> {
    let name = font.name().expect("name");
    name.name_record()
        .iter()
        .filter(|record| record.name_id().to_u16() == name_id)
        .map(|record| record.string(name.string_data()).expect("string").to_string())
        .collect()
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn test_notdef_always_retained() {
    let source_data = standard_font();
    let source = FontRef::new(&source_data).unwrap();
    let out = subset(&source_data, "");
    let font = FontRef::new(&out).expect("parse subset");
    assert_eq!(num_glyphs(&font), 1);
    assert_eq!(glyph_bytes(&font, 0), glyph_bytes(&source, 0));
    assert_eq!(mapped(&font, 'A'), None);
}

#[test]
fn test_simple_outline_is_copied_verbatim() {
    let source_data = standard_font();
    let source = FontRef::new(&source_data).unwrap();
    let out = subset(&source_data, "B");
    let font = FontRef::new(&out).unwrap();

    assert_eq!(num_glyphs(&font), 2);
    assert_eq!(mapped(&font, 'B'), Some(1));
    assert_eq!(glyph_bytes(&font, 1), glyph_bytes(&source, 2));
}

#[test]
fn test_composite_components_are_closed_and_renumbered() {
    let out = subset(&standard_font(), "\u{C1}");
    let font = FontRef::new(&out).unwrap();

    // {0, 1, 3, 4} renumbered to {0, 1, 2, 3}
    assert_eq!(num_glyphs(&font), 4);
    assert_eq!(mapped(&font, '\u{C1}'), Some(3));
    assert_eq!(components(glyph_bytes(&font, 3)), vec![1, 2]);
    // the base letter's glyph survives, so its mapping does too
    assert_eq!(mapped(&font, 'A'), Some(1));
    assert_eq!(mapped(&font, 'B'), None);
}

#[test]
fn test_nested_composites() {
    let out = subset(&standard_font(), "D");
    let font = FontRef::new(&out).unwrap();

    // {0, 1, 9, 10}
    assert_eq!(num_glyphs(&font), 4);
    assert_eq!(mapped(&font, 'D'), Some(2));
    assert_eq!(components(glyph_bytes(&font, 2)), vec![3]);
    assert_eq!(components(glyph_bytes(&font, 3)), vec![1]);
}

#[test]
fn test_cyclic_composites_terminate() {
    let out = subset(&standard_font(), "ZY");
    let font = FontRef::new(&out).unwrap();

    // {0, 6, 7, 8}
    assert_eq!(num_glyphs(&font), 4);
    assert_eq!(components(glyph_bytes(&font, 1)), vec![1]);
    assert_eq!(components(glyph_bytes(&font, 2)), vec![3]);
    assert_eq!(components(glyph_bytes(&font, 3)), vec![2]);
}

#[test]
fn test_out_of_range_component_points_at_notdef() {
    let out = subset(&standard_font(), "E");
    let font = FontRef::new(&out).unwrap();

    assert_eq!(num_glyphs(&font), 2);
    assert_eq!(components(glyph_bytes(&font, 1)), vec![0]);
}

#[test]
fn test_supplementary_plane_characters_are_ignored() {
    let out = subset(&standard_font(), "\u{1F600}");
    let font = FontRef::new(&out).unwrap();
    assert_eq!(num_glyphs(&font), 1);
}

#[test]
fn test_unmapped_characters_contribute_nothing() {
    let out = subset(&standard_font(), "Aqqq\u{3042}");
    let font = FontRef::new(&out).unwrap();
    assert_eq!(num_glyphs(&font), 2);
}

#[test]
fn test_ascii_printable_is_merged() {
    let font_data = standard_font();
    let with_ascii = subset_fonts(&font_data, "", None, true).unwrap().remove(0);
    let font = FontRef::new(&with_ascii).unwrap();

    // A B C Z Y D ! E and their closure: {0,1,2,5,6,7,8,9,10,11,12}
    assert_eq!(num_glyphs(&font), 11);
    for c in ['A', 'B', 'C', 'D', 'E', 'Y', 'Z', '!'] {
        assert!(mapped(&font, c).is_some(), "missing {c}");
    }
    assert_eq!(mapped(&font, '\u{C1}'), None);
}

#[test]
fn test_empty_glyph_stays_empty() {
    let out = subset(&standard_font(), "!");
    let font = FontRef::new(&out).unwrap();
    assert_eq!(mapped(&font, '!'), Some(1));
    assert!(glyph_bytes(&font, 1).is_empty());
}

#[test]
fn test_deep_composite_chain() {
    const DEPTH: u16 = 5000;
    let mut glyphs = vec![simple(0)];
    for gid in 1..DEPTH {
        glyphs.push(composite(&[gid + 1]));
    }
    glyphs.push(simple(1));
    let font_data = make_font(&glyphs, &[('A', 1)], "Deep");

    let out = subset(&font_data, "A");
    let font = FontRef::new(&out).unwrap();
    assert_eq!(num_glyphs(&font), DEPTH + 1);
}

// ============================================================================
// Rebuilt tables
// ============================================================================

#[test]
fn test_single_windows_bmp_cmap() {
    let out = subset(&standard_font(), "AB");
    let font = FontRef::new(&out).unwrap();
    let cmap = font.cmap().unwrap();
    let records = cmap.encoding_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].platform_id(), PlatformId::Windows);
    assert_eq!(records[0].encoding_id(), 1);
}

#[test]
fn test_short_loca_and_head() {
    let out = subset(&standard_font(), "ABC");
    let font = FontRef::new(&out).unwrap();
    assert_eq!(font.head().unwrap().index_to_loc_format(), 0);
    assert_eq!(font.loca(None).unwrap().len(), 4);
}

#[test]
fn test_hmtx_follows_renumbering() {
    let out = subset(&standard_font(), "C");
    let font = FontRef::new(&out).unwrap();
    assert_eq!(font.hhea().unwrap().number_of_h_metrics(), 2);

    let hmtx = font.table_data(Tag::new(b"hmtx")).unwrap().as_bytes();
    // (advance, lsb) of source glyphs 0 and 5
    assert_eq!(hmtx, &[0x01, 0xF4, 0, 0, 0x01, 0xF9, 0, 5]);
}

#[test]
fn test_hmtx_is_dropped_without_hhea() {
    let font_data = standard_font();
    let out = Subsetter::new()
        .include_ascii_printable(false)
        .with_removal_policy(RemovalPolicy::new([Tag::new(b"hhea")]))
        .subset(&font_data, "C")
        .unwrap()
        .remove(0);
    let font = FontRef::new(&out).unwrap();
    assert!(font.table_data(Tag::new(b"hhea")).is_none());
    assert!(font.table_data(Tag::new(b"hmtx")).is_none());
    assert_eq!(num_glyphs(&font), 2);
}

#[test]
fn test_post_is_version_3() {
    let out = subset(&standard_font(), "A");
    let font = FontRef::new(&out).unwrap();
    assert_eq!(font.post().unwrap().version(), Version16Dot16::VERSION_3_0);
}

#[test]
fn test_removal_policy() {
    let mut builder = font_builder(&standard_glyphs(), STANDARD_MAPPINGS);
    builder.add_table(&name_table("Test Sans")).unwrap();
    builder.add_raw(Tag::new(b"GSUB"), vec![0u8; 10]);
    builder.add_raw(Tag::new(b"DSIG"), vec![0u8; 8]);
    builder.add_raw(Tag::new(b"cvt "), vec![0, 1, 0, 2]);
    let font_data = builder.build();

    let out = subset(&font_data, "A");
    let font = FontRef::new(&out).unwrap();
    assert!(font.table_data(Tag::new(b"GSUB")).is_none());
    assert!(font.table_data(Tag::new(b"DSIG")).is_none());
    assert_eq!(font.table_data(Tag::new(b"cvt ")).unwrap().as_bytes(), &[0, 1, 0, 2]);
    for tag in [b"cmap", b"glyf", b"loca", b"name", b"head"] {
        assert!(font.table_data(Tag::new(tag)).is_some());
    }

    let keep_all = Subsetter::new()
        .include_ascii_printable(false)
        .with_removal_policy(RemovalPolicy::empty())
        .subset(&font_data, "A")
        .unwrap()
        .remove(0);
    let font = FontRef::new(&keep_all).unwrap();
    assert!(font.table_data(Tag::new(b"GSUB")).is_some());
}

#[test]
fn test_checksum_adjustment() {
    let out = subset(&standard_font(), "AB");
    let mut sum = 0u32;
    for chunk in out.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    assert_eq!(sum, 0xB1B0_AFBA);
}

// ============================================================================
// Naming
// ============================================================================

#[test]
fn test_family_names_are_suffixed() {
    let out = subset_fonts(&standard_font(), "A", Some("a b"), false).unwrap().remove(0);
    let font = FontRef::new(&out).unwrap();

    assert_eq!(names(&font, 1), vec!["Test Sans+a%20b"; 2]);
    assert_eq!(names(&font, 16), vec!["Test Sans+a%20b"]);
    assert_eq!(names(&font, 2), vec!["Regular"]);
    assert_eq!(names(&font, 4), vec!["Test Sans Regular"]);
    assert_eq!(subset_family_name("Test Sans", Some("a b")), "Test Sans+a%20b");
}

#[test]
fn test_default_suffix() {
    let out = subset_fonts(&standard_font(), "A", None, false).unwrap().remove(0);
    let font = FontRef::new(&out).unwrap();
    assert_eq!(names(&font, 16), vec!["Test Sans+subset"]);
}

// ============================================================================
// Whole-call behavior
// ============================================================================

#[test]
fn test_deterministic_output() {
    let font_data = standard_font();
    let first = subset_fonts(&font_data, "ABC\u{C1}", Some("x"), true).unwrap();
    let second = subset_fonts(&font_data, "ABC\u{C1}", Some("x"), true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_subset_is_smaller() {
    let font_data = standard_font();
    let out = subset(&font_data, "A");
    assert!(out.len() < font_data.len());
}

#[test]
fn test_collection_yields_one_font_per_member() {
    let first = standard_font();
    let second = make_font(&[simple(0), simple(7)], &[('A', 1)], "Other Sans");
    let third = make_font(&[simple(0), simple(4)], &[('Q', 1)], "Third Sans");
    let collection = make_collection(&[first, second, third]);

    let outputs = subset_fonts(&collection, "A", Some("c"), false).unwrap();
    assert_eq!(outputs.len(), 3);

    let families: Vec<Vec<String>> = outputs
        .iter()
        .map(|out| names(&FontRef::new(out).expect("member parses"), 16))
        .collect();
    assert_eq!(
        families,
        vec![vec!["Test Sans+c"], vec!["Other Sans+c"], vec!["Third Sans+c"]]
    );
    assert_eq!(num_glyphs(&FontRef::new(&outputs[1]).unwrap()), 2);
    assert_eq!(num_glyphs(&FontRef::new(&outputs[2]).unwrap()), 1);
}

#[test]
fn test_missing_name_table_is_rejected() {
    let font_data = font_builder(&standard_glyphs(), STANDARD_MAPPINGS).build();
    let err = subset_fonts(&font_data, "A", None, false).unwrap_err();
    assert!(matches!(
        err,
        SubsetError::Parse(ParseError::MissingTable(tag)) if tag == Tag::new(b"name")
    ));
}

#[test]
fn test_font_without_usable_cmap() {
    let source_data = standard_font();
    let source = FontRef::new(&source_data).unwrap();
    let mut builder = FontBuilder::new();
    for record in source.table_directory.table_records() {
        let tag = record.tag();
        if tag != Tag::new(b"cmap") {
            builder.add_raw(tag, source.table_data(tag).unwrap().as_bytes());
        }
    }
    builder.add_raw(Tag::new(b"cmap"), vec![0u8; 4]);
    let font_data = builder.build();

    let err = subset_fonts(&font_data, "A", None, false).unwrap_err();
    assert!(matches!(err, SubsetError::NoUsableCMap));
}

#[test]
fn test_garbage_is_a_parse_error() {
    let err = subset_fonts(b"definitely not a font", "A", None, true).unwrap_err();
    assert!(matches!(err, SubsetError::Parse(_)));
}
