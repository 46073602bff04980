use read_fonts::tables::hmtx::Hmtx as SourceHmtx;
use write_fonts::tables::hmtx::{Hmtx, LongMetric};

use crate::{
    error::{ParseError, Result},
    rebuild::GlyphRenumbering,
    types::HMTX,
};

pub(crate) struct SubsetMetrics {
    pub(crate) hmtx: Hmtx,
    pub(crate) number_of_h_metrics: u16,
}

/// Rewrites `hmtx` for the subset, folding a trailing run of equal advances
/// into the short form.
pub(crate) fn subset_hmtx(
    source: &SourceHmtx<'_>,
    renumbering: &GlyphRenumbering,
) -> Result<SubsetMetrics> {
    let mut h_metrics = renumbering
        .source_glyphs()
        .iter()
        .map(|&gid| {
            let gid = read_fonts::types::GlyphId::from(gid);
            match (source.advance(gid), source.side_bearing(gid)) {
                (Some(advance), Some(side_bearing)) => Ok(LongMetric { advance, side_bearing }),
                _ => {
                    let offset = source.offset_data().len();
                    Err(ParseError::UnexpectedEof { tag: HMTX, offset }.into())
                }
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let mut number_of_h_metrics = h_metrics.len();
    while let Some([prev, current]) = h_metrics[..number_of_h_metrics].last_chunk::<2>() {
        if prev.advance != current.advance {
            break;
        }
        number_of_h_metrics -= 1;
    }

    let left_side_bearings = h_metrics
        .split_off(number_of_h_metrics)
        .into_iter()
        .map(|metric| metric.side_bearing)
        .collect();

    Ok(SubsetMetrics {
        hmtx: Hmtx { h_metrics, left_side_bearings },
        number_of_h_metrics: number_of_h_metrics as u16,
    })
}
