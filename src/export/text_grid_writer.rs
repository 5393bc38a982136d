use std::path::Path;

use textgrid::{Interval as TgInterval, TextGrid, Tier, TierType};

use crate::config::TextGridFormat;
use crate::error::ExportError;
use crate::export::intervals::{fill_gaps, Tiers};
use crate::types::Interval;

pub const SEGMENTS_TIER: &str = "segments";
pub const WORDS_TIER: &str = "words";

/// Writes the `segments` and `words` tiers, in that order, each padded with
/// blank intervals from 0 to `xmax`.
pub(crate) fn write_textgrid(
    out_path: &Path,
    tiers: &Tiers,
    xmax: f64,
    format: TextGridFormat,
) -> Result<(), ExportError> {
    let mut textgrid = TextGrid::new(0.0, xmax).map_err(|err| {
        ExportError::textgrid("failed to build TextGrid structure", out_path, err)
    })?;

    textgrid
        .add_tier(interval_tier(SEGMENTS_TIER, &tiers.segments, xmax))
        .map_err(|err| ExportError::textgrid("failed to add segments tier", out_path, err))?;
    textgrid
        .add_tier(interval_tier(WORDS_TIER, &tiers.words, xmax))
        .map_err(|err| ExportError::textgrid("failed to add words tier", out_path, err))?;

    let short = matches!(format, TextGridFormat::Short);
    textgrid
        .to_file(out_path, short)
        .map_err(|err| ExportError::textgrid("failed to write TextGrid", out_path, err))
}

fn interval_tier(name: &str, intervals: &[Interval], xmax: f64) -> Tier {
    Tier {
        name: name.to_string(),
        tier_type: TierType::IntervalTier,
        xmin: 0.0,
        xmax,
        intervals: fill_gaps(intervals, xmax)
            .into_iter()
            .map(|interval| TgInterval {
                xmin: interval.start,
                xmax: interval.end,
                text: interval.label,
            })
            .collect(),
        points: Vec::new(),
    }
}
