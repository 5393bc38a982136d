use crate::error::ExportError;
use crate::types::{Interval, Utterance};

/// Segment-level and word-level intervals of one utterance, in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tiers {
    pub segments: Vec<Interval>,
    pub words: Vec<Interval>,
}

impl Tiers {
    /// Latest boundary across both tiers, or 0.0 when both are empty.
    pub fn end_time(&self) -> f64 {
        self.segments
            .iter()
            .chain(self.words.iter())
            .map(|interval| interval.end)
            .fold(0.0, f64::max)
    }
}

/// Flattens the segment/word tree. Tokens are skipped at both levels; a
/// segment spans from its first word's start to its last word's end.
///
/// Each tier is then made strictly increasing: a start that overlaps the
/// previous interval is moved up to its end, and intervals left with no
/// duration are dropped. Well-formed alignments keep their exact boundaries.
pub fn build_tiers(utterance: &Utterance) -> Result<Tiers, ExportError> {
    let mut tiers = Tiers::default();

    for (segment_index, segment) in utterance.segments().enumerate() {
        let words = segment.words().collect::<Vec<_>>();
        let (first, last) = match (words.first(), words.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ExportError::SegmentWithoutWords {
                    utt_id: utterance.utt_id.clone(),
                    segment_index,
                    text: segment.text.clone(),
                })
            }
        };

        tiers
            .segments
            .push(Interval::new(first.t_start, last.t_end, segment.text.as_str()));
        tiers.words.extend(
            words
                .iter()
                .map(|word| Interval::new(word.t_start, word.t_end, word.text.as_str())),
        );
    }

    tiers.segments = make_monotonic(&utterance.utt_id, "segments", tiers.segments);
    tiers.words = make_monotonic(&utterance.utt_id, "words", tiers.words);
    Ok(tiers)
}

fn make_monotonic(utt_id: &str, tier: &str, intervals: Vec<Interval>) -> Vec<Interval> {
    let mut kept = Vec::with_capacity(intervals.len());
    let mut last_end = 0.0f64;

    for mut interval in intervals {
        if interval.start < last_end {
            tracing::warn!(
                utt_id,
                tier,
                label = %interval.label,
                start = interval.start,
                clamped_to = last_end,
                "interval overlaps its predecessor, clamping start"
            );
            interval.start = last_end;
        }
        // Also rejects NaN boundaries.
        if !(interval.end > interval.start) {
            tracing::warn!(
                utt_id,
                tier,
                label = %interval.label,
                start = interval.start,
                end = interval.end,
                "dropping interval with no duration"
            );
            continue;
        }
        last_end = interval.end;
        kept.push(interval);
    }

    kept
}

/// Inserts blank-labeled intervals so the tier covers `[0, xmax]` without gaps.
///
/// Expects the strictly increasing intervals produced by [`build_tiers`];
/// labeled intervals are copied with their exact boundaries.
pub fn fill_gaps(intervals: &[Interval], xmax: f64) -> Vec<Interval> {
    let mut filled = Vec::with_capacity(intervals.len() * 2 + 1);
    let mut cursor = 0.0f64;

    for interval in intervals {
        if interval.start > cursor {
            filled.push(Interval::new(cursor, interval.start, ""));
        }
        filled.push(interval.clone());
        cursor = cursor.max(interval.end);
    }
    if xmax > cursor {
        filled.push(Interval::new(cursor, xmax, ""));
    }

    filled
}
