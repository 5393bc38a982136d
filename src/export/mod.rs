mod intervals;
mod text_grid_writer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::audio_duration_secs;
use crate::config::TgtFileConfig;
use crate::error::ExportError;
use crate::types::{SavedOutputFile, Utterance};

pub use intervals::{build_tiers, fill_gaps, Tiers};
pub use text_grid_writer::{SEGMENTS_TIER, WORDS_TIER};

/// Key under which the written TextGrid path is recorded on the utterance.
pub const WORDS_LEVEL_TGT_FILEPATH: &str = "words_level_tgt_filepath";

/// `<output_dir_root>/tgt/segments_and_words`
pub fn output_dir(output_dir_root: &Path) -> PathBuf {
    output_dir_root.join("tgt").join("segments_and_words")
}

/// `<output_dir_root>/tgt/segments_and_words/<utt_id>.TextGrid`
pub fn output_path(output_dir_root: &Path, utt_id: &str) -> PathBuf {
    output_dir(output_dir_root).join(format!("{utt_id}.TextGrid"))
}

/// Writes the segment/word TextGrid for one utterance without touching it.
///
/// Returns `Ok(None)` for an utterance with no alignment (empty reference
/// text, or more tokens than the audio could hold): nothing is read, created
/// or written in that case.
pub fn make_tgt_file(
    utterance: &Utterance,
    output_dir_root: &Path,
    config: &TgtFileConfig,
) -> Result<Option<SavedOutputFile>, ExportError> {
    if utterance.segments_and_tokens.is_empty() {
        tracing::debug!(
            utt_id = %utterance.utt_id,
            "empty alignment, skipping TextGrid export"
        );
        return Ok(None);
    }

    let audio_dur = audio_duration_secs(&utterance.audio_filepath)?;
    tracing::debug!(utt_id = %utterance.utt_id, audio_dur, "read audio duration");

    let tiers = build_tiers(utterance)?;
    let aligned_end = tiers.end_time();
    if audio_dur < aligned_end {
        tracing::warn!(
            utt_id = %utterance.utt_id,
            audio_dur,
            aligned_end,
            "alignment extends past the end of the audio"
        );
    }
    // With no labeled interval left, the grid spans the audio so each tier
    // still holds one blank interval.
    let xmax = if config.extend_to_audio_end || aligned_end <= 0.0 {
        aligned_end.max(audio_dur)
    } else {
        aligned_end
    };
    if !(xmax > 0.0) {
        return Err(ExportError::EmptyTimeline {
            utt_id: utterance.utt_id.clone(),
        });
    }

    let out_dir = output_dir(output_dir_root);
    fs::create_dir_all(&out_dir)
        .map_err(|e| ExportError::io("creating TextGrid output directory", &out_dir, e))?;
    let out_path = output_path(output_dir_root, &utterance.utt_id);
    text_grid_writer::write_textgrid(&out_path, &tiers, xmax, config.format)?;

    tracing::info!(
        utt_id = %utterance.utt_id,
        segments = tiers.segments.len(),
        words = tiers.words.len(),
        path = %out_path.display(),
        "wrote TextGrid"
    );

    Ok(Some(SavedOutputFile {
        key: WORDS_LEVEL_TGT_FILEPATH.to_string(),
        path: out_path,
    }))
}

/// [`make_tgt_file`] followed by recording the written path on the utterance.
pub fn export_utterance(
    mut utterance: Utterance,
    output_dir_root: &Path,
    config: &TgtFileConfig,
) -> Result<Utterance, ExportError> {
    if let Some(saved) = make_tgt_file(&utterance, output_dir_root, config)? {
        utterance.record_output(saved);
    }
    Ok(utterance)
}
