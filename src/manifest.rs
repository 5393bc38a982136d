use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::types::Utterance;

/// Reads aligned utterances from a JSON-lines manifest.
///
/// Blank lines are skipped. Relative `audio_filepath` values are resolved
/// against the manifest's directory.
pub fn load_utterances(path: &Path) -> Result<Vec<Utterance>, ExportError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ExportError::io("reading manifest", path, e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut utterances = Vec::new();
    for (line_idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut utterance: Utterance = serde_json::from_str(line).map_err(|e| {
            ExportError::invalid_input(format!(
                "{} line {}: {e}",
                path.display(),
                line_idx + 1
            ))
        })?;
        if utterance.utt_id.trim().is_empty() {
            return Err(ExportError::invalid_input(format!(
                "{} line {}: empty utt_id",
                path.display(),
                line_idx + 1
            )));
        }
        if utterance.audio_filepath.is_relative() {
            utterance.audio_filepath = base_dir.join(&utterance.audio_filepath);
        }
        utterances.push(utterance);
    }

    Ok(utterances)
}

/// Writes utterances back out as JSON lines, including `saved_output_files`.
pub fn write_utterances(path: &Path, utterances: &[Utterance]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ExportError::io("creating manifest output directory", parent, e))?;
    }

    let file = File::create(path).map_err(|e| ExportError::io("creating manifest", path, e))?;
    let mut writer = BufWriter::new(file);
    for utterance in utterances {
        serde_json::to_writer(&mut writer, utterance)
            .map_err(|e| ExportError::json("serializing utterance", e))?;
        writer
            .write_all(b"\n")
            .map_err(|e| ExportError::io("writing manifest", path, e))?;
    }
    writer
        .flush()
        .map_err(|e| ExportError::io("writing manifest", path, e))
}
