use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One aligned utterance as handed over by the alignment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub utt_id: String,
    pub audio_filepath: PathBuf,
    #[serde(default)]
    pub segments_and_tokens: Vec<SegmentOrToken>,
    /// Output kind -> written file path.
    #[serde(default)]
    pub saved_output_files: BTreeMap<String, PathBuf>,
}

impl Utterance {
    pub fn new(utt_id: impl Into<String>, audio_filepath: impl Into<PathBuf>) -> Self {
        Self {
            utt_id: utt_id.into(),
            audio_filepath: audio_filepath.into(),
            segments_and_tokens: Vec::new(),
            saved_output_files: BTreeMap::new(),
        }
    }

    pub fn record_output(&mut self, output: SavedOutputFile) {
        self.saved_output_files.insert(output.key, output.path);
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments_and_tokens.iter().filter_map(|entry| match entry {
            SegmentOrToken::Segment(segment) => Some(segment),
            SegmentOrToken::Token(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SegmentOrToken {
    Segment(Segment),
    Token(Token),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    #[serde(default)]
    pub words_and_tokens: Vec<WordOrToken>,
}

impl Segment {
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words_and_tokens.iter().filter_map(|entry| match entry {
            WordOrToken::Word(word) => Some(word),
            WordOrToken::Token(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WordOrToken {
    Word(Word),
    Token(Token),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    /// Seconds from the start of the audio.
    pub t_start: f64,
    /// Seconds from the start of the audio.
    pub t_end: f64,
}

/// Silence, filler or any other non-word element. Never exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_end: Option<f64>,
}

/// A `(start, end, label)` triple in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

impl Interval {
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// Result record of one export, merged into [`Utterance::saved_output_files`]
/// by [`Utterance::record_output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedOutputFile {
    pub key: String,
    pub path: PathBuf,
}
