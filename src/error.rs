use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error while {context} '{}': {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read audio '{}': {message}", .path.display())]
    Audio { path: PathBuf, message: String },
    #[error("utterance '{utt_id}': segment #{segment_index} ('{text}') contains no words")]
    SegmentWithoutWords {
        utt_id: String,
        segment_index: usize,
        text: String,
    },
    #[error("utterance '{utt_id}': no aligned time span and zero-length audio")]
    EmptyTimeline { utt_id: String },
    #[error("{context} '{}': {message}", .path.display())]
    TextGrid {
        context: &'static str,
        path: PathBuf,
        message: String,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl ExportError {
    pub(crate) fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn audio(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Audio {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn textgrid(
        context: &'static str,
        path: impl Into<PathBuf>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::TextGrid {
            context,
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
