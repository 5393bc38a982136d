pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod manifest;
pub mod types;

pub use audio::audio_duration_secs;
pub use config::{TextGridFormat, TgtFileConfig};
pub use error::ExportError;
pub use export::{
    build_tiers, export_utterance, make_tgt_file, output_path, Tiers, WORDS_LEVEL_TGT_FILEPATH,
};
pub use manifest::{load_utterances, write_utterances};
pub use types::{
    Interval, SavedOutputFile, Segment, SegmentOrToken, Token, Utterance, Word, WordOrToken,
};
