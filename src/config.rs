use std::path::Path;

use serde::Deserialize;

use crate::error::ExportError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextGridFormat {
    #[default]
    Long,
    Short,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TgtFileConfig {
    pub format: TextGridFormat,
    /// Extend the grid (and the trailing blank interval of each tier) to the
    /// end of the audio. Labeled intervals keep their aligned boundaries.
    pub extend_to_audio_end: bool,
}

impl TgtFileConfig {
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ExportError::io("reading export config", path, e))?;
        serde_json::from_str(&data).map_err(|e| ExportError::json("parsing export config", e))
    }
}
