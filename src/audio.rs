use std::path::Path;

use claxon::FlacReader;

use crate::error::ExportError;

/// Total duration of an audio file in seconds (frame count / sample rate).
///
/// Only the header is consulted, except for FLAC streams that do not declare
/// their length, which are decoded to count samples.
pub fn audio_duration_secs(path: &Path) -> Result<f64, ExportError> {
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);

    let (frames, sample_rate_hz) = match extension.as_deref() {
        Some("flac") => flac_frames(path)?,
        Some("wav") => wav_frames(path)?,
        _ => {
            return Err(ExportError::audio(
                path,
                "unsupported audio format (expected .flac or .wav)",
            ))
        }
    };

    if sample_rate_hz == 0 {
        return Err(ExportError::audio(path, "sample rate is zero"));
    }
    Ok(frames as f64 / sample_rate_hz as f64)
}

fn flac_frames(path: &Path) -> Result<(u64, u32), ExportError> {
    let mut reader = FlacReader::open(path).map_err(|err| ExportError::audio(path, err))?;
    let streaminfo = reader.streaminfo();
    let sample_rate_hz = streaminfo.sample_rate;

    if let Some(frames) = streaminfo.samples {
        return Ok((frames, sample_rate_hz));
    }

    let channels = streaminfo.channels as u64;
    if channels == 0 {
        return Err(ExportError::audio(path, "FLAC has zero channels"));
    }
    let mut sample_count = 0u64;
    for sample in reader.samples() {
        sample.map_err(|err| ExportError::audio(path, err))?;
        sample_count += 1;
    }
    Ok((sample_count / channels, sample_rate_hz))
}

fn wav_frames(path: &Path) -> Result<(u64, u32), ExportError> {
    let reader = hound::WavReader::open(path).map_err(|err| ExportError::audio(path, err))?;
    Ok((u64::from(reader.duration()), reader.spec().sample_rate))
}
