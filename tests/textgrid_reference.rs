use std::fs;
use std::path::{Path, PathBuf};

use alignment_textgrid::{
    export_utterance, output_path, ExportError, TgtFileConfig, Utterance,
    WORDS_LEVEL_TGT_FILEPATH,
};
use hound::{SampleFormat, WavSpec, WavWriter};
use libtest_mimic::{Arguments, Failed, Trial};
use serde::Deserialize;
use textgrid::{TextGrid, TierType};

const SUITE_NAME: &str = "textgrid_export_matches_reference";
const SAMPLE_RATE_HZ: u32 = 16_000;
const DELTA_SECS: f64 = 1e-6;

#[derive(Debug, Deserialize)]
struct ReferenceCase {
    id: String,
    audio_duration_secs: f64,
    #[serde(default)]
    config: TgtFileConfig,
    utterance: Utterance,
    #[serde(default)]
    expected: Option<ExpectedTiers>,
    #[serde(default)]
    expected_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExpectedTiers {
    segments: Vec<(f64, f64, String)>,
    words: Vec<(f64, f64, String)>,
}

fn main() {
    let args = Arguments::from_args();
    let fixture_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join("utterances");

    let cases = match load_cases(&fixture_dir) {
        Ok(cases) if !cases.is_empty() => cases,
        Ok(_) => {
            run_setup_failure(
                &args,
                format!("No reference cases found under {}.", fixture_dir.display()),
            );
            return;
        }
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };

    let tests = cases
        .into_iter()
        .map(|case| {
            let test_name = format!("{SUITE_NAME}::{}", case.id);
            Trial::test(test_name, move || run_reference_case(case).map_err(Failed::from))
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn load_cases(dir: &Path) -> Result<Vec<ReferenceCase>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("failed to list fixtures '{}': {err}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("failed to read fixture entry: {err}"))?
            .path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let data = fs::read_to_string(path)
                .map_err(|err| format!("failed to read '{}': {err}", path.display()))?;
            serde_json::from_str(&data)
                .map_err(|err| format!("failed to parse '{}': {err}", path.display()))
        })
        .collect()
}

fn run_reference_case(case: ReferenceCase) -> Result<(), String> {
    let scratch = tempfile::tempdir().map_err(|err| format!("tempdir: {err}"))?;
    let audio_path = scratch.path().join(format!("{}.wav", case.utterance.utt_id));
    write_silent_wav(&audio_path, case.audio_duration_secs)?;
    let out_root = scratch.path().join("out");

    let mut utterance = case.utterance;
    utterance.audio_filepath = audio_path;
    let utt_id = utterance.utt_id.clone();
    let before = utterance.clone();

    let result = export_utterance(utterance, &out_root, &case.config);

    if let Some(expected_error) = case.expected_error.as_deref() {
        let err = match result {
            Err(err) => err,
            Ok(_) => return Err(format!("{}: expected error '{expected_error}'", case.id)),
        };
        let kind = match err {
            ExportError::SegmentWithoutWords { .. } => "segment_without_words",
            ExportError::EmptyTimeline { .. } => "empty_timeline",
            _ => "other",
        };
        if kind != expected_error {
            return Err(format!("{}: unexpected error kind: {err}", case.id));
        }
        if out_root.exists() {
            return Err(format!("{}: output written despite error {err}", case.id));
        }
        return Ok(());
    }

    let exported = result.map_err(|err| format!("{}: export failed: {err}", case.id))?;
    let Some(expected) = case.expected else {
        if exported != before || out_root.exists() {
            return Err(format!("{}: empty alignment must be a no-op", case.id));
        }
        return Ok(());
    };

    let expected_path = output_path(&out_root, &utt_id);
    if exported.saved_output_files.get(WORDS_LEVEL_TGT_FILEPATH) != Some(&expected_path) {
        return Err(format!(
            "{}: saved path mismatch: {:?}",
            case.id, exported.saved_output_files
        ));
    }

    let textgrid = TextGrid::from_file(&expected_path)
        .map_err(|err| format!("{}: failed to read back TextGrid: {err}", case.id))?;
    let names = textgrid
        .tiers
        .iter()
        .map(|tier| tier.name.as_str())
        .collect::<Vec<_>>();
    if names != ["segments", "words"] {
        return Err(format!("{}: unexpected tiers {names:?}", case.id));
    }

    for (tier, expected_intervals) in textgrid
        .tiers
        .iter()
        .zip([&expected.segments, &expected.words])
    {
        if tier.tier_type != TierType::IntervalTier {
            return Err(format!("{}: tier '{}' is not an IntervalTier", case.id, tier.name));
        }
        check_contiguous(&case.id, &tier.name, &tier.intervals)?;
        let observed = tier
            .intervals
            .iter()
            .filter(|interval| !interval.text.is_empty())
            .collect::<Vec<_>>();
        if observed.len() != expected_intervals.len() {
            return Err(format!(
                "{}: tier '{}' interval count mismatch (expected {}, got {})",
                case.id,
                tier.name,
                expected_intervals.len(),
                observed.len()
            ));
        }
        for (got, (start, end, label)) in observed.iter().zip(expected_intervals.iter()) {
            if got.text != *label
                || (got.xmin - start).abs() > DELTA_SECS
                || (got.xmax - end).abs() > DELTA_SECS
            {
                return Err(format!(
                    "{}: tier '{}' expected ({start}, {end}, {label:?}), got ({}, {}, {:?})",
                    case.id, tier.name, got.xmin, got.xmax, got.text
                ));
            }
        }
    }

    Ok(())
}

fn check_contiguous(
    case_id: &str,
    tier_name: &str,
    intervals: &[textgrid::Interval],
) -> Result<(), String> {
    let mut cursor = 0.0f64;
    for interval in intervals {
        if (interval.xmin - cursor).abs() > DELTA_SECS {
            return Err(format!(
                "{case_id}: tier '{tier_name}' has a gap at {cursor} (next interval starts at {})",
                interval.xmin
            ));
        }
        cursor = interval.xmax;
    }
    Ok(())
}

fn write_silent_wav(path: &Path, duration_secs: f64) -> Result<(), String> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE_HZ,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer =
        WavWriter::create(path, spec).map_err(|err| format!("create wav fixture: {err}"))?;
    let frames = (duration_secs * SAMPLE_RATE_HZ as f64).round() as usize;
    for _ in 0..frames {
        writer
            .write_sample(0i16)
            .map_err(|err| format!("write wav fixture: {err}"))?;
    }
    writer
        .finalize()
        .map_err(|err| format!("finalize wav fixture: {err}"))
}
