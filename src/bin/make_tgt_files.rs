use std::path::PathBuf;

use alignment_textgrid::{load_utterances, make_tgt_file, write_utterances, TgtFileConfig};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "make_tgt_files")]
#[command(about = "Write segment- and word-level TextGrid files from aligned utterances")]
struct Args {
    /// JSON-lines manifest of aligned utterances.
    #[arg(long, env = "TGT_EXPORT_MANIFEST")]
    manifest: PathBuf,
    /// Root directory; files land in <output-dir>/tgt/segments_and_words/.
    #[arg(long, env = "TGT_EXPORT_OUTPUT_DIR")]
    output_dir: PathBuf,
    /// Optional JSON export config.
    #[arg(long, env = "TGT_EXPORT_CONFIG")]
    config: Option<PathBuf>,
    /// Skip utterances that fail instead of aborting the run.
    #[arg(long, env = "TGT_EXPORT_KEEP_GOING", default_value_t = false)]
    keep_going: bool,
    /// Write the utterances, with their saved output paths, to this JSON-lines file.
    #[arg(long, env = "TGT_EXPORT_SAVED_MANIFEST")]
    saved_manifest: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let config = match args.config.as_ref() {
        Some(path) => TgtFileConfig::load(path).map_err(|err| err.to_string())?,
        None => TgtFileConfig::default(),
    };
    let utterances = load_utterances(&args.manifest).map_err(|err| err.to_string())?;
    if utterances.is_empty() {
        return Err(format!(
            "No utterances found in manifest '{}'.",
            args.manifest.display()
        ));
    }

    let progress = ProgressBar::new(utterances.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );

    let mut exported = Vec::with_capacity(utterances.len());
    let (mut written, mut skipped, mut failed) = (0usize, 0usize, 0usize);
    for mut utterance in utterances {
        progress.set_message(utterance.utt_id.clone());
        match make_tgt_file(&utterance, &args.output_dir, &config) {
            Ok(Some(saved)) => {
                utterance.record_output(saved);
                written += 1;
            }
            Ok(None) => skipped += 1,
            Err(err) if args.keep_going => {
                tracing::warn!(utt_id = %utterance.utt_id, error = %err, "skipping utterance");
                failed += 1;
            }
            Err(err) => {
                progress.abandon();
                return Err(format!("{}: {err}", utterance.utt_id));
            }
        }
        exported.push(utterance);
        progress.inc(1);
    }
    progress.finish_with_message("done");

    if let Some(path) = args.saved_manifest.as_ref() {
        write_utterances(path, &exported).map_err(|err| err.to_string())?;
    }

    println!(
        "Wrote {written} TextGrid file(s) under '{}' ({skipped} skipped as empty, {failed} failed).",
        args.output_dir.display()
    );
    Ok(())
}
