//! csv2datadir — build a wav.scp / text / utt2spk data directory from a CSV or TSV listing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use datadir_core::columns::ColumnOverrides;
use datadir_core::paths::PrefixRule;
use datadir_core::pipeline::DiskProbe;
use datadir_core::{Conversion, PrepConfig};

#[derive(Parser, Debug)]
#[command(
    name = "csv2datadir",
    about = "Prepare a speech-corpus data dir (wav.scp, text, utt2spk) from a CSV/TSV with header",
    version
)]
struct Args {
    /// Path to CSV/TSV with header
    #[arg(long)]
    csv: PathBuf,

    /// Output data dir (e.g. data/train)
    #[arg(long)]
    data_dir: PathBuf,

    /// Root directory containing audio files (default: current directory)
    #[arg(long)]
    wav_root: Option<PathBuf>,

    /// Delimiter: ',', '\t', 'tab', 'space', '|', 'pipe', ...
    #[arg(long, default_value = ",")]
    delimiter: String,

    /// Header name of the audio path column
    #[arg(long)]
    audio_column: Option<String>,

    /// Header name of the transcript column
    #[arg(long)]
    text_column: Option<String>,

    /// Header name of the utterance id column
    #[arg(long)]
    id_column: Option<String>,

    /// Rewrite a leading path prefix in the audio column, OLD=NEW (repeatable)
    #[arg(long = "prefix-map", alias = "prefix_map", value_name = "OLD=NEW")]
    prefix_map: Vec<PrefixRule>,

    /// Remove the first N leading directory components of the audio path
    /// (after prefix rewrites, before joining with the wav root)
    #[arg(long = "strip-dir-levels", alias = "strip_dir_levels", default_value_t = 0)]
    strip_dir_levels: usize,

    /// Also write the run diagnostics as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> PrepConfig {
        PrepConfig {
            csv: self.csv.clone(),
            data_dir: self.data_dir.clone(),
            wav_root: self.wav_root.clone().filter(|p| !p.as_os_str().is_empty()),
            delimiter: self.delimiter.clone(),
            columns: ColumnOverrides {
                audio: self.audio_column.clone(),
                text: self.text_column.clone(),
                id: self.id_column.clone(),
            },
            prefix_rules: self.prefix_map.clone(),
            strip_dir_levels: self.strip_dir_levels,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    // the outcome lines below are part of the CLI contract, so RUST_LOG may
    // not lower this binary's own target below info
    let own_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .filter_module(env!("CARGO_BIN_NAME"), own_level)
        .format_timestamp(None)
        .init();

    match run(&args) {
        Ok(conversion) if conversion.kept() == 0 => {
            log::error!("{}", conversion.failure_report());
            std::process::exit(1);
        }
        Ok(conversion) => {
            let missing = conversion.diagnostics.missing_on_disk;
            if missing > 0 {
                log::warn!(
                    "{missing} audio files listed in {} were not found on disk and were skipped",
                    args.csv.display()
                );
            }
            log::info!(
                "Wrote {} utterances to {}",
                conversion.kept(),
                conversion.data_dir.display()
            );
        }
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<Conversion> {
    let config = args.to_config();
    let conversion = datadir_core::run(&config, &DiskProbe)
        .with_context(|| format!("Failed to convert {}", config.csv.display()))?;

    if let Some(report) = &args.report {
        conversion
            .write_report(report)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
    }
    Ok(conversion)
}
