//! Table → data directory conversion driver.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::columns::{ColumnOverrides, ColumnSelection, resolve_columns};
use crate::delimiter::resolve_delimiter;
use crate::emit::write_data_dir;
use crate::error::Result;
use crate::paths::{PathNormalizer, PrefixRule, resolve_best_effort};
use crate::pipeline::{AudioProbe, Diagnostics, RowFields, RowOutcome, RunState, process_row};

#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub csv: PathBuf,
    pub data_dir: PathBuf,
    pub wav_root: Option<PathBuf>,
    /// Raw delimiter token, e.g. `tab` or `,`.
    pub delimiter: String,
    pub columns: ColumnOverrides,
    pub prefix_rules: Vec<PrefixRule>,
    pub strip_dir_levels: usize,
}

/// Result of a run that got past setup.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub columns: ColumnSelection,
    /// Resolved wav root, `None` when paths were resolved against the working
    /// directory (no root, or an empty one).
    pub wav_root: Option<PathBuf>,
    pub data_dir: PathBuf,
    /// Whether the three index files were written.
    pub written: bool,
    pub diagnostics: Diagnostics,
}

impl Conversion {
    pub fn kept(&self) -> usize {
        self.diagnostics.kept
    }

    /// Multi-line explanation printed when nothing was kept.
    pub fn failure_report(&self) -> String {
        let d = &self.diagnostics;
        let mut lines = vec![
            "No valid audio/text entries found. Check your columns and paths.".to_string(),
            "Diagnostics:".to_string(),
            format!("  Total rows read: {}", d.total_rows),
            format!(
                "  Skipped rows with empty audio field [{}]: {}",
                self.columns.audio, d.skipped_missing_audio_field
            ),
            format!(
                "  Skipped rows with empty text field [{}]: {}",
                self.columns.text, d.skipped_missing_text_field
            ),
            format!("  Rows with non-existent audio files after join: {}", d.missing_on_disk),
            match &self.wav_root {
                Some(root) => format!("  wav_root used: {}", root.display()),
                None => "  wav_root used: <none>".to_string(),
            },
        ];
        if d.samples.is_empty() {
            lines.push(
                "  No sample paths available (input may be empty after header).".to_string(),
            );
        } else {
            lines.push("  Sample constructed paths (exists?):".to_string());
            lines.extend(
                d.samples
                    .iter()
                    .map(|s| format!("    {} -> {}", s.path, s.exists)),
            );
        }
        lines.join("\n")
    }

    /// Write the run summary as pretty JSON.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Read the table, run every row through the pipeline and write the data
/// directory when at least one row survives.
///
/// Setup problems (delimiter, header, columns, unreadable input) are errors;
/// an empty result is not, the caller inspects [`Conversion::kept`].
pub fn run(config: &PrepConfig, probe: &dyn AudioProbe) -> Result<Conversion> {
    let delimiter = resolve_delimiter(&config.delimiter)?;

    let cwd = std::env::current_dir()?;
    let wav_root = config
        .wav_root
        .as_ref()
        .filter(|root| !root.as_os_str().is_empty())
        .map(|root| resolve_best_effort(&cwd.join(root)));
    let base = wav_root.clone().unwrap_or_else(|| cwd.clone());
    let normalizer =
        PathNormalizer::new(config.prefix_rules.clone(), config.strip_dir_levels, base);

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(&config.csv)?;

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let columns = resolve_columns(&header, &config.columns)?;
    log::debug!(
        "Using columns audio='{}' text='{}' id={}",
        columns.audio,
        columns.text,
        columns.id.as_deref().map_or("<stem>".to_string(), |c| format!("'{c}'"))
    );
    log::debug!("Resolving relative audio paths under {}", normalizer.base().display());

    let mut state = RunState::new();
    let mut records = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let fields = RowFields {
            audio: record.get(columns.audio_index).unwrap_or_default(),
            text: record.get(columns.text_index).unwrap_or_default(),
            id: columns.id_index.and_then(|i| record.get(i)),
        };
        let outcome = process_row(fields, &normalizer, probe, &mut state);
        let row = state.diagnostics.total_rows;
        match outcome {
            RowOutcome::Kept(utt) => records.push(utt),
            RowOutcome::SkippedEmptyFields { audio, text } => {
                log::debug!("row {row}: empty field (audio={audio}, text={text})");
            }
            RowOutcome::SkippedEmptyId { path } => {
                log::debug!("row {row}: empty utterance id for {path}");
            }
            RowOutcome::SkippedMissingFile { utt_id, path } => {
                log::debug!("row {row}: {utt_id}: audio not found at {path}");
            }
        }
    }

    let written = !records.is_empty();
    if written {
        write_data_dir(&config.data_dir, &records)?;
    }

    Ok(Conversion {
        columns,
        wav_root,
        data_dir: config.data_dir.clone(),
        written,
        diagnostics: state.diagnostics,
    })
}
