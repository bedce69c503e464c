//! Per-row filtering and validation.
//!
//! Every row ends in exactly one [`RowOutcome`]. Run-wide state (the id set
//! and the counters) lives in a [`RunState`] owned by the caller and passed
//! through each step.

use std::path::Path;

use serde::Serialize;

use crate::ids::{IdAssigner, derive_utt_id};
use crate::paths::PathNormalizer;

/// How many constructed paths are kept for the failure report.
pub const MAX_SAMPLES: usize = 5;

/// Existence check for constructed audio paths.
pub trait AudioProbe {
    /// True only for an existing regular file. I/O errors count as missing.
    fn is_file(&self, path: &str) -> bool;
}

/// Checks the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskProbe;

impl AudioProbe for DiskProbe {
    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSample {
    pub path: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub total_rows: usize,
    pub kept: usize,
    pub skipped_missing_audio_field: usize,
    pub skipped_missing_text_field: usize,
    pub skipped_empty_id: usize,
    pub missing_on_disk: usize,
    pub samples: Vec<PathSample>,
}

/// One line's worth of output in each of the three indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRecord {
    pub utt_id: String,
    pub audio_path: String,
    pub transcript: String,
}

/// Raw field values of one input row for the resolved columns.
#[derive(Debug, Clone, Copy)]
pub struct RowFields<'a> {
    pub audio: &'a str,
    pub text: &'a str,
    pub id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Kept(UtteranceRecord),
    /// Audio and/or text field empty after trimming.
    SkippedEmptyFields { audio: bool, text: bool },
    SkippedEmptyId { path: String },
    SkippedMissingFile { utt_id: String, path: String },
}

#[derive(Debug, Default)]
pub struct RunState {
    pub ids: IdAssigner,
    pub diagnostics: Diagnostics,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Run one row through the pipeline, updating `state`.
pub fn process_row(
    fields: RowFields<'_>,
    normalizer: &PathNormalizer,
    probe: &dyn AudioProbe,
    state: &mut RunState,
) -> RowOutcome {
    let diag = &mut state.diagnostics;
    diag.total_rows += 1;

    let raw_audio = fields.audio.trim();
    let text = fields.text.trim();
    if raw_audio.is_empty() || text.is_empty() {
        let (audio, text) = (raw_audio.is_empty(), text.is_empty());
        if audio {
            diag.skipped_missing_audio_field += 1;
        }
        if text {
            diag.skipped_missing_text_field += 1;
        }
        return RowOutcome::SkippedEmptyFields { audio, text };
    }

    let path = normalizer.normalize(raw_audio);
    let exists = probe.is_file(&path);
    if diag.samples.len() < MAX_SAMPLES {
        diag.samples.push(PathSample {
            path: path.clone(),
            exists,
        });
    }

    let candidate = derive_utt_id(fields.id, &path);
    if candidate.is_empty() {
        diag.skipped_empty_id += 1;
        return RowOutcome::SkippedEmptyId { path };
    }
    let utt_id = state.ids.assign(candidate);

    if !exists {
        diag.missing_on_disk += 1;
        return RowOutcome::SkippedMissingFile { utt_id, path };
    }

    diag.kept += 1;
    RowOutcome::Kept(UtteranceRecord {
        utt_id,
        audio_path: path,
        transcript: text.to_string(),
    })
}
