//! Header column resolution: explicit overrides first, name heuristics otherwise.

use serde::Serialize;

use crate::error::{PrepError, Result};

/// Audio column names, in priority order.
pub const AUDIO_CANDIDATES: &[&str] =
    &["path", "audio", "wav", "wav_path", "audio_path", "file", "filename"];

/// Transcript column names, in priority order.
pub const TEXT_CANDIDATES: &[&str] = &["text", "transcript", "transcription", "sentence", "label"];

/// Utterance id column names, in priority order.
pub const ID_CANDIDATES: &[&str] = &["id", "utt_id", "uttid", "utt", "uid"];

/// Column names supplied on the command line. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct ColumnOverrides {
    pub audio: Option<String>,
    pub text: Option<String>,
    pub id: Option<String>,
}

/// Resolved columns, as header names and their positions in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSelection {
    pub audio: String,
    pub text: String,
    pub id: Option<String>,
    #[serde(skip)]
    pub audio_index: usize,
    #[serde(skip)]
    pub text_index: usize,
    #[serde(skip)]
    pub id_index: Option<usize>,
}

fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// First header column whose lowercased name matches a candidate, trying
/// candidates in list order.
pub fn detect(header: &[String], candidates: &[&str]) -> Option<String> {
    let lower: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
    candidates.iter().find_map(|cand| {
        lower
            .iter()
            .position(|h| h == cand)
            .map(|i| header[i].clone())
    })
}

fn index_of(header: &[String], column: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| PrepError::ColumnNotFound {
            column: column.to_string(),
            header: header.to_vec(),
        })
}

pub fn resolve_columns(header: &[String], overrides: &ColumnOverrides) -> Result<ColumnSelection> {
    if header.is_empty() {
        return Err(PrepError::NoHeader);
    }

    let mut audio = provided(&overrides.audio).map(str::to_string);
    let mut text = provided(&overrides.text).map(str::to_string);
    let mut id = provided(&overrides.id).map(str::to_string);

    if audio.is_none() || text.is_none() {
        let detected_audio = detect(header, AUDIO_CANDIDATES);
        let detected_text = detect(header, TEXT_CANDIDATES);
        let detected_id = detect(header, ID_CANDIDATES);
        log::debug!(
            "heuristic columns: audio={detected_audio:?} text={detected_text:?} id={detected_id:?}"
        );
        audio = audio.or(detected_audio);
        text = text.or(detected_text);
        id = id.or(detected_id);
    }

    let (Some(audio), Some(text)) = (audio, text) else {
        return Err(PrepError::ColumnDetection {
            header: header.to_vec(),
        });
    };

    let audio_index = index_of(header, &audio)?;
    let text_index = index_of(header, &text)?;
    let id_index = id.as_deref().map(|c| index_of(header, c)).transpose()?;

    Ok(ColumnSelection {
        audio,
        text,
        id,
        audio_index,
        text_index,
        id_index,
    })
}
