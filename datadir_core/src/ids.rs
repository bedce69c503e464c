use std::collections::HashSet;
use std::path::Path;

/// Candidate utterance id: the trimmed id field when non-empty, otherwise the
/// file stem of the normalized audio path. May be empty.
pub fn derive_utt_id(id_field: Option<&str>, audio_path: &str) -> String {
    if let Some(id) = id_field.map(str::trim).filter(|id| !id.is_empty()) {
        return id.to_string();
    }
    Path::new(audio_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Hands out run-unique utterance ids.
#[derive(Debug, Default)]
pub struct IdAssigner {
    seen: HashSet<String>,
}

impl IdAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `candidate`, appending `-1`, `-2`, ... on collision.
    pub fn assign(&mut self, candidate: String) -> String {
        let mut id = candidate.clone();
        let mut suffix = 0usize;
        while self.seen.contains(&id) {
            suffix += 1;
            id = format!("{candidate}-{suffix}");
        }
        self.seen.insert(id.clone());
        id
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
