//! Audio path normalization: prefix rewrites, leading directory stripping and
//! resolution to an absolute path.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::error::PrepError;

/// Leading path rewrite given as `OLD=NEW`.
///
/// Both sides are stored with surrounding whitespace and slashes trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRule {
    pub old: String,
    pub new: String,
}

impl FromStr for PrefixRule {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (old, new) = s
            .split_once('=')
            .ok_or_else(|| PrepError::InvalidPrefixRule(s.to_string()))?;
        let trim = |part: &str| {
            part.trim()
                .trim_matches(|c: char| c == '/' || c == ' ')
                .to_string()
        };
        let (old, new) = (trim(old), trim(new));
        if old.is_empty() {
            return Err(PrepError::EmptyPrefixOld(s.to_string()));
        }
        Ok(PrefixRule { old, new })
    }
}

impl PrefixRule {
    /// Rewrite `value` if it is this rule's prefix or starts with `prefix/`.
    fn apply(&self, value: &str) -> Option<String> {
        let (lead, body) = match value.strip_prefix('/') {
            Some(rest) => ("/", rest),
            None => ("", value),
        };
        let rest = if body == self.old {
            ""
        } else {
            body.strip_prefix(self.old.as_str())?.strip_prefix('/')?
        };
        let joined = [self.new.as_str(), rest]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Some(format!("{lead}{joined}"))
    }
}

/// Apply the first matching rule; unmatched values pass through unchanged.
pub fn rewrite_prefix(value: &str, rules: &[PrefixRule]) -> String {
    rules
        .iter()
        .find_map(|rule| rule.apply(value))
        .unwrap_or_else(|| value.to_string())
}

/// Drop the first `levels` leading components. Removing everything keeps the
/// basename. Values without a `/` are returned untouched.
pub fn strip_leading_dirs(value: &str, levels: usize) -> String {
    if levels == 0 || !value.contains('/') {
        return value.to_string();
    }
    let parts: Vec<&str> = value.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() > levels {
        parts[levels..].join("/")
    } else {
        parts.last().copied().unwrap_or_default().to_string()
    }
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Canonicalize through the longest existing ancestor, then append the
/// remaining (non-existent) components.
pub fn resolve_best_effort(path: &Path) -> PathBuf {
    let normalized = normalize_lexically(path);
    let mut existing = normalized.as_path();
    let mut tail: Vec<&std::ffi::OsStr> = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            for part in tail.iter().rev() {
                resolved.push(part);
            }
            return resolved;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = parent;
            }
            _ => return normalized,
        }
    }
}

/// Turns raw audio field values into absolute paths.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    rules: Vec<PrefixRule>,
    strip_levels: usize,
    base: PathBuf,
}

impl PathNormalizer {
    /// `base` is the wav root when one was given, the working directory otherwise.
    pub fn new(rules: Vec<PrefixRule>, strip_levels: usize, base: PathBuf) -> Self {
        Self {
            rules,
            strip_levels,
            base,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Prefix rewrite, then directory stripping, then root resolution.
    pub fn normalize(&self, raw: &str) -> String {
        let rewritten = rewrite_prefix(raw, &self.rules);
        let stripped = strip_leading_dirs(&rewritten, self.strip_levels);
        let candidate = Path::new(&stripped);
        if candidate.is_absolute() {
            return stripped;
        }
        resolve_best_effort(&self.base.join(candidate))
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(s: &str) -> PrefixRule {
        s.parse().unwrap()
    }

    #[test]
    fn test_prefix_rule_parsing_trims_slashes_and_spaces() {
        let r = rule(" /data/old/ = /data/new/ ");
        assert_eq!(r.old, "data/old");
        assert_eq!(r.new, "data/new");
        let r = rule("a=b=c");
        assert_eq!((r.old.as_str(), r.new.as_str()), ("a", "b=c"));
    }

    #[test]
    fn test_prefix_rule_rejects_malformed() {
        assert!(matches!(
            "no-equals".parse::<PrefixRule>(),
            Err(PrepError::InvalidPrefixRule(_))
        ));
        assert!(matches!(
            " / =/new".parse::<PrefixRule>(),
            Err(PrepError::EmptyPrefixOld(_))
        ));
    }

    #[test]
    fn test_rewrite_first_match_wins() {
        let rules = vec![rule("clips=audio"), rule("clips/en=other")];
        assert_eq!(rewrite_prefix("clips/en/a.wav", &rules), "audio/en/a.wav");
        assert_eq!(rewrite_prefix("clips", &rules), "audio");
        assert_eq!(rewrite_prefix("clipsx/a.wav", &rules), "clipsx/a.wav");
    }

    #[test]
    fn test_rewrite_keeps_leading_slash() {
        let rules = vec![rule("/data/old=/data/new")];
        assert_eq!(
            rewrite_prefix("/data/old/sub/file.wav", &rules),
            "/data/new/sub/file.wav"
        );
        assert_eq!(rewrite_prefix("/data/old", &rules), "/data/new");
    }

    #[test]
    fn test_rewrite_to_empty_new() {
        let rules = vec![rule("corpus=")];
        assert_eq!(rewrite_prefix("corpus/a/b.wav", &rules), "a/b.wav");
    }

    #[test]
    fn test_strip_levels() {
        assert_eq!(strip_leading_dirs("/data/new/sub/file.wav", 1), "new/sub/file.wav");
        assert_eq!(strip_leading_dirs("a/b/c.wav", 2), "c.wav");
        assert_eq!(strip_leading_dirs("a/b/c.wav", 5), "c.wav");
        assert_eq!(strip_leading_dirs("c.wav", 3), "c.wav");
        assert_eq!(strip_leading_dirs("a/b/c.wav", 0), "a/b/c.wav");
    }

    #[test]
    fn test_normalize_rewrite_strip_and_join() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let n = PathNormalizer::new(vec![rule("/data/old=/data/new")], 1, root.clone());
        let out = n.normalize("/data/old/sub/file.wav");
        assert_eq!(PathBuf::from(out), root.join("new/sub/file.wav"));
    }

    #[test]
    fn test_normalize_absolute_passes_through() {
        let n = PathNormalizer::new(Vec::new(), 0, PathBuf::from("/unused"));
        assert_eq!(n.normalize("/x/../y/z.wav"), "/x/../y/z.wav");
    }

    #[test]
    fn test_normalize_resolves_dot_segments() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("wavs")).unwrap();
        let n = PathNormalizer::new(Vec::new(), 0, root.clone());
        let out = n.normalize("./wavs/../wavs/./a.wav");
        assert_eq!(PathBuf::from(out), root.join("wavs").join("a.wav"));
    }
}
