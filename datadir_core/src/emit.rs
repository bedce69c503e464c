use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::error::Result;
use crate::pipeline::UtteranceRecord;

pub const WAV_SCP: &str = "wav.scp";
pub const TEXT: &str = "text";
pub const UTT2SPK: &str = "utt2spk";

fn write_lines<I>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `wav.scp`, `text` and `utt2spk` into `data_dir`, replacing any
/// previous contents. Line `n` of each file belongs to `records[n]`.
pub fn write_data_dir(data_dir: &Path, records: &[UtteranceRecord]) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    write_lines(
        &data_dir.join(WAV_SCP),
        records.iter().map(|r| format!("{} {}", r.utt_id, r.audio_path)),
    )?;
    // text allows spaces after the id
    write_lines(
        &data_dir.join(TEXT),
        records.iter().map(|r| format!("{} {}", r.utt_id, r.transcript)),
    )?;
    // one speaker per utterance
    write_lines(
        &data_dir.join(UTT2SPK),
        records.iter().map(|r| format!("{} {}", r.utt_id, r.utt_id)),
    )?;

    log::debug!("wrote {} lines per index to {}", records.len(), data_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, path: &str, text: &str) -> UtteranceRecord {
        UtteranceRecord {
            utt_id: id.into(),
            audio_path: path.into(),
            transcript: text.into(),
        }
    }

    #[test]
    fn test_writes_parallel_indices() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data/train");
        let records = vec![
            record("b", "/w/b.wav", "second one"),
            record("a", "/w/a.wav", "first"),
        ];
        write_data_dir(&out, &records).unwrap();

        let read = |name: &str| std::fs::read_to_string(out.join(name)).unwrap();
        assert_eq!(read(WAV_SCP), "b /w/b.wav\na /w/a.wav\n");
        assert_eq!(read(TEXT), "b second one\na first\n");
        assert_eq!(read(UTT2SPK), "b b\na a\n");
    }

    #[test]
    fn test_rewrite_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![record("x", "/w/x.wav", "hi")];
        let stale = [record("old", "/o.wav", "stale"), record("old2", "/p.wav", "s")];
        write_data_dir(dir.path(), &stale).unwrap();
        write_data_dir(dir.path(), &records).unwrap();
        write_data_dir(dir.path(), &records).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join(WAV_SCP)).unwrap(),
            "x /w/x.wav\n"
        );
    }
}
