use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};

use crate::transcript::message::TranscriptMessage;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TranscriptFileError {
    #[snafu(display("failed to read transcript file at {path:?} on `{stage}`: {source}"))]
    ReadTranscriptFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to parse transcript JSON from {path:?} on `{stage}`: {source}"))]
    ParseTranscriptJson {
        stage: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads an ordered transcript from a JSON array of messages.
///
/// This is caller-side plumbing: the surface itself never produces or
/// persists messages.
pub fn load_transcript(path: &Path) -> Result<Vec<TranscriptMessage>, TranscriptFileError> {
    let content = std::fs::read_to_string(path).context(ReadTranscriptFileSnafu {
        stage: "read-transcript-file",
        path: path.to_path_buf(),
    })?;

    serde_json::from_str(&content).context(ParseTranscriptJsonSnafu {
        stage: "parse-transcript-json",
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::message::MessageKind;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("taskline-loader-{name}-{}", std::process::id()));
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    #[test]
    fn loads_an_ordered_message_sequence() {
        let path = temp_file(
            "valid",
            r#"[
                {"kind": "goal", "value": "summarize the repo"},
                {"kind": "action", "value": "reading files", "info": "scanning"}
            ]"#,
        );

        let messages = load_transcript(&path).expect("load fixture transcript");
        std::fs::remove_file(&path).ok();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].kind, MessageKind::Goal);
        assert_eq!(messages[1].info.as_deref(), Some("scanning"));
    }

    #[test]
    fn missing_files_produce_a_read_error() {
        let path = std::env::temp_dir().join("taskline-loader-definitely-missing.json");

        let error = load_transcript(&path).expect_err("missing file must fail");

        assert!(matches!(
            error,
            TranscriptFileError::ReadTranscriptFile { .. }
        ));
    }

    #[test]
    fn malformed_json_produces_a_parse_error() {
        let path = temp_file("malformed", "{ not json ]");

        let error = load_transcript(&path).expect_err("malformed file must fail");
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            error,
            TranscriptFileError::ParseTranscriptJson { .. }
        ));
    }
}
