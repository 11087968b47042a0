use serde::{Deserialize, Serialize};

/// Kind of one agent-execution event shown in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Goal,
    Thinking,
    Task,
    Action,
    System,
}

/// Core immutable transcript message.
///
/// The surface never mutates or reorders messages; `value` is the raw
/// caller-supplied text and `info` optionally replaces the default action
/// label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub kind: MessageKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl TranscriptMessage {
    /// Creates a message without an action label override.
    pub fn new(kind: MessageKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            info: None,
        }
    }

    /// Attaches an action label override.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Creates a system-style informational message.
    pub fn system(value: impl Into<String>) -> Self {
        Self::new(MessageKind::System, value)
    }

    /// True when `value` renders through the markdown pipeline.
    ///
    /// Every other kind renders as literal text, so arbitrary markup in
    /// caller-supplied values cannot be interpreted.
    pub fn renders_markdown(&self) -> bool {
        matches!(self.kind, MessageKind::Action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_serialize_lowercase() {
        let message = TranscriptMessage::new(MessageKind::Goal, "ship it");

        let json = serde_json::to_string(&message).expect("serialize message");

        assert_eq!(json, r#"{"kind":"goal","value":"ship it"}"#);
    }

    #[test]
    fn info_round_trips_when_present() {
        let message =
            TranscriptMessage::new(MessageKind::Action, "running tests").with_info("test suite");

        let json = serde_json::to_string(&message).expect("serialize message");
        let parsed: TranscriptMessage = serde_json::from_str(&json).expect("parse message");

        assert_eq!(parsed, message);
        assert_eq!(parsed.info.as_deref(), Some("test suite"));
    }

    #[test]
    fn only_action_messages_render_markdown() {
        let markup = "**bold** and `code`";

        for kind in [
            MessageKind::Goal,
            MessageKind::Thinking,
            MessageKind::Task,
            MessageKind::System,
        ] {
            assert!(!TranscriptMessage::new(kind, markup).renders_markdown());
        }

        assert!(TranscriptMessage::new(MessageKind::Action, markup).renders_markdown());
    }
}
