use crate::transcript::message::{MessageKind, TranscriptMessage};

/// Display icon attached to a message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIcon {
    Star,
    List,
    Brain,
    Play,
}

/// Icon and prefix resolved for one message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub icon: Option<MessageIcon>,
    pub prefix: Option<&'static str>,
}

/// Fixed caution shown next to the thinking prefix.
pub const THINKING_CAUTION: &str = "(restart the agent if this takes more than 30 seconds)";

/// Resolves the display entry for a message kind.
///
/// Exhaustive on purpose: a new kind must extend this table before it can
/// render at all.
pub fn entry(kind: MessageKind) -> CatalogEntry {
    match kind {
        MessageKind::Goal => CatalogEntry {
            icon: Some(MessageIcon::Star),
            prefix: Some("new goal started"),
        },
        MessageKind::Task => CatalogEntry {
            icon: Some(MessageIcon::List),
            prefix: Some("task added"),
        },
        MessageKind::Thinking => CatalogEntry {
            icon: Some(MessageIcon::Brain),
            prefix: Some("thinking…"),
        },
        MessageKind::Action => CatalogEntry {
            icon: Some(MessageIcon::Play),
            prefix: Some("executing"),
        },
        MessageKind::System => CatalogEntry {
            icon: None,
            prefix: None,
        },
    }
}

/// Resolves the prefix label for one concrete message.
///
/// Action messages may override the default label through `info`; a blank
/// override falls back to the table entry.
pub fn display_prefix(message: &TranscriptMessage) -> Option<String> {
    if message.kind == MessageKind::Action
        && let Some(info) = &message.info
        && !info.trim().is_empty()
    {
        return Some(info.clone());
    }

    entry(message.kind).prefix.map(str::to_string)
}
