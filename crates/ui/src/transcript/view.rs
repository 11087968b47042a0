use std::time::Duration;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme, Sizable,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};
use taskline_export::{DEFAULT_WRAP_COLUMNS, RegionContent, RegionParagraph, RegionRegistry};

use crate::transcript::catalog;
use crate::transcript::message::{MessageKind, TranscriptMessage};
use crate::transcript::message_item::MessageItem;
use crate::transcript::scroll_manager::ScrollManager;

/// Stable id of the scrollable transcript region.
///
/// Scroll tracking and both header export actions address the transcript
/// through this id.
pub const TRANSCRIPT_REGION_ID: &str = "transcript-message-list";

/// Reveal delays for the two empty-state hints and the sponsorship panel.
const EMPTY_STATE_REVEAL_DELAYS_MS: [u64; 3] = [350, 500, 650];

const EMPTY_STATE_HINTS: [&str; 2] = [
    "> Create an agent by adding a name and a goal, then hitting deploy!",
    "Provide your own API key in the settings tab to increase the limits!",
];

const SPONSOR_MESSAGE: &str =
    "Help support the development of this project. Consider sponsoring it on GitHub.";
const SPONSOR_URL: &str = "https://github.com/taskline/taskline";

/// Global registry of exportable rendered regions.
#[derive(Default)]
pub struct RegionStore(pub RegionRegistry);

impl Global for RegionStore {}

/// The transcript surface: an ordered list of message items that follows
/// new output until the user scrolls away.
pub struct TranscriptView {
    messages: Vec<TranscriptMessage>,
    items: Vec<Entity<MessageItem>>,
    empty_state_items: Vec<Entity<MessageItem>>,
    extra: Option<AnyView>,
    show_sponsorship: bool,
    scroll_manager: ScrollManager,
    empty_state_revealed: [bool; 3],
    _empty_state_tasks: Vec<Task<()>>,
}

impl TranscriptView {
    pub fn new(
        messages: Vec<TranscriptMessage>,
        show_sponsorship: bool,
        cx: &mut Context<Self>,
    ) -> Self {
        let empty_state_items = EMPTY_STATE_HINTS
            .iter()
            .enumerate()
            .map(|(position, hint)| {
                cx.new(|_| MessageItem::new(position, TranscriptMessage::system(*hint)))
            })
            .collect();

        let mut empty_state_tasks = Vec::new();
        for (slot, delay_ms) in EMPTY_STATE_REVEAL_DELAYS_MS.iter().copied().enumerate() {
            empty_state_tasks.push(cx.spawn(async move |this, cx| {
                cx.background_executor()
                    .timer(Duration::from_millis(delay_ms))
                    .await;

                let _ = this.update(cx, |this, cx| {
                    this.empty_state_revealed[slot] = true;
                    cx.notify();
                });
            }));
        }

        let mut this = Self {
            messages: Vec::new(),
            items: Vec::new(),
            empty_state_items,
            extra: None,
            show_sponsorship,
            scroll_manager: ScrollManager::new(),
            empty_state_revealed: [false; 3],
            _empty_state_tasks: empty_state_tasks,
        };
        this.replace_messages(messages, cx);
        this
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn has_user_scrolled(&self) -> bool {
        self.scroll_manager.has_user_scrolled()
    }

    /// Replaces the rendered sequence.
    ///
    /// Item identity is `(position, kind)`: an item is reused in place when
    /// both still match, so transient copy state survives value updates.
    pub fn set_messages(&mut self, messages: Vec<TranscriptMessage>, cx: &mut Context<Self>) {
        self.replace_messages(messages, cx);
        cx.notify();
    }

    /// Sets content rendered after the message list.
    pub fn set_extra(&mut self, extra: Option<AnyView>, cx: &mut Context<Self>) {
        self.extra = extra;
        cx.notify();
    }

    /// Forgets any manual-scroll intent, e.g. for a fresh transcript.
    pub fn reset_scroll_tracking(&mut self, cx: &mut Context<Self>) {
        self.scroll_manager.reset();
        cx.notify();
    }

    fn replace_messages(&mut self, messages: Vec<TranscriptMessage>, cx: &mut Context<Self>) {
        let mut items = Vec::with_capacity(messages.len());

        for (position, message) in messages.iter().enumerate() {
            let reusable = self
                .items
                .get(position)
                .filter(|item| item.read(cx).kind() == message.kind)
                .cloned();

            match reusable {
                Some(item) => {
                    item.update(cx, |item, cx| item.set_message(message.clone(), cx));
                    items.push(item);
                }
                None => {
                    let message = message.clone();
                    items.push(cx.new(|_| MessageItem::new(position, message)));
                }
            }
        }

        self.items = items;
        self.messages = messages;
        self.publish_region(cx);
    }

    fn publish_region(&self, cx: &mut Context<Self>) {
        let content = transcript_region_content(&self.messages, self.show_sponsorship);
        cx.default_global::<RegionStore>()
            .0
            .publish(TRANSCRIPT_REGION_ID, content);
    }

    fn render_empty_state(&self, cx: &Context<Self>) -> AnyElement {
        v_flex()
            .gap_1()
            .children(
                self.empty_state_items
                    .iter()
                    .enumerate()
                    .filter(|(slot, _)| self.empty_state_revealed[*slot])
                    .map(|(_, item)| item.clone()),
            )
            .when(self.show_sponsorship && self.empty_state_revealed[2], |column| {
                column.child(self.render_sponsorship_panel(cx))
            })
            .into_any_element()
    }

    fn render_sponsorship_panel(&self, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();

        h_flex()
            .id("transcript-sponsorship")
            .mx_2()
            .my_1()
            .p_2()
            .gap_2()
            .items_center()
            .rounded_lg()
            .border_1()
            .border_color(theme.border)
            .bg(theme.accent)
            .text_color(theme.accent_foreground)
            .text_sm()
            .child(div().flex_1().child(SPONSOR_MESSAGE))
            .child(
                Button::new("transcript-sponsor-support")
                    .primary()
                    .small()
                    .child("Support now")
                    .on_click(|_, _, _| {
                        if let Err(error) = open::that(SPONSOR_URL) {
                            tracing::warn!("failed to open sponsorship page: {error}");
                        }
                    }),
            )
            .into_any_element()
    }
}

impl Render for TranscriptView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // Follow intent first, then the bottom pin, so an append in the same
        // frame still lands at the tail.
        self.scroll_manager.update_follow_state();
        self.scroll_manager.apply_auto_follow();

        div()
            .id(TRANSCRIPT_REGION_ID)
            .size_full()
            .min_h_0()
            .overflow_y_scroll()
            .track_scroll(self.scroll_manager.handle())
            .on_scroll_wheel(cx.listener(|this, _event: &ScrollWheelEvent, _window, cx| {
                this.scroll_manager.update_follow_state();
                cx.notify();
            }))
            .px_2()
            .py_2()
            .child(
                v_flex()
                    .gap_1()
                    .children(self.items.iter().cloned())
                    .when_some(self.extra.clone(), |column, extra| column.child(extra))
                    .when(self.messages.is_empty(), |column| {
                        column.child(self.render_empty_state(cx))
                    }),
            )
    }
}

/// Builds the exportable snapshot of everything the transcript renders,
/// including the empty-state hints when they are what is shown.
pub fn transcript_region_content(
    messages: &[TranscriptMessage],
    show_sponsorship: bool,
) -> RegionContent {
    let mut content = RegionContent::new(DEFAULT_WRAP_COLUMNS);

    if messages.is_empty() {
        for hint in EMPTY_STATE_HINTS {
            content.push(RegionParagraph::new(None, hint));
        }
        if show_sponsorship {
            content.push(RegionParagraph::new(None, SPONSOR_MESSAGE));
        }
        return content;
    }

    for message in messages {
        content.push(message_paragraph(message));
    }

    content
}

fn message_paragraph(message: &TranscriptMessage) -> RegionParagraph {
    let mut heading = catalog::display_prefix(message);
    if message.kind == MessageKind::Thinking {
        heading = heading.map(|prefix| format!("{prefix} {}", catalog::THINKING_CAUTION));
    }

    RegionParagraph::new(heading, message.value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_messages() -> Vec<TranscriptMessage> {
        vec![
            TranscriptMessage::new(MessageKind::Goal, "write a changelog"),
            TranscriptMessage::new(MessageKind::Task, "collect merged PRs"),
            TranscriptMessage::new(MessageKind::Thinking, "ranking entries"),
            TranscriptMessage::new(MessageKind::Action, "```sh\ngit log\n```")
                .with_info("inspecting history"),
            TranscriptMessage::system("run finished"),
        ]
    }

    #[test]
    fn region_content_preserves_count_and_order() {
        let messages = sample_messages();

        let content = transcript_region_content(&messages, false);

        assert_eq!(content.paragraphs().len(), messages.len());
        let bodies = content
            .paragraphs()
            .iter()
            .map(|paragraph| paragraph.body.as_str())
            .collect::<Vec<_>>();
        let values = messages
            .iter()
            .map(|message| message.value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(bodies, values);
    }

    #[test]
    fn region_headings_resolve_through_the_catalog() {
        let content = transcript_region_content(&sample_messages(), false);
        let headings = content
            .paragraphs()
            .iter()
            .map(|paragraph| paragraph.heading.clone())
            .collect::<Vec<_>>();

        assert_eq!(headings[0].as_deref(), Some("new goal started"));
        assert_eq!(headings[1].as_deref(), Some("task added"));
        assert_eq!(
            headings[2].as_deref(),
            Some("thinking… (restart the agent if this takes more than 30 seconds)")
        );
        assert_eq!(headings[3].as_deref(), Some("inspecting history"));
        assert_eq!(headings[4], None);
    }

    #[test]
    fn empty_transcript_publishes_the_two_hints() {
        let content = transcript_region_content(&[], false);

        assert_eq!(content.paragraphs().len(), 2);
        assert_eq!(content.paragraphs()[0].body, EMPTY_STATE_HINTS[0]);
        assert_eq!(content.paragraphs()[1].body, EMPTY_STATE_HINTS[1]);
    }

    #[test]
    fn sponsorship_line_appears_only_when_enabled() {
        let without_panel = transcript_region_content(&[], false);
        let with_panel = transcript_region_content(&[], true);

        assert_eq!(without_panel.paragraphs().len(), 2);
        assert_eq!(with_panel.paragraphs().len(), 3);
        assert_eq!(with_panel.paragraphs()[2].body, SPONSOR_MESSAGE);
    }

    #[test]
    fn sponsorship_never_replaces_real_messages() {
        let messages = sample_messages();

        let content = transcript_region_content(&messages, true);

        assert_eq!(content.paragraphs().len(), messages.len());
    }
}
