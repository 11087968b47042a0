use std::time::Duration;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme, Icon, IconName, Sizable, h_flex, label::Label, text::TextView, v_flex,
};

use crate::transcript::catalog::{self, MessageIcon};
use crate::transcript::message::{MessageKind, TranscriptMessage};

/// How long the "Copied!" badge stays up after a copy click.
pub const COPIED_BADGE_RESET_MS: u64 = 2000;
/// Action payloads past this size render as plain text to keep markdown
/// rendering predictable.
const MARKDOWN_SAFE_FALLBACK_THRESHOLD_BYTES: usize = 128 * 1024;

/// Badge shown in a message's corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyBadge {
    Copied,
    CopyHint,
    Hidden,
}

/// Resolves which badge a message shows; "Copied!" always wins over the
/// hover hint.
pub fn copy_badge(copied: bool, hovered: bool) -> CopyBadge {
    if copied {
        CopyBadge::Copied
    } else if hovered {
        CopyBadge::CopyHint
    } else {
        CopyBadge::Hidden
    }
}

/// One rendered transcript message.
///
/// Owns its transient hover/copied state; clicking anywhere on the item
/// copies the raw message value to the clipboard.
pub struct MessageItem {
    position: usize,
    message: TranscriptMessage,
    hovered: bool,
    copied: bool,
    copied_reset_task: Option<Task<()>>,
}

impl MessageItem {
    pub fn new(position: usize, message: TranscriptMessage) -> Self {
        Self {
            position,
            message,
            hovered: false,
            copied: false,
            copied_reset_task: None,
        }
    }

    pub fn message(&self) -> &TranscriptMessage {
        &self.message
    }

    pub fn kind(&self) -> MessageKind {
        self.message.kind
    }

    /// Replaces the displayed message in place, keeping transient state.
    pub fn set_message(&mut self, message: TranscriptMessage, cx: &mut Context<Self>) {
        if self.message != message {
            self.message = message;
            cx.notify();
        }
    }

    fn handle_copy_click(&mut self, cx: &mut Context<Self>) {
        cx.write_to_clipboard(ClipboardItem::new_string(self.message.value.clone()));

        self.copied = true;
        // Replacing the task drops any pending revert, so a re-click
        // restarts the full badge window.
        self.copied_reset_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor()
                .timer(Duration::from_millis(COPIED_BADGE_RESET_MS))
                .await;

            let _ = this.update(cx, |this, cx| {
                this.copied = false;
                this.copied_reset_task = None;
                cx.notify();
            });
        }));
        cx.notify();
    }

    fn set_hovered(&mut self, hovered: bool, cx: &mut Context<Self>) {
        if self.hovered != hovered {
            self.hovered = hovered;
            cx.notify();
        }
    }

    fn render_prefix_row(&self, cx: &Context<Self>) -> Option<AnyElement> {
        let entry = catalog::entry(self.message.kind);
        let prefix = catalog::display_prefix(&self.message);
        if entry.icon.is_none() && prefix.is_none() {
            // System messages carry no prefix row at all, which avoids a
            // stray gap above their text.
            return None;
        }

        let theme = cx.theme();

        Some(
            h_flex()
                .gap_2()
                .items_center()
                .when_some(entry.icon, |row, icon| {
                    row.child(
                        Icon::new(icon_name(icon))
                            .size(px(14.))
                            .text_color(icon_color(icon)),
                    )
                })
                .when_some(prefix, |row, prefix| {
                    row.child(Label::new(prefix).text_sm().font_bold())
                })
                .when(self.message.kind == MessageKind::Thinking, |row| {
                    row.child(
                        Label::new(catalog::THINKING_CAUTION)
                            .text_sm()
                            .italic()
                            .text_color(theme.muted_foreground),
                    )
                })
                .into_any_element(),
        )
    }

    fn render_body(&self) -> AnyElement {
        if self.message.renders_markdown()
            && self.message.value.len() <= MARKDOWN_SAFE_FALLBACK_THRESHOLD_BYTES
        {
            let markdown_id = ElementId::Name(SharedString::from(format!(
                "action-markdown-{}",
                self.position
            )));

            return TextView::markdown(markdown_id, self.message.value.clone())
                .selectable(true)
                .into_any_element();
        }

        Label::new(self.message.value.clone())
            .text_sm()
            .into_any_element()
    }

    fn render_badge(&self, cx: &Context<Self>) -> Option<AnyElement> {
        let theme = cx.theme();
        let badge = div()
            .absolute()
            .bottom_1()
            .right_1()
            .px_2()
            .py_1()
            .rounded_full()
            .border_1()
            .border_color(theme.border)
            .bg(theme.background)
            .text_xs()
            .text_color(theme.muted_foreground);

        match copy_badge(self.copied, self.hovered) {
            CopyBadge::Copied => Some(badge.child("Copied!").into_any_element()),
            CopyBadge::CopyHint => Some(
                badge
                    .child(Icon::new(IconName::Copy).size(px(12.)))
                    .into_any_element(),
            ),
            CopyBadge::Hidden => None,
        }
    }
}

impl Render for MessageItem {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id(("transcript-message", self.position))
            .relative()
            .mx_2()
            .my_1()
            .p_2()
            .gap_1()
            .rounded_lg()
            .border_1()
            .border_color(theme.border)
            .bg(theme.muted)
            .text_sm()
            .cursor(CursorStyle::PointingHand)
            .hover(|style| style.border_color(theme.primary))
            .on_hover(cx.listener(|this, hovered: &bool, _window, cx| {
                this.set_hovered(*hovered, cx);
            }))
            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                this.handle_copy_click(cx);
            }))
            .when_some(self.render_prefix_row(cx), |column, row| column.child(row))
            .child(self.render_body())
            .when_some(self.render_badge(cx), |column, badge| column.child(badge))
    }
}

fn icon_name(icon: MessageIcon) -> IconName {
    match icon {
        MessageIcon::Star => IconName::Star,
        MessageIcon::List => IconName::Menu,
        MessageIcon::Brain => IconName::Bot,
        MessageIcon::Play => IconName::SquareTerminal,
    }
}

fn icon_color(icon: MessageIcon) -> Hsla {
    let color = match icon {
        MessageIcon::Star => rgb(0xfde047),
        MessageIcon::List => rgb(0xd4d4d8),
        MessageIcon::Brain => rgb(0xf472b6),
        MessageIcon::Play => rgb(0x22c55e),
    };

    color.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copied_badge_wins_over_hover_hint() {
        assert_eq!(copy_badge(true, true), CopyBadge::Copied);
        assert_eq!(copy_badge(true, false), CopyBadge::Copied);
    }

    #[test]
    fn hover_hint_shows_only_while_not_copied() {
        assert_eq!(copy_badge(false, true), CopyBadge::CopyHint);
        assert_eq!(copy_badge(false, false), CopyBadge::Hidden);
    }

    #[test]
    fn every_icon_keeps_a_distinct_color() {
        let icons = [
            MessageIcon::Star,
            MessageIcon::List,
            MessageIcon::Brain,
            MessageIcon::Play,
        ];

        let colors = icons.map(icon_color);
        for (index, color) in colors.iter().enumerate() {
            for other in &colors[index + 1..] {
                assert_ne!(color, other, "icons must stay distinguishable");
            }
        }
    }
}
