use std::rc::Rc;

use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};
use taskline_export::{extract_region_text, write_region_image};

use crate::settings::AppSettings;
use crate::transcript::message::TranscriptMessage;
use crate::transcript::pdf::PdfExporter;
use crate::transcript::view::{RegionStore, TRANSCRIPT_REGION_ID, TranscriptView};

/// Fixed filename used for every transcript image download.
pub const TRANSCRIPT_IMAGE_FILE_NAME: &str = "agent-transcript-output.png";

#[cfg(target_os = "macos")]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 78.0;
#[cfg(not(target_os = "macos"))]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 16.0;

gpui::actions!(taskline, [Quit]);

/// Computes the top toolbar height with a Zed-style responsive formula, so
/// the title area respects user font scaling via rem size.
fn window_toolbar_height(window: &Window) -> Pixels {
    (1.75 * window.rem_size()).max(px(34.0))
}

/// Application shell around the transcript surface.
///
/// The shell owns the header: window title, the image/text export actions
/// keyed by the transcript region id, and the delegated PDF action.
pub struct TranscriptShell {
    title: SharedString,
    transcript: Entity<TranscriptView>,
    settings: AppSettings,
    pdf_exporter: Option<Rc<dyn PdfExporter>>,
    title_bar_should_move: bool,
}

impl TranscriptShell {
    pub fn new(
        title: impl Into<SharedString>,
        messages: Vec<TranscriptMessage>,
        settings: AppSettings,
        cx: &mut Context<Self>,
    ) -> Self {
        let show_sponsorship = settings.show_sponsorship;
        let transcript = cx.new(|cx| TranscriptView::new(messages, show_sponsorship, cx));

        Self {
            title: title.into(),
            transcript,
            settings,
            pdf_exporter: None,
            title_bar_should_move: false,
        }
    }

    pub fn transcript(&self) -> &Entity<TranscriptView> {
        &self.transcript
    }

    /// Wires the external PDF collaborator.
    pub fn set_pdf_exporter(&mut self, exporter: Rc<dyn PdfExporter>) {
        self.pdf_exporter = Some(exporter);
    }

    pub fn set_messages(&mut self, messages: Vec<TranscriptMessage>, cx: &mut Context<Self>) {
        self.transcript.update(cx, |transcript, cx| {
            transcript.set_messages(messages, cx);
        });
    }

    /// Rasterizes the region's full content and downloads it as a PNG.
    ///
    /// An unpublished region id aborts silently; rasterization failures are
    /// logged and never surfaced.
    fn save_transcript_image(&mut self, region_id: &str, cx: &mut Context<Self>) {
        let Some(content) = cx
            .default_global::<RegionStore>()
            .0
            .lookup(region_id)
            .cloned()
        else {
            return;
        };

        let path = self
            .settings
            .resolved_download_dir()
            .join(TRANSCRIPT_IMAGE_FILE_NAME);

        cx.spawn(async move |_this, cx| {
            let export = cx
                .background_executor()
                .spawn(async move { write_region_image(&content, &path).map(|()| path) });

            match export.await {
                Ok(path) => tracing::info!("saved transcript image to {path:?}"),
                Err(error) => tracing::error!("failed to export transcript image: {error}"),
            }
        })
        .detach();
    }

    /// Copies the region's rendered text to the clipboard.
    fn copy_transcript_text(&mut self, region_id: &str, cx: &mut Context<Self>) {
        let Some(text) = cx
            .default_global::<RegionStore>()
            .0
            .lookup(region_id)
            .map(extract_region_text)
        else {
            return;
        };

        cx.write_to_clipboard(ClipboardItem::new_string(text));
    }

    /// Forwards the full message sequence to the PDF collaborator.
    fn export_transcript_pdf(&self, cx: &mut Context<Self>) {
        let Some(exporter) = self.pdf_exporter.clone() else {
            tracing::debug!("no PDF collaborator is wired; ignoring export request");
            return;
        };

        let messages = self.transcript.read(cx).messages().to_vec();
        exporter.export_transcript(&messages);
    }

    fn render_top_bar(&self, toolbar_height: Pixels, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .id("transcript-top-bar")
            .window_control_area(WindowControlArea::Drag)
            .on_mouse_down_out(cx.listener(|this, _, _window, _cx| {
                this.title_bar_should_move = false;
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = false;
                }),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = true;
                }),
            )
            .on_mouse_move(cx.listener(|this, _, window, _cx| {
                if this.title_bar_should_move {
                    this.title_bar_should_move = false;
                    window.start_window_move();
                }
            }))
            .w_full()
            .h(toolbar_height)
            .flex_shrink_0()
            .pl(px(WINDOW_TOOLBAR_LEFT_SAFE_PADDING))
            .pr_3()
            .items_center()
            .justify_between()
            .bg(theme.background)
            .border_b_1()
            .border_color(theme.border)
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    .child(self.render_traffic_lights())
                    .child(
                        Label::new(self.title.clone())
                            .text_sm()
                            .font_bold()
                            .text_color(theme.muted_foreground),
                    ),
            )
            .child(
                h_flex()
                    .gap_1()
                    .items_center()
                    .child(
                        Button::new("transcript-export-image")
                            .ghost()
                            .small()
                            .icon(IconName::ArrowDown)
                            .child("Image")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.save_transcript_image(TRANSCRIPT_REGION_ID, cx);
                            })),
                    )
                    .child(
                        Button::new("transcript-copy-text")
                            .ghost()
                            .small()
                            .icon(IconName::Copy)
                            .child("Copy")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.copy_transcript_text(TRANSCRIPT_REGION_ID, cx);
                            })),
                    )
                    .child(
                        Button::new("transcript-export-pdf")
                            .ghost()
                            .small()
                            .child("PDF")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.export_transcript_pdf(cx);
                            })),
                    ),
            )
    }

    fn render_traffic_lights(&self) -> AnyElement {
        #[cfg(target_os = "macos")]
        {
            // Native traffic lights already occupy the titlebar inset.
            div().into_any_element()
        }

        #[cfg(not(target_os = "macos"))]
        {
            h_flex()
                .gap_1()
                .items_center()
                .child(traffic_dot(rgb(0xef4444)))
                .child(traffic_dot(rgb(0xeab308)))
                .child(traffic_dot(rgb(0x22c55e)))
                .into_any_element()
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn traffic_dot(color: Rgba) -> Div {
    div().size(px(12.)).rounded_full().bg(color)
}

impl Render for TranscriptShell {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let toolbar_height = window_toolbar_height(window);

        v_flex()
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .text_color(theme.foreground)
            .child(self.render_top_bar(toolbar_height, cx))
            .child(
                div()
                    .id("transcript-shell-body")
                    .flex_1()
                    .min_h_0()
                    .overflow_hidden()
                    .child(self.transcript.clone()),
            )
    }
}
