use std::path::PathBuf;

use gpui::*;
use gpui_component::Root;

use ui::app::{Quit, TranscriptShell};
use ui::settings::AppSettings;
use ui::transcript::loader;
use ui::transcript::message::TranscriptMessage;

/// Environment variable naming a JSON transcript to render on launch.
const TRANSCRIPT_ENV_VAR: &str = "TASKLINE_TRANSCRIPT";
const DEFAULT_WINDOW_TITLE: &str = "Agent Transcript";

/// Application entry point.
///
/// Bootstraps the GPUI application with:
/// 1. Asset loading via gpui-component-assets
/// 2. gpui-component initialization (required for Root and themes)
/// 3. Settings loading and theme application
/// 4. An optional caller-supplied transcript from TASKLINE_TRANSCRIPT
/// 5. Window creation with Root wrapper for gpui-component composition
fn main() {
    tracing_subscriber::fmt::init();

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(|cx| {
        // Initialize gpui-component - REQUIRED before any Root usage
        gpui_component::init(cx);

        let settings = AppSettings::load();
        settings.apply_theme(None, cx);

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });
        cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

        let (title, messages) = startup_transcript();

        // Spawn async window creation so all initialization is complete
        cx.spawn(async move |cx| {
            cx.update(move |cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(980.), px(720.)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(9.), px(9.))),
                        ..Default::default()
                    }),
                    ..Default::default()
                };

                cx.open_window(options, move |window, cx| {
                    let shell =
                        cx.new(|cx| TranscriptShell::new(title, messages, settings, cx));

                    // Root is REQUIRED by gpui-component composition
                    cx.new(|cx| Root::new(shell, window, cx))
                })
                .expect("failed to open main window");

                cx.activate(true);
            })
        })
        .detach();
    });
}

/// Resolves the launch transcript from the environment.
///
/// Any failure degrades to an empty transcript; the surface itself never
/// produces messages.
fn startup_transcript() -> (SharedString, Vec<TranscriptMessage>) {
    let Some(path) = std::env::var_os(TRANSCRIPT_ENV_VAR) else {
        return (DEFAULT_WINDOW_TITLE.into(), Vec::new());
    };

    let path = PathBuf::from(path);
    match loader::load_transcript(&path) {
        Ok(messages) => {
            let title = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(|stem| SharedString::from(stem.to_string()))
                .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.into());

            (title, messages)
        }
        Err(error) => {
            tracing::warn!("failed to load startup transcript: {error}. starting empty");
            (DEFAULT_WINDOW_TITLE.into(), Vec::new())
        }
    }
}
