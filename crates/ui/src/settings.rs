use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use gpui::{App, Window};
use gpui_component::{Theme, ThemeMode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const SETTINGS_DIRECTORY_NAME: &str = "taskline";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Load-only application settings.
///
/// Nothing in the surface writes settings back, so the store is a one-shot
/// read with defaults on any failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(
        default = "default_theme_mode",
        serialize_with = "serialize_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
    /// Whether the empty transcript shows the sponsorship panel.
    #[serde(default = "default_show_sponsorship")]
    pub show_sponsorship: bool,
    /// Overrides the directory transcript images are written into.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            show_sponsorship: default_show_sponsorship(),
            download_dir: None,
        }
    }
}

impl AppSettings {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".taskline"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn load() -> Self {
        Self::load_from(&Self::default_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using defaults", path);
            return Self::default();
        }

        let figment =
            Figment::from(Serialized::defaults(Self::default())).merge(Json::file(path));

        match figment.extract::<Self>() {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                Self::default()
            }
        }
    }

    /// Directory transcript image downloads land in.
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn apply_theme(&self, window: Option<&mut Window>, cx: &mut App) {
        Theme::change(self.theme_mode, window, cx);
    }
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Dark
}

fn default_show_sponsorship() -> bool {
    true
}

fn serialize_theme_mode<S>(value: &ThemeMode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.name())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(parse_theme_mode(&value))
}

fn parse_theme_mode(value: &str) -> ThemeMode {
    if value.trim().eq_ignore_ascii_case("light") {
        ThemeMode::Light
    } else {
        ThemeMode::Dark
    }
}
