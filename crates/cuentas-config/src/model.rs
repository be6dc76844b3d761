use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

use crate::locale::CalendarLocale;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "CUENTAS_HOME";
const DEFAULT_DIR_NAME: &str = ".cuentas";

/// Stores user preferences for storage location and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to `$CUENTAS_HOME` or `~/.cuentas`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency_symbol: Self::default_currency_symbol(),
            storage_key: Self::default_storage_key(),
            data_dir: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
            accessibility: AccessibilitySettings::default(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "es".into()
    }

    pub fn default_currency_symbol() -> String {
        "S/".into()
    }

    pub fn default_storage_key() -> String {
        "registros".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn calendar_locale(&self) -> CalendarLocale {
        CalendarLocale::for_tag(&self.locale)
    }

    /// Whether rendered output may carry colour codes.
    pub fn color_output(&self) -> bool {
        self.ui_color_enabled && !self.accessibility.plain_output
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
}
