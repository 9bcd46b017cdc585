use crate::error::{CampaignError, CampaignResult};
use serde::Deserialize;
use std::path::Path;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_DASHBOARD__` and an optional TOML file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionConfig {
    /// Re-select every overview metric when the user had cleared the selection.
    #[serde(default = "default_auto_select_after_clear")]
    pub auto_select_after_clear: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct IdConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
    #[serde(default = "default_percentage_decimals")]
    pub percentage_decimals: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_path")]
    pub path: String,
}

// Default functions
fn default_auto_select_after_clear() -> bool {
    false
}
fn default_currency_symbol() -> String {
    "R$".to_string()
}
fn default_thousands_separator() -> String {
    ".".to_string()
}
fn default_decimal_separator() -> String {
    ",".to_string()
}
fn default_percentage_decimals() -> usize {
    1
}
fn default_preferences_path() -> String {
    "dashboard-preferences.json".to_string()
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            auto_select_after_clear: default_auto_select_after_clear(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
            percentage_decimals: default_percentage_decimals(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and an optional config file.
    pub fn load(file: Option<&Path>) -> CampaignResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("CAMPAIGN_DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CampaignError::Config(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| CampaignError::Config(e.to_string()))
    }
}
