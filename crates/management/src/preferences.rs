//! Cosmetic dashboard preferences kept in a small key-value store.
//!
//! Values are strings under fixed keys, persisted as one JSON object file.
//! They never enter the campaign tree.

use campaign_core::{CampaignError, CampaignResult};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const THEME_KEY: &str = "dashboard-theme";
pub const TITLE_KEY: &str = "dashboard-title";
pub const DESCRIPTION_KEY: &str = "dashboard-description";
pub const LOGO_KEY: &str = "company-logo";

const DEFAULT_TITLE: &str = "Dashboard de Tráfego Pago";
const DEFAULT_DESCRIPTION: &str = "Gerencie suas campanhas, conjuntos e anúncios";

/// Theme colours as HSL triplets, e.g. `"0 0% 9%"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub foreground: String,
    pub accent: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "0 0% 9%".to_string(),
            secondary: "0 0% 90%".to_string(),
            background: "0 0% 98%".to_string(),
            foreground: "0 0% 9%".to_string(),
            accent: "0 0% 85%".to_string(),
        }
    }
}

impl ThemeColors {
    pub const FIELDS: &'static [&'static str] =
        &["primary", "secondary", "background", "foreground", "accent"];

    /// Set one colour by field name.
    pub fn set(&mut self, field: &str, value: &str) -> CampaignResult<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CampaignError::Validation(format!(
                "theme colour '{field}' cannot be empty"
            )));
        }
        let slot = match field {
            "primary" => &mut self.primary,
            "secondary" => &mut self.secondary,
            "background" => &mut self.background,
            "foreground" => &mut self.foreground,
            "accent" => &mut self.accent,
            other => {
                return Err(CampaignError::Validation(format!(
                    "unknown theme field '{other}', expected one of {}",
                    Self::FIELDS.join(", ")
                )))
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// All preferences resolved with their defaults.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Preferences {
    pub theme: ThemeColors,
    pub title: String,
    pub description: String,
    pub company_logo: String,
}

/// Key-value preferences store. `path: None` keeps everything in memory.
pub struct PreferencesStore {
    path: Option<PathBuf>,
    entries: DashMap<String, String>,
}

impl PreferencesStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: DashMap::new(),
        }
    }

    /// Load from `path`. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> CampaignResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = DashMap::new();
        if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let stored: BTreeMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
                CampaignError::Preferences(format!("{}: {e}", path.display()))
            })?;
            for (key, value) in stored {
                entries.insert(key, value);
            }
            info!(path = %path.display(), keys = entries.len(), "Preferences loaded");
        }
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> CampaignResult<()> {
        self.entries.insert(key.to_string(), value.into());
        self.persist()
    }

    pub fn theme(&self) -> ThemeColors {
        match self.get(THEME_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored theme is invalid, using default");
                ThemeColors::default()
            }),
            None => ThemeColors::default(),
        }
    }

    pub fn set_theme(&self, theme: &ThemeColors) -> CampaignResult<()> {
        self.set(THEME_KEY, serde_json::to_string(theme)?)
    }

    pub fn title(&self) -> String {
        self.get(TITLE_KEY).unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn description(&self) -> String {
        self.get(DESCRIPTION_KEY)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())
    }

    pub fn company_logo(&self) -> String {
        self.get(LOGO_KEY).unwrap_or_default()
    }

    pub fn resolved(&self) -> Preferences {
        Preferences {
            theme: self.theme(),
            title: self.title(),
            description: self.description(),
            company_logo: self.company_logo(),
        }
    }

    /// Forget every stored value.
    pub fn reset(&self) -> CampaignResult<()> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> CampaignResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let snapshot: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        Ok(())
    }
}
