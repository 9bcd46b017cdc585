//! A dashboard session: the hierarchy store plus cosmetic preferences.

use crate::preferences::PreferencesStore;
use crate::store::DashboardStore;
use campaign_core::{AppConfig, CampaignResult};
use tracing::info;

pub struct DashboardSession {
    pub store: DashboardStore,
    pub preferences: PreferencesStore,
}

impl DashboardSession {
    /// Build an empty store and load persisted preferences.
    pub fn init(config: &AppConfig) -> CampaignResult<Self> {
        let preferences = PreferencesStore::load(&config.preferences.path)?;
        let store = DashboardStore::new(config);
        info!(title = %preferences.title(), "Dashboard session ready");
        Ok(Self { store, preferences })
    }
}
