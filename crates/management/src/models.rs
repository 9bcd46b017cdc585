//! Dashboard snapshot, item addressing and the command model.

use campaign_core::{
    Ad, AdSet, BudgetType, Campaign, CampaignIcon, MediaType, Metric, MetricDraft,
};
use campaign_reporting::MetricSelection;
use serde::{Deserialize, Serialize};

// ─── Snapshot ──────────────────────────────────────────────────────────────

/// Immutable view of the whole dashboard handed to the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardData {
    pub campaigns: Vec<Campaign>,
    /// Derived from every campaign's metrics.
    pub overview_metrics: Vec<Metric>,
    pub selection: MetricSelection,
    /// Derived from campaign and ad set budgets.
    pub total_daily_budget: f64,
}

impl DashboardData {
    pub fn selected_metrics(&self) -> Vec<&Metric> {
        self.selection.selected(&self.overview_metrics)
    }

    pub fn is_selected(&self, metric_id: &str) -> bool {
        self.selection.contains(metric_id)
    }

    pub fn campaign(&self, campaign_id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == campaign_id)
    }

    pub fn ad_set(&self, campaign_id: &str, ad_set_id: &str) -> Option<&AdSet> {
        self.campaign(campaign_id)?
            .ad_sets
            .iter()
            .find(|s| s.id == ad_set_id)
    }

    pub fn ad(&self, campaign_id: &str, ad_set_id: &str, ad_id: &str) -> Option<&Ad> {
        self.ad_set(campaign_id, ad_set_id)?
            .ads
            .iter()
            .find(|a| a.id == ad_id)
    }

    pub(crate) fn campaign_mut(&mut self, campaign_id: &str) -> Option<&mut Campaign> {
        self.campaigns.iter_mut().find(|c| c.id == campaign_id)
    }

    pub(crate) fn ad_set_mut(&mut self, campaign_id: &str, ad_set_id: &str) -> Option<&mut AdSet> {
        self.campaign_mut(campaign_id)?
            .ad_sets
            .iter_mut()
            .find(|s| s.id == ad_set_id)
    }

    pub(crate) fn ad_mut(
        &mut self,
        campaign_id: &str,
        ad_set_id: &str,
        ad_id: &str,
    ) -> Option<&mut Ad> {
        self.ad_set_mut(campaign_id, ad_set_id)?
            .ads
            .iter_mut()
            .find(|a| a.id == ad_id)
    }

    pub fn ad_set_count(&self) -> usize {
        self.campaigns.iter().map(|c| c.ad_sets.len()).sum()
    }

    pub fn ad_count(&self) -> usize {
        self.campaigns
            .iter()
            .flat_map(|c| &c.ad_sets)
            .map(|s| s.ads.len())
            .sum()
    }
}

// ─── Addressing ────────────────────────────────────────────────────────────

/// Location of a node in the tree. Each level carries exactly the ids needed
/// to reach it from the root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemPath {
    Campaign {
        campaign_id: String,
    },
    AdSet {
        campaign_id: String,
        ad_set_id: String,
    },
    Ad {
        campaign_id: String,
        ad_set_id: String,
        ad_id: String,
    },
}

impl ItemPath {
    pub fn campaign(campaign_id: impl Into<String>) -> Self {
        Self::Campaign {
            campaign_id: campaign_id.into(),
        }
    }

    pub fn ad_set(campaign_id: impl Into<String>, ad_set_id: impl Into<String>) -> Self {
        Self::AdSet {
            campaign_id: campaign_id.into(),
            ad_set_id: ad_set_id.into(),
        }
    }

    pub fn ad(
        campaign_id: impl Into<String>,
        ad_set_id: impl Into<String>,
        ad_id: impl Into<String>,
    ) -> Self {
        Self::Ad {
            campaign_id: campaign_id.into(),
            ad_set_id: ad_set_id.into(),
            ad_id: ad_id.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Campaign { .. } => "campaign",
            Self::AdSet { .. } => "ad_set",
            Self::Ad { .. } => "ad",
        }
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────

/// Every operation the presentation layer can request, as data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DashboardCommand {
    CreateCampaign {
        name: String,
        #[serde(default)]
        budget_type: BudgetType,
        #[serde(default)]
        daily_budget: Option<f64>,
    },
    CreateAdSet {
        campaign_id: String,
        name: String,
        #[serde(default)]
        daily_budget: Option<f64>,
    },
    CreateAd {
        campaign_id: String,
        ad_set_id: String,
        name: String,
        #[serde(default)]
        metrics: Vec<MetricDraft>,
        #[serde(default)]
        media_url: Option<String>,
        #[serde(default)]
        media_type: Option<MediaType>,
    },
    Duplicate {
        path: ItemPath,
    },
    Delete {
        path: ItemPath,
    },
    Rename {
        path: ItemPath,
        name: String,
    },
    ToggleExpanded {
        path: ItemPath,
    },
    EditCampaignIcon {
        campaign_id: String,
        name: String,
        #[serde(default)]
        icon: Option<CampaignIcon>,
    },
    AddAdMetric {
        campaign_id: String,
        ad_set_id: String,
        ad_id: String,
        metric: MetricDraft,
    },
    EditAdMetric {
        campaign_id: String,
        ad_set_id: String,
        ad_id: String,
        metric_id: String,
        metric: MetricDraft,
    },
    DeleteAdMetric {
        campaign_id: String,
        ad_set_id: String,
        ad_id: String,
        metric_id: String,
    },
    ToggleMetric {
        metric_id: String,
    },
    SelectAllMetrics,
    ClearAllMetrics,
}
