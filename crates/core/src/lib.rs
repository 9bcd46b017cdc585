//! Shared domain types, configuration and error type for the campaign dashboard.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
pub use types::{
    Ad, AdSet, BudgetType, Campaign, CampaignIcon, HasMetrics, IconKind, MediaType, Metric,
    MetricDraft, MetricType,
};
