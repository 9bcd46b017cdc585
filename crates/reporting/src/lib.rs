//! Dashboard analytics: metric roll-up, budget totals, overview selection,
//! value formatting and report export.

pub mod aggregation;
pub mod budget;
pub mod export;
pub mod format;
pub mod selection;

pub use aggregation::{aggregate, derived_metric_id};
pub use budget::{campaign_daily_budget, total_daily_budget};
pub use export::DashboardReport;
pub use format::{format_currency, format_metric_value};
pub use selection::MetricSelection;
