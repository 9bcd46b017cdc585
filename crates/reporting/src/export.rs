//! Dashboard report export: one row per metric at every level of the tree,
//! rendered as CSV or JSON.

use campaign_core::{Campaign, CampaignResult, Metric, MetricType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Types ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportLevel {
    Overview,
    Campaign,
    AdSet,
    Ad,
}

impl ReportLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Campaign => "campaign",
            Self::AdSet => "ad_set",
            Self::Ad => "ad",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub level: ReportLevel,
    pub campaign: Option<String>,
    pub ad_set: Option<String>,
    pub ad: Option<String>,
    pub metric: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_daily_budget: f64,
    pub campaigns: usize,
    pub ad_sets: usize,
    pub ads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
}

const CSV_COLUMNS: &[&str] = &["level", "campaign", "ad_set", "ad", "metric", "type", "value"];

// ─── Building ───────────────────────────────────────────────────────────────

impl DashboardReport {
    /// Flatten a dashboard into report rows, overview first, then the tree
    /// depth-first in display order.
    pub fn build(
        title: &str,
        campaigns: &[Campaign],
        overview: &[Metric],
        total_daily_budget: f64,
    ) -> Self {
        let mut rows = Vec::new();
        push_rows(&mut rows, ReportLevel::Overview, None, None, None, overview);

        let mut ad_set_count = 0;
        let mut ad_count = 0;
        for campaign in campaigns {
            push_rows(
                &mut rows,
                ReportLevel::Campaign,
                Some(&campaign.name),
                None,
                None,
                &campaign.metrics,
            );
            for ad_set in &campaign.ad_sets {
                ad_set_count += 1;
                push_rows(
                    &mut rows,
                    ReportLevel::AdSet,
                    Some(&campaign.name),
                    Some(&ad_set.name),
                    None,
                    &ad_set.metrics,
                );
                for ad in &ad_set.ads {
                    ad_count += 1;
                    push_rows(
                        &mut rows,
                        ReportLevel::Ad,
                        Some(&campaign.name),
                        Some(&ad_set.name),
                        Some(&ad.name),
                        &ad.metrics,
                    );
                }
            }
        }

        Self {
            title: title.to_string(),
            generated_at: Utc::now(),
            summary: ReportSummary {
                total_daily_budget,
                campaigns: campaigns.len(),
                ad_sets: ad_set_count,
                ads: ad_count,
            },
            rows,
        }
    }

    pub fn to_csv(&self) -> String {
        let mut csv = CSV_COLUMNS.join(",");
        csv.push('\n');
        for row in &self.rows {
            let cells = [
                row.level.as_str().to_string(),
                quote(row.campaign.as_deref()),
                quote(row.ad_set.as_deref()),
                quote(row.ad.as_deref()),
                quote(Some(&row.metric)),
                row.metric_type.as_str().to_string(),
                row.value.to_string(),
            ];
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }
        csv
    }

    pub fn to_json(&self) -> CampaignResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn push_rows(
    rows: &mut Vec<ReportRow>,
    level: ReportLevel,
    campaign: Option<&str>,
    ad_set: Option<&str>,
    ad: Option<&str>,
    metrics: &[Metric],
) {
    rows.extend(metrics.iter().map(|m| ReportRow {
        level,
        campaign: campaign.map(str::to_string),
        ad_set: ad_set.map(str::to_string),
        ad: ad.map(str::to_string),
        metric: m.name.clone(),
        metric_type: m.metric_type,
        value: m.value,
    }));
}

fn quote(cell: Option<&str>) -> String {
    match cell {
        Some(s) => format!("\"{}\"", s.replace('"', "\"\"")),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{Ad, AdSet, BudgetType};

    fn metric(name: &str, value: f64) -> Metric {
        Metric {
            id: format!("{name}-sum"),
            name: name.to_string(),
            value,
            metric_type: MetricType::Sum,
        }
    }

    fn sample() -> Vec<Campaign> {
        let ad = Ad {
            id: "ad-1".into(),
            name: "Video \"A\"".into(),
            media_url: None,
            media_type: None,
            metrics: vec![metric("Clicks", 10.0)],
            is_expanded: true,
        };
        let ad_set = AdSet {
            id: "adset-1".into(),
            name: "Lookalike".into(),
            ads: vec![ad],
            metrics: vec![metric("Clicks", 10.0)],
            is_expanded: true,
            daily_budget: None,
        };
        vec![Campaign {
            id: "campaign-1".into(),
            name: "Black Friday".into(),
            ad_sets: vec![ad_set],
            metrics: vec![metric("Clicks", 10.0)],
            is_expanded: true,
            icon: None,
            budget_type: BudgetType::Cbo,
            daily_budget: Some(50.0),
        }]
    }

    #[test]
    fn test_build_rows_and_summary() {
        let campaigns = sample();
        let report = DashboardReport::build("Test", &campaigns, &[metric("Clicks", 10.0)], 50.0);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0].level, ReportLevel::Overview);
        assert_eq!(report.rows[3].level, ReportLevel::Ad);
        assert_eq!(report.rows[3].ad.as_deref(), Some("Video \"A\""));
        assert_eq!(report.summary.ad_sets, 1);
        assert_eq!(report.summary.ads, 1);
    }

    #[test]
    fn test_csv_export() {
        let campaigns = sample();
        let report = DashboardReport::build("Test", &campaigns, &[metric("Clicks", 10.0)], 50.0);
        let csv = report.to_csv();
        assert!(csv.starts_with("level,campaign,ad_set,ad,metric,type,value\n"));
        assert!(csv.contains("overview,,,,\"Clicks\",sum,10\n"));
        assert!(csv.contains("\"Video \"\"A\"\"\""));
        assert_eq!(csv.lines().count(), 5);
    }

    #[test]
    fn test_json_export() {
        let campaigns = sample();
        let report = DashboardReport::build("Test", &campaigns, &[], 50.0);
        let json = report.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["campaigns"], 1);
        assert_eq!(parsed["rows"][0]["level"], "campaign");
        assert_eq!(parsed["rows"][0]["type"], "sum");
    }
}
