use serde::{Deserialize, Serialize};

/// How values sharing a metric name are combined across siblings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Sum,
    Average,
    Percentage,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
            Self::Percentage => "percentage",
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "average" | "avg" => Ok(Self::Average),
            "percentage" | "pct" => Ok(Self::Percentage),
            other => Err(format!("unknown metric type '{other}'")),
        }
    }
}

/// A named numeric value. Authored on ads, derived everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub id: String,
    pub name: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
}

/// Authoring input for a metric before the store assigns it an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricDraft {
    pub name: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
}

impl MetricDraft {
    pub fn new(name: impl Into<String>, value: f64, metric_type: MetricType) -> Self {
        Self {
            name: name.into(),
            value,
            metric_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// Where the daily budget of a campaign is set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetType {
    /// Campaign Budget Optimization: one budget on the campaign.
    #[default]
    Cbo,
    /// Ad Set Budget Optimization: one budget per ad set.
    Abo,
}

// ─── Icons ─────────────────────────────────────────────────────────────────

/// Predefined campaign icons. Rendering is left to the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Target,
    Shopping,
    Heart,
    Star,
    Zap,
    Trophy,
    Gift,
    Crown,
    Trending,
    Building,
    Coffee,
    Camera,
    Music,
    Games,
    Car,
    Plane,
    Location,
    Users,
    Money,
    Shield,
    Rocket,
    Sparkles,
    Sun,
    Moon,
}

impl IconKind {
    pub const ALL: &'static [IconKind] = &[
        Self::Target,
        Self::Shopping,
        Self::Heart,
        Self::Star,
        Self::Zap,
        Self::Trophy,
        Self::Gift,
        Self::Crown,
        Self::Trending,
        Self::Building,
        Self::Coffee,
        Self::Camera,
        Self::Music,
        Self::Games,
        Self::Car,
        Self::Plane,
        Self::Location,
        Self::Users,
        Self::Money,
        Self::Shield,
        Self::Rocket,
        Self::Sparkles,
        Self::Sun,
        Self::Moon,
    ];

    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Target => "#3B82F6",
            Self::Shopping | Self::Trending => "#10B981",
            Self::Heart | Self::Gift => "#EF4444",
            Self::Star | Self::Trophy | Self::Crown => "#F59E0B",
            Self::Zap => "#8B5CF6",
            Self::Building => "#6B7280",
            Self::Coffee => "#92400E",
            Self::Camera => "#374151",
            Self::Music => "#7C3AED",
            Self::Games | Self::Location => "#DC2626",
            Self::Car => "#059669",
            Self::Plane => "#2563EB",
            Self::Users => "#7C2D12",
            Self::Money => "#15803D",
            Self::Shield => "#1D4ED8",
            Self::Rocket => "#C2410C",
            Self::Sparkles => "#A855F7",
            Self::Sun => "#EA580C",
            Self::Moon => "#4338CA",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignIcon {
    pub kind: IconKind,
    pub color: String,
}

impl CampaignIcon {
    /// Icon with its predefined colour.
    pub fn preset(kind: IconKind) -> Self {
        Self {
            kind,
            color: kind.default_color().to_string(),
        }
    }
}

// ─── Hierarchy ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ad {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default = "default_expanded")]
    pub is_expanded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ads: Vec<Ad>,
    /// Derived from `ads`; overwritten on every recomputation.
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default = "default_expanded")]
    pub is_expanded: bool,
    /// Only counted when the owning campaign is ABO.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ad_sets: Vec<AdSet>,
    /// Derived from `ad_sets`; overwritten on every recomputation.
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default = "default_expanded")]
    pub is_expanded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<CampaignIcon>,
    #[serde(default)]
    pub budget_type: BudgetType,
    /// Only counted when `budget_type` is CBO.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<f64>,
}

fn default_expanded() -> bool {
    true
}

/// Anything that carries a metric list the aggregator can read.
pub trait HasMetrics {
    fn metrics(&self) -> &[Metric];
}

impl HasMetrics for Ad {
    fn metrics(&self) -> &[Metric] {
        &self.metrics
    }
}

impl HasMetrics for AdSet {
    fn metrics(&self) -> &[Metric] {
        &self.metrics
    }
}

impl HasMetrics for Campaign {
    fn metrics(&self) -> &[Metric] {
        &self.metrics
    }
}
