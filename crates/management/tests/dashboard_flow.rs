//! End-to-end flows through the command model, the way the CLI and UI drive the store.

use campaign_core::config::SelectionConfig;
use campaign_core::{BudgetType, Metric, MetricDraft, MetricType};
use campaign_management::{DashboardCommand, DashboardStore, ItemPath, SequentialIds};
use pretty_assertions::assert_eq;

fn store(selection: SelectionConfig) -> DashboardStore {
    DashboardStore::with_id_generator(Box::new(SequentialIds::new()), selection)
}

fn clicks(metrics: &[Metric]) -> Option<f64> {
    metrics.iter().find(|m| m.name == "Clicks").map(|m| m.value)
}

fn run_script(store: &mut DashboardStore, script: &str) -> Vec<bool> {
    let commands: Vec<DashboardCommand> = serde_json::from_str(script).expect("valid script");
    commands.into_iter().map(|c| store.apply(c)).collect()
}

const SCRIPT: &str = r#"[
    {"op": "create_campaign", "name": "Black Friday", "budget_type": "CBO", "daily_budget": 100},
    {"op": "create_ad_set", "campaign_id": "campaign-1", "name": "Lookalike", "daily_budget": 10},
    {"op": "create_ad_set", "campaign_id": "campaign-1", "name": "Retargeting", "daily_budget": 20},
    {"op": "create_ad", "campaign_id": "campaign-1", "ad_set_id": "adset-1", "name": "Carousel",
     "metrics": [{"name": "Clicks", "value": 10, "type": "sum"}, {"name": "CTR", "value": 1.0, "type": "percentage"}]},
    {"op": "create_ad", "campaign_id": "campaign-1", "ad_set_id": "adset-1", "name": "Video",
     "metrics": [{"name": "Clicks", "value": 20, "type": "sum"}, {"name": "CTR", "value": 3.0, "type": "percentage"}],
     "media_url": "https://cdn.example.com/v.mp4", "media_type": "video"},
    {"op": "create_ad", "campaign_id": "campaign-1", "ad_set_id": "adset-2", "name": "Static",
     "metrics": [{"name": "Clicks", "value": 5, "type": "sum"}]},
    {"op": "create_campaign", "name": "Always On", "budget_type": "ABO", "daily_budget": 999},
    {"op": "create_ad_set", "campaign_id": "campaign-2", "name": "Broad", "daily_budget": 12.5},
    {"op": "create_ad_set", "campaign_id": "campaign-2", "name": "Interests", "daily_budget": 7.5}
]"#;

#[test]
fn test_script_builds_consistent_snapshot() {
    let mut s = store(SelectionConfig::default());
    let applied = run_script(&mut s, SCRIPT);
    assert!(applied.iter().all(|ok| *ok));

    let snap = s.snapshot();
    let campaign = snap.campaign("campaign-1").unwrap();
    assert_eq!(clicks(&campaign.ad_sets[0].metrics), Some(30.0));
    assert_eq!(clicks(&campaign.ad_sets[1].metrics), Some(5.0));
    assert_eq!(clicks(&campaign.metrics), Some(35.0));
    assert_eq!(clicks(&snap.overview_metrics), Some(35.0));

    // CBO 100 (ad set budgets ignored) + ABO 12.5 + 7.5 (campaign budget ignored).
    assert!((snap.total_daily_budget - 120.0).abs() < f64::EPSILON);

    let ids: Vec<&str> = snap.selection.ids().iter().map(String::as_str).collect();
    assert_eq!(ids, vec!["CTR-percentage", "Clicks-sum"]);
}

#[test]
fn test_cleared_selection_is_not_refilled() {
    let mut s = store(SelectionConfig::default());
    run_script(&mut s, SCRIPT);
    assert!(s.clear_all_metrics());

    s.add_ad_metric(
        "campaign-1",
        "adset-2",
        "ad-3",
        MetricDraft::new("Leads", 4.0, MetricType::Sum),
    )
    .unwrap();
    let snap = s.snapshot();
    assert_eq!(snap.overview_metrics.len(), 3);
    assert!(snap.selection.is_empty());
}

#[test]
fn test_cleared_selection_refills_with_legacy_policy() {
    let mut s = store(SelectionConfig {
        auto_select_after_clear: true,
    });
    run_script(&mut s, SCRIPT);
    s.clear_all_metrics();
    assert!(s.snapshot().selection.is_empty());

    s.add_ad_metric(
        "campaign-1",
        "adset-2",
        "ad-3",
        MetricDraft::new("Leads", 4.0, MetricType::Sum),
    );
    assert_eq!(s.snapshot().selection.ids().len(), 3);
}

#[test]
fn test_old_snapshots_are_never_mutated() {
    let mut s = store(SelectionConfig::default());
    run_script(&mut s, SCRIPT);
    let before = s.snapshot();
    let frozen = (*before).clone();

    s.duplicate(&ItemPath::campaign("campaign-1")).unwrap();
    s.delete(&ItemPath::ad("campaign-1", "adset-1", "ad-1"));
    s.rename(&ItemPath::ad_set("campaign-2", "adset-3"), "Broad US");
    s.toggle_expanded(&ItemPath::campaign("campaign-2"));

    assert_eq!(*before, frozen);
    let after = s.snapshot();
    assert_eq!(after.campaigns.len(), 3);
    assert_eq!(after.campaigns[1].name, "Black Friday (Copy)");
    // The copy keeps both Clicks ads, the original lost one.
    let total = clicks(&after.overview_metrics).unwrap();
    assert!((total - 60.0).abs() < f64::EPSILON);
    assert!((after.total_daily_budget - 220.0).abs() < f64::EPSILON);
}

#[test]
fn test_unresolved_paths_are_silent_noops() {
    let mut s = store(SelectionConfig::default());
    run_script(&mut s, SCRIPT);
    let before = s.snapshot();

    let results = run_script(
        &mut s,
        r#"[
            {"op": "delete", "path": {"kind": "ad", "campaign_id": "campaign-2", "ad_set_id": "adset-1", "ad_id": "ad-1"}},
            {"op": "rename", "path": {"kind": "campaign", "campaign_id": "campaign-1"}, "name": "  "},
            {"op": "create_ad", "campaign_id": "campaign-9", "ad_set_id": "adset-1", "name": "Ghost"},
            {"op": "delete_ad_metric", "campaign_id": "campaign-1", "ad_set_id": "adset-1", "ad_id": "ad-1", "metric_id": "metric-99"},
            {"op": "toggle_metric", "metric_id": "Ghost-sum"}
        ]"#,
    );
    assert_eq!(results, vec![false; 5]);
    assert_eq!(*before, *s.snapshot());
}

#[test]
fn test_campaign_budget_mode_is_fixed_per_campaign() {
    let mut s = store(SelectionConfig::default());
    let c = s.create_campaign("ABO", BudgetType::Abo, Some(50.0)).unwrap();
    assert_eq!(s.snapshot().total_daily_budget, 0.0);
    s.create_ad_set(&c, "Only", Some(15.0));
    assert!((s.snapshot().total_daily_budget - 15.0).abs() < f64::EPSILON);
}

#[test]
fn test_select_all_before_any_metric_keeps_auto_select() {
    let mut s = store(SelectionConfig::default());
    assert!(!s.select_all_metrics());
    let c = s.create_campaign("C", BudgetType::Cbo, None).unwrap();
    let set = s.create_ad_set(&c, "S", None).unwrap();
    s.create_ad(
        &c,
        &set,
        "A",
        vec![MetricDraft::new("Clicks", 3.0, MetricType::Sum)],
        None,
        None,
    )
    .unwrap();

    let snap = s.snapshot();
    let ids: Vec<&str> = snap.selection.ids().iter().map(String::as_str).collect();
    assert_eq!(ids, vec!["Clicks-sum"]);
}

#[test]
fn test_selection_emptied_by_deletion_refills_with_new_metrics() {
    let mut s = store(SelectionConfig::default());
    let c = s.create_campaign("C", BudgetType::Cbo, None).unwrap();
    let set = s.create_ad_set(&c, "S", None).unwrap();
    let ad = s
        .create_ad(
            &c,
            &set,
            "A",
            vec![
                MetricDraft::new("Clicks", 3.0, MetricType::Sum),
                MetricDraft::new("CTR", 1.5, MetricType::Percentage),
            ],
            None,
            None,
        )
        .unwrap();
    assert!(s.toggle_metric("CTR-percentage"));

    assert!(s.delete(&ItemPath::ad(&c, &set, &ad)));
    assert!(s.snapshot().selection.is_empty());

    s.create_ad(
        &c,
        &set,
        "B",
        vec![MetricDraft::new("Leads", 2.0, MetricType::Sum)],
        None,
        None,
    )
    .unwrap();
    let snap = s.snapshot();
    let ids: Vec<&str> = snap.selection.ids().iter().map(String::as_str).collect();
    assert_eq!(ids, vec!["Leads-sum"]);
}

#[test]
fn test_repeated_selection_commands_report_no_change() {
    let mut s = store(SelectionConfig::default());
    run_script(&mut s, SCRIPT);
    let results = run_script(
        &mut s,
        r#"[
            {"op": "select_all_metrics"},
            {"op": "clear_all_metrics"},
            {"op": "clear_all_metrics"}
        ]"#,
    );
    assert_eq!(results, vec![false, true, false]);
}
