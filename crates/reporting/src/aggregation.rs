//! Metric roll-up across sibling entities.
//!
//! Metrics are grouped by exact name; each group is combined according to the
//! type of its first occurrence and emitted in first-seen order.

use campaign_core::{HasMetrics, Metric, MetricType};
use std::collections::HashMap;
use tracing::warn;

struct MetricGroup<'a> {
    name: &'a str,
    metric_type: MetricType,
    values: Vec<f64>,
}

impl MetricGroup<'_> {
    fn combine(&self) -> f64 {
        let total: f64 = self.values.iter().sum();
        match self.metric_type {
            MetricType::Sum => total,
            // Percentages are averaged, never summed.
            MetricType::Average | MetricType::Percentage => total / self.values.len() as f64,
        }
    }
}

/// Id of a derived metric. Stable for a given name and type.
pub fn derived_metric_id(name: &str, metric_type: MetricType) -> String {
    format!("{name}-{metric_type}")
}

/// Combine the metrics of `items` into one metric per distinct name.
pub fn aggregate<T: HasMetrics>(items: &[T]) -> Vec<Metric> {
    let mut groups: Vec<MetricGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for metric in items.iter().flat_map(|item| item.metrics()) {
        match index.get(metric.name.as_str()) {
            Some(&i) => {
                let group = &mut groups[i];
                if group.metric_type != metric.metric_type {
                    warn!(
                        metric = %metric.name,
                        kept = %group.metric_type,
                        ignored = %metric.metric_type,
                        "Mixed metric types under one name, keeping first seen"
                    );
                }
                group.values.push(metric.value);
            }
            None => {
                index.insert(metric.name.as_str(), groups.len());
                groups.push(MetricGroup {
                    name: metric.name.as_str(),
                    metric_type: metric.metric_type,
                    values: vec![metric.value],
                });
            }
        }
    }

    groups
        .iter()
        .map(|group| Metric {
            id: derived_metric_id(group.name, group.metric_type),
            name: group.name.to_string(),
            value: group.combine(),
            metric_type: group.metric_type,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(Vec<Metric>);

    impl HasMetrics for Item {
        fn metrics(&self) -> &[Metric] {
            &self.0
        }
    }

    fn metric(name: &str, value: f64, metric_type: MetricType) -> Metric {
        Metric {
            id: format!("m-{name}-{value}"),
            name: name.to_string(),
            value,
            metric_type,
        }
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<Item> = Vec::new();
        assert!(aggregate(&items).is_empty());
    }

    #[test]
    fn test_sum() {
        let items = vec![
            Item(vec![metric("Clicks", 10.0, MetricType::Sum)]),
            Item(vec![metric("Clicks", 20.0, MetricType::Sum)]),
            Item(vec![metric("Clicks", 12.5, MetricType::Sum)]),
        ];
        let out = aggregate(&items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "Clicks-sum");
        assert!((out[0].value - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_and_percentage_are_means() {
        let items = vec![
            Item(vec![
                metric("CPC", 2.0, MetricType::Average),
                metric("CTR", 1.0, MetricType::Percentage),
            ]),
            Item(vec![
                metric("CPC", 4.0, MetricType::Average),
                metric("CTR", 4.0, MetricType::Percentage),
            ]),
        ];
        let out = aggregate(&items);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "CPC");
        assert!((out[0].value - 3.0).abs() < f64::EPSILON);
        assert_eq!(out[1].id, "CTR-percentage");
        assert!((out[1].value - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_value_passes_through() {
        let items = vec![Item(vec![metric("CTR", 3.7, MetricType::Percentage)])];
        let out = aggregate(&items);
        assert!((out[0].value - 3.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_groups_by_exact_name_in_first_seen_order() {
        let items = vec![
            Item(vec![metric("Leads", 1.0, MetricType::Sum)]),
            Item(vec![
                metric("leads", 5.0, MetricType::Sum),
                metric("Leads", 2.0, MetricType::Sum),
            ]),
        ];
        let out = aggregate(&items);
        let names: Vec<&str> = out.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Leads", "leads"]);
        assert!((out[0].value - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mixed_types_keep_first_seen() {
        let items = vec![
            Item(vec![metric("Reach", 10.0, MetricType::Average)]),
            Item(vec![metric("Reach", 30.0, MetricType::Sum)]),
        ];
        let out = aggregate(&items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].metric_type, MetricType::Average);
        assert!((out[0].value - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_items_without_metrics_do_not_dilute_averages() {
        let items = vec![
            Item(vec![metric("CPM", 8.0, MetricType::Average)]),
            Item(Vec::new()),
        ];
        let out = aggregate(&items);
        assert!((out[0].value - 8.0).abs() < f64::EPSILON);
    }
}
