//! Identifier generation for tree nodes and authored metrics.

use campaign_core::config::IdStrategy;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Campaign,
    AdSet,
    Ad,
    Metric,
}

impl IdKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::AdSet => "adset",
            Self::Ad => "ad",
            Self::Metric => "metric",
        }
    }
}

/// Source of fresh, unique ids. Every call must return an id never handed out before.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, kind: IdKind) -> String;
}

/// `"{prefix}-{uuid v4}"` ids.
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self, kind: IdKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4())
    }
}

/// `"{prefix}-{n}"` ids with one counter per kind, starting at 1.
#[derive(Default)]
pub struct SequentialIds {
    counters: DashMap<IdKind, u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, kind: IdKind) -> String {
        let mut counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        format!("{}-{}", kind.prefix(), *counter)
    }
}

pub fn id_generator(strategy: IdStrategy) -> Box<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Box::new(UuidIds),
        IdStrategy::Sequential => Box::new(SequentialIds::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_count_per_kind() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(IdKind::Campaign), "campaign-1");
        assert_eq!(ids.next_id(IdKind::AdSet), "adset-1");
        assert_eq!(ids.next_id(IdKind::Campaign), "campaign-2");
        assert_eq!(ids.next_id(IdKind::Metric), "metric-1");
    }

    #[test]
    fn test_uuid_ids_are_prefixed_and_unique() {
        let ids = UuidIds;
        let a = ids.next_id(IdKind::Ad);
        let b = ids.next_id(IdKind::Ad);
        assert!(a.starts_with("ad-"));
        assert_ne!(a, b);
    }
}
