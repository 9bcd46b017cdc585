//! Hierarchy store: the only writer of the campaign → ad set → ad tree.
//!
//! Every mutation works on a copy of the current snapshot, recomputes the
//! derived metrics, budget and selection, then swaps the copy in. Snapshots
//! already handed out are never touched. Operations addressing a node that
//! does not exist, or carrying a blank name, leave the snapshot as it was.

use crate::ids::{id_generator, IdGenerator, IdKind};
use crate::models::{DashboardCommand, DashboardData, ItemPath};
use campaign_core::config::SelectionConfig;
use campaign_core::{
    Ad, AdSet, AppConfig, BudgetType, Campaign, CampaignIcon, MediaType, Metric, MetricDraft,
};
use campaign_reporting::{aggregate, total_daily_budget};
use std::sync::Arc;
use tracing::{debug, info};

const COPY_SUFFIX: &str = " (Copy)";

pub struct DashboardStore {
    data: Arc<DashboardData>,
    ids: Box<dyn IdGenerator>,
    selection_config: SelectionConfig,
}

impl DashboardStore {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_id_generator(id_generator(config.ids.strategy), config.selection.clone())
    }

    pub fn with_id_generator(ids: Box<dyn IdGenerator>, selection_config: SelectionConfig) -> Self {
        info!("Dashboard store initialized");
        Self {
            data: Arc::new(DashboardData::default()),
            ids,
            selection_config,
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<DashboardData> {
        Arc::clone(&self.data)
    }

    // ─── Creation ──────────────────────────────────────────────────────────

    pub fn create_campaign(
        &mut self,
        name: &str,
        budget_type: BudgetType,
        daily_budget: Option<f64>,
    ) -> Option<String> {
        let name = clean_name(name)?;
        let mut created = None;
        self.mutate("create_campaign", true, |data, ids| {
            let id = ids.next_id(IdKind::Campaign);
            data.campaigns.push(Campaign {
                id: id.clone(),
                name,
                ad_sets: Vec::new(),
                metrics: Vec::new(),
                is_expanded: true,
                icon: None,
                budget_type,
                daily_budget,
            });
            created = Some(id);
            true
        });
        if let Some(id) = &created {
            info!(campaign_id = %id, ?budget_type, "Campaign created");
        }
        created
    }

    pub fn create_ad_set(
        &mut self,
        campaign_id: &str,
        name: &str,
        daily_budget: Option<f64>,
    ) -> Option<String> {
        let name = clean_name(name)?;
        let mut created = None;
        self.mutate("create_ad_set", true, |data, ids| {
            let Some(campaign) = data.campaign_mut(campaign_id) else {
                return false;
            };
            let id = ids.next_id(IdKind::AdSet);
            campaign.ad_sets.push(AdSet {
                id: id.clone(),
                name,
                ads: Vec::new(),
                metrics: Vec::new(),
                is_expanded: true,
                daily_budget,
            });
            created = Some(id);
            true
        });
        if let Some(id) = &created {
            info!(campaign_id = %campaign_id, ad_set_id = %id, "Ad set created");
        }
        created
    }

    /// Append an ad. Drafts with blank names are dropped.
    pub fn create_ad(
        &mut self,
        campaign_id: &str,
        ad_set_id: &str,
        name: &str,
        metrics: Vec<MetricDraft>,
        media_url: Option<String>,
        media_type: Option<MediaType>,
    ) -> Option<String> {
        let name = clean_name(name)?;
        let mut created = None;
        self.mutate("create_ad", true, |data, ids| {
            let Some(ad_set) = data.ad_set_mut(campaign_id, ad_set_id) else {
                return false;
            };
            let id = ids.next_id(IdKind::Ad);
            let metrics = metrics
                .into_iter()
                .filter(|draft| !draft.name.trim().is_empty())
                .filter_map(|draft| author_metric(ids.next_id(IdKind::Metric), draft))
                .collect();
            ad_set.ads.push(Ad {
                id: id.clone(),
                name,
                media_url,
                media_type,
                metrics,
                is_expanded: true,
            });
            created = Some(id);
            true
        });
        if let Some(id) = &created {
            info!(
                campaign_id = %campaign_id,
                ad_set_id = %ad_set_id,
                ad_id = %id,
                "Ad created"
            );
        }
        created
    }

    // ─── Structural edits ──────────────────────────────────────────────────

    /// Deep-copy a node with fresh ids and insert it right after the original.
    /// Returns the id of the copy.
    pub fn duplicate(&mut self, path: &ItemPath) -> Option<String> {
        let mut created = None;
        self.mutate("duplicate", true, |data, ids| {
            let copy_id = match path {
                ItemPath::Campaign { campaign_id } => {
                    let Some(pos) = data.campaigns.iter().position(|c| &c.id == campaign_id)
                    else {
                        return false;
                    };
                    let mut copy = data.campaigns[pos].clone();
                    reissue_campaign(&mut copy, ids);
                    copy.name.push_str(COPY_SUFFIX);
                    let id = copy.id.clone();
                    data.campaigns.insert(pos + 1, copy);
                    id
                }
                ItemPath::AdSet {
                    campaign_id,
                    ad_set_id,
                } => {
                    let Some(campaign) = data.campaign_mut(campaign_id) else {
                        return false;
                    };
                    let Some(pos) = campaign.ad_sets.iter().position(|s| &s.id == ad_set_id)
                    else {
                        return false;
                    };
                    let mut copy = campaign.ad_sets[pos].clone();
                    reissue_ad_set(&mut copy, ids);
                    copy.name.push_str(COPY_SUFFIX);
                    let id = copy.id.clone();
                    campaign.ad_sets.insert(pos + 1, copy);
                    id
                }
                ItemPath::Ad {
                    campaign_id,
                    ad_set_id,
                    ad_id,
                } => {
                    let Some(ad_set) = data.ad_set_mut(campaign_id, ad_set_id) else {
                        return false;
                    };
                    let Some(pos) = ad_set.ads.iter().position(|a| &a.id == ad_id) else {
                        return false;
                    };
                    let mut copy = ad_set.ads[pos].clone();
                    reissue_ad(&mut copy, ids);
                    copy.name.push_str(COPY_SUFFIX);
                    let id = copy.id.clone();
                    ad_set.ads.insert(pos + 1, copy);
                    id
                }
            };
            created = Some(copy_id);
            true
        });
        if let Some(id) = &created {
            info!(kind = path.kind(), copy_id = %id, "Item duplicated");
        }
        created
    }

    /// Remove a node and its subtree.
    pub fn delete(&mut self, path: &ItemPath) -> bool {
        let removed = self.mutate("delete", true, |data, _| match path {
            ItemPath::Campaign { campaign_id } => {
                remove_where(&mut data.campaigns, |c| &c.id == campaign_id)
            }
            ItemPath::AdSet {
                campaign_id,
                ad_set_id,
            } => data
                .campaign_mut(campaign_id)
                .is_some_and(|c| remove_where(&mut c.ad_sets, |s| &s.id == ad_set_id)),
            ItemPath::Ad {
                campaign_id,
                ad_set_id,
                ad_id,
            } => data
                .ad_set_mut(campaign_id, ad_set_id)
                .is_some_and(|s| remove_where(&mut s.ads, |a| &a.id == ad_id)),
        });
        if removed {
            info!(kind = path.kind(), "Item deleted");
        }
        removed
    }

    /// Set a node's name. Blank names are ignored.
    pub fn rename(&mut self, path: &ItemPath, new_name: &str) -> bool {
        let Some(name) = clean_name(new_name) else {
            debug!(kind = path.kind(), "Ignoring blank rename");
            return false;
        };
        self.mutate("rename", true, |data, _| match name_slot(data, path) {
            Some(slot) => {
                *slot = name;
                true
            }
            None => false,
        })
    }

    /// Set a campaign's name and icon together.
    pub fn edit_campaign_icon(
        &mut self,
        campaign_id: &str,
        name: &str,
        icon: Option<CampaignIcon>,
    ) -> bool {
        let Some(name) = clean_name(name) else {
            debug!(campaign_id = %campaign_id, "Ignoring blank campaign name");
            return false;
        };
        self.mutate("edit_campaign_icon", true, |data, _| {
            let Some(campaign) = data.campaign_mut(campaign_id) else {
                return false;
            };
            campaign.name = name;
            campaign.icon = icon;
            true
        })
    }

    /// Flip a node's expanded flag. Derived data is left as is.
    pub fn toggle_expanded(&mut self, path: &ItemPath) -> bool {
        self.mutate("toggle_expanded", false, |data, _| {
            let flag = match path {
                ItemPath::Campaign { campaign_id } => {
                    data.campaign_mut(campaign_id).map(|c| &mut c.is_expanded)
                }
                ItemPath::AdSet {
                    campaign_id,
                    ad_set_id,
                } => data
                    .ad_set_mut(campaign_id, ad_set_id)
                    .map(|s| &mut s.is_expanded),
                ItemPath::Ad {
                    campaign_id,
                    ad_set_id,
                    ad_id,
                } => data
                    .ad_mut(campaign_id, ad_set_id, ad_id)
                    .map(|a| &mut a.is_expanded),
            };
            match flag {
                Some(flag) => {
                    *flag = !*flag;
                    true
                }
                None => false,
            }
        })
    }

    // ─── Ad metrics ────────────────────────────────────────────────────────

    pub fn add_ad_metric(
        &mut self,
        campaign_id: &str,
        ad_set_id: &str,
        ad_id: &str,
        draft: MetricDraft,
    ) -> Option<String> {
        clean_name(&draft.name)?;
        let mut created = None;
        self.mutate("add_ad_metric", true, |data, ids| {
            let Some(ad) = data.ad_mut(campaign_id, ad_set_id, ad_id) else {
                return false;
            };
            let Some(metric) = author_metric(ids.next_id(IdKind::Metric), draft) else {
                return false;
            };
            created = Some(metric.id.clone());
            ad.metrics.push(metric);
            true
        });
        created
    }

    pub fn edit_ad_metric(
        &mut self,
        campaign_id: &str,
        ad_set_id: &str,
        ad_id: &str,
        metric_id: &str,
        draft: MetricDraft,
    ) -> bool {
        if clean_name(&draft.name).is_none() {
            debug!(metric_id = %metric_id, "Ignoring blank metric name");
            return false;
        }
        self.mutate("edit_ad_metric", true, |data, _| {
            let Some(metric) = data
                .ad_mut(campaign_id, ad_set_id, ad_id)
                .and_then(|ad| ad.metrics.iter_mut().find(|m| m.id == metric_id))
            else {
                return false;
            };
            match author_metric(metric.id.clone(), draft) {
                Some(edited) => {
                    *metric = edited;
                    true
                }
                None => false,
            }
        })
    }

    pub fn delete_ad_metric(
        &mut self,
        campaign_id: &str,
        ad_set_id: &str,
        ad_id: &str,
        metric_id: &str,
    ) -> bool {
        self.mutate("delete_ad_metric", true, |data, _| {
            data.ad_mut(campaign_id, ad_set_id, ad_id)
                .is_some_and(|ad| remove_where(&mut ad.metrics, |m| m.id == metric_id))
        })
    }

    // ─── Overview selection ────────────────────────────────────────────────

    /// Flip one overview metric in or out of the selection. Unknown ids are ignored.
    pub fn toggle_metric(&mut self, metric_id: &str) -> bool {
        self.mutate("toggle_metric", false, |data, _| {
            if !data.overview_metrics.iter().any(|m| m.id == metric_id) {
                return false;
            }
            data.selection.toggle(metric_id);
            true
        })
    }

    pub fn select_all_metrics(&mut self) -> bool {
        self.mutate("select_all_metrics", false, |data, _| {
            let DashboardData {
                overview_metrics,
                selection,
                ..
            } = data;
            selection.select_all(overview_metrics)
        })
    }

    pub fn clear_all_metrics(&mut self) -> bool {
        self.mutate("clear_all_metrics", false, |data, _| {
            data.selection.clear_all()
        })
    }

    // ─── Commands ──────────────────────────────────────────────────────────

    /// Apply a command. Returns whether the snapshot changed.
    pub fn apply(&mut self, command: DashboardCommand) -> bool {
        match command {
            DashboardCommand::CreateCampaign {
                name,
                budget_type,
                daily_budget,
            } => self.create_campaign(&name, budget_type, daily_budget).is_some(),
            DashboardCommand::CreateAdSet {
                campaign_id,
                name,
                daily_budget,
            } => self.create_ad_set(&campaign_id, &name, daily_budget).is_some(),
            DashboardCommand::CreateAd {
                campaign_id,
                ad_set_id,
                name,
                metrics,
                media_url,
                media_type,
            } => self
                .create_ad(&campaign_id, &ad_set_id, &name, metrics, media_url, media_type)
                .is_some(),
            DashboardCommand::Duplicate { path } => self.duplicate(&path).is_some(),
            DashboardCommand::Delete { path } => self.delete(&path),
            DashboardCommand::Rename { path, name } => self.rename(&path, &name),
            DashboardCommand::ToggleExpanded { path } => self.toggle_expanded(&path),
            DashboardCommand::EditCampaignIcon {
                campaign_id,
                name,
                icon,
            } => self.edit_campaign_icon(&campaign_id, &name, icon),
            DashboardCommand::AddAdMetric {
                campaign_id,
                ad_set_id,
                ad_id,
                metric,
            } => self
                .add_ad_metric(&campaign_id, &ad_set_id, &ad_id, metric)
                .is_some(),
            DashboardCommand::EditAdMetric {
                campaign_id,
                ad_set_id,
                ad_id,
                metric_id,
                metric,
            } => self.edit_ad_metric(&campaign_id, &ad_set_id, &ad_id, &metric_id, metric),
            DashboardCommand::DeleteAdMetric {
                campaign_id,
                ad_set_id,
                ad_id,
                metric_id,
            } => self.delete_ad_metric(&campaign_id, &ad_set_id, &ad_id, &metric_id),
            DashboardCommand::ToggleMetric { metric_id } => self.toggle_metric(&metric_id),
            DashboardCommand::SelectAllMetrics => self.select_all_metrics(),
            DashboardCommand::ClearAllMetrics => self.clear_all_metrics(),
        }
    }

    // -- internal helpers ---------------------------------------------------

    /// Run `edit` on a copy of the snapshot and publish it if `edit` reports a change.
    fn mutate<F>(&mut self, op: &'static str, recompute: bool, edit: F) -> bool
    where
        F: FnOnce(&mut DashboardData, &dyn IdGenerator) -> bool,
    {
        let mut next = DashboardData::clone(&self.data);
        if !edit(&mut next, &*self.ids) {
            debug!(op = %op, "Nothing to change, snapshot unchanged");
            return false;
        }
        if recompute {
            recompute_derived(&mut next, &self.selection_config);
        }
        self.data = Arc::new(next);
        true
    }
}

/// Refresh every derived field from the ads up: ad set metrics, campaign
/// metrics, overview metrics, total daily budget, then the selection.
pub fn recompute_derived(data: &mut DashboardData, selection_config: &SelectionConfig) {
    for campaign in &mut data.campaigns {
        for ad_set in &mut campaign.ad_sets {
            ad_set.metrics = aggregate(&ad_set.ads);
        }
        campaign.metrics = aggregate(&campaign.ad_sets);
    }
    data.overview_metrics = aggregate(&data.campaigns);
    data.total_daily_budget = total_daily_budget(&data.campaigns);
    data.selection = data
        .selection
        .reconcile(&data.overview_metrics, selection_config);
    debug!(
        campaigns = data.campaigns.len(),
        overview_metrics = data.overview_metrics.len(),
        total_daily_budget = data.total_daily_budget,
        "Derived data recomputed"
    );
}

fn clean_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn author_metric(id: String, draft: MetricDraft) -> Option<Metric> {
    Some(Metric {
        id,
        name: clean_name(&draft.name)?,
        value: draft.value,
        metric_type: draft.metric_type,
    })
}

fn remove_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !pred(item));
    items.len() != before
}

fn name_slot<'a>(data: &'a mut DashboardData, path: &ItemPath) -> Option<&'a mut String> {
    match path {
        ItemPath::Campaign { campaign_id } => data.campaign_mut(campaign_id).map(|c| &mut c.name),
        ItemPath::AdSet {
            campaign_id,
            ad_set_id,
        } => data.ad_set_mut(campaign_id, ad_set_id).map(|s| &mut s.name),
        ItemPath::Ad {
            campaign_id,
            ad_set_id,
            ad_id,
        } => data
            .ad_mut(campaign_id, ad_set_id, ad_id)
            .map(|a| &mut a.name),
    }
}

fn reissue_campaign(campaign: &mut Campaign, ids: &dyn IdGenerator) {
    campaign.id = ids.next_id(IdKind::Campaign);
    for ad_set in &mut campaign.ad_sets {
        reissue_ad_set(ad_set, ids);
    }
}

fn reissue_ad_set(ad_set: &mut AdSet, ids: &dyn IdGenerator) {
    ad_set.id = ids.next_id(IdKind::AdSet);
    for ad in &mut ad_set.ads {
        reissue_ad(ad, ids);
    }
}

fn reissue_ad(ad: &mut Ad, ids: &dyn IdGenerator) {
    ad.id = ids.next_id(IdKind::Ad);
    for metric in &mut ad.metrics {
        metric.id = ids.next_id(IdKind::Metric);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
