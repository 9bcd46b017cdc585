//! Daily budget totals across campaigns.
//!
//! CBO campaigns contribute their own daily budget; ABO campaigns contribute
//! the sum of their ad sets' daily budgets. Missing budgets count as zero.

use campaign_core::{BudgetType, Campaign};

/// Daily budget one campaign contributes under its budget mode.
pub fn campaign_daily_budget(campaign: &Campaign) -> f64 {
    match campaign.budget_type {
        BudgetType::Cbo => campaign.daily_budget.unwrap_or(0.0),
        BudgetType::Abo => campaign
            .ad_sets
            .iter()
            .map(|ad_set| ad_set.daily_budget.unwrap_or(0.0))
            .sum(),
    }
}

/// Total daily budget of the dashboard.
pub fn total_daily_budget(campaigns: &[Campaign]) -> f64 {
    campaigns.iter().map(campaign_daily_budget).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::AdSet;

    fn ad_set(id: &str, daily_budget: Option<f64>) -> AdSet {
        AdSet {
            id: id.to_string(),
            name: id.to_string(),
            ads: Vec::new(),
            metrics: Vec::new(),
            is_expanded: true,
            daily_budget,
        }
    }

    fn campaign(
        budget_type: BudgetType,
        daily_budget: Option<f64>,
        ad_sets: Vec<AdSet>,
    ) -> Campaign {
        Campaign {
            id: "c".to_string(),
            name: "c".to_string(),
            ad_sets,
            metrics: Vec::new(),
            is_expanded: true,
            icon: None,
            budget_type,
            daily_budget,
        }
    }

    #[test]
    fn test_cbo_ignores_ad_set_budgets() {
        let c = campaign(
            BudgetType::Cbo,
            Some(100.0),
            vec![ad_set("a", Some(10.0)), ad_set("b", Some(20.0))],
        );
        assert!((total_daily_budget(&[c]) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_abo_ignores_campaign_budget() {
        let c = campaign(
            BudgetType::Abo,
            Some(500.0),
            vec![ad_set("a", Some(10.0)), ad_set("b", Some(20.0)), ad_set("c", None)],
        );
        assert!((total_daily_budget(&[c]) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_budgets_count_as_zero() {
        let cbo = campaign(BudgetType::Cbo, None, Vec::new());
        let abo = campaign(BudgetType::Abo, None, Vec::new());
        assert_eq!(total_daily_budget(&[cbo, abo]), 0.0);
        assert_eq!(total_daily_budget(&[]), 0.0);
    }

    #[test]
    fn test_mixed_modes_sum() {
        let cbo = campaign(BudgetType::Cbo, Some(75.5), vec![ad_set("x", Some(1000.0))]);
        let abo = campaign(BudgetType::Abo, Some(1000.0), vec![ad_set("y", Some(24.5))]);
        assert!((total_daily_budget(&[cbo, abo]) - 100.0).abs() < f64::EPSILON);
    }
}
