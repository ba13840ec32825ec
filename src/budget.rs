//! Budget Summarizer
//!
//! Reduces one jump's purchased assets into the CP totals the UI shows:
//! gross cost, discount and freebie tracking, drawback credit, and the
//! resulting balance against the jump's budget.

use serde::Serialize;

use crate::domain::{AssetType, JumpAsset};

/// CP totals for one jump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Gross cost x quantity of non-drawback, non-freebie purchases
    pub total_cost: i64,
    /// Half-cost sum of discounted purchases
    pub discounted: i64,
    /// Gross value of freebie purchases (tracked, never charged)
    pub freebies: i64,
    /// What the jump actually pays: full cost for normal purchases,
    /// half for discounted ones, nothing for freebies
    pub net_cost: i64,
    /// CP earned from drawbacks (freebie drawbacks included)
    pub drawback_credit: i64,
    /// budget + drawback_credit - net_cost
    pub balance: i64,
}

/// Summarize a jump's assets against its CP budget.
///
/// Quantity defaults to 1 when non-positive and cost floors at 0, so
/// degenerate records reduce to zeros instead of failing.
pub fn summarize_jump_budget(budget: i64, assets: &[JumpAsset]) -> BudgetSummary {
    let mut summary = BudgetSummary::default();

    for asset in assets {
        let gross = asset.gross_value();

        if asset.asset_type == AssetType::Drawback {
            summary.drawback_credit += gross;
        } else if asset.freebie {
            summary.freebies += gross;
        } else {
            summary.total_cost += gross;
            if asset.discount {
                summary.discounted += gross / 2;
            }
            summary.net_cost += asset.net_cost();
        }
    }

    summary.balance = budget + summary.drawback_credit - summary.net_cost;
    summary
}
