//! Statistics Aggregator
//!
//! Groups the full set of jumps, assets, inventory and profiles into the
//! summary views the statistics screen renders: per-jump CP rows,
//! per-asset-type rollups, inventory category rollups, gauntlet progress
//! and booster usage.
//!
//! All aggregation is pure and deterministic; every snapshot is recomputed
//! wholesale from a fresh set of records and never mutated in place.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    AssetType, ChainSettings, InventoryItem, Jump, JumpAsset, Profile, StorageScope,
};

/// Per-jump CP row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpCpRow {
    pub title: String,
    /// Status normalized to title case; "Unassigned" when blank
    pub status: String,
    pub budget: i64,
    pub spent: i64,
    /// Drawback credit earned
    pub earned: i64,
    /// budget + earned - spent
    pub net: i64,
}

/// Rollup of one asset type across all jumps
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeRollup {
    pub asset_type: AssetType,
    pub count: usize,
    /// Gross CP value (cost x quantity)
    pub gross: i64,
    /// Net cost under the discount/freebie policy; credit for drawbacks
    pub net: i64,
    pub discounted: usize,
    pub freebies: usize,
}

/// Rollup of one inventory category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCategoryRollup {
    pub category: String,
    pub item_count: usize,
    pub total_quantity: i64,
    pub warehouse: usize,
    pub locker: usize,
}

/// One gauntlet jump with its budget progress
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GauntletRow {
    pub title: String,
    pub budget: i64,
    pub spent: i64,
    /// spent / budget, unclamped; values above 1.0 signal overspend.
    /// Clamping for display is the presentation layer's call.
    pub progress: f64,
}

/// Gauntlet progress plus the pass-through house-rule flags
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GauntletRollup {
    pub allow_gauntlet: bool,
    pub gauntlet_halved: bool,
    pub rows: Vec<GauntletRow>,
}

/// Usage of one booster tag across character profiles
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterUsage {
    pub booster: String,
    pub count: usize,
    pub holders: Vec<String>,
}

/// Derived, read-only statistics view model. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub jump_rows: Vec<JumpCpRow>,
    pub asset_types: Vec<AssetTypeRollup>,
    pub inventory: Vec<InventoryCategoryRollup>,
    pub gauntlets: GauntletRollup,
    pub boosters: Vec<BoosterUsage>,
}

/// Normalize a free-text status to title case; blank becomes "Unassigned"
fn normalize_status(status: &str) -> String {
    let trimmed = status.trim();
    if trimmed.is_empty() {
        return "Unassigned".to_string();
    }

    trimmed
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn jump_rows(jumps: &[Jump]) -> Vec<JumpCpRow> {
    jumps
        .iter()
        .map(|jump| JumpCpRow {
            title: jump.title.clone(),
            status: normalize_status(&jump.status),
            budget: jump.budget,
            spent: jump.cp_spent,
            earned: jump.cp_income,
            net: jump.budget + jump.cp_income - jump.cp_spent,
        })
        .collect()
}

fn asset_type_rollups(assets: &[JumpAsset]) -> Vec<AssetTypeRollup> {
    AssetType::ALL
        .iter()
        .map(|&asset_type| {
            let mut rollup = AssetTypeRollup {
                asset_type,
                count: 0,
                gross: 0,
                net: 0,
                discounted: 0,
                freebies: 0,
            };
            for asset in assets.iter().filter(|a| a.asset_type == asset_type) {
                rollup.count += 1;
                rollup.gross += asset.gross_value();
                rollup.net += if asset_type == AssetType::Drawback {
                    asset.credit_value()
                } else {
                    asset.net_cost()
                };
                if asset.discount {
                    rollup.discounted += 1;
                }
                if asset.freebie {
                    rollup.freebies += 1;
                }
            }
            rollup
        })
        .collect()
}

fn inventory_rollups(inventory: &[InventoryItem]) -> Vec<InventoryCategoryRollup> {
    // BTreeMap keeps category order deterministic
    let mut by_category: BTreeMap<String, InventoryCategoryRollup> = BTreeMap::new();

    for item in inventory {
        let category = if item.category.trim().is_empty() {
            "Uncategorized".to_string()
        } else {
            item.category.trim().to_string()
        };

        let rollup = by_category
            .entry(category.clone())
            .or_insert_with(|| InventoryCategoryRollup {
                category,
                item_count: 0,
                total_quantity: 0,
                warehouse: 0,
                locker: 0,
            });

        rollup.item_count += 1;
        rollup.total_quantity += item.quantity.max(0);
        match item.scope {
            StorageScope::Warehouse => rollup.warehouse += 1,
            StorageScope::Locker => rollup.locker += 1,
        }
    }

    by_category.into_values().collect()
}

fn gauntlet_rollup(jumps: &[Jump], settings: &ChainSettings) -> GauntletRollup {
    let rows = jumps
        .iter()
        .filter(|jump| jump.is_gauntlet())
        .map(|jump| GauntletRow {
            title: jump.title.clone(),
            budget: jump.budget,
            spent: jump.cp_spent,
            progress: if jump.budget == 0 {
                0.0
            } else {
                jump.cp_spent as f64 / jump.budget as f64
            },
        })
        .collect();

    GauntletRollup {
        allow_gauntlet: settings.allow_gauntlet,
        gauntlet_halved: settings.gauntlet_halved,
        rows,
    }
}

fn booster_usage(profiles: &[Profile]) -> Vec<BoosterUsage> {
    let mut by_booster: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for profile in profiles {
        for booster in &profile.boosters {
            let tag = booster.trim();
            if tag.is_empty() {
                continue;
            }
            by_booster
                .entry(tag.to_string())
                .or_default()
                .push(profile.name.clone());
        }
    }

    by_booster
        .into_iter()
        .map(|(booster, holders)| BoosterUsage {
            booster,
            count: holders.len(),
            holders,
        })
        .collect()
}

/// Compute the full statistics snapshot from already-loaded records.
pub fn compute_statistics_snapshot(
    jumps: &[Jump],
    assets: &[JumpAsset],
    inventory: &[InventoryItem],
    profiles: &[Profile],
    settings: &ChainSettings,
) -> StatisticsSnapshot {
    StatisticsSnapshot {
        jump_rows: jump_rows(jumps),
        asset_types: asset_type_rollups(assets),
        inventory: inventory_rollups(inventory),
        gauntlets: gauntlet_rollup(jumps, settings),
        boosters: booster_usage(profiles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetType, StorageScope};

    fn jump(title: &str, status: &str, budget: i64, spent: i64, income: i64) -> Jump {
        let mut jump = Jump::new(0, title.to_string(), String::new());
        jump.status = status.to_string();
        jump.budget = budget;
        jump.cp_spent = spent;
        jump.cp_income = income;
        jump
    }

    fn snapshot_of_jumps(jumps: &[Jump]) -> StatisticsSnapshot {
        compute_statistics_snapshot(jumps, &[], &[], &[], &ChainSettings::default())
    }

    #[test]
    fn test_jump_rows_net_and_status_normalization() {
        let jumps = vec![
            jump("Kanto", "in progress", 1000, 600, 200),
            jump("Hoenn", "", 1000, 0, 0),
        ];
        let snapshot = snapshot_of_jumps(&jumps);

        assert_eq!(snapshot.jump_rows[0].status, "In Progress");
        assert_eq!(snapshot.jump_rows[0].net, 600);
        assert_eq!(snapshot.jump_rows[1].status, "Unassigned");
    }

    #[test]
    fn test_gauntlet_progress_unclamped() {
        let jumps = vec![
            jump("Trial", "Gauntlet", 1200, 1300, 0),
            jump("Normal", "planned", 1000, 500, 0),
        ];
        let snapshot = snapshot_of_jumps(&jumps);

        assert_eq!(snapshot.gauntlets.rows.len(), 1);
        let progress = snapshot.gauntlets.rows[0].progress;
        assert!((progress - 1300.0 / 1200.0).abs() < 1e-9);
        assert!(progress > 1.0);
    }

    #[test]
    fn test_gauntlet_zero_budget_degenerates_to_zero() {
        let jumps = vec![jump("Broke", "gauntlet", 0, 500, 0)];
        let snapshot = snapshot_of_jumps(&jumps);
        assert_eq!(snapshot.gauntlets.rows[0].progress, 0.0);
    }

    #[test]
    fn test_gauntlet_flags_pass_through() {
        let settings = ChainSettings {
            allow_gauntlet: false,
            gauntlet_halved: true,
            ..ChainSettings::default()
        };
        let snapshot = compute_statistics_snapshot(&[], &[], &[], &[], &settings);
        assert!(!snapshot.gauntlets.allow_gauntlet);
        assert!(snapshot.gauntlets.gauntlet_halved);
    }

    #[test]
    fn test_asset_type_rollup_policy() {
        let mut perk = JumpAsset::new(0, 1, "Flight".to_string(), AssetType::Perk, 400);
        perk.discount = true;
        let mut free_item = JumpAsset::new(0, 1, "Map".to_string(), AssetType::Item, 100);
        free_item.freebie = true;
        let drawback = JumpAsset::new(0, 1, "Hunted".to_string(), AssetType::Drawback, 300);

        let assets = vec![perk, free_item, drawback];
        let snapshot =
            compute_statistics_snapshot(&[], &assets, &[], &[], &ChainSettings::default());

        let perks = &snapshot.asset_types[1];
        assert_eq!(perks.asset_type, AssetType::Perk);
        assert_eq!(perks.count, 1);
        assert_eq!(perks.gross, 400);
        assert_eq!(perks.net, 200);
        assert_eq!(perks.discounted, 1);

        let items = &snapshot.asset_types[2];
        assert_eq!(items.net, 0);
        assert_eq!(items.freebies, 1);

        let drawbacks = &snapshot.asset_types[4];
        assert_eq!(drawbacks.net, 300);
    }

    #[test]
    fn test_inventory_rollup_counts_sum_to_total() {
        let mut items = vec![
            InventoryItem::new(1, "Sword".to_string(), StorageScope::Warehouse),
            InventoryItem::new(2, "Potion".to_string(), StorageScope::Locker),
            InventoryItem::new(3, "Elixir".to_string(), StorageScope::Warehouse),
        ];
        items[0].category = "Weapons".to_string();
        items[1].category = "Consumables".to_string();
        items[1].quantity = 5;
        // items[2] stays uncategorized

        let snapshot =
            compute_statistics_snapshot(&[], &[], &items, &[], &ChainSettings::default());

        let total: usize = snapshot.inventory.iter().map(|r| r.item_count).sum();
        assert_eq!(total, items.len());

        let consumables = snapshot
            .inventory
            .iter()
            .find(|r| r.category == "Consumables")
            .unwrap();
        assert_eq!(consumables.total_quantity, 5);
        assert_eq!(consumables.locker, 1);
        assert_eq!(consumables.warehouse, 0);

        assert!(snapshot.inventory.iter().any(|r| r.category == "Uncategorized"));
    }

    #[test]
    fn test_booster_usage_counts_holders() {
        let mut jumper = Profile::new(1, "Jumper".to_string());
        jumper.boosters = vec!["Body Mod".to_string(), "Essence".to_string()];
        let mut companion = Profile::new(2, "Companion".to_string());
        companion.boosters = vec!["Body Mod".to_string()];

        let snapshot = compute_statistics_snapshot(
            &[],
            &[],
            &[],
            &[jumper, companion],
            &ChainSettings::default(),
        );

        let body_mod = snapshot
            .boosters
            .iter()
            .find(|b| b.booster == "Body Mod")
            .unwrap();
        assert_eq!(body_mod.count, 2);
        assert_eq!(body_mod.holders, vec!["Jumper", "Companion"]);

        let essence = snapshot
            .boosters
            .iter()
            .find(|b| b.booster == "Essence")
            .unwrap();
        assert_eq!(essence.count, 1);
    }

    #[test]
    fn test_empty_input_produces_empty_snapshot() {
        let snapshot = compute_statistics_snapshot(&[], &[], &[], &[], &ChainSettings::default());
        assert!(snapshot.jump_rows.is_empty());
        assert!(snapshot.inventory.is_empty());
        assert!(snapshot.boosters.is_empty());
        assert_eq!(snapshot.asset_types.len(), AssetType::ALL.len());
        assert!(snapshot.asset_types.iter().all(|r| r.count == 0));
    }
}
