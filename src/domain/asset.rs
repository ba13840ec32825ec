//! Jump Asset Entity
//!
//! A purchased or credited entry belonging to one jump. The asset type
//! decides how the CP policy treats it: drawbacks grant credit instead of
//! costing CP, discounted purchases cost half, freebies cost nothing.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Asset type determines budget behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Origin/background purchase
    Origin,
    #[default]
    Perk,
    Item,
    Companion,
    /// Grants CP credit instead of costing CP
    Drawback,
}

impl AssetType {
    /// Fixed display/aggregation order
    pub const ALL: [AssetType; 5] = [
        AssetType::Origin,
        AssetType::Perk,
        AssetType::Item,
        AssetType::Companion,
        AssetType::Drawback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Origin => "origin",
            AssetType::Perk => "perk",
            AssetType::Item => "item",
            AssetType::Companion => "companion",
            AssetType::Drawback => "drawback",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "origin" => AssetType::Origin,
            "item" => AssetType::Item,
            "companion" => AssetType::Companion,
            "drawback" => AssetType::Drawback,
            _ => AssetType::Perk,
        }
    }
}

/// Drawback severity (house bookkeeping, no budget effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawbackSeverity {
    Minor,
    Moderate,
    Severe,
}

/// Structured metadata stored as a JSON column.
///
/// Validated once at the repository boundary instead of being parsed
/// ad hoc per call site. Unknown/empty blobs decode to `Plain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssetMeta {
    #[default]
    Plain,
    Drawback {
        #[serde(default)]
        severity: Option<DrawbackSeverity>,
        #[serde(default)]
        house_rule: bool,
    },
}

impl AssetMeta {
    /// Decode a metadata blob, tolerating NULL/empty/garbage columns
    pub fn decode(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if !s.trim().is_empty() => {
                serde_json::from_str(s).unwrap_or_default()
            }
            _ => AssetMeta::Plain,
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"kind\":\"plain\"}".to_string())
    }
}

/// A purchased or credited entry belonging to one jump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpAsset {
    /// Unique identifier
    pub id: u32,
    /// Owning jump
    pub jump_id: u32,
    /// Display name
    pub name: String,
    pub asset_type: AssetType,
    /// Gross CP cost (credit value for drawbacks)
    pub cost: i64,
    /// Purchase quantity; non-positive values are treated as 1
    pub quantity: i64,
    /// Discounted purchases cost half their gross
    pub discount: bool,
    /// Freebies cost nothing (drawback freebies still grant credit)
    pub freebie: bool,
    /// Free-text category ("Body Mod", "Magic", ...)
    pub category: String,
    pub metadata: AssetMeta,
}

impl JumpAsset {
    pub fn new(id: u32, jump_id: u32, name: String, asset_type: AssetType, cost: i64) -> Self {
        Self {
            id,
            jump_id,
            name,
            asset_type,
            cost,
            quantity: 1,
            discount: false,
            freebie: false,
            category: String::new(),
            metadata: AssetMeta::Plain,
        }
    }

    /// Quantity with the defensive default: absent/non-positive means 1
    pub fn effective_quantity(&self) -> i64 {
        if self.quantity <= 0 {
            1
        } else {
            self.quantity
        }
    }

    /// Gross CP value: cost x quantity, cost floored at 0
    pub fn gross_value(&self) -> i64 {
        self.cost.max(0) * self.effective_quantity()
    }

    /// Net CP cost under the discount/freebie policy.
    ///
    /// Drawbacks and freebies net to zero; discounted purchases cost half
    /// their gross (truncating).
    pub fn net_cost(&self) -> i64 {
        if self.asset_type == AssetType::Drawback || self.freebie {
            0
        } else if self.discount {
            self.gross_value() / 2
        } else {
            self.gross_value()
        }
    }

    /// CP credit granted: gross value for drawbacks (freebie drawbacks
    /// included), zero for everything else.
    pub fn credit_value(&self) -> i64 {
        if self.asset_type == AssetType::Drawback {
            self.gross_value()
        } else {
            0
        }
    }
}

impl Entity for JumpAsset {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_round_trip() {
        for ty in AssetType::ALL {
            assert_eq!(AssetType::from_str(ty.as_str()), ty);
        }
        // Unknown strings fall back to perk
        assert_eq!(AssetType::from_str("mystery"), AssetType::Perk);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let mut asset = JumpAsset::new(1, 1, "Speedster".to_string(), AssetType::Perk, 400);
        asset.quantity = 0;
        assert_eq!(asset.gross_value(), 400);
        asset.quantity = -3;
        assert_eq!(asset.gross_value(), 400);
        asset.quantity = 2;
        assert_eq!(asset.gross_value(), 800);
    }

    #[test]
    fn test_net_cost_policy() {
        let mut asset = JumpAsset::new(1, 1, "Armory".to_string(), AssetType::Item, 300);
        assert_eq!(asset.net_cost(), 300);

        asset.discount = true;
        assert_eq!(asset.net_cost(), 150);

        asset.freebie = true;
        assert_eq!(asset.net_cost(), 0);
    }

    #[test]
    fn test_freebie_drawback_still_credits() {
        let mut drawback = JumpAsset::new(1, 1, "Hunted".to_string(), AssetType::Drawback, 200);
        drawback.freebie = true;
        assert_eq!(drawback.net_cost(), 0);
        assert_eq!(drawback.credit_value(), 200);
    }

    #[test]
    fn test_meta_decode_tolerates_garbage() {
        assert_eq!(AssetMeta::decode(None), AssetMeta::Plain);
        assert_eq!(AssetMeta::decode(Some("")), AssetMeta::Plain);
        assert_eq!(AssetMeta::decode(Some("not json")), AssetMeta::Plain);

        let meta = AssetMeta::decode(Some(
            r#"{"kind":"drawback","severity":"severe","house_rule":true}"#,
        ));
        assert_eq!(
            meta,
            AssetMeta::Drawback {
                severity: Some(DrawbackSeverity::Severe),
                house_rule: true,
            }
        );
    }

    #[test]
    fn test_meta_encode_decode_round_trip() {
        let meta = AssetMeta::Drawback {
            severity: Some(DrawbackSeverity::Minor),
            house_rule: false,
        };
        assert_eq!(AssetMeta::decode(Some(&meta.encode())), meta);
    }
}
