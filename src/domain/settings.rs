//! Chain Settings
//!
//! Singleton configuration row: gauntlet house rules and the thousands
//! separator used when rendering CP values. The gauntlet flags are
//! pass-through configuration surfaced in the statistics snapshot, not
//! computed from it.

use serde::{Deserialize, Serialize};

/// Thousands-separator choice for rendered CP values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    None,
    Comma,
    Period,
    Space,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::None => "none",
            Separator::Comma => "comma",
            Separator::Period => "period",
            Separator::Space => "space",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "comma" => Separator::Comma,
            "period" => Separator::Period,
            "space" => Separator::Space,
            _ => Separator::None,
        }
    }

    /// The glyph inserted between digit groups
    pub fn glyph(&self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Comma => ",",
            Separator::Period => ".",
            Separator::Space => " ",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChainSettings {
    /// Whether gauntlet jumps are allowed in this chain
    pub allow_gauntlet: bool,
    /// House rule: gauntlet budgets are halved
    pub gauntlet_halved: bool,
    /// Thousands separator for CP display
    pub separator: Separator,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            allow_gauntlet: true,
            gauntlet_halved: false,
            separator: Separator::None,
        }
    }
}
