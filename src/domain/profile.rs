//! Character Profile Entity

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A jumper/companion character profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier
    pub id: u32,
    pub name: String,
    /// Free-form background/biography text
    pub background: Option<String>,
    /// Booster tags held by this character ("Body Mod", "Essence", ...)
    pub boosters: Vec<String>,
}

impl Profile {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            background: None,
            boosters: Vec::new(),
        }
    }
}

impl Entity for Profile {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
