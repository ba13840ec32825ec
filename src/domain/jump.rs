//! Jump Entity
//!
//! One budgeting period in the chain: a setting, a CP budget, and the
//! running spent/earned totals. Ordering across the chain is a dense
//! integer `position`, reassigned wholesale on reorder.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Default CP budget for a freshly created jump
pub const DEFAULT_JUMP_BUDGET: i64 = 1000;

/// A jump: one episode/budgeting unit in the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jump {
    /// Unique identifier
    pub id: u32,
    /// Display title
    pub title: String,
    /// World/setting label
    pub world: String,
    /// Free-text status ("Planned", "Gauntlet", "Complete", ...)
    pub status: String,
    /// CP budget for this jump
    pub budget: i64,
    /// CP spent on purchases
    pub cp_spent: i64,
    /// CP earned from drawbacks
    pub cp_income: i64,
    /// Position within the chain (dense, 0-based)
    pub position: i32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Jump {
    /// Create a new jump with the standard starting budget
    pub fn new(id: u32, title: String, world: String) -> Self {
        Self {
            id,
            title,
            world,
            status: String::new(),
            budget: DEFAULT_JUMP_BUDGET,
            cp_spent: 0,
            cp_income: 0,
            position: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether this jump runs under gauntlet rules.
    ///
    /// Status is free text, so the match is a case-insensitive substring
    /// ("Gauntlet", "gauntlet (week 2)", ...).
    pub fn is_gauntlet(&self) -> bool {
        self.status.to_lowercase().contains("gauntlet")
    }

    /// Replace the CP budget. A negative budget is a bookkeeping error,
    /// not a valid overdraft.
    pub fn set_budget(&mut self, budget: i64) -> DomainResult<()> {
        if budget < 0 {
            return Err(DomainError::BudgetViolation(format!(
                "budget must be non-negative, got {}",
                budget
            )));
        }
        self.budget = budget;
        Ok(())
    }
}

impl Entity for Jump {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_jump_defaults() {
        let jump = Jump::new(1, "Pokemon".to_string(), "Kanto".to_string());
        assert_eq!(jump.id(), 1);
        assert_eq!(jump.budget, DEFAULT_JUMP_BUDGET);
        assert_eq!(jump.cp_spent, 0);
        assert!(!jump.is_gauntlet());
    }

    #[test]
    fn test_gauntlet_detection_is_substring_and_case_insensitive() {
        let mut jump = Jump::new(1, "Trial".to_string(), "Arena".to_string());
        jump.status = "GAUNTLET (attempt 2)".to_string();
        assert!(jump.is_gauntlet());

        jump.status = "complete".to_string();
        assert!(!jump.is_gauntlet());
    }

    #[test]
    fn test_negative_budget_is_rejected() {
        let mut jump = Jump::new(1, "Trial".to_string(), "Arena".to_string());
        assert!(jump.set_budget(-100).is_err());
        assert_eq!(jump.budget, DEFAULT_JUMP_BUDGET);

        jump.set_budget(1500).unwrap();
        assert_eq!(jump.budget, 1500);
    }
}
