//! Action templates and their side-effect descriptors
//!
//! An action is an immutable template plus a mutable remaining-uses counter.
//! Secondary effects are explicit descriptors resolved at data-ingestion
//! time; the engine never inspects action names to decide behavior.

use serde::{Deserialize, Serialize};

use crate::battle::combatant::Condition;
use crate::typing::TypeKind;

/// Which stat pair governs an action's damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Physical,
    Special,
    Status,
}

/// A persistent condition an action can inflict, with its trigger chance.
/// Status-category actions whose whole point is the condition carry
/// `chance: 100`; damaging actions usually carry a small chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    pub condition: Condition,
    /// Trigger chance in percent, 1-100.
    pub chance: u8,
}

/// One of a combatant's up to four actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub category: Category,
    pub element: TypeKind,
    /// Absent for guaranteed-zero-damage actions.
    pub power: Option<u32>,
    /// Percent chance to hit, 1-100. Absent means the action never misses.
    pub accuracy: Option<u8>,
    pub max_uses: u32,
    pub uses: u32,
    pub secondary_effect: Option<SecondaryEffect>,
}

impl Action {
    /// Last-resort action used when every real action is out of uses.
    /// It never occupies an action slot and is rebuilt on each use.
    pub fn fallback() -> Self {
        Action {
            name: "struggle".to_string(),
            category: Category::Physical,
            element: TypeKind::Normal,
            power: Some(50),
            accuracy: Some(100),
            max_uses: 1,
            uses: 1,
            secondary_effect: None,
        }
    }

    pub fn has_uses(&self) -> bool {
        self.uses > 0
    }

    /// Consume one use. Returns false if none remain.
    pub fn consume_use(&mut self) -> bool {
        if self.uses == 0 {
            return false;
        }
        self.uses -= 1;
        true
    }

    /// Whether the action computes damage at all.
    pub fn is_damaging(&self) -> bool {
        self.category != Category::Status && self.power.unwrap_or(0) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_use_stops_at_zero() {
        let mut action = Action::fallback();
        assert!(action.has_uses());
        assert!(action.consume_use());
        assert!(!action.has_uses());
        assert!(!action.consume_use());
        assert_eq!(action.uses, 0);
    }

    #[test]
    fn status_and_zero_power_are_not_damaging() {
        let mut action = Action::fallback();
        assert!(action.is_damaging());
        action.power = None;
        assert!(!action.is_damaging());
        action.power = Some(50);
        action.category = Category::Status;
        assert!(!action.is_damaging());
    }
}
