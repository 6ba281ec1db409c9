//! Pure action resolution
//!
//! Given an attacker, an action and a defender, computes hit/miss, damage,
//! critical flag and the effectiveness multiplier. Mutating HP and emitting
//! events is the battle loop's job; this module only computes. Draw order is
//! fixed (accuracy, critical, variance) so seeded battles replay exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::action::Action;
use crate::battle::combatant::Combatant;
use crate::typing;

/// Chance for any action to land a critical hit.
const CRITICAL_CHANCE: f64 = 0.0625;

/// Outcome of resolving one action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub hit: bool,
    pub damage: u32,
    pub effectiveness: f64,
    pub critical: bool,
}

impl ActionOutcome {
    fn no_damage(hit: bool) -> ActionOutcome {
        ActionOutcome {
            hit,
            damage: 0,
            effectiveness: 1.0,
            critical: false,
        }
    }
}

/// Resolve an action against a defender.
///
/// Status-category and zero-power actions always land with zero damage and
/// no damage math at all. Otherwise: accuracy check (absent accuracy never
/// misses), independent 1/16 critical check, the core damage formula in
/// real arithmetic, then STAB, type effectiveness, the critical multiplier
/// and the 0.85-1.0 variance roll. A landed damaging action removes at
/// least 1 HP unless the defender is outright immune.
pub fn resolve(
    attacker: &Combatant,
    action: &Action,
    defender: &Combatant,
    rng: &mut impl Rng,
) -> ActionOutcome {
    if !action.is_damaging() {
        return ActionOutcome::no_damage(true);
    }
    let power = action.power.unwrap_or(0);

    if !accuracy_check(action, rng) {
        return ActionOutcome::no_damage(false);
    }

    let critical = rng.gen::<f64>() < CRITICAL_CHANCE;

    let level = f64::from(attacker.level);
    let offense = f64::from(attacker.effective_offense(action));
    let defense = f64::from(defender.effective_defense(action));

    // Core damage formula, in real arithmetic until the final floor.
    let mut damage = ((2.0 * level / 5.0 + 2.0) * f64::from(power) * offense / defense) / 50.0 + 2.0;

    // Same-type attack bonus.
    if attacker.types.contains(&action.element) {
        damage *= 1.5;
    }

    let effectiveness = typing::effectiveness(action.element, &defender.types);
    damage *= effectiveness;

    if critical {
        damage *= 1.5;
    }

    // Canonical damage-roll variance.
    damage *= rng.gen_range(0.85..=1.0);

    let damage = if effectiveness == 0.0 {
        0
    } else {
        (damage as u32).max(1)
    };

    ActionOutcome {
        hit: true,
        damage,
        effectiveness,
        critical,
    }
}

fn accuracy_check(action: &Action, rng: &mut impl Rng) -> bool {
    match action.accuracy {
        None => true,
        Some(accuracy) => rng.gen_range(1..=100) <= u32::from(accuracy),
    }
}
