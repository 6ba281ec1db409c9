//! Aggregate battle statistics
//!
//! A read-only pass over the finished turn log. Matches every event variant
//! explicitly so adding an event kind forces this module to decide what to
//! do with it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::battle::combatant::Condition;
use crate::battle::event::{CombatantSnapshot, Event, Turn};

/// Per-combatant aggregates for one battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantSummary {
    /// Total damage this combatant dealt with its actions.
    pub damage_dealt: u32,
    /// Action name to number of times used.
    pub actions_used: BTreeMap<String, u32>,
    /// Conditions applied to this combatant, in order of application.
    pub conditions_suffered: Vec<Condition>,
    pub final_hp: u32,
    pub max_hp: u32,
    pub hp_percentage: f64,
}

/// Aggregate statistics over a full battle log, keyed by combatant name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub combatants: BTreeMap<String, CombatantSummary>,
}

/// Accumulate per-combatant statistics from the turn log and attach final
/// HP figures from the final snapshots.
pub fn build(turns: &[Turn], final_states: &[CombatantSnapshot; 2]) -> BattleSummary {
    let mut summary = BattleSummary::default();
    for snapshot in final_states {
        let entry = summary.combatants.entry(snapshot.name.clone()).or_default();
        entry.final_hp = snapshot.current_hp;
        entry.max_hp = snapshot.max_hp;
        entry.hp_percentage = snapshot.hp_percentage;
    }

    for turn in turns {
        for event in &turn.events {
            match event {
                Event::ActionUsed {
                    combatant, action, ..
                } => {
                    let entry = summary.combatants.entry(combatant.clone()).or_default();
                    *entry.actions_used.entry(action.clone()).or_insert(0) += 1;
                }
                Event::Damage {
                    attacker, amount, ..
                } => {
                    let entry = summary.combatants.entry(attacker.clone()).or_default();
                    entry.damage_dealt += amount;
                }
                Event::ConditionApplied {
                    combatant,
                    condition,
                    ..
                } => {
                    let entry = summary.combatants.entry(combatant.clone()).or_default();
                    entry.conditions_suffered.push(*condition);
                }
                Event::BattleStart { .. }
                | Event::ActionMissed { .. }
                | Event::Effectiveness { .. }
                | Event::CriticalHit { .. }
                | Event::ConditionDamage { .. }
                | Event::ConditionCleared { .. }
                | Event::CannotAct { .. }
                | Event::OutOfActions { .. }
                | Event::Fainted { .. } => {}
            }
        }
    }

    summary
}
