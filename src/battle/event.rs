//! Battle log structures
//!
//! Every observable occurrence in a battle is one closed `Event` variant, so
//! downstream passes (the summary builder in particular) can match
//! exhaustively. Events carry a rendered `message` alongside their
//! structured fields so consumers need no formatting logic of their own.

use serde::{Deserialize, Serialize};

use crate::battle::action::{Action, Category};
use crate::battle::combatant::{Combatant, Condition};
use crate::battle::summary::BattleSummary;
use crate::typing::TypeKind;

/// Remaining and maximum uses of one action, as seen in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionUses {
    pub name: String,
    pub uses: u32,
    pub max_uses: u32,
}

/// Public state of a combatant at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub level: u32,
    pub types: Vec<TypeKind>,
    pub current_hp: u32,
    pub max_hp: u32,
    pub hp_percentage: f64,
    pub condition: Option<Condition>,
    pub actions: Vec<ActionUses>,
    pub is_fainted: bool,
}

impl CombatantSnapshot {
    pub fn of(combatant: &Combatant) -> CombatantSnapshot {
        CombatantSnapshot {
            name: combatant.name.clone(),
            level: combatant.level,
            types: combatant.types.clone(),
            current_hp: combatant.current_hp,
            max_hp: combatant.stats.hp,
            hp_percentage: combatant.hp_percentage(),
            condition: combatant.condition.map(|c| c.condition),
            actions: combatant
                .actions
                .iter()
                .map(|a| ActionUses {
                    name: a.name.clone(),
                    uses: a.uses,
                    max_uses: a.max_uses,
                })
                .collect(),
            is_fainted: combatant.is_fainted(),
        }
    }
}

/// One observable occurrence within a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    BattleStart {
        first: CombatantSnapshot,
        second: CombatantSnapshot,
        message: String,
    },
    ActionUsed {
        combatant: String,
        action: String,
        element: TypeKind,
        category: Category,
        message: String,
    },
    ActionMissed {
        combatant: String,
        action: String,
        message: String,
    },
    Damage {
        attacker: String,
        defender: String,
        action: String,
        amount: u32,
        critical: bool,
        effectiveness: f64,
        message: String,
    },
    Effectiveness {
        multiplier: f64,
        message: String,
    },
    CriticalHit {
        message: String,
    },
    ConditionApplied {
        combatant: String,
        condition: Condition,
        message: String,
    },
    ConditionDamage {
        combatant: String,
        condition: Condition,
        amount: u32,
        message: String,
    },
    ConditionCleared {
        combatant: String,
        condition: Condition,
        message: String,
    },
    CannotAct {
        combatant: String,
        condition: Condition,
        message: String,
    },
    OutOfActions {
        combatant: String,
        message: String,
    },
    Fainted {
        combatant: String,
        message: String,
    },
}

impl Event {
    pub fn battle_start(first: &Combatant, second: &Combatant) -> Event {
        Event::BattleStart {
            message: format!("Battle begins! {} vs {}!", first.name, second.name),
            first: CombatantSnapshot::of(first),
            second: CombatantSnapshot::of(second),
        }
    }

    pub fn action_used(combatant: &Combatant, action: &Action) -> Event {
        Event::ActionUsed {
            combatant: combatant.name.clone(),
            action: action.name.clone(),
            element: action.element,
            category: action.category,
            message: format!("{} used {}!", combatant.name, action.name),
        }
    }

    pub fn action_missed(combatant: &Combatant, action: &Action) -> Event {
        Event::ActionMissed {
            combatant: combatant.name.clone(),
            action: action.name.clone(),
            message: format!("{}'s {} missed!", combatant.name, action.name),
        }
    }

    pub fn damage(
        attacker: &Combatant,
        defender: &Combatant,
        action: &Action,
        amount: u32,
        critical: bool,
        effectiveness: f64,
    ) -> Event {
        Event::Damage {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            action: action.name.clone(),
            amount,
            critical,
            effectiveness,
            message: format!("{} took {} damage!", defender.name, amount),
        }
    }

    pub fn effectiveness(multiplier: f64) -> Event {
        Event::Effectiveness {
            multiplier,
            message: format!("{}!", crate::typing::effectiveness_description(multiplier)),
        }
    }

    pub fn critical_hit() -> Event {
        Event::CriticalHit {
            message: "A critical hit!".to_string(),
        }
    }

    pub fn condition_applied(combatant: &Combatant, condition: Condition) -> Event {
        let message = match condition {
            Condition::Burn => format!("{} was burned!", combatant.name),
            Condition::Poison => format!("{} was poisoned!", combatant.name),
            Condition::Paralysis => format!("{} was paralyzed!", combatant.name),
        };
        Event::ConditionApplied {
            combatant: combatant.name.clone(),
            condition,
            message,
        }
    }

    pub fn condition_damage(combatant: &Combatant, condition: Condition, amount: u32) -> Event {
        Event::ConditionDamage {
            combatant: combatant.name.clone(),
            condition,
            amount,
            message: format!("{} is hurt by {condition}! (-{amount} HP)", combatant.name),
        }
    }

    pub fn condition_cleared(combatant: &Combatant, condition: Condition) -> Event {
        Event::ConditionCleared {
            combatant: combatant.name.clone(),
            condition,
            message: format!("{} recovered from {condition}!", combatant.name),
        }
    }

    pub fn cannot_act(combatant: &Combatant, condition: Condition) -> Event {
        Event::CannotAct {
            combatant: combatant.name.clone(),
            condition,
            message: format!("{} is paralyzed! It can't move!", combatant.name),
        }
    }

    pub fn out_of_actions(combatant: &Combatant) -> Event {
        Event::OutOfActions {
            combatant: combatant.name.clone(),
            message: format!("{} has no actions left!", combatant.name),
        }
    }

    pub fn fainted(combatant: &Combatant) -> Event {
        Event::Fainted {
            combatant: combatant.name.clone(),
            message: format!("{} fainted!", combatant.name),
        }
    }
}

/// One completed turn: its events plus the end-of-turn state of both
/// combatants. Turns are numbered from 1 and never revised once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub number: u32,
    pub events: Vec<Event>,
    pub snapshots: [CombatantSnapshot; 2],
}

/// How the battle ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BattleOutcome {
    Winner { winner: String, loser: String },
    Draw,
}

/// Terminal artifact of a battle: outcome, the full ordered turn log, final
/// combatant snapshots and the aggregate summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub total_turns: u32,
    pub turns: Vec<Turn>,
    pub final_states: [CombatantSnapshot; 2],
    pub summary: BattleSummary,
}
