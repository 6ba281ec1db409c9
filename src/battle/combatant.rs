//! Battle combatants: derived stats and turn-by-turn mutable state
//!
//! Stats are derived once from base stats and level with the fixed integer
//! formulas and never recomputed mid-battle. Only current HP and the
//! persistent condition mutate while a battle runs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::action::{Action, Category};
use crate::typing::TypeKind;

/// Species-level base stats, before level scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

/// Level-scaled stat block used for all battle math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl StatBlock {
    /// Derive battle stats from base stats and level.
    ///
    /// HP is `floor(2 * base * level / 100) + level + 10`; every other stat
    /// is `floor(2 * base * level / 100) + 5`. The floor happens on the
    /// division, so integer arithmetic reproduces the canonical values.
    pub fn derive(base: &BaseStats, level: u32) -> StatBlock {
        let scaled = |stat: u32| 2 * stat * level / 100;
        StatBlock {
            hp: scaled(base.hp) + level + 10,
            attack: scaled(base.attack) + 5,
            defense: scaled(base.defense) + 5,
            special_attack: scaled(base.special_attack) + 5,
            special_defense: scaled(base.special_defense) + 5,
            speed: scaled(base.speed) + 5,
        }
    }
}

/// Mutually exclusive persistent conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Burn,
    Poison,
    Paralysis,
}

impl Condition {
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Burn => "burn",
            Condition::Poison => "poison",
            Condition::Paralysis => "paralysis",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A condition currently afflicting a combatant. `turns_left: None` means
/// the condition persists until the battle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCondition {
    pub condition: Condition,
    pub turns_left: Option<u32>,
}

/// What happened to a combatant during end-of-turn condition processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionTick {
    /// The condition removed this much HP.
    Damage { condition: Condition, amount: u32 },
    /// A finite-duration condition ran out and cleared.
    Recovered { condition: Condition },
}

/// Which action a combatant picked for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedAction {
    /// Index into the combatant's action list.
    Slot(usize),
    /// Every action is out of uses; use the fixed fallback.
    Fallback,
}

/// A mutable battle participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    /// One or two elemental types.
    pub types: Vec<TypeKind>,
    pub stats: StatBlock,
    pub current_hp: u32,
    pub condition: Option<ActiveCondition>,
    pub actions: Vec<Action>,
}

impl Combatant {
    /// Construct a combatant at full HP from already-validated parts.
    pub fn new(
        name: impl Into<String>,
        level: u32,
        types: Vec<TypeKind>,
        stats: StatBlock,
        actions: Vec<Action>,
    ) -> Combatant {
        Combatant {
            name: name.into(),
            level,
            types,
            stats,
            current_hp: stats.hp,
            condition: None,
            actions,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Current HP as a fraction of capacity, 0.0 to 1.0.
    pub fn hp_percentage(&self) -> f64 {
        f64::from(self.current_hp) / f64::from(self.stats.hp)
    }

    /// Speed after condition modifiers: paralysis halves it (floored).
    pub fn effective_speed(&self) -> u32 {
        match self.condition {
            Some(ActiveCondition {
                condition: Condition::Paralysis,
                ..
            }) => self.stats.speed / 2,
            _ => self.stats.speed,
        }
    }

    /// Offensive stat for an action: attack for physical (halved while
    /// burned), special attack for special. Status actions have none.
    pub fn effective_offense(&self, action: &Action) -> u32 {
        match action.category {
            Category::Physical => {
                let attack = self.stats.attack;
                match self.condition {
                    Some(ActiveCondition {
                        condition: Condition::Burn,
                        ..
                    }) => attack / 2,
                    _ => attack,
                }
            }
            Category::Special => self.stats.special_attack,
            Category::Status => 0,
        }
    }

    /// Defensive stat against an incoming action.
    pub fn effective_defense(&self, action: &Action) -> u32 {
        match action.category {
            Category::Physical => self.stats.defense,
            Category::Special => self.stats.special_defense,
            Category::Status => 0,
        }
    }

    /// Whether the combatant can act this turn. Paralysis fully prevents
    /// acting 25% of the time, drawn independently each turn.
    pub fn can_act(&self, rng: &mut impl Rng) -> bool {
        if self.is_fainted() {
            return false;
        }
        match self.condition {
            Some(ActiveCondition {
                condition: Condition::Paralysis,
                ..
            }) => rng.gen::<f64>() > 0.25,
            _ => true,
        }
    }

    /// Pick uniformly among actions with remaining uses, or fall back to
    /// the fixed last-resort action when all are exhausted.
    pub fn select_action(&self, rng: &mut impl Rng) -> SelectedAction {
        let usable: Vec<usize> = self
            .actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.has_uses())
            .map(|(i, _)| i)
            .collect();
        if usable.is_empty() {
            return SelectedAction::Fallback;
        }
        SelectedAction::Slot(usable[rng.gen_range(0..usable.len())])
    }

    /// Remove up to `amount` HP, clamped to what is actually there.
    /// Returns the amount removed.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current_hp);
        self.current_hp -= actual;
        actual
    }

    /// Restore up to `amount` HP, clamped to capacity. Returns the amount
    /// restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.stats.hp - self.current_hp);
        self.current_hp += actual;
        actual
    }

    /// Apply a condition unless one is already present; conditions never
    /// stack or override each other.
    pub fn apply_condition(&mut self, condition: Condition, turns: Option<u32>) {
        if self.condition.is_none() {
            self.condition = Some(ActiveCondition {
                condition,
                turns_left: turns,
            });
        }
    }

    /// Process end-of-turn condition effects: burn removes 1/16 of HP
    /// capacity, poison 1/8, both at least 1. Finite durations count down
    /// and clear at zero. Condition damage can faint the combatant; the
    /// caller re-checks afterward.
    pub fn end_of_turn_conditions(&mut self) -> Vec<ConditionTick> {
        let mut ticks = Vec::new();
        let Some(active) = self.condition else {
            return ticks;
        };

        match active.condition {
            Condition::Burn => {
                let amount = self.apply_damage((self.stats.hp / 16).max(1));
                ticks.push(ConditionTick::Damage {
                    condition: Condition::Burn,
                    amount,
                });
            }
            Condition::Poison => {
                let amount = self.apply_damage((self.stats.hp / 8).max(1));
                ticks.push(ConditionTick::Damage {
                    condition: Condition::Poison,
                    amount,
                });
            }
            Condition::Paralysis => {}
        }

        if let Some(turns) = active.turns_left {
            let remaining = turns.saturating_sub(1);
            if remaining == 0 {
                self.condition = None;
                ticks.push(ConditionTick::Recovered {
                    condition: active.condition,
                });
            } else {
                self.condition = Some(ActiveCondition {
                    condition: active.condition,
                    turns_left: Some(remaining),
                });
            }
        }

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng;

    fn pikachu_like(level: u32) -> Combatant {
        let base = BaseStats {
            hp: 35,
            attack: 55,
            defense: 40,
            special_attack: 50,
            special_defense: 50,
            speed: 90,
        };
        Combatant::new(
            "pikachu",
            level,
            vec![TypeKind::Electric],
            StatBlock::derive(&base, level),
            vec![Action::fallback()],
        )
    }

    #[test]
    fn derive_matches_known_values() {
        let base = BaseStats {
            hp: 35,
            attack: 55,
            defense: 40,
            special_attack: 50,
            special_defense: 50,
            speed: 90,
        };
        let stats = StatBlock::derive(&base, 50);
        assert_eq!(stats.hp, 95);
        assert_eq!(stats.attack, 60);
        assert_eq!(stats.defense, 45);
        assert_eq!(stats.special_attack, 55);
        assert_eq!(stats.special_defense, 55);
        assert_eq!(stats.speed, 95);
    }

    #[test]
    fn derive_is_deterministic() {
        let base = BaseStats {
            hp: 78,
            attack: 84,
            defense: 78,
            special_attack: 109,
            special_defense: 85,
            speed: 100,
        };
        assert_eq!(StatBlock::derive(&base, 73), StatBlock::derive(&base, 73));
    }

    #[test]
    fn damage_and_heal_clamp() {
        let mut c = pikachu_like(50);
        assert_eq!(c.apply_damage(10_000), 95);
        assert_eq!(c.current_hp, 0);
        assert!(c.is_fainted());
        assert_eq!(c.heal(10_000), 95);
        assert_eq!(c.current_hp, 95);
        assert_eq!(c.heal(1), 0);
    }

    #[test]
    fn paralysis_halves_speed() {
        let mut c = pikachu_like(50);
        assert_eq!(c.effective_speed(), 95);
        c.apply_condition(Condition::Paralysis, None);
        assert_eq!(c.effective_speed(), 47);
    }

    #[test]
    fn burn_halves_physical_offense_only() {
        let mut c = pikachu_like(50);
        let physical = Action::fallback();
        let mut special = Action::fallback();
        special.category = Category::Special;
        assert_eq!(c.effective_offense(&physical), 60);
        c.apply_condition(Condition::Burn, None);
        assert_eq!(c.effective_offense(&physical), 30);
        assert_eq!(c.effective_offense(&special), 55);
    }

    #[test]
    fn conditions_do_not_stack() {
        let mut c = pikachu_like(50);
        c.apply_condition(Condition::Burn, None);
        c.apply_condition(Condition::Poison, None);
        assert_eq!(
            c.condition,
            Some(ActiveCondition {
                condition: Condition::Burn,
                turns_left: None,
            })
        );
    }

    #[test]
    fn burn_and_poison_tick_amounts() {
        let mut burned = pikachu_like(50);
        burned.apply_condition(Condition::Burn, None);
        assert_eq!(
            burned.end_of_turn_conditions(),
            vec![ConditionTick::Damage {
                condition: Condition::Burn,
                amount: 95 / 16,
            }]
        );

        let mut poisoned = pikachu_like(50);
        poisoned.apply_condition(Condition::Poison, None);
        assert_eq!(
            poisoned.end_of_turn_conditions(),
            vec![ConditionTick::Damage {
                condition: Condition::Poison,
                amount: 95 / 8,
            }]
        );
    }

    #[test]
    fn tiny_capacity_still_ticks_one() {
        let mut c = pikachu_like(50);
        c.stats.hp = 10;
        c.current_hp = 10;
        c.apply_condition(Condition::Burn, None);
        assert_eq!(
            c.end_of_turn_conditions(),
            vec![ConditionTick::Damage {
                condition: Condition::Burn,
                amount: 1,
            }]
        );
    }

    #[test]
    fn finite_condition_clears_after_duration() {
        let mut c = pikachu_like(50);
        c.apply_condition(Condition::Paralysis, Some(2));
        assert_eq!(c.end_of_turn_conditions(), vec![]);
        assert_eq!(
            c.end_of_turn_conditions(),
            vec![ConditionTick::Recovered {
                condition: Condition::Paralysis,
            }]
        );
        assert_eq!(c.condition, None);
    }

    #[test]
    fn paralysis_blocks_roughly_a_quarter_of_turns() {
        let mut c = pikachu_like(50);
        c.apply_condition(Condition::Paralysis, None);
        let mut rng = rng::seeded(7);
        let trials = 20_000;
        let blocked = (0..trials).filter(|_| !c.can_act(&mut rng)).count();
        let rate = blocked as f64 / f64::from(trials);
        assert!((0.23..0.27).contains(&rate), "block rate {rate}");
    }

    #[test]
    fn select_action_skips_exhausted_slots() {
        let mut c = pikachu_like(50);
        let mut spent = Action::fallback();
        spent.name = "spent".to_string();
        spent.uses = 0;
        c.actions = vec![spent, Action::fallback()];
        let mut rng = rng::seeded(1);
        for _ in 0..50 {
            assert_eq!(c.select_action(&mut rng), SelectedAction::Slot(1));
        }
    }

    #[test]
    fn select_action_falls_back_when_exhausted() {
        let mut c = pikachu_like(50);
        for action in &mut c.actions {
            action.uses = 0;
        }
        let mut rng = rng::seeded(1);
        assert_eq!(c.select_action(&mut rng), SelectedAction::Fallback);
    }

    #[test]
    fn fainted_combatant_cannot_act() {
        let mut c = pikachu_like(50);
        c.apply_damage(10_000);
        let mut rng = rng::seeded(1);
        assert!(!c.can_act(&mut rng));
    }
}
