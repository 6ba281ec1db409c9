//! Deterministic two-combatant battle engine
//!
//! A `Battle` owns its two combatants, its RNG and its turn log, and walks
//! `NotStarted -> InProgress -> Concluded`. `run()` drives it to completion;
//! `step()` advances one turn at a time over the same internals, so callers
//! that want to animate a battle turn by turn get identical results.
//!
//! In-battle setbacks (misses, paralysis lockouts, exhausted actions,
//! faints, draws) are events, never errors. The only failure surface is
//! invariant validation at construction.

pub mod action;
pub mod combatant;
pub mod event;
pub mod resolver;
pub mod summary;

use log::debug;
use rand::Rng;

use crate::rng::{self, BattleRng};
use action::Action;
use combatant::{Combatant, ConditionTick, SelectedAction};
use event::{BattleOutcome, BattleResult, CombatantSnapshot, Event, Turn};

/// Hard ceiling on battle length.
pub const MAX_TURNS: u32 = 100;

const MIN_LEVEL: u32 = 1;
const MAX_LEVEL: u32 = 100;
const MAX_ACTIONS: usize = 4;

/// Invariant violations detected before any turn is simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    NoActions { combatant: String },
    TooManyActions { combatant: String, count: usize },
    LevelOutOfRange { combatant: String, level: u32 },
    NonPositiveHp { combatant: String },
    NoTypes { combatant: String },
    TooManyTypes { combatant: String, count: usize },
    AccuracyOutOfRange { combatant: String, action: String, accuracy: u8 },
    UsesAboveMax { combatant: String, action: String },
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::NoActions { combatant } => {
                write!(f, "combatant {combatant} has no actions")
            }
            SetupError::TooManyActions { combatant, count } => {
                write!(
                    f,
                    "combatant {combatant} has {count} actions, at most {MAX_ACTIONS} allowed"
                )
            }
            SetupError::LevelOutOfRange { combatant, level } => {
                write!(
                    f,
                    "combatant {combatant} has level {level}, must be {MIN_LEVEL}-{MAX_LEVEL}"
                )
            }
            SetupError::NonPositiveHp { combatant } => {
                write!(f, "combatant {combatant} has zero HP capacity")
            }
            SetupError::NoTypes { combatant } => {
                write!(f, "combatant {combatant} has no elemental type")
            }
            SetupError::TooManyTypes { combatant, count } => {
                write!(f, "combatant {combatant} has {count} types, at most 2 allowed")
            }
            SetupError::AccuracyOutOfRange {
                combatant,
                action,
                accuracy,
            } => {
                write!(
                    f,
                    "action {action} of combatant {combatant} has accuracy {accuracy}, must be 1-100"
                )
            }
            SetupError::UsesAboveMax { combatant, action } => {
                write!(
                    f,
                    "action {action} of combatant {combatant} has more uses remaining than its maximum"
                )
            }
        }
    }
}

impl std::error::Error for SetupError {}

fn validate(combatant: &Combatant) -> Result<(), SetupError> {
    let name = || combatant.name.clone();
    if combatant.actions.is_empty() {
        return Err(SetupError::NoActions { combatant: name() });
    }
    if combatant.actions.len() > MAX_ACTIONS {
        return Err(SetupError::TooManyActions {
            combatant: name(),
            count: combatant.actions.len(),
        });
    }
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&combatant.level) {
        return Err(SetupError::LevelOutOfRange {
            combatant: name(),
            level: combatant.level,
        });
    }
    if combatant.stats.hp == 0 {
        return Err(SetupError::NonPositiveHp { combatant: name() });
    }
    if combatant.types.is_empty() {
        return Err(SetupError::NoTypes { combatant: name() });
    }
    if combatant.types.len() > 2 {
        return Err(SetupError::TooManyTypes {
            combatant: name(),
            count: combatant.types.len(),
        });
    }
    for action in &combatant.actions {
        if let Some(accuracy) = action.accuracy {
            if accuracy == 0 || accuracy > 100 {
                return Err(SetupError::AccuracyOutOfRange {
                    combatant: name(),
                    action: action.name.clone(),
                    accuracy,
                });
            }
        }
        if action.uses > action.max_uses {
            return Err(SetupError::UsesAboveMax {
                combatant: name(),
                action: action.name.clone(),
            });
        }
    }
    Ok(())
}

/// Battle lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    NotStarted,
    InProgress,
    Concluded,
}

/// A single battle between two combatants.
#[derive(Debug, Clone)]
pub struct Battle {
    combatants: [Combatant; 2],
    rng: BattleRng,
    phase: BattlePhase,
    turn_number: u32,
    turns: Vec<Turn>,
}

impl Battle {
    /// Validate both combatants and set up a battle with a seeded RNG.
    /// The same seed over the same combatants replays the same event log.
    pub fn new(first: Combatant, second: Combatant, seed: u64) -> Result<Battle, SetupError> {
        Battle::with_rng(first, second, rng::seeded(seed))
    }

    /// Like [`Battle::new`] with a caller-supplied generator.
    pub fn with_rng(
        first: Combatant,
        second: Combatant,
        rng: BattleRng,
    ) -> Result<Battle, SetupError> {
        validate(&first)?;
        validate(&second)?;
        Ok(Battle {
            combatants: [first, second],
            rng,
            phase: BattlePhase::NotStarted,
            turn_number: 0,
            turns: Vec::new(),
        })
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn combatants(&self) -> &[Combatant; 2] {
        &self.combatants
    }

    /// Advance the battle by one full turn. Returns the phase afterwards;
    /// calling `step` on a concluded battle is a no-op.
    pub fn step(&mut self) -> BattlePhase {
        if self.phase == BattlePhase::Concluded {
            return self.phase;
        }
        self.phase = BattlePhase::InProgress;
        self.turn_number += 1;

        let mut events = Vec::new();
        if self.turn_number == 1 {
            events.push(Event::battle_start(&self.combatants[0], &self.combatants[1]));
        }

        // Turn order: higher effective speed first, exact ties broken by an
        // unbiased coin flip.
        let speed0 = self.combatants[0].effective_speed();
        let speed1 = self.combatants[1].effective_speed();
        let first = if speed0 == speed1 {
            usize::from(self.rng.gen_bool(0.5))
        } else {
            usize::from(speed1 > speed0)
        };
        let second = 1 - first;
        debug!(
            "turn {}: {} moves first ({speed0} vs {speed1})",
            self.turn_number, self.combatants[first].name
        );

        if !self.combatants[first].is_fainted() {
            self.execute_action(first, second, &mut events);
        }

        // The second combatant only acts if nobody fainted during the first
        // combatant's action.
        if !self.combatants[first].is_fainted() && !self.combatants[second].is_fainted() {
            self.execute_action(second, first, &mut events);
        }

        // End-of-turn condition processing for every living combatant, in
        // constructor order, independent of turn order.
        for idx in 0..2 {
            if self.combatants[idx].is_fainted() {
                continue;
            }
            let ticks = self.combatants[idx].end_of_turn_conditions();
            for tick in ticks {
                match tick {
                    ConditionTick::Damage { condition, amount } => {
                        events.push(Event::condition_damage(
                            &self.combatants[idx],
                            condition,
                            amount,
                        ));
                        if self.combatants[idx].is_fainted() {
                            events.push(Event::fainted(&self.combatants[idx]));
                        }
                    }
                    ConditionTick::Recovered { condition } => {
                        events.push(Event::condition_cleared(&self.combatants[idx], condition));
                    }
                }
            }
        }

        self.turns.push(Turn {
            number: self.turn_number,
            events,
            snapshots: [
                CombatantSnapshot::of(&self.combatants[0]),
                CombatantSnapshot::of(&self.combatants[1]),
            ],
        });

        let anyone_fainted =
            self.combatants[0].is_fainted() || self.combatants[1].is_fainted();
        if anyone_fainted || self.turn_number >= MAX_TURNS {
            self.phase = BattlePhase::Concluded;
        }
        self.phase
    }

    /// Run the battle to conclusion and return the full result.
    pub fn run(mut self) -> BattleResult {
        while self.step() != BattlePhase::Concluded {}
        self.build_result()
    }

    /// The terminal result, available once the battle has concluded.
    pub fn result(&self) -> Option<BattleResult> {
        match self.phase {
            BattlePhase::Concluded => Some(self.build_result()),
            _ => None,
        }
    }

    /// One combatant's action for the turn: paralysis lockout check, action
    /// selection (consuming a use), resolution, event emission, and the
    /// secondary-effect roll.
    fn execute_action(&mut self, attacker: usize, defender: usize, events: &mut Vec<Event>) {
        let (left, right) = self.combatants.split_at_mut(1);
        let (atk, def) = if attacker == 0 {
            (&mut left[0], &mut right[0])
        } else {
            debug_assert_eq!(defender, 0);
            (&mut right[0], &mut left[0])
        };
        let rng = &mut self.rng;

        if !atk.can_act(rng) {
            // can_act is only random under paralysis; fainted combatants
            // never reach this point.
            events.push(Event::cannot_act(atk, combatant::Condition::Paralysis));
            return;
        }

        let action = match atk.select_action(rng) {
            SelectedAction::Slot(slot) => {
                atk.actions[slot].consume_use();
                atk.actions[slot].clone()
            }
            SelectedAction::Fallback => {
                events.push(Event::out_of_actions(atk));
                Action::fallback()
            }
        };

        let outcome = resolver::resolve(atk, &action, def, rng);
        events.push(Event::action_used(atk, &action));

        if !outcome.hit {
            events.push(Event::action_missed(atk, &action));
            return;
        }

        if outcome.damage > 0 {
            let actual = def.apply_damage(outcome.damage);
            events.push(Event::damage(
                atk,
                def,
                &action,
                actual,
                outcome.critical,
                outcome.effectiveness,
            ));
            if outcome.effectiveness != 1.0 {
                events.push(Event::effectiveness(outcome.effectiveness));
            }
            if outcome.critical {
                events.push(Event::critical_hit());
            }
            if def.is_fainted() {
                // No secondary effect lands on a fainted defender.
                events.push(Event::fainted(def));
                return;
            }
        }

        if let Some(effect) = action.secondary_effect {
            if rng.gen_range(1..=100) <= u32::from(effect.chance) && def.condition.is_none() {
                def.apply_condition(effect.condition, None);
                events.push(Event::condition_applied(def, effect.condition));
            }
        }
    }

    fn build_result(&self) -> BattleResult {
        let [a, b] = &self.combatants;
        let outcome = match (a.is_fainted(), b.is_fainted()) {
            (true, true) => BattleOutcome::Draw,
            (true, false) => BattleOutcome::Winner {
                winner: b.name.clone(),
                loser: a.name.clone(),
            },
            (false, true) => BattleOutcome::Winner {
                winner: a.name.clone(),
                loser: b.name.clone(),
            },
            // Turn ceiling reached: strictly higher HP percentage wins.
            (false, false) => {
                if a.hp_percentage() > b.hp_percentage() {
                    BattleOutcome::Winner {
                        winner: a.name.clone(),
                        loser: b.name.clone(),
                    }
                } else if b.hp_percentage() > a.hp_percentage() {
                    BattleOutcome::Winner {
                        winner: b.name.clone(),
                        loser: a.name.clone(),
                    }
                } else {
                    BattleOutcome::Draw
                }
            }
        };

        let final_states = [CombatantSnapshot::of(a), CombatantSnapshot::of(b)];
        let summary = summary::build(&self.turns, &final_states);
        BattleResult {
            outcome,
            total_turns: self.turn_number,
            turns: self.turns.clone(),
            final_states,
            summary,
        }
    }
}
