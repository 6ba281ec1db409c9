//! Combatant data provider
//!
//! The engine never fetches anything itself: callers construct a provider
//! and pass it in, and the provider hands back fully-resolved combatants
//! with derived stats and validated action lists. Secondary-effect
//! descriptors are part of the action records here, resolved at ingestion
//! time rather than by name matching during battle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::battle::action::{Action, Category, SecondaryEffect};
use crate::battle::combatant::{BaseStats, Combatant, Condition, StatBlock};
use crate::typing::TypeKind;

/// An action as stored by the provider: the immutable template without a
/// uses counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub name: String,
    pub category: Category,
    pub element: TypeKind,
    pub power: Option<u32>,
    pub accuracy: Option<u8>,
    pub max_uses: u32,
    pub secondary_effect: Option<SecondaryEffect>,
}

impl ActionRecord {
    /// Instantiate the record as a fresh battle action at full uses.
    pub fn instantiate(&self) -> Action {
        Action {
            name: self.name.clone(),
            category: self.category,
            element: self.element,
            power: self.power,
            accuracy: self.accuracy,
            max_uses: self.max_uses,
            uses: self.max_uses,
            secondary_effect: self.secondary_effect,
        }
    }
}

/// Static species data: types, base stats, and the action set a combatant
/// of that species brings into battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    pub types: Vec<TypeKind>,
    pub base_stats: BaseStats,
    pub actions: Vec<ActionRecord>,
}

/// Source of validated species records. Implementations may be backed by a
/// remote dataset; the engine only ever sees the resolved records.
pub trait CombatantProvider {
    fn species(&self, name: &str) -> Result<&SpeciesRecord, String>;

    /// Resolve a species at a level into a battle-ready combatant with
    /// derived stats and fresh action uses.
    fn combatant(&self, name: &str, level: u32) -> Result<Combatant, String> {
        if !(1..=100).contains(&level) {
            return Err(format!("Level {level} out of range 1-100"));
        }
        let record = self.species(name)?;
        let stats = StatBlock::derive(&record.base_stats, level);
        Ok(Combatant::new(
            record.name.clone(),
            level,
            record.types.clone(),
            stats,
            record.actions.iter().map(ActionRecord::instantiate).collect(),
        ))
    }
}

/// In-memory provider seeded with a canonical roster. Stands in for the
/// remote dataset in tests and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    species: HashMap<String, SpeciesRecord>,
}

impl StaticProvider {
    pub fn new() -> Self {
        StaticProvider {
            species: HashMap::new(),
        }
    }

    pub fn register(&mut self, record: SpeciesRecord) {
        self.species.insert(record.name.clone(), record);
    }

    pub fn species_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.species.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The canonical starter roster, fully specified inline.
    pub fn with_canonical() -> Self {
        let mut provider = Self::new();

        provider.register(SpeciesRecord {
            name: "pikachu".to_string(),
            types: vec![TypeKind::Electric],
            base_stats: BaseStats {
                hp: 35,
                attack: 55,
                defense: 40,
                special_attack: 50,
                special_defense: 50,
                speed: 90,
            },
            actions: vec![
                ActionRecord {
                    name: "thunder-shock".to_string(),
                    category: Category::Special,
                    element: TypeKind::Electric,
                    power: Some(40),
                    accuracy: Some(100),
                    max_uses: 30,
                    secondary_effect: Some(SecondaryEffect {
                        condition: Condition::Paralysis,
                        chance: 10,
                    }),
                },
                ActionRecord {
                    name: "quick-attack".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Normal,
                    power: Some(40),
                    accuracy: Some(100),
                    max_uses: 30,
                    secondary_effect: None,
                },
                ActionRecord {
                    name: "thunder-wave".to_string(),
                    category: Category::Status,
                    element: TypeKind::Electric,
                    power: None,
                    accuracy: Some(90),
                    max_uses: 20,
                    secondary_effect: Some(SecondaryEffect {
                        condition: Condition::Paralysis,
                        chance: 100,
                    }),
                },
                ActionRecord {
                    name: "slam".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Normal,
                    power: Some(80),
                    accuracy: Some(75),
                    max_uses: 20,
                    secondary_effect: None,
                },
            ],
        });

        provider.register(SpeciesRecord {
            name: "charmander".to_string(),
            types: vec![TypeKind::Fire],
            base_stats: BaseStats {
                hp: 39,
                attack: 52,
                defense: 43,
                special_attack: 60,
                special_defense: 50,
                speed: 65,
            },
            actions: vec![
                ActionRecord {
                    name: "scratch".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Normal,
                    power: Some(40),
                    accuracy: Some(100),
                    max_uses: 35,
                    secondary_effect: None,
                },
                ActionRecord {
                    name: "ember".to_string(),
                    category: Category::Special,
                    element: TypeKind::Fire,
                    power: Some(40),
                    accuracy: Some(100),
                    max_uses: 25,
                    secondary_effect: Some(SecondaryEffect {
                        condition: Condition::Burn,
                        chance: 10,
                    }),
                },
                ActionRecord {
                    name: "flamethrower".to_string(),
                    category: Category::Special,
                    element: TypeKind::Fire,
                    power: Some(90),
                    accuracy: Some(100),
                    max_uses: 15,
                    secondary_effect: Some(SecondaryEffect {
                        condition: Condition::Burn,
                        chance: 10,
                    }),
                },
                ActionRecord {
                    name: "will-o-wisp".to_string(),
                    category: Category::Status,
                    element: TypeKind::Fire,
                    power: None,
                    accuracy: Some(85),
                    max_uses: 15,
                    secondary_effect: Some(SecondaryEffect {
                        condition: Condition::Burn,
                        chance: 100,
                    }),
                },
            ],
        });

        provider.register(SpeciesRecord {
            name: "squirtle".to_string(),
            types: vec![TypeKind::Water],
            base_stats: BaseStats {
                hp: 44,
                attack: 48,
                defense: 65,
                special_attack: 50,
                special_defense: 64,
                speed: 43,
            },
            actions: vec![
                ActionRecord {
                    name: "tackle".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Normal,
                    power: Some(40),
                    accuracy: Some(100),
                    max_uses: 35,
                    secondary_effect: None,
                },
                ActionRecord {
                    name: "water-gun".to_string(),
                    category: Category::Special,
                    element: TypeKind::Water,
                    power: Some(40),
                    accuracy: Some(100),
                    max_uses: 25,
                    secondary_effect: None,
                },
                ActionRecord {
                    name: "bite".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Dark,
                    power: Some(60),
                    accuracy: Some(100),
                    max_uses: 25,
                    secondary_effect: None,
                },
                ActionRecord {
                    name: "bubble-beam".to_string(),
                    category: Category::Special,
                    element: TypeKind::Water,
                    power: Some(65),
                    accuracy: Some(100),
                    max_uses: 20,
                    secondary_effect: None,
                },
            ],
        });

        provider.register(SpeciesRecord {
            name: "bulbasaur".to_string(),
            types: vec![TypeKind::Grass, TypeKind::Poison],
            base_stats: BaseStats {
                hp: 45,
                attack: 49,
                defense: 49,
                special_attack: 65,
                special_defense: 65,
                speed: 45,
            },
            actions: vec![
                ActionRecord {
                    name: "tackle".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Normal,
                    power: Some(40),
                    accuracy: Some(100),
                    max_uses: 35,
                    secondary_effect: None,
                },
                ActionRecord {
                    name: "vine-whip".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Grass,
                    power: Some(45),
                    accuracy: Some(100),
                    max_uses: 25,
                    secondary_effect: None,
                },
                ActionRecord {
                    name: "poison-powder".to_string(),
                    category: Category::Status,
                    element: TypeKind::Poison,
                    power: None,
                    accuracy: Some(75),
                    max_uses: 35,
                    secondary_effect: Some(SecondaryEffect {
                        condition: Condition::Poison,
                        chance: 100,
                    }),
                },
                ActionRecord {
                    name: "razor-leaf".to_string(),
                    category: Category::Physical,
                    element: TypeKind::Grass,
                    power: Some(55),
                    accuracy: Some(95),
                    max_uses: 25,
                    secondary_effect: None,
                },
            ],
        });

        provider
    }
}

impl CombatantProvider for StaticProvider {
    fn species(&self, name: &str) -> Result<&SpeciesRecord, String> {
        self.species
            .get(name)
            .ok_or_else(|| format!("Unknown species: {name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_roster_resolves() {
        let provider = StaticProvider::with_canonical();
        assert_eq!(
            provider.species_names(),
            vec!["bulbasaur", "charmander", "pikachu", "squirtle"]
        );
        let pikachu = provider.combatant("pikachu", 50).expect("known species");
        assert_eq!(pikachu.stats.hp, 95);
        assert_eq!(pikachu.stats.attack, 60);
        assert_eq!(pikachu.current_hp, 95);
        assert_eq!(pikachu.actions.len(), 4);
        assert!(pikachu.actions.iter().all(|a| a.uses == a.max_uses));
    }

    #[test]
    fn unknown_species_is_rejected() {
        let provider = StaticProvider::with_canonical();
        let err = provider.combatant("missingno", 50).unwrap_err();
        assert!(err.contains("missingno"));
    }

    #[test]
    fn out_of_range_level_is_rejected() {
        let provider = StaticProvider::with_canonical();
        assert!(provider.combatant("pikachu", 0).is_err());
        assert!(provider.combatant("pikachu", 101).is_err());
        assert!(provider.combatant("pikachu", 100).is_ok());
    }

    #[test]
    fn status_actions_carry_explicit_effect_descriptors() {
        let provider = StaticProvider::with_canonical();
        let bulbasaur = provider.combatant("bulbasaur", 50).expect("known species");
        let powder = bulbasaur
            .actions
            .iter()
            .find(|a| a.name == "poison-powder")
            .expect("present");
        assert_eq!(
            powder.secondary_effect,
            Some(SecondaryEffect {
                condition: Condition::Poison,
                chance: 100,
            })
        );
    }

    #[test]
    fn instantiated_combatants_are_independent() {
        let provider = StaticProvider::with_canonical();
        let mut first = provider.combatant("squirtle", 50).expect("known species");
        first.actions[0].uses = 0;
        first.apply_damage(10);
        let second = provider.combatant("squirtle", 50).expect("known species");
        assert_eq!(second.actions[0].uses, second.actions[0].max_uses);
        assert_eq!(second.current_hp, second.stats.hp);
    }
}
