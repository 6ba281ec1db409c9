//! Elemental type chart and effectiveness queries
//!
//! The 18x18 interaction chart is fixed data; the real matchups are not
//! derivable from any formula, so every non-neutral pair is listed
//! explicitly. Factors are restricted to 0, 0.5, 1 and 2, and compound
//! multiplicatively against dual-typed defenders.

use serde::{Deserialize, Serialize};

/// One of the 18 elemental types carried by combatants and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

/// All types, in canonical chart order.
pub const ALL_TYPES: [TypeKind; 18] = [
    TypeKind::Normal,
    TypeKind::Fire,
    TypeKind::Water,
    TypeKind::Electric,
    TypeKind::Grass,
    TypeKind::Ice,
    TypeKind::Fighting,
    TypeKind::Poison,
    TypeKind::Ground,
    TypeKind::Flying,
    TypeKind::Psychic,
    TypeKind::Bug,
    TypeKind::Rock,
    TypeKind::Ghost,
    TypeKind::Dragon,
    TypeKind::Dark,
    TypeKind::Steel,
    TypeKind::Fairy,
];

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Normal => "normal",
            TypeKind::Fire => "fire",
            TypeKind::Water => "water",
            TypeKind::Electric => "electric",
            TypeKind::Grass => "grass",
            TypeKind::Ice => "ice",
            TypeKind::Fighting => "fighting",
            TypeKind::Poison => "poison",
            TypeKind::Ground => "ground",
            TypeKind::Flying => "flying",
            TypeKind::Psychic => "psychic",
            TypeKind::Bug => "bug",
            TypeKind::Rock => "rock",
            TypeKind::Ghost => "ghost",
            TypeKind::Dragon => "dragon",
            TypeKind::Dark => "dark",
            TypeKind::Steel => "steel",
            TypeKind::Fairy => "fairy",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pairwise factor for one attacking type against one defending type.
/// Unlisted pairs are neutral (1.0).
fn pair_factor(attack: TypeKind, defense: TypeKind) -> f64 {
    use TypeKind::*;
    match (attack, defense) {
        (Normal, Rock) | (Normal, Steel) => 0.5,
        (Normal, Ghost) => 0.0,

        (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,
        (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Flying) | (Fire, Dragon) => 0.5,

        (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
        (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,

        (Electric, Water) | (Electric, Flying) => 2.0,
        (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
        (Electric, Ground) => 0.0,

        (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
        (Grass, Fire)
        | (Grass, Grass)
        | (Grass, Poison)
        | (Grass, Flying)
        | (Grass, Bug)
        | (Grass, Dragon)
        | (Grass, Steel) => 0.5,

        (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
        (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,

        (Fighting, Normal)
        | (Fighting, Ice)
        | (Fighting, Rock)
        | (Fighting, Dark)
        | (Fighting, Steel) => 2.0,
        (Fighting, Poison)
        | (Fighting, Flying)
        | (Fighting, Psychic)
        | (Fighting, Bug)
        | (Fighting, Fairy) => 0.5,
        (Fighting, Ghost) => 0.0,

        (Poison, Grass) | (Poison, Fairy) => 2.0,
        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
        (Poison, Steel) => 0.0,

        (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock)
        | (Ground, Steel) => 2.0,
        (Ground, Grass) | (Ground, Bug) => 0.5,
        (Ground, Flying) => 0.0,

        (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,
        (Flying, Electric) | (Flying, Ice) | (Flying, Rock) | (Flying, Steel) => 0.5,

        (Psychic, Fighting) | (Psychic, Poison) => 2.0,
        (Psychic, Psychic) | (Psychic, Steel) => 0.5,
        (Psychic, Dark) => 0.0,

        (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
        (Bug, Fire)
        | (Bug, Fighting)
        | (Bug, Poison)
        | (Bug, Flying)
        | (Bug, Ghost)
        | (Bug, Steel)
        | (Bug, Fairy) => 0.5,

        (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
        (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,

        (Ghost, Psychic) | (Ghost, Ghost) => 2.0,
        (Ghost, Dark) => 0.5,
        (Ghost, Normal) => 0.0,

        (Dragon, Dragon) => 2.0,
        (Dragon, Steel) => 0.5,
        (Dragon, Fairy) => 0.0,

        (Dark, Psychic) | (Dark, Ghost) => 2.0,
        (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,

        (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,
        (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,

        (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,
        (Fairy, Fire) | (Fairy, Poison) | (Fairy, Steel) => 0.5,

        _ => 1.0,
    }
}

/// Effectiveness multiplier for an attacking type against one or two
/// defending types. Dual-type factors compound multiplicatively, so the
/// result is one of 0, 0.25, 0.5, 1, 2 or 4.
pub fn effectiveness(attack: TypeKind, defense: &[TypeKind]) -> f64 {
    defense
        .iter()
        .fold(1.0, |mult, &def| mult * pair_factor(attack, def))
}

/// Human-readable description for an effectiveness multiplier, in the
/// phrasing battle logs use.
pub fn effectiveness_description(multiplier: f64) -> &'static str {
    if multiplier == 0.0 {
        "It has no effect"
    } else if multiplier < 1.0 {
        "It's not very effective"
    } else if multiplier == 1.0 {
        "It's normally effective"
    } else {
        "It's super effective"
    }
}

/// Per-attack-type multipliers against a defender's type set, in canonical
/// chart order.
pub fn matchups(defense: &[TypeKind]) -> Vec<(TypeKind, f64)> {
    ALL_TYPES
        .iter()
        .map(|&attack| (attack, effectiveness(attack, defense)))
        .collect()
}

/// Attack types partitioned by how they fare against a defender's type set.
/// Used by data-presentation layers, not by the battle engine itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupProfile {
    /// 0x damage
    pub immunities: Vec<TypeKind>,
    /// 0.25x or 0.5x damage
    pub resistances: Vec<TypeKind>,
    /// 2x or 4x damage
    pub weaknesses: Vec<TypeKind>,
    /// 1x damage
    pub neutral: Vec<TypeKind>,
}

/// Partition all attack types into immunities, resistances, weaknesses and
/// neutral matchups for the given defending type set.
pub fn matchup_profile(defense: &[TypeKind]) -> MatchupProfile {
    let mut profile = MatchupProfile::default();
    for (attack, mult) in matchups(defense) {
        if mult == 0.0 {
            profile.immunities.push(attack);
        } else if mult < 1.0 {
            profile.resistances.push(attack);
        } else if mult > 1.0 {
            profile.weaknesses.push(attack);
        } else {
            profile.neutral.push(attack);
        }
    }
    profile
}
