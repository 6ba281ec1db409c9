// Property-based coverage for clamping, effectiveness bounds and battle termination

use mon_arena::battle::combatant::{BaseStats, Combatant, StatBlock};
use mon_arena::provider::{CombatantProvider, StaticProvider};
use mon_arena::typing::{self, TypeKind, ALL_TYPES};
use mon_arena::{Battle, MAX_TURNS};
use proptest::prelude::*;

fn any_type() -> impl Strategy<Value = TypeKind> {
    prop::sample::select(ALL_TYPES.to_vec())
}

fn test_combatant(hp: u32) -> Combatant {
    let base = BaseStats {
        hp,
        attack: 50,
        defense: 50,
        special_attack: 50,
        special_defense: 50,
        speed: 50,
    };
    Combatant::new(
        "subject",
        50,
        vec![TypeKind::Normal],
        StatBlock::derive(&base, 50),
        vec![],
    )
}

proptest! {
    #[test]
    fn proptest_effectiveness_stays_in_the_known_set(
        attack in any_type(),
        d1 in any_type(),
        d2 in prop::option::of(any_type()),
    ) {
        let defense: Vec<TypeKind> = std::iter::once(d1).chain(d2).collect();
        let mult = typing::effectiveness(attack, &defense);
        prop_assert!([0.0, 0.25, 0.5, 1.0, 2.0, 4.0].contains(&mult));
    }

    #[test]
    fn proptest_effectiveness_ignores_defense_order(
        attack in any_type(),
        d1 in any_type(),
        d2 in any_type(),
    ) {
        prop_assert_eq!(
            typing::effectiveness(attack, &[d1, d2]),
            typing::effectiveness(attack, &[d2, d1])
        );
    }

    #[test]
    fn proptest_damage_never_leaves_hp_range(
        base_hp in 1u32..255,
        amounts in prop::collection::vec(0u32..100_000, 0..30),
    ) {
        let mut c = test_combatant(base_hp);
        let cap = c.stats.hp;
        for amount in amounts {
            let removed = c.apply_damage(amount);
            prop_assert!(removed <= amount);
            prop_assert!(c.current_hp <= cap);
        }
    }

    #[test]
    fn proptest_heal_never_exceeds_capacity(
        base_hp in 1u32..255,
        damage in 0u32..100_000,
        heals in prop::collection::vec(0u32..100_000, 0..30),
    ) {
        let mut c = test_combatant(base_hp);
        let cap = c.stats.hp;
        c.apply_damage(damage);
        for amount in heals {
            let restored = c.heal(amount);
            prop_assert!(restored <= amount);
            prop_assert!(c.current_hp <= cap);
        }
    }

    #[test]
    fn proptest_derive_stats_is_pure(
        hp in 1u32..255,
        attack in 1u32..255,
        level in 1u32..=100,
    ) {
        let base = BaseStats {
            hp,
            attack,
            defense: attack,
            special_attack: attack,
            special_defense: attack,
            speed: attack,
        };
        prop_assert_eq!(StatBlock::derive(&base, level), StatBlock::derive(&base, level));
        prop_assert_eq!(StatBlock::derive(&base, level).hp, 2 * hp * level / 100 + level + 10);
    }

    #[test]
    fn proptest_battles_conclude_within_ceiling(
        seed in any::<u64>(),
        level in 1u32..=100,
    ) {
        let provider = StaticProvider::with_canonical();
        let a = provider.combatant("pikachu", level).expect("known species");
        let b = provider.combatant("bulbasaur", level).expect("known species");
        let result = Battle::new(a, b, seed).expect("valid").run();
        prop_assert!(result.total_turns <= MAX_TURNS);
        prop_assert_eq!(result.turns.len() as u32, result.total_turns);
    }
}
