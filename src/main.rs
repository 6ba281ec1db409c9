//! Demo driver: resolve two combatants from the canonical roster, run one
//! battle and print the result as JSON.
//!
//! Usage: `mon-arena [first] [second] [level] [seed]`

use std::env;
use std::process::ExitCode;

use mon_arena::provider::{CombatantProvider, StaticProvider};
use mon_arena::Battle;

fn main() -> ExitCode {
    let _ = env_logger::try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    let first = args.first().map(String::as_str).unwrap_or("pikachu");
    let second = args.get(1).map(String::as_str).unwrap_or("charmander");
    let level: u32 = match args.get(2).map(|s| s.parse()).transpose() {
        Ok(level) => level.unwrap_or(50),
        Err(_) => {
            eprintln!("Invalid level: {}", args[2]);
            return ExitCode::FAILURE;
        }
    };
    let seed: u64 = match args.get(3).map(|s| s.parse()).transpose() {
        Ok(seed) => seed.unwrap_or_else(rand::random),
        Err(_) => {
            eprintln!("Invalid seed: {}", args[3]);
            return ExitCode::FAILURE;
        }
    };

    let provider = StaticProvider::with_canonical();
    match run(&provider, first, second, level, seed) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Known species: {}", provider.species_names().join(", "));
            ExitCode::FAILURE
        }
    }
}

fn run(
    provider: &StaticProvider,
    first: &str,
    second: &str,
    level: u32,
    seed: u64,
) -> Result<String, String> {
    log::info!("{first} vs {second} at level {level}, seed {seed}");
    let first = provider.combatant(first, level)?;
    let second = provider.combatant(second, level)?;
    let battle = Battle::new(first, second, seed).map_err(|e| e.to_string())?;
    let result = battle.run();
    serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
}
