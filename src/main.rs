//! Stellar Reach - headless combat runner
//!
//! Loads a scenario (or generates a seeded skirmish), runs the combat tick
//! loop and prints the combat log.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use stellar_reach::core::config::GameSettings;
use stellar_reach::core::error::Result;
use stellar_reach::events::{CombatEvent, LoggedEvent};
use stellar_reach::galaxy::{generate_skirmish, Galaxy, Scenario, SkirmishParams};
use stellar_reach::simulation::Game;
use stellar_reach::technology::ResearchTechnology;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Run combat ticks over a galaxy and print what happened
#[derive(Parser, Debug)]
#[command(name = "stellar-reach")]
#[command(about = "Resolve carrier movement, collisions and combat tick by tick")]
struct Args {
    /// Scenario JSON file; a seeded skirmish is generated when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Game settings TOML file; defaults apply when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Seed for the generated skirmish
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    ticks: u64,
    events: &'a [LoggedEvent],
    ships_by_player: BTreeMap<u32, u64>,
}

fn ships_by_player(galaxy: &Galaxy) -> BTreeMap<u32, u64> {
    galaxy
        .ships_by_player()
        .into_iter()
        .map(|(player, ships)| (player.0, ships))
        .collect()
}

fn describe(galaxy: &Galaxy, entry: &LoggedEvent) -> String {
    let result = entry.event.result();
    let sides = format!(
        "defenders {:?} {} -> {}, attackers {:?} {} -> {}",
        result.defender.players.iter().map(|p| p.0).collect::<Vec<_>>(),
        result.defender.before,
        result.defender.after,
        result.attacker.players.iter().map(|p| p.0).collect::<Vec<_>>(),
        result.attacker.before,
        result.attacker.after,
    );
    match &entry.event {
        CombatEvent::StarCombat { star, capture, .. } => {
            let name = galaxy.star(*star).map_or("?", |s| s.name.as_str());
            let captured = capture
                .as_ref()
                .map(|c| format!(", captured by player {} (+{} credits)", c.new_owner.0, c.credits_reward))
                .unwrap_or_default();
            format!("[tick {}] battle at {}: {}{}", entry.tick, name, sides, captured)
        }
        CombatEvent::CarrierCombat { location, .. } => format!(
            "[tick {}] carriers clash at ({:.1}, {:.1}): {}",
            entry.tick, location.x, location.y, sides
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stellar_reach=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => generate_skirmish(&SkirmishParams {
            seed: args.seed,
            ..SkirmishParams::default()
        }),
    };
    let settings = match &args.settings {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };

    let mut game = Game::from_scenario(scenario, settings)?;
    tracing::info!(
        stars = game.galaxy.stars.len(),
        carriers = game.galaxy.carriers.len(),
        ticks = args.ticks,
        "starting run"
    );

    game.run(args.ticks, &ResearchTechnology);

    match args.format {
        OutputFormat::Json => {
            let summary = RunSummary {
                ticks: game.tick,
                events: &game.log.entries,
                ships_by_player: ships_by_player(&game.galaxy),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            for entry in &game.log.entries {
                println!("{}", describe(&game.galaxy, entry));
            }
            println!();
            println!("=== After {} ticks ===", game.tick);
            for (player, ships) in ships_by_player(&game.galaxy) {
                let name = game
                    .galaxy
                    .players
                    .get(player as usize)
                    .map_or("?", |p| p.name.as_str());
                println!("  {:<12} {:>6} ships", name, ships);
            }
        }
    }

    Ok(())
}
