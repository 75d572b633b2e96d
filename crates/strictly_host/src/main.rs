//! Strictly Ledger - CLI
//!
//! Derives game addresses and plays games against an in-memory ledger.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use strictly_host::cli::{Cli, Command, parse_moves, resolve_player};
use strictly_host::{HostConfig, MemoryStore, Runtime};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HostConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => HostConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Address {
            player_one,
            player_two,
            count,
        } => print_address(config, &player_one, &player_two, count),
        Command::Play {
            player_one,
            player_two,
            moves,
        } => run_play(config, &player_one, &player_two, &moves),
    }
}

/// Print the derived address of a game
#[instrument(skip(config))]
fn print_address(config: HostConfig, player_one: &str, player_two: &str, count: u64) -> Result<()> {
    let runtime = Runtime::new(MemoryStore::new(), config);
    let address = runtime.game_address(
        &resolve_player(player_one),
        &resolve_player(player_two),
        count,
    );
    println!("{}", address);
    Ok(())
}

/// Play a full game in a fresh in-memory ledger
#[instrument(skip(config))]
fn run_play(config: HostConfig, player_one: &str, player_two: &str, moves: &str) -> Result<()> {
    let tiles = parse_moves(moves)?;
    let player_one = resolve_player(player_one);
    let player_two = resolve_player(player_two);

    info!(moves = tiles.len(), "Starting game");
    let runtime = Runtime::new(MemoryStore::new(), config);
    let report = runtime.play_match(&player_one, &player_two, &tiles)?;

    println!("Game {}", report.address);
    println!("{}", report.game.board().display());
    println!("Turn: {}", report.game.turn());
    println!("State: {}", report.game.state());
    if let Some((tile, err)) = &report.rejected {
        let kind = err.program_kind().map(|k| k.name()).unwrap_or("HostError");
        println!("Rejected move {} after {} accepted: {}", tile, report.accepted, kind);
        println!("{}", err);
    }
    Ok(())
}
