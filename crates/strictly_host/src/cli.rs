//! Command-line interface for strictly_ledger.

use clap::{Parser, Subcommand};
use derive_more::{Display, Error};
use std::path::PathBuf;
use strictly_program::{PlayerKey, Tile};

/// Strictly Ledger - tic-tac-toe as a ledger-hosted program
#[derive(Parser, Debug)]
#[command(name = "strictly_ledger")]
#[command(about = "Run tic-tac-toe transactions against an in-memory ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the derived address of a game
    Address {
        /// First player (64 hex characters or a label)
        #[arg(long)]
        player_one: String,

        /// Second player (64 hex characters or a label)
        #[arg(long)]
        player_two: String,

        /// Registry counter value at creation
        #[arg(long, default_value = "0")]
        count: u64,
    },

    /// Play a full game, alternating signers
    Play {
        /// First player (64 hex characters or a label)
        #[arg(long, default_value = "player-one")]
        player_one: String,

        /// Second player (64 hex characters or a label)
        #[arg(long, default_value = "player-two")]
        player_two: String,

        /// Moves as space-separated `row,column` pairs, e.g. "0,0 1,0 0,1"
        #[arg(long)]
        moves: String,
    },
}

/// Resolves a player argument: hex keys are taken as-is, anything else is a label.
pub fn resolve_player(arg: &str) -> PlayerKey {
    arg.parse()
        .unwrap_or_else(|_| PlayerKey::from_label(arg))
}

/// Error parsing a move list.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid move '{}': expected row,column", token)]
pub struct ParseMovesError {
    /// The offending token.
    pub token: String,
}

/// Parses `"r,c r,c ..."` into tiles. Coordinates may be negative.
pub fn parse_moves(moves: &str) -> Result<Vec<Tile>, ParseMovesError> {
    moves
        .split_whitespace()
        .map(|token| -> Result<Tile, ParseMovesError> {
            let invalid = || ParseMovesError {
                token: token.to_string(),
            };
            let (row, column) = token.split_once(',').ok_or_else(invalid)?;
            let row = row.trim().parse().map_err(|_| invalid())?;
            let column = column.trim().parse().map_err(|_| invalid())?;
            Ok(Tile::new(row, column))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            parse_moves("0,0  1,2\n-1,3").expect("valid moves"),
            vec![Tile::new(0, 0), Tile::new(1, 2), Tile::new(-1, 3)]
        );
    }

    #[test]
    fn test_parse_moves_rejects_garbage() {
        let err = parse_moves("0,0 middle").unwrap_err();
        assert_eq!(err.token, "middle");
        assert!(parse_moves("1;1").is_err());
    }

    #[test]
    fn test_resolve_player() {
        let key = PlayerKey::from_label("alice");
        assert_eq!(resolve_player(&key.to_string()), key);
        assert_eq!(resolve_player("alice"), key);
    }

    #[test]
    fn test_cli_parses_play() {
        let cli = Cli::try_parse_from(["strictly_ledger", "play", "--moves", "0,0 1,1"])
            .expect("valid arguments");
        assert!(matches!(cli.command, Command::Play { .. }));
        assert!(cli.config.is_none());
    }
}
