#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::string::String;

use crate::{
    common::Player,
    config::MAX_BOARD_SIZE,
    game::{GameState, Outcome},
};

/// One line of input from the terminal player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Place a stone, e.g. `H8`.
    Place(usize, usize),
    /// Ask the engine for a suggestion.
    Hint,
    /// Write the board as JSON to a file.
    Save(PathBuf),
    /// Start a new game.
    Restart,
    Quit,
}

/// Column letter plus 1-based row, e.g. `(7, 7)` -> `H8`. Columns past `Z`
/// have no letter and print as `(x, y)`.
pub fn coord_to_string(x: usize, y: usize) -> String {
    match u8::try_from(x) {
        Ok(col) if x < MAX_BOARD_SIZE => std::format!("{}{}", (b'A' + col) as char, y + 1),
        _ => std::format!("({}, {})", x, y),
    }
}

/// Parse `H8`-style coordinates for a board of side `size`.
pub fn parse_coord(input: &str, size: usize) -> Option<(usize, usize)> {
    let input = input.trim();
    if input.len() < 2 {
        return None;
    }
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let x = (col_ch as u8 - b'A') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 || x >= size || row > size {
        return None;
    }
    Some((x, row - 1))
}

/// Parse a command line. Returns `None` for anything unrecognised.
pub fn parse_command(input: &str, size: usize) -> Option<CliCommand> {
    let mut parts = input.split_whitespace();
    let head = parts.next()?;
    match head.to_ascii_lowercase().as_str() {
        "hint" => Some(CliCommand::Hint),
        "restart" | "new" => Some(CliCommand::Restart),
        "quit" | "exit" | "q" => Some(CliCommand::Quit),
        "save" => parts.next().map(|p| CliCommand::Save(PathBuf::from(p))),
        _ => parse_coord(head, size).map(|(x, y)| CliCommand::Place(x, y)),
    }
}

/// Prompt until a valid command is entered. `Ok(None)` on end of input.
pub fn read_command<R: BufRead>(input: &mut R, size: usize) -> io::Result<Option<CliCommand>> {
    loop {
        std::print!("Your move (e.g. H8, hint, save <file>, restart, quit): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line, size) {
            Some(cmd) => return Ok(Some(cmd)),
            None => std::println!("Invalid input"),
        }
    }
}

fn stone_name(player: Player) -> &'static str {
    match player {
        Player::One => "X",
        Player::Two => "O",
    }
}

/// Print the board with the last move and the game status.
pub fn print_game(game: &GameState) {
    std::println!();
    std::print!("{}", game.board());
    if let Some(mv) = game.last_move() {
        std::println!(
            "Last move: {} {}",
            stone_name(mv.player),
            coord_to_string(mv.x, mv.y)
        );
    }
    match game.outcome() {
        Outcome::InProgress => {}
        Outcome::Won(p) => {
            let line = game
                .winning_line()
                .unwrap_or_default()
                .iter()
                .map(|&(x, y)| coord_to_string(x, y))
                .collect::<Vec<_>>()
                .join(" ");
            std::println!("{} ({}) wins: {}", p, stone_name(p), line);
        }
        Outcome::Drawn => std::println!("Board full: draw"),
    }
}
