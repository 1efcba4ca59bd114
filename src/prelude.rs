//! Commonly used types and utilities for ease of import.

pub use crate::{
    select_move, Agent, AiAgent, Board, Cell, GameError, GameState, Move, MoveSelector, Outcome,
    Player, RandomAgent, SearchConfig, Snapshot,
};

#[cfg(feature = "std")]
pub use crate::{print_game, GameApi, GameMode, GameSession, SessionConfig};
