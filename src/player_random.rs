use alloc::vec::Vec;

use rand::{rngs::SmallRng, Rng};

use crate::{common::GameError, game::GameState, player::Agent};

/// Plays a uniformly random empty cell. Useful as a baseline opponent.
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_move(&mut self, rng: &mut SmallRng, game: &GameState) -> Result<(usize, usize), GameError> {
        if game.outcome().is_over() {
            return Err(GameError::NoLegalMoves);
        }
        let empty: Vec<(usize, usize)> = game.board().empty_cells().collect();
        if empty.is_empty() {
            return Err(GameError::NoLegalMoves);
        }
        Ok(empty[rng.random_range(0..empty.len())])
    }
}
