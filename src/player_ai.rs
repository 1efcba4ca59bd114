use rand::rngs::SmallRng;

use crate::{
    ai::{MoveSelector, SearchConfig, SearchStats},
    common::GameError,
    game::GameState,
    player::Agent,
};

/// Search-based opponent. Ignores the RNG: its choices are deterministic.
pub struct AiAgent {
    selector: MoveSelector,
}

impl AiAgent {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            selector: MoveSelector::new(config),
        }
    }

    /// Counters from this agent's most recent search.
    pub fn last_stats(&self) -> SearchStats {
        self.selector.stats()
    }
}

impl Default for AiAgent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Agent for AiAgent {
    fn name(&self) -> &'static str {
        "ai"
    }

    fn select_move(&mut self, _rng: &mut SmallRng, game: &GameState) -> Result<(usize, usize), GameError> {
        if game.outcome().is_over() {
            return Err(GameError::NoLegalMoves);
        }
        let mv = self.selector.select_move(game.board(), game.to_move())?;
        Ok((mv.x, mv.y))
    }
}
