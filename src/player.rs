use rand::rngs::SmallRng;

use crate::{
    common::{GameError, Player},
    game::{GameState, Move, Outcome},
};

/// Interface implemented by anything that can choose where to play.
pub trait Agent {
    /// Short label used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Choose a cell for `game.to_move()`.
    fn select_move(&mut self, rng: &mut SmallRng, game: &GameState) -> Result<(usize, usize), GameError>;

    /// Inform the agent of a move applied to the game (by either side).
    fn handle_move(&mut self, _mv: Move, _outcome: Outcome) {}
}

/// Play `game` to the end, asking `one` for player one's moves and `two` for
/// player two's. Returns the final outcome.
pub fn play_match(
    game: &mut GameState,
    one: &mut dyn Agent,
    two: &mut dyn Agent,
    rng: &mut SmallRng,
) -> Result<Outcome, GameError> {
    while !game.outcome().is_over() {
        let side = game.to_move();
        let (x, y) = match side {
            Player::One => one.select_move(rng, game)?,
            Player::Two => two.select_move(rng, game)?,
        };
        let outcome = game.apply_move(x, y, side)?;
        let mv = Move::new(x, y, side);
        one.handle_move(mv, outcome);
        two.handle_move(mv, outcome);
    }
    log::debug!("match finished after {} plies: {:?}", game.ply(), game.outcome());
    Ok(game.outcome())
}
