use alloc::vec;
use alloc::vec::Vec;

use crate::{
    board::Board,
    common::{Cell, GameError, MoveError, Player},
    config::DEFAULT_BOARD_SIZE,
    snapshot::Snapshot,
};

/// A single placement: who put a stone where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub x: usize,
    pub y: usize,
    pub player: Player,
}

impl Move {
    pub fn new(x: usize, y: usize, player: Player) -> Self {
        Self { x, y, player }
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    InProgress,
    Won(Player),
    Drawn,
}

impl Outcome {
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Core game logic: the board, whose turn it is and whether the game is over.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGameState")
)]
pub struct GameState {
    board: Board,
    starting: Player,
    to_move: Player,
    ply: u32,
    outcome: Outcome,
    last_move: Option<Move>,
}

impl GameState {
    /// Create a game on an empty `size × size` board with `starting` to move.
    pub fn new(size: usize, starting: Player) -> Result<Self, GameError> {
        Ok(Self::fresh(Board::new(size)?, starting))
    }

    /// Standard-size game with player one to move.
    pub fn standard() -> Result<Self, GameError> {
        Self::new(DEFAULT_BOARD_SIZE, Player::One)
    }

    fn fresh(board: Board, starting: Player) -> Self {
        Self {
            board,
            starting,
            to_move: starting,
            ply: 0,
            outcome: Outcome::InProgress,
            last_move: None,
        }
    }

    /// Restore a game from a raw grid, bypassing move validation.
    ///
    /// The ply counter becomes the stone count. The side to move is `starting`
    /// when both sides have as many stones, otherwise whichever side has fewer.
    /// The outcome is recomputed by a full-board scan.
    pub fn from_snapshot(snapshot: &Snapshot, starting: Player) -> Result<Self, GameError> {
        let board = snapshot.to_board()?;
        let ones = board.count_stones(Player::One);
        let twos = board.count_stones(Player::Two);
        let to_move = if ones == twos {
            starting
        } else if ones < twos {
            Player::One
        } else {
            Player::Two
        };
        let outcome = scan_outcome(&board);
        log::debug!(
            "loaded {}x{} snapshot: {} stones, {} to move, {:?}",
            board.size(),
            board.size(),
            board.stone_count(),
            to_move,
            outcome
        );
        Ok(Self {
            ply: board.stone_count() as u32,
            board,
            starting,
            to_move,
            outcome,
            last_move: None,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Player expected to move next.
    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[inline]
    pub fn starting_player(&self) -> Player {
        self.starting
    }

    /// Number of moves applied (or stones loaded) so far.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// `true` once the game is won or drawn.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_over()
    }

    /// Bounds, occupancy and game-over test. Does not check whose turn it is.
    pub fn is_valid_move(&self, x: usize, y: usize, _player: Player) -> bool {
        self.check_move(x, y).is_ok()
    }

    fn check_move(&self, x: usize, y: usize) -> Result<(), MoveError> {
        if self.outcome.is_over() {
            return Err(MoveError::GameOver);
        }
        self.board.check_placement(x, y)
    }

    /// Place a stone for `player` and recompute the outcome through `(x, y)`.
    /// Rejected moves leave the game untouched.
    pub fn apply_move(&mut self, x: usize, y: usize, player: Player) -> Result<Outcome, GameError> {
        self.check_move(x, y)?;
        self.board.place(x, y, player)?;
        self.ply += 1;
        self.to_move = player.opponent();
        self.last_move = Some(Move::new(x, y, player));
        self.outcome = if self.board.completes_five(x, y, player) {
            Outcome::Won(player)
        } else if self.board.is_full() {
            Outcome::Drawn
        } else {
            Outcome::InProgress
        };
        log::trace!("ply {}: {:?} at ({}, {}) -> {:?}", self.ply, player, x, y, self.outcome);
        Ok(self.outcome)
    }

    /// Convenience wrapper over [`GameState::apply_move`].
    pub fn apply(&mut self, mv: Move) -> Result<Outcome, GameError> {
        self.apply_move(mv.x, mv.y, mv.player)
    }

    /// Cells of the winning line, if the game has been won.
    pub fn winning_line(&self) -> Option<Vec<(usize, usize)>> {
        let Outcome::Won(winner) = self.outcome else {
            return None;
        };
        match self.last_move {
            Some(mv) if mv.player == winner => self.board.line_through(mv.x, mv.y, winner),
            _ => self.board.find_five().map(|(_, line)| line),
        }
    }

    /// Start over on an empty board of the same size.
    pub fn reset(&mut self) {
        let size = self.board.size();
        let board = Board::from_cells(size, vec![Cell::Empty; size * size]);
        *self = Self::fresh(board, self.starting);
    }

    /// Replace the whole game with a loaded grid. On error nothing changes.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        *self = Self::from_snapshot(snapshot, self.starting)?;
        Ok(())
    }

    /// Raw grid of the current board.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.board)
    }
}

/// Outcome of `board` from a full scan.
fn scan_outcome(board: &Board) -> Outcome {
    match board.find_five() {
        Some((winner, _)) => Outcome::Won(winner),
        None if board.is_full() => Outcome::Drawn,
        None => Outcome::InProgress,
    }
}

/// Wire form of [`GameState`]; the bookkeeping must agree with the board.
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawGameState {
    board: Board,
    starting: Player,
    to_move: Player,
    ply: u32,
    outcome: Outcome,
    last_move: Option<Move>,
}

#[cfg(feature = "std")]
impl TryFrom<RawGameState> for GameState {
    type Error = GameError;

    fn try_from(raw: RawGameState) -> Result<Self, GameError> {
        let inconsistent = |what| GameError::from(crate::common::SnapshotError::Inconsistent(what));
        if raw.ply as usize != raw.board.stone_count() {
            return Err(inconsistent("ply differs from the stone count"));
        }
        if raw.outcome != scan_outcome(&raw.board) {
            return Err(inconsistent("outcome differs from the board"));
        }
        if let Some(mv) = raw.last_move {
            if raw.board.get(mv.x, mv.y) != Some(Cell::Stone(mv.player)) {
                return Err(inconsistent("last move is not on the board"));
            }
            if raw.to_move != mv.player.opponent() {
                return Err(inconsistent("side to move played the last move"));
            }
        }
        Ok(Self {
            board: raw.board,
            starting: raw.starting,
            to_move: raw.to_move,
            ply: raw.ply,
            outcome: raw.outcome,
            last_move: raw.last_move,
        })
    }
}
