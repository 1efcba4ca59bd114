#![cfg(feature = "std")]

//! Front-end facing game API.
//!
//! A [`GameSession`] owns the [`GameState`] and runs the search on a blocking
//! worker over a copy of the board. Every mutating method takes `&mut self`,
//! so at most one search is in flight per session and no human move can land
//! while it runs. In [`GameMode::TwoPlayer`] both seats are human and the
//! engine only gives hints.

use std::time::{Duration, Instant};

use anyhow::Context;

use crate::{
    ai::{MoveSelector, SearchConfig, SearchOutcome},
    board::Board,
    common::{GameError, MoveError, Player},
    config::DEFAULT_BOARD_SIZE,
    game::{GameState, Move, Outcome},
    snapshot::Snapshot,
};

/// Operations a front end (terminal, GUI, headless driver) needs.
#[async_trait::async_trait]
pub trait GameApi: Send {
    fn board(&self) -> &Board;
    fn size(&self) -> usize;
    fn outcome(&self) -> Outcome;
    fn to_move(&self) -> Player;

    /// Attempt the human's move at `(x, y)`. In a two-player game the stone
    /// goes to whichever side is to move.
    fn play_human(&mut self, x: usize, y: usize) -> Result<Outcome, GameError>;

    /// Let the automated opponent choose and apply its move.
    async fn play_ai(&mut self) -> anyhow::Result<Move>;

    /// The move the engine would play for the human to move, without applying it.
    async fn suggest(&mut self) -> anyhow::Result<Move>;

    /// Replace the game with a saved grid.
    fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), GameError>;

    fn snapshot(&self) -> Snapshot;

    /// Start a new game with the same size and settings.
    fn reset(&mut self);
}

/// Who sits opposite the first human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    VsEngine,
    TwoPlayer,
}

/// Settings for a new [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub size: usize,
    /// Seat taken by the human; the engine plays the other one.
    pub human: Player,
    /// Side that opens the game.
    pub starting: Player,
    pub mode: GameMode,
    pub search: SearchConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            human: Player::One,
            starting: Player::One,
            mode: GameMode::VsEngine,
            search: SearchConfig::default(),
        }
    }
}

/// Result and wall-clock time of the last search run by a session.
#[derive(Debug, Clone, Copy)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub elapsed: Duration,
}

pub struct GameSession {
    state: GameState,
    human: Player,
    mode: GameMode,
    search: SearchConfig,
    last_search: Option<SearchReport>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        Ok(Self {
            state: GameState::new(config.size, config.starting)?,
            human: config.human,
            mode: config.mode,
            search: config.search,
            last_search: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn ai(&self) -> Player {
        self.human.opponent()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// `true` when the next stone is a human's to place.
    pub fn awaits_human(&self) -> bool {
        self.mode == GameMode::TwoPlayer || self.state.to_move() == self.human
    }

    /// Side a human plays next, or `NotYourTurn` while the engine is to move.
    /// Finished games pass through so the move itself reports `GameOver`.
    fn human_side(&self) -> Result<Player, GameError> {
        let to_move = self.state.to_move();
        match self.mode {
            GameMode::TwoPlayer => Ok(to_move),
            GameMode::VsEngine if self.state.outcome().is_over() || to_move == self.human => {
                Ok(self.human)
            }
            GameMode::VsEngine => Err(MoveError::NotYourTurn { expected: to_move }.into()),
        }
    }

    pub fn last_search(&self) -> Option<&SearchReport> {
        self.last_search.as_ref()
    }

    /// Run the selector for `side` on a blocking worker over a board copy.
    async fn run_search(&mut self, side: Player) -> anyhow::Result<SearchReport> {
        if self.state.outcome().is_over() {
            return Err(GameError::NoLegalMoves.into());
        }
        let board = self.state.board().clone();
        let config = self.search;
        let started = Instant::now();
        let outcome = tokio::task::spawn_blocking(move || MoveSelector::new(config).search(&board, side))
            .await
            .context("search worker failed")??;
        let report = SearchReport {
            outcome,
            elapsed: started.elapsed(),
        };
        self.last_search = Some(report);
        Ok(report)
    }
}

#[async_trait::async_trait]
impl GameApi for GameSession {
    fn board(&self) -> &Board {
        self.state.board()
    }

    fn size(&self) -> usize {
        self.state.size()
    }

    fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    fn to_move(&self) -> Player {
        self.state.to_move()
    }

    fn play_human(&mut self, x: usize, y: usize) -> Result<Outcome, GameError> {
        let side = self.human_side()?;
        let outcome = self.state.apply_move(x, y, side)?;
        log::debug!("{} played ({}, {}) -> {:?}", side, x, y, outcome);
        Ok(outcome)
    }

    async fn play_ai(&mut self) -> anyhow::Result<Move> {
        if self.mode == GameMode::TwoPlayer {
            anyhow::bail!("no engine seat in a two-player game");
        }
        let ai = self.ai();
        if !self.state.outcome().is_over() && self.state.to_move() != ai {
            return Err(GameError::from(MoveError::NotYourTurn {
                expected: self.state.to_move(),
            })
            .into());
        }
        let report = self.run_search(ai).await?;
        let mv = report.outcome.mv;
        let outcome = self
            .state
            .apply(mv)
            .context("engine produced an unplayable move")?;
        log::info!(
            "engine played ({}, {}) in {:.3}s, score {}, {} nodes, {} cutoffs, {} cache hits -> {:?}",
            mv.x,
            mv.y,
            report.elapsed.as_secs_f64(),
            report.outcome.score,
            report.outcome.stats.nodes,
            report.outcome.stats.pruned,
            report.outcome.stats.cache_hits,
            outcome
        );
        Ok(mv)
    }

    async fn suggest(&mut self) -> anyhow::Result<Move> {
        let side = self.human_side()?;
        let report = self.run_search(side).await?;
        Ok(report.outcome.mv)
    }

    fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        self.state.load_snapshot(snapshot)?;
        self.last_search = None;
        log::info!(
            "loaded {}x{} board, {} to move",
            self.state.size(),
            self.state.size(),
            self.state.to_move()
        );
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    fn reset(&mut self) {
        self.state.reset();
        self.last_search = None;
    }
}
