// Move selection for the automated opponent.
//
// Negamax with alpha-beta pruning over a private copy of the board. Only
// cells near existing stones are searched, ordered by how much they change
// the position for either side. The evaluation is kept incrementally: every
// placement adds the change of the (at most 20) five-cell windows through
// the placed cell. Interior nodes are cached in a transposition table that
// lives for one search.

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    board::Board,
    cache::{Bound, TranspositionTable, ZobristKeys},
    common::{Cell, GameError, Player},
    config::{
        DEFAULT_CACHE_BITS, DEFAULT_CANDIDATE_RADIUS, DEFAULT_MAX_CANDIDATES,
        DEFAULT_SEARCH_DEPTH, DIRECTIONS, WIN_LENGTH,
    },
    game::Move,
};

/// Score of a won position. Dominates every heuristic value.
pub const WIN_SCORE: i32 = 1_000_000_000;

const INF: i32 = WIN_SCORE + 1;

/// Value of a five-cell window holding `k` stones of one side and none of the
/// other. Strictly increasing; a finished line is worth far more than any
/// number of fours so that move ordering always looks at it first.
const WEIGHTS: [i32; WIN_LENGTH + 1] = [0, 1, 10, 100, 10_000, 1_000_000];

/// Tunables for [`MoveSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Plies searched below the root, at least 1.
    pub depth: u8,
    /// Chebyshev distance from an existing stone for a cell to be a candidate.
    pub radius: usize,
    /// Keep only this many best-ordered candidates per node.
    pub max_candidates: Option<usize>,
    /// Transposition table holds `2^cache_bits` entries; `0` disables it.
    pub cache_bits: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            radius: DEFAULT_CANDIDATE_RADIUS,
            max_candidates: Some(DEFAULT_MAX_CANDIDATES),
            cache_bits: DEFAULT_CACHE_BITS,
        }
    }
}

/// Counters from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    pub nodes: u64,
    pub pruned: u64,
    pub depth: u8,
    /// Positions stored in the transposition table.
    pub cache_size: u64,
    /// Nodes answered from the table without searching.
    pub cache_hits: u64,
}

/// The chosen move together with its score from the mover's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mv: Move,
    pub score: i32,
    pub stats: SearchStats,
}

/// Depth-bounded adversarial search. Never touches the caller's board.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    config: SearchConfig,
    stats: SearchStats,
    keys: Option<ZobristKeys>,
    table: Option<TranspositionTable>,
}

impl MoveSelector {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            keys: None,
            table: None,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Counters of the last call to [`MoveSelector::search`].
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Pick a cell for `player`. Fails with `NoLegalMoves` on a finished or full board.
    pub fn select_move(&mut self, board: &Board, player: Player) -> Result<Move, GameError> {
        self.search(board, player).map(|outcome| outcome.mv)
    }

    /// Like [`MoveSelector::select_move`], also reporting score and counters.
    pub fn search(&mut self, board: &Board, player: Player) -> Result<SearchOutcome, GameError> {
        if board.is_full() || board.find_five().is_some() {
            return Err(GameError::NoLegalMoves);
        }
        let depth = self.config.depth.max(1);
        self.stats = SearchStats {
            nodes: 1,
            depth,
            ..SearchStats::default()
        };
        self.prepare_cache(board.size());

        let mut work = board.clone();
        let (eval, _) = window_totals(&work);
        let hash = self.keys.as_ref().map_or(0, |k| k.hash(&work, player));
        let mut alpha = -INF;
        let mut best: Option<(usize, usize, i32)> = None;

        for (x, y) in self.candidates(&work, player) {
            let score =
                self.score_move(&mut work, x, y, player, depth - 1, 0, alpha, INF, eval, hash);
            // strict comparison keeps the first of equally scored candidates
            if best.map_or(true, |(_, _, b)| score > b) {
                best = Some((x, y, score));
            }
            alpha = alpha.max(score);
            if score == WIN_SCORE {
                break;
            }
        }

        self.stats.cache_size = self.table.as_ref().map_or(0, TranspositionTable::len);
        let (x, y, score) = best.ok_or(GameError::NoLegalMoves)?;
        log::debug!(
            "search for {:?}: ({}, {}) score {} [depth {}, {} nodes, {} cutoffs, {} cached, {} cache hits]",
            player,
            x,
            y,
            score,
            depth,
            self.stats.nodes,
            self.stats.pruned,
            self.stats.cache_size,
            self.stats.cache_hits
        );
        Ok(SearchOutcome {
            mv: Move::new(x, y, player),
            score,
            stats: self.stats,
        })
    }

    /// Fresh table for this search; keys are reused while the board size holds.
    fn prepare_cache(&mut self, size: usize) {
        if self.config.cache_bits == 0 {
            self.keys = None;
            self.table = None;
            return;
        }
        if self.keys.as_ref().map_or(true, |k| k.size() != size) {
            self.keys = Some(ZobristKeys::new(size));
        }
        self.table = Some(TranspositionTable::new(self.config.cache_bits));
    }

    /// Value for `side` of playing `(x, y)` with `depth` plies left afterwards.
    /// `ply` is the distance of this move from the root, `hash` the key of the
    /// position before the move.
    #[allow(clippy::too_many_arguments)]
    fn score_move(
        &mut self,
        board: &mut Board,
        x: usize,
        y: usize,
        side: Player,
        depth: u8,
        ply: i32,
        alpha: i32,
        beta: i32,
        eval: i32,
        hash: u64,
    ) -> i32 {
        if board.completes_five(x, y, side) {
            return WIN_SCORE - ply;
        }
        let delta = placement_delta(board, x, y, side);
        let child = self
            .keys
            .as_ref()
            .map_or(0, |k| k.after_place(hash, x, y, side));
        board.place_unchecked(x, y, side);
        let score = -self.negamax(
            board,
            side.opponent(),
            depth,
            ply + 1,
            -beta,
            -alpha,
            eval + delta,
            child,
        );
        board.clear_unchecked(x, y);
        score
    }

    // A position's distance from the root is fixed by its stone count, so
    // cached scores need no ply adjustment.
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        side: Player,
        depth: u8,
        ply: i32,
        mut alpha: i32,
        beta: i32,
        eval: i32,
        hash: u64,
    ) -> i32 {
        self.stats.nodes += 1;
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return perspective(eval, side);
        }
        if let Some(score) = self
            .table
            .as_ref()
            .and_then(|t| t.probe(hash, depth, alpha, beta))
        {
            self.stats.cache_hits += 1;
            return score;
        }

        let alpha_orig = alpha;
        let mut best = -INF;
        for (x, y) in self.candidates(board, side) {
            let score = self.score_move(board, x, y, side, depth - 1, ply, alpha, beta, eval, hash);
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                self.stats.pruned += 1;
                break;
            }
        }

        if let Some(table) = self.table.as_mut() {
            let bound = if best <= alpha_orig {
                Bound::Upper
            } else if best >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            table.store(hash, depth, best, bound);
        }
        best
    }

    /// Empty cells near existing stones, best first. Ties keep row-major order.
    fn candidates(&self, board: &Board, side: Player) -> Vec<(usize, usize)> {
        let size = board.size();
        if board.is_board_empty() {
            return vec![(size / 2, size / 2)];
        }

        let radius = self.config.radius as isize;
        let mut near = vec![false; size * size];
        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        if let Some((nx, ny)) = board.step(x, y, dx, dy, 1) {
                            near[ny * size + nx] = true;
                        }
                    }
                }
            }
        }

        let mut moves: Vec<(usize, usize)> = board
            .empty_cells()
            .filter(|&(x, y)| near[y * size + x])
            .collect();
        if moves.is_empty() {
            moves = board.empty_cells().collect();
        }

        let opponent = side.opponent();
        let mut ranked: Vec<(i32, (usize, usize))> = moves
            .into_iter()
            .map(|(x, y)| {
                let attack = perspective(placement_delta(board, x, y, side), side);
                let defence = perspective(placement_delta(board, x, y, opponent), opponent);
                (attack + defence, (x, y))
            })
            .collect();
        // stable: equal priorities stay in row-major order
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        if let Some(limit) = self.config.max_candidates {
            ranked.truncate(limit.max(1));
        }
        ranked.into_iter().map(|(_, cell)| cell).collect()
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Pick a move for `player` with the default search settings.
pub fn select_move(board: &Board, player: Player) -> Result<Move, GameError> {
    MoveSelector::default().select_move(board, player)
}

/// Heuristic value of `board` for `player`: positive is good for `player`.
///
/// A completed five anywhere resolves to `±WIN_SCORE`.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    match window_totals(board) {
        (_, Some(winner)) if winner == player => WIN_SCORE,
        (_, Some(_)) => -WIN_SCORE,
        (total, None) => perspective(total, player),
    }
}

/// Flip a score kept from player one's side to `side`'s point of view.
#[inline]
fn perspective(score: i32, side: Player) -> i32 {
    match side {
        Player::One => score,
        Player::Two => -score,
    }
}

#[inline]
fn window_value(ones: usize, twos: usize) -> i32 {
    if twos == 0 {
        WEIGHTS[ones]
    } else if ones == 0 {
        -WEIGHTS[twos]
    } else {
        0
    }
}

/// Stone counts `(player one, player two)` of the window starting at `(x, y)`.
/// The whole window must lie on the board.
fn window_counts(board: &Board, x: usize, y: usize, dx: isize, dy: isize) -> (usize, usize) {
    let mut ones = 0;
    let mut twos = 0;
    for k in 0..WIN_LENGTH as isize {
        let cell = board
            .step(x, y, dx, dy, k)
            .and_then(|(cx, cy)| board.get(cx, cy));
        match cell {
            Some(Cell::Stone(Player::One)) => ones += 1,
            Some(Cell::Stone(Player::Two)) => twos += 1,
            _ => {}
        }
    }
    (ones, twos)
}

/// Sum of all window values from player one's side, plus the owner of a
/// completed five if one exists.
fn window_totals(board: &Board) -> (i32, Option<Player>) {
    let mut total = 0;
    let mut five = None;
    let reach = WIN_LENGTH as isize - 1;
    for y in 0..board.size() {
        for x in 0..board.size() {
            for &(dx, dy) in DIRECTIONS.iter() {
                if board.step(x, y, dx, dy, reach).is_none() {
                    continue;
                }
                let (ones, twos) = window_counts(board, x, y, dx, dy);
                if five.is_none() {
                    if ones == WIN_LENGTH {
                        five = Some(Player::One);
                    } else if twos == WIN_LENGTH {
                        five = Some(Player::Two);
                    }
                }
                total += window_value(ones, twos);
            }
        }
    }
    (total, five)
}

/// Change of the player-one-relative evaluation if `side` plays the empty cell `(x, y)`.
fn placement_delta(board: &Board, x: usize, y: usize, side: Player) -> i32 {
    let reach = WIN_LENGTH as isize - 1;
    let mut delta = 0;
    for &(dx, dy) in DIRECTIONS.iter() {
        for back in 0..WIN_LENGTH as isize {
            let Some((sx, sy)) = board.step(x, y, dx, dy, -back) else {
                break;
            };
            if board.step(sx, sy, dx, dy, reach).is_none() {
                continue;
            }
            let (ones, twos) = window_counts(board, sx, sy, dx, dy);
            let after = match side {
                Player::One => window_value(ones + 1, twos),
                Player::Two => window_value(ones, twos + 1),
            };
            delta += after - window_value(ones, twos);
        }
    }
    delta
}
