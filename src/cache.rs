//! Per-search position cache: Zobrist keys and a direct-mapped
//! transposition table.
//!
//! Keys come from a fixed seed so two searches over the same board visit and
//! cache positions identically.

use alloc::vec::Vec;
use core::fmt;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    board::Board,
    common::{Cell, Player},
    config::MAX_CACHE_BITS,
};

const KEY_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random key per (cell, player) plus one toggled when player two is to move.
#[derive(Debug, Clone)]
pub(crate) struct ZobristKeys {
    size: usize,
    cells: Vec<[u64; 2]>,
    two_to_move: u64,
}

#[inline]
fn player_index(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}

impl ZobristKeys {
    pub(crate) fn new(size: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(KEY_SEED);
        let cells = (0..size * size)
            .map(|_| [rng.random(), rng.random()])
            .collect();
        Self {
            size,
            cells,
            two_to_move: rng.random(),
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Full hash of `board` with `to_move` to play.
    pub(crate) fn hash(&self, board: &Board, to_move: Player) -> u64 {
        let mut h = 0;
        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Cell::Stone(p) = *cell {
                    h ^= self.cells[y * self.size + x][player_index(p)];
                }
            }
        }
        if to_move == Player::Two {
            h ^= self.two_to_move;
        }
        h
    }

    /// Hash after `player` places at `(x, y)` and the turn passes.
    #[inline]
    pub(crate) fn after_place(&self, hash: u64, x: usize, y: usize, player: Player) -> u64 {
        hash ^ self.cells[y * self.size + x][player_index(player)] ^ self.two_to_move
    }
}

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Exact,
    /// Search failed high: true value is at least the score.
    Lower,
    /// Search failed low: true value is at most the score.
    Upper,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: u64,
    depth: u8,
    score: i32,
    bound: Bound,
}

/// Fixed-size table indexed by the low bits of the key. A newer entry
/// replaces an older one unless the older was searched deeper.
#[derive(Clone)]
pub(crate) struct TranspositionTable {
    slots: Vec<Option<Entry>>,
    mask: usize,
    filled: u64,
}

impl TranspositionTable {
    pub(crate) fn new(bits: u8) -> Self {
        let len = 1usize << bits.min(MAX_CACHE_BITS);
        Self {
            slots: alloc::vec![None; len],
            mask: len - 1,
            filled: 0,
        }
    }

    /// Occupied slots.
    pub(crate) fn len(&self) -> u64 {
        self.filled
    }

    /// A cached score usable inside the `(alpha, beta)` window, if any.
    pub(crate) fn probe(&self, key: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.slots[key as usize & self.mask]?;
        if entry.key != key || entry.depth < depth {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    pub(crate) fn store(&mut self, key: u64, depth: u8, score: i32, bound: Bound) {
        let idx = key as usize & self.mask;
        match self.slots[idx] {
            Some(old) if old.key != key && old.depth > depth => return,
            Some(_) => {}
            None => self.filled += 1,
        }
        self.slots[idx] = Some(Entry {
            key,
            depth,
            score,
            bound,
        });
    }
}

impl fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("slots", &self.slots.len())
            .field("filled", &self.filled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_path_independent() {
        let keys = ZobristKeys::new(9);
        let mut a = Board::new(9).unwrap();
        a.place(4, 4, Player::One).unwrap();
        a.place(5, 5, Player::Two).unwrap();
        let mut b = Board::new(9).unwrap();
        b.place(5, 5, Player::Two).unwrap();
        b.place(4, 4, Player::One).unwrap();
        assert_eq!(keys.hash(&a, Player::One), keys.hash(&b, Player::One));
        assert_ne!(keys.hash(&a, Player::One), keys.hash(&a, Player::Two));
    }

    #[test]
    fn incremental_hash_matches_full_hash() {
        let keys = ZobristKeys::new(9);
        let mut board = Board::new(9).unwrap();
        board.place(1, 2, Player::Two).unwrap();
        let before = keys.hash(&board, Player::One);
        board.place(3, 3, Player::One).unwrap();
        assert_eq!(
            keys.after_place(before, 3, 3, Player::One),
            keys.hash(&board, Player::Two)
        );
    }

    #[test]
    fn keys_are_reproducible() {
        let board = {
            let mut b = Board::new(15).unwrap();
            b.place(7, 7, Player::One).unwrap();
            b
        };
        assert_eq!(
            ZobristKeys::new(15).hash(&board, Player::Two),
            ZobristKeys::new(15).hash(&board, Player::Two)
        );
    }

    #[test]
    fn probe_respects_bounds_and_depth() {
        let mut table = TranspositionTable::new(4);
        table.store(42, 2, 50, Bound::Lower);
        assert_eq!(table.probe(42, 2, 0, 40), Some(50));
        assert_eq!(table.probe(42, 2, 0, 60), None);
        assert_eq!(table.probe(42, 3, 0, 40), None);
        assert_eq!(table.probe(43, 2, 0, 40), None);

        table.store(7, 1, -5, Bound::Upper);
        assert_eq!(table.probe(7, 1, 0, 10), Some(-5));
        assert_eq!(table.probe(7, 1, -10, 10), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn deeper_entry_survives_collision() {
        let mut table = TranspositionTable::new(1);
        table.store(2, 3, 10, Bound::Exact);
        table.store(4, 1, 20, Bound::Exact);
        assert_eq!(table.probe(2, 3, -100, 100), Some(10));
        assert_eq!(table.probe(4, 1, -100, 100), None);
        table.store(2, 1, 30, Bound::Exact);
        assert_eq!(table.probe(2, 1, -100, 100), Some(30));
        assert_eq!(table.len(), 1);
    }
}
