//! Square Gomoku grid: occupancy, bounds checks and line scans.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Cell, GameError, MoveError, Player};
use crate::config::{is_supported_size, DIRECTIONS, WIN_LENGTH};

/// An `N×N` grid stored row-major. `(x, y)` is (column, row), zero based.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBoard")
)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    stones: usize,
}

impl Board {
    /// Create an empty board with side `size`.
    pub fn new(size: usize) -> Result<Self, GameError> {
        if !is_supported_size(size) {
            return Err(GameError::InvalidBoardSize(size));
        }
        Ok(Board {
            size,
            cells: vec![Cell::Empty; size * size],
            stones: 0,
        })
    }

    /// Build a board from row-major cells. Caller guarantees `cells.len() == size * size`.
    pub(crate) fn from_cells(size: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        let stones = cells.iter().filter(|c| !c.is_empty()).count();
        Board { size, cells, stones }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stones on the board.
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    /// Number of stones belonging to `player`.
    pub fn count_stones(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Stone(player))
            .count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[y * self.size + x])
        } else {
            None
        }
    }

    /// `true` when `(x, y)` is on the board and empty.
    #[inline]
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(Cell::Empty)
    }

    /// Occupancy and bounds test without touching the board.
    pub fn check_placement(&self, x: usize, y: usize) -> Result<(), MoveError> {
        match self.get(x, y) {
            None => Err(MoveError::OutOfBounds { x, y }),
            Some(Cell::Stone(_)) => Err(MoveError::Occupied { x, y }),
            Some(Cell::Empty) => Ok(()),
        }
    }

    /// Put a stone for `player` at `(x, y)`.
    pub fn place(&mut self, x: usize, y: usize, player: Player) -> Result<(), MoveError> {
        self.check_placement(x, y)?;
        self.place_unchecked(x, y, player);
        Ok(())
    }

    /// Search-internal placement; `(x, y)` must be in bounds and empty.
    #[inline]
    pub(crate) fn place_unchecked(&mut self, x: usize, y: usize, player: Player) {
        let idx = y * self.size + x;
        debug_assert!(self.cells[idx].is_empty());
        self.cells[idx] = Cell::Stone(player);
        self.stones += 1;
    }

    /// Undo a search-internal placement.
    #[inline]
    pub(crate) fn clear_unchecked(&mut self, x: usize, y: usize) {
        let idx = y * self.size + x;
        debug_assert!(!self.cells[idx].is_empty());
        self.cells[idx] = Cell::Empty;
        self.stones -= 1;
    }

    /// Step `k` cells from `(x, y)` along `(dx, dy)`, staying on the board.
    #[inline]
    pub(crate) fn step(
        &self,
        x: usize,
        y: usize,
        dx: isize,
        dy: isize,
        k: isize,
    ) -> Option<(usize, usize)> {
        let nx = x as isize + dx * k;
        let ny = y as isize + dy * k;
        if nx < 0 || ny < 0 || nx >= self.size as isize || ny >= self.size as isize {
            None
        } else {
            Some((nx as usize, ny as usize))
        }
    }

    /// Consecutive `player` stones in one direction from `(x, y)`, excluding `(x, y)`.
    fn ray(&self, x: usize, y: usize, dx: isize, dy: isize, player: Player) -> usize {
        let mut n = 0;
        let mut k = 1;
        while let Some((nx, ny)) = self.step(x, y, dx, dy, k) {
            if self.cells[ny * self.size + nx] != Cell::Stone(player) {
                break;
            }
            n += 1;
            k += 1;
        }
        n
    }

    /// Length of the `player` run through `(x, y)` along `(dx, dy)`, counting
    /// `(x, y)` itself whether or not it is already occupied.
    pub fn run_length(&self, x: usize, y: usize, dx: isize, dy: isize, player: Player) -> usize {
        1 + self.ray(x, y, dx, dy, player) + self.ray(x, y, -dx, -dy, player)
    }

    /// `true` if a stone of `player` at `(x, y)` makes (or made) five or more in a row.
    pub fn completes_five(&self, x: usize, y: usize, player: Player) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.run_length(x, y, dx, dy, player) >= WIN_LENGTH)
    }

    /// Cells of the first winning run through `(x, y)`, ordered along the line.
    pub fn line_through(&self, x: usize, y: usize, player: Player) -> Option<Vec<(usize, usize)>> {
        for &(dx, dy) in DIRECTIONS.iter() {
            if self.run_length(x, y, dx, dy, player) < WIN_LENGTH {
                continue;
            }
            let back = self.ray(x, y, -dx, -dy, player) as isize;
            let fwd = self.ray(x, y, dx, dy, player) as isize;
            let line = (-back..=fwd)
                .filter_map(|k| self.step(x, y, dx, dy, k))
                .collect();
            return Some(line);
        }
        None
    }

    /// Full-board scan for any completed line. Used when no last move is known.
    pub fn find_five(&self) -> Option<(Player, Vec<(usize, usize)>)> {
        for y in 0..self.size {
            for x in 0..self.size {
                if let Cell::Stone(p) = self.cells[y * self.size + x] {
                    if let Some(line) = self.line_through(x, y, p) {
                        return Some((p, line));
                    }
                }
            }
        }
        None
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(move |(i, _)| (i % size, i / size))
    }

    /// Rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }
}

/// Wire form of [`Board`], checked before it becomes one.
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Cell>,
    // recounted from `cells`
    #[serde(default, rename = "stones")]
    _stones: usize,
}

#[cfg(feature = "std")]
impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self, GameError> {
        use crate::common::SnapshotError;

        if !is_supported_size(raw.size) {
            return Err(SnapshotError::UnsupportedSize(raw.size).into());
        }
        let expected = raw.size * raw.size;
        if raw.cells.len() != expected {
            return Err(SnapshotError::CellCount {
                expected,
                found: raw.cells.len(),
            }
            .into());
        }
        Ok(Board::from_cells(raw.size, raw.cells))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, stones: {} }}", self.size, self.stones)?;
        fmt::Display::fmt(self, f)
    }
}

/// Renders `X` for player one, `O` for player two, `.` for empty, with
/// column letters across the top and 1-based row numbers down the side.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        writeln!(f)?;
        for (y, row) in self.rows().enumerate() {
            write!(f, "{:2} ", y + 1)?;
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Stone(Player::One) => 'X',
                    Cell::Stone(Player::Two) => 'O',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
