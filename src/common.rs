//! Common types for Gomoku: player identities, cell contents and engine errors.

/// One of the two sides. `One` is the human seat, `Two` the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Integer code used by board snapshots (`1` or `2`).
    pub fn code(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl core::fmt::Display for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Player::One => write!(f, "player one"),
            Player::Two => write!(f, "player two"),
        }
    }
}

/// Contents of a single grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Stone(Player),
}

impl Cell {
    /// Snapshot code: `0` empty, `1` player one, `2` player two.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Stone(p) => p.code(),
        }
    }

    /// Inverse of [`Cell::code`]; `None` for anything outside `0..=2`.
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Stone(Player::One)),
            2 => Some(Cell::Stone(Player::Two)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Coordinates fall outside the board.
    OutOfBounds { x: usize, y: usize },
    /// The target cell already holds a stone.
    Occupied { x: usize, y: usize },
    /// The game has already been won or drawn.
    GameOver,
    /// It is the other side's turn.
    NotYourTurn { expected: Player },
}

/// Why a board snapshot could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// Row count is outside the supported board sizes.
    UnsupportedSize(usize),
    /// A row's length differs from the number of rows.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A cell holds something other than `0`, `1` or `2`.
    InvalidCell { x: usize, y: usize, value: i64 },
    /// A flat cell list whose length is not `size * size`.
    CellCount { expected: usize, found: usize },
    /// Saved game fields disagree with the stones on the board.
    Inconsistent(&'static str),
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Move violated bounds, occupancy or game-over rules.
    InvalidMove(MoveError),
    /// Search requested on a finished game or a board without empty cells.
    NoLegalMoves,
    /// Loaded grid has the wrong dimensions or an invalid cell value.
    MalformedSnapshot(SnapshotError),
    /// Requested board size is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    InvalidBoardSize(usize),
}

impl From<MoveError> for GameError {
    fn from(err: MoveError) -> Self {
        GameError::InvalidMove(err)
    }
}

impl From<SnapshotError> for GameError {
    fn from(err: SnapshotError) -> Self {
        GameError::MalformedSnapshot(err)
    }
}

impl core::fmt::Display for MoveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MoveError::OutOfBounds { x, y } => write!(f, "({}, {}) is outside the board", x, y),
            MoveError::Occupied { x, y } => write!(f, "({}, {}) is already occupied", x, y),
            MoveError::GameOver => write!(f, "the game is already over"),
            MoveError::NotYourTurn { expected } => write!(f, "it is {}'s turn", expected),
        }
    }
}

impl core::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SnapshotError::UnsupportedSize(n) => write!(f, "unsupported board size {}", n),
            SnapshotError::RaggedRow { row, expected, found } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            SnapshotError::InvalidCell { x, y, value } => {
                write!(f, "invalid cell value {} at ({}, {})", value, x, y)
            }
            SnapshotError::CellCount { expected, found } => {
                write!(f, "{} cells, expected {}", found, expected)
            }
            SnapshotError::Inconsistent(what) => write!(f, "inconsistent game: {}", what),
        }
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidMove(e) => write!(f, "Invalid move: {}", e),
            GameError::NoLegalMoves => write!(f, "No legal moves available"),
            GameError::MalformedSnapshot(e) => write!(f, "Malformed snapshot: {}", e),
            GameError::InvalidBoardSize(n) => write!(f, "Board size {} is not supported", n),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
