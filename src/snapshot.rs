//! Raw `N×N` integer grid used to save and restore boards.
//!
//! Codes: `0` empty, `1` player one (human), `2` player two (automated
//! opponent). Rows are listed top to bottom, each row left to right.

use alloc::vec::Vec;

use crate::{
    board::Board,
    common::{Cell, GameError, SnapshotError},
    config::is_supported_size,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Snapshot {
    rows: Vec<Vec<i64>>,
}

impl Snapshot {
    /// Wrap rows without validating them; validation happens on load.
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Validate dimensions and cell codes and build the board.
    pub fn to_board(&self) -> Result<Board, GameError> {
        let size = self.rows.len();
        if !is_supported_size(size) {
            return Err(SnapshotError::UnsupportedSize(size).into());
        }
        let mut cells = Vec::with_capacity(size * size);
        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != size {
                return Err(SnapshotError::RaggedRow {
                    row: y,
                    expected: size,
                    found: row.len(),
                }
                .into());
            }
            for (x, &value) in row.iter().enumerate() {
                let cell = u8::try_from(value)
                    .ok()
                    .and_then(Cell::from_code)
                    .ok_or(SnapshotError::InvalidCell { x, y, value })?;
                cells.push(cell);
            }
        }
        Ok(Board::from_cells(size, cells))
    }
}

impl From<&Board> for Snapshot {
    fn from(board: &Board) -> Self {
        let rows = board
            .rows()
            .map(|row| row.iter().map(|c| i64::from(c.code())).collect())
            .collect();
        Snapshot { rows }
    }
}

#[cfg(feature = "std")]
impl Snapshot {
    /// Parse a JSON array of rows, e.g. `[[0,1,0,...],...]`.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        serde_json::from_str(text).context("snapshot is not a JSON array of integer rows")
    }

    /// Pretty JSON, one row per line.
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        let mut out = String::from("[\n");
        for (i, row) in self.rows.iter().enumerate() {
            out.push_str("  ");
            out.push_str(&serde_json::to_string(row)?);
            if i + 1 < self.rows.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push(']');
        Ok(out)
    }
}
