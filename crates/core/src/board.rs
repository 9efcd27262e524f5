//! Board module - manages the game grid
//!
//! The board is a `columns x rows` grid where each cell is blank or holds a color index.
//! Uses a flat vector in row-major order; its size is fixed at construction.
//! Coordinates: (col, row) where col grows left to right and row grows top to bottom.
//! Negative rows are "above the board": never on-board, but pieces may pass through them.

use thiserror::Error;

use crate::types::{Cell, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// Rejected board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must be at least {min}x{min} cells, got {columns}x{rows}")]
    TooSmall { columns: u16, rows: u16, min: u16 },
    #[error("board must be at most {max}x{max} cells, got {columns}x{rows}")]
    TooLarge { columns: u16, rows: u16, max: u16 },
}

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: u16,
    rows: u16,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new blank board
    pub fn new(columns: u16, rows: u16) -> Result<Self, BoardError> {
        if columns < MIN_BOARD_DIM || rows < MIN_BOARD_DIM {
            return Err(BoardError::TooSmall {
                columns,
                rows,
                min: MIN_BOARD_DIM,
            });
        }
        if columns > MAX_BOARD_DIM || rows > MAX_BOARD_DIM {
            return Err(BoardError::TooLarge {
                columns,
                rows,
                max: MAX_BOARD_DIM,
            });
        }
        Ok(Self {
            columns,
            rows,
            cells: vec![None; columns as usize * rows as usize],
        })
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i16, row: i16) -> Option<usize> {
        if !self.is_on_board(col, row) {
            return None;
        }
        Some(row as usize * self.columns as usize + col as usize)
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// True iff `0 <= col < columns` and `0 <= row < rows`
    pub fn is_on_board(&self, col: i16, row: i16) -> bool {
        col >= 0 && (col as i32) < self.columns as i32 && row >= 0 && (row as i32) < self.rows as i32
    }

    /// Get cell at (col, row). Returns None if off the board.
    pub fn get(&self, col: i16, row: i16) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row). Returns false if off the board.
    pub fn set(&mut self, col: i16, row: i16, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// On the board and not holding a color
    pub fn is_blank(&self, col: i16, row: i16) -> bool {
        matches!(self.get(col, row), Some(None))
    }

    /// Every column of `row` holds a color. Off-board rows are never complete.
    pub fn is_complete_line(&self, row: i16) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow one row of cells
    pub fn row(&self, row: i16) -> Option<&[Cell]> {
        if row < 0 || row as i32 >= self.rows as i32 {
            return None;
        }
        let width = self.columns as usize;
        let start = row as usize * width;
        Some(&self.cells[start..start + width])
    }

    /// Remove every complete line and return how many were removed.
    ///
    /// Rows above a removed line shift down by one per removed line and the vacated
    /// rows at the top become blank. The scan runs bottom to top and compacts in one
    /// pass, so stacked complete lines are all removed: the result is the same as
    /// re-testing a row index after each single-row shift.
    pub fn remove_complete_lines(&mut self) -> usize {
        let width = self.columns as usize;
        let mut removed = 0usize;
        let mut write_y = self.rows as usize;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_complete_line(read_y as i16) {
                removed += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Blank every cell. Dimensions are kept.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Count of colored cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
