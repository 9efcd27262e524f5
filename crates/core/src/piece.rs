//! Piece module - a falling shape and its legality rules
//!
//! A piece is a small value: kind, orientation index, position and color. It holds
//! no reference to the board; every rule takes the board explicitly.
//!
//! The plain movers (`move_left`, `move_right`, `move_down`) do not validate.
//! Callers check the matching `legal_*` predicate first.

use crate::board::Board;
use crate::rng::RandomSource;
use crate::shapes::{get_shape, orientation_count, PieceShape};
use crate::types::{ColorIndex, ShapeKind, COLOR_COUNT, SPAWN_Y, TEMPLATE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    orientation: usize,
    /// Board column of the template's left edge
    pub x: i16,
    /// Board row of the template's top edge (negative while entering)
    pub y: i16,
    pub color: ColorIndex,
}

impl Piece {
    /// Create a piece at the spawn position for a board `columns` wide.
    /// The orientation wraps modulo the kind's orientation count.
    pub fn new(kind: ShapeKind, orientation: usize, color: ColorIndex, columns: u16) -> Self {
        Self {
            kind,
            orientation: orientation % orientation_count(kind),
            x: Self::spawn_x(columns),
            y: SPAWN_Y,
            color,
        }
    }

    /// Random kind, orientation and color at the spawn position
    pub fn random(rng: &mut impl RandomSource, columns: u16) -> Self {
        let kind = ShapeKind::ALL[rng.next_range(ShapeKind::ALL.len() as u32) as usize];
        let orientation = rng.next_range(orientation_count(kind) as u32) as usize;
        let color = ColorIndex::from_index(rng.next_range(COLOR_COUNT as u32) as u8)
            .unwrap_or(ColorIndex::Blue);
        Self::new(kind, orientation, color, columns)
    }

    /// Column that horizontally centers a template on the board
    pub fn spawn_x(columns: u16) -> i16 {
        (columns / 2) as i16 - (TEMPLATE_SIZE / 2) as i16
    }

    /// Move to an explicit position
    pub fn at(self, x: i16, y: i16) -> Self {
        Self { x, y, ..self }
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    /// Box offsets for the current orientation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.orientation)
    }

    /// Absolute board coordinates of every box
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> {
        let (x, y) = (self.x, self.y);
        self.shape()
            .into_iter()
            .map(move |(dx, dy)| (x + dx as i16, y + dy as i16))
    }

    /// Would the piece fit after shifting by (dx, dy)?
    ///
    /// Boxes above the board (row < 0) are ignored as long as their column is on the
    /// board. Every other box must be on the board and on a blank cell.
    pub fn is_valid_position(&self, board: &Board, dx: i16, dy: i16) -> bool {
        let columns = board.columns() as i16;
        self.cells().all(|(col, row)| {
            let (col, row) = (col + dx, row + dy);
            if col < 0 || col >= columns {
                return false;
            }
            row < 0 || board.is_blank(col, row)
        })
    }

    pub fn legal_left(&self, board: &Board) -> bool {
        self.is_valid_position(board, -1, 0)
    }

    pub fn legal_right(&self, board: &Board) -> bool {
        self.is_valid_position(board, 1, 0)
    }

    pub fn legal_down(&self, board: &Board) -> bool {
        self.is_valid_position(board, 0, 1)
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    /// Drop to the lowest legal row. Returns the number of rows travelled.
    pub fn move_to_bottom(&mut self, board: &Board) -> u16 {
        let mut distance = 0u16;
        while self.legal_down(board) {
            self.move_down();
            distance += 1;
        }
        distance
    }

    /// Step to the next orientation; revert if it does not fit. Returns whether it stuck.
    pub fn rotate_clockwise(&mut self, board: &Board) -> bool {
        let count = orientation_count(self.kind);
        let previous = self.orientation;
        self.orientation = (self.orientation + 1) % count;
        if !self.is_valid_position(board, 0, 0) {
            self.orientation = previous;
            return false;
        }
        true
    }

    /// Step to the previous orientation; revert if it does not fit.
    pub fn rotate_counterclockwise(&mut self, board: &Board) -> bool {
        let count = orientation_count(self.kind);
        let previous = self.orientation;
        self.orientation = (self.orientation + count - 1) % count;
        if !self.is_valid_position(board, 0, 0) {
            self.orientation = previous;
            return false;
        }
        true
    }

    /// Write this piece's color into the board at its current position.
    ///
    /// Boxes still above the board are dropped. Returns how many boxes were written.
    pub fn add_to_board(&self, board: &mut Board) -> usize {
        self.cells()
            .filter(|&(col, row)| board.set(col, row, Some(self.color)))
            .count()
    }
}
