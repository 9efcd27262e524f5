//! GameView: maps a session [`Frame`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::engine::Frame;
use crate::fb::{CellStyle, FrameBuffer, BLACK, BORDER, WHITE};
use crate::layout::{fit_board_to_viewport, BoardLayout, LayoutError, Margins, Viewport};
use crate::core::Piece;

/// Box glyph. The dense shade mixes a box's base and light colors.
const BOX: char = '▓';

/// Terminal columns reserved right of the board for the side panel
pub const PANEL_WIDTH: u16 = 12;

/// Gap between the board border and the panel text
const PANEL_GAP: u16 = 2;

/// A lightweight terminal view of one distractor frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView {
    margins: Margins,
}

impl GameView {
    pub fn new(margins: Margins) -> Self {
        Self { margins }
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Fit the board described by `frame` into `viewport`
    pub fn layout(&self, frame: &Frame<'_>, viewport: Viewport) -> Result<BoardLayout, LayoutError> {
        fit_board_to_viewport(
            viewport,
            self.margins,
            PANEL_WIDTH,
            frame.board.columns(),
            frame.board.rows(),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse one framebuffer across frames.
    pub fn render_into(
        &self,
        frame: &Frame<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Result<BoardLayout, LayoutError> {
        let layout = self.layout(frame, viewport)?;

        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let (x, y, w, h) = layout.frame_rect();
        draw_border(fb, x, y, w, h, CellStyle::new(BORDER, BLACK));

        let board = frame.board;
        for row in 0..board.rows() {
            for col in 0..board.columns() {
                if let Some(Some(color)) = board.get(col as i16, row as i16) {
                    fill_cell(fb, &layout, col, row, CellStyle::for_box(color));
                }
            }
        }

        if let Some(piece) = frame.falling {
            for (col, row) in piece.cells() {
                // Boxes still above the board are not drawn.
                if board.is_on_board(col, row) {
                    fill_cell(fb, &layout, col as u16, row as u16, CellStyle::for_box(piece.color));
                }
            }
        }

        self.draw_side_panel(fb, frame, &layout);
        Ok(layout)
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &Frame<'_>, viewport: Viewport) -> Result<FrameBuffer, LayoutError> {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb)?;
        Ok(fb)
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, frame: &Frame<'_>, layout: &BoardLayout) {
        let panel_x = layout.right_of_frame().saturating_add(PANEL_GAP);
        let label = CellStyle::new(WHITE, BLACK).bold();
        let value = CellStyle::new(WHITE, BLACK);

        let mut y = layout.origin_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        draw_preview(fb, frame.next, panel_x, y);
        y = y.saturating_add(5);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, frame.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, frame.lines_cleared, value);
    }
}

/// Draw a piece's boxes at scale 1 with its topmost box on row `y`
fn draw_preview(fb: &mut FrameBuffer, piece: &Piece, x: u16, y: u16) {
    let style = CellStyle::for_box(piece.color);
    let shape = piece.shape();
    let top = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
    for (dx, dy) in shape {
        let px = x.saturating_add(dx as u16 * 2);
        let py = y.saturating_add((dy - top) as u16);
        fb.fill_rect(px, py, 2, 1, BOX, style);
    }
}

fn fill_cell(fb: &mut FrameBuffer, layout: &BoardLayout, col: u16, row: u16, style: CellStyle) {
    let (px, py) = layout.board_to_screen(col, row);
    fb.fill_rect(px, py, layout.cell_w, layout.cell_h, BOX, style);
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;
    use crate::types::{ColorIndex, ShapeKind};
    use std::time::Duration;

    fn frame<'a>(board: &'a Board, falling: Option<&'a Piece>, next: &'a Piece) -> Frame<'a> {
        Frame {
            board,
            falling,
            next,
            level: 3,
            lines_cleared: 27,
            losses: 0,
            remaining: Duration::from_secs(5),
        }
    }

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width()).map(|x| fb.get(x, y).unwrap_or_default().ch).collect()
    }

    #[test]
    fn landed_cells_are_drawn_two_columns_wide() {
        let mut board = Board::new(10, 20).unwrap();
        board.set(0, 19, Some(ColorIndex::Red));
        let next = Piece::new(ShapeKind::O, 0, ColorIndex::Blue, 10);

        let view = GameView::default();
        let mut fb = FrameBuffer::new(1, 1);
        let layout = view
            .render_into(&frame(&board, None, &next), Viewport::new(80, 24), &mut fb)
            .unwrap();

        let (px, py) = layout.board_to_screen(0, 19);
        let style = CellStyle::for_box(ColorIndex::Red);
        assert_eq!(fb.get(px, py).unwrap().ch, BOX);
        assert_eq!(fb.get(px, py).unwrap().style, style);
        assert_eq!(fb.get(px + 1, py).unwrap().style, style);
        assert_eq!(fb.get(px + 2, py).unwrap().ch, ' ');
    }

    #[test]
    fn falling_piece_above_board_is_clipped() {
        let board = Board::new(10, 20).unwrap();
        // Vertical I at y = -2 has two boxes above the board and two on rows 0..=1.
        let falling = Piece::new(ShapeKind::I, 0, ColorIndex::Green, 10);
        let next = Piece::new(ShapeKind::O, 0, ColorIndex::Blue, 10);

        let fb = GameView::default()
            .render(&frame(&board, Some(&falling), &next), Viewport::new(80, 24))
            .unwrap();

        let green = CellStyle::for_box(ColorIndex::Green);
        let drawn = (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get(x, y).unwrap().style == green)
            .count();
        assert_eq!(drawn, 2 * 2);
    }

    #[test]
    fn side_panel_shows_labels_and_counters() {
        let board = Board::new(10, 20).unwrap();
        let next = Piece::new(ShapeKind::T, 0, ColorIndex::Yellow, 10);
        let view = GameView::default();
        let mut fb = FrameBuffer::new(80, 24);
        let layout = view
            .render_into(&frame(&board, None, &next), Viewport::new(80, 24), &mut fb)
            .unwrap();

        let panel_rows: Vec<String> = (layout.origin_y..layout.origin_y + 12)
            .map(|y| row_text(&fb, y))
            .collect();
        assert!(panel_rows[0].contains("NEXT"));
        assert!(panel_rows[6].contains("LEVEL"));
        assert!(panel_rows[7].contains('3'));
        assert!(panel_rows[9].contains("LINES"));
        assert!(panel_rows[10].contains("27"));
    }

    #[test]
    fn border_surrounds_board() {
        let board = Board::new(10, 20).unwrap();
        let next = Piece::new(ShapeKind::S, 0, ColorIndex::Red, 10);
        let view = GameView::default();
        let mut fb = FrameBuffer::new(80, 24);
        let layout = view
            .render_into(&frame(&board, None, &next), Viewport::new(80, 24), &mut fb)
            .unwrap();

        let (x, y, w, h) = layout.frame_rect();
        assert_eq!(fb.get(x, y).unwrap().ch, '┌');
        assert_eq!(fb.get(x + w - 1, y + h - 1).unwrap().ch, '┘');
    }

    #[test]
    fn too_small_viewport_is_an_error() {
        let board = Board::new(10, 20).unwrap();
        let next = Piece::new(ShapeKind::S, 0, ColorIndex::Red, 10);
        let result = GameView::default().render(&frame(&board, None, &next), Viewport::new(20, 8));
        assert!(matches!(result, Err(LayoutError::DoesNotFit { .. })));
    }
}
