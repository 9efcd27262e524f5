//! Board layout: fitting the board into the terminal and mapping cells to screen.
//!
//! One board cell is `2 * scale` terminal columns by `scale` rows, which keeps boxes
//! roughly square on common terminal fonts. The fit picks the largest scale that
//! leaves the requested margins blank and room for the side panel.

use thiserror::Error;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Proportion of each edge of the viewport that stays blank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 0.025,
            right: 0.025,
            bottom: 0.025,
            left: 0.025,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("a {columns}x{rows} board does not fit in a {width}x{height} terminal")]
    DoesNotFit {
        width: u16,
        height: u16,
        columns: u16,
        rows: u16,
    },
    #[error("margins must be within [0, 1) and leave room on each axis")]
    InvalidMargins,
}

/// Terminal columns per board column at scale 1
pub const CELL_ASPECT: u16 = 2;

/// Border drawn around the board on every side
const BORDER: u16 = 1;

/// Where the board sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Screen position of board cell (0, 0)
    pub origin_x: u16,
    pub origin_y: u16,
    /// Terminal columns per board cell
    pub cell_w: u16,
    /// Terminal rows per board cell
    pub cell_h: u16,
    pub columns: u16,
    pub rows: u16,
}

impl BoardLayout {
    /// `origin + index * cell_size`
    pub fn board_to_screen(&self, col: u16, row: u16) -> (u16, u16) {
        (
            self.origin_x + col * self.cell_w,
            self.origin_y + row * self.cell_h,
        )
    }

    /// Board area plus border: (x, y, width, height)
    pub fn frame_rect(&self) -> (u16, u16, u16, u16) {
        (
            self.origin_x - BORDER,
            self.origin_y - BORDER,
            self.columns * self.cell_w + 2 * BORDER,
            self.rows * self.cell_h + 2 * BORDER,
        )
    }

    /// First column right of the border
    pub fn right_of_frame(&self) -> u16 {
        let (x, _, w, _) = self.frame_rect();
        x + w
    }
}

/// Blank terminal lines/columns taken by a margin proportion (rounded up)
fn blank(total: u16, proportion: f32) -> u16 {
    let kept = (total as f32 - proportion * total as f32).floor().max(0.0) as u16;
    total - kept.min(total)
}

/// Largest layout for a `columns x rows` board that fits `viewport`.
///
/// `panel_width` terminal columns to the right of the border are reserved for the
/// side panel. The board is bottom-aligned above the bottom margin and the board
/// plus panel are centered horizontally.
pub fn fit_board_to_viewport(
    viewport: Viewport,
    margins: Margins,
    panel_width: u16,
    columns: u16,
    rows: u16,
) -> Result<BoardLayout, LayoutError> {
    let valid = |p: f32| (0.0..1.0).contains(&p);
    if ![margins.top, margins.right, margins.bottom, margins.left]
        .into_iter()
        .all(valid)
        || margins.left + margins.right >= 1.0
        || margins.top + margins.bottom >= 1.0
    {
        return Err(LayoutError::InvalidMargins);
    }

    let does_not_fit = LayoutError::DoesNotFit {
        width: viewport.width,
        height: viewport.height,
        columns,
        rows,
    };
    if columns == 0 || rows == 0 {
        return Err(does_not_fit);
    }

    let blank_left = blank(viewport.width, margins.left);
    let blank_right = blank(viewport.width, margins.right);
    let blank_top = blank(viewport.height, margins.top);
    let blank_bottom = blank(viewport.height, margins.bottom);

    let avail_w = viewport
        .width
        .saturating_sub(blank_left + blank_right + panel_width + 2 * BORDER);
    let avail_h = viewport
        .height
        .saturating_sub(blank_top + blank_bottom + 2 * BORDER);

    let scale = (avail_w / columns.saturating_mul(CELL_ASPECT)).min(avail_h / rows);
    if scale == 0 {
        return Err(does_not_fit);
    }

    let cell_w = scale * CELL_ASPECT;
    let cell_h = scale;
    let block_w = columns * cell_w + 2 * BORDER + panel_width;
    let inner_w = viewport.width - blank_left - blank_right;
    let frame_x = blank_left + (inner_w - block_w) / 2;
    let frame_bottom = viewport.height - blank_bottom;
    let frame_y = frame_bottom - (rows * cell_h + 2 * BORDER);

    Ok(BoardLayout {
        origin_x: frame_x + BORDER,
        origin_y: frame_y + BORDER,
        cell_w,
        cell_h,
        columns,
        rows,
    })
}
