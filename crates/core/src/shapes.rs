//! Shapes module - the static catalog of piece templates
//!
//! Every kind maps to an ordered list of 5x5 occupancy grids, one per orientation.
//! Rotation is nothing more than stepping through that list modulo its length, so
//! the catalog itself never needs validation.

use crate::types::{ShapeKind, TEMPLATE_SIZE};

/// One orientation of a shape: `grid[row][col]`, `true` where a box is present.
pub type Template = [[bool; TEMPLATE_SIZE]; TEMPLATE_SIZE];

/// Offset of a single box relative to the template's top-left corner
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 box offsets from the template origin
pub type PieceShape = [MinoOffset; 4];

const fn grid(rows: [&[u8; TEMPLATE_SIZE]; TEMPLATE_SIZE]) -> Template {
    let mut out = [[false; TEMPLATE_SIZE]; TEMPLATE_SIZE];
    let mut y = 0;
    while y < TEMPLATE_SIZE {
        let mut x = 0;
        while x < TEMPLATE_SIZE {
            out[y][x] = rows[y][x] == b'#';
            x += 1;
        }
        y += 1;
    }
    out
}

const S_TEMPLATES: [Template; 2] = [
    grid([b".....", b".....", b"..##.", b".##..", b"....."]),
    grid([b".....", b"..#..", b"..##.", b"...#.", b"....."]),
];

const Z_TEMPLATES: [Template; 2] = [
    grid([b".....", b".....", b".##..", b"..##.", b"....."]),
    grid([b".....", b"..#..", b".##..", b".#...", b"....."]),
];

const I_TEMPLATES: [Template; 2] = [
    grid([b"..#..", b"..#..", b"..#..", b"..#..", b"....."]),
    grid([b".....", b".....", b"####.", b".....", b"....."]),
];

const O_TEMPLATES: [Template; 1] = [grid([b".....", b".....", b".##..", b".##..", b"....."])];

const J_TEMPLATES: [Template; 4] = [
    grid([b".....", b".#...", b".###.", b".....", b"....."]),
    grid([b".....", b"..##.", b"..#..", b"..#..", b"....."]),
    grid([b".....", b".....", b".###.", b"...#.", b"....."]),
    grid([b".....", b"..#..", b"..#..", b".##..", b"....."]),
];

const L_TEMPLATES: [Template; 4] = [
    grid([b".....", b"...#.", b".###.", b".....", b"....."]),
    grid([b".....", b"..#..", b"..#..", b"..##.", b"....."]),
    grid([b".....", b".....", b".###.", b".#...", b"....."]),
    grid([b".....", b".##..", b"..#..", b"..#..", b"....."]),
];

const T_TEMPLATES: [Template; 4] = [
    grid([b".....", b"..#..", b".###.", b".....", b"....."]),
    grid([b".....", b"..#..", b"..##.", b"..#..", b"....."]),
    grid([b".....", b".....", b".###.", b"..#..", b"....."]),
    grid([b".....", b"..#..", b".##..", b"..#..", b"....."]),
];

/// All orientation templates for a kind, in clockwise order
pub fn templates(kind: ShapeKind) -> &'static [Template] {
    match kind {
        ShapeKind::S => &S_TEMPLATES,
        ShapeKind::Z => &Z_TEMPLATES,
        ShapeKind::J => &J_TEMPLATES,
        ShapeKind::L => &L_TEMPLATES,
        ShapeKind::I => &I_TEMPLATES,
        ShapeKind::O => &O_TEMPLATES,
        ShapeKind::T => &T_TEMPLATES,
    }
}

/// Number of distinct orientations for a kind (1, 2 or 4)
pub fn orientation_count(kind: ShapeKind) -> usize {
    templates(kind).len()
}

/// Template for a kind and orientation. The orientation wraps modulo the count.
pub fn template(kind: ShapeKind, orientation: usize) -> &'static Template {
    let all = templates(kind);
    &all[orientation % all.len()]
}

/// Get the occupied box offsets for a kind and orientation, scanned row by row
pub fn get_shape(kind: ShapeKind, orientation: usize) -> PieceShape {
    let grid = template(kind, orientation);
    let mut out = [(0i8, 0i8); 4];
    let mut n = 0usize;
    for (y, row) in grid.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            if filled && n < out.len() {
                out[n] = (x as i8, y as i8);
                n += 1;
            }
        }
    }
    out
}
