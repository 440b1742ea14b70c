use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::BOARD_WIDTH;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::S,
            4 => PieceKind::Z,
            5 => PieceKind::J,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Returns the shape matrix this kind has when it enters the board.
    #[must_use]
    pub fn spawn_shape(self) -> Shape {
        const C: bool = true;
        const E: bool = false;

        let rows: &[&[bool]] = match self {
            PieceKind::I => &[&[C, C, C, C]],
            PieceKind::O => &[&[C, C], &[C, C]],
            PieceKind::T => &[&[E, C, E], &[C, C, C]],
            PieceKind::S => &[&[E, C, C], &[C, C, E]],
            PieceKind::Z => &[&[C, C, E], &[E, C, C]],
            PieceKind::J => &[&[C, E, E], &[C, C, C]],
            PieceKind::L => &[&[E, E, C], &[C, C, C]],
        };
        Shape::from_rows(rows)
    }
}

/// Shape matrix of a piece: a tight 2D boolean grid, at most 4×4.
///
/// `true` marks a filled cell. The matrix carries no padding, so the seven
/// spawn shapes have different dimensions (the I-piece is 1×4, the O-piece
/// 2×2, the rest 2×3) and rotation swaps the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: ArrayVec<ArrayVec<bool, 4>, 4>,
}

impl Shape {
    fn from_rows(rows: &[&[bool]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
        }
    }

    /// Number of columns in the matrix.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, ArrayVec::len)
    }

    /// Number of rows in the matrix.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the matrix rotated 90° clockwise: transpose, then reverse
    /// each resulting row.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let height = self.height();
        let rows = (0..self.width())
            .map(|x| (0..height).rev().map(|y| self.rows[y][x]).collect())
            .collect();
        Self { rows }
    }

    /// Iterates over the filled cells as `(dx, dy)` offsets within the matrix.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &filled)| filled.then_some((dx, dy)))
        })
    }
}

/// An active piece: a shape matrix, its kind, and a board-relative anchor.
///
/// The anchor is the board coordinate of the matrix's top-left cell.
/// Movement and rotation produce candidate `Piece` values; callers validate
/// a candidate against the board before committing it, so a piece held by a
/// session is never in a colliding state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    column: i32,
    row: i32,
}

impl Piece {
    /// Creates a piece at the spawn position: row 0, horizontally centered.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.spawn_shape();
        let column = (BOARD_WIDTH / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            column,
            row: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn column(&self) -> i32 {
        self.column
    }

    #[must_use]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Board coordinates of the filled cells.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(|(dx, dy)| (self.column + dx as i32, self.row + dy as i32))
    }

    #[must_use]
    pub fn left(&self) -> Self {
        Self {
            column: self.column - 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn right(&self) -> Self {
        Self {
            column: self.column + 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn down(&self) -> Self {
        Self {
            row: self.row + 1,
            ..self.clone()
        }
    }

    /// Returns the piece rotated 90° clockwise at the same anchor.
    ///
    /// No wall kick: if the candidate collides, callers discard it and the
    /// piece keeps its shape and position.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
impl Piece {
    /// Test-only constructor for arbitrary anchors.
    pub(crate) fn at(kind: PieceKind, column: i32, row: i32) -> Self {
        Self {
            column,
            row,
            ..Self::spawn(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[test]
    fn test_spawn_shapes_have_four_cells() {
        for kind in ALL_KINDS {
            let shape = kind.spawn_shape();
            assert_eq!(shape.filled_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_is_centered_at_top() {
        for kind in ALL_KINDS {
            let piece = Piece::spawn(kind);
            assert_eq!(piece.row(), 0, "{kind:?}");
            let expected =
                (BOARD_WIDTH / 2) as i32 - (piece.shape().width() / 2) as i32;
            assert_eq!(piece.column(), expected, "{kind:?}");
        }
        // The O-piece is 2 wide on a 12-wide board: 6 - 1 = 5.
        assert_eq!(Piece::spawn(PieceKind::O).column(), 5);
        // The I-piece is 4 wide: 6 - 2 = 4.
        assert_eq!(Piece::spawn(PieceKind::I).column(), 4);
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let shape = PieceKind::I.spawn_shape();
        assert_eq!((shape.width(), shape.height()), (4, 1));

        let rotated = shape.rotated_clockwise();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // T points up at spawn; one clockwise rotation points it right.
        let rotated = PieceKind::T.spawn_shape().rotated_clockwise();
        let cells: Vec<_> = rotated.filled_cells().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1), (0, 2)]);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in ALL_KINDS {
            let original = kind.spawn_shape();
            let mut shape = original.clone();
            for _ in 0..4 {
                shape = shape.rotated_clockwise();
            }
            assert_eq!(shape, original, "{kind:?}");
        }
    }

    #[test]
    fn test_candidates_leave_source_untouched() {
        let piece = Piece::spawn(PieceKind::J);
        let snapshot = piece.clone();

        let _ = piece.left();
        let _ = piece.right();
        let _ = piece.down();
        let _ = piece.rotated();

        assert_eq!(piece, snapshot);
    }

    #[test]
    fn test_cells_are_anchor_relative() {
        let piece = Piece::spawn(PieceKind::O);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 0), (6, 0), (5, 1), (6, 1)]);

        let moved = piece.left().down();
        let cells: Vec<_> = moved.cells().collect();
        assert_eq!(cells, vec![(4, 1), (5, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in ALL_KINDS {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }
}
