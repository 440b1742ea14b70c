use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind},
};

// Anchor coordinates are signed; bounds checks happen in i32 space.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const WIDTH: i32 = BOARD_WIDTH as i32;
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const HEIGHT: i32 = BOARD_HEIGHT as i32;

/// A single cell of the board.
///
/// A settled cell remembers which piece kind produced it; the front-end maps
/// the kind to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell (no settled piece).
    #[default]
    Empty,
    /// Settled cell of a specific piece type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

/// A single board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockRow {
    cells: [Block; BOARD_WIDTH],
}

impl BlockRow {
    const EMPTY: Self = Self {
        cells: [Block::Empty; BOARD_WIDTH],
    };

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// The grid of settled cells.
///
/// 20 rows of 12 columns; row 0 is the top. The falling piece is not part of
/// the board until it is merged. Dimensions never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BlockRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [BlockRow::EMPTY; BOARD_HEIGHT],
    };

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_WIDTH]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Whether the cell is within bounds and holds a settled piece.
    #[must_use]
    pub fn is_occupied(&self, column: i32, row: i32) -> bool {
        let (Ok(column), Ok(row)) = (usize::try_from(column), usize::try_from(row)) else {
            return false;
        };
        column < BOARD_WIDTH && row < BOARD_HEIGHT && !self.rows[row].cells[column].is_empty()
    }

    /// Pure collision predicate for a candidate piece state.
    ///
    /// A filled cell collides when it lies outside the horizontal bounds, at
    /// or below the floor, or on a settled cell. Cells above the top edge are
    /// only checked horizontally.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(column, row)| {
            column < 0
                || column >= WIDTH
                || row >= HEIGHT
                || (row >= 0 && self.is_occupied(column, row))
        })
    }

    /// Settles the piece: writes its kind into every filled cell.
    ///
    /// Cells above the top edge are skipped.
    pub fn merge(&mut self, piece: &Piece) {
        for (column, row) in piece.cells() {
            let (Ok(column), Ok(row)) = (usize::try_from(column), usize::try_from(row)) else {
                continue;
            };
            self.rows[row].cells[column] = Block::Piece(piece.kind());
        }
    }

    /// Removes every full row, shifting the rows above down and refilling
    /// the top with empty rows. Returns the number of rows cleared.
    ///
    /// A stack of simultaneously-full rows clears in one call, each row
    /// counted once.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BlockRow::EMPTY);
        count
    }
}

impl Serialize for Board {
    // One string per row: '.' for empty, the piece letter for settled cells.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.rows.iter().map(|row| {
            row.cells
                .iter()
                .map(|block| match block {
                    Block::Empty => '.',
                    Block::Piece(kind) => kind.as_char(),
                })
                .collect::<String>()
        }))
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        if lines.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_HEIGHT} rows, got {}",
                lines.len()
            )));
        }

        let mut rows = [BlockRow::EMPTY; BOARD_HEIGHT];
        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != BOARD_WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "expected {BOARD_WIDTH} cells in row {y}, got {}",
                    line.chars().count()
                )));
            }
            for (x, c) in line.chars().enumerate() {
                rows[y].cells[x] = match c {
                    '.' => Block::Empty,
                    _ => Block::Piece(PieceKind::from_char(c).ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid cell at row {y}: {c}"))
                    })?),
                };
            }
        }

        Ok(Board { rows })
    }
}
