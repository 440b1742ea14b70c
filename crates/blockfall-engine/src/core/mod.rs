pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;

/// Board width in cells.
pub const BOARD_WIDTH: usize = 12;

/// Board height in cells.
pub const BOARD_HEIGHT: usize = 20;
