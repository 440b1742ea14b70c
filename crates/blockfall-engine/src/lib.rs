pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a candidate piece state collides with the board.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("candidate piece collides with the board")]
pub struct PieceCollisionError;
