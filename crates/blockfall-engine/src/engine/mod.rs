//! Game engine logic and state management.
//!
//! This module provides the high-level logic that orchestrates the core data
//! structures into a playable session:
//!
//! - [`GameSession`] - The session state machine: gravity, input moves,
//!   pause, and game-over handling
//! - [`GameStats`] - Score and level tracking
//! - [`PieceGenerator`] - Uniform-random piece selection
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (optionally with a seed) and call
//!    [`GameSession::reset`] to start
//! 2. A scheduler calls [`GameSession::tick`] at the level-derived gravity
//!    interval while the session is running
//! 3. Input events call the `try_*` move operations between ticks
//! 4. When a piece can no longer descend, a tick settles it, clears lines,
//!    scores them, and spawns the next piece
//! 5. A spawn without room ends the run: the final score is reported in the
//!    tick outcome and a fresh board is prepared

pub use self::{game_session::*, game_stats::*, piece_generator::*};

mod game_session;
mod game_stats;
mod piece_generator;
