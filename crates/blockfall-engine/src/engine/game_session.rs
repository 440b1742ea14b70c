use std::time::Duration;

use crate::{
    PieceCollisionError,
    core::{Board, Piece},
};

use super::{GameStats, PieceGenerator, PieceSeed};

/// Gravity starts at one step per second and speeds up with the level.
const GRAVITY_BASE_MILLIS: u64 = 1000;

/// Lifecycle of a game session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Created but not yet started.
    Idle,
    /// Gravity is active and input moves the piece.
    Running,
    /// Gravity is suspended; resuming returns to `Running`.
    Paused,
    /// The last run ended; a reset starts the next one.
    GameOver,
}

/// Result of a single gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Descended,
    /// The piece settled and the next one spawned.
    Locked {
        /// Rows cleared by this lock (0 if none).
        cleared_lines: usize,
    },
    /// The replacement piece had no room: the run ended with this score and
    /// a fresh board was prepared for the next one.
    GameOver {
        /// Score of the run that just ended.
        final_score: usize,
    },
}

/// A complete game session: board, falling piece, score, and lifecycle.
///
/// All game state lives here and is mutated only through these methods; the
/// front-end owns a `GameSession`, passes it to its render code by
/// reference, and maps input events to the operations below. Gravity is
/// external: a scheduler calls [`Self::tick`] every
/// [`Self::gravity_interval`] while the session is running.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    falling_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    session_state: SessionState,
    game_over_score: Option<usize>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    fn with_generator(mut generator: PieceGenerator) -> Self {
        let falling_piece = Piece::spawn(generator.next_kind());
        Self {
            board: Board::EMPTY,
            falling_piece,
            generator,
            stats: GameStats::new(),
            session_state: SessionState::Idle,
            game_over_score: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    /// Final score of the last run; `None` once a new run starts.
    #[must_use]
    pub fn game_over_score(&self) -> Option<usize> {
        self.game_over_score
    }

    /// Time between gravity ticks at the current level.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(GRAVITY_BASE_MILLIS / self.level() as u64)
    }

    /// Starts a new run: empty board, zeroed score, fresh piece.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.game_over_score = None;
        self.falling_piece = Piece::spawn(self.generator.next_kind());
        self.session_state = SessionState::Running;
    }

    /// Toggles between `Running` and `Paused`.
    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            // Not started or already over: nothing to toggle.
            SessionState::Idle => SessionState::Idle,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Advances gravity by one step.
    ///
    /// The scheduler must only call this while the session is running.
    pub fn tick(&mut self) -> TickOutcome {
        debug_assert!(self.session_state.is_running());
        let candidate = self.falling_piece.down();
        if !self.board.collides(&candidate) {
            self.falling_piece = candidate;
            return TickOutcome::Descended;
        }
        self.lock_piece()
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_piece(self.falling_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_piece(self.falling_piece.right())
    }

    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_piece(self.falling_piece.down())
    }

    /// Rotates the piece clockwise; a colliding rotation is rejected and the
    /// shape stays unchanged (no wall kick).
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_piece(self.falling_piece.rotated())
    }

    /// Drops the piece to the lowest free row.
    ///
    /// The piece is not settled here; the next gravity tick performs the
    /// lock.
    pub fn hard_drop(&mut self) {
        loop {
            let candidate = self.falling_piece.down();
            if self.board.collides(&candidate) {
                return;
            }
            self.falling_piece = candidate;
        }
    }

    fn try_set_piece(&mut self, candidate: Piece) -> Result<(), PieceCollisionError> {
        if self.board.collides(&candidate) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = candidate;
        Ok(())
    }

    /// Settles the piece, clears and scores lines, and spawns the next one.
    fn lock_piece(&mut self) -> TickOutcome {
        self.board.merge(&self.falling_piece);
        let cleared_lines = self.board.clear_full_lines();
        self.stats.record_lock(cleared_lines);

        self.falling_piece = Piece::spawn(self.generator.next_kind());
        if self.board.collides(&self.falling_piece) {
            let final_score = self.stats.score();
            self.board = Board::EMPTY;
            self.stats = GameStats::new();
            self.falling_piece = Piece::spawn(self.generator.next_kind());
            self.game_over_score = Some(final_score);
            self.session_state = SessionState::GameOver;
            return TickOutcome::GameOver { final_score };
        }
        TickOutcome::Locked { cleared_lines }
    }
}
