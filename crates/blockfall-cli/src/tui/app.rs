use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// Trait for applications executed by [`Runtime::run`].
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to schedule the
    /// initial tick interval.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen (called whenever state may have changed).
    fn draw(&self, frame: &mut Frame);

    /// Updates game logic (called on each tick deadline).
    fn update(&mut self, runtime: &mut Runtime);
}
