use blockfall_engine::{GameSession, SessionState, TickOutcome};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{App, Runtime},
    ui::widgets::SessionDisplay,
};

/// The interactive play screen: key dispatch and gravity scheduling.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    last_game_over_score: Option<usize>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            last_game_over_score: None,
            is_exiting: false,
        }
    }

    /// Final score of the most recent ended run, if any.
    pub fn last_game_over_score(&self) -> Option<usize> {
        self.last_game_over_score
    }

    /// Keeps the gravity timer aligned with the session: scheduled from the
    /// current level while running, suspended otherwise.
    fn sync_gravity_timer(&self, runtime: &mut Runtime) {
        let interval = self
            .session
            .session_state()
            .is_running()
            .then(|| self.session.gravity_interval());
        runtime.set_tick_interval(interval);
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        self.sync_gravity_timer(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        let is_running = self.session.session_state().is_running();
        let can_toggle_pause = is_running || self.session.session_state().is_paused();
        let can_start = self.session.session_state().is_idle()
            || self.session.session_state().is_game_over();

        if let Some(key) = event.as_key_event() {
            match key.code {
                KeyCode::Left if is_running => _ = self.session.try_move_left(),
                KeyCode::Right if is_running => _ = self.session.try_move_right(),
                KeyCode::Down if is_running => _ = self.session.try_soft_drop(),
                KeyCode::Up if is_running => _ = self.session.try_rotate(),
                KeyCode::Char(' ') if is_running => self.session.hard_drop(),
                KeyCode::Char('p') if can_toggle_pause => self.session.toggle_pause(),
                KeyCode::Enter if can_start => self.session.reset(),
                KeyCode::Char('r') => self.session.reset(),
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
        self.sync_gravity_timer(runtime);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if self.session.session_state().is_running() {
            if let TickOutcome::GameOver { final_score } = self.session.tick() {
                self.last_game_over_score = Some(final_score);
            }
        }
        // A lock may have raised the level; retune gravity right away.
        self.sync_gravity_timer(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session);
        let help_text = match self.session.session_state() {
            SessionState::Idle => "Controls: Enter (Start) | Q (Quit)",
            SessionState::Running => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Drop) | P (Pause) | R (New Game) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::GameOver => "Controls: Enter (New Game) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn seed() -> PieceSeed {
        "0123456789abcdeffedcba9876543210".parse().unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_moves_are_ignored_until_started() {
        let mut app = PlayApp::new(GameSession::with_seed(seed()));
        let mut runtime = Runtime::new();
        let column = app.session.falling_piece().column();

        app.handle_event(&mut runtime, key(KeyCode::Left));
        assert_eq!(app.session.falling_piece().column(), column);
        assert!(app.session.session_state().is_idle());
    }

    #[test]
    fn test_enter_starts_and_arrows_move() {
        let mut app = PlayApp::new(GameSession::with_seed(seed()));
        let mut runtime = Runtime::new();

        app.handle_event(&mut runtime, key(KeyCode::Enter));
        assert!(app.session.session_state().is_running());

        let column = app.session.falling_piece().column();
        app.handle_event(&mut runtime, key(KeyCode::Left));
        assert_eq!(app.session.falling_piece().column(), column - 1);
    }

    #[test]
    fn test_moves_are_ignored_while_paused() {
        let mut app = PlayApp::new(GameSession::with_seed(seed()));
        let mut runtime = Runtime::new();
        app.handle_event(&mut runtime, key(KeyCode::Enter));
        app.handle_event(&mut runtime, key(KeyCode::Char('p')));
        assert!(app.session.session_state().is_paused());

        let column = app.session.falling_piece().column();
        let row = app.session.falling_piece().row();
        app.handle_event(&mut runtime, key(KeyCode::Left));
        app.handle_event(&mut runtime, key(KeyCode::Down));
        app.handle_event(&mut runtime, key(KeyCode::Char(' ')));
        assert_eq!(app.session.falling_piece().column(), column);
        assert_eq!(app.session.falling_piece().row(), row);
    }

    #[test]
    fn test_paused_session_skips_gravity_updates() {
        let mut app = PlayApp::new(GameSession::with_seed(seed()));
        let mut runtime = Runtime::new();
        app.handle_event(&mut runtime, key(KeyCode::Enter));
        app.handle_event(&mut runtime, key(KeyCode::Char('p')));

        let row = app.session.falling_piece().row();
        app.update(&mut runtime);
        assert_eq!(app.session.falling_piece().row(), row);
    }

    #[test]
    fn test_quit_keys_request_exit() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = PlayApp::new(GameSession::with_seed(seed()));
            let mut runtime = Runtime::new();
            assert!(!app.should_exit());
            app.handle_event(&mut runtime, key(code));
            assert!(app.should_exit());
        }
    }
}
