use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Clear, Widget},
};

use crate::ui::widgets::{BoardDisplay, SessionStatsDisplay, color, style};

/// The full play screen: stats panel, board, and state banner.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let border_style = match self.session.session_state() {
            SessionState::Idle => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_board = BoardDisplay::new(self.session.board())
            .falling_piece(self.session.falling_piece())
            .block(Block::bordered().border_style(border_style).style(style));
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title("STATS")
                .border_style(border_style)
                .style(style),
        );

        let [stats_column, board_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(stats_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);

        let popup = match self.session.session_state() {
            SessionState::Running => None,
            SessionState::Idle => Some((
                "PRESS ENTER TO START".to_string(),
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            SessionState::Paused => Some((
                "PAUSED".to_string(),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver => {
                let final_score = self.session.game_over_score().unwrap_or(0);
                Some((
                    format!("GAME OVER! SCORE {final_score}"),
                    Style::new().fg(color::WHITE).bg(color::RED),
                ))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
