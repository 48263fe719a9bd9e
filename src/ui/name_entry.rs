use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::leaderboard_panel::leaderboard_lines;
use crate::leaderboard::{LeaderboardEntry, LEADERBOARD_CAPACITY};
use crate::runner::RunnerPreset;

/// Longest name the input field accepts.
pub const NAME_MAX_CHARS: usize = 16;

/// Start screen: name input, mode picker, current standings.
pub struct NameEntryScreen {
    pub name_input: String,
    /// Cursor position in characters, not bytes.
    pub cursor_position: usize,
    pub preset: RunnerPreset,
}

impl NameEntryScreen {
    pub fn new(name: &str, preset: RunnerPreset) -> Self {
        let name_input: String = name.chars().take(NAME_MAX_CHARS).collect();
        Self {
            cursor_position: name_input.chars().count(),
            name_input,
            preset,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, standings: &[LeaderboardEntry]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(3),  // Input label + field
                Constraint::Length(2),  // Mode
                Constraint::Length(13), // Standings
                Constraint::Min(0),     // Filler
                Constraint::Length(3),  // Controls
            ])
            .split(area);

        let title = Paragraph::new("Canton Halloween Run")
            .style(
                Style::default()
                    .fg(Color::Rgb(255, 138, 0))
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let label = Paragraph::new("Your name:");
        f.render_widget(label, chunks[1]);

        let input_area = Rect {
            y: chunks[1].y + 1,
            height: chunks[1].height.saturating_sub(1),
            ..chunks[1]
        };
        let input_widget = Paragraph::new(self.input_with_cursor())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, input_area);

        let mode = Line::from(vec![
            Span::styled("Mode: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("< {} >", self.preset.name()),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        f.render_widget(Paragraph::new(mode), chunks[2]);

        let mut board = vec![Line::from(Span::styled(
            "Leaderboard",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))];
        board.extend(leaderboard_lines(standings, LEADERBOARD_CAPACITY, None));
        f.render_widget(Paragraph::new(board), chunks[3]);

        let controls = Paragraph::new("[Enter] Run    [Left/Right] Mode    [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[5]);
    }

    fn input_with_cursor(&self) -> String {
        let mut text: String = self.name_input.chars().take(self.cursor_position).collect();
        text.push('_');
        text.extend(self.name_input.chars().skip(self.cursor_position));
        text
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.name_input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.name_input.len())
    }

    pub fn handle_char_input(&mut self, c: char) {
        if c.is_control() || self.name_input.chars().count() >= NAME_MAX_CHARS {
            return;
        }
        let at = self.byte_index(self.cursor_position);
        self.name_input.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            let at = self.byte_index(self.cursor_position - 1);
            self.name_input.remove(at);
            self.cursor_position -= 1;
        }
    }

    pub fn next_preset(&mut self) {
        let index = RunnerPreset::ALL
            .iter()
            .position(|p| *p == self.preset)
            .unwrap_or(0);
        self.preset = RunnerPreset::from_index((index + 1) % RunnerPreset::ALL.len());
    }

    pub fn previous_preset(&mut self) {
        let len = RunnerPreset::ALL.len();
        let index = RunnerPreset::ALL
            .iter()
            .position(|p| *p == self.preset)
            .unwrap_or(0);
        self.preset = RunnerPreset::from_index((index + len - 1) % len);
    }

    /// The typed name, trimmed. May be empty; the simulation substitutes a
    /// default.
    pub fn get_name(&self) -> String {
        self.name_input.trim().to_string()
    }
}
