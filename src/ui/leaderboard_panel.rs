//! Leaderboard lines shared by the side panel, name entry and result screens.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::leaderboard::LeaderboardEntry;

/// One line per entry (`1. Ada  42`), at most `limit` lines.
///
/// `highlight` is a 1-based rank drawn in bold orange. An empty board
/// renders a single "None yet" line.
pub fn leaderboard_lines(
    entries: &[LeaderboardEntry],
    limit: usize,
    highlight: Option<usize>,
) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            "None yet",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    entries
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| {
            let rank = i + 1;
            let style = if highlight == Some(rank) {
                Style::default()
                    .fg(Color::Rgb(255, 138, 0))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!("{:>2}. ", rank), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<16}", entry.name), style),
                Span::styled(format!("{:>4}", entry.score), style),
            ])
        })
        .collect()
}
