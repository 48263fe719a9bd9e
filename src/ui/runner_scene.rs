//! Runner game UI rendering.
//!
//! The world is rasterised into a cell buffer (one `Cell` per terminal
//! character, with its own colors) and stamped row-by-row as Paragraph
//! widgets. World units are scaled to whatever area the terminal gives us.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::game_common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_status_bar,
    GameResultType,
};
use super::leaderboard_panel::leaderboard_lines;
use crate::leaderboard::LeaderboardEntry;
use crate::runner::{Bounds, RunOutcome, RunnerConfig, Snapshot};

const PUMPKIN_ORANGE: Color = Color::Rgb(255, 138, 0);
const GROUND_CHAR: char = '▓';
const GRASS_CHAR: char = '"';

/// Entries shown in the side panel while running.
const PANEL_STANDINGS: usize = 5;

/// Everything the runner scene reads. Nothing here is mutated.
pub struct RunnerView<'a> {
    pub snapshot: &'a Snapshot,
    pub config: &'a RunnerConfig,
    pub standings: &'a [LeaderboardEntry],
    /// 1-based rank of the run that just ended, if it made the board.
    pub last_rank: Option<usize>,
}

/// Render the runner scene.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, view: &RunnerView) {
    if let Some(outcome) = view.snapshot.run.outcome() {
        render_runner_game_over(frame, area, view, outcome);
        return;
    }

    let layout = create_game_layout(frame, area, " Canton Halloween Run ", PUMPKIN_ORANGE, 12, 26);

    render_play_field(frame, layout.content, view);
    render_status_bar(
        frame,
        layout.status_bar,
        "Run!",
        PUMPKIN_ORANGE,
        &[("[Space/Up]", "Jump"), ("[Esc]", "Menu")],
    );
    render_info_panel(frame, layout.info_panel, view);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Maps world coordinates onto a `cols` x `rows` cell grid.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    x_scale: f64,
    y_scale: f64,
    cols: usize,
    rows: usize,
}

impl Viewport {
    fn new(config: &RunnerConfig, cols: usize, rows: usize) -> Self {
        Self {
            x_scale: cols as f64 / config.world_width.max(1.0),
            y_scale: rows as f64 / config.world_height.max(1.0),
            cols,
            rows,
        }
    }

    fn row_of(&self, y: f64) -> usize {
        ((y * self.y_scale).floor().max(0.0) as usize).min(self.rows)
    }

    /// Cell ranges covered by `bounds`, clipped to the grid. Anything with
    /// a non-zero size covers at least one cell when on screen.
    fn cells(&self, bounds: &Bounds) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        let left = (bounds.x * self.x_scale).floor();
        let right = (bounds.right() * self.x_scale).ceil().max(left + 1.0);
        let top = (bounds.y * self.y_scale).floor();
        let bottom = (bounds.bottom() * self.y_scale).ceil().max(top + 1.0);

        let clip = |v: f64, max: usize| (v.max(0.0) as usize).min(max);
        let cols = clip(left, self.cols)..clip(right, self.cols);
        let rows = clip(top, self.rows)..clip(bottom, self.rows);
        if cols.is_empty() || rows.is_empty() {
            None
        } else {
            Some((cols, rows))
        }
    }
}

fn fill(buffer: &mut [Vec<Cell>], viewport: &Viewport, bounds: &Bounds, cell: Cell) {
    if let Some((cols, rows)) = viewport.cells(bounds) {
        for row in rows {
            for col in cols.clone() {
                buffer[row][col] = cell;
            }
        }
    }
}

fn rasterise(view: &RunnerView, cols: usize, rows: usize) -> Vec<Vec<Cell>> {
    let snapshot = view.snapshot;
    let viewport = Viewport::new(view.config, cols, rows);
    let mut buffer = vec![vec![Cell::default(); cols]; rows];

    // ── Ground ────────────────────────────────────────────────────────
    let ground_row = viewport.row_of(view.config.ground_y);
    let scroll = (snapshot.run.tick as f64 * snapshot.run.speed * viewport.x_scale) as usize;
    for (r, row) in buffer.iter_mut().enumerate().skip(ground_row) {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = if r == ground_row && (c + scroll) % 4 == 0 {
                Cell {
                    ch: GRASS_CHAR,
                    fg: Color::Rgb(43, 107, 57),
                    bg: Color::Rgb(61, 34, 19),
                }
            } else {
                Cell {
                    ch: GROUND_CHAR,
                    fg: Color::Rgb(84, 51, 24),
                    bg: Color::Rgb(61, 34, 19),
                }
            };
        }
    }

    // ── Obstacles ─────────────────────────────────────────────────────
    let obstacle_cell = Cell {
        ch: '#',
        fg: Color::Rgb(107, 58, 32),
        bg: Color::Reset,
    };
    for obstacle in &snapshot.obstacles {
        fill(&mut buffer, &viewport, &obstacle.bounds(), obstacle_cell);
    }
    if let Some(crashed) = &snapshot.run.crashed_into {
        let crash_cell = Cell {
            ch: 'X',
            fg: Color::Red,
            bg: Color::Reset,
        };
        fill(&mut buffer, &viewport, &crashed.bounds(), crash_cell);
    }

    // ── Pickups ───────────────────────────────────────────────────────
    let pickup_cell = Cell {
        ch: '@',
        fg: PUMPKIN_ORANGE,
        bg: Color::Reset,
    };
    for pickup in &snapshot.pickups {
        fill(&mut buffer, &viewport, &pickup.bounds(), pickup_cell);
    }

    // ── Runner (drawn with its bob offset) ────────────────────────────
    let mut body = snapshot.player.bounds();
    body.y += snapshot.player.bob_offset;
    let runner_cell = Cell {
        ch: '█',
        fg: Color::Rgb(255, 213, 79),
        bg: Color::Reset,
    };
    fill(&mut buffer, &viewport, &body, runner_cell);

    buffer
}

/// Render the play field: sky, ground, obstacles, pickups, runner, HUD.
fn render_play_field(frame: &mut Frame, area: Rect, view: &RunnerView) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let mut buffer = rasterise(view, area.width as usize, area.height as usize);

    // ── HUD (top-left) ────────────────────────────────────────────────
    let run = &view.snapshot.run;
    let hud = [
        (format!("Pumpkins: {}", run.pickups), PUMPKIN_ORANGE),
        (format!("Time: {}s", run.elapsed_secs), Color::White),
    ];
    for (row, (text, fg)) in hud.iter().enumerate() {
        if row >= buffer.len() {
            break;
        }
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = buffer[row].get_mut(i + 1) {
                *cell = Cell {
                    ch,
                    fg: *fg,
                    bg: Color::Reset,
                };
            }
        }
    }

    // ── Render buffer to terminal ─────────────────────────────────────
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn value(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::White))
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, view: &RunnerView) {
    let inner = render_info_panel_frame(frame, area);
    let run = &view.snapshot.run;
    let config = view.config;

    let target = match config.win_threshold {
        Some(t) => format!("{}/{}", run.pickups, t),
        None => run.pickups.to_string(),
    };
    let speed_factor = run.speed / config.initial_speed.max(f64::EPSILON);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![label("Runner: "), value(run.player_name.clone())]),
        Line::from(vec![label("Mode: "), value(config.preset.name().to_string())]),
        Line::from(""),
        Line::from(vec![
            label("Pumpkins: "),
            Span::styled(
                target,
                Style::default()
                    .fg(PUMPKIN_ORANGE)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("Time: "), value(format!("{}s", run.elapsed_secs))]),
        Line::from(vec![label("Speed: "), value(format!("x{:.2}", speed_factor))]),
        Line::from(vec![
            label("Jumps: "),
            value(format!(
                "{}/{}",
                view.snapshot.player.jumps_left, config.max_jumps
            )),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Leaderboard",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(leaderboard_lines(view.standings, PANEL_STANDINGS, None));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the end-of-run overlay with the full standings.
fn render_runner_game_over(frame: &mut Frame, area: Rect, view: &RunnerView, outcome: RunOutcome) {
    let run = &view.snapshot.run;
    let (result_type, title) = match outcome {
        RunOutcome::Won => (
            GameResultType::Win,
            "You are the real Canton Halloween Runner!",
        ),
        RunOutcome::Collided => (GameResultType::Loss, "GAME OVER"),
    };
    let message = format!(
        "{} collected {} pumpkins in {}s.",
        run.player_name, run.pickups, run.elapsed_secs
    );

    let mut body = vec![Line::from(Span::styled(
        "Leaderboard",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    body.extend(leaderboard_lines(
        view.standings,
        crate::leaderboard::LEADERBOARD_CAPACITY,
        view.last_rank,
    ));

    render_game_over_overlay(
        frame,
        area,
        result_type,
        title,
        &message,
        body,
        &[
            ("[Space/Enter]", "Run again"),
            ("[Esc]", "Change name"),
            ("[Q]", "Quit"),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Obstacle, Pickup, Player, RunState, RunStatus};
    use ratatui::{backend::TestBackend, Terminal};

    fn snapshot(config: &RunnerConfig) -> Snapshot {
        let mut run = RunState::not_started(config.initial_speed);
        run.status = RunStatus::Running;
        run.player_name = "Ada".to_string();
        run.pickups = 3;
        Snapshot {
            player: Player::new(config),
            obstacles: vec![Obstacle {
                x: 450.0,
                y: 140.0,
                width: 30.0,
                height: 100.0,
            }],
            pickups: vec![Pickup {
                x: 600.0,
                y: 120.0,
                size: 32.0,
            }],
            run,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_rasterise_places_entities() {
        let config = RunnerConfig::default();
        let snap = snapshot(&config);
        let view = RunnerView {
            snapshot: &snap,
            config: &config,
            standings: &[],
            last_rank: None,
        };
        // 1 cell = 10x10 world units
        let buffer = rasterise(&view, 90, 30);

        assert_eq!(buffer[24][0].ch, GRASS_CHAR);
        assert_eq!(buffer[29][89].ch, GROUND_CHAR);
        assert_eq!(buffer[20][46].ch, '#');
        assert_eq!(buffer[13][61].ch, '@');
        assert_eq!(buffer[21][7].ch, '█');
        assert_eq!(buffer[5][40].ch, ' ');
    }

    #[test]
    fn test_viewport_clips_offscreen() {
        let config = RunnerConfig::default();
        let viewport = Viewport::new(&config, 90, 30);
        assert!(viewport.cells(&Bounds::new(-100.0, 0.0, 20.0, 20.0)).is_none());
        assert!(viewport.cells(&Bounds::new(950.0, 0.0, 20.0, 20.0)).is_none());

        let (cols, _) = viewport.cells(&Bounds::new(895.0, 0.0, 20.0, 20.0)).unwrap();
        assert_eq!(cols, 89..90);
    }

    #[test]
    fn test_render_running_scene() {
        let config = RunnerConfig::default();
        let snap = snapshot(&config);
        let standings = vec![LeaderboardEntry::new("Bo", 12)];
        let view = RunnerView {
            snapshot: &snap,
            config: &config,
            standings: &standings,
            last_rank: None,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_runner_scene(frame, frame.size(), &view))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Canton Halloween Run"));
        assert!(text.contains("Pumpkins: 3"));
        assert!(text.contains("Bo"));
    }

    #[test]
    fn test_render_won_overlay() {
        let config = RunnerConfig::default();
        let mut snap = snapshot(&config);
        snap.run.status = RunStatus::Ended(RunOutcome::Won);
        let standings = vec![LeaderboardEntry::new("Ada", 100)];
        let view = RunnerView {
            snapshot: &snap,
            config: &config,
            standings: &standings,
            last_rank: Some(1),
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_runner_scene(frame, frame.size(), &view))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("real Canton Halloween Runner"));
        assert!(text.contains("Run again"));
    }
}
