use canton_run::input::{handle_name_entry_key, map_run_key, NameEntryAction, RunAction};
use canton_run::leaderboard::{self, JsonFileStore, LeaderboardEntry, LEADERBOARD_FILE};
use canton_run::runner::{
    process_input, FrameClock, RunnerConfig, RunnerInput, RunnerPreset, RunnerSimulation,
};
use canton_run::ui::leaderboard_panel::leaderboard_lines;
use canton_run::ui::name_entry::NameEntryScreen;
use canton_run::ui::runner_scene::{render_runner_scene, RunnerView};
use canton_run::utils::{build_info, logging, persistence};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Optional tuning overrides, under ~/.canton-run/.
const CONFIG_FILE: &str = "config.json";

/// Input poll timeout per frame while a run is on screen (~60 FPS).
const FRAME_POLL_MS: u64 = 16;

/// Input poll timeout on the name entry screen.
const MENU_POLL_MS: u64 = 50;

#[derive(Debug, Default, PartialEq)]
struct PlayOptions {
    name: Option<String>,
    preset: Option<RunnerPreset>,
    seed: Option<u64>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Play(PlayOptions),
    Leaderboard,
    Version,
    Help,
}

enum Screen {
    NameEntry,
    Running,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = PlayOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "leaderboard" => return Ok(Command::Leaderboard),
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--name" => {
                let value = iter.next().ok_or("--name needs a value")?;
                options.name = Some(value.clone());
            }
            "--preset" => {
                let value = iter.next().ok_or("--preset needs a value")?;
                let preset = RunnerPreset::from_name(value)
                    .ok_or_else(|| format!("Unknown preset: {}", value))?;
                options.preset = Some(preset);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown command: {}", other)),
        }
    }

    Ok(Command::Play(options))
}

fn print_help() {
    println!("Canton Halloween Run - jump the graves, grab the pumpkins\n");
    println!("Usage: canton-run [options]");
    println!("       canton-run leaderboard\n");
    println!("Options:");
    println!("  --name <name>      Prefill the runner name");
    println!("  --preset <mode>    canton | halloween | classic");
    println!("  --seed <number>    Reproducible obstacle layout");
    println!("  --version          Show version information");
    println!("  --help             Show this help message");
}

/// The leaderboard file, or one in the working directory if there is no
/// usable home directory.
fn open_store() -> JsonFileStore {
    JsonFileStore::default_location().unwrap_or_else(|e| {
        log::warn!("no data directory ({}); using ./{}", e, LEADERBOARD_FILE);
        JsonFileStore::new(LEADERBOARD_FILE)
    })
}

fn print_leaderboard() {
    let standings = leaderboard::standings(&open_store());
    println!("Leaderboard");
    for line in leaderboard_lines(&standings, leaderboard::LEADERBOARD_CAPACITY, None) {
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        println!("{}", text.trim_end());
    }
}

/// Tuning from config.json. A missing file is written out with the
/// defaults so there is something to edit.
fn load_config() -> RunnerConfig {
    let config: RunnerConfig = persistence::load_json_or_default(CONFIG_FILE);
    let missing = persistence::save_path(CONFIG_FILE).is_ok_and(|path| !path.exists());
    if missing {
        if let Err(e) = persistence::save_json(CONFIG_FILE, &config) {
            log::warn!("could not write default {}: {}", CONFIG_FILE, e);
        }
    }
    config
}

/// The on-disk config when it was written for `preset`, else the preset itself.
fn config_for(preset: RunnerPreset, file_config: &RunnerConfig) -> RunnerConfig {
    if file_config.preset == preset {
        file_config.clone()
    } else {
        preset.config()
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Play(options)) => options,
        Ok(Command::Leaderboard) => {
            print_leaderboard();
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'canton-run --help' for usage.");
            std::process::exit(1);
        }
    };

    logging::init();
    log::info!("{}", build_info::version_line());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, options);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, options: PlayOptions) -> io::Result<()> {
    let file_config = load_config();
    let preset = options.preset.unwrap_or(file_config.preset);

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut sim = RunnerSimulation::new(config_for(preset, &file_config), rng, open_store());

    let mut name_screen = NameEntryScreen::new(options.name.as_deref().unwrap_or(""), preset);
    let mut screen = Screen::NameEntry;
    let mut standings: Vec<LeaderboardEntry> = sim.standings();
    let mut last_rank: Option<usize> = None;
    let mut clock = FrameClock::new();
    let mut last_frame = Instant::now();

    loop {
        match screen {
            Screen::NameEntry => {
                terminal.draw(|f| {
                    let area = f.size();
                    name_screen.draw(f, area, &standings);
                })?;

                if event::poll(Duration::from_millis(MENU_POLL_MS))? {
                    if let Event::Key(key) = event::read()? {
                        match handle_name_entry_key(&mut name_screen, key) {
                            NameEntryAction::Submit => {
                                sim.config = config_for(name_screen.preset, &file_config);
                                sim.start(&name_screen.get_name());
                                last_rank = None;
                                clock.reset();
                                last_frame = Instant::now();
                                screen = Screen::Running;
                            }
                            NameEntryAction::Quit => return Ok(()),
                            NameEntryAction::None => {}
                        }
                    }
                }
            }
            Screen::Running => {
                let now = Instant::now();
                let dt_ms = now.duration_since(last_frame).as_millis() as u64;
                last_frame = now;

                let snapshot = sim.advance(clock.ticks_due(dt_ms));

                if snapshot.run.outcome().is_some() {
                    if let Some(entry) = sim.end_run() {
                        standings = sim.standings();
                        last_rank = leaderboard::position_of(&standings, &entry);
                    }
                }

                let view = RunnerView {
                    snapshot: &snapshot,
                    config: &sim.config,
                    standings: &standings,
                    last_rank,
                };
                terminal.draw(|f| {
                    let area = f.size();
                    render_runner_scene(f, area, &view);
                })?;

                if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
                    if let Event::Key(key) = event::read()? {
                        match map_run_key(key, !snapshot.run.is_running()) {
                            RunAction::Input(input) => {
                                process_input(&mut sim, input);
                                if input == RunnerInput::Restart {
                                    last_rank = None;
                                    clock.reset();
                                }
                            }
                            RunAction::ChangeName => {
                                if sim.run.is_running() {
                                    log::info!(
                                        "run abandoned after {}s",
                                        sim.run.elapsed_secs
                                    );
                                }
                                standings = sim.standings();
                                screen = Screen::NameEntry;
                            }
                            RunAction::Quit => return Ok(()),
                            RunAction::None => {}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_plays_with_defaults() {
        assert_eq!(
            parse_args(&[]),
            Ok(Command::Play(PlayOptions::default()))
        );
    }

    #[test]
    fn test_play_options() {
        let parsed = parse_args(&args(&["--name", "Ada", "--preset", "Classic", "--seed", "42"]));
        assert_eq!(
            parsed,
            Ok(Command::Play(PlayOptions {
                name: Some("Ada".to_string()),
                preset: Some(RunnerPreset::Classic),
                seed: Some(42),
            }))
        );
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(parse_args(&args(&["leaderboard"])), Ok(Command::Leaderboard));
        assert_eq!(parse_args(&args(&["-v"])), Ok(Command::Version));
        assert_eq!(parse_args(&args(&["--help"])), Ok(Command::Help));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse_args(&args(&["--preset", "turbo"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--name"])).is_err());
        assert!(parse_args(&args(&["fly"])).is_err());
    }

    #[test]
    fn test_config_for_prefers_matching_file_config() {
        let mut custom = RunnerPreset::Halloween.config();
        custom.gravity = 2.0;

        let chosen = config_for(RunnerPreset::Halloween, &custom);
        assert!((chosen.gravity - 2.0).abs() < f64::EPSILON);

        let other = config_for(RunnerPreset::Classic, &custom);
        assert_eq!(other, RunnerPreset::Classic.config());
    }
}
