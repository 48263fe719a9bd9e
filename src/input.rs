//! Keyboard handling: translates crossterm key events into screen actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::runner::RunnerInput;
use crate::ui::name_entry::NameEntryScreen;

/// Outcome of a key press on the name entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEntryAction {
    Submit,
    Quit,
    None,
}

/// Outcome of a key press on the run screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Input(RunnerInput),
    /// Leave the run and go back to the name entry screen.
    ChangeName,
    Quit,
    None,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn handle_name_entry_key(screen: &mut NameEntryScreen, key: KeyEvent) -> NameEntryAction {
    if key.kind != KeyEventKind::Press {
        return NameEntryAction::None;
    }
    if is_ctrl_c(&key) {
        return NameEntryAction::Quit;
    }
    match key.code {
        KeyCode::Enter => NameEntryAction::Submit,
        KeyCode::Esc => NameEntryAction::Quit,
        KeyCode::Backspace => {
            screen.handle_backspace();
            NameEntryAction::None
        }
        KeyCode::Left => {
            screen.previous_preset();
            NameEntryAction::None
        }
        KeyCode::Right | KeyCode::Tab => {
            screen.next_preset();
            NameEntryAction::None
        }
        KeyCode::Char(c) => {
            screen.handle_char_input(c);
            NameEntryAction::None
        }
        _ => NameEntryAction::None,
    }
}

/// Map a key on the run screen. `run_over` selects the end-of-run bindings.
pub fn map_run_key(key: KeyEvent, run_over: bool) -> RunAction {
    if key.kind != KeyEventKind::Press {
        return RunAction::None;
    }
    if is_ctrl_c(&key) {
        return RunAction::Quit;
    }
    match (key.code, run_over) {
        (KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w'), false) => {
            RunAction::Input(RunnerInput::Jump)
        }
        (KeyCode::Char(' ') | KeyCode::Enter, true) => RunAction::Input(RunnerInput::Restart),
        (KeyCode::Esc, _) => RunAction::ChangeName,
        (KeyCode::Char('q') | KeyCode::Char('Q'), true) => RunAction::Quit,
        _ => RunAction::None,
    }
}
