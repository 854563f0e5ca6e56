//! # Input State Machine
//!
//! Turns single keypresses into [`Command`]s. Multi-digit selections are
//! accumulated in `NumericEntry` until Enter confirms them.
//!
//! ```text
//!            digit                      Enter / Esc
//! Browsing ─────────► NumericEntry ─────────────────► Browsing
//!    │                  │    ▲
//!    │ q                └────┘ digit / Backspace
//!    ▼
//! Quitting
//! ```
//!
//! Every step also reports what should be echoed, so the terminal layer can
//! show the prompt and typed digits without knowing about the states.

use super::action::Command;

/// A keypress, independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
    /// Ctrl+C. Raw mode swallows the signal, so treat it as a quit request.
    Interrupt,
}

/// Digits typed so far in a numeric selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingSelection {
    pub value: usize,
    pub digits: usize,
}

impl PendingSelection {
    /// Append a digit. Digits that would overflow are refused.
    fn push(&mut self, digit: u32) -> bool {
        let next = self
            .value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize));
        match next {
            Some(value) => {
                self.value = value;
                self.digits += 1;
                true
            }
            None => false,
        }
    }

    fn pop(&mut self) -> bool {
        if self.digits == 0 {
            return false;
        }
        self.value /= 10;
        self.digits -= 1;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Browsing,
    NumericEntry(PendingSelection),
    Quitting,
}

/// Terminal feedback for one keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// A selection started: show the prompt, then the first digit.
    Prompt(char),
    Digit(char),
    /// Remove the last echoed digit.
    Erase,
    /// The selection line is finished (confirmed or cancelled).
    EndLine,
}

/// Result of feeding one key to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    pub command: Option<Command>,
    pub echo: Option<Echo>,
}

impl Step {
    fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            echo: None,
        }
    }

    fn echo(echo: Echo) -> Self {
        Self {
            command: None,
            echo: Some(echo),
        }
    }
}

#[derive(Debug, Default)]
pub struct InputMachine {
    state: InputState,
}

impl InputMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    /// Feed one key. `has_more` tells whether a "more" key should page.
    pub fn handle(&mut self, key: Key, has_more: bool) -> Step {
        match self.state {
            InputState::Browsing => self.browse(key, has_more),
            InputState::NumericEntry(pending) => self.enter_digits(pending, key),
            InputState::Quitting => Step::default(),
        }
    }

    fn browse(&mut self, key: Key, has_more: bool) -> Step {
        match key {
            Key::Char(c) if c.is_ascii_digit() => {
                let mut pending = PendingSelection::default();
                pending.push(c.to_digit(10).unwrap_or(0));
                self.state = InputState::NumericEntry(pending);
                Step::echo(Echo::Prompt(c))
            }
            Key::Char('u') => Step::command(Command::NavigateUp),
            Key::Char('q') | Key::Interrupt => {
                self.state = InputState::Quitting;
                Step::command(Command::Quit)
            }
            Key::Char(' ') | Key::Char('m') if has_more => Step::command(Command::ShowMore),
            _ => Step::default(),
        }
    }

    fn enter_digits(&mut self, mut pending: PendingSelection, key: Key) -> Step {
        match key {
            Key::Char(c) if c.is_ascii_digit() => {
                if !pending.push(c.to_digit(10).unwrap_or(0)) {
                    return Step::default();
                }
                self.state = InputState::NumericEntry(pending);
                Step::echo(Echo::Digit(c))
            }
            Key::Backspace | Key::Char('\u{7f}') | Key::Char('\u{8}') => {
                if !pending.pop() {
                    return Step::default();
                }
                self.state = InputState::NumericEntry(pending);
                Step::echo(Echo::Erase)
            }
            Key::Enter | Key::Char('\n') | Key::Char('\r') => {
                self.state = InputState::Browsing;
                Step {
                    command: Some(Command::Select(pending.value)),
                    echo: Some(Echo::EndLine),
                }
            }
            Key::Escape => {
                self.state = InputState::Browsing;
                Step::echo(Echo::EndLine)
            }
            Key::Interrupt => {
                self.state = InputState::Quitting;
                Step {
                    command: Some(Command::Quit),
                    echo: Some(Echo::EndLine),
                }
            }
            _ => Step::default(),
        }
    }
}
