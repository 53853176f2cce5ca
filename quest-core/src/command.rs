//! Player input classification.
//!
//! A small closed set of reserved words is checked before everything
//! falls through to "this is a narrative action". Reserved words always
//! win, so routing is total and deterministic, and players never need
//! quoting or escaping to express an action.

/// A reserved in-session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `quit` or `exit` - leave the session (after a confirmation).
    Quit,
    /// `help` - show command help.
    Help,
    /// `character` - show the character sheet.
    Sheet,
    /// `save` - save the game now.
    Save,
}

/// One line of player input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Blank line; re-prompt without doing anything.
    Empty,
    /// A reserved command.
    Command(Command),
    /// Free-form narrative action, trimmed but otherwise verbatim.
    Action(String),
}

impl PlayerInput {
    /// Classify a raw input line.
    ///
    /// Reserved words match case-insensitively and exactly; anything
    /// else (including reserved words with trailing text) is a
    /// narrative action forwarded with its original casing.
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        match trimmed.to_lowercase().as_str() {
            "quit" | "exit" => Self::Command(Command::Quit),
            "help" => Self::Command(Command::Help),
            "character" => Self::Command(Command::Sheet),
            "save" => Self::Command(Command::Save),
            _ => Self::Action(trimmed.to_string()),
        }
    }
}
