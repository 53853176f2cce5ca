//! Top-level session states and menu input classification.
//!
//! The frontend drives a loop over [`SessionState`]; the functions here
//! decide transitions from classified input so the control flow stays
//! an explicit state machine rather than nested menu conditionals.

/// The top-level UI state. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Program start; immediately resolves to MainMenu or
    /// CharacterCreation depending on whether any saves exist.
    Start,
    /// The numbered main menu.
    MainMenu,
    /// Guided character creation; always proceeds to Playing once a
    /// record is produced.
    CharacterCreation,
    /// The in-game REPL.
    Playing,
    /// Settings screen (placeholder), returns to MainMenu.
    Settings,
    /// Absorbing; the process exits.
    Terminated,
}

/// Resolve the Start state: the main menu when at least one save slot
/// exists, otherwise straight into character creation.
pub fn initial_state(has_saves: bool) -> SessionState {
    if has_saves {
        SessionState::MainMenu
    } else {
        SessionState::CharacterCreation
    }
}

/// A main-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewCharacter,
    LoadCharacter,
    Settings,
    /// Exits the process immediately, without confirmation. Distinct
    /// from the in-game quit command.
    Exit,
}

impl MenuChoice {
    /// Parse a main-menu selection; anything unrecognized re-prompts.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::NewCharacter),
            "2" => Some(Self::LoadCharacter),
            "3" => Some(Self::Settings),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Resolve a load-menu selection against `count` listed slots.
///
/// Returns the zero-based slot index for `1..=count`; anything else
/// (the Cancel entry, non-numeric input, out-of-range numbers) is a
/// cancellation, never an error.
pub fn select_slot(count: usize, input: &str) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    if (1..=count).contains(&choice) {
        Some(choice - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(initial_state(true), SessionState::MainMenu);
        assert_eq!(initial_state(false), SessionState::CharacterCreation);
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::NewCharacter));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::LoadCharacter));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Settings));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse("new"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_select_slot_in_range() {
        assert_eq!(select_slot(3, "1"), Some(0));
        assert_eq!(select_slot(3, " 3 "), Some(2));
    }

    #[test]
    fn test_select_slot_cancellations() {
        // The N+1 Cancel entry.
        assert_eq!(select_slot(3, "4"), None);
        // Out of range and non-numeric.
        assert_eq!(select_slot(3, "0"), None);
        assert_eq!(select_slot(3, "99"), None);
        assert_eq!(select_slot(3, "cancel"), None);
        assert_eq!(select_slot(3, ""), None);
        assert_eq!(select_slot(0, "1"), None);
    }
}
