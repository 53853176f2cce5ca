//! The interactive console frontend.
//!
//! Drives the top-level state machine: main menu, guided character
//! creation, the playing REPL, settings, and quit confirmation. All
//! game logic lives in quest-core; this module only reads lines,
//! dispatches, and renders outcomes.

use quest_core::{
    initial_state, select_slot, AutoSaveStatus, CharacterRecord, Dm, GameSession, MenuChoice,
    SaveStore, SessionConfig, SessionState, TurnOutcome, DEFAULT_AUTO_SAVE_FREQUENCY,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Frontend configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding save slots.
    pub save_dir: PathBuf,

    /// Auto-save every this many completed turns (0 disables).
    pub auto_save_frequency: u32,

    /// Model override for the Dungeon Master.
    pub model: Option<String>,
}

impl AppConfig {
    /// Build a config from `QUEST_SAVE_DIR`, `QUEST_AUTO_SAVE_FREQUENCY`
    /// and `QUEST_MODEL`, with defaults for anything unset.
    pub fn from_env() -> Self {
        let save_dir = std::env::var("QUEST_SAVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("saves"));

        let auto_save_frequency = std::env::var("QUEST_AUTO_SAVE_FREQUENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_AUTO_SAVE_FREQUENCY);

        let model = std::env::var("QUEST_MODEL").ok();

        Self {
            save_dir,
            auto_save_frequency,
            model,
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.save_dir.clone())
            .with_auto_save_frequency(self.auto_save_frequency)
    }
}

/// Run the interactive session until the player exits.
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    print_header("NeverEndingQuest - AI-Powered Adventure");

    let mut app = App {
        config,
        session: None,
    };

    let store = SaveStore::new(app.config.save_dir.clone());
    let has_saves = !store.list_slots().await?.is_empty();
    if !has_saves {
        println!("\nWelcome, adventurer! Let's create your character.");
    }

    let mut state = initial_state(has_saves);
    loop {
        state = match state {
            SessionState::Start => initial_state(has_saves),
            SessionState::MainMenu => app.main_menu().await?,
            SessionState::CharacterCreation => app.create_character().await?,
            SessionState::Playing => app.play().await?,
            SessionState::Settings => app.settings()?,
            SessionState::Terminated => break,
        };
    }

    println!("\nFarewell, adventurer!");
    Ok(())
}

struct App {
    config: AppConfig,
    session: Option<GameSession<Dm>>,
}

impl App {
    /// Build a fresh Dungeon Master for a new session.
    fn new_engine(&self) -> Result<Dm, quest_core::EngineError> {
        let mut dm = Dm::from_env()?;
        if let Some(model) = &self.config.model {
            dm = dm.with_model(model.clone());
        }
        Ok(dm)
    }

    async fn main_menu(&mut self) -> io::Result<SessionState> {
        loop {
            print_header("Main Menu");
            println!("\n1. New Character");
            println!("2. Load Character");
            println!("3. Settings");
            println!("4. Exit");

            let Some(choice) = prompt("\nYour choice: ")? else {
                return Ok(SessionState::Terminated);
            };

            match MenuChoice::parse(&choice) {
                Some(MenuChoice::NewCharacter) => return Ok(SessionState::CharacterCreation),
                Some(MenuChoice::LoadCharacter) => {
                    if self.load_character().await? {
                        return Ok(SessionState::Playing);
                    }
                }
                Some(MenuChoice::Settings) => return Ok(SessionState::Settings),
                Some(MenuChoice::Exit) => return Ok(SessionState::Terminated),
                None => println!("Invalid choice. Please try again."),
            }
        }
    }

    async fn create_character(&mut self) -> io::Result<SessionState> {
        print_header("Character Creation");

        let Some(name) = prompt("\nWhat is your character's name? ")? else {
            return Ok(SessionState::Terminated);
        };

        // Show intent before the blocking engine call.
        println!("\nThe Dungeon Master is guiding your character into being...");

        let engine = match self.new_engine() {
            Ok(engine) => engine,
            Err(e) => {
                println!("[ERROR] {e}");
                return Ok(SessionState::MainMenu);
            }
        };

        match GameSession::create(self.config.session_config(), engine, &name).await {
            Ok(session) => {
                println!("\nWelcome, {}! Your adventure begins...", session.record().name);
                self.session = Some(session);
                Ok(SessionState::Playing)
            }
            Err(e) => {
                println!("[ERROR] Character creation failed: {e}");
                Ok(SessionState::MainMenu)
            }
        }
    }

    /// Run the load-character dialog. Returns true when a session was
    /// loaded; false means the player cancelled or the load failed.
    async fn load_character(&mut self) -> io::Result<bool> {
        let store = SaveStore::new(self.config.save_dir.clone());
        let slots = match store.list_slots().await {
            Ok(slots) => slots,
            Err(e) => {
                println!("[ERROR] Could not read saves: {e}");
                return Ok(false);
            }
        };

        if slots.is_empty() {
            println!("\nNo saved games found.");
            return Ok(false);
        }

        print_header("Load Character");
        for (i, slot) in slots.iter().enumerate() {
            println!("{}. {} - Level {} {}", i + 1, slot.name, slot.level, slot.class);
        }
        println!("{}. Cancel", slots.len() + 1);

        let Some(choice) = prompt("\nSelect character: ")? else {
            return Ok(false);
        };

        let Some(index) = select_slot(slots.len(), &choice) else {
            return Ok(false);
        };

        let engine = match self.new_engine() {
            Ok(engine) => engine,
            Err(e) => {
                println!("[ERROR] {e}");
                return Ok(false);
            }
        };

        let slot_id = &slots[index].slot_id;
        match GameSession::load(self.config.session_config(), engine, slot_id).await {
            Ok(session) => {
                println!("\nLoaded {}!", session.record().name);
                self.session = Some(session);
                Ok(true)
            }
            Err(e) => {
                println!("[ERROR] Load failed: {e}");
                Ok(false)
            }
        }
    }

    async fn play(&mut self) -> io::Result<SessionState> {
        let Some(session) = self.session.as_mut() else {
            return Ok(SessionState::MainMenu);
        };

        print_header(&format!("Playing as {}", session.record().name));

        match session.start_adventure().await {
            Ok(text) => print_dm(&text),
            Err(e) => println!("[ERROR] {e}"),
        }

        loop {
            let Some(line) = prompt("\n> ")? else {
                // Input closed; exit without an implicit save.
                return Ok(SessionState::Terminated);
            };

            match session.handle_line(&line).await {
                Ok(TurnOutcome::Idle) => {}
                Ok(TurnOutcome::Help) => print_help(),
                Ok(TurnOutcome::Sheet) => print_sheet(session.record()),
                Ok(TurnOutcome::Saved { slot }) => {
                    println!("[SAVED] Game saved to slot '{slot}'.");
                }
                Ok(TurnOutcome::QuitRequested) => {
                    let save_first = prompt("\nSave before quitting? (y/n): ")?
                        .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
                        .unwrap_or(false);

                    match session.quit(save_first).await {
                        Ok(Some(slot)) => println!("[SAVED] Game saved to slot '{slot}'."),
                        Ok(None) => {}
                        Err(e) => println!("[ERROR] Save failed: {e}"),
                    }
                    return Ok(SessionState::Terminated);
                }
                Ok(TurnOutcome::Narrative { text, auto_save }) => {
                    print_dm(&text);
                    match auto_save {
                        AutoSaveStatus::Saved(slot) => {
                            println!("\n[AUTO-SAVE] Progress saved to slot '{slot}'.");
                        }
                        AutoSaveStatus::Failed(reason) => {
                            println!("\n[WARNING] Auto-save failed: {reason}");
                        }
                        AutoSaveStatus::NotDue => {}
                    }
                }
                Err(e) => println!("[ERROR] {e}"),
            }
        }
    }

    fn settings(&self) -> io::Result<SessionState> {
        print_header("Settings");
        println!("\nSave directory: {}", self.config.save_dir.display());
        println!(
            "Auto-save frequency: every {} actions",
            self.config.auto_save_frequency
        );
        prompt("\nPress Enter to continue...")?;
        Ok(SessionState::MainMenu)
    }
}

/// Print a prompt and read one line. Returns None when input is closed.
fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

fn print_dm(text: &str) {
    println!();
    for para in text.split("\n\n") {
        println!("{para}");
    }
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  help        - Show this help");
    println!("  character   - View character sheet");
    println!("  save        - Save game");
    println!("  quit/exit   - Quit game");
    println!("\nJust type what you want to do naturally!");
    println!("Examples:");
    println!("  'I search the room for traps'");
    println!("  'I attack the goblin with my sword'");
    println!("  'I try to persuade the merchant'");
}

fn print_sheet(record: &CharacterRecord) {
    print_header("Character Sheet");
    println!("\nName: {}", record.name);
    println!("Class: {}", record.class);
    println!("Level: {}", record.level);
    println!("Race: {}", record.race);
    println!("HP: {}/{}", record.current_hp, record.max_hp);
    println!("XP: {}", record.xp);
}
