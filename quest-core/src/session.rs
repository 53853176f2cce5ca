//! GameSession - the primary public API for running a game.
//!
//! A session exclusively owns the active character record and wraps
//! the narrative engine, the save store, and auto-save cadence behind
//! one facade. The frontend feeds it lines of player input while in
//! the Playing state and renders the resulting [`TurnOutcome`]s.

use crate::autosave::AutoSave;
use crate::character::CharacterRecord;
use crate::command::{Command, PlayerInput};
use crate::engine::{EngineError, NarrativeEngine};
use crate::store::{SaveStore, StoreError};
use std::path::PathBuf;
use thiserror::Error;

/// Default auto-save cadence, in completed narrative turns.
pub const DEFAULT_AUTO_SAVE_FREQUENCY: u32 = 5;

/// Errors from GameSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("narrative engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("persistence error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration for creating a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding the save slots.
    pub save_dir: PathBuf,

    /// Auto-save every this many completed narrative turns.
    pub auto_save_frequency: u32,

    /// Whether auto-save is enabled at all.
    pub auto_save_enabled: bool,
}

impl SessionConfig {
    /// Create a config with the given save directory and defaults.
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            auto_save_frequency: DEFAULT_AUTO_SAVE_FREQUENCY,
            auto_save_enabled: true,
        }
    }

    /// Set the auto-save frequency (0 disables).
    pub fn with_auto_save_frequency(mut self, frequency: u32) -> Self {
        self.auto_save_frequency = frequency;
        self
    }

    /// Enable or disable auto-save.
    pub fn with_auto_save_enabled(mut self, enabled: bool) -> Self {
        self.auto_save_enabled = enabled;
        self
    }
}

/// Outcome of an auto-save attempt after a narrative turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSaveStatus {
    /// No save was due this turn.
    NotDue,
    /// Saved to the named slot.
    Saved(String),
    /// A save was due but failed; best-effort, play continues.
    Failed(String),
}

/// What one line of player input amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty input; nothing happened, re-prompt.
    Idle,
    /// The help command; caller renders help.
    Help,
    /// The character command; caller renders the sheet from `record()`.
    Sheet,
    /// Manual save succeeded to the named slot. A failed manual save
    /// surfaces as an `Err` from `handle_line` instead, so the player
    /// always knows their save did not succeed.
    Saved { slot: String },
    /// The player asked to quit; confirmation happens in the frontend.
    QuitRequested,
    /// A narrative turn completed.
    Narrative {
        text: String,
        auto_save: AutoSaveStatus,
    },
}

/// A running game: the active character and its collaborators.
pub struct GameSession<E: NarrativeEngine> {
    engine: E,
    store: SaveStore,
    record: CharacterRecord,
    autosave: AutoSave,
}

impl<E: NarrativeEngine> GameSession<E> {
    /// Create a session around a new character, guided by the engine.
    ///
    /// An empty (after trimming) name becomes "Adventurer". This call
    /// blocks on the engine; the frontend shows intent first.
    pub async fn create(
        config: SessionConfig,
        mut engine: E,
        name: &str,
    ) -> Result<Self, SessionError> {
        let name = match name.trim() {
            "" => "Adventurer",
            trimmed => trimmed,
        };

        let record = engine.guide_creation(name).await?;
        Ok(Self::with_record(config, engine, record))
    }

    /// Create a session by loading an existing save slot.
    pub async fn load(
        config: SessionConfig,
        engine: E,
        slot_id: &str,
    ) -> Result<Self, SessionError> {
        let store = SaveStore::new(config.save_dir.clone());
        let record = store.load(slot_id).await?;

        Ok(Self {
            engine,
            store,
            record,
            autosave: AutoSave::new(config.auto_save_frequency, config.auto_save_enabled),
        })
    }

    /// Create a session around an already-built record.
    pub fn with_record(config: SessionConfig, engine: E, record: CharacterRecord) -> Self {
        Self {
            engine,
            store: SaveStore::new(config.save_dir.clone()),
            record,
            autosave: AutoSave::new(config.auto_save_frequency, config.auto_save_enabled),
        }
    }

    /// Render the opening scene. Called once on entering Playing; also
    /// resets the auto-save counter for the new session.
    pub async fn start_adventure(&mut self) -> Result<String, SessionError> {
        self.autosave.reset();
        Ok(self.engine.start_adventure(&self.record).await?)
    }

    /// Handle one line of player input while Playing.
    ///
    /// Reserved commands are dispatched locally and never reach the
    /// engine. Anything else is forwarded verbatim as a narrative
    /// action; only successful actions count toward auto-save.
    pub async fn handle_line(&mut self, line: &str) -> Result<TurnOutcome, SessionError> {
        match PlayerInput::classify(line) {
            PlayerInput::Empty => Ok(TurnOutcome::Idle),
            PlayerInput::Command(Command::Help) => Ok(TurnOutcome::Help),
            PlayerInput::Command(Command::Sheet) => Ok(TurnOutcome::Sheet),
            PlayerInput::Command(Command::Quit) => Ok(TurnOutcome::QuitRequested),
            PlayerInput::Command(Command::Save) => {
                let slot = self.store.save(&self.record).await?;
                Ok(TurnOutcome::Saved { slot })
            }
            PlayerInput::Action(action) => {
                let text = self
                    .engine
                    .process_action(&action, &mut self.record)
                    .await?;

                let auto_save = if self.autosave.record_turn() {
                    match self.store.save(&self.record).await {
                        Ok(slot) => AutoSaveStatus::Saved(slot),
                        Err(e) => AutoSaveStatus::Failed(e.to_string()),
                    }
                } else {
                    AutoSaveStatus::NotDue
                };

                Ok(TurnOutcome::Narrative { text, auto_save })
            }
        }
    }

    /// Quit the session, optionally saving first.
    ///
    /// Quitting itself is never cancelable; only the final save is
    /// optional. Returns the slot written, if any.
    pub async fn quit(&mut self, save_first: bool) -> Result<Option<String>, SessionError> {
        if save_first {
            let slot = self.store.save(&self.record).await?;
            Ok(Some(slot))
        } else {
            Ok(None)
        }
    }

    /// The active character record.
    ///
    /// Callers must re-fetch through this accessor each turn rather
    /// than caching a copy across turn boundaries.
    pub fn record(&self) -> &CharacterRecord {
        &self.record
    }

    /// Mutable access to the active record.
    pub fn record_mut(&mut self) -> &mut CharacterRecord {
        &mut self.record
    }

    /// The save store backing this session.
    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    /// The narrative engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the narrative engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
