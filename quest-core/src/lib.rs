//! Session engine for an AI-narrated text adventure.
//!
//! This crate provides:
//! - Character records with engine-owned extension fields
//! - Atomic JSON save-slot persistence
//! - Command routing between reserved words and free-text actions
//! - Auto-save cadence tracking
//! - A `GameSession` facade tying it together around a pluggable
//!   narrative engine (the AI Dungeon Master)
//!
//! # Quick Start
//!
//! ```ignore
//! use quest_core::{Dm, GameSession, SessionConfig, TurnOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SessionConfig::new("saves");
//!     let dm = Dm::from_env()?;
//!
//!     let mut session = GameSession::create(config, dm, "Kael").await?;
//!     println!("{}", session.start_adventure().await?);
//!
//!     if let TurnOutcome::Narrative { text, .. } =
//!         session.handle_line("I look around the tavern").await?
//!     {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod autosave;
pub mod character;
pub mod command;
pub mod dm;
pub mod engine;
pub mod session;
pub mod state;
pub mod store;
pub mod testing;

// Primary public API
pub use character::CharacterRecord;
pub use command::{Command, PlayerInput};
pub use dm::{Dm, DmConfig};
pub use engine::{EngineError, NarrativeEngine};
pub use session::{
    AutoSaveStatus, GameSession, SessionConfig, SessionError, TurnOutcome,
    DEFAULT_AUTO_SAVE_FREQUENCY,
};
pub use state::{initial_state, select_slot, MenuChoice, SessionState};
pub use store::{slot_id_for, SaveStore, SlotInfo, StoreError};
