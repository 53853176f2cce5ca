//! The narrative-engine collaborator interface.
//!
//! The session core talks to the AI storyteller through this seam and
//! nothing else. The shipped implementation is [`crate::dm::Dm`]; tests
//! use [`crate::testing::MockEngine`].

use crate::character::CharacterRecord;
use thiserror::Error;

/// Errors from the narrative engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("API key not configured")]
    NoApiKey,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse engine response: {0}")]
    Parse(String),
}

/// An AI storyteller consumed by the session.
///
/// Every call is a synchronous boundary from the session's point of
/// view: it either returns a response or an error, with no cancellation
/// of an in-flight request.
#[allow(async_fn_in_trait)]
pub trait NarrativeEngine {
    /// Guide creation of a new character with the given name, returning
    /// the fully populated record.
    async fn guide_creation(&mut self, name: &str) -> Result<CharacterRecord, EngineError>;

    /// Render the opening scene for a character entering play.
    async fn start_adventure(&mut self, record: &CharacterRecord) -> Result<String, EngineError>;

    /// Process one free-form player action and return the narrative
    /// response. The engine may apply effects to the record.
    async fn process_action(
        &mut self,
        input: &str,
        record: &mut CharacterRecord,
    ) -> Result<String, EngineError>;
}
