//! Testing utilities.
//!
//! `MockEngine` stands in for the AI storyteller with scripted
//! responses, for deterministic tests without API calls.

use crate::character::CharacterRecord;
use crate::engine::{EngineError, NarrativeEngine};

/// Build a deterministic sample character for tests.
pub fn sample_character(name: impl Into<String>) -> CharacterRecord {
    let mut record = CharacterRecord::new(name, "Rogue", "Elf", 10);
    record.level = 3;
    record
}

/// A scripted response from the mock engine.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this narrative text.
    Narrative(String),
    /// Fail the call with an engine error carrying this message.
    Failure(String),
}

impl MockResponse {
    /// A successful narrative response.
    pub fn narrative(text: impl Into<String>) -> Self {
        Self::Narrative(text.into())
    }

    /// A failing response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }
}

/// A narrative engine that returns scripted responses in order.
///
/// When the script is exhausted it falls back to a fixed default
/// narrative, so long scenarios do not need exhaustive scripting.
pub struct MockEngine {
    responses: Vec<MockResponse>,
    response_index: usize,
    /// Number of `process_action` calls that reached the engine.
    pub actions_seen: usize,
    /// Inputs forwarded to `process_action`, verbatim.
    pub inputs: Vec<String>,
    /// When set, `guide_creation` fails with this message.
    pub fail_creation: Option<String>,
}

impl MockEngine {
    /// Create a mock engine with scripted responses.
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            response_index: 0,
            actions_seen: 0,
            inputs: Vec::new(),
            fail_creation: None,
        }
    }

    /// Add a response to the script.
    pub fn queue_response(&mut self, response: MockResponse) {
        self.responses.push(response);
    }

    fn next_response(&mut self) -> MockResponse {
        if self.response_index < self.responses.len() {
            let r = self.responses[self.response_index].clone();
            self.response_index += 1;
            r
        } else {
            MockResponse::narrative("The story continues.")
        }
    }
}

impl NarrativeEngine for MockEngine {
    async fn guide_creation(&mut self, name: &str) -> Result<CharacterRecord, EngineError> {
        if let Some(message) = &self.fail_creation {
            return Err(EngineError::Parse(message.clone()));
        }
        Ok(sample_character(name))
    }

    async fn start_adventure(&mut self, record: &CharacterRecord) -> Result<String, EngineError> {
        Ok(format!("{} stands at the crossroads.", record.name))
    }

    async fn process_action(
        &mut self,
        input: &str,
        _record: &mut CharacterRecord,
    ) -> Result<String, EngineError> {
        self.inputs.push(input.to_string());
        match self.next_response() {
            MockResponse::Narrative(text) => {
                self.actions_seen += 1;
                Ok(text)
            }
            MockResponse::Failure(message) => Err(EngineError::Network(message)),
        }
    }
}
