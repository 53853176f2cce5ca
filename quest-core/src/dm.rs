//! Claude-backed narrative engine.
//!
//! A focused client for the Anthropic Messages API: non-streaming text
//! completions only. The DM keeps its conversation history in memory
//! for narrative continuity; history is not part of the save file.

use crate::character::CharacterRecord;
use crate::engine::{EngineError, NarrativeEngine};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const SYSTEM_PROMPT: &str = "You are the Dungeon Master for a solo text adventure. \
Narrate vividly but concisely (2-4 paragraphs), always end with the situation the \
player can react to, and never speak for the player.";

const CREATION_PROMPT: &str = "Create a starting character sheet for a new player. \
Respond with a single flat JSON object and no other text. Required keys: \"name\" \
(string), \"class\" (string), \"race\" (string), \"level\" (integer, 1), \
\"current_hp\" and \"max_hp\" (equal positive integers), \"xp\" (integer, 0). \
You may add flavor keys such as \"background\" or \"inventory\".";

/// Configuration for the Dungeon Master.
#[derive(Debug, Clone)]
pub struct DmConfig {
    /// The model to use (defaults to claude-sonnet-4-20250514).
    pub model: Option<String>,

    /// Maximum tokens for responses.
    pub max_tokens: usize,

    /// Temperature for generation.
    pub temperature: Option<f32>,
}

impl Default for DmConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 4096,
            temperature: Some(0.8),
        }
    }
}

/// The AI Dungeon Master.
pub struct Dm {
    client: reqwest::Client,
    api_key: String,
    config: DmConfig,
    history: Vec<ApiMessage>,
}

impl Dm {
    /// Create a new DM with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: api_key.into(),
            config: DmConfig::default(),
            history: Vec::new(),
        }
    }

    /// Create a DM from the ANTHROPIC_API_KEY environment variable.
    pub fn from_env() -> Result<Self, EngineError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| EngineError::NoApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Configure the DM.
    pub fn with_config(mut self, config: DmConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    fn build_headers(&self) -> Result<HeaderMap, EngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| EngineError::Parse(format!("invalid API key: {e}")))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }

    /// Send the given messages and return the concatenated text blocks.
    async fn complete(
        &self,
        system: String,
        messages: Vec<ApiMessage>,
    ) -> Result<String, EngineError> {
        let request = ApiRequest {
            model: self
                .config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.config.max_tokens,
            system,
            messages,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!("{API_BASE}/messages"))
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(EngineError::Api { status, message });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;

        let text = api_response
            .content
            .iter()
            .filter_map(|block| {
                if block.kind == "text" {
                    block.text.as_deref()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(EngineError::Parse("empty response from model".to_string()));
        }

        Ok(text)
    }

    /// Exchange one user turn, recording both sides in history.
    async fn converse(&mut self, user_text: String) -> Result<String, EngineError> {
        self.history.push(ApiMessage::user(user_text));

        let reply = self
            .complete(SYSTEM_PROMPT.to_string(), self.history.clone())
            .await?;

        self.history.push(ApiMessage::assistant(reply.clone()));
        Ok(reply)
    }

    fn character_summary(record: &CharacterRecord) -> String {
        format!(
            "{}, a level {} {} {} (HP {}/{}, XP {})",
            record.name,
            record.level,
            record.race,
            record.class,
            record.current_hp,
            record.max_hp,
            record.xp
        )
    }
}

impl NarrativeEngine for Dm {
    async fn guide_creation(&mut self, name: &str) -> Result<CharacterRecord, EngineError> {
        let prompt = format!("{CREATION_PROMPT}\n\nThe player's chosen name is \"{name}\".");
        let reply = self
            .complete(SYSTEM_PROMPT.to_string(), vec![ApiMessage::user(prompt)])
            .await?;

        // The model is asked for bare JSON but may wrap it in prose or
        // a code fence; take the outermost object.
        let start = reply.find('{');
        let end = reply.rfind('}');
        let json = match (start, end) {
            (Some(s), Some(e)) if s < e => &reply[s..=e],
            _ => {
                return Err(EngineError::Parse(
                    "no character sheet found in response".to_string(),
                ))
            }
        };

        let mut record: CharacterRecord =
            serde_json::from_str(json).map_err(|e| EngineError::Parse(e.to_string()))?;

        // The player's name wins over whatever the model chose.
        record.name = name.to_string();
        record
            .validate()
            .map_err(|e| EngineError::Parse(e.to_string()))?;

        Ok(record)
    }

    async fn start_adventure(&mut self, record: &CharacterRecord) -> Result<String, EngineError> {
        let opening = format!(
            "Begin a new adventure for {}. Set an opening scene and invite the first action.",
            Self::character_summary(record)
        );
        self.converse(opening).await
    }

    async fn process_action(
        &mut self,
        input: &str,
        record: &mut CharacterRecord,
    ) -> Result<String, EngineError> {
        let turn = format!(
            "[{}] {input}",
            Self::character_summary(record)
        );
        self.converse(turn).await
    }
}

#[derive(Debug, Clone, Serialize)]
struct ApiRequest {
    model: String,
    max_tokens: usize,
    system: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

impl ApiMessage {
    fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }

    fn assistant(content: String) -> Self {
        Self {
            role: "assistant",
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ApiContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}
