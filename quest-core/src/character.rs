//! The character record - the unit of persisted game state.
//!
//! A record carries a fixed required core (name, class, race, level,
//! hit points, experience) plus an open-ended extension map owned by
//! the narrative engine. The extension fields are round-tripped
//! through saves unmodified and never interpreted by this layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a parsed record can still be unusable.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("character name is empty")]
    EmptyName,

    #[error("level must be at least 1 (got {0})")]
    InvalidLevel(u32),

    #[error("hit points out of range: {current}/{max}")]
    InvalidHitPoints { current: i32, max: i32 },
}

/// A playable character, as persisted to a save slot.
///
/// Serializes to a flat JSON object: the required keys below plus any
/// engine-owned extension keys, flattened alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Display name; also the save-slot key after sanitization.
    pub name: String,

    /// Class display string (e.g. "Rogue").
    pub class: String,

    /// Race display string (e.g. "Elf").
    pub race: String,

    /// Character level, starting at 1.
    pub level: u32,

    /// Current hit points.
    pub current_hp: i32,

    /// Maximum hit points.
    pub max_hp: i32,

    /// Experience points.
    pub xp: u32,

    /// Engine-owned fields, passed through unmodified.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CharacterRecord {
    /// Create a level-1 record with the given identity and hit points.
    pub fn new(
        name: impl Into<String>,
        class: impl Into<String>,
        race: impl Into<String>,
        max_hp: i32,
    ) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            race: race.into(),
            level: 1,
            current_hp: max_hp,
            max_hp,
            xp: 0,
            extra: Map::new(),
        }
    }

    /// Check the record invariants: non-empty name, level >= 1,
    /// `0 <= current_hp <= max_hp`.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if self.level == 0 {
            return Err(RecordError::InvalidLevel(self.level));
        }
        if self.current_hp < 0 || self.current_hp > self.max_hp {
            return Err(RecordError::InvalidHitPoints {
                current: self.current_hp,
                max: self.max_hp,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_valid() {
        let record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        assert!(record.validate().is_ok());
        assert_eq!(record.level, 1);
        assert_eq!(record.current_hp, 10);
        assert_eq!(record.xp, 0);
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let record = CharacterRecord::new("   ", "Rogue", "Elf", 10);
        assert!(matches!(record.validate(), Err(RecordError::EmptyName)));
    }

    #[test]
    fn test_validate_rejects_bad_hp() {
        let mut record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        record.current_hp = 12;
        assert!(matches!(
            record.validate(),
            Err(RecordError::InvalidHitPoints { .. })
        ));

        record.current_hp = -1;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_level_zero() {
        let mut record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        record.level = 0;
        assert!(matches!(
            record.validate(),
            Err(RecordError::InvalidLevel(0))
        ));
    }

    #[test]
    fn test_extension_fields_round_trip() {
        let mut record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        record
            .extra
            .insert("inventory".to_string(), serde_json::json!(["dagger", "rope"]));
        record
            .extra
            .insert("gold".to_string(), serde_json::json!(42));

        let json = serde_json::to_string_pretty(&record).unwrap();
        let parsed: CharacterRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, record);
        assert_eq!(parsed.extra["gold"], serde_json::json!(42));
    }

    #[test]
    fn test_extension_fields_are_flat() {
        let mut record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        record
            .extra
            .insert("alignment".to_string(), serde_json::json!("chaotic good"));

        let value: Value = serde_json::to_value(&record).unwrap();
        // Extension keys sit next to the core keys, not nested.
        assert_eq!(value["alignment"], "chaotic good");
        assert_eq!(value["name"], "Kael");
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_missing_required_field_fails_parse() {
        let json = r#"{"name": "Kael", "class": "Rogue", "race": "Elf"}"#;
        assert!(serde_json::from_str::<CharacterRecord>(json).is_err());
    }
}
