//! Auto-save cadence tracking.
//!
//! Counts completed narrative turns and reports when a save is due.
//! The counter lives only for the current Playing session; it is never
//! persisted, and manual saves do not touch it.

/// Tracks completed narrative turns against a save threshold.
#[derive(Debug, Clone)]
pub struct AutoSave {
    frequency: u32,
    enabled: bool,
    completed: u32,
}

impl AutoSave {
    /// Create a coordinator firing every `frequency` successful turns.
    ///
    /// A frequency of 0 disables auto-saving entirely.
    pub fn new(frequency: u32, enabled: bool) -> Self {
        Self {
            frequency,
            enabled: enabled && frequency > 0,
            completed: 0,
        }
    }

    /// Record one successfully completed narrative turn.
    ///
    /// Returns true when a save is now due; the counter resets in that
    /// case. Failed turns must not be recorded.
    pub fn record_turn(&mut self) -> bool {
        if !self.enabled {
            return false;
        }

        self.completed += 1;
        if self.completed >= self.frequency {
            self.completed = 0;
            true
        } else {
            false
        }
    }

    /// Reset the counter, as done on entering the Playing state.
    pub fn reset(&mut self) {
        self.completed = 0;
    }

    /// Turns completed since the last save (or reset).
    pub fn completed_turns(&self) -> u32 {
        self.completed
    }
}
