//! Volume control
//!
//! Linear volume in the 0.0-1.0 range, handed straight to the sound engine.
//! Mute is binary: muting forces the level to 0.0 and unmuting restores 1.0,
//! whatever the level was before.

use serde::{Deserialize, Serialize};

/// Icon shown next to the volume slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeIcon {
    /// Speaker crossed out
    Muted,

    /// Speaker with sound waves
    Wave,
}

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f32,
}

impl Volume {
    /// Create new volume controller, clamping `level` into 0.0-1.0
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::clamp(level),
        }
    }

    /// Set volume level (0.0-1.0)
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::clamp(level);
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }

    /// Toggle mute state
    ///
    /// 0.0 becomes 1.0, anything else becomes 0.0.
    pub fn toggle_mute(&mut self) {
        self.level = if self.is_muted() { 1.0 } else { 0.0 };
    }

    /// Icon matching the current level
    pub fn icon(&self) -> VolumeIcon {
        if self.is_muted() {
            VolumeIcon::Muted
        } else {
            VolumeIcon::Wave
        }
    }

    fn clamp(level: f32) -> f32 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
