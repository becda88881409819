//! Voice rendering parameters.

use serde::{Deserialize, Serialize};

/// Valid range for stability.
pub const STABILITY_RANGE: (f32, f32) = (0.0, 1.0);
/// Valid range for similarity boost.
pub const SIMILARITY_RANGE: (f32, f32) = (0.0, 1.0);
/// Valid range for speaking speed.
pub const SPEED_RANGE: (f32, f32) = (0.7, 1.2);

/// Voice rendering parameters for the synthesis backend.
///
/// Out-of-range values are clamped to the valid range before being
/// sent, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Voice stability (0.0 to 1.0).
    pub stability: f32,
    /// Similarity boost (0.0 to 1.0).
    pub similarity_boost: f32,
    /// Speaking speed multiplier (0.7 to 1.2).
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.8,
            speed: 1.0,
        }
    }
}

impl VoiceSettings {
    /// Applies the overrides that are present, leaving the remaining
    /// fields at their current values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &VoiceOverrides) -> Self {
        if let Some(stability) = overrides.stability {
            self.stability = stability;
        }
        if let Some(similarity_boost) = overrides.similarity_boost {
            self.similarity_boost = similarity_boost;
        }
        if let Some(speed) = overrides.speed {
            self.speed = speed;
        }
        self
    }

    /// Returns a copy with every field clamped to its valid range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            stability: self.stability.clamp(STABILITY_RANGE.0, STABILITY_RANGE.1),
            similarity_boost: self
                .similarity_boost
                .clamp(SIMILARITY_RANGE.0, SIMILARITY_RANGE.1),
            speed: self.speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1),
        }
    }
}

/// Optional per-request overrides parsed from user input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VoiceOverrides {
    /// Override for stability.
    pub stability: Option<f32>,
    /// Override for similarity boost.
    pub similarity_boost: Option<f32>,
    /// Override for speaking speed.
    pub speed: Option<f32>,
}

impl VoiceOverrides {
    /// Returns true when no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stability.is_none() && self.similarity_boost.is_none() && self.speed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let settings = VoiceSettings::default();
        assert_eq!(settings, settings.clamped());
    }

    #[test]
    fn overrides_apply_only_present_fields() {
        let overrides = VoiceOverrides {
            stability: Some(0.3),
            similarity_boost: None,
            speed: Some(1.1),
        };

        let settings = VoiceSettings::default().with_overrides(&overrides);
        assert_eq!(settings.stability, 0.3);
        assert_eq!(settings.similarity_boost, 0.8);
        assert_eq!(settings.speed, 1.1);
    }

    #[test]
    fn out_of_range_values_clamp_silently() {
        let settings = VoiceSettings {
            stability: 2.5,
            similarity_boost: -1.0,
            speed: 9.0,
        }
        .clamped();

        assert_eq!(settings.stability, 1.0);
        assert_eq!(settings.similarity_boost, 0.0);
        assert_eq!(settings.speed, 1.2);
    }

    #[test]
    fn in_range_values_pass_through() {
        let settings = VoiceSettings {
            stability: 0.4,
            similarity_boost: 0.9,
            speed: 0.8,
        };

        assert_eq!(settings, settings.clamped());
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let overrides = VoiceOverrides::default();
        assert!(overrides.is_empty());

        let settings = VoiceSettings::default().with_overrides(&overrides);
        assert_eq!(settings, VoiceSettings::default());
    }
}
