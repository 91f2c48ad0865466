//! Detector and resolution settings.
//!
//! Thresholds are configuration inputs so callers can tune sensitivity
//! without recompiling. Both structs deserialize with per-field defaults,
//! so a partial document (`{"medium_overlap_minutes": 30}`) is valid.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::MINUTE_MS;

/// Severity classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Overlap share of the shorter event at or above which a conflict is HIGH.
    pub high_overlap_ratio: f64,
    /// Overlap (minutes) at or above which a conflict is at least MEDIUM.
    pub medium_overlap_minutes: i64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            high_overlap_ratio: 0.5,
            medium_overlap_minutes: 15,
        }
    }
}

impl DetectorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HIGH overlap ratio.
    pub fn with_high_overlap_ratio(mut self, ratio: f64) -> Self {
        self.high_overlap_ratio = ratio;
        self
    }

    /// Sets the MEDIUM overlap threshold (minutes).
    pub fn with_medium_overlap_minutes(mut self, minutes: i64) -> Self {
        self.medium_overlap_minutes = minutes;
        self
    }

    /// MEDIUM threshold in milliseconds.
    #[inline]
    pub fn medium_overlap_ms(&self) -> i64 {
        self.medium_overlap_minutes.saturating_mul(MINUTE_MS)
    }

    /// Checks that thresholds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.high_overlap_ratio > 0.0 && self.high_overlap_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "high_overlap_ratio must be in (0, 1], got {}",
                self.high_overlap_ratio
            )));
        }
        if self.medium_overlap_minutes < 0 {
            return Err(ConfigError::Invalid(format!(
                "medium_overlap_minutes must be non-negative, got {}",
                self.medium_overlap_minutes
            )));
        }
        Ok(())
    }
}

/// Resolution generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// How far (minutes) before and after an event to look for free slots.
    pub reschedule_search_minutes: i64,
    /// Events must be longer than this (minutes) to be split.
    pub min_splittable_minutes: i64,
    /// Maximum substitutes proposed per double-booked entity.
    pub max_substitutes_per_entity: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            reschedule_search_minutes: 240,
            min_splittable_minutes: 60,
            max_substitutes_per_entity: 3,
        }
    }
}

impl ResolutionConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reschedule search window (minutes on each side).
    pub fn with_reschedule_search_minutes(mut self, minutes: i64) -> Self {
        self.reschedule_search_minutes = minutes;
        self
    }

    /// Sets the minimum splittable duration (minutes).
    pub fn with_min_splittable_minutes(mut self, minutes: i64) -> Self {
        self.min_splittable_minutes = minutes;
        self
    }

    /// Sets the substitute cap per entity.
    pub fn with_max_substitutes_per_entity(mut self, max: usize) -> Self {
        self.max_substitutes_per_entity = max;
        self
    }

    /// Reschedule search window in milliseconds.
    #[inline]
    pub fn reschedule_search_ms(&self) -> i64 {
        self.reschedule_search_minutes.saturating_mul(MINUTE_MS)
    }

    /// Minimum splittable duration in milliseconds.
    #[inline]
    pub fn min_splittable_ms(&self) -> i64 {
        self.min_splittable_minutes.saturating_mul(MINUTE_MS)
    }

    /// Checks that settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reschedule_search_minutes < 0 {
            return Err(ConfigError::Invalid(format!(
                "reschedule_search_minutes must be non-negative, got {}",
                self.reschedule_search_minutes
            )));
        }
        if self.min_splittable_minutes < 0 {
            return Err(ConfigError::Invalid(format!(
                "min_splittable_minutes must be non-negative, got {}",
                self.min_splittable_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_defaults() {
        let cfg = DetectorConfig::default();
        assert!((cfg.high_overlap_ratio - 0.5).abs() < 1e-10);
        assert_eq!(cfg.medium_overlap_minutes, 15);
        assert_eq!(cfg.medium_overlap_ms(), 900_000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_detector_validation() {
        assert!(DetectorConfig::new().with_high_overlap_ratio(0.0).validate().is_err());
        assert!(DetectorConfig::new().with_high_overlap_ratio(1.5).validate().is_err());
        assert!(DetectorConfig::new().with_high_overlap_ratio(f64::NAN).validate().is_err());
        assert!(DetectorConfig::new().with_high_overlap_ratio(1.0).validate().is_ok());
        assert!(DetectorConfig::new().with_medium_overlap_minutes(-1).validate().is_err());
    }

    #[test]
    fn test_partial_deserialize() {
        let cfg: DetectorConfig =
            serde_json::from_str(r#"{"medium_overlap_minutes": 30}"#).unwrap();
        assert_eq!(cfg.medium_overlap_minutes, 30);
        assert!((cfg.high_overlap_ratio - 0.5).abs() < 1e-10);

        let res: ResolutionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(res, ResolutionConfig::default());
    }

    #[test]
    fn test_resolution_config() {
        let cfg = ResolutionConfig::new()
            .with_reschedule_search_minutes(60)
            .with_min_splittable_minutes(90)
            .with_max_substitutes_per_entity(1);
        assert_eq!(cfg.reschedule_search_ms(), 3_600_000);
        assert_eq!(cfg.min_splittable_ms(), 5_400_000);
        assert_eq!(cfg.max_substitutes_per_entity, 1);
        assert!(cfg.validate().is_ok());
        assert!(ResolutionConfig::new()
            .with_min_splittable_minutes(-5)
            .validate()
            .is_err());
    }
}
