//! Core domain types for the Stride metrics engine.
//!
//! This module defines the values that flow through a single computation:
//! - Activity kinds and their labels
//! - Parsed activity records
//! - Caller-supplied body metrics
//! - Derived distance/speed/calorie metrics

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Activity Types
// ============================================================================

/// Type of exercise governing which calorie formula applies
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Walking,
    Running,
}

impl ActivityKind {
    /// Resolve a record label into an activity kind
    ///
    /// Accepts the English names (any case) and the localized labels
    /// `Ходьба` / `Бег`. Returns None for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "walking" | "ходьба" => Some(ActivityKind::Walking),
            "running" | "бег" => Some(ActivityKind::Running),
            _ => None,
        }
    }

    /// Canonical name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            ActivityKind::Walking => "Walking",
            ActivityKind::Running => "Running",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Record and Body Types
// ============================================================================

/// One parsed exercise session
///
/// Built by the record parser, which guarantees `steps > 0` and a positive
/// duration. Records assembled by hand skip those checks; the engine still
/// treats a non-positive duration as zero speed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub steps: u64,
    pub kind: ActivityKind,
    pub duration: Duration,
}

impl ActivityRecord {
    pub fn new(steps: u64, kind: ActivityKind, duration: Duration) -> Self {
        Self {
            steps,
            kind,
            duration,
        }
    }

    /// Session length in fractional hours
    pub fn duration_hours(&self) -> f64 {
        hours(&self.duration)
    }
}

/// Caller-supplied body measurements
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyMetrics {
    pub weight_kg: f64,
    pub height_m: f64,
}

impl BodyMetrics {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Self {
            weight_kg,
            height_m,
        }
    }
}

/// Quantities derived from one record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct DerivedMetrics {
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub calories_kcal: f64,
}

// ============================================================================
// Duration helpers
// ============================================================================

/// Convert a duration to fractional hours without losing sub-second precision
pub fn hours(duration: &Duration) -> f64 {
    seconds(duration) / 3600.0
}

/// Convert a duration to fractional minutes
pub fn minutes(duration: &Duration) -> f64 {
    seconds(duration) / 60.0
}

fn seconds(duration: &Duration) -> f64 {
    duration.num_seconds() as f64 + f64::from(duration.subsec_nanos()) / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_labels() {
        assert_eq!(ActivityKind::from_label("Walking"), Some(ActivityKind::Walking));
        assert_eq!(ActivityKind::from_label("RUNNING"), Some(ActivityKind::Running));
        assert_eq!(ActivityKind::from_label("Ходьба"), Some(ActivityKind::Walking));
        assert_eq!(ActivityKind::from_label("Бег"), Some(ActivityKind::Running));
        assert_eq!(ActivityKind::from_label("Cycling"), None);
        assert_eq!(ActivityKind::from_label(""), None);
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(ActivityKind::Walking.to_string(), "Walking");
        assert_eq!(ActivityKind::Running.to_string(), "Running");
    }

    #[test]
    fn test_duration_conversions() {
        let d = Duration::minutes(90);
        assert!((hours(&d) - 1.5).abs() < 1e-12);
        assert!((minutes(&d) - 90.0).abs() < 1e-12);

        let d = Duration::milliseconds(1500);
        assert!((minutes(&d) - 0.025).abs() < 1e-12);

        let d = Duration::seconds(-1800);
        assert!((hours(&d) + 0.5).abs() < 1e-12);
    }
}
