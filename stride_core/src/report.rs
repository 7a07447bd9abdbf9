//! Human-readable report templates.
//!
//! The text layout (field order, units and two-decimal precision) is fixed;
//! the same structs serialize to JSON for machine consumers.

use crate::{ActivityKind, ActivityRecord, DerivedMetrics};
use serde::Serialize;
use std::fmt;

/// Summary of a single-activity (daily steps) record
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DayReport {
    pub steps: u64,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub calories_kcal: f64,
}

impl DayReport {
    pub fn new(record: &ActivityRecord, metrics: &DerivedMetrics) -> Self {
        Self {
            steps: record.steps,
            distance_km: metrics.distance_km,
            duration_hours: record.duration_hours(),
            calories_kcal: metrics.calories_kcal,
        }
    }
}

impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Steps: {}.\nDistance: {:.2} km.\nDuration: {:.2} h.\nCalories burned: {:.2} kcal.",
            self.steps, self.distance_km, self.duration_hours, self.calories_kcal
        )
    }
}

/// Summary of a training record with an explicit activity
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TrainingReport {
    pub activity: ActivityKind,
    pub steps: u64,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub calories_kcal: f64,
}

impl TrainingReport {
    pub fn new(record: &ActivityRecord, metrics: &DerivedMetrics) -> Self {
        Self {
            activity: record.kind,
            steps: record.steps,
            duration_hours: record.duration_hours(),
            distance_km: metrics.distance_km,
            speed_kmh: metrics.speed_kmh,
            calories_kcal: metrics.calories_kcal,
        }
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Training type: {}\nSteps: {}\nDuration: {:.2} h.\nDistance: {:.2} km.\nSpeed: {:.2} km/h\nCalories burned: {:.2} kcal",
            self.activity,
            self.steps,
            self.duration_hours,
            self.distance_km,
            self.speed_kmh,
            self.calories_kcal
        )
    }
}
