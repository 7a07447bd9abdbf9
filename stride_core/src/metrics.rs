//! Distance, speed and calorie arithmetic.
//!
//! All functions here are pure. Body metrics are validated by the engine
//! before any of them run.

use crate::types::{hours, minutes};
use crate::{ActivityKind, ActivityRecord, BodyMetrics, DerivedMetrics, Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const M_IN_KM: f64 = 1000.0;
pub const MIN_IN_H: f64 = 60.0;

/// Default coefficient turning height into stride length
pub const DEFAULT_STEP_LENGTH_COEFFICIENT: f64 = 0.414;
/// Default fixed stride length in meters
pub const DEFAULT_STEP_LENGTH_M: f64 = 0.65;
/// Default walking calorie coefficient
pub const DEFAULT_WALKING_CALORIES_COEFFICIENT: f64 = 0.789;

/// How stride length is obtained for an activity family
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrideSource {
    /// Fixed default stride length
    Fixed,
    /// Height times the step-length coefficient
    Height,
}

/// Stride length model with its constant resolved
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrideModel {
    Fixed { meters: f64 },
    HeightBased { coefficient: f64 },
}

impl StrideModel {
    /// Stride length in meters for a person of the given height
    pub fn stride_length_m(&self, height_m: f64) -> f64 {
        match *self {
            StrideModel::Fixed { meters } => meters,
            StrideModel::HeightBased { coefficient } => height_m * coefficient,
        }
    }
}

/// Immutable tuning constants for the engine
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tuning {
    #[serde(default = "default_step_length_coefficient")]
    pub step_length_coefficient: f64,

    #[serde(default = "default_step_length_m")]
    pub default_step_length_m: f64,

    #[serde(default = "default_walking_calories_coefficient")]
    pub walking_calories_coefficient: f64,

    #[serde(default = "default_day_stride")]
    pub day_stride: StrideSource,

    #[serde(default = "default_training_stride")]
    pub training_stride: StrideSource,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            step_length_coefficient: default_step_length_coefficient(),
            default_step_length_m: default_step_length_m(),
            walking_calories_coefficient: default_walking_calories_coefficient(),
            day_stride: default_day_stride(),
            training_stride: default_training_stride(),
        }
    }
}

// Default value functions
fn default_step_length_coefficient() -> f64 {
    DEFAULT_STEP_LENGTH_COEFFICIENT
}

fn default_step_length_m() -> f64 {
    DEFAULT_STEP_LENGTH_M
}

fn default_walking_calories_coefficient() -> f64 {
    DEFAULT_WALKING_CALORIES_COEFFICIENT
}

fn default_day_stride() -> StrideSource {
    StrideSource::Fixed
}

fn default_training_stride() -> StrideSource {
    StrideSource::Height
}

impl Tuning {
    /// Resolve a stride source into a concrete model
    pub fn stride_model(&self, source: StrideSource) -> StrideModel {
        match source {
            StrideSource::Fixed => StrideModel::Fixed {
                meters: self.default_step_length_m,
            },
            StrideSource::Height => StrideModel::HeightBased {
                coefficient: self.step_length_coefficient,
            },
        }
    }

    /// Check that every constant is usable
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("step_length_coefficient", self.step_length_coefficient),
            ("default_step_length_m", self.default_step_length_m),
            (
                "walking_calories_coefficient",
                self.walking_calories_coefficient,
            ),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.walking_calories_coefficient >= 1.0 {
            return Err(Error::Config(format!(
                "walking_calories_coefficient must be below 1, got {}",
                self.walking_calories_coefficient
            )));
        }
        Ok(())
    }
}

/// Distance in kilometers covered by `steps` strides
pub fn distance_km(steps: u64, stride_length_m: f64) -> f64 {
    steps as f64 * stride_length_m / M_IN_KM
}

/// Average speed in km/h; zero when the duration is not positive
pub fn mean_speed_kmh(distance_km: f64, duration: &Duration) -> f64 {
    if *duration <= Duration::zero() {
        return 0.0;
    }
    distance_km / hours(duration)
}

/// Energy spent in kcal for one activity at a given average speed
pub fn calories_kcal(
    kind: ActivityKind,
    tuning: &Tuning,
    weight_kg: f64,
    speed_kmh: f64,
    duration: &Duration,
) -> f64 {
    if *duration <= Duration::zero() {
        return 0.0;
    }
    let base = weight_kg * speed_kmh * minutes(duration) / MIN_IN_H;
    match kind {
        ActivityKind::Walking => base * tuning.walking_calories_coefficient,
        ActivityKind::Running => base,
    }
}

/// Reject non-positive or non-finite body measurements
pub fn validate_body(body: &BodyMetrics) -> Result<()> {
    if !body.weight_kg.is_finite() || body.weight_kg <= 0.0 {
        return Err(Error::InvalidBodyMetrics(format!(
            "weight must be positive, got {}",
            body.weight_kg
        )));
    }
    if !body.height_m.is_finite() || body.height_m <= 0.0 {
        return Err(Error::InvalidBodyMetrics(format!(
            "height must be positive, got {}",
            body.height_m
        )));
    }
    Ok(())
}

/// Derive distance, speed and calories for one record
///
/// Body measurements so large that a derived value overflows are rejected
/// as `InvalidBodyMetrics`.
pub fn derive(
    record: &ActivityRecord,
    body: &BodyMetrics,
    stride: StrideModel,
    tuning: &Tuning,
) -> Result<DerivedMetrics> {
    validate_body(body)?;

    let distance_km = distance_km(record.steps, stride.stride_length_m(body.height_m));
    let speed_kmh = mean_speed_kmh(distance_km, &record.duration);
    let calories_kcal = calories_kcal(
        record.kind,
        tuning,
        body.weight_kg,
        speed_kmh,
        &record.duration,
    );

    if !(distance_km.is_finite() && speed_kmh.is_finite() && calories_kcal.is_finite()) {
        return Err(Error::InvalidBodyMetrics(format!(
            "weight {} kg and height {} m put the metrics out of range",
            body.weight_kg, body.height_m
        )));
    }

    Ok(DerivedMetrics {
        distance_km,
        speed_kmh,
        calories_kcal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fixed_stride_distance() {
        let stride = Tuning::default().stride_model(StrideSource::Fixed);
        let km = distance_km(678, stride.stride_length_m(1.75));
        assert!(close(km, 0.4407));
        assert_eq!(format!("{:.2}", km), "0.44");
    }

    #[test]
    fn test_height_stride_distance() {
        let stride = Tuning::default().stride_model(StrideSource::Height);
        assert!(close(stride.stride_length_m(1.75), 0.7245));
        assert!(close(distance_km(3456, stride.stride_length_m(1.75)), 2.503872));
    }

    #[test]
    fn test_distance_strictly_increasing_in_steps() {
        let stride = Tuning::default().stride_model(StrideSource::Height);
        for height in [0.5, 1.2, 1.75, 2.1] {
            let len = stride.stride_length_m(height);
            let mut previous = distance_km(1, len);
            for steps in [2, 10, 500, 10_000, 1_000_000] {
                let current = distance_km(steps, len);
                assert!(current > previous);
                assert!(close(current, steps as f64 * len / 1000.0));
                previous = current;
            }
        }
    }

    #[test]
    fn test_speed_zero_only_for_zero_duration() {
        assert_eq!(mean_speed_kmh(5.0, &Duration::zero()), 0.0);
        assert_eq!(mean_speed_kmh(5.0, &Duration::minutes(-10)), 0.0);
        assert!(close(mean_speed_kmh(5.0, &Duration::minutes(30)), 10.0));
        assert!(mean_speed_kmh(0.001, &Duration::hours(100)) > 0.0);
    }

    #[test]
    fn test_walking_applies_coefficient() {
        let tuning = Tuning::default();
        let d = Duration::hours(1);
        let running = calories_kcal(ActivityKind::Running, &tuning, 70.0, 6.0, &d);
        let walking = calories_kcal(ActivityKind::Walking, &tuning, 70.0, 6.0, &d);
        assert!(close(running, 420.0));
        assert!(close(walking, 420.0 * 0.789));
        assert!(walking < running);
    }

    #[test]
    fn test_calories_monotonic_in_duration_and_weight() {
        let tuning = Tuning::default();
        let mut previous = 0.0;
        for mins in [1, 10, 60, 180] {
            let c = calories_kcal(
                ActivityKind::Walking,
                &tuning,
                70.0,
                5.0,
                &Duration::minutes(mins),
            );
            assert!(c >= previous);
            previous = c;
        }
        let light = calories_kcal(ActivityKind::Running, &tuning, 50.0, 5.0, &Duration::hours(1));
        let heavy = calories_kcal(ActivityKind::Running, &tuning, 90.0, 5.0, &Duration::hours(1));
        assert!(heavy > light);
    }

    #[test]
    fn test_derive_rejects_bad_body_metrics() {
        let tuning = Tuning::default();
        let record = ActivityRecord::new(100, ActivityKind::Walking, Duration::hours(1));
        let stride = tuning.stride_model(StrideSource::Height);
        for body in [
            BodyMetrics::new(0.0, 1.75),
            BodyMetrics::new(-70.0, 1.75),
            BodyMetrics::new(70.0, 0.0),
            BodyMetrics::new(70.0, -1.0),
            BodyMetrics::new(f64::NAN, 1.75),
        ] {
            assert!(matches!(
                derive(&record, &body, stride, &tuning),
                Err(Error::InvalidBodyMetrics(_))
            ));
        }
    }

    #[test]
    fn test_derive_rejects_overflowing_body_metrics() {
        let tuning = Tuning::default();
        let record = ActivityRecord::new(3456, ActivityKind::Walking, Duration::hours(3));
        let stride = tuning.stride_model(StrideSource::Height);

        let result = derive(&record, &BodyMetrics::new(1e308, 1.75), stride, &tuning);
        assert!(matches!(result, Err(Error::InvalidBodyMetrics(_))));

        let result = derive(&record, &BodyMetrics::new(70.0, 1e308), stride, &tuning);
        assert!(matches!(result, Err(Error::InvalidBodyMetrics(_))));
    }

    #[test]
    fn test_derive_zero_duration() {
        let tuning = Tuning::default();
        let record = ActivityRecord::new(100, ActivityKind::Running, Duration::zero());
        let metrics = derive(
            &record,
            &BodyMetrics::new(70.0, 1.75),
            tuning.stride_model(StrideSource::Height),
            &tuning,
        )
        .unwrap();
        assert!(metrics.distance_km > 0.0);
        assert_eq!(metrics.speed_kmh, 0.0);
        assert_eq!(metrics.calories_kcal, 0.0);
    }

    #[test]
    fn test_tuning_validation() {
        assert!(Tuning::default().validate().is_ok());

        let mut tuning = Tuning::default();
        tuning.walking_calories_coefficient = 1.2;
        assert!(matches!(tuning.validate(), Err(Error::Config(_))));

        let mut tuning = Tuning::default();
        tuning.step_length_coefficient = 0.0;
        assert!(matches!(tuning.validate(), Err(Error::Config(_))));

        let mut tuning = Tuning::default();
        tuning.default_step_length_m = f64::INFINITY;
        assert!(matches!(tuning.validate(), Err(Error::Config(_))));
    }
}
