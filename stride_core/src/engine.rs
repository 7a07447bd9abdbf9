//! Metrics engine tying the parser, the arithmetic and the report templates.
//!
//! An [`Engine`] owns an immutable [`Tuning`] profile and a [`RecordParser`];
//! every call is independent and shares nothing mutable. The free functions
//! at the bottom use a cached default engine.

use crate::metrics::{self, StrideModel, Tuning};
use crate::parser::RecordParser;
use crate::report::{DayReport, TrainingReport};
use crate::{ActivityRecord, BodyMetrics, Config, DerivedMetrics, Result};
use once_cell::sync::Lazy;

/// Engine built from the default tuning profile and parser settings
static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

/// Get a reference to the cached default engine
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// Stateless report generator with fixed tuning
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Engine {
    tuning: Tuning,
    parser: RecordParser,
}

impl Engine {
    pub fn new(tuning: Tuning, parser: RecordParser) -> Self {
        Self { tuning, parser }
    }

    /// Build an engine from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.tuning, config.parser.record_parser()?))
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn parser(&self) -> &RecordParser {
        &self.parser
    }

    /// Derive distance, speed and calories for an already parsed record
    ///
    /// Body metrics are checked before any arithmetic. A zero or negative
    /// duration yields zero speed and zero calories rather than an error.
    pub fn compute(
        &self,
        record: &ActivityRecord,
        body: &BodyMetrics,
        stride: StrideModel,
    ) -> Result<DerivedMetrics> {
        metrics::derive(record, body, stride, &self.tuning)
    }

    /// Parse and evaluate a `steps,duration` record
    pub fn day_action(&self, raw: &str, weight_kg: f64, height_m: f64) -> Result<DayReport> {
        let record = self.parser.parse_day_steps(raw)?;
        let stride = self.tuning.stride_model(self.tuning.day_stride);
        let metrics = self.compute(&record, &BodyMetrics::new(weight_kg, height_m), stride)?;
        Ok(DayReport::new(&record, &metrics))
    }

    /// Parse and evaluate a training record with an explicit activity
    pub fn training(&self, raw: &str, weight_kg: f64, height_m: f64) -> Result<TrainingReport> {
        let record = self.parser.parse_training(raw)?;
        let stride = self.tuning.stride_model(self.tuning.training_stride);
        let metrics = self.compute(&record, &BodyMetrics::new(weight_kg, height_m), stride)?;
        Ok(TrainingReport::new(&record, &metrics))
    }

    /// Day report text; empty on any failure
    pub fn day_action_report(&self, raw: &str, weight_kg: f64, height_m: f64) -> String {
        self.day_action(raw, weight_kg, height_m)
            .map(|report| report.to_string())
            .unwrap_or_default()
    }

    /// Training report text, or the specific error
    pub fn training_report(&self, raw: &str, weight_kg: f64, height_m: f64) -> Result<String> {
        self.training(raw, weight_kg, height_m)
            .map(|report| report.to_string())
    }
}

/// Day report text using the default engine; empty on any failure
pub fn day_action_report(raw: &str, weight_kg: f64, height_m: f64) -> String {
    default_engine().day_action_report(raw, weight_kg, height_m)
}

/// Training report text using the default engine
pub fn training_report(raw: &str, weight_kg: f64, height_m: f64) -> Result<String> {
    default_engine().training_report(raw, weight_kg, height_m)
}
