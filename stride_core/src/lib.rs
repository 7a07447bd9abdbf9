#![forbid(unsafe_code)]

//! Core parsing and metrics engine for the Stride activity tracker.
//!
//! This crate provides:
//! - Domain types (activity kinds, records, body and derived metrics)
//! - Record parsing with compound durations
//! - Distance, speed and calorie arithmetic
//! - Report templates and the two report entry points
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod duration;
pub mod parser;
pub mod metrics;
pub mod report;
pub mod engine;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use duration::parse_duration;
pub use parser::{FieldOrder, RecordLayout, RecordParser};
pub use metrics::{StrideModel, StrideSource, Tuning};
pub use report::{DayReport, TrainingReport};
pub use engine::{day_action_report, default_engine, training_report, Engine};
