//! Activity record parsing.
//!
//! A record is a single delimited line in one of two layouts:
//! - day steps: `steps,duration` (activity is implicitly walking)
//! - training: `steps,activity,duration` or `activity,steps,duration`
//!
//! Fields are split with the `csv` reader so quoting behaves as expected,
//! and whitespace around each field is trimmed. Validation runs in a fixed
//! order and stops at the first failure:
//! 1. field count
//! 2. step count (parse, then > 0)
//! 3. duration (parse, then > 0)
//! 4. activity label (training layout only)

use crate::duration::parse_duration;
use crate::{ActivityKind, ActivityRecord, Error, Result};
use chrono::Duration;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

/// Position of the activity label within a training record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrder {
    /// `steps,activity,duration`
    #[default]
    StepsFirst,
    /// `activity,steps,duration`
    ActivityFirst,
}

/// Record layout expected by a call site
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordLayout {
    DaySteps,
    Training,
}

impl RecordLayout {
    fn field_count(self) -> usize {
        match self {
            RecordLayout::DaySteps => 2,
            RecordLayout::Training => 3,
        }
    }
}

/// Parser with a fixed delimiter and field order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordParser {
    delimiter: u8,
    field_order: FieldOrder,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            field_order: FieldOrder::StepsFirst,
        }
    }
}

impl RecordParser {
    /// Build a parser; the delimiter must be a single ASCII byte
    pub fn new(delimiter: u8, field_order: FieldOrder) -> Self {
        Self {
            delimiter,
            field_order,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn field_order(&self) -> FieldOrder {
        self.field_order
    }

    /// Parse a record in the given layout
    pub fn parse(&self, raw: &str, layout: RecordLayout) -> Result<ActivityRecord> {
        let fields = self.split(raw)?;

        if fields.len() != layout.field_count() {
            return Err(Error::MalformedRecord(format!(
                "expected {} fields, got {} in {:?}",
                layout.field_count(),
                fields.len(),
                raw
            )));
        }

        let (steps_field, label_field, duration_field) = match (layout, self.field_order) {
            (RecordLayout::DaySteps, _) => (&fields[0], None, &fields[1]),
            (RecordLayout::Training, FieldOrder::StepsFirst) => {
                (&fields[0], Some(&fields[1]), &fields[2])
            }
            (RecordLayout::Training, FieldOrder::ActivityFirst) => {
                (&fields[1], Some(&fields[0]), &fields[2])
            }
        };

        let steps = parse_steps(steps_field)?;
        let duration = parse_positive_duration(duration_field)?;
        let kind = match label_field {
            Some(label) => ActivityKind::from_label(label)
                .ok_or_else(|| Error::UnknownActivity(label.to_string()))?,
            None => ActivityKind::Walking,
        };

        Ok(ActivityRecord::new(steps, kind, duration))
    }

    /// Parse a `steps,duration` record
    pub fn parse_day_steps(&self, raw: &str) -> Result<ActivityRecord> {
        self.parse(raw, RecordLayout::DaySteps)
    }

    /// Parse a three-field training record
    pub fn parse_training(&self, raw: &str) -> Result<ActivityRecord> {
        self.parse(raw, RecordLayout::Training)
    }

    /// Split a single line into trimmed fields
    fn split(&self, raw: &str) -> Result<Vec<String>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(raw.as_bytes());

        let mut records = reader.records();
        let record = match records.next() {
            Some(record) => {
                record.map_err(|e| Error::MalformedRecord(format!("{:?}: {}", raw, e)))?
            }
            None => StringRecord::new(),
        };

        if records.next().is_some() {
            return Err(Error::MalformedRecord(format!(
                "expected a single line, got several in {:?}",
                raw
            )));
        }

        Ok(record.iter().map(str::to_string).collect())
    }
}

fn parse_steps(field: &str) -> Result<u64> {
    let steps: i64 = field
        .parse()
        .map_err(|e| Error::InvalidStepCount(format!("{:?}: {}", field, e)))?;

    if steps <= 0 {
        return Err(Error::InvalidStepCount(format!(
            "step count must be positive, got {}",
            steps
        )));
    }

    Ok(steps.unsigned_abs())
}

fn parse_positive_duration(field: &str) -> Result<Duration> {
    let duration = parse_duration(field)?;
    if duration <= Duration::zero() {
        return Err(Error::InvalidDuration(format!(
            "duration must be positive, got {:?}",
            field
        )));
    }
    Ok(duration)
}
