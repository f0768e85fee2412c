use crate::error::{Result, SubfmtError};

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

/// Upper bound for any time or padding value, in seconds.
pub const MAX_SECONDS: f64 = 1e9;

/// A single timed piece of text. Times are offsets in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    #[serde(rename = "content")]
    pub text: String,
}

impl Segment {
    pub fn new<S: Into<String>>(start: f64, end: f64, text: S) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Checks that the times can be rendered. `index` is the 1-based position
    /// used in the error message.
    pub fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: String| SubfmtError::InvalidSegment { index, reason };
        if !self.start.is_finite() {
            return Err(invalid(format!("start time {} is not a finite number", self.start)));
        }
        if !self.end.is_finite() {
            return Err(invalid(format!("end time {} is not a finite number", self.end)));
        }
        if self.start < 0.0 {
            return Err(invalid(format!("start time {} is negative", self.start)));
        }
        if self.end < 0.0 {
            return Err(invalid(format!("end time {} is negative", self.end)));
        }
        if self.start > MAX_SECONDS || self.end > MAX_SECONDS {
            return Err(invalid(format!(
                "times must not exceed {} seconds, got {} --> {}",
                MAX_SECONDS, self.start, self.end
            )));
        }
        if self.end < self.start {
            // Reversed ranges are rendered as given.
            warn!(
                "Segment #{} ends ({}) before it starts ({})",
                index, self.end, self.start
            );
        }
        Ok(())
    }
}

impl<S: Into<String>> From<((f64, f64), S)> for Segment {
    fn from(((start, end), text): ((f64, f64), S)) -> Self {
        Segment::new(start, end, text)
    }
}

/// Extra display time around each segment, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    before: f64,
    after: f64,
}

impl Padding {
    pub fn new(before: f64, after: f64) -> Result<Self> {
        for (name, value) in [("show_before", before), ("show_after", after)].iter() {
            if !value.is_finite() || *value < 0.0 || *value > MAX_SECONDS {
                return Err(SubfmtError::InvalidPadding(format!(
                    "{} must be between 0 and {} seconds, got {}",
                    name, MAX_SECONDS, value
                )));
            }
        }
        Ok(Self { before, after })
    }

    /// Display window of a validated segment: the start moves back by `before`
    /// but never below zero, the end moves forward by `after`.
    pub fn apply(&self, segment: &Segment) -> (Duration, Duration) {
        let show_at = (segment.start - self.before).max(0.0);
        let hide_at = segment.end + self.after;
        (to_millis(show_at), to_millis(hide_at))
    }
}

fn to_millis(secs: f64) -> Duration {
    Duration::from_millis((secs * 1000.0).round() as u64)
}
