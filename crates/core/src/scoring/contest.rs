//! Contest scoring.
//!
//! A running contest always scores 100. Before the start the score ramps
//! up in three linear bands as the start approaches; beyond 72 hours out it
//! sits at a flat 10.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::band::Band;
use crate::scoring::{truncate_score, Scored};
use crate::temporal::{LifecycleState, TimeInterval};
use crate::types::{span_hours, Span, Timestamp};

/// Upcoming contests starting within this many hours are favorable.
pub const FAVORABLE_LEAD_HOURS: f64 = 6.0;

/// Active contests with less than this many minutes left are ending soon.
pub const ENDING_SOON_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub bands: BTreeSet<Band>,
    #[serde(default)]
    pub modes: BTreeSet<String>,
    #[serde(default)]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

impl Contest {
    pub fn window(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    /// Fractional hours until the start; negative once started.
    pub fn hours_to_start(&self, now: Timestamp) -> f64 {
        span_hours(self.window().until_start(now))
    }

    /// Reject a blank name or a window ending before it starts.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Contest name must not be empty".to_string(),
            ));
        }
        if !self.window().is_ordered() {
            return Err(CoreError::Validation(format!(
                "Contest '{}' ends before it starts",
                self.name
            )));
        }
        Ok(())
    }
}

/// Score for a contest that starts `hours` from now.
pub fn upcoming_score(hours: f64) -> u8 {
    let raw = if hours <= 6.0 {
        100.0 - hours * 3.33
    } else if hours <= 24.0 {
        80.0 - (hours - 6.0) * 2.22
    } else if hours <= 72.0 {
        40.0 - (hours - 24.0) * 0.42
    } else {
        10.0
    };
    truncate_score(raw)
}

impl Scored for Contest {
    fn state(&self, now: Timestamp) -> LifecycleState {
        self.window().state(now)
    }

    fn score(&self, now: Timestamp) -> u8 {
        match self.state(now) {
            LifecycleState::Active => 100,
            LifecycleState::Upcoming => upcoming_score(self.hours_to_start(now)),
            LifecycleState::Ended => 0,
        }
    }

    fn favorable(&self, now: Timestamp) -> bool {
        match self.state(now) {
            LifecycleState::Active => true,
            LifecycleState::Upcoming => self.hours_to_start(now) <= FAVORABLE_LEAD_HOURS,
            LifecycleState::Ended => false,
        }
    }

    fn time_remaining(&self, now: Timestamp) -> Span {
        self.window().until_end(now)
    }

    fn ending_soon(&self, now: Timestamp) -> bool {
        self.state(now) == LifecycleState::Active
            && self.time_remaining(now) < Span::minutes(ENDING_SOON_MINUTES)
    }
}
