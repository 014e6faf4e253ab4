//! Lifecycle state of time-bounded entities.
//!
//! State is never stored: it is recomputed from `(interval, now)` on every
//! query. Both ends of an interval count as active.

use serde::{Deserialize, Serialize};

use crate::types::{Span, Timestamp};

// ---------------------------------------------------------------------------
// LifecycleState
// ---------------------------------------------------------------------------

/// Where an entity sits relative to its time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Upcoming,
    Active,
    Ended,
}

/// Classify `now` against the closed interval `[start, end]`.
///
/// An inverted interval (`end < start`) is not rejected here: checks run
/// in the order upcoming, ended, active.
pub fn classify(now: Timestamp, start: Timestamp, end: Timestamp) -> LifecycleState {
    if now < start {
        LifecycleState::Upcoming
    } else if now > end {
        LifecycleState::Ended
    } else {
        LifecycleState::Active
    }
}

// ---------------------------------------------------------------------------
// TimeInterval
// ---------------------------------------------------------------------------

/// An immutable `(start, end)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeInterval {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub fn state(&self, now: Timestamp) -> LifecycleState {
        classify(now, self.start, self.end)
    }

    /// Whether `now` falls inside `[start, end]`.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.state(now) == LifecycleState::Active
    }

    /// `start - now`: positive while upcoming.
    pub fn until_start(&self, now: Timestamp) -> Span {
        self.start - now
    }

    /// `end - now`: negative once ended.
    pub fn until_end(&self, now: Timestamp) -> Span {
        self.end - now
    }

    pub fn midpoint(&self) -> Timestamp {
        self.start + (self.end - self.start) / 2
    }

    /// Whether `end >= start`.
    pub fn is_ordered(&self) -> bool {
        self.end >= self.start
    }

    /// Whether `other` lies entirely within this interval.
    pub fn encloses(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
