//! Meteor shower scoring.
//!
//! A shower has two nested windows. The visibility window drives the
//! lifecycle state; the narrower peak window only feeds the scorer through
//! [`MeteorShower::at_peak`]. Activity away from the peak is modeled as a
//! Gaussian falloff around the peak-window midpoint with a 24 hour sigma.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::{truncate_score, Scored};
use crate::temporal::{LifecycleState, TimeInterval};
use crate::types::{span_hours, Span, Timestamp};

/// Standard deviation of the activity curve, in hours.
pub const ZHR_SIGMA_HOURS: f64 = 24.0;

/// Lead time (hours) within which an approaching peak or opening window
/// counts as favorable.
pub const FAVORABLE_LEAD_HOURS: f64 = 12.0;

/// Active showers with less than this many hours of visibility left are
/// ending soon.
pub const ENDING_SOON_HOURS: i64 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteorShower {
    pub name: String,
    /// IAU three-letter code, e.g. `GEM`.
    pub code: String,
    pub peak: TimeInterval,
    pub visibility: TimeInterval,
    /// Zenithal hourly rate at peak.
    pub peak_zhr: u32,
    #[serde(default)]
    pub parent_body: Option<String>,
}

impl MeteorShower {
    /// Whether `now` lies within the peak window (inclusive).
    pub fn at_peak(&self, now: Timestamp) -> bool {
        self.peak.contains(now)
    }

    /// Signed time to peak start: zero while at peak, negative once the peak
    /// window has opened.
    pub fn time_to_peak(&self, now: Timestamp) -> Span {
        if self.at_peak(now) {
            Span::zero()
        } else {
            self.peak.until_start(now)
        }
    }

    /// Hours between `now` and the peak-window midpoint (signed).
    pub fn hours_from_peak_midpoint(&self, now: Timestamp) -> f64 {
        span_hours(now - self.peak.midpoint())
    }

    /// Modeled hourly rate at `now`.
    ///
    /// Floored at 1 while active, 1 while upcoming, 0 once ended.
    pub fn current_rate(&self, now: Timestamp) -> f64 {
        match self.state(now) {
            LifecycleState::Upcoming => 1.0,
            LifecycleState::Ended => 0.0,
            LifecycleState::Active => {
                let x = self.hours_from_peak_midpoint(now) / ZHR_SIGMA_HOURS;
                (f64::from(self.peak_zhr) * (-0.5 * x * x).exp()).max(1.0)
            }
        }
    }

    /// [`Self::current_rate`] rounded to whole meteors per hour.
    pub fn current_zhr(&self, now: Timestamp) -> u32 {
        self.current_rate(now).round() as u32
    }

    fn hours_to_visibility(&self, now: Timestamp) -> f64 {
        span_hours(self.visibility.until_start(now))
    }

    /// Reject showers whose windows are inverted or not nested.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Meteor shower name must not be empty".to_string(),
            ));
        }
        if !self.visibility.is_ordered() || !self.peak.is_ordered() {
            return Err(CoreError::Validation(format!(
                "Meteor shower '{}' has a window ending before it starts",
                self.name
            )));
        }
        if !self.visibility.encloses(&self.peak) {
            return Err(CoreError::Validation(format!(
                "Meteor shower '{}' peak window must lie within its visibility window",
                self.name
            )));
        }
        Ok(())
    }
}

/// Score for a shower whose visibility opens `hours` from now.
pub fn upcoming_score(hours: f64) -> u8 {
    let raw = if hours <= 24.0 {
        80.0 - hours * 0.83
    } else if hours <= 72.0 {
        60.0 - (hours - 24.0) * 0.625
    } else {
        15.0
    };
    truncate_score(raw)
}

impl Scored for MeteorShower {
    fn state(&self, now: Timestamp) -> LifecycleState {
        self.visibility.state(now)
    }

    fn score(&self, now: Timestamp) -> u8 {
        match self.state(now) {
            LifecycleState::Active if self.at_peak(now) => {
                let bonus = (f64::from(self.peak_zhr) / 10.0).min(15.0);
                truncate_score(85.0 + bonus)
            }
            LifecycleState::Active => {
                // A zero-rate shower has no meaningful ratio.
                let ratio = if self.peak_zhr == 0 {
                    0.0
                } else {
                    self.current_rate(now) / f64::from(self.peak_zhr)
                };
                truncate_score(40.0 + 44.0 * ratio)
            }
            LifecycleState::Upcoming => upcoming_score(self.hours_to_visibility(now)),
            LifecycleState::Ended => 0,
        }
    }

    fn favorable(&self, now: Timestamp) -> bool {
        if self.at_peak(now) {
            return true;
        }
        match self.state(now) {
            LifecycleState::Active => {
                let to_peak = span_hours(self.time_to_peak(now));
                (0.0..=FAVORABLE_LEAD_HOURS).contains(&to_peak)
            }
            LifecycleState::Upcoming => self.hours_to_visibility(now) <= FAVORABLE_LEAD_HOURS,
            LifecycleState::Ended => false,
        }
    }

    fn time_remaining(&self, now: Timestamp) -> Span {
        self.visibility.until_end(now)
    }

    fn ending_soon(&self, now: Timestamp) -> bool {
        self.state(now) == LifecycleState::Active
            && self.time_remaining(now) < Span::hours(ENDING_SOON_HOURS)
    }
}
