//! Portable-station activations (parks, summits, islands).
//!
//! An activation is worth chasing while it is on the air and being spotted.
//! The score combines a fixed on-air base with spot freshness; before the
//! scheduled start it steps down with lead time.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::band::Band;
use crate::scoring::{truncate_score, Scored};
use crate::temporal::{LifecycleState, TimeInterval};
use crate::types::{span_hours, span_minutes, Span, Timestamp};

/// Base score for an activation that is on the air.
pub const ACTIVE_BASE_SCORE: f64 = 70.0;

/// Points available for spot freshness on top of the base.
pub const FRESHNESS_POINTS: f64 = 30.0;

/// Spot age (minutes) at which freshness reaches zero.
pub const FRESHNESS_WINDOW_MINUTES: f64 = 30.0;

/// A spot younger than this many minutes makes an active activation favorable.
pub const FAVORABLE_SPOT_MINUTES: f64 = 15.0;

/// Active activations with less than this many minutes left are ending soon.
pub const ENDING_SOON_MINUTES: i64 = 30;

// ---------------------------------------------------------------------------
// Program
// ---------------------------------------------------------------------------

/// Award program the activated reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    /// Parks on the Air.
    Pota,
    /// Summits on the Air.
    Sota,
    /// World Wide Flora & Fauna.
    Wwff,
    /// Islands on the Air.
    Iota,
    Other,
}

impl Program {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pota => "POTA",
            Self::Sota => "SOTA",
            Self::Wwff => "WWFF",
            Self::Iota => "IOTA",
            Self::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    pub callsign: String,
    pub program: Program,
    /// Program reference, e.g. `K-0817` or `W7W/KG-001`.
    pub reference: String,
    #[serde(default)]
    pub reference_name: Option<String>,
    pub frequency_khz: f64,
    pub mode: String,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub last_spot: Option<Timestamp>,
    #[serde(default)]
    pub spot_count: u32,
}

impl Activation {
    pub fn window(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    pub fn band(&self) -> Option<Band> {
        Band::from_frequency_khz(self.frequency_khz)
    }

    /// Minutes since the last spot, if the activation has been spotted.
    pub fn spot_age_minutes(&self, now: Timestamp) -> Option<f64> {
        self.last_spot.map(|spot| span_minutes(now - spot))
    }

    /// Freshness factor in `[0, 1]`: 1 for a spot taken now, falling
    /// linearly to 0 at [`FRESHNESS_WINDOW_MINUTES`]. Zero when never spotted.
    pub fn freshness(&self, now: Timestamp) -> f64 {
        match self.spot_age_minutes(now) {
            Some(age) => (1.0 - age.max(0.0) / FRESHNESS_WINDOW_MINUTES).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.callsign.trim().is_empty() {
            return Err(CoreError::Validation(
                "Activation callsign must not be empty".to_string(),
            ));
        }
        if self.reference.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Activation by {} must carry a reference",
                self.callsign
            )));
        }
        if !self.frequency_khz.is_finite() || self.frequency_khz <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Activation by {} has invalid frequency {}",
                self.callsign, self.frequency_khz
            )));
        }
        if !self.window().is_ordered() {
            return Err(CoreError::Validation(format!(
                "Activation by {} ends before it starts",
                self.callsign
            )));
        }
        Ok(())
    }
}

/// Score for an activation scheduled to start `hours` from now.
pub fn upcoming_score(hours: f64) -> u8 {
    if hours <= 1.0 {
        50
    } else if hours <= 6.0 {
        30
    } else {
        10
    }
}

impl Scored for Activation {
    fn state(&self, now: Timestamp) -> LifecycleState {
        self.window().state(now)
    }

    fn score(&self, now: Timestamp) -> u8 {
        match self.state(now) {
            LifecycleState::Active => {
                truncate_score(ACTIVE_BASE_SCORE + FRESHNESS_POINTS * self.freshness(now))
            }
            LifecycleState::Upcoming => {
                upcoming_score(span_hours(self.window().until_start(now)))
            }
            LifecycleState::Ended => 0,
        }
    }

    fn favorable(&self, now: Timestamp) -> bool {
        self.state(now) == LifecycleState::Active
            && self
                .spot_age_minutes(now)
                .is_some_and(|age| age <= FAVORABLE_SPOT_MINUTES)
    }

    fn time_remaining(&self, now: Timestamp) -> Span {
        self.window().until_end(now)
    }

    fn ending_soon(&self, now: Timestamp) -> bool {
        self.state(now) == LifecycleState::Active
            && self.time_remaining(now) < Span::minutes(ENDING_SOON_MINUTES)
    }

    fn last_updated(&self) -> Option<Timestamp> {
        self.last_spot
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn activation(start_offset: Duration, spot_age: Option<Duration>) -> Activation {
        let start = now() + start_offset;
        Activation {
            callsign: "N0CALL".to_string(),
            program: Program::Pota,
            reference: "K-0817".to_string(),
            reference_name: Some("Rocky Mountain National Park".to_string()),
            frequency_khz: 14_062.0,
            mode: "CW".to_string(),
            start,
            end: start + Duration::hours(2),
            last_spot: spot_age.map(|age| now() - age),
            spot_count: 4,
        }
    }

    #[test]
    fn fresh_spot_scores_100() {
        let a = activation(Duration::minutes(-20), Some(Duration::zero()));
        assert_eq!(a.score(now()), 100);
        assert!(a.favorable(now()));
    }

    #[test]
    fn freshness_decays_linearly() {
        let a = activation(Duration::minutes(-20), Some(Duration::minutes(15)));
        assert_eq!(a.freshness(now()), 0.5);
        assert_eq!(a.score(now()), 85);
    }

    #[test]
    fn stale_spot_falls_back_to_base() {
        let a = activation(Duration::minutes(-60), Some(Duration::minutes(45)));
        assert_eq!(a.score(now()), 70);
        assert!(!a.favorable(now()));
    }

    #[test]
    fn unspotted_active_scores_base_and_is_not_favorable() {
        let a = activation(Duration::minutes(-5), None);
        assert_eq!(a.score(now()), 70);
        assert!(!a.favorable(now()));
    }

    #[test]
    fn upcoming_steps() {
        assert_eq!(activation(Duration::minutes(30), None).score(now()), 50);
        assert_eq!(activation(Duration::hours(3), None).score(now()), 30);
        assert_eq!(activation(Duration::hours(12), None).score(now()), 10);
    }

    #[test]
    fn ended_scores_zero() {
        let a = activation(Duration::hours(-3), Some(Duration::hours(1)));
        assert_eq!(a.state(now()), LifecycleState::Ended);
        assert_eq!(a.score(now()), 0);
        assert!(!a.favorable(now()));
    }

    #[test]
    fn ending_soon_in_last_half_hour() {
        let a = activation(Duration::minutes(-100), Some(Duration::minutes(1)));
        assert!(a.ending_soon(now()));
        let b = activation(Duration::minutes(-60), Some(Duration::minutes(1)));
        assert!(!b.ending_soon(now()));
    }

    #[test]
    fn band_derived_from_frequency() {
        let a = activation(Duration::zero(), None);
        assert_eq!(a.band(), Some(Band::M20));
    }

    #[test]
    fn last_updated_is_last_spot() {
        let a = activation(Duration::zero(), Some(Duration::minutes(3)));
        assert_eq!(a.last_updated(), Some(now() - Duration::minutes(3)));
    }

    #[test]
    fn empty_callsign_rejected() {
        let mut a = activation(Duration::zero(), None);
        a.callsign = "  ".to_string();
        assert_matches!(a.validate(), Err(CoreError::Validation(msg)) if msg.contains("callsign"));
    }

    #[test]
    fn inverted_window_rejected() {
        let mut a = activation(Duration::zero(), None);
        a.end = a.start - Duration::minutes(1);
        assert!(a.validate().is_err());
    }

    #[test]
    fn program_deserializes_snake_case() {
        let p: Program = serde_json::from_str("\"sota\"").unwrap();
        assert_eq!(p, Program::Sota);
        assert_eq!(p.label(), "SOTA");
    }
}
