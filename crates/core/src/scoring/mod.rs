//! Per-family scoring strategies.
//!
//! Each entity family implements [`Scored`], turning its raw fields plus
//! `now` into a lifecycle state, a 0-100 quality score and a favorability
//! flag. Families without a time window (solar indices, band conditions)
//! always report [`LifecycleState::Active`].

pub mod activation;
pub mod band;
pub mod contest;
pub mod meteor;
pub mod solar;

use serde::{Deserialize, Serialize};

use crate::temporal::LifecycleState;
use crate::types::{Span, Timestamp};

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

pub const RATING_GOOD: &str = "good";
pub const RATING_FAIR: &str = "fair";
pub const RATING_POOR: &str = "poor";
pub const RATING_UNKNOWN: &str = "unknown";

/// Coarse quality rating shared by band conditions and the priority
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Good,
    Fair,
    Poor,
    Unknown,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => RATING_GOOD,
            Self::Fair => RATING_FAIR,
            Self::Poor => RATING_POOR,
            Self::Unknown => RATING_UNKNOWN,
        }
    }

    /// Points on a 0-100 scale.
    pub fn points(&self) -> u8 {
        match self {
            Self::Good => 100,
            Self::Fair => 60,
            Self::Poor => 20,
            Self::Unknown => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Scored capability
// ---------------------------------------------------------------------------

/// Result bundle of one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub state: LifecycleState,
    pub score: u8,
    pub favorable: bool,
}

/// Capability shared by every scoreable dashboard entity.
///
/// All methods are pure projections of the entity's fields and `now`.
pub trait Scored {
    fn state(&self, now: Timestamp) -> LifecycleState;

    /// Quality score in `[0, 100]`.
    fn score(&self, now: Timestamp) -> u8;

    fn favorable(&self, now: Timestamp) -> bool;

    /// Signed time until the entity's window closes; negative once ended.
    fn time_remaining(&self, now: Timestamp) -> Span;

    fn ending_soon(&self, now: Timestamp) -> bool;

    /// Coarse rating, for families that carry one.
    fn rating(&self) -> Option<Rating> {
        None
    }

    /// When the underlying measurement was taken, if known.
    fn last_updated(&self) -> Option<Timestamp> {
        None
    }

    fn outcome(&self, now: Timestamp) -> ScoreOutcome {
        ScoreOutcome {
            state: self.state(now),
            score: self.score(now),
            favorable: self.favorable(now),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clamp into `[0, 100]` and drop the fractional part.
pub(crate) fn truncate_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).trunc() as u8
}

/// Clamp into `[0, 100]` and round half away from zero.
pub(crate) fn round_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}
