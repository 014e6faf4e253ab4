//! Card priority calculation.
//!
//! Combines a normalized [`PriorityInput`] into a single integer using a
//! fixed weighting scheme (favorable 40, score 35, rating 20, recency 5).
//! Absent optional inputs contribute nothing.

use serde::{Deserialize, Serialize};

use crate::scoring::{Rating, Scored};
use crate::types::{span_minutes, Timestamp};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

pub const WEIGHT_FAVORABLE: f64 = 40.0;
pub const WEIGHT_SCORE: f64 = 35.0;
pub const WEIGHT_RATING: f64 = 20.0;
pub const WEIGHT_RECENCY: f64 = 5.0;

/// Age (minutes) at which the recency contribution reaches zero.
pub const RECENCY_WINDOW_MINUTES: f64 = 60.0;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Normalized scoring input for one card.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriorityInput {
    pub favorable: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    /// Multiplier applied after weighting. Absent means 1.
    #[serde(default)]
    pub user_weight: Option<f64>,
}

impl PriorityInput {
    pub fn new(favorable: bool) -> Self {
        Self {
            favorable,
            ..Self::default()
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_last_updated(mut self, at: Timestamp) -> Self {
        self.last_updated = Some(at);
        self
    }

    pub fn with_user_weight(mut self, weight: f64) -> Self {
        self.user_weight = Some(weight);
        self
    }

    /// Build the input from any scored entity as seen at `now`.
    pub fn from_scored<S: Scored + ?Sized>(entity: &S, now: Timestamp) -> Self {
        let outcome = entity.outcome(now);
        Self {
            favorable: outcome.favorable,
            score: Some(f64::from(outcome.score)),
            rating: entity.rating(),
            last_updated: entity.last_updated(),
            user_weight: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Recency factor: linear from 1 at age 0 down to 0 at 60 minutes.
///
/// Only the lower end is clamped; a `last_updated` in the future yields a
/// factor above 1.
pub fn recency_factor(last_updated: Timestamp, now: Timestamp) -> f64 {
    let age_minutes = span_minutes(now - last_updated);
    (1.0 - age_minutes / RECENCY_WINDOW_MINUTES).max(0.0)
}

/// Unrounded weighted sum, before the user weight is applied.
pub fn weighted_sum(input: &PriorityInput, now: Timestamp) -> f64 {
    let mut total = 0.0;

    if input.favorable {
        total += WEIGHT_FAVORABLE;
    }

    if let Some(score) = input.score {
        total += score.clamp(0.0, 100.0) / 100.0 * WEIGHT_SCORE;
    }

    if let Some(rating) = input.rating {
        total += f64::from(rating.points()) / 100.0 * WEIGHT_RATING;
    }

    if let Some(at) = input.last_updated {
        total += recency_factor(at, now) * WEIGHT_RECENCY;
    }

    total
}

/// Compute the card priority.
///
/// The result is rounded to the nearest integer and is deliberately not
/// clamped after the user weight multiplies it: a weight above 1 may push
/// the priority past 100.
pub fn calculate_priority(input: &PriorityInput, now: Timestamp) -> i32 {
    let weight = input.user_weight.unwrap_or(1.0);
    (weighted_sum(input, now) * weight).round() as i32
}
