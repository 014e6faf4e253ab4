//! Amateur bands and per-band propagation conditions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::{round_score, Rating, Scored};
use crate::temporal::LifecycleState;
use crate::types::{Span, Timestamp};

/// Good-rated conditions need confidence strictly above this to be favorable.
pub const FAVORABLE_MIN_CONFIDENCE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// Amateur frequency band, ordered from lowest to highest frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "160m")]
    M160,
    #[serde(rename = "80m")]
    M80,
    #[serde(rename = "60m")]
    M60,
    #[serde(rename = "40m")]
    M40,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "20m")]
    M20,
    #[serde(rename = "17m")]
    M17,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "12m")]
    M12,
    #[serde(rename = "10m")]
    M10,
    #[serde(rename = "6m")]
    M6,
    #[serde(rename = "2m")]
    M2,
    #[serde(rename = "70cm")]
    Cm70,
}

/// Band edges in kHz (IARU region 2), lowest band first.
const BAND_EDGES_KHZ: &[(Band, f64, f64)] = &[
    (Band::M160, 1_800.0, 2_000.0),
    (Band::M80, 3_500.0, 4_000.0),
    (Band::M60, 5_330.0, 5_410.0),
    (Band::M40, 7_000.0, 7_300.0),
    (Band::M30, 10_100.0, 10_150.0),
    (Band::M20, 14_000.0, 14_350.0),
    (Band::M17, 18_068.0, 18_168.0),
    (Band::M15, 21_000.0, 21_450.0),
    (Band::M12, 24_890.0, 24_990.0),
    (Band::M10, 28_000.0, 29_700.0),
    (Band::M6, 50_000.0, 54_000.0),
    (Band::M2, 144_000.0, 148_000.0),
    (Band::Cm70, 420_000.0, 450_000.0),
];

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M160 => "160m",
            Self::M80 => "80m",
            Self::M60 => "60m",
            Self::M40 => "40m",
            Self::M30 => "30m",
            Self::M20 => "20m",
            Self::M17 => "17m",
            Self::M15 => "15m",
            Self::M12 => "12m",
            Self::M10 => "10m",
            Self::M6 => "6m",
            Self::M2 => "2m",
            Self::Cm70 => "70cm",
        }
    }

    /// Band containing the given frequency, if any.
    pub fn from_frequency_khz(khz: f64) -> Option<Self> {
        BAND_EDGES_KHZ
            .iter()
            .find(|(_, lo, hi)| (*lo..=*hi).contains(&khz))
            .map(|(band, _, _)| *band)
    }

    /// HF bands are 160m through 10m.
    pub fn is_hf(&self) -> bool {
        *self <= Band::M10
    }
}

// ---------------------------------------------------------------------------
// BandCondition
// ---------------------------------------------------------------------------

/// Propagation assessment for one band.
///
/// `confidence` is guaranteed to lie in `[0, 1]`; deserialization goes
/// through the same check as [`BandCondition::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBandCondition")]
pub struct BandCondition {
    band: Band,
    rating: Rating,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

#[derive(Deserialize)]
struct RawBandCondition {
    band: Band,
    rating: Rating,
    confidence: f64,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<RawBandCondition> for BandCondition {
    type Error = CoreError;

    fn try_from(raw: RawBandCondition) -> Result<Self, Self::Error> {
        BandCondition::new(raw.band, raw.rating, raw.confidence, raw.notes)
    }
}

impl BandCondition {
    /// Build a condition, rejecting a confidence outside `[0, 1]` or NaN.
    pub fn new(
        band: Band,
        rating: Rating,
        confidence: f64,
        notes: Option<String>,
    ) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(CoreError::Validation(format!(
                "Band condition confidence for {} must be within [0, 1], got {confidence}",
                band.as_str()
            )));
        }
        Ok(Self {
            band,
            rating,
            confidence,
            notes,
        })
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

impl Scored for BandCondition {
    fn state(&self, _now: Timestamp) -> LifecycleState {
        LifecycleState::Active
    }

    fn score(&self, _now: Timestamp) -> u8 {
        round_score(f64::from(self.rating.points()) * self.confidence)
    }

    fn favorable(&self, _now: Timestamp) -> bool {
        self.rating == Rating::Good && self.confidence > FAVORABLE_MIN_CONFIDENCE
    }

    fn time_remaining(&self, _now: Timestamp) -> Span {
        Span::zero()
    }

    fn ending_soon(&self, _now: Timestamp) -> bool {
        false
    }

    fn rating(&self) -> Option<Rating> {
        Some(self.rating)
    }
}
