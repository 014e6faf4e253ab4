//! Solar and geomagnetic indices.
//!
//! The composite score weights the solar flux index at 60%, the K-index at
//! 30% and the A-index at 10%. Indices have no lifecycle; a snapshot is
//! always current until it is replaced.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::{round_score, Scored};
use crate::temporal::LifecycleState;
use crate::types::{Span, Timestamp};

pub const SFI_WEIGHT: f64 = 0.6;
pub const K_WEIGHT: f64 = 0.3;
pub const A_WEIGHT: f64 = 0.1;

/// Accepted ranges at the ingest boundary.
pub const MAX_SFI: f64 = 1000.0;
pub const MAX_K_INDEX: u8 = 9;
pub const MAX_A_INDEX: u16 = 400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarIndices {
    /// 10.7 cm solar flux index, typically 50-300.
    pub sfi: f64,
    pub a_index: u16,
    pub k_index: u8,
    pub sunspot_number: u32,
    pub source: String,
    pub observed_at: Timestamp,
}

/// Qualitative geomagnetic activity derived from the K-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeomagneticActivity {
    Quiet,
    Unsettled,
    Active,
    Storm,
}

impl GeomagneticActivity {
    pub fn from_k_index(k: u8) -> Self {
        match k {
            0..=2 => Self::Quiet,
            3 => Self::Unsettled,
            4 => Self::Active,
            _ => Self::Storm,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Quiet => "Quiet",
            Self::Unsettled => "Unsettled",
            Self::Active => "Active",
            Self::Storm => "Storm",
        }
    }
}

impl SolarIndices {
    /// SFI mapped linearly from 50..200 onto 0..100.
    pub fn sfi_score(&self) -> f64 {
        ((self.sfi - 50.0) / 150.0 * 100.0).clamp(0.0, 100.0)
    }

    /// Quieter field scores higher; only the lower bound is clamped.
    pub fn k_score(&self) -> f64 {
        ((9.0 - f64::from(self.k_index)) / 9.0 * 100.0).max(0.0)
    }

    /// A-index capped at 50 before inverting.
    pub fn a_score(&self) -> f64 {
        let a = f64::from(self.a_index.min(50));
        ((50.0 - a) / 50.0 * 100.0).clamp(0.0, 100.0)
    }

    pub fn geomagnetic_activity(&self) -> GeomagneticActivity {
        GeomagneticActivity::from_k_index(self.k_index)
    }

    /// Reject values outside physically meaningful ranges.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.sfi.is_finite() || self.sfi < 0.0 || self.sfi > MAX_SFI {
            return Err(CoreError::Validation(format!(
                "Solar flux index must be within [0, {MAX_SFI}], got {}",
                self.sfi
            )));
        }
        if self.k_index > MAX_K_INDEX {
            return Err(CoreError::Validation(format!(
                "K-index must be within [0, {MAX_K_INDEX}], got {}",
                self.k_index
            )));
        }
        if self.a_index > MAX_A_INDEX {
            return Err(CoreError::Validation(format!(
                "A-index must be within [0, {MAX_A_INDEX}], got {}",
                self.a_index
            )));
        }
        if self.source.trim().is_empty() {
            return Err(CoreError::Validation(
                "Solar indices source must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Scored for SolarIndices {
    fn state(&self, _now: Timestamp) -> LifecycleState {
        LifecycleState::Active
    }

    fn score(&self, _now: Timestamp) -> u8 {
        round_score(
            SFI_WEIGHT * self.sfi_score() + K_WEIGHT * self.k_score() + A_WEIGHT * self.a_score(),
        )
    }

    fn favorable(&self, _now: Timestamp) -> bool {
        self.sfi > 100.0 && self.k_index < 4 && self.a_index < 20
    }

    fn time_remaining(&self, _now: Timestamp) -> Span {
        Span::zero()
    }

    fn ending_soon(&self, _now: Timestamp) -> bool {
        false
    }

    fn last_updated(&self) -> Option<Timestamp> {
        Some(self.observed_at)
    }
}
