//! Immutable entity snapshot consumed by a dashboard render pass.
//!
//! The acquisition layer replaces the snapshot wholesale on each refresh;
//! nothing here is mutated in place. [`DashboardSnapshot::validate`] is the
//! ingest-boundary check run before a snapshot is accepted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::producers::{ActivationCardProducer, ContestCardProducer, MeteorCardProducer};
use crate::error::CoreError;
use crate::scoring::activation::Activation;
use crate::scoring::band::BandCondition;
use crate::scoring::contest::Contest;
use crate::scoring::meteor::MeteorShower;
use crate::scoring::solar::SolarIndices;
use crate::types::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub solar: Option<SolarIndices>,
    #[serde(default)]
    pub bands: Vec<BandCondition>,
    #[serde(default)]
    pub contests: Vec<Contest>,
    #[serde(default)]
    pub meteor_showers: Vec<MeteorShower>,
    #[serde(default)]
    pub activations: Vec<Activation>,
    /// When the acquisition layer produced this snapshot.
    #[serde(default)]
    pub fetched_at: Option<Timestamp>,
}

/// Entity counts, used for logging and health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub has_solar: bool,
    pub bands: usize,
    pub contests: usize,
    pub meteor_showers: usize,
    pub activations: usize,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.solar.is_none()
            && self.bands.is_empty()
            && self.contests.is_empty()
            && self.meteor_showers.is_empty()
            && self.activations.is_empty()
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            has_solar: self.solar.is_some(),
            bands: self.bands.len(),
            contests: self.contests.len(),
            meteor_showers: self.meteor_showers.len(),
            activations: self.activations.len(),
        }
    }

    /// Validate every entity, returning the first problem found.
    ///
    /// Band confidence is already enforced when a [`BandCondition`] is
    /// built; here bands are only checked for duplicates. Two entities of
    /// one family whose card ids collide are rejected.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(solar) = &self.solar {
            solar.validate()?;
        }

        let mut seen_bands = HashSet::new();
        for cond in &self.bands {
            if !seen_bands.insert(cond.band()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate condition for band {}",
                    cond.band().as_str()
                )));
            }
        }

        for contest in &self.contests {
            contest.validate()?;
        }
        for shower in &self.meteor_showers {
            shower.validate()?;
        }
        for activation in &self.activations {
            activation.validate()?;
        }

        ensure_unique_card_ids("contest", &self.contests, ContestCardProducer::id_for)?;
        ensure_unique_card_ids(
            "meteor shower",
            &self.meteor_showers,
            MeteorCardProducer::id_for,
        )?;
        ensure_unique_card_ids(
            "activation",
            &self.activations,
            ActivationCardProducer::id_for,
        )?;
        Ok(())
    }
}

fn ensure_unique_card_ids<T>(
    family: &str,
    items: &[T],
    id_for: impl Fn(&T) -> String,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for item in items {
        let id = id_for(item);
        if seen.contains(&id) {
            return Err(CoreError::Validation(format!(
                "Two {family} entries map to the same card id '{id}'"
            )));
        }
        seen.insert(id);
    }
    Ok(())
}
