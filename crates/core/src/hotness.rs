//! Visual hotness classification of card priorities.

use serde::{Deserialize, Serialize};

pub const HOT_THRESHOLD: i32 = 70;
pub const WARM_THRESHOLD: i32 = 45;
pub const NEUTRAL_THRESHOLD: i32 = 20;

/// Ordinal visual-priority label. Variants are declared coolest first so
/// the derived ordering reads `Hot > Warm > Neutral > Cool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hotness {
    Cool,
    Neutral,
    Warm,
    Hot,
}

impl Hotness {
    /// Map a priority onto a label. Each band includes its lower bound.
    pub fn from_priority(priority: i32) -> Self {
        if priority >= HOT_THRESHOLD {
            Self::Hot
        } else if priority >= WARM_THRESHOLD {
            Self::Warm
        } else if priority >= NEUTRAL_THRESHOLD {
            Self::Neutral
        } else {
            Self::Cool
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Neutral => "neutral",
            Self::Cool => "cool",
        }
    }
}
