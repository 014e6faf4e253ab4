//! Dashboard card composition.
//!
//! A render pass asks every registered [`CardProducer`] whether it can
//! contribute, collects the descriptors they emit, and orders the whole set
//! by priority. Descriptors are recomputed on every pass and never stored.

pub mod producer;
pub mod producers;
pub mod registry;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::hotness::Hotness;
use crate::priority::{calculate_priority, PriorityInput};
use crate::temporal::LifecycleState;
use crate::types::{Span, Timestamp};

pub use producer::CardProducer;
pub use registry::{CardRegistry, HelpSection, RenderedCard};

/// Runs of characters outside the id-safe set.
static ID_UNSAFE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Grid footprint of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSize {
    Small,
    Medium,
    Large,
}

/// Placement data for one card in one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDescriptor {
    /// Unique within a render pass; see [`card_id`].
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub size: CardSize,
    pub priority: i32,
    pub hotness: Hotness,
}

impl CardDescriptor {
    /// Build a descriptor, deriving priority and hotness from `input`.
    pub fn new(
        id: String,
        card_type: &str,
        size: CardSize,
        input: &PriorityInput,
        now: Timestamp,
    ) -> Self {
        let priority = calculate_priority(input, now);
        Self {
            id,
            card_type: card_type.to_string(),
            size,
            priority,
            hotness: Hotness::from_priority(priority),
        }
    }
}

/// Composite card id: `type` plus a natural key, lowercased, with every run
/// of characters outside `[a-z0-9]` collapsed to a single `-`.
///
/// ```
/// use hamdash_core::cards::card_id;
///
/// assert_eq!(card_id("contest", "CQ WW DX (CW)"), "contest-cq-ww-dx-cw");
/// assert_eq!(card_id("band", "20m"), "band-20m");
/// ```
pub fn card_id(card_type: &str, natural_key: &str) -> String {
    let raw = format!("{card_type}-{natural_key}").to_lowercase();
    ID_UNSAFE_RE
        .replace_all(&raw, "-")
        .trim_matches('-')
        .to_string()
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// One labelled value on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailRow {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Render-ready card content. Layout, icons and styling stay with the
/// front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub headline: String,
    pub state: LifecycleState,
    pub score: u8,
    pub favorable: bool,
    pub ending_soon: bool,
    pub details: Vec<DetailRow>,
    pub badges: Vec<String>,
}

/// Compact human form of a span: `2d 4h`, `5h 10m`, `12m`. Negative spans
/// are formatted by magnitude.
pub fn format_span(span: Span) -> String {
    let total_minutes = span.num_minutes().abs();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::scoring::Rating;

    #[test]
    fn card_id_sanitizes() {
        assert_eq!(card_id("contest", "ARRL 10-Meter Contest"), "contest-arrl-10-meter-contest");
        assert_eq!(card_id("activation", "N0CALL/P K-0817"), "activation-n0call-p-k-0817");
    }

    #[test]
    fn card_id_trims_edges() {
        assert_eq!(card_id("meteor", "  GEM 2024!! "), "meteor-gem-2024");
    }

    #[test]
    fn descriptor_derives_priority_and_hotness() {
        let input = PriorityInput::new(true).with_score(85.0).with_rating(Rating::Good);
        let d = CardDescriptor::new("band-20m".into(), "band", CardSize::Small, &input, Utc::now());
        assert_eq!(d.priority, 90);
        assert_eq!(d.hotness, Hotness::Hot);
    }

    #[test]
    fn descriptor_serializes_type_field() {
        let d = CardDescriptor::new(
            "solar".into(),
            "solar",
            CardSize::Large,
            &PriorityInput::default(),
            Utc::now(),
        );
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "solar");
        assert_eq!(json["size"], "large");
        assert_eq!(json["hotness"], "cool");
    }

    #[test]
    fn format_span_units() {
        assert_eq!(format_span(Duration::minutes(12)), "12m");
        assert_eq!(format_span(Duration::minutes(310)), "5h 10m");
        assert_eq!(format_span(Duration::hours(52)), "2d 4h");
        assert_eq!(format_span(Duration::minutes(-90)), "1h 30m");
    }
}
