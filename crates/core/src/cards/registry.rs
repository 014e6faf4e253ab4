//! Producer registry and the render-pass composition step.
//!
//! The registry is an explicit object built at startup and handed to
//! whatever runs render passes. It is append-only: producers are never
//! deduplicated, help sections are deduplicated by id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::producer::CardProducer;
use crate::cards::{CardDescriptor, CardView};
use crate::error::CoreError;
use crate::snapshot::DashboardSnapshot;
use crate::types::Timestamp;

/// A help entry shown alongside the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpSection {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// A descriptor joined with its rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCard {
    #[serde(flatten)]
    pub descriptor: CardDescriptor,
    pub view: CardView,
}

#[derive(Default)]
pub struct CardRegistry {
    producers: Vec<Box<dyn CardProducer>>,
    help: Vec<HelpSection>,
}

impl std::fmt::Debug for CardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types: Vec<_> = self.producers.iter().map(|p| p.card_type()).collect();
        f.debug_struct("CardRegistry")
            .field("producers", &types)
            .field("help", &self.help.len())
            .finish()
    }
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a producer. Registering the same producer twice yields two
    /// sets of cards.
    pub fn register<P: CardProducer + 'static>(&mut self, producer: P) {
        self.producers.push(Box::new(producer));
    }

    /// Add a help section unless one with the same id exists. Returns
    /// whether it was added.
    pub fn register_help(&mut self, section: HelpSection) -> bool {
        if self.help.iter().any(|h| h.id == section.id) {
            tracing::debug!(id = %section.id, "Help section already registered, skipping");
            return false;
        }
        self.help.push(section);
        true
    }

    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    pub fn help_sections(&self) -> &[HelpSection] {
        &self.help
    }

    /// Collect descriptors from every applicable producer, tagged with the
    /// index of the producer that emitted them, highest priority first.
    ///
    /// Ties keep registration order, then emission order (`sort_by` is
    /// stable).
    fn compose_indexed(
        &self,
        data: &DashboardSnapshot,
        now: Timestamp,
    ) -> Vec<(usize, CardDescriptor)> {
        let mut cards = Vec::new();

        for (idx, producer) in self.producers.iter().enumerate() {
            if !producer.can_render(data) {
                tracing::debug!(card_type = producer.card_type(), "Producer not applicable");
                continue;
            }
            let emitted = producer.create_config(data, now);
            if emitted.is_empty() {
                tracing::debug!(card_type = producer.card_type(), "Producer emitted no cards");
            }
            cards.extend(emitted.into_iter().map(|d| (idx, d)));
        }

        cards.sort_by(|(_, a), (_, b)| b.priority.cmp(&a.priority));

        let mut seen = HashSet::new();
        for (_, card) in &cards {
            if !seen.insert(card.id.as_str()) {
                tracing::warn!(id = %card.id, "Duplicate card id in render pass");
            }
        }

        cards
    }

    /// Ordered descriptors for one render pass.
    pub fn compose(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<CardDescriptor> {
        self.compose_indexed(data, now)
            .into_iter()
            .map(|(_, d)| d)
            .collect()
    }

    /// Ordered descriptors joined with their content. Descriptors whose
    /// producer cannot render them are dropped.
    pub fn render(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<RenderedCard> {
        let cards: Vec<RenderedCard> = self
            .compose_indexed(data, now)
            .into_iter()
            .filter_map(|(idx, descriptor)| {
                let view = self.producers[idx].render(data, &descriptor, now)?;
                Some(RenderedCard { descriptor, view })
            })
            .collect();

        tracing::debug!(cards = cards.len(), "Composed dashboard");
        cards
    }

    /// Look up a single rendered card by id.
    pub fn find(
        &self,
        data: &DashboardSnapshot,
        id: &str,
        now: Timestamp,
    ) -> Result<RenderedCard, CoreError> {
        let (idx, descriptor) = self
            .compose_indexed(data, now)
            .into_iter()
            .find(|(_, d)| d.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "card",
                key: id.to_string(),
            })?;

        let view = self.producers[idx]
            .render(data, &descriptor, now)
            .ok_or_else(|| CoreError::NotFound {
                entity: "card",
                key: id.to_string(),
            })?;

        Ok(RenderedCard { descriptor, view })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;
    use crate::cards::CardSize;
    use crate::hotness::Hotness;
    use crate::temporal::LifecycleState;

    /// Emits fixed-priority cards regardless of data.
    struct FixedProducer {
        card_type: &'static str,
        priorities: Vec<i32>,
        applicable: bool,
    }

    impl FixedProducer {
        fn new(card_type: &'static str, priorities: &[i32]) -> Self {
            Self {
                card_type,
                priorities: priorities.to_vec(),
                applicable: true,
            }
        }
    }

    impl CardProducer for FixedProducer {
        fn card_type(&self) -> &'static str {
            self.card_type
        }

        fn can_render(&self, _data: &DashboardSnapshot) -> bool {
            self.applicable
        }

        fn create_config(&self, _data: &DashboardSnapshot, _now: Timestamp) -> Vec<CardDescriptor> {
            self.priorities
                .iter()
                .enumerate()
                .map(|(i, &priority)| CardDescriptor {
                    id: format!("{}-{i}", self.card_type),
                    card_type: self.card_type.to_string(),
                    size: CardSize::Small,
                    priority,
                    hotness: Hotness::from_priority(priority),
                })
                .collect()
        }

        fn render(
            &self,
            _data: &DashboardSnapshot,
            config: &CardDescriptor,
            _now: Timestamp,
        ) -> Option<CardView> {
            Some(CardView {
                title: config.id.clone(),
                subtitle: None,
                headline: String::new(),
                state: LifecycleState::Active,
                score: 0,
                favorable: false,
                ending_soon: false,
                details: vec![],
                badges: vec![],
            })
        }
    }

    fn ids(cards: &[CardDescriptor]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn higher_priority_card_placed_first() {
        let mut registry = CardRegistry::new();
        registry.register(FixedProducer::new("low", &[40]));
        registry.register(FixedProducer::new("high", &[90]));

        let cards = registry.compose(&DashboardSnapshot::default(), Utc::now());
        assert_eq!(ids(&cards), vec!["high-0", "low-0"]);
    }

    #[test]
    fn multi_card_producers_are_interleaved_globally() {
        let mut registry = CardRegistry::new();
        registry.register(FixedProducer::new("a", &[10, 80]));
        registry.register(FixedProducer::new("b", &[50]));

        let cards = registry.compose(&DashboardSnapshot::default(), Utc::now());
        assert_eq!(ids(&cards), vec!["a-1", "b-0", "a-0"]);
    }

    #[test]
    fn ties_keep_registration_then_emission_order() {
        let mut registry = CardRegistry::new();
        registry.register(FixedProducer::new("first", &[50, 50]));
        registry.register(FixedProducer::new("second", &[50]));

        let cards = registry.compose(&DashboardSnapshot::default(), Utc::now());
        assert_eq!(ids(&cards), vec!["first-0", "first-1", "second-0"]);
    }

    #[test]
    fn inapplicable_producer_is_skipped() {
        let mut registry = CardRegistry::new();
        let mut skipped = FixedProducer::new("skipped", &[99]);
        skipped.applicable = false;
        registry.register(skipped);
        registry.register(FixedProducer::new("kept", &[1]));

        let cards = registry.compose(&DashboardSnapshot::default(), Utc::now());
        assert_eq!(ids(&cards), vec!["kept-0"]);
    }

    #[test]
    fn producers_are_not_deduplicated() {
        let mut registry = CardRegistry::new();
        registry.register(FixedProducer::new("dup", &[10]));
        registry.register(FixedProducer::new("dup", &[10]));

        assert_eq!(registry.producer_count(), 2);
        assert_eq!(registry.compose(&DashboardSnapshot::default(), Utc::now()).len(), 2);
    }

    #[test]
    fn help_sections_deduplicated_by_id() {
        let mut registry = CardRegistry::new();
        let section = HelpSection {
            id: "solar".to_string(),
            title: "Solar".to_string(),
            body: "first".to_string(),
        };
        assert!(registry.register_help(section.clone()));
        assert!(!registry.register_help(HelpSection {
            body: "second".to_string(),
            ..section
        }));
        assert_eq!(registry.help_sections().len(), 1);
        assert_eq!(registry.help_sections()[0].body, "first");
    }

    #[test]
    fn render_joins_views_in_priority_order() {
        let mut registry = CardRegistry::new();
        registry.register(FixedProducer::new("x", &[5, 75]));

        let rendered = registry.render(&DashboardSnapshot::default(), Utc::now());
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].view.title, "x-1");
        assert_eq!(rendered[0].descriptor.hotness, Hotness::Hot);
    }

    #[test]
    fn find_by_id() {
        let mut registry = CardRegistry::new();
        registry.register(FixedProducer::new("x", &[5, 75]));

        let card = registry
            .find(&DashboardSnapshot::default(), "x-0", Utc::now())
            .unwrap();
        assert_eq!(card.descriptor.priority, 5);
    }

    #[test]
    fn find_missing_id_is_not_found() {
        let registry = CardRegistry::new();
        let result = registry.find(&DashboardSnapshot::default(), "nope", Utc::now());
        assert_matches!(result, Err(CoreError::NotFound { entity: "card", key }) if key == "nope");
    }

    #[test]
    fn rendered_card_flattens_descriptor() {
        let mut registry = CardRegistry::new();
        registry.register(FixedProducer::new("x", &[50]));

        let rendered = registry.render(&DashboardSnapshot::default(), Utc::now());
        let json = serde_json::to_value(&rendered[0]).unwrap();
        assert_eq!(json["id"], "x-0");
        assert_eq!(json["type"], "x");
        assert_eq!(json["hotness"], "warm");
        assert_eq!(json["view"]["title"], "x-0");
    }
}
