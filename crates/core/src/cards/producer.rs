use crate::cards::registry::HelpSection;
use crate::cards::{CardDescriptor, CardView};
use crate::snapshot::DashboardSnapshot;
use crate::types::Timestamp;

/// A self-contained source of dashboard cards.
///
/// Producers are registered once at startup and consulted on every render
/// pass. A producer that emits one card per sub-entity (per band, per
/// contest) gives each a composite id so [`CardProducer::render`] can find
/// the entity again from the descriptor alone.
pub trait CardProducer: Send + Sync {
    /// Type tag stamped on every descriptor this producer emits.
    fn card_type(&self) -> &'static str;

    /// Cheap applicability test against the snapshot.
    fn can_render(&self, data: &DashboardSnapshot) -> bool;

    /// Zero or more descriptors. Empty means nothing to show this pass.
    fn create_config(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<CardDescriptor>;

    /// Content for a descriptor this producer emitted, or `None` if its
    /// source entity is no longer in `data`.
    fn render(
        &self,
        data: &DashboardSnapshot,
        config: &CardDescriptor,
        now: Timestamp,
    ) -> Option<CardView>;

    /// Help text describing this producer's cards.
    fn help(&self) -> Option<HelpSection> {
        None
    }
}
