//! Built-in card producers, one per entity family.

use crate::cards::producer::CardProducer;
use crate::cards::registry::{CardRegistry, HelpSection};
use crate::cards::{card_id, format_span, CardDescriptor, CardSize, CardView, DetailRow};
use crate::priority::PriorityInput;
use crate::scoring::activation::Activation;
use crate::scoring::band::BandCondition;
use crate::scoring::contest::Contest;
use crate::scoring::meteor::MeteorShower;
use crate::scoring::solar::SolarIndices;
use crate::scoring::Scored;
use crate::snapshot::DashboardSnapshot;
use crate::temporal::LifecycleState;
use crate::types::{Span, Timestamp};

pub const CARD_SOLAR: &str = "solar";
pub const CARD_BAND: &str = "band";
pub const CARD_CONTEST: &str = "contest";
pub const CARD_METEOR: &str = "meteor";
pub const CARD_ACTIVATION: &str = "activation";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Registry with every built-in producer and its help section.
pub fn default_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    register_with_help(&mut registry, SolarCardProducer);
    register_with_help(&mut registry, BandCardProducer);
    register_with_help(&mut registry, ContestCardProducer);
    register_with_help(&mut registry, MeteorCardProducer);
    register_with_help(&mut registry, ActivationCardProducer);
    registry
}

fn register_with_help<P: CardProducer + 'static>(registry: &mut CardRegistry, producer: P) {
    if let Some(help) = producer.help() {
        registry.register_help(help);
    }
    registry.register(producer);
}

fn help(id: &str, title: &str, body: &str) -> HelpSection {
    HelpSection {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// Badges shared by every time-bounded card.
fn lifecycle_badges<S: Scored>(entity: &S, now: Timestamp) -> Vec<String> {
    let mut badges = Vec::new();
    match entity.state(now) {
        LifecycleState::Active => badges.push("Live".to_string()),
        LifecycleState::Upcoming => badges.push("Upcoming".to_string()),
        LifecycleState::Ended => badges.push("Ended".to_string()),
    }
    if entity.favorable(now) {
        badges.push("Favorable".to_string());
    }
    if entity.ending_soon(now) {
        badges.push("Ending soon".to_string());
    }
    badges
}

fn view<S: Scored>(
    entity: &S,
    now: Timestamp,
    title: String,
    subtitle: Option<String>,
    headline: String,
    details: Vec<DetailRow>,
    badges: Vec<String>,
) -> CardView {
    let outcome = entity.outcome(now);
    CardView {
        title,
        subtitle,
        headline,
        state: outcome.state,
        score: outcome.score,
        favorable: outcome.favorable,
        ending_soon: entity.ending_soon(now),
        details,
        badges,
    }
}

// ---------------------------------------------------------------------------
// Solar
// ---------------------------------------------------------------------------

/// Single large card summarizing solar and geomagnetic indices.
pub struct SolarCardProducer;

impl CardProducer for SolarCardProducer {
    fn card_type(&self) -> &'static str {
        CARD_SOLAR
    }

    fn can_render(&self, data: &DashboardSnapshot) -> bool {
        data.solar.is_some()
    }

    fn create_config(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<CardDescriptor> {
        let Some(solar) = &data.solar else {
            return Vec::new();
        };
        let input = PriorityInput::from_scored(solar, now);
        vec![CardDescriptor::new(
            CARD_SOLAR.to_string(),
            CARD_SOLAR,
            CardSize::Large,
            &input,
            now,
        )]
    }

    fn render(
        &self,
        data: &DashboardSnapshot,
        _config: &CardDescriptor,
        now: Timestamp,
    ) -> Option<CardView> {
        let solar: &SolarIndices = data.solar.as_ref()?;
        let activity = solar.geomagnetic_activity();

        let mut badges = Vec::new();
        if solar.favorable(now) {
            badges.push("Favorable".to_string());
        }
        badges.push(activity.label().to_string());

        Some(view(
            solar,
            now,
            "Solar Conditions".to_string(),
            Some(solar.source.clone()),
            format!(
                "SFI {:.0} · K{} · A{}",
                solar.sfi, solar.k_index, solar.a_index
            ),
            vec![
                DetailRow::new("Solar flux", format!("{:.1}", solar.sfi)),
                DetailRow::new("Sunspot number", solar.sunspot_number.to_string()),
                DetailRow::new("K-index", solar.k_index.to_string()),
                DetailRow::new("A-index", solar.a_index.to_string()),
                DetailRow::new("Geomagnetic field", activity.label()),
                DetailRow::new("Observed", solar.observed_at.format(TIME_FORMAT).to_string()),
            ],
            badges,
        ))
    }

    fn help(&self) -> Option<HelpSection> {
        Some(help(
            CARD_SOLAR,
            "Solar conditions",
            "Combines the 10.7 cm solar flux (60%), K-index (30%) and A-index (10%) into one \
             score. Conditions are marked favorable when SFI is above 100, K is below 4 and A \
             is below 20.",
        ))
    }
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// One small card per band condition.
pub struct BandCardProducer;

impl BandCardProducer {
    fn id_for(cond: &BandCondition) -> String {
        card_id(CARD_BAND, cond.band().as_str())
    }
}

impl CardProducer for BandCardProducer {
    fn card_type(&self) -> &'static str {
        CARD_BAND
    }

    fn can_render(&self, data: &DashboardSnapshot) -> bool {
        !data.bands.is_empty()
    }

    fn create_config(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<CardDescriptor> {
        data.bands
            .iter()
            .map(|cond| {
                let mut input = PriorityInput::from_scored(cond, now);
                input.last_updated = data.fetched_at;
                CardDescriptor::new(Self::id_for(cond), CARD_BAND, CardSize::Small, &input, now)
            })
            .collect()
    }

    fn render(
        &self,
        data: &DashboardSnapshot,
        config: &CardDescriptor,
        now: Timestamp,
    ) -> Option<CardView> {
        let cond = data.bands.iter().find(|c| Self::id_for(c) == config.id)?;
        let rating = cond.rating().map(|r| r.as_str()).unwrap_or("unknown");

        let mut details = vec![DetailRow::new(
            "Confidence",
            format!("{:.0}%", cond.confidence() * 100.0),
        )];
        if let Some(notes) = cond.notes() {
            details.push(DetailRow::new("Notes", notes));
        }

        let mut badges = Vec::new();
        if cond.favorable(now) {
            badges.push("Favorable".to_string());
        }
        if cond.band().is_hf() {
            badges.push("HF".to_string());
        }

        Some(view(
            cond,
            now,
            cond.band().as_str().to_string(),
            None,
            rating.to_uppercase(),
            details,
            badges,
        ))
    }

    fn help(&self) -> Option<HelpSection> {
        Some(help(
            CARD_BAND,
            "Band conditions",
            "Each band is rated good, fair or poor, weighted by the confidence of the \
             forecast. A band is favorable when rated good with more than 50% confidence.",
        ))
    }
}

// ---------------------------------------------------------------------------
// Contests
// ---------------------------------------------------------------------------

/// One card per contest that has not ended.
pub struct ContestCardProducer;

impl ContestCardProducer {
    pub(crate) fn id_for(contest: &Contest) -> String {
        let key = format!("{} {}", contest.name, contest.start.format("%Y%m%d%H%M"));
        card_id(CARD_CONTEST, &key)
    }

    fn live(data: &DashboardSnapshot, now: Timestamp) -> impl Iterator<Item = &Contest> {
        data.contests
            .iter()
            .filter(move |c| c.state(now) != LifecycleState::Ended)
    }
}

impl CardProducer for ContestCardProducer {
    fn card_type(&self) -> &'static str {
        CARD_CONTEST
    }

    fn can_render(&self, data: &DashboardSnapshot) -> bool {
        !data.contests.is_empty()
    }

    fn create_config(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<CardDescriptor> {
        Self::live(data, now)
            .map(|contest| {
                let input = PriorityInput::from_scored(contest, now);
                CardDescriptor::new(
                    Self::id_for(contest),
                    CARD_CONTEST,
                    CardSize::Medium,
                    &input,
                    now,
                )
            })
            .collect()
    }

    fn render(
        &self,
        data: &DashboardSnapshot,
        config: &CardDescriptor,
        now: Timestamp,
    ) -> Option<CardView> {
        let contest = data.contests.iter().find(|c| Self::id_for(c) == config.id)?;

        let headline = match contest.state(now) {
            LifecycleState::Active => {
                format!("On now, ends in {}", format_span(contest.time_remaining(now)))
            }
            LifecycleState::Upcoming => {
                format!("Starts in {}", format_span(contest.window().until_start(now)))
            }
            LifecycleState::Ended => "Ended".to_string(),
        };

        let mut details = vec![
            DetailRow::new("Start", contest.start.format(TIME_FORMAT).to_string()),
            DetailRow::new("End", contest.end.format(TIME_FORMAT).to_string()),
        ];
        if !contest.bands.is_empty() {
            let bands: Vec<_> = contest.bands.iter().map(|b| b.as_str()).collect();
            details.push(DetailRow::new("Bands", bands.join(", ")));
        }
        if !contest.modes.is_empty() {
            let modes: Vec<_> = contest.modes.iter().map(String::as_str).collect();
            details.push(DetailRow::new("Modes", modes.join(", ")));
        }
        if let Some(url) = contest.urls.first() {
            details.push(DetailRow::new("Rules", url.as_str()));
        }

        Some(view(
            contest,
            now,
            contest.name.clone(),
            contest.sponsor.clone(),
            headline,
            details,
            lifecycle_badges(contest, now),
        ))
    }

    fn help(&self) -> Option<HelpSection> {
        Some(help(
            CARD_CONTEST,
            "Contests",
            "Running contests score highest. Upcoming contests gain score as the start \
             approaches and become favorable within six hours of the start.",
        ))
    }
}

// ---------------------------------------------------------------------------
// Meteor showers
// ---------------------------------------------------------------------------

/// One card per meteor shower that is upcoming or visible.
pub struct MeteorCardProducer;

impl MeteorCardProducer {
    pub(crate) fn id_for(shower: &MeteorShower) -> String {
        let key = format!("{} {}", shower.code, shower.peak.start.format("%Y"));
        card_id(CARD_METEOR, &key)
    }
}

impl CardProducer for MeteorCardProducer {
    fn card_type(&self) -> &'static str {
        CARD_METEOR
    }

    fn can_render(&self, data: &DashboardSnapshot) -> bool {
        !data.meteor_showers.is_empty()
    }

    fn create_config(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<CardDescriptor> {
        data.meteor_showers
            .iter()
            .filter(|s| s.state(now) != LifecycleState::Ended)
            .map(|shower| {
                let input = PriorityInput::from_scored(shower, now);
                CardDescriptor::new(
                    Self::id_for(shower),
                    CARD_METEOR,
                    CardSize::Medium,
                    &input,
                    now,
                )
            })
            .collect()
    }

    fn render(
        &self,
        data: &DashboardSnapshot,
        config: &CardDescriptor,
        now: Timestamp,
    ) -> Option<CardView> {
        let shower = data
            .meteor_showers
            .iter()
            .find(|s| Self::id_for(s) == config.id)?;

        let headline = if shower.at_peak(now) {
            format!("At peak, ZHR ~{}", shower.current_zhr(now))
        } else {
            match shower.state(now) {
                LifecycleState::Active => {
                    let to_peak = shower.time_to_peak(now);
                    if to_peak > Span::zero() {
                        format!(
                            "ZHR ~{}, peak in {}",
                            shower.current_zhr(now),
                            format_span(to_peak)
                        )
                    } else {
                        format!("ZHR ~{}, past peak", shower.current_zhr(now))
                    }
                }
                LifecycleState::Upcoming => format!(
                    "Visible in {}",
                    format_span(shower.visibility.until_start(now))
                ),
                LifecycleState::Ended => "Ended".to_string(),
            }
        };

        let mut details = vec![
            DetailRow::new("Peak ZHR", shower.peak_zhr.to_string()),
            DetailRow::new(
                "Peak",
                format!(
                    "{} to {}",
                    shower.peak.start.format(TIME_FORMAT),
                    shower.peak.end.format(TIME_FORMAT)
                ),
            ),
            DetailRow::new(
                "Visible",
                format!(
                    "{} to {}",
                    shower.visibility.start.format("%Y-%m-%d"),
                    shower.visibility.end.format("%Y-%m-%d")
                ),
            ),
        ];
        if let Some(parent) = &shower.parent_body {
            details.push(DetailRow::new("Parent body", parent.as_str()));
        }

        let mut badges = lifecycle_badges(shower, now);
        if shower.at_peak(now) {
            badges.push("At peak".to_string());
        }

        Some(view(
            shower,
            now,
            shower.name.clone(),
            Some(shower.code.clone()),
            headline,
            details,
            badges,
        ))
    }

    fn help(&self) -> Option<HelpSection> {
        Some(help(
            CARD_METEOR,
            "Meteor showers",
            "Meteor scatter activity is modeled from the shower's peak rate, falling off \
             with distance from the peak. Showers are favorable at peak and in the twelve \
             hours leading up to it.",
        ))
    }
}

// ---------------------------------------------------------------------------
// Activations
// ---------------------------------------------------------------------------

/// One small card per activation that is on the air or scheduled.
pub struct ActivationCardProducer;

impl ActivationCardProducer {
    pub(crate) fn id_for(activation: &Activation) -> String {
        let key = format!(
            "{} {} {}",
            activation.callsign,
            activation.reference,
            activation.start.timestamp()
        );
        card_id(CARD_ACTIVATION, &key)
    }
}

impl CardProducer for ActivationCardProducer {
    fn card_type(&self) -> &'static str {
        CARD_ACTIVATION
    }

    fn can_render(&self, data: &DashboardSnapshot) -> bool {
        !data.activations.is_empty()
    }

    fn create_config(&self, data: &DashboardSnapshot, now: Timestamp) -> Vec<CardDescriptor> {
        data.activations
            .iter()
            .filter(|a| a.state(now) != LifecycleState::Ended)
            .map(|activation| {
                let input = PriorityInput::from_scored(activation, now);
                CardDescriptor::new(
                    Self::id_for(activation),
                    CARD_ACTIVATION,
                    CardSize::Small,
                    &input,
                    now,
                )
            })
            .collect()
    }

    fn render(
        &self,
        data: &DashboardSnapshot,
        config: &CardDescriptor,
        now: Timestamp,
    ) -> Option<CardView> {
        let activation = data
            .activations
            .iter()
            .find(|a| Self::id_for(a) == config.id)?;

        let mut details = vec![
            DetailRow::new("Program", activation.program.label()),
            DetailRow::new("Spots", activation.spot_count.to_string()),
        ];
        if let Some(name) = &activation.reference_name {
            details.insert(1, DetailRow::new("Location", name.as_str()));
        }
        if let Some(band) = activation.band() {
            details.push(DetailRow::new("Band", band.as_str()));
        }
        if let Some(spot) = activation.last_spot {
            details.push(DetailRow::new(
                "Last spot",
                format!("{} ago", format_span(now - spot)),
            ));
        }

        Some(view(
            activation,
            now,
            format!("{} @ {}", activation.callsign, activation.reference),
            activation.reference_name.clone(),
            format!("{:.1} kHz {}", activation.frequency_khz, activation.mode),
            details,
            lifecycle_badges(activation, now),
        ))
    }

    fn help(&self) -> Option<HelpSection> {
        Some(help(
            CARD_ACTIVATION,
            "Portable activations",
            "Stations operating from parks, summits and islands. On-air activations score \
             higher the more recently they were spotted; a spot in the last fifteen minutes \
             marks one favorable.",
        ))
    }
}
