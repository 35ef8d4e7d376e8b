//! The badge catalog — the single source of truth for evaluable badges.
//!
//! The catalog is built once at process start and injected into the
//! engine; persisted badges rows are a mirror of it, refreshed by
//! `initialize`. Definitions are ordered by ascending id and the order
//! is stable for the life of the process.

use crate::{
    error::BadgeResult,
    models::{BadgeKind, BadgeRow},
    rules::{
        BadgeRule, EarlyAdopter, NeverQualifies, PlacementAnyOf, ProfileComplete, SocialLinks,
        VerifiedParticipations,
    },
    store::BadgeStore,
    types::BadgeId,
};

/// One catalog entry: static metadata plus the rule that decides it.
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub kind: BadgeKind,
    pub requirement: Option<i64>,
    pub rule: Box<dyn BadgeRule>,
}

impl BadgeDefinition {
    /// The persisted shape of this definition.
    pub fn as_row(&self) -> BadgeRow {
        BadgeRow {
            id: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            kind: self.kind,
            requirement: self.requirement,
        }
    }
}

pub struct BadgeCatalog {
    definitions: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    /// Build a catalog from explicit definitions, sorted by ascending id.
    /// Tests use this with small synthetic rulesets.
    pub fn new(mut definitions: Vec<BadgeDefinition>) -> Self {
        definitions.sort_by_key(|d| d.id);
        Self { definitions }
    }

    /// The fixed production ruleset. Ids and thresholds are stable across
    /// deployments; changing them is a catalog version change, not a
    /// runtime operation.
    pub fn standard() -> Self {
        Self::new(vec![
            BadgeDefinition {
                id: 1,
                name: "Profile Complete",
                description: "Filled out display name, bio and a profile picture",
                icon: "badge-profile-complete.svg",
                kind: BadgeKind::ProfileCompletion,
                requirement: None,
                rule: Box::new(ProfileComplete),
            },
            BadgeDefinition {
                id: 2,
                name: "Social Butterfly",
                description: "Linked at least 3 social media accounts",
                icon: "badge-social-butterfly.svg",
                kind: BadgeKind::ProfileCompletion,
                requirement: Some(3),
                rule: Box::new(SocialLinks { min: 3 }),
            },
            BadgeDefinition {
                id: 3,
                name: "First Steps",
                description: "First verified competition participation",
                icon: "badge-first-steps.svg",
                kind: BadgeKind::Participation,
                requirement: Some(1),
                rule: Box::new(VerifiedParticipations { min: 1 }),
            },
            BadgeDefinition {
                id: 4,
                name: "Rising Star",
                description: "5 verified competition participations",
                icon: "badge-rising-star.svg",
                kind: BadgeKind::Participation,
                requirement: Some(5),
                rule: Box::new(VerifiedParticipations { min: 5 }),
            },
            BadgeDefinition {
                id: 5,
                name: "Veteran Cosplayer",
                description: "10 verified competition participations",
                icon: "badge-veteran.svg",
                kind: BadgeKind::Participation,
                requirement: Some(10),
                rule: Box::new(VerifiedParticipations { min: 10 }),
            },
            BadgeDefinition {
                id: 6,
                name: "Competition Legend",
                description: "25 verified competition participations",
                icon: "badge-legend.svg",
                kind: BadgeKind::Participation,
                requirement: Some(25),
                rule: Box::new(VerifiedParticipations { min: 25 }),
            },
            BadgeDefinition {
                id: 7,
                name: "Champion",
                description: "Took first place in a competition",
                icon: "badge-champion.svg",
                kind: BadgeKind::CompetitionMilestone,
                requirement: None,
                rule: Box::new(PlacementAnyOf {
                    placements: &["first place"],
                }),
            },
            BadgeDefinition {
                id: 8,
                name: "Top Performer",
                description: "Placed in the top ranks of a competition",
                icon: "badge-top-performer.svg",
                kind: BadgeKind::CompetitionMilestone,
                requirement: None,
                rule: Box::new(PlacementAnyOf {
                    placements: &["champion", "first place", "second place"],
                }),
            },
            BadgeDefinition {
                id: 9,
                name: "Early Adopter",
                description: "One of the first 100 members of the community",
                icon: "badge-early-adopter.svg",
                kind: BadgeKind::SpecialAchievement,
                requirement: None,
                rule: Box::new(EarlyAdopter { cohort: 100 }),
            },
            BadgeDefinition {
                id: 10,
                name: "Community Builder",
                description: "Helped verify 5 community submissions",
                icon: "badge-community-builder.svg",
                kind: BadgeKind::SpecialAchievement,
                requirement: Some(5),
                // Verification assists are not implemented; the rule is a
                // deliberate dead rule, not a missing feature to fill in.
                rule: Box::new(NeverQualifies),
            },
        ])
    }

    /// Ordered iterator over all definitions.
    pub fn definitions(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Mirror every definition into the badges table, keyed by id.
    /// Idempotent; safe to run on every deployment. A storage failure is
    /// surfaced to the caller — no partial silent success — and the call
    /// may simply be retried.
    pub fn initialize(&self, store: &BadgeStore) -> BadgeResult<()> {
        for def in &self.definitions {
            store.upsert_badge(&def.as_row())?;
        }
        log::info!("badge catalog initialized ({} definitions)", self.len());
        Ok(())
    }
}
