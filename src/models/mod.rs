//! # Data Models
//!
//! SeaORM entities for the raw match store (read-only here) and the three
//! derived analytics tables, plus the shared scoring value types.

use serde::{Deserialize, Serialize};

pub mod match_timeline_analytics;
pub mod participant_analytics;
pub mod raw_match;
pub mod raw_participant;
pub mod rolling_analytics;
pub mod timeline_event;

pub use match_timeline_analytics::Entity as MatchTimelineAnalytics;
pub use participant_analytics::Entity as ParticipantAnalytics;
pub use raw_match::Entity as RawMatch;
pub use raw_participant::Entity as RawParticipant;
pub use rolling_analytics::Entity as RollingAnalytics;
pub use timeline_event::Entity as TimelineEvent;

/// Fixed weights for combining the four factor scores into the overall score.
///
/// Categories whose score is null are excluded and the remaining weights are
/// renormalized to sum to 1 before averaging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub economy: f64,
    pub objectives: f64,
    pub map_control: f64,
    pub errors: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            economy: 0.30,
            objectives: 0.25,
            map_control: 0.20,
            errors: 0.25,
        }
    }
}

/// The four composite factor scores plus the weighted overall, all in
/// [0, 100] when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub economy: Option<f64>,
    pub objectives: Option<f64>,
    pub map_control: Option<f64>,
    pub errors: Option<f64>,
    pub overall: Option<f64>,
}
