//! # Scoring
//!
//! The four-factor scoring model: challenge-metric access, metric
//! normalization bands, and the score engine itself.

pub mod challenges;
pub mod engine;
pub mod normalize;

pub use challenges::ChallengeMetrics;
pub use engine::{MatchContext, ObjectiveCounts, ParticipantScorecard, ScoreEngine};
