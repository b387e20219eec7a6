//! # Repositories
//!
//! Data access layer. Raw tables are read-only here; the derived analytics
//! tables are written exclusively through idempotent upserts keyed by their
//! natural unique keys.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same
//! code runs against the pool or inside a transaction.

pub mod match_timeline;
pub mod participant_analytics;
pub mod raw_match;
pub mod rolling_analytics;

pub use match_timeline::MatchTimelineRepository;
pub use participant_analytics::ParticipantAnalyticsRepository;
pub use raw_match::RawMatchRepository;
pub use rolling_analytics::RollingAnalyticsRepository;
