//! # Rift Analytics Library
//!
//! Refinement stage of the match analytics pipeline: consumes match-ready
//! notifications and derives per-participant scores, match tempo markers,
//! and per-player rolling trend aggregates from the raw match store.

pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod queues;
pub mod repositories;
pub mod rolling;
pub mod scoring;
pub mod telemetry;
pub mod timeline;
pub use migration;
