//! # Pipeline
//!
//! The message-driven refinement trigger: notification contract, per-item
//! outcome reporting, and the batch processor.

pub mod message;
pub mod processor;

pub use message::{BatchReport, Disposition, MatchReadyMessage, MessageOutcome, SkipReason};
pub use processor::MatchProcessor;
