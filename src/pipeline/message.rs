//! Notification message and per-item outcome types.
//!
//! The delivery layer is external and at-least-once; these types are the
//! contract between it and the processor. Outcomes are discriminated per
//! message and aggregated into a batch report so one failed message can be
//! redelivered without affecting its siblings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Match-ready notification, one per completed match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReadyMessage {
    /// Internal id of the stored match row.
    pub match_id: Uuid,
    /// Platform-scoped upstream identifier (e.g. `NA1_5167284034`).
    pub external_match_id: String,
    pub queue_id: i32,
    pub participant_count: i32,
    pub timestamp: DateTime<Utc>,
}

/// Why a message was skipped without computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Queue id is not on the ranked allow-list.
    NonRankedQueue,
    /// Analytics for the match already exist (duplicate delivery).
    AlreadyProcessed,
}

/// Terminal state of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Disposition {
    /// Acknowledged without work; reported as success to the delivery layer.
    Skipped { reason: SkipReason },
    /// Analytics computed and written. Rolling recomputation failures are
    /// per-player and do not fail the message.
    Completed { rolling_failures: usize },
    /// Processing failed; the delivery layer should redeliver.
    Failed { error: String },
}

/// Outcome of one message within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOutcome {
    pub match_id: Uuid,
    pub external_match_id: String,
    #[serde(flatten)]
    pub disposition: Disposition,
}

impl MessageOutcome {
    /// Skips and completions both acknowledge the message.
    pub fn is_success(&self) -> bool {
        !matches!(self.disposition, Disposition::Failed { .. })
    }
}

/// Aggregated per-item outcomes for one delivery batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub outcomes: Vec<MessageOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<MessageOutcome>) -> Self {
        Self { outcomes }
    }

    /// Match ids the delivery layer should redeliver.
    pub fn failed_ids(&self) -> Vec<Uuid> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.match_id)
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.disposition, Disposition::Completed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.disposition, Disposition::Skipped { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(disposition: Disposition) -> MessageOutcome {
        MessageOutcome {
            match_id: Uuid::new_v4(),
            external_match_id: "NA1_1".to_string(),
            disposition,
        }
    }

    #[test]
    fn test_message_deserializes_from_camel_case() {
        let raw = r#"{
            "matchId": "5d2f2c33-9f97-4a3c-9b5e-0d2b937ea292",
            "externalMatchId": "NA1_5167284034",
            "queueId": 420,
            "participantCount": 10,
            "timestamp": "2026-08-30T12:00:00Z"
        }"#;

        let msg: MatchReadyMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.external_match_id, "NA1_5167284034");
        assert_eq!(msg.queue_id, 420);
        assert_eq!(msg.participant_count, 10);
    }

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport::new(vec![
            outcome(Disposition::Completed { rolling_failures: 0 }),
            outcome(Disposition::Skipped {
                reason: SkipReason::NonRankedQueue,
            }),
            outcome(Disposition::Failed {
                error: "boom".to_string(),
            }),
        ]);

        assert_eq!(report.completed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_ids().len(), 1);
        assert_eq!(report.failed_ids()[0], report.outcomes[2].match_id);
    }

    #[test]
    fn test_skip_is_reported_as_success() {
        let skipped = outcome(Disposition::Skipped {
            reason: SkipReason::AlreadyProcessed,
        });
        assert!(skipped.is_success());

        let failed = outcome(Disposition::Failed {
            error: "store down".to_string(),
        });
        assert!(!failed.is_success());
    }
}
