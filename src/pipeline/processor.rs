//! # Match Processor
//!
//! Consumes match-ready notifications and drives the refinement flow:
//! category filter, dedup guard, score engine + timeline extractor,
//! idempotent writes, then rolling recomputation for every affected player.
//!
//! Messages in a batch are processed independently under a concurrency
//! limit; one failure never blocks siblings. All writes are upserts keyed by
//! natural unique keys, so redelivery and concurrent reprocessing are safe
//! without any in-memory locking.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use metrics::{counter, histogram};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use tokio::sync::Semaphore;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ProcessingError;
use crate::models::raw_participant::Model as Participant;
use crate::models::{match_timeline_analytics, participant_analytics};
use crate::pipeline::message::{
    BatchReport, Disposition, MatchReadyMessage, MessageOutcome, SkipReason,
};
use crate::queues::QueueFilter;
use crate::repositories::{
    MatchTimelineRepository, ParticipantAnalyticsRepository, RawMatchRepository,
};
use crate::rolling::RollingAggregator;
use crate::scoring::{MatchContext, ObjectiveCounts, ScoreEngine};
use crate::timeline::{self, FirstOccurrence, TimelineSummary};

/// Message-driven refinement processor.
#[derive(Clone)]
pub struct MatchProcessor {
    db: Arc<DatabaseConnection>,
    config: Arc<AppConfig>,
    engine: ScoreEngine,
    queue_filter: QueueFilter,
}

impl MatchProcessor {
    pub fn new(db: Arc<DatabaseConnection>, config: Arc<AppConfig>) -> Self {
        let queue_filter = QueueFilter::new(config.ranked_queue_ids.clone());
        Self {
            db,
            config,
            engine: ScoreEngine::default(),
            queue_filter,
        }
    }

    /// Process one delivery batch under the configured concurrency limit.
    ///
    /// Outcomes are returned in message order regardless of completion
    /// order.
    #[instrument(skip_all, fields(batch_size = messages.len()))]
    pub async fn process_batch(&self, messages: Vec<MatchReadyMessage>) -> BatchReport {
        let semaphore = Arc::new(Semaphore::new(self.config.pipeline.concurrency));
        let timer = std::time::Instant::now();

        let mut handles = Vec::with_capacity(messages.len());
        for message in messages {
            let processor = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let match_id = message.match_id;
            let external_match_id = message.external_match_id.clone();

            let handle = tokio::spawn(async move {
                // The semaphore is never closed, so acquisition cannot fail.
                let _permit = semaphore.acquire_owned().await.ok();
                processor.process_message(&message).await
            });
            handles.push((match_id, external_match_id, handle));
        }

        // Every message gets an outcome even if its task panicked, so the
        // delivery layer can still redeliver it.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (match_id, external_match_id, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    error!(error = %err, external_match_id = %external_match_id, "processing task panicked");
                    counter!("match_messages_failed_total").increment(1);
                    outcomes.push(MessageOutcome {
                        match_id,
                        external_match_id,
                        disposition: Disposition::Failed {
                            error: format!("processing task panicked: {err}"),
                        },
                    });
                }
            }
        }

        let report = BatchReport::new(outcomes);
        histogram!("match_batch_duration_ms").record(timer.elapsed().as_secs_f64() * 1_000.0);
        info!(
            completed = report.completed_count(),
            skipped = report.skipped_count(),
            failed = report.failed_ids().len(),
            "batch processed"
        );
        report
    }

    /// Run one message through the category filter, dedup guard, and
    /// refinement flow, returning its terminal disposition.
    #[instrument(skip(self), fields(external_match_id = %message.external_match_id, queue_id = message.queue_id))]
    pub async fn process_message(&self, message: &MatchReadyMessage) -> MessageOutcome {
        let timer = std::time::Instant::now();
        let disposition = self.dispose(message).await;
        histogram!("match_processing_duration_ms").record(timer.elapsed().as_secs_f64() * 1_000.0);

        match &disposition {
            Disposition::Skipped { reason } => {
                counter!("match_messages_skipped_total").increment(1);
                info!(?reason, "message skipped");
            }
            Disposition::Completed { rolling_failures } => {
                counter!("match_messages_completed_total").increment(1);
                info!(rolling_failures, "match analytics computed");
            }
            Disposition::Failed { error } => {
                counter!("match_messages_failed_total").increment(1);
                error!(error = %error, "message processing failed");
            }
        }

        MessageOutcome {
            match_id: message.match_id,
            external_match_id: message.external_match_id.clone(),
            disposition,
        }
    }

    async fn dispose(&self, message: &MatchReadyMessage) -> Disposition {
        if !self.queue_filter.is_ranked(message.queue_id) {
            return Disposition::Skipped {
                reason: SkipReason::NonRankedQueue,
            };
        }

        let already_processed = ParticipantAnalyticsRepository::new(self.db.as_ref())
            .exists_for_match(message.match_id)
            .await
            .map_err(ProcessingError::from);
        match already_processed {
            Ok(true) => {
                return Disposition::Skipped {
                    reason: SkipReason::AlreadyProcessed,
                };
            }
            Ok(false) => {}
            Err(err) => {
                return Disposition::Failed {
                    error: err.to_string(),
                };
            }
        }

        match self.refine_match(message).await {
            Ok(affected_players) => {
                let rolling_failures = self.recompute_rolling(&affected_players).await;
                Disposition::Completed { rolling_failures }
            }
            Err(err) => Disposition::Failed {
                error: err.to_string(),
            },
        }
    }

    /// Compute and persist the derived rows for one match. Returns the
    /// affected player ids for rolling recomputation.
    async fn refine_match(
        &self,
        message: &MatchReadyMessage,
    ) -> Result<Vec<String>, ProcessingError> {
        let raw_repo = RawMatchRepository::new(self.db.as_ref());

        let header = raw_repo
            .find_by_external_id(&message.external_match_id)
            .await?
            .ok_or_else(|| {
                ProcessingError::Validation(format!(
                    "no raw match stored for {}",
                    message.external_match_id
                ))
            })?;

        let participants = raw_repo.participants_for_match(header.id).await?;
        if participants.is_empty() {
            return Err(ProcessingError::Validation(format!(
                "match {} has no participant records",
                message.external_match_id
            )));
        }

        let events = raw_repo.events_for_match(header.id).await?;
        let team_by_actor = timeline::team_lookup(&participants);
        let breakdown = timeline::objective_breakdown(&events, &team_by_actor);
        let summary = timeline::summarize(&events, &team_by_actor);

        let mut team_kills: HashMap<i32, i32> = HashMap::new();
        for participant in &participants {
            *team_kills.entry(participant.team_id).or_default() += participant.kills;
        }

        let computed_at = Utc::now().into();
        let mut rows = Vec::with_capacity(participants.len());
        for participant in &participants {
            let tally = breakdown
                .by_actor
                .get(&participant.participant_index)
                .copied()
                .unwrap_or_default();
            let counts = ObjectiveCounts {
                baron: tally.baron,
                dragon: tally.dragon,
                tower: tally.tower,
                team_total: breakdown
                    .by_team
                    .get(&participant.team_id)
                    .copied()
                    .unwrap_or(0),
            };
            let ctx = MatchContext {
                duration_seconds: header.duration_seconds,
                team_kills: team_kills.get(&participant.team_id).copied().unwrap_or(0),
            };

            let card = self.engine.score_participant(participant, &ctx, &counts)?;
            rows.push(analytics_row(participant, &card, computed_at));
        }

        let timeline_row = timeline_row(header.id, &summary, computed_at)?;

        // Both derived tables commit together so a dedup check never sees a
        // half-written match.
        let txn = self.db.begin().await?;
        ParticipantAnalyticsRepository::new(&txn)
            .upsert_many(rows)
            .await?;
        MatchTimelineRepository::new(&txn).upsert(timeline_row).await?;
        txn.commit().await?;

        let mut affected: Vec<String> = participants.into_iter().map(|p| p.puuid).collect();
        affected.sort();
        affected.dedup();
        Ok(affected)
    }

    /// Recompute rolling windows for each affected player. Per-player
    /// failures are logged and counted but never fail the parent message.
    async fn recompute_rolling(&self, puuids: &[String]) -> usize {
        let aggregator = RollingAggregator::new(self.db.as_ref(), self.config.rolling.clone());
        let mut failures = 0;

        for puuid in puuids {
            if let Err(err) = aggregator
                .recompute_for_player(puuid, &self.config.ranked_queue_ids)
                .await
            {
                counter!("rolling_recompute_failures_total").increment(1);
                warn!(puuid = %puuid, error = %err, "rolling recomputation failed for player");
                failures += 1;
            }
        }

        failures
    }
}

fn analytics_row(
    participant: &Participant,
    card: &crate::scoring::ParticipantScorecard,
    computed_at: sea_orm::prelude::DateTimeWithTimeZone,
) -> participant_analytics::ActiveModel {
    participant_analytics::ActiveModel {
        id: Set(Uuid::new_v4()),
        participant_id: Set(participant.id),
        match_id: Set(participant.match_id),
        puuid: Set(participant.puuid.clone()),
        gold_per_minute: Set(card.gold_per_minute),
        cs_per_minute: Set(card.cs_per_minute),
        damage_per_minute: Set(card.damage_per_minute),
        laning_gold_exp_advantage: Set(card.laning_gold_exp_advantage),
        max_level_lead_lane_opponent: Set(card.max_level_lead_lane_opponent),
        baron_takedowns: Set(card.baron_takedowns),
        dragon_takedowns: Set(card.dragon_takedowns),
        tower_takedowns: Set(card.tower_takedowns),
        objective_participation_pct: Set(card.objective_participation_pct),
        vision_score_per_minute: Set(card.vision_score_per_minute),
        control_wards_placed: Set(card.control_wards_placed),
        ward_takedowns: Set(card.ward_takedowns),
        vision_advantage_lane_opponent: Set(card.vision_advantage_lane_opponent),
        deaths_per_minute: Set(card.deaths_per_minute),
        kill_participation_pct: Set(card.kill_participation_pct),
        solo_deaths: Set(card.solo_deaths),
        economy_score: Set(card.scores.economy),
        objective_score: Set(card.scores.objectives),
        map_control_score: Set(card.scores.map_control),
        error_score: Set(card.scores.errors),
        overall_score: Set(card.scores.overall),
        computed_at: Set(computed_at),
    }
}

fn timeline_row(
    match_id: Uuid,
    summary: &TimelineSummary,
    computed_at: sea_orm::prelude::DateTimeWithTimeZone,
) -> Result<match_timeline_analytics::ActiveModel, ProcessingError> {
    let objective_events = serde_json::to_value(&summary.objective_events).map_err(|err| {
        ProcessingError::Validation(format!("failed to encode objective events: {err}"))
    })?;

    let (first_blood_ms, first_blood_team_id) = split_occurrence(summary.first_blood);
    let (first_tower_ms, first_tower_team_id) = split_occurrence(summary.first_tower);
    let (first_dragon_ms, first_dragon_team_id) = split_occurrence(summary.first_dragon);
    let (first_baron_ms, first_baron_team_id) = split_occurrence(summary.first_baron);

    Ok(match_timeline_analytics::ActiveModel {
        id: Set(Uuid::new_v4()),
        match_id: Set(match_id),
        first_blood_ms: Set(first_blood_ms),
        first_blood_team_id: Set(first_blood_team_id),
        first_tower_ms: Set(first_tower_ms),
        first_tower_team_id: Set(first_tower_team_id),
        first_dragon_ms: Set(first_dragon_ms),
        first_dragon_team_id: Set(first_dragon_team_id),
        first_baron_ms: Set(first_baron_ms),
        first_baron_team_id: Set(first_baron_team_id),
        objective_events: Set(objective_events),
        computed_at: Set(computed_at),
    })
}

fn split_occurrence(occurrence: Option<FirstOccurrence>) -> (Option<i64>, Option<i32>) {
    match occurrence {
        Some(first) => (Some(first.timestamp_ms), first.team_id),
        None => (None, None),
    }
}
