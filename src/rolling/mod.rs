//! # Rolling Aggregator
//!
//! Recomputes trailing-window averages and trend classification for a
//! player. Windows are never maintained incrementally: every recomputation
//! rescans the player's most recent qualifying matches from the persisted
//! store, so out-of-order match arrival cannot corrupt results.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ConnectionTrait, Set};
use serde_json::json;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::RollingConfig;
use crate::error::RepositoryError;
use crate::models::rolling_analytics::{self, WILDCARD_ID, WILDCARD_POSITION};
use crate::models::{participant_analytics, raw_match, raw_participant};
use crate::repositories::{ParticipantAnalyticsRepository, RawMatchRepository, RollingAnalyticsRepository};

/// Per-factor trend over a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

/// One match's scores within a window, newest first in window order.
struct WindowEntry {
    match_id: Uuid,
    game_start: chrono::DateTime<chrono::FixedOffset>,
    win: bool,
    economy: Option<f64>,
    objectives: Option<f64>,
    map_control: Option<f64>,
    errors: Option<f64>,
    overall: Option<f64>,
}

/// Recomputes rolling windows for affected players.
pub struct RollingAggregator<'a, C: ConnectionTrait> {
    db: &'a C,
    config: RollingConfig,
}

impl<'a, C: ConnectionTrait> RollingAggregator<'a, C> {
    pub fn new(db: &'a C, config: RollingConfig) -> Self {
        Self { db, config }
    }

    /// Recompute every configured window for one player: the wildcard row
    /// plus one queue-filtered row per allow-listed ranked queue.
    #[instrument(skip(self), fields(puuid = %puuid))]
    pub async fn recompute_for_player(
        &self,
        puuid: &str,
        ranked_queue_ids: &[i32],
    ) -> Result<(), RepositoryError> {
        for &window_size in &self.config.window_sizes {
            self.recompute_window(puuid, window_size, None).await?;
            for &queue_id in ranked_queue_ids {
                self.recompute_window(puuid, window_size, Some(queue_id))
                    .await?;
            }
        }
        Ok(())
    }

    async fn recompute_window(
        &self,
        puuid: &str,
        window_size: i32,
        queue_filter: Option<i32>,
    ) -> Result<(), RepositoryError> {
        let entries = self
            .load_window(puuid, window_size, queue_filter)
            .await?;

        debug!(
            window_size,
            queue_filter,
            matches_included = entries.len(),
            "recomputed rolling window"
        );

        let row = self.build_row(puuid, window_size, queue_filter, &entries);
        RollingAnalyticsRepository::new(self.db).upsert(row).await
    }

    /// Load the player's most recent matches, newest first, capped at the
    /// window size. A match without a derived analytics row (not yet
    /// processed) still occupies its window slot but contributes nothing to
    /// the means.
    async fn load_window(
        &self,
        puuid: &str,
        window_size: i32,
        queue_filter: Option<i32>,
    ) -> Result<Vec<WindowEntry>, RepositoryError> {
        let queue_ids = queue_filter.map(|id| vec![id]);
        let matches = RawMatchRepository::new(self.db)
            .recent_matches_for_player(puuid, queue_ids.as_deref(), window_size as u64)
            .await?;

        let participant_ids: Vec<Uuid> = matches.iter().map(|(p, _)| p.id).collect();
        let analytics = ParticipantAnalyticsRepository::new(self.db)
            .find_by_participant_ids(&participant_ids)
            .await?;
        let by_participant: HashMap<Uuid, participant_analytics::Model> = analytics
            .into_iter()
            .map(|row| (row.participant_id, row))
            .collect();

        let entries = matches
            .into_iter()
            .filter_map(|(participant, header)| {
                window_entry(&participant, &header, &by_participant)
            })
            .collect();

        Ok(entries)
    }

    fn build_row(
        &self,
        puuid: &str,
        window_size: i32,
        queue_filter: Option<i32>,
        entries: &[WindowEntry],
    ) -> rolling_analytics::ActiveModel {
        let matches_included = entries.len() as i32;
        let wins = entries.iter().filter(|e| e.win).count();
        let win_rate_pct = if entries.is_empty() {
            0.0
        } else {
            wins as f64 / entries.len() as f64 * 100.0
        };

        let economy: Vec<Option<f64>> = entries.iter().map(|e| e.economy).collect();
        let objectives: Vec<Option<f64>> = entries.iter().map(|e| e.objectives).collect();
        let map_control: Vec<Option<f64>> = entries.iter().map(|e| e.map_control).collect();
        let errors: Vec<Option<f64>> = entries.iter().map(|e| e.errors).collect();
        let overall: Vec<Option<f64>> = entries.iter().map(|e| e.overall).collect();

        // Trends read the window oldest first so "newer half" means later games.
        let mut ascending: Vec<&WindowEntry> = entries.iter().collect();
        ascending.sort_by_key(|e| e.game_start);
        let threshold = self.config.trend_threshold;

        let match_ids: Vec<String> = entries.iter().map(|e| e.match_id.to_string()).collect();

        rolling_analytics::ActiveModel {
            id: Set(Uuid::new_v4()),
            puuid: Set(puuid.to_string()),
            window_size: Set(window_size),
            champion_filter: Set(WILDCARD_ID),
            queue_filter: Set(queue_filter.unwrap_or(WILDCARD_ID)),
            position_filter: Set(WILDCARD_POSITION.to_string()),
            matches_included: Set(matches_included),
            win_rate_pct: Set(win_rate_pct),
            avg_economy_score: Set(mean_of(&economy)),
            avg_objective_score: Set(mean_of(&objectives)),
            avg_map_control_score: Set(mean_of(&map_control)),
            avg_error_score: Set(mean_of(&errors)),
            avg_overall_score: Set(mean_of(&overall)),
            trend_economy: Set(trend_for(&ascending, |e| e.economy, threshold)
                .as_str()
                .to_string()),
            trend_objectives: Set(trend_for(&ascending, |e| e.objectives, threshold)
                .as_str()
                .to_string()),
            trend_map_control: Set(trend_for(&ascending, |e| e.map_control, threshold)
                .as_str()
                .to_string()),
            trend_errors: Set(trend_for(&ascending, |e| e.errors, threshold)
                .as_str()
                .to_string()),
            match_ids: Set(json!(match_ids)),
            computed_at: Set(Utc::now().into()),
        }
    }
}

fn window_entry(
    participant: &raw_participant::Model,
    header: &raw_match::Model,
    by_participant: &HashMap<Uuid, participant_analytics::Model>,
) -> Option<WindowEntry> {
    let analytics = by_participant.get(&participant.id)?;
    Some(WindowEntry {
        match_id: header.id,
        game_start: header.game_start,
        win: participant.win,
        economy: analytics.economy_score,
        objectives: analytics.objective_score,
        map_control: analytics.map_control_score,
        errors: analytics.error_score,
        overall: analytics.overall_score,
    })
}

/// Mean of the non-null values, or null when every value is null.
fn mean_of(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

fn trend_for<F>(ascending: &[&WindowEntry], score: F, threshold: f64) -> Trend
where
    F: Fn(&WindowEntry) -> Option<f64>,
{
    let values: Vec<Option<f64>> = ascending.iter().map(|e| score(e)).collect();
    classify_trend(&values, threshold)
}

/// Split the window into older/newer halves (the newer half takes the extra
/// match on odd sizes) and compare their means.
///
/// A delta strictly greater than the threshold is improving/declining; a
/// delta exactly at the threshold is stable. Windows too small to form two
/// halves of at least two matches are always stable.
pub fn classify_trend(ascending_scores: &[Option<f64>], threshold: f64) -> Trend {
    let split = ascending_scores.len() / 2;
    let (older, newer) = ascending_scores.split_at(split);
    if older.len() < 2 || newer.len() < 2 {
        return Trend::Stable;
    }

    let (older_mean, newer_mean) = match (mean_of(older), mean_of(newer)) {
        (Some(o), Some(n)) => (o, n),
        _ => return Trend::Stable,
    };

    let delta = newer_mean - older_mean;
    if delta > threshold {
        Trend::Improving
    } else if delta < -threshold {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
