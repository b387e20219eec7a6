//! # Participant Analytics Repository
//!
//! Writes per-participant derived metrics through an upsert keyed by the
//! unique `participant_id` column, and serves the dedup check the pipeline
//! runs before reprocessing a match.

use std::collections::HashMap;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::participant_analytics::{self, Column, Entity as ParticipantAnalytics};
use crate::models::raw_match;
use crate::repositories::RawMatchRepository;

pub struct ParticipantAnalyticsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ParticipantAnalyticsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// True when the match already has derived participant rows, i.e. the
    /// notification was processed before.
    pub async fn exists_for_match(&self, match_id: Uuid) -> Result<bool, RepositoryError> {
        let count = ParticipantAnalytics::find()
            .filter(Column::MatchId.eq(match_id))
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(count > 0)
    }

    /// Upsert the full derived row set for a match in one statement.
    ///
    /// Conflicts on `participant_id` replace every derived column, so
    /// recomputation always overwrites stale values.
    pub async fn upsert_many(
        &self,
        rows: Vec<participant_analytics::ActiveModel>,
    ) -> Result<(), RepositoryError> {
        if rows.is_empty() {
            return Ok(());
        }

        ParticipantAnalytics::insert_many(rows)
            .on_conflict(
                OnConflict::column(Column::ParticipantId)
                    .update_columns([
                        Column::MatchId,
                        Column::Puuid,
                        Column::GoldPerMinute,
                        Column::CsPerMinute,
                        Column::DamagePerMinute,
                        Column::LaningGoldExpAdvantage,
                        Column::MaxLevelLeadLaneOpponent,
                        Column::BaronTakedowns,
                        Column::DragonTakedowns,
                        Column::TowerTakedowns,
                        Column::ObjectiveParticipationPct,
                        Column::VisionScorePerMinute,
                        Column::ControlWardsPlaced,
                        Column::WardTakedowns,
                        Column::VisionAdvantageLaneOpponent,
                        Column::DeathsPerMinute,
                        Column::KillParticipationPct,
                        Column::SoloDeaths,
                        Column::EconomyScore,
                        Column::ObjectiveScore,
                        Column::MapControlScore,
                        Column::ErrorScore,
                        Column::OverallScore,
                        Column::ComputedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(())
    }

    /// All derived rows for a match.
    pub async fn find_by_match(
        &self,
        match_id: Uuid,
    ) -> Result<Vec<participant_analytics::Model>, RepositoryError> {
        ParticipantAnalytics::find()
            .filter(Column::MatchId.eq(match_id))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Derived rows for a set of raw participant ids (rolling window lookup).
    pub async fn find_by_participant_ids(
        &self,
        participant_ids: &[Uuid],
    ) -> Result<Vec<participant_analytics::Model>, RepositoryError> {
        if participant_ids.is_empty() {
            return Ok(Vec::new());
        }

        ParticipantAnalytics::find()
            .filter(Column::ParticipantId.is_in(participant_ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Read surface: a player's recent matches joined with their analytics
    /// rows, newest first, optionally restricted to the given queues.
    /// Matches that have not been scored yet are omitted.
    pub async fn list_recent_for_player(
        &self,
        puuid: &str,
        queue_ids: Option<&[i32]>,
        limit: u64,
    ) -> Result<Vec<(raw_match::Model, participant_analytics::Model)>, RepositoryError> {
        let matches = RawMatchRepository::new(self.db)
            .recent_matches_for_player(puuid, queue_ids, limit)
            .await?;

        let participant_ids: Vec<Uuid> = matches.iter().map(|(p, _)| p.id).collect();
        let mut by_participant: HashMap<Uuid, participant_analytics::Model> = self
            .find_by_participant_ids(&participant_ids)
            .await?
            .into_iter()
            .map(|row| (row.participant_id, row))
            .collect();

        Ok(matches
            .into_iter()
            .filter_map(|(participant, header)| {
                by_participant
                    .remove(&participant.id)
                    .map(|analytics| (header, analytics))
            })
            .collect())
    }
}
