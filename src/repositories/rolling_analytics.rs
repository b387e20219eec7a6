//! # Rolling Analytics Repository
//!
//! Upserts rolling-window rows keyed by the five-part composite key
//! (puuid, window size, champion filter, queue filter, position filter).
//! Wildcard filters are stored as sentinels, so the composite unique index
//! replaces rather than duplicates on recomputation.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::error::RepositoryError;
use crate::models::rolling_analytics::{self, Column, Entity as RollingAnalytics};

pub struct RollingAnalyticsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RollingAnalyticsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Upsert one rolling-window row, replacing every derived column on a
    /// key conflict.
    pub async fn upsert(
        &self,
        row: rolling_analytics::ActiveModel,
    ) -> Result<(), RepositoryError> {
        RollingAnalytics::insert(row)
            .on_conflict(
                OnConflict::columns([
                    Column::Puuid,
                    Column::WindowSize,
                    Column::ChampionFilter,
                    Column::QueueFilter,
                    Column::PositionFilter,
                ])
                .update_columns([
                    Column::MatchesIncluded,
                    Column::WinRatePct,
                    Column::AvgEconomyScore,
                    Column::AvgObjectiveScore,
                    Column::AvgMapControlScore,
                    Column::AvgErrorScore,
                    Column::AvgOverallScore,
                    Column::TrendEconomy,
                    Column::TrendObjectives,
                    Column::TrendMapControl,
                    Column::TrendErrors,
                    Column::MatchIds,
                    Column::ComputedAt,
                ])
                .to_owned(),
            )
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(())
    }

    /// Fetch one rolling-window row by its composite key.
    pub async fn find_window(
        &self,
        puuid: &str,
        window_size: i32,
        champion_filter: i32,
        queue_filter: i32,
        position_filter: &str,
    ) -> Result<Option<rolling_analytics::Model>, RepositoryError> {
        RollingAnalytics::find()
            .filter(Column::Puuid.eq(puuid))
            .filter(Column::WindowSize.eq(window_size))
            .filter(Column::ChampionFilter.eq(champion_filter))
            .filter(Column::QueueFilter.eq(queue_filter))
            .filter(Column::PositionFilter.eq(position_filter))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// All rolling rows for a player (test and inspection surface).
    pub async fn find_for_player(
        &self,
        puuid: &str,
    ) -> Result<Vec<rolling_analytics::Model>, RepositoryError> {
        RollingAnalytics::find()
            .filter(Column::Puuid.eq(puuid))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
