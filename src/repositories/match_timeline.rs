//! # Match Timeline Repository
//!
//! One derived row per match; upsert keyed by the unique `match_id` column.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::match_timeline_analytics::{self, Column, Entity as MatchTimelineAnalytics};

pub struct MatchTimelineRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MatchTimelineRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Upsert the match-level tempo markers, replacing every derived column
    /// on conflict.
    pub async fn upsert(
        &self,
        row: match_timeline_analytics::ActiveModel,
    ) -> Result<(), RepositoryError> {
        MatchTimelineAnalytics::insert(row)
            .on_conflict(
                OnConflict::column(Column::MatchId)
                    .update_columns([
                        Column::FirstBloodMs,
                        Column::FirstBloodTeamId,
                        Column::FirstTowerMs,
                        Column::FirstTowerTeamId,
                        Column::FirstDragonMs,
                        Column::FirstDragonTeamId,
                        Column::FirstBaronMs,
                        Column::FirstBaronTeamId,
                        Column::ObjectiveEvents,
                        Column::ComputedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(())
    }

    pub async fn find_by_match(
        &self,
        match_id: Uuid,
    ) -> Result<Option<match_timeline_analytics::Model>, RepositoryError> {
        MatchTimelineAnalytics::find()
            .filter(Column::MatchId.eq(match_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
