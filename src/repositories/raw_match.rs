//! # Raw Match Repository
//!
//! Read-only access to the ingested match store: match headers, participant
//! records, timeline events, and the per-player match history queries the
//! rolling aggregator runs on.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::raw_match::{self, Entity as RawMatch};
use crate::models::raw_participant::{self, Entity as RawParticipant};
use crate::models::timeline_event::{self, Entity as TimelineEvent};

/// Repository for the raw match tables.
pub struct RawMatchRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RawMatchRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Look up a match header by its upstream identifier.
    pub async fn find_by_external_id(
        &self,
        external_match_id: &str,
    ) -> Result<Option<raw_match::Model>, RepositoryError> {
        RawMatch::find()
            .filter(raw_match::Column::ExternalMatchId.eq(external_match_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// All participant records for a match, ordered by in-match actor id.
    pub async fn participants_for_match(
        &self,
        match_id: Uuid,
    ) -> Result<Vec<raw_participant::Model>, RepositoryError> {
        RawParticipant::find()
            .filter(raw_participant::Column::MatchId.eq(match_id))
            .order_by_asc(raw_participant::Column::ParticipantIndex)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// All timeline events for a match in chronological order.
    pub async fn events_for_match(
        &self,
        match_id: Uuid,
    ) -> Result<Vec<timeline_event::Model>, RepositoryError> {
        TimelineEvent::find()
            .filter(timeline_event::Column::MatchId.eq(match_id))
            .order_by_asc(timeline_event::Column::EventTimestampMs)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// The player's most recent qualifying matches, newest first.
    ///
    /// Returns the participant record paired with its match header so callers
    /// can read both match outcome and match metadata without a second query.
    pub async fn recent_matches_for_player(
        &self,
        puuid: &str,
        queue_ids: Option<&[i32]>,
        limit: u64,
    ) -> Result<Vec<(raw_participant::Model, raw_match::Model)>, RepositoryError> {
        let mut query = RawParticipant::find()
            .find_also_related(RawMatch)
            .filter(raw_participant::Column::Puuid.eq(puuid));

        if let Some(ids) = queue_ids {
            query = query.filter(raw_match::Column::QueueId.is_in(ids.iter().copied()));
        }

        let rows = query
            .order_by_desc(raw_match::Column::GameStart)
            .limit(limit)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(participant, header)| header.map(|h| (participant, h)))
            .collect())
    }
}
