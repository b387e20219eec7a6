//! Raw match header entity.
//!
//! Written verbatim by the upstream ingestion stage; immutable once stored.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Platform-scoped match identifier from the upstream game API
    /// (e.g. `NA1_5167284034`).
    pub external_match_id: String,

    /// Queue category; only allow-listed ranked queues are scored.
    pub queue_id: i32,

    pub game_start: DateTimeWithTimeZone,

    pub duration_seconds: i32,

    pub game_version: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::raw_participant::Entity")]
    Participants,
    #[sea_orm(has_many = "super::timeline_event::Entity")]
    TimelineEvents,
}

impl Related<super::raw_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::timeline_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimelineEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
