//! Raw participant record entity.
//!
//! One row per player per match, including the open-ended challenge metrics
//! map stored as JSON. Immutable once ingested.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "match_participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub match_id: Uuid,

    /// In-match actor id (1..=10) used by timeline events.
    pub participant_index: i32,

    /// Stable cross-match player identifier.
    pub puuid: String,

    pub champion_id: i32,
    pub champion_name: String,

    /// 100 (blue) or 200 (red).
    pub team_id: i32,

    pub team_position: String,

    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i32,
    pub total_cs: i32,
    pub damage_to_champions: i32,
    pub vision_score: i32,
    pub win: bool,

    /// Open-ended heuristic metrics map from the upstream API (100+ keys,
    /// any of which may be absent).
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub challenges: Option<JsonValue>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::raw_match::Entity",
        from = "Column::MatchId",
        to = "super::raw_match::Column::Id"
    )]
    Match,
}

impl Related<super::raw_match::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
