//! Derived match-level tempo markers entity.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_timeline_analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Unique key: one row per match.
    pub match_id: Uuid,

    pub first_blood_ms: Option<i64>,
    pub first_blood_team_id: Option<i32>,
    pub first_tower_ms: Option<i64>,
    pub first_tower_team_id: Option<i32>,
    pub first_dragon_ms: Option<i64>,
    pub first_dragon_team_id: Option<i32>,
    pub first_baron_ms: Option<i64>,
    pub first_baron_team_id: Option<i32>,

    /// Free-form ordered list of objective events (type, timestamp, team).
    #[sea_orm(column_type = "JsonBinary")]
    pub objective_events: JsonValue,

    pub computed_at: DateTimeWithTimeZone,
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
