//! Raw timeline event entity.
//!
//! Typed events flattened out of the upstream timeline frames. Only the
//! columns the extractor and scorer need are materialized; participant
//! references use the in-match actor id (1..=10).

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Event type discriminators as emitted by the upstream timeline.
pub const CHAMPION_KILL: &str = "CHAMPION_KILL";
pub const BUILDING_KILL: &str = "BUILDING_KILL";
pub const ELITE_MONSTER_KILL: &str = "ELITE_MONSTER_KILL";

/// Monster/building subtype values referenced by the extractor.
pub const MONSTER_DRAGON: &str = "DRAGON";
pub const MONSTER_BARON: &str = "BARON_NASHOR";
pub const BUILDING_TOWER: &str = "TOWER_BUILDING";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timeline_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub match_id: Uuid,

    pub event_type: String,

    /// Milliseconds since match start.
    pub event_timestamp_ms: i64,

    pub killer_participant_id: Option<i32>,
    pub victim_participant_id: Option<i32>,

    /// For building kills this is the team that owned the destroyed
    /// structure, not the killer's team.
    pub team_id: Option<i32>,

    pub monster_type: Option<String>,
    pub building_type: Option<String>,

    /// JSON array of assisting actor ids.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub assisting_participant_ids: Option<JsonValue>,
}

impl Model {
    /// Actor ids credited with the takedown: the killer plus any assisters.
    pub fn takedown_participants(&self) -> Vec<i32> {
        let mut ids = Vec::new();
        if let Some(killer) = self.killer_participant_id {
            ids.push(killer);
        }
        if let Some(assists) = self.assisting_participant_ids.as_ref().and_then(|v| v.as_array()) {
            ids.extend(assists.iter().filter_map(|v| v.as_i64()).map(|v| v as i32));
        }
        ids
    }
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
