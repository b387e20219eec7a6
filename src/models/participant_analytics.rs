//! Derived per-participant analytics entity.
//!
//! Exactly one row per raw participant record; recomputation overwrites the
//! full derived column set through the unique `participant_id` key.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participant_analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Unique key: FK to the raw participant record.
    pub participant_id: Uuid,
    pub match_id: Uuid,
    pub puuid: String,

    // economy bundle
    pub gold_per_minute: Option<f64>,
    pub cs_per_minute: Option<f64>,
    pub damage_per_minute: Option<f64>,
    pub laning_gold_exp_advantage: Option<f64>,
    pub max_level_lead_lane_opponent: Option<f64>,

    // objectives bundle
    pub baron_takedowns: i32,
    pub dragon_takedowns: i32,
    pub tower_takedowns: i32,
    pub objective_participation_pct: Option<f64>,

    // map control bundle
    pub vision_score_per_minute: Option<f64>,
    pub control_wards_placed: Option<f64>,
    pub ward_takedowns: Option<f64>,
    pub vision_advantage_lane_opponent: Option<f64>,

    // error bundle
    pub deaths_per_minute: Option<f64>,
    pub kill_participation_pct: Option<f64>,
    pub solo_deaths: Option<i32>,

    // composite scores, [0, 100] when present
    pub economy_score: Option<f64>,
    pub objective_score: Option<f64>,
    pub map_control_score: Option<f64>,
    pub error_score: Option<f64>,
    pub overall_score: Option<f64>,

    pub computed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::raw_participant::Entity",
        from = "Column::ParticipantId",
        to = "super::raw_participant::Column::Id"
    )]
    Participant,
}

impl Related<super::raw_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
