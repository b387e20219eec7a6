//! Derived rolling-window trend entity.
//!
//! Keyed by (puuid, window size, champion filter, queue filter, position
//! filter); wildcard filters are stored as sentinel values so the composite
//! unique index treats them like any other key component.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Sentinel stored for a wildcard numeric filter.
pub const WILDCARD_ID: i32 = -1;
/// Sentinel stored for a wildcard position filter.
pub const WILDCARD_POSITION: &str = "ALL";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rolling_analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub puuid: String,
    pub window_size: i32,
    pub champion_filter: i32,
    pub queue_filter: i32,
    pub position_filter: String,

    /// Number of qualifying matches actually found (<= window_size).
    pub matches_included: i32,

    pub win_rate_pct: f64,

    pub avg_economy_score: Option<f64>,
    pub avg_objective_score: Option<f64>,
    pub avg_map_control_score: Option<f64>,
    pub avg_error_score: Option<f64>,
    pub avg_overall_score: Option<f64>,

    pub trend_economy: String,
    pub trend_objectives: String,
    pub trend_map_control: String,
    pub trend_errors: String,

    /// Ordered (newest first) list of match ids included in the window.
    #[sea_orm(column_type = "JsonBinary")]
    pub match_ids: JsonValue,

    pub computed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
