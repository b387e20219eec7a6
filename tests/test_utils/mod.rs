//! Test utilities for database testing.
//!
//! Sets up in-memory SQLite databases with migrations applied and provides
//! fixture helpers for seeding raw match data.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rift_analytics::migration::{Migrator, MigratorTrait};
use rift_analytics::models::{participant_analytics, raw_match, raw_participant, timeline_event};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement};
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK
    // checks so fixtures can be inserted piecemeal.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Arc-wrapped variant for processor tests.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Insert a raw match header and return its id.
#[allow(dead_code)]
pub async fn insert_match(
    db: &DatabaseConnection,
    external_match_id: &str,
    queue_id: i32,
    game_start: DateTime<Utc>,
    duration_seconds: i32,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    raw_match::ActiveModel {
        id: Set(id),
        external_match_id: Set(external_match_id.to_string()),
        queue_id: Set(queue_id),
        game_start: Set(game_start.into()),
        duration_seconds: Set(duration_seconds),
        game_version: Set("16.17.700.1234".to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    Ok(id)
}

/// Raw participant fixture with playable defaults.
#[allow(dead_code)]
pub struct ParticipantSeed {
    pub participant_index: i32,
    pub puuid: String,
    pub team_id: i32,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i32,
    pub total_cs: i32,
    pub damage_to_champions: i32,
    pub vision_score: i32,
    pub champion_id: i32,
    pub champion_name: String,
    pub team_position: String,
    pub challenges: Option<JsonValue>,
}

impl Default for ParticipantSeed {
    fn default() -> Self {
        Self {
            participant_index: 1,
            puuid: "test-puuid".to_string(),
            team_id: 100,
            win: true,
            kills: 5,
            deaths: 3,
            assists: 8,
            gold_earned: 12500,
            total_cs: 190,
            damage_to_champions: 18000,
            vision_score: 28,
            champion_id: 266,
            champion_name: "Aatrox".to_string(),
            team_position: "TOP".to_string(),
            challenges: Some(json!({
                "controlWardsPlaced": 3,
                "wardTakedowns": 6,
                "laningPhaseGoldExpAdvantage": 0.05
            })),
        }
    }
}

#[allow(dead_code)]
pub async fn insert_participant(
    db: &DatabaseConnection,
    match_id: Uuid,
    seed: ParticipantSeed,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    raw_participant::ActiveModel {
        id: Set(id),
        match_id: Set(match_id),
        participant_index: Set(seed.participant_index),
        puuid: Set(seed.puuid),
        champion_id: Set(seed.champion_id),
        champion_name: Set(seed.champion_name),
        team_id: Set(seed.team_id),
        team_position: Set(seed.team_position),
        kills: Set(seed.kills),
        deaths: Set(seed.deaths),
        assists: Set(seed.assists),
        gold_earned: Set(seed.gold_earned),
        total_cs: Set(seed.total_cs),
        damage_to_champions: Set(seed.damage_to_champions),
        vision_score: Set(seed.vision_score),
        win: Set(seed.win),
        challenges: Set(seed.challenges),
    }
    .insert(db)
    .await?;
    Ok(id)
}

/// Seed a full ten-participant match; actors 1..=5 are blue (100),
/// 6..=10 are red (200), blue wins. The first blue actor uses `focus_puuid`.
#[allow(dead_code)]
pub async fn seed_full_match(
    db: &DatabaseConnection,
    match_id: Uuid,
    focus_puuid: &str,
) -> Result<()> {
    for index in 1..=10 {
        let team_id = if index <= 5 { 100 } else { 200 };
        let puuid = if index == 1 {
            focus_puuid.to_string()
        } else {
            format!("puuid-{index}")
        };
        insert_participant(
            db,
            match_id,
            ParticipantSeed {
                participant_index: index,
                puuid,
                team_id,
                win: team_id == 100,
                ..Default::default()
            },
        )
        .await?;
    }
    Ok(())
}

#[allow(dead_code)]
pub async fn insert_champion_kill(
    db: &DatabaseConnection,
    match_id: Uuid,
    timestamp_ms: i64,
    killer: i32,
    victim: i32,
    assists: Vec<i32>,
) -> Result<()> {
    timeline_event::ActiveModel {
        id: Set(Uuid::new_v4()),
        match_id: Set(match_id),
        event_type: Set(timeline_event::CHAMPION_KILL.to_string()),
        event_timestamp_ms: Set(timestamp_ms),
        killer_participant_id: Set(Some(killer)),
        victim_participant_id: Set(Some(victim)),
        team_id: Set(None),
        monster_type: Set(None),
        building_type: Set(None),
        assisting_participant_ids: Set(Some(json!(assists))),
    }
    .insert(db)
    .await?;
    Ok(())
}

#[allow(dead_code)]
pub async fn insert_elite_monster_kill(
    db: &DatabaseConnection,
    match_id: Uuid,
    timestamp_ms: i64,
    killer: i32,
    monster_type: &str,
    assists: Vec<i32>,
) -> Result<()> {
    timeline_event::ActiveModel {
        id: Set(Uuid::new_v4()),
        match_id: Set(match_id),
        event_type: Set(timeline_event::ELITE_MONSTER_KILL.to_string()),
        event_timestamp_ms: Set(timestamp_ms),
        killer_participant_id: Set(Some(killer)),
        victim_participant_id: Set(None),
        team_id: Set(None),
        monster_type: Set(Some(monster_type.to_string())),
        building_type: Set(None),
        assisting_participant_ids: Set(Some(json!(assists))),
    }
    .insert(db)
    .await?;
    Ok(())
}

#[allow(dead_code)]
pub async fn insert_building_kill(
    db: &DatabaseConnection,
    match_id: Uuid,
    timestamp_ms: i64,
    killer: i32,
    owner_team_id: i32,
) -> Result<()> {
    timeline_event::ActiveModel {
        id: Set(Uuid::new_v4()),
        match_id: Set(match_id),
        event_type: Set(timeline_event::BUILDING_KILL.to_string()),
        event_timestamp_ms: Set(timestamp_ms),
        killer_participant_id: Set(Some(killer)),
        victim_participant_id: Set(None),
        team_id: Set(Some(owner_team_id)),
        monster_type: Set(None),
        building_type: Set(Some(timeline_event::BUILDING_TOWER.to_string())),
        assisting_participant_ids: Set(None),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Insert a pre-computed analytics row directly (rolling aggregation tests
/// control scores without running the full pipeline).
#[allow(dead_code)]
pub async fn insert_analytics_row(
    db: &DatabaseConnection,
    participant_id: Uuid,
    match_id: Uuid,
    puuid: &str,
    overall_score: Option<f64>,
) -> Result<()> {
    participant_analytics::ActiveModel {
        id: Set(Uuid::new_v4()),
        participant_id: Set(participant_id),
        match_id: Set(match_id),
        puuid: Set(puuid.to_string()),
        gold_per_minute: Set(Some(420.0)),
        cs_per_minute: Set(Some(6.5)),
        damage_per_minute: Set(Some(700.0)),
        laning_gold_exp_advantage: Set(None),
        max_level_lead_lane_opponent: Set(None),
        baron_takedowns: Set(0),
        dragon_takedowns: Set(1),
        tower_takedowns: Set(2),
        objective_participation_pct: Set(Some(50.0)),
        vision_score_per_minute: Set(Some(1.1)),
        control_wards_placed: Set(Some(3.0)),
        ward_takedowns: Set(Some(5.0)),
        vision_advantage_lane_opponent: Set(None),
        deaths_per_minute: Set(Some(0.15)),
        kill_participation_pct: Set(Some(60.0)),
        solo_deaths: Set(None),
        economy_score: Set(overall_score),
        objective_score: Set(overall_score),
        map_control_score: Set(overall_score),
        error_score: Set(overall_score),
        overall_score: Set(overall_score),
        computed_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    Ok(())
}
