//! Integration tests for the message-driven refinement pipeline: category
//! filtering, dedup guarding, analytics computation, and per-item batch
//! outcome reporting.

mod test_utils;

use std::sync::Arc;

use chrono::Utc;
use rift_analytics::config::AppConfig;
use rift_analytics::models::timeline_event::{MONSTER_BARON, MONSTER_DRAGON};
use rift_analytics::pipeline::{Disposition, MatchProcessor, MatchReadyMessage, SkipReason};
use rift_analytics::repositories::{
    MatchTimelineRepository, ParticipantAnalyticsRepository, RollingAnalyticsRepository,
};
use sea_orm::DatabaseConnection;
use test_utils::*;
use uuid::Uuid;

fn message(match_id: Uuid, external_match_id: &str, queue_id: i32) -> MatchReadyMessage {
    MatchReadyMessage {
        match_id,
        external_match_id: external_match_id.to_string(),
        queue_id,
        participant_count: 10,
        timestamp: Utc::now(),
    }
}

fn processor(db: &Arc<DatabaseConnection>) -> Arc<MatchProcessor> {
    let config = AppConfig::default();
    Arc::new(MatchProcessor::new(Arc::clone(db), Arc::new(config)))
}

async fn seed_ranked_match(db: &DatabaseConnection, external_id: &str) -> anyhow::Result<Uuid> {
    let match_id = insert_match(db, external_id, 420, Utc::now(), 2110).await?;
    seed_full_match(db, match_id, "focus-player").await?;

    insert_champion_kill(db, match_id, 180_000, 3, 7, vec![1, 2]).await?;
    insert_champion_kill(db, match_id, 240_000, 7, 3, vec![]).await?;
    insert_elite_monster_kill(db, match_id, 420_000, 4, MONSTER_DRAGON, vec![1]).await?;
    insert_building_kill(db, match_id, 600_000, 1, 200).await?;
    insert_elite_monster_kill(db, match_id, 1_500_000, 6, MONSTER_BARON, vec![7, 8]).await?;

    Ok(match_id)
}

#[tokio::test]
async fn test_processing_computes_all_derived_rows() {
    let db = setup_test_db_arc().await.unwrap();
    let match_id = seed_ranked_match(&db, "NA1_100").await.unwrap();

    let outcome = processor(&db)
        .process_message(&message(match_id, "NA1_100", 420))
        .await;

    assert_eq!(
        outcome.disposition,
        Disposition::Completed { rolling_failures: 0 }
    );

    let analytics = ParticipantAnalyticsRepository::new(db.as_ref())
        .find_by_match(match_id)
        .await
        .unwrap();
    assert_eq!(analytics.len(), 10);
    for row in &analytics {
        assert!(row.gold_per_minute.is_some());
        for score in [
            row.economy_score,
            row.objective_score,
            row.map_control_score,
            row.error_score,
            row.overall_score,
        ]
        .into_iter()
        .flatten()
        {
            assert!((0.0..=100.0).contains(&score));
        }
    }

    let timeline = MatchTimelineRepository::new(db.as_ref())
        .find_by_match(match_id)
        .await
        .unwrap()
        .expect("timeline row");
    assert_eq!(timeline.first_blood_ms, Some(180_000));
    assert_eq!(timeline.first_blood_team_id, Some(100));
    assert_eq!(timeline.first_dragon_team_id, Some(100));
    assert_eq!(timeline.first_tower_ms, Some(600_000));
    assert_eq!(timeline.first_baron_team_id, Some(200));

    // actor 4 killed the dragon with an assist from actor 1
    let killer = analytics
        .iter()
        .find(|r| r.puuid == "puuid-4")
        .expect("actor 4 row");
    assert_eq!(killer.dragon_takedowns, 1);
    let assist = analytics
        .iter()
        .find(|r| r.puuid == "focus-player")
        .expect("actor 1 row");
    assert_eq!(assist.dragon_takedowns, 1);
    assert_eq!(assist.tower_takedowns, 1);

    // rolling windows were recomputed for the affected players
    let rolling = RollingAnalyticsRepository::new(db.as_ref())
        .find_for_player("focus-player")
        .await
        .unwrap();
    assert!(!rolling.is_empty());
}

#[tokio::test]
async fn test_duplicate_notification_is_skipped() {
    let db = setup_test_db_arc().await.unwrap();
    let match_id = seed_ranked_match(&db, "NA1_200").await.unwrap();
    let processor = processor(&db);
    let msg = message(match_id, "NA1_200", 420);

    let first = processor.process_message(&msg).await;
    assert!(matches!(first.disposition, Disposition::Completed { .. }));

    let second = processor.process_message(&msg).await;
    assert_eq!(
        second.disposition,
        Disposition::Skipped {
            reason: SkipReason::AlreadyProcessed
        }
    );
    assert!(second.is_success());

    // still exactly one row per participant
    let analytics = ParticipantAnalyticsRepository::new(db.as_ref())
        .find_by_match(match_id)
        .await
        .unwrap();
    assert_eq!(analytics.len(), 10);
}

#[tokio::test]
async fn test_non_ranked_queue_is_acknowledged_without_work() {
    let db = setup_test_db_arc().await.unwrap();
    let match_id = insert_match(db.as_ref(), "NA1_300", 400, Utc::now(), 1800)
        .await
        .unwrap();
    seed_full_match(db.as_ref(), match_id, "aram-player")
        .await
        .unwrap();

    let outcome = processor(&db)
        .process_message(&message(match_id, "NA1_300", 400))
        .await;

    assert_eq!(
        outcome.disposition,
        Disposition::Skipped {
            reason: SkipReason::NonRankedQueue
        }
    );
    assert!(outcome.is_success());

    let analytics = ParticipantAnalyticsRepository::new(db.as_ref())
        .find_by_match(match_id)
        .await
        .unwrap();
    assert!(analytics.is_empty());
}

#[tokio::test]
async fn test_missing_raw_match_fails_the_message() {
    let db = setup_test_db_arc().await.unwrap();

    let outcome = processor(&db)
        .process_message(&message(Uuid::new_v4(), "NA1_DOES_NOT_EXIST", 420))
        .await;

    assert!(matches!(outcome.disposition, Disposition::Failed { .. }));
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_match_without_participants_fails_validation() {
    let db = setup_test_db_arc().await.unwrap();
    let match_id = insert_match(db.as_ref(), "NA1_400", 420, Utc::now(), 2000)
        .await
        .unwrap();

    let outcome = processor(&db)
        .process_message(&message(match_id, "NA1_400", 420))
        .await;

    match outcome.disposition {
        Disposition::Failed { error } => assert!(error.contains("no participant records")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let db = setup_test_db_arc().await.unwrap();
    let good_id = seed_ranked_match(&db, "NA1_500").await.unwrap();
    let bad_id = Uuid::new_v4();

    let aram_id = Uuid::new_v4();
    let report = processor(&db)
        .process_batch(vec![
            message(good_id, "NA1_500", 420),
            message(bad_id, "NA1_MISSING", 420),
            message(aram_id, "NA1_ARAM", 450),
        ])
        .await;

    // every message is accounted for, in input order
    assert_eq!(report.outcomes.len(), 3);
    let reported: Vec<Uuid> = report.outcomes.iter().map(|o| o.match_id).collect();
    assert_eq!(reported, vec![good_id, bad_id, aram_id]);

    assert_eq!(report.completed_count(), 1);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.failed_ids(), vec![bad_id]);
}
