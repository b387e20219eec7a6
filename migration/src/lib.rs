//! Database migrations for the match analytics refinement service.
//!
//! Covers both the raw match store this stage reads (written by the
//! ingestion stage) and the derived analytics tables it owns.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000001_create_raw_match_tables;
mod m2025_06_01_000002_create_participant_analytics;
mod m2025_06_01_000003_create_match_timeline_analytics;
mod m2025_06_01_000004_create_rolling_analytics;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000001_create_raw_match_tables::Migration),
            Box::new(m2025_06_01_000002_create_participant_analytics::Migration),
            Box::new(m2025_06_01_000003_create_match_timeline_analytics::Migration),
            Box::new(m2025_06_01_000004_create_rolling_analytics::Migration),
        ]
    }
}
