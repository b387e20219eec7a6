//! Migration to create the match_timeline_analytics table.
//!
//! One row per match holding first-occurrence tempo markers derived from the
//! raw timeline event stream.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MatchTimelineAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::MatchId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstBloodMs)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstBloodTeamId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstTowerMs)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstTowerTeamId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstDragonMs)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstDragonTeamId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstBaronMs)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::FirstBaronTeamId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::ObjectiveEvents)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchTimelineAnalytics::ComputedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatchTimelineAnalytics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MatchTimelineAnalytics {
    Table,
    Id,
    MatchId,
    FirstBloodMs,
    FirstBloodTeamId,
    FirstTowerMs,
    FirstTowerTeamId,
    FirstDragonMs,
    FirstDragonTeamId,
    FirstBaronMs,
    FirstBaronTeamId,
    ObjectiveEvents,
    ComputedAt,
}
