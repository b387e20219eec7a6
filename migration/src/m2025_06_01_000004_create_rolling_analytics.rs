//! Migration to create the rolling_analytics table.
//!
//! One row per (player, window size, champion filter, queue filter, position
//! filter). Wildcard filters are stored as sentinels (-1 / 'ALL') so the
//! composite unique index covers them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RollingAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RollingAnalytics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RollingAnalytics::Puuid).text().not_null())
                    .col(ColumnDef::new(RollingAnalytics::WindowSize).integer().not_null())
                    .col(
                        ColumnDef::new(RollingAnalytics::ChampionFilter)
                            .integer()
                            .not_null()
                            .default(-1),
                    )
                    .col(
                        ColumnDef::new(RollingAnalytics::QueueFilter)
                            .integer()
                            .not_null()
                            .default(-1),
                    )
                    .col(
                        ColumnDef::new(RollingAnalytics::PositionFilter)
                            .text()
                            .not_null()
                            .default("ALL"),
                    )
                    .col(
                        ColumnDef::new(RollingAnalytics::MatchesIncluded)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RollingAnalytics::WinRatePct).double().not_null())
                    .col(ColumnDef::new(RollingAnalytics::AvgEconomyScore).double().null())
                    .col(ColumnDef::new(RollingAnalytics::AvgObjectiveScore).double().null())
                    .col(ColumnDef::new(RollingAnalytics::AvgMapControlScore).double().null())
                    .col(ColumnDef::new(RollingAnalytics::AvgErrorScore).double().null())
                    .col(ColumnDef::new(RollingAnalytics::AvgOverallScore).double().null())
                    .col(ColumnDef::new(RollingAnalytics::TrendEconomy).text().not_null())
                    .col(ColumnDef::new(RollingAnalytics::TrendObjectives).text().not_null())
                    .col(ColumnDef::new(RollingAnalytics::TrendMapControl).text().not_null())
                    .col(ColumnDef::new(RollingAnalytics::TrendErrors).text().not_null())
                    .col(ColumnDef::new(RollingAnalytics::MatchIds).json_binary().not_null())
                    .col(
                        ColumnDef::new(RollingAnalytics::ComputedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_rolling_analytics_window_key")
                    .table(RollingAnalytics::Table)
                    .col(RollingAnalytics::Puuid)
                    .col(RollingAnalytics::WindowSize)
                    .col(RollingAnalytics::ChampionFilter)
                    .col(RollingAnalytics::QueueFilter)
                    .col(RollingAnalytics::PositionFilter)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RollingAnalytics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RollingAnalytics {
    Table,
    Id,
    Puuid,
    WindowSize,
    ChampionFilter,
    QueueFilter,
    PositionFilter,
    MatchesIncluded,
    WinRatePct,
    AvgEconomyScore,
    AvgObjectiveScore,
    AvgMapControlScore,
    AvgErrorScore,
    AvgOverallScore,
    TrendEconomy,
    TrendObjectives,
    TrendMapControl,
    TrendErrors,
    MatchIds,
    ComputedAt,
}
