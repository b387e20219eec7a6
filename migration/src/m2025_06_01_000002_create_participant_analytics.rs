//! Migration to create the participant_analytics table.
//!
//! One row per raw participant record, keyed uniquely by participant_id so
//! recomputation overwrites instead of duplicating.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParticipantAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParticipantAnalytics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParticipantAnalytics::ParticipantId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ParticipantAnalytics::MatchId).uuid().not_null())
                    .col(ColumnDef::new(ParticipantAnalytics::Puuid).text().not_null())
                    // economy bundle
                    .col(ColumnDef::new(ParticipantAnalytics::GoldPerMinute).double().null())
                    .col(ColumnDef::new(ParticipantAnalytics::CsPerMinute).double().null())
                    .col(ColumnDef::new(ParticipantAnalytics::DamagePerMinute).double().null())
                    .col(
                        ColumnDef::new(ParticipantAnalytics::LaningGoldExpAdvantage)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ParticipantAnalytics::MaxLevelLeadLaneOpponent)
                            .double()
                            .null(),
                    )
                    // objectives bundle
                    .col(
                        ColumnDef::new(ParticipantAnalytics::BaronTakedowns)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParticipantAnalytics::DragonTakedowns)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParticipantAnalytics::TowerTakedowns)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParticipantAnalytics::ObjectiveParticipationPct)
                            .double()
                            .null(),
                    )
                    // map control bundle
                    .col(
                        ColumnDef::new(ParticipantAnalytics::VisionScorePerMinute)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ParticipantAnalytics::ControlWardsPlaced)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(ParticipantAnalytics::WardTakedowns).double().null())
                    .col(
                        ColumnDef::new(ParticipantAnalytics::VisionAdvantageLaneOpponent)
                            .double()
                            .null(),
                    )
                    // error bundle
                    .col(ColumnDef::new(ParticipantAnalytics::DeathsPerMinute).double().null())
                    .col(
                        ColumnDef::new(ParticipantAnalytics::KillParticipationPct)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(ParticipantAnalytics::SoloDeaths).integer().null())
                    // composite scores
                    .col(ColumnDef::new(ParticipantAnalytics::EconomyScore).double().null())
                    .col(ColumnDef::new(ParticipantAnalytics::ObjectiveScore).double().null())
                    .col(ColumnDef::new(ParticipantAnalytics::MapControlScore).double().null())
                    .col(ColumnDef::new(ParticipantAnalytics::ErrorScore).double().null())
                    .col(ColumnDef::new(ParticipantAnalytics::OverallScore).double().null())
                    .col(
                        ColumnDef::new(ParticipantAnalytics::ComputedAt)
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
                    .name("idx_participant_analytics_match_id")
                    .table(ParticipantAnalytics::Table)
                    .col(ParticipantAnalytics::MatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_participant_analytics_puuid")
                    .table(ParticipantAnalytics::Table)
                    .col(ParticipantAnalytics::Puuid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParticipantAnalytics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ParticipantAnalytics {
    Table,
    Id,
    ParticipantId,
    MatchId,
    Puuid,
    GoldPerMinute,
    CsPerMinute,
    DamagePerMinute,
    LaningGoldExpAdvantage,
    MaxLevelLeadLaneOpponent,
    BaronTakedowns,
    DragonTakedowns,
    TowerTakedowns,
    ObjectiveParticipationPct,
    VisionScorePerMinute,
    ControlWardsPlaced,
    WardTakedowns,
    VisionAdvantageLaneOpponent,
    DeathsPerMinute,
    KillParticipationPct,
    SoloDeaths,
    EconomyScore,
    ObjectiveScore,
    MapControlScore,
    ErrorScore,
    OverallScore,
    ComputedAt,
}
