//! Migration to create the raw match store tables.
//!
//! These tables are populated verbatim by the upstream ingestion stage; the
//! refinement service only reads them. They are created here so tests can
//! bootstrap a complete schema on an in-memory database.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Matches::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Matches::ExternalMatchId)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Matches::QueueId).integer().not_null())
                    .col(
                        ColumnDef::new(Matches::GameStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::DurationSeconds).integer().not_null())
                    .col(ColumnDef::new(Matches::GameVersion).text().not_null())
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MatchParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchParticipants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MatchParticipants::MatchId).uuid().not_null())
                    .col(
                        ColumnDef::new(MatchParticipants::ParticipantIndex)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MatchParticipants::Puuid).text().not_null())
                    .col(
                        ColumnDef::new(MatchParticipants::ChampionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MatchParticipants::ChampionName).text().not_null())
                    .col(ColumnDef::new(MatchParticipants::TeamId).integer().not_null())
                    .col(ColumnDef::new(MatchParticipants::TeamPosition).text().not_null())
                    .col(ColumnDef::new(MatchParticipants::Kills).integer().not_null())
                    .col(ColumnDef::new(MatchParticipants::Deaths).integer().not_null())
                    .col(ColumnDef::new(MatchParticipants::Assists).integer().not_null())
                    .col(ColumnDef::new(MatchParticipants::GoldEarned).integer().not_null())
                    .col(ColumnDef::new(MatchParticipants::TotalCs).integer().not_null())
                    .col(
                        ColumnDef::new(MatchParticipants::DamageToChampions)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchParticipants::VisionScore)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MatchParticipants::Win).boolean().not_null())
                    .col(ColumnDef::new(MatchParticipants::Challenges).json_binary().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_participants_match_id")
                            .from(MatchParticipants::Table, MatchParticipants::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_match_participants_match_id")
                    .table(MatchParticipants::Table)
                    .col(MatchParticipants::MatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_match_participants_puuid")
                    .table(MatchParticipants::Table)
                    .col(MatchParticipants::Puuid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TimelineEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimelineEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimelineEvents::MatchId).uuid().not_null())
                    .col(ColumnDef::new(TimelineEvents::EventType).text().not_null())
                    .col(
                        ColumnDef::new(TimelineEvents::EventTimestampMs)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimelineEvents::KillerParticipantId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TimelineEvents::VictimParticipantId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(TimelineEvents::TeamId).integer().null())
                    .col(ColumnDef::new(TimelineEvents::MonsterType).text().null())
                    .col(ColumnDef::new(TimelineEvents::BuildingType).text().null())
                    .col(
                        ColumnDef::new(TimelineEvents::AssistingParticipantIds)
                            .json_binary()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timeline_events_match_id")
                            .from(TimelineEvents::Table, TimelineEvents::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_timeline_events_match_id_type")
                    .table(TimelineEvents::Table)
                    .col(TimelineEvents::MatchId)
                    .col(TimelineEvents::EventType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimelineEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MatchParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    ExternalMatchId,
    QueueId,
    GameStart,
    DurationSeconds,
    GameVersion,
    CreatedAt,
}

#[derive(Iden)]
enum MatchParticipants {
    Table,
    Id,
    MatchId,
    ParticipantIndex,
    Puuid,
    ChampionId,
    ChampionName,
    TeamId,
    TeamPosition,
    Kills,
    Deaths,
    Assists,
    GoldEarned,
    TotalCs,
    DamageToChampions,
    VisionScore,
    Win,
    Challenges,
}

#[derive(Iden)]
enum TimelineEvents {
    Table,
    Id,
    MatchId,
    EventType,
    EventTimestampMs,
    KillerParticipantId,
    VictimParticipantId,
    TeamId,
    MonsterType,
    BuildingType,
    AssistingParticipantIds,
}
