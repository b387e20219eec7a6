//! # Timeline Extractor
//!
//! Derives match-level tempo markers (first blood/tower/dragon/baron) and
//! per-participant objective takedown tallies from the raw timeline event
//! stream.
//!
//! Timeline events reference players by in-match actor id (1..=10), so every
//! team attribution goes through a participant-team lookup. A building-kill
//! event's own `team_id` names the team that lost the structure, never the
//! killer's team.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::raw_participant::Model as Participant;
use crate::models::timeline_event::{
    BUILDING_KILL, BUILDING_TOWER, CHAMPION_KILL, ELITE_MONSTER_KILL, MONSTER_BARON,
    MONSTER_DRAGON, Model as TimelineEvent,
};

/// First occurrence of a tracked event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstOccurrence {
    pub timestamp_ms: i64,
    /// Killer's team, when the killer could be resolved to a participant.
    pub team_id: Option<i32>,
}

/// One entry in the persisted objective event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveEvent {
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub timestamp_ms: i64,
    pub team_id: Option<i32>,
}

/// Match-level tempo markers plus the ordered objective event list.
#[derive(Debug, Clone, Default)]
pub struct TimelineSummary {
    pub first_blood: Option<FirstOccurrence>,
    pub first_tower: Option<FirstOccurrence>,
    pub first_dragon: Option<FirstOccurrence>,
    pub first_baron: Option<FirstOccurrence>,
    pub objective_events: Vec<ObjectiveEvent>,
}

/// Baron/dragon/tower takedowns credited to one actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveTally {
    pub baron: i32,
    pub dragon: i32,
    pub tower: i32,
}

impl ObjectiveTally {
    pub fn total(&self) -> i32 {
        self.baron + self.dragon + self.tower
    }
}

/// Objective takedowns broken down per actor and summed per team.
#[derive(Debug, Clone, Default)]
pub struct ObjectiveBreakdown {
    pub by_actor: HashMap<i32, ObjectiveTally>,
    pub by_team: HashMap<i32, i32>,
}

/// Map of in-match actor id to team id, built from participant records.
pub fn team_lookup(participants: &[Participant]) -> HashMap<i32, i32> {
    participants
        .iter()
        .map(|p| (p.participant_index, p.team_id))
        .collect()
}

/// Extracts tempo markers from a match's timeline events.
///
/// Events must be in chronological order (the repository returns them that
/// way); each marker takes the first matching event. Absence of a marker is
/// not an error.
pub fn summarize(
    events: &[TimelineEvent],
    team_by_actor: &HashMap<i32, i32>,
) -> TimelineSummary {
    let mut summary = TimelineSummary::default();

    for event in events {
        match event.event_type.as_str() {
            CHAMPION_KILL => {
                if summary.first_blood.is_none() {
                    summary.first_blood = Some(first_occurrence(event, team_by_actor));
                }
            }
            BUILDING_KILL => {
                if is_tower(event) && summary.first_tower.is_none() {
                    summary.first_tower = Some(first_occurrence(event, team_by_actor));
                }
                summary.objective_events.push(objective_event(event, team_by_actor));
            }
            ELITE_MONSTER_KILL => {
                match event.monster_type.as_deref() {
                    Some(MONSTER_DRAGON) if summary.first_dragon.is_none() => {
                        summary.first_dragon = Some(first_occurrence(event, team_by_actor));
                    }
                    Some(MONSTER_BARON) if summary.first_baron.is_none() => {
                        summary.first_baron = Some(first_occurrence(event, team_by_actor));
                    }
                    _ => {}
                }
                summary.objective_events.push(objective_event(event, team_by_actor));
            }
            _ => {}
        }
    }

    summary
}

/// Tallies baron/dragon/tower takedowns per actor (killer plus assisters)
/// and per team (killer's team, counted once per event).
pub fn objective_breakdown(
    events: &[TimelineEvent],
    team_by_actor: &HashMap<i32, i32>,
) -> ObjectiveBreakdown {
    let mut breakdown = ObjectiveBreakdown::default();

    for event in events {
        let kind = match classify_objective(event) {
            Some(kind) => kind,
            None => continue,
        };

        for actor in event.takedown_participants() {
            let tally = breakdown.by_actor.entry(actor).or_default();
            match kind {
                ObjectiveKind::Baron => tally.baron += 1,
                ObjectiveKind::Dragon => tally.dragon += 1,
                ObjectiveKind::Tower => tally.tower += 1,
            }
        }

        if let Some(team) = killer_team(event, team_by_actor) {
            *breakdown.by_team.entry(team).or_default() += 1;
        }
    }

    breakdown
}

#[derive(Clone, Copy)]
enum ObjectiveKind {
    Baron,
    Dragon,
    Tower,
}

fn classify_objective(event: &TimelineEvent) -> Option<ObjectiveKind> {
    match event.event_type.as_str() {
        ELITE_MONSTER_KILL => match event.monster_type.as_deref() {
            Some(MONSTER_BARON) => Some(ObjectiveKind::Baron),
            Some(MONSTER_DRAGON) => Some(ObjectiveKind::Dragon),
            _ => None,
        },
        BUILDING_KILL if is_tower(event) => Some(ObjectiveKind::Tower),
        _ => None,
    }
}

fn is_tower(event: &TimelineEvent) -> bool {
    event.building_type.as_deref() == Some(BUILDING_TOWER)
}

/// Resolve the killer's team through the participant lookup. Neutral or
/// unknown killers (minion executions use actor id 0) resolve to `None`.
fn killer_team(event: &TimelineEvent, team_by_actor: &HashMap<i32, i32>) -> Option<i32> {
    event
        .killer_participant_id
        .and_then(|actor| team_by_actor.get(&actor).copied())
}

fn first_occurrence(
    event: &TimelineEvent,
    team_by_actor: &HashMap<i32, i32>,
) -> FirstOccurrence {
    FirstOccurrence {
        timestamp_ms: event.event_timestamp_ms,
        team_id: killer_team(event, team_by_actor),
    }
}

fn objective_event(
    event: &TimelineEvent,
    team_by_actor: &HashMap<i32, i32>,
) -> ObjectiveEvent {
    let subtype = match event.event_type.as_str() {
        ELITE_MONSTER_KILL => event.monster_type.clone(),
        BUILDING_KILL => event.building_type.clone(),
        _ => None,
    };

    ObjectiveEvent {
        event_type: event.event_type.clone(),
        subtype,
        timestamp_ms: event.event_timestamp_ms,
        team_id: killer_team(event, team_by_actor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn event(
        event_type: &str,
        timestamp_ms: i64,
        killer: Option<i32>,
        monster_type: Option<&str>,
        building_type: Option<&str>,
        assists: Option<Vec<i32>>,
    ) -> TimelineEvent {
        TimelineEvent {
            id: Uuid::new_v4(),
            match_id: Uuid::new_v4(),
            event_type: event_type.to_string(),
            event_timestamp_ms: timestamp_ms,
            killer_participant_id: killer,
            victim_participant_id: None,
            team_id: None,
            monster_type: monster_type.map(str::to_string),
            building_type: building_type.map(str::to_string),
            assisting_participant_ids: assists.map(|ids| json!(ids)),
        }
    }

    fn teams() -> HashMap<i32, i32> {
        // actors 1..=5 on blue, 6..=10 on red
        (1..=10).map(|i| (i, if i <= 5 { 100 } else { 200 })).collect()
    }

    #[test]
    fn test_first_occurrences() {
        let events = vec![
            event(CHAMPION_KILL, 180_000, Some(3), None, None, None),
            event(CHAMPION_KILL, 240_000, Some(7), None, None, None),
            event(
                ELITE_MONSTER_KILL,
                420_000,
                Some(8),
                Some(MONSTER_DRAGON),
                None,
                None,
            ),
            event(
                BUILDING_KILL,
                600_000,
                Some(2),
                None,
                Some(BUILDING_TOWER),
                None,
            ),
            event(
                ELITE_MONSTER_KILL,
                1_500_000,
                Some(1),
                Some(MONSTER_BARON),
                None,
                None,
            ),
        ];

        let summary = summarize(&events, &teams());

        assert_eq!(
            summary.first_blood,
            Some(FirstOccurrence {
                timestamp_ms: 180_000,
                team_id: Some(100)
            })
        );
        assert_eq!(summary.first_dragon.unwrap().team_id, Some(200));
        assert_eq!(summary.first_tower.unwrap().timestamp_ms, 600_000);
        assert_eq!(summary.first_baron.unwrap().team_id, Some(100));
        assert_eq!(summary.objective_events.len(), 3);
    }

    #[test]
    fn test_no_events_yields_empty_summary() {
        let summary = summarize(&[], &teams());
        assert!(summary.first_blood.is_none());
        assert!(summary.first_tower.is_none());
        assert!(summary.first_dragon.is_none());
        assert!(summary.first_baron.is_none());
        assert!(summary.objective_events.is_empty());
    }

    #[test]
    fn test_unresolvable_killer_has_no_team() {
        // minion tower executions report actor id 0
        let events = vec![event(
            BUILDING_KILL,
            900_000,
            Some(0),
            None,
            Some(BUILDING_TOWER),
            None,
        )];
        let summary = summarize(&events, &teams());
        assert_eq!(summary.first_tower.unwrap().team_id, None);
    }

    #[test]
    fn test_objective_breakdown_credits_killer_and_assists() {
        let events = vec![
            event(
                ELITE_MONSTER_KILL,
                420_000,
                Some(4),
                Some(MONSTER_DRAGON),
                None,
                Some(vec![1, 2]),
            ),
            event(
                BUILDING_KILL,
                600_000,
                Some(4),
                None,
                Some(BUILDING_TOWER),
                None,
            ),
            event(
                ELITE_MONSTER_KILL,
                1_400_000,
                Some(9),
                Some(MONSTER_BARON),
                None,
                None,
            ),
        ];

        let breakdown = objective_breakdown(&events, &teams());

        let four = breakdown.by_actor.get(&4).copied().unwrap();
        assert_eq!(four.dragon, 1);
        assert_eq!(four.tower, 1);
        assert_eq!(four.total(), 2);

        let one = breakdown.by_actor.get(&1).copied().unwrap();
        assert_eq!(one.dragon, 1);

        assert_eq!(breakdown.by_team.get(&100), Some(&2));
        assert_eq!(breakdown.by_team.get(&200), Some(&1));
    }

    #[test]
    fn test_non_objective_events_are_ignored_by_breakdown() {
        let events = vec![
            event(CHAMPION_KILL, 100_000, Some(1), None, None, Some(vec![2])),
            event(
                ELITE_MONSTER_KILL,
                200_000,
                Some(1),
                Some("RIFTHERALD"),
                None,
                None,
            ),
        ];

        let breakdown = objective_breakdown(&events, &teams());
        assert!(breakdown.by_actor.is_empty());
        assert!(breakdown.by_team.is_empty());
    }
}
