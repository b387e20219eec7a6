//! # Score Engine
//!
//! Implements the four-factor scoring model: from one participant's raw
//! stats, match duration, and pre-counted objective takedowns, compute the
//! economy, objectives, map-control, and error metric bundles plus their
//! normalized composite scores and the weighted overall score.
//!
//! Missing optional data never fails scoring; the affected fields are null
//! and a composite is null only when its primary driving metric is null.

use crate::error::ProcessingError;
use crate::models::raw_participant::Model as Participant;
use crate::models::{FactorScores, ScoreWeights};
use crate::scoring::challenges::ChallengeMetrics;
use crate::scoring::normalize::{self, scaled, scaled_inverted};

/// Per-participant objective takedown counts derived from timeline events.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveCounts {
    pub baron: i32,
    pub dragon: i32,
    pub tower: i32,
    /// Total objective takedowns landed by the participant's team.
    pub team_total: i32,
}

/// Match-level context a single participant row does not carry.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext {
    pub duration_seconds: i32,
    /// Total champion kills by the participant's team.
    pub team_kills: i32,
}

/// Fully computed metric bundles and scores for one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantScorecard {
    pub gold_per_minute: Option<f64>,
    pub cs_per_minute: Option<f64>,
    pub damage_per_minute: Option<f64>,
    pub laning_gold_exp_advantage: Option<f64>,
    pub max_level_lead_lane_opponent: Option<f64>,

    pub baron_takedowns: i32,
    pub dragon_takedowns: i32,
    pub tower_takedowns: i32,
    pub objective_participation_pct: Option<f64>,

    pub vision_score_per_minute: Option<f64>,
    pub control_wards_placed: Option<f64>,
    pub ward_takedowns: Option<f64>,
    pub vision_advantage_lane_opponent: Option<f64>,

    pub deaths_per_minute: Option<f64>,
    pub kill_participation_pct: Option<f64>,
    pub solo_deaths: Option<i32>,

    pub scores: FactorScores,
}

/// The four-factor score engine.
#[derive(Clone)]
pub struct ScoreEngine {
    weights: ScoreWeights,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

impl ScoreEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Score one participant.
    ///
    /// Fails only on structural problems: a non-positive match duration or a
    /// participant record with no player identifier.
    pub fn score_participant(
        &self,
        participant: &Participant,
        ctx: &MatchContext,
        objectives: &ObjectiveCounts,
    ) -> Result<ParticipantScorecard, ProcessingError> {
        if participant.puuid.is_empty() {
            return Err(ProcessingError::Validation(format!(
                "participant {} has no puuid",
                participant.id
            )));
        }
        if ctx.duration_seconds <= 0 {
            return Err(ProcessingError::Validation(format!(
                "match {} has non-positive duration {}",
                participant.match_id, ctx.duration_seconds
            )));
        }

        let minutes = f64::from(ctx.duration_seconds) / 60.0;
        let challenges = ChallengeMetrics::new(participant.challenges.as_ref());

        // economy bundle
        let gold_per_minute = Some(f64::from(participant.gold_earned) / minutes);
        let cs_per_minute = Some(f64::from(participant.total_cs) / minutes);
        let damage_per_minute = Some(f64::from(participant.damage_to_champions) / minutes);
        let laning_gold_exp_advantage = challenges.get_f64("laningPhaseGoldExpAdvantage");
        let max_level_lead_lane_opponent = challenges.get_f64("maxLevelLeadLaneOpponent");

        // objectives bundle
        let own_takedowns = objectives.baron + objectives.dragon + objectives.tower;
        let objective_participation_pct = if objectives.team_total > 0 {
            Some(f64::from(own_takedowns) / f64::from(objectives.team_total) * 100.0)
        } else {
            None
        };

        // map control bundle
        let vision_score_per_minute = Some(f64::from(participant.vision_score) / minutes);
        let control_wards_placed = challenges.get_f64("controlWardsPlaced");
        let ward_takedowns = challenges.get_f64("wardTakedowns");
        let vision_advantage_lane_opponent =
            challenges.get_f64("visionScoreAdvantageLaneOpponent");

        // error bundle
        let deaths_per_minute = Some(f64::from(participant.deaths) / minutes);
        let kill_participation_pct = if ctx.team_kills > 0 {
            Some(
                f64::from(participant.kills + participant.assists) / f64::from(ctx.team_kills)
                    * 100.0,
            )
        } else {
            None
        };
        let solo_deaths = challenges.get_i32("soloDeaths");

        let economy = bundle_score(
            gold_per_minute.map(|v| scaled(v, normalize::GOLD_PER_MINUTE)),
            &[
                cs_per_minute.map(|v| scaled(v, normalize::CS_PER_MINUTE)),
                damage_per_minute.map(|v| scaled(v, normalize::DAMAGE_PER_MINUTE)),
                laning_gold_exp_advantage.map(|v| scaled(v, normalize::LANE_GOLD_EXP_ADVANTAGE)),
                max_level_lead_lane_opponent.map(|v| scaled(v, normalize::LEVEL_LEAD)),
            ],
        );

        let objectives_score = bundle_score(
            objective_participation_pct
                .map(|v| scaled(v, normalize::OBJECTIVE_PARTICIPATION_PCT)),
            &[
                Some(scaled(f64::from(objectives.baron), normalize::BARON_TAKEDOWNS)),
                Some(scaled(f64::from(objectives.dragon), normalize::DRAGON_TAKEDOWNS)),
                Some(scaled(f64::from(objectives.tower), normalize::TOWER_TAKEDOWNS)),
            ],
        );

        let map_control = bundle_score(
            vision_score_per_minute.map(|v| scaled(v, normalize::VISION_SCORE_PER_MINUTE)),
            &[
                control_wards_placed.map(|v| scaled(v, normalize::CONTROL_WARDS_PLACED)),
                ward_takedowns.map(|v| scaled(v, normalize::WARD_TAKEDOWNS)),
                vision_advantage_lane_opponent.map(|v| scaled(v, normalize::VISION_ADVANTAGE)),
            ],
        );

        let errors = bundle_score(
            deaths_per_minute.map(|v| scaled_inverted(v, normalize::DEATHS_PER_MINUTE)),
            &[
                kill_participation_pct.map(|v| scaled(v, normalize::KILL_PARTICIPATION_PCT)),
                solo_deaths.map(|v| scaled_inverted(f64::from(v), normalize::SOLO_DEATHS)),
            ],
        );

        let overall = self.overall_score(economy, objectives_score, map_control, errors);

        Ok(ParticipantScorecard {
            gold_per_minute,
            cs_per_minute,
            damage_per_minute,
            laning_gold_exp_advantage,
            max_level_lead_lane_opponent,
            baron_takedowns: objectives.baron,
            dragon_takedowns: objectives.dragon,
            tower_takedowns: objectives.tower,
            objective_participation_pct,
            vision_score_per_minute,
            control_wards_placed,
            ward_takedowns,
            vision_advantage_lane_opponent,
            deaths_per_minute,
            kill_participation_pct,
            solo_deaths,
            scores: FactorScores {
                economy,
                objectives: objectives_score,
                map_control,
                errors,
                overall,
            },
        })
    }

    /// Weighted average of the non-null factor scores, weights renormalized
    /// to sum to 1. Null only when all four factors are null.
    fn overall_score(
        &self,
        economy: Option<f64>,
        objectives: Option<f64>,
        map_control: Option<f64>,
        errors: Option<f64>,
    ) -> Option<f64> {
        let weighted = [
            (economy, self.weights.economy),
            (objectives, self.weights.objectives),
            (map_control, self.weights.map_control),
            (errors, self.weights.errors),
        ];

        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for (score, weight) in weighted {
            if let Some(score) = score {
                total += score * weight;
                weight_sum += weight;
            }
        }

        if weight_sum > 0.0 {
            Some(total / weight_sum)
        } else {
            None
        }
    }
}

/// Mean of the available normalized metrics in a bundle.
///
/// Null when the bundle's primary driving metric is null; otherwise the
/// remaining null metrics are simply excluded from the mean.
fn bundle_score(primary: Option<f64>, rest: &[Option<f64>]) -> Option<f64> {
    let primary = primary?;
    let mut total = primary;
    let mut count = 1.0;
    for metric in rest.iter().flatten() {
        total += metric;
        count += 1.0;
    }
    Some(total / count)
}
