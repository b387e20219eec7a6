//! Metric normalization.
//!
//! Every metric maps linearly onto [0, 100] between a per-metric floor and
//! ceiling, clamped at both ends. Bands are calibrated against typical
//! ranked-match distributions; values outside the band saturate rather than
//! distort the composite.

/// Floor/ceiling reference band for one metric.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub floor: f64,
    pub ceiling: f64,
}

/// Linear clamp-to-[0, 100] scaling where higher raw values score higher.
pub fn scaled(value: f64, band: Band) -> f64 {
    ((value - band.floor) / (band.ceiling - band.floor) * 100.0).clamp(0.0, 100.0)
}

/// Scaling for metrics where lower raw values are better (e.g. deaths).
pub fn scaled_inverted(value: f64, band: Band) -> f64 {
    100.0 - scaled(value, band)
}

// economy
pub const GOLD_PER_MINUTE: Band = Band { floor: 300.0, ceiling: 600.0 };
pub const CS_PER_MINUTE: Band = Band { floor: 4.0, ceiling: 10.0 };
pub const DAMAGE_PER_MINUTE: Band = Band { floor: 400.0, ceiling: 1200.0 };
/// Laning gold/exp advantage over the lane opponent, fractional.
pub const LANE_GOLD_EXP_ADVANTAGE: Band = Band { floor: -0.5, ceiling: 0.5 };
pub const LEVEL_LEAD: Band = Band { floor: -1.0, ceiling: 2.0 };

// objectives
pub const BARON_TAKEDOWNS: Band = Band { floor: 0.0, ceiling: 2.0 };
pub const DRAGON_TAKEDOWNS: Band = Band { floor: 0.0, ceiling: 4.0 };
pub const TOWER_TAKEDOWNS: Band = Band { floor: 0.0, ceiling: 6.0 };
pub const OBJECTIVE_PARTICIPATION_PCT: Band = Band { floor: 20.0, ceiling: 80.0 };

// map control
pub const VISION_SCORE_PER_MINUTE: Band = Band { floor: 0.5, ceiling: 2.5 };
pub const CONTROL_WARDS_PLACED: Band = Band { floor: 0.0, ceiling: 8.0 };
pub const WARD_TAKEDOWNS: Band = Band { floor: 0.0, ceiling: 12.0 };
pub const VISION_ADVANTAGE: Band = Band { floor: -0.5, ceiling: 1.0 };

// errors
pub const DEATHS_PER_MINUTE: Band = Band { floor: 0.1, ceiling: 0.5 };
pub const KILL_PARTICIPATION_PCT: Band = Band { floor: 30.0, ceiling: 80.0 };
pub const SOLO_DEATHS: Band = Band { floor: 0.0, ceiling: 4.0 };
