//! Typed optional-lookup view over the raw challenge metrics map.
//!
//! The upstream API attaches an open-ended map of 100+ heuristic fields to
//! each participant; any key may be absent in any match. Every accessor
//! returns `None` for missing keys or wrong-typed values, never an error.

use serde_json::Value as JsonValue;

/// Borrowed view over a participant's challenge metrics.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeMetrics<'a> {
    map: Option<&'a JsonValue>,
}

impl<'a> ChallengeMetrics<'a> {
    pub fn new(map: Option<&'a JsonValue>) -> Self {
        Self { map }
    }

    /// Get a numeric challenge field, or `None` when absent or non-numeric.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.map?.get(key)?.as_f64()
    }

    /// Get an integral challenge field, or `None` when absent or non-numeric.
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get_f64(key).map(|v| v as i32)
    }

    /// Get a boolean challenge field, or `None` when absent or non-boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.map?.get(key)?.as_bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_map_yields_none() {
        let metrics = ChallengeMetrics::new(None);
        assert_eq!(metrics.get_f64("laningPhaseGoldExpAdvantage"), None);
        assert_eq!(metrics.get_bool("firstTurretKilled"), None);
    }

    #[test]
    fn test_missing_key_yields_none() {
        let map = json!({"controlWardsPlaced": 4});
        let metrics = ChallengeMetrics::new(Some(&map));
        assert_eq!(metrics.get_f64("wardTakedowns"), None);
    }

    #[test]
    fn test_present_keys() {
        let map = json!({
            "controlWardsPlaced": 4,
            "laningPhaseGoldExpAdvantage": -0.12,
            "firstTurretKilled": true
        });
        let metrics = ChallengeMetrics::new(Some(&map));
        assert_eq!(metrics.get_f64("controlWardsPlaced"), Some(4.0));
        assert_eq!(metrics.get_i32("controlWardsPlaced"), Some(4));
        assert_eq!(metrics.get_f64("laningPhaseGoldExpAdvantage"), Some(-0.12));
        assert_eq!(metrics.get_bool("firstTurretKilled"), Some(true));
    }

    #[test]
    fn test_wrong_type_yields_none() {
        let map = json!({"controlWardsPlaced": "four"});
        let metrics = ChallengeMetrics::new(Some(&map));
        assert_eq!(metrics.get_f64("controlWardsPlaced"), None);
    }
}
