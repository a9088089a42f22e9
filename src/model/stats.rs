//! Time-series and per-rocket statistics served by `/api/launches/stats`

use super::json::{number, number_or_zero};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YearlyStat {
    pub year: i32,
    /// Percentage, 0-100
    #[serde(deserialize_with = "number")]
    pub success_rate: f64,
    pub total_launches: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RocketStat {
    pub rocket: String,
    /// kg
    #[serde(deserialize_with = "number_or_zero")]
    pub avg_payload: f64,
    /// kg
    #[serde(deserialize_with = "number_or_zero")]
    pub total_payload: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsPayload {
    pub yearly_stats: Vec<YearlyStat>,
    pub rocket_stats: Vec<RocketStat>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_ignores_extra_columns() {
        let s = stats();
        assert_eq!(s.yearly_stats.len(), 2);
        assert_eq!(s.yearly_stats[1].total_launches, 31);
        assert_eq!(s.rocket_stats[0].rocket, "Falcon 9");
        assert_eq!(s.rocket_stats[0].total_payload, 150000.0);
    }

    #[test]
    fn test_parse_decimal_strings_and_nulls() {
        let json = r#"{
            "yearly_stats": [{"year": 2006, "success_rate": "0.0", "total_launches": 1}],
            "rocket_stats": [{"rocket": "Falcon 1", "avg_payload": null, "total_payload": "20.0"}]
        }"#;
        let s: StatsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(s.yearly_stats[0].success_rate, 0.0);
        assert_eq!(s.rocket_stats[0].avg_payload, 0.0);
        assert_eq!(s.rocket_stats[0].total_payload, 20.0);
    }

    #[test]
    fn test_missing_sequence_is_rejected() {
        let json = r#"{"yearly_stats": []}"#;
        assert!(serde_json::from_str::<StatsPayload>(json).is_err());
    }
}
