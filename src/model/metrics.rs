//! Aggregate metrics payload served by `/api/launches/metrix`

use super::json::Entries;
use serde::Deserialize;

/// Average payload mass split by launch outcome, in kg
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgPayloadMass {
    pub successful_launches: f64,
    pub failed_launches: f64,
}

/// All fields are required; a missing one fails decoding
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsPayload {
    pub total_launches: u64,
    pub success_rate: f64,
    pub reused_rockets_percentage: f64,
    pub payload_type_distribution: Entries<u64>,
    pub launches_by_rocket_type: Entries<u64>,
    pub avg_payload_mass: AvgPayloadMass,
    pub launch_frequency_by_year: Entries<u64>,
    pub success_rate_by_nationality: Entries<f64>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let m = metrics();
        assert_eq!(m.total_launches, 205);
        assert_eq!(m.success_rate, 97.5);
        assert_eq!(m.avg_payload_mass.failed_launches, 1200.0);
        assert_eq!(m.launches_by_rocket_type.len(), 3);
        assert_eq!(
            m.success_rate_by_nationality.0[0],
            ("USA".to_string(), 98.1)
        );
    }

    #[test]
    fn test_missing_nested_field_is_rejected() {
        let json = METRICS_JSON.replace(r#""failedLaunches": 1200"#, r#""other": 1"#);
        assert!(serde_json::from_str::<MetricsPayload>(&json).is_err());
    }

    #[test]
    fn test_missing_top_level_field_is_rejected() {
        let json = r#"{"totalLaunches": 1, "successRate": 100}"#;
        assert!(serde_json::from_str::<MetricsPayload>(json).is_err());
    }
}
