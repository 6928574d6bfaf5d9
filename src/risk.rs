//! Read-only view of the external risk scoring service's response.
//!
//! The crate never computes or interprets risk; it parses what the service
//! returned so callers can display it next to the compliance issues.

use crate::error::{RemitError, RemitResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    #[serde(default)]
    pub reason: String,
    pub status: FactorStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    #[serde(deserialize_with = "clamped_score")]
    pub risk_score: u8,
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    pub fn from_json_str(json: &str) -> RemitResult<Self> {
        serde_json::from_str(json).map_err(|source| RemitError::Json {
            context: "risk assessment".to_string(),
            source,
        })
    }

    pub fn failed_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.risk_factors
            .iter()
            .filter(|f| f.status == FactorStatus::Fail)
    }
}

/// Services sometimes send fractional or out-of-range scores.
fn clamped_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_service_response() {
        let json = r#"{
            "overallRiskLevel": "Medium",
            "riskScore": 42,
            "riskFactors": [
                {"factor": "Sanctions", "reason": "no hit", "status": "pass"},
                {"factor": "Amount", "reason": "above threshold", "status": "fail"}
            ],
            "recommendations": ["Verify source of funds"]
        }"#;
        let assessment = RiskAssessment::from_json_str(json).unwrap();
        assert_eq!(assessment.overall_risk_level, RiskLevel::Medium);
        assert_eq!(assessment.risk_score, 42);
        assert_eq!(assessment.failed_factors().count(), 1);
        assert_eq!(assessment.recommendations.len(), 1);
    }

    #[test]
    fn test_score_is_clamped() {
        let high = RiskAssessment::from_json_str(r#"{"overallRiskLevel":"High","riskScore":180}"#)
            .unwrap();
        assert_eq!(high.risk_score, 100);
        let low = RiskAssessment::from_json_str(r#"{"overallRiskLevel":"Low","riskScore":-3.5}"#)
            .unwrap();
        assert_eq!(low.risk_score, 0);
        assert!(low.risk_factors.is_empty());
    }

    #[test]
    fn test_rejects_unknown_level() {
        let err = RiskAssessment::from_json_str(r#"{"overallRiskLevel":"Severe","riskScore":1}"#)
            .unwrap_err();
        assert!(matches!(err, RemitError::Json { .. }));
    }
}
