//! Wire types for the generation endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Year groups served by the generator (UK secondary, years 7 through 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearGroup {
    #[serde(rename = "7")]
    Year7,
    #[serde(rename = "8")]
    Year8,
    #[serde(rename = "9")]
    Year9,
    #[serde(rename = "10")]
    Year10,
    #[serde(rename = "11")]
    Year11,
}

impl YearGroup {
    /// The bare year number as it appears on the wire and in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            YearGroup::Year7 => "7",
            YearGroup::Year8 => "8",
            YearGroup::Year9 => "9",
            YearGroup::Year10 => "10",
            YearGroup::Year11 => "11",
        }
    }
}

impl Default for YearGroup {
    fn default() -> Self {
        YearGroup::Year10
    }
}

impl fmt::Display for YearGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year {}", self.as_str())
    }
}

impl FromStr for YearGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_prefix("Year ")
            .or_else(|| trimmed.strip_prefix("year "))
            .unwrap_or(trimmed);
        match number {
            "7" => Ok(YearGroup::Year7),
            "8" => Ok(YearGroup::Year8),
            "9" => Ok(YearGroup::Year9),
            "10" => Ok(YearGroup::Year10),
            "11" => Ok(YearGroup::Year11),
            _ => Err(format!("unknown year group '{}' (expected 7-11)", s)),
        }
    }
}

/// Request body for POST /api/generate.
///
/// `topic` defaults to empty when absent so the handler can answer with the
/// documented 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(rename = "yearGroup", default)]
    pub year_group: YearGroup,
}

/// Successful generation response: the raw labelled text blob from the
/// model. Clients segment it into tiers themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub tasks: String,
}

/// Flat error body used for every non-200 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response for GET /v1/health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Free-preview generations left before the gate locks.
    pub requests_remaining: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_group_wire_format() {
        let json = serde_json::to_string(&YearGroup::Year9).unwrap();
        assert_eq!(json, "\"9\"");

        let parsed: YearGroup = serde_json::from_str("\"11\"").unwrap();
        assert_eq!(parsed, YearGroup::Year11);
    }

    #[test]
    fn test_year_group_from_str() {
        assert_eq!("10".parse::<YearGroup>().unwrap(), YearGroup::Year10);
        assert_eq!("Year 7".parse::<YearGroup>().unwrap(), YearGroup::Year7);
        assert!("6".parse::<YearGroup>().is_err());
    }

    #[test]
    fn test_generate_request_defaults() {
        // Missing fields must deserialize so the handler owns validation.
        let req: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.topic, "");
        assert_eq!(req.year_group, YearGroup::Year10);
    }

    #[test]
    fn test_generate_request_camel_case() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"topic":"Macbeth ambition","yearGroup":"8"}"#).unwrap();
        assert_eq!(req.topic, "Macbeth ambition");
        assert_eq!(req.year_group, YearGroup::Year8);
    }
}
