//! ESG Rating Entity
//!
//! ESG scores with their provenance, extracted from rating-agency coverage
//! or estimated by a language model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::lenient;
use crate::domain::services::completion_text;

const BASELINE_SCORE: u8 = 70;

/// Where an ESG rating came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EsgSource {
    Sustainalytics,
    Msci,
    SpGlobal,
    Cdp,
    AiEstimated,
}

impl std::str::FromStr for EsgSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sustainalytics" => Ok(EsgSource::Sustainalytics),
            "msci" => Ok(EsgSource::Msci),
            "sp-global" | "s&p global" | "sp_global" => Ok(EsgSource::SpGlobal),
            "cdp" => Ok(EsgSource::Cdp),
            "ai-estimated" => Ok(EsgSource::AiEstimated),
            _ => Err(format!("Unknown ESG source: {}", s)),
        }
    }
}

/// Confidence in an ESG rating
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EsgConfidence {
    High,
    Medium,
    #[default]
    Low,
}

impl std::str::FromStr for EsgConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(EsgConfidence::High),
            "medium" => Ok(EsgConfidence::Medium),
            "low" => Ok(EsgConfidence::Low),
            _ => Err(format!("Unknown confidence: {}", s)),
        }
    }
}

/// ESG rating (0..=100, higher is better) with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EsgRating {
    pub environmental: u8,
    pub social: u8,
    pub governance: u8,
    pub overall: u8,
    pub source: EsgSource,
    pub confidence: EsgConfidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl EsgRating {
    /// Conservative estimate used when nothing better is known
    pub fn baseline() -> Self {
        Self {
            environmental: BASELINE_SCORE,
            social: BASELINE_SCORE,
            governance: BASELINE_SCORE,
            overall: BASELINE_SCORE,
            source: EsgSource::AiEstimated,
            confidence: EsgConfidence::Low,
            risk_level: None,
            last_updated: None,
        }
    }

    /// Parse a model's rating answer.
    ///
    /// Missing or zero scores fall back to the baseline; a named source is only
    /// kept when the model claims to have found a real published score.
    pub fn from_completion(text: &str, today: NaiveDate) -> Option<Self> {
        let json = completion_text::extract_json_object(text)?;
        let data: Value = serde_json::from_str(json).ok()?;
        if !data.is_object() {
            return None;
        }

        let score = |key: &str| {
            data.get(key)
                .and_then(lenient::score_from_value)
                .filter(|s| *s > 0)
                .unwrap_or(BASELINE_SCORE)
        };
        let text_field = |key: &str| {
            data.get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("null"))
        };

        let found_real = data
            .get("foundRealScore")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let source = if found_real {
            text_field("source")
                .and_then(|s| s.parse().ok())
                .unwrap_or(EsgSource::AiEstimated)
        } else {
            EsgSource::AiEstimated
        };

        Some(Self {
            environmental: score("environmental"),
            social: score("social"),
            governance: score("governance"),
            overall: score("overall"),
            source,
            confidence: text_field("confidence")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            risk_level: text_field("riskLevel").map(str::to_string),
            last_updated: Some(today),
        })
    }
}
