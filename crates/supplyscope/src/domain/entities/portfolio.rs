//! Portfolio Entities
//!
//! Suppliers as tracked on the dashboard, submitted for portfolio analysis.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::{lenient, RiskLevel};

/// Score trend of a supplier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SupplierTrend {
    Up,
    Down,
    #[default]
    Flat,
}

impl From<String> for SupplierTrend {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "up" => SupplierTrend::Up,
            "down" => SupplierTrend::Down,
            _ => SupplierTrend::Flat,
        }
    }
}

/// A supplier in the user's portfolio. Dashboard data is loosely typed:
/// numeric ids, string scores and unknown labels fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PortfolioSupplier {
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub risk: RiskLevel,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub trend: SupplierTrend,
}

impl PortfolioSupplier {
    pub fn new(name: &str, category: &str, risk: RiskLevel, score: f64, trend: SupplierTrend) -> Self {
        Self {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            category: category.to_string(),
            risk,
            score,
            trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loosely_typed_fields() {
        let suppliers: Vec<PortfolioSupplier> = serde_json::from_value(json!([
            {"id": 1, "name": "Acme", "category": "Steel", "risk": "HIGH", "score": "41.5", "trend": "down"},
            {"name": "Globex", "risk": 3, "score": null, "trend": true}
        ]))
        .unwrap();

        assert_eq!(suppliers[0].id, "1");
        assert_eq!(suppliers[0].risk, RiskLevel::High);
        assert_eq!(suppliers[0].score, 41.5);
        assert_eq!(suppliers[0].trend, SupplierTrend::Down);

        assert_eq!(suppliers[1].id, "");
        assert_eq!(suppliers[1].risk, RiskLevel::default());
        assert_eq!(suppliers[1].score, 0.0);
        assert_eq!(suppliers[1].trend, SupplierTrend::Flat);
    }

    #[test]
    fn test_non_object_entry_is_rejected() {
        assert!(serde_json::from_value::<PortfolioSupplier>(json!(42)).is_err());
    }
}
