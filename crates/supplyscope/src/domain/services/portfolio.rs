//! Rule-based portfolio summary, used when no model is reachable

use crate::domain::entities::{PortfolioSupplier, RiskLevel, SupplierTrend};

/// Markdown analysis built from risk levels and trends alone
pub fn fallback_analysis(suppliers: &[PortfolioSupplier]) -> String {
    let high_risk: Vec<&PortfolioSupplier> = suppliers
        .iter()
        .filter(|s| s.risk == RiskLevel::High)
        .collect();
    let declining = suppliers.iter().filter(|s| s.trend == SupplierTrend::Down);
    let improving = suppliers.iter().filter(|s| s.trend == SupplierTrend::Up);

    let mut analysis = String::from("## Portfolio Analysis\n\n");

    if !high_risk.is_empty() {
        analysis.push_str("**🚨 Critical Risks:**\n");
        for s in &high_risk {
            analysis.push_str(&format!(
                "- {} (Score: {}/100) - Requires immediate attention\n",
                s.name, s.score
            ));
        }
        analysis.push('\n');
    }

    let declining: Vec<String> = declining
        .map(|s| format!("- {} ({}) - Monitor closely\n", s.name, s.category))
        .collect();
    if !declining.is_empty() {
        analysis.push_str("**📉 Declining Suppliers:**\n");
        analysis.push_str(&declining.concat());
        analysis.push('\n');
    }

    let improving: Vec<String> = improving
        .map(|s| {
            format!(
                "- {} (Score: {}/100) - Consider expanding relationship\n",
                s.name, s.score
            )
        })
        .collect();
    if !improving.is_empty() {
        analysis.push_str("**📈 Positive Trends:**\n");
        analysis.push_str(&improving.concat());
        analysis.push('\n');
    }

    analysis.push_str("**Recommendations:**\n");
    analysis.push_str(&format!(
        "- Develop contingency plans for {} high-risk suppliers\n",
        high_risk.len()
    ));
    analysis.push_str("- Review contracts with declining suppliers\n");
    analysis.push_str("- Leverage strong performers for additional capacity\n");
    analysis
}
