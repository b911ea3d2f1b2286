//! Presentation-side summaries of a projection.

use crate::format::{format_currency, format_number};
use crate::projection::{is_valid_sum, ProjectionResult};
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Whether headline figures are shown per month or per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultPeriod {
    #[default]
    Monthly,
    Annual,
}

impl ResultPeriod {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Monthly => 1.0,
            Self::Annual => MONTHS_PER_YEAR,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Annual => "Annual",
        }
    }
}

impl std::str::FromStr for ResultPeriod {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "year" | "yearly" => Ok(Self::Annual),
            other => Err(format!("unknown period '{other}' (expected monthly or annual)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub headline: String,
    pub details: Vec<SummaryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub period: ResultPeriod,
    pub revenue: SummaryCard,
    pub expenses: SummaryCard,
    pub result: SummaryCard,
    pub warnings: Vec<String>,
}

impl ProjectionSummary {
    pub fn new(projection: &ProjectionResult, period: ResultPeriod) -> Self {
        let scale = period.multiplier();
        let title = |noun: &str| format!("{} {}", period.label(), noun);

        let revenue = SummaryCard {
            title: title("revenue"),
            headline: format_currency(projection.revenue * scale),
            details: vec![
                SummaryLine::new("Average ticket", format_currency(projection.avg_price_overall)),
                SummaryLine::new("Net sessions", format_number(projection.net_sessions)),
                SummaryLine::new(
                    "Annual revenue",
                    format_currency(projection.revenue * MONTHS_PER_YEAR),
                ),
            ],
        };

        let expenses = SummaryCard {
            title: title("expenses"),
            headline: format_currency(projection.total_expenses * scale),
            details: vec![
                SummaryLine::new("Variable", format_currency(projection.variable_costs)),
                SummaryLine::new("Commissions", format_currency(projection.commissions)),
                SummaryLine::new("Card fees", format_currency(projection.card_fees)),
                SummaryLine::new("Fixed", format_currency(projection.fixed_costs)),
                SummaryLine::new("Staffing", format_currency(projection.staffing_costs)),
            ],
        };

        let result = SummaryCard {
            title: title("result"),
            headline: format_currency(projection.result * scale),
            details: vec![SummaryLine::new(
                "Annual result",
                format_currency(projection.result * MONTHS_PER_YEAR),
            )],
        };

        Self {
            period,
            revenue,
            expenses,
            result,
            warnings: mix_warnings(projection),
        }
    }

    pub fn cards(&self) -> [&SummaryCard; 3] {
        [&self.revenue, &self.expenses, &self.result]
    }
}

fn mix_warnings(projection: &ProjectionResult) -> Vec<String> {
    [
        ("Package", projection.package_mix_sum),
        ("Service", projection.service_mix_sum),
    ]
    .into_iter()
    .filter(|(_, sum)| !is_valid_sum(*sum))
    .map(|(mix, sum)| {
        format!(
            "{mix} mix sums to {}% and should total 100%; adjust the percentages",
            format_number(sum)
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::AssumptionRecord;
    use crate::catalog::ServiceId;
    use crate::projection::ProjectionEngine;

    #[test]
    fn annual_period_scales_headlines_only() {
        let engine = ProjectionEngine::standard();
        let projection = engine.compute(&engine.baseline());

        let monthly = ProjectionSummary::new(&projection, ResultPeriod::Monthly);
        let annual = ProjectionSummary::new(&projection, ResultPeriod::Annual);

        assert_eq!(monthly.revenue.title, "Monthly revenue");
        assert_eq!(annual.revenue.title, "Annual revenue");
        assert_eq!(
            annual.revenue.headline,
            format_currency(projection.revenue * 12.0)
        );
        assert_eq!(monthly.revenue.details, annual.revenue.details);
        assert_eq!(monthly.expenses.details.len(), 5);
        assert!(monthly.warnings.is_empty());
    }

    #[test]
    fn invalid_service_mix_produces_a_warning() {
        let mut assumptions = AssumptionRecord::baseline();
        assumptions
            .service_mix
            .set(ServiceId::from("relaxante-60"), 4.2);
        let projection = ProjectionEngine::standard().compute(&assumptions);
        let summary = ProjectionSummary::new(&projection, ResultPeriod::Monthly);

        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].starts_with("Service mix sums to 90"));
    }

    #[test]
    fn period_parses_from_cli_text() {
        assert_eq!("Annual".parse::<ResultPeriod>(), Ok(ResultPeriod::Annual));
        assert_eq!("month".parse::<ResultPeriod>(), Ok(ResultPeriod::Monthly));
        assert!("weekly".parse::<ResultPeriod>().is_err());
    }
}
