use super::expenses::ExpenseBreakdown;
use super::pricing::ServicePrice;
use super::volume::SessionVolume;
use crate::catalog::TierPrices;
use serde::Serialize;

/// Every intermediate and final figure of one monthly projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub package_mix_sum: f64,
    pub service_mix_sum: f64,
    /// Both mixes sum to 100 within tolerance.
    pub mix_is_valid: bool,
    pub gross_sessions: f64,
    pub net_sessions: f64,
    pub avg_price_by_service: Vec<ServicePrice>,
    pub avg_price_by_package: TierPrices,
    pub avg_price_overall: f64,
    pub revenue: f64,
    pub variable_costs: f64,
    pub card_fees: f64,
    pub commissions: f64,
    pub staffing_costs: f64,
    pub fixed_costs: f64,
    pub total_expenses: f64,
    pub result: f64,
}

pub(crate) struct MixCheck {
    pub(crate) package_sum: f64,
    pub(crate) package_valid: bool,
    pub(crate) service_sum: f64,
    pub(crate) service_valid: bool,
}

pub(crate) struct PricingOutcome {
    pub(crate) by_service: Vec<ServicePrice>,
    pub(crate) by_package: TierPrices,
    pub(crate) overall: f64,
}

pub(crate) fn revenue(volume: &SessionVolume, overall_price: f64) -> f64 {
    volume.net_sessions * overall_price
}

pub(crate) fn assemble(
    mixes: MixCheck,
    volume: SessionVolume,
    pricing: PricingOutcome,
    revenue: f64,
    expenses: ExpenseBreakdown,
) -> ProjectionResult {
    let total_expenses = expenses.total();
    ProjectionResult {
        package_mix_sum: mixes.package_sum,
        service_mix_sum: mixes.service_sum,
        mix_is_valid: mixes.package_valid && mixes.service_valid,
        gross_sessions: volume.gross_sessions,
        net_sessions: volume.net_sessions,
        avg_price_by_service: pricing.by_service,
        avg_price_by_package: pricing.by_package,
        avg_price_overall: pricing.overall,
        revenue,
        variable_costs: expenses.variable_costs,
        card_fees: expenses.card_fees,
        commissions: expenses.commissions,
        staffing_costs: expenses.staffing_costs,
        fixed_costs: expenses.fixed_costs,
        total_expenses,
        result: revenue - total_expenses,
    }
}
