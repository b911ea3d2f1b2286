use crate::assumptions::{CostRates, FixedExpenses, StaffRoster};
use serde::Serialize;

/// Employer cost of one unit of salary: payroll taxes and benefits.
pub const PAYROLL_BURDEN: f64 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpenseBreakdown {
    pub variable_costs: f64,
    pub card_fees: f64,
    pub commissions: f64,
    pub staffing_costs: f64,
    pub fixed_costs: f64,
}

impl ExpenseBreakdown {
    /// Rates are consumed as given; nothing here is clamped.
    pub fn compute(
        net_sessions: f64,
        revenue: f64,
        rates: &CostRates,
        staff: &StaffRoster,
        fixed: &FixedExpenses,
    ) -> Self {
        let per_session = rates.variable_cost_per_session + rates.extra_variable_per_session;
        Self {
            variable_costs: net_sessions * per_session,
            card_fees: revenue * rates.card_fee_rate,
            commissions: revenue * rates.commission_rate,
            staffing_costs: staffing_cost(staff),
            fixed_costs: fixed_cost(fixed),
        }
    }

    pub fn total(&self) -> f64 {
        self.variable_costs
            + self.card_fees
            + self.commissions
            + self.staffing_costs
            + self.fixed_costs
    }
}

pub fn staffing_cost(staff: &StaffRoster) -> f64 {
    staff
        .lines()
        .fold(0.0, |acc, (_, line)| acc + line.qty * line.salary * PAYROLL_BURDEN)
}

pub fn fixed_cost(fixed: &FixedExpenses) -> f64 {
    fixed.amounts().fold(0.0, |acc, (_, amount)| acc + amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{FixedExpenseItem, StaffLine, StaffRole};

    #[test]
    fn baseline_staffing_applies_payroll_burden() {
        // 10x1900 + 3x2100 + 3x3100 + 2x2900 + 1x10000 = 50400 before burden
        let cost = staffing_cost(&StaffRoster::default());
        assert!((cost - 50400.0 * 1.8).abs() < 1e-6);
    }

    #[test]
    fn fixed_cost_is_a_flat_sum() {
        let fixed: FixedExpenses = [
            (FixedExpenseItem::Rent, 20000.0),
            (FixedExpenseItem::Electricity, 1500.5),
            (FixedExpenseItem::Internet, 199.5),
        ]
        .into_iter()
        .collect();
        assert_eq!(fixed_cost(&fixed), 21700.0);
    }

    #[test]
    fn revenue_based_fees_and_session_costs() {
        let rates = CostRates {
            variable_cost_per_session: 60.0,
            extra_variable_per_session: 5.0,
            commission_rate: 0.15,
            card_fee_rate: 0.05,
        };
        let staff: StaffRoster = [(StaffRole::Manager, StaffLine::new(1.0, 1000.0))]
            .into_iter()
            .collect();
        let fixed: FixedExpenses = [(FixedExpenseItem::Rent, 500.0)].into_iter().collect();

        let expenses = ExpenseBreakdown::compute(100.0, 10000.0, &rates, &staff, &fixed);
        assert_eq!(expenses.variable_costs, 6500.0);
        assert_eq!(expenses.card_fees, 500.0);
        assert_eq!(expenses.commissions, 1500.0);
        assert_eq!(expenses.staffing_costs, 1800.0);
        assert_eq!(expenses.fixed_costs, 500.0);
        assert_eq!(expenses.total(), 10800.0);
    }
}
