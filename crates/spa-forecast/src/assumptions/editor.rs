use super::{AssumptionRecord, FixedExpenseItem, StaffLine, StaffRole, TicketOverride};
use crate::catalog::{PackageTier, ServiceCatalog, ServiceId};
use tracing::debug;

/// Parses user-typed numbers, accepting a decimal comma. Anything unusable becomes 0.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    trimmed
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Scalar assumption fields that are edited one value at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    HotDailySessions,
    ColdDailySessions,
    HotDays,
    ColdDays,
    NoShowRate,
    VariableCostPerSession,
    ExtraVariablePerSession,
    CommissionRate,
    CardFeeRate,
}

impl NumericField {
    /// Rates are typed as percents and stored as fractions.
    pub const fn is_percent(self) -> bool {
        matches!(self, Self::NoShowRate | Self::CommissionRate | Self::CardFeeRate)
    }

    fn slot(self, record: &mut AssumptionRecord) -> &mut f64 {
        match self {
            Self::HotDailySessions => &mut record.volume.hot_daily_sessions,
            Self::ColdDailySessions => &mut record.volume.cold_daily_sessions,
            Self::HotDays => &mut record.volume.hot_days,
            Self::ColdDays => &mut record.volume.cold_days,
            Self::NoShowRate => &mut record.volume.no_show_rate,
            Self::VariableCostPerSession => &mut record.rates.variable_cost_per_session,
            Self::ExtraVariablePerSession => &mut record.rates.extra_variable_per_session,
            Self::CommissionRate => &mut record.rates.commission_rate,
            Self::CardFeeRate => &mut record.rates.card_fee_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffField {
    Quantity,
    Salary,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("service {0} is not in the catalog")]
    UnknownService(String),
}

/// Working copy of the assumptions plus the defaults it can be reset to.
#[derive(Debug, Clone)]
pub struct AssumptionEditor {
    services: Vec<ServiceId>,
    defaults: AssumptionRecord,
    working: AssumptionRecord,
}

impl AssumptionEditor {
    pub fn new(catalog: &ServiceCatalog) -> Self {
        let defaults = AssumptionRecord::baseline_for(catalog);
        Self::with_assumptions(catalog, defaults.clone(), defaults)
    }

    /// Starts editing from `working` while still resetting to `defaults`.
    pub fn with_assumptions(
        catalog: &ServiceCatalog,
        defaults: AssumptionRecord,
        working: AssumptionRecord,
    ) -> Self {
        Self {
            services: catalog.ids().cloned().collect(),
            defaults,
            working,
        }
    }

    pub fn assumptions(&self) -> &AssumptionRecord {
        &self.working
    }

    pub fn into_assumptions(self) -> AssumptionRecord {
        self.working
    }

    pub fn reset(&mut self) {
        self.working = self.defaults.clone();
        debug!("assumptions reset to defaults");
    }

    pub fn set_value(&mut self, field: NumericField, raw: &str) {
        let value = parse_number(raw);
        let value = if field.is_percent() { value / 100.0 } else { value };
        *field.slot(&mut self.working) = value;
    }

    pub fn set_package_mix(&mut self, tier: PackageTier, raw: &str) {
        self.working.package_mix.set(tier, parse_number(raw));
    }

    pub fn set_staff(&mut self, role: StaffRole, field: StaffField, raw: &str) {
        let value = parse_number(raw);
        let current = self.working.staff.get(role);
        let line = match field {
            StaffField::Quantity => StaffLine::new(value, current.salary),
            StaffField::Salary => StaffLine::new(current.qty, value),
        };
        self.working.staff.set(role, line);
    }

    pub fn set_fixed_expense(&mut self, item: FixedExpenseItem, raw: &str) {
        self.working.fixed_expenses.set(item, parse_number(raw));
    }

    /// Stores a service share, capped so the whole mix cannot exceed 100.
    /// Blank input leaves the current value untouched.
    pub fn commit_service_mix(&mut self, id: &str, raw: &str) -> Result<(), EditError> {
        let id = self.known_service(id)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let requested = parse_number(trimmed).max(0.0);
        let others = self.working.service_mix.sum_excluding(&id);
        let allowed = (100.0 - others).max(0.0);
        let value = requested.min(allowed);
        if value < requested {
            debug!(service = %id, requested, allowed, "service share capped");
        }
        self.working.service_mix.set(id, value);
        Ok(())
    }

    /// Pins a manual ticket price. Blank input goes back to the blended price.
    pub fn commit_ticket_override(&mut self, id: &str, raw: &str) -> Result<(), EditError> {
        let id = self.known_service(id)?;
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            TicketOverride::Blended
        } else {
            TicketOverride::Manual(parse_number(trimmed).max(0.0))
        };
        self.working.ticket_overrides.apply(id, value);
        Ok(())
    }

    fn known_service(&self, id: &str) -> Result<ServiceId, EditError> {
        self.services
            .iter()
            .find(|known| known.as_str() == id)
            .cloned()
            .ok_or_else(|| EditError::UnknownService(id.to_string()))
    }
}
