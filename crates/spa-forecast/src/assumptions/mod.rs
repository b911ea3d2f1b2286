//! The assumption record: every input the projection engine reads.

mod editor;

pub use editor::{parse_number, AssumptionEditor, EditError, NumericField, StaffField};

use crate::catalog::{PackageTier, ServiceCatalog, ServiceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Complete input set for one projection. Partial input goes through [`AssumptionPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionRecord {
    pub volume: VolumeAssumptions,
    pub package_mix: PackageMix,
    pub service_mix: ServiceMix,
    pub ticket_overrides: TicketOverrides,
    pub rates: CostRates,
    pub staff: StaffRoster,
    pub fixed_expenses: FixedExpenses,
}

static BASELINE: OnceLock<AssumptionRecord> = OnceLock::new();

impl AssumptionRecord {
    /// Fresh copy of the canonical defaults for the standard catalog.
    ///
    /// The canonical record is never handed out by reference, so callers may mutate
    /// the returned value freely.
    pub fn baseline() -> Self {
        BASELINE
            .get_or_init(|| Self::baseline_for(&ServiceCatalog::standard()))
            .clone()
    }

    /// Defaults with the service mix spread evenly across `catalog`.
    pub fn baseline_for(catalog: &ServiceCatalog) -> Self {
        Self {
            volume: VolumeAssumptions::default(),
            package_mix: PackageMix::default(),
            service_mix: ServiceMix::even(catalog),
            ticket_overrides: TicketOverrides::default(),
            rates: CostRates::default(),
            staff: StaffRoster::default(),
            fixed_expenses: FixedExpenses::default(),
        }
    }
}

impl Default for AssumptionRecord {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Assumptions as callers send them: any group may be left out and is then taken
/// from the baseline of the catalog being projected. Fields missing inside a group
/// take that group's standard defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssumptionPatch {
    pub volume: Option<VolumeAssumptions>,
    pub package_mix: Option<PackageMix>,
    pub service_mix: Option<ServiceMix>,
    pub ticket_overrides: Option<TicketOverrides>,
    pub rates: Option<CostRates>,
    pub staff: Option<StaffRoster>,
    pub fixed_expenses: Option<FixedExpenses>,
}

impl AssumptionPatch {
    pub fn apply_to(self, base: AssumptionRecord) -> AssumptionRecord {
        AssumptionRecord {
            volume: self.volume.unwrap_or(base.volume),
            package_mix: self.package_mix.unwrap_or(base.package_mix),
            service_mix: self.service_mix.unwrap_or(base.service_mix),
            ticket_overrides: self.ticket_overrides.unwrap_or(base.ticket_overrides),
            rates: self.rates.unwrap_or(base.rates),
            staff: self.staff.unwrap_or(base.staff),
            fixed_expenses: self.fixed_expenses.unwrap_or(base.fixed_expenses),
        }
    }
}

/// Attendance assumptions. Hot days are the busy days of the month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeAssumptions {
    pub hot_daily_sessions: f64,
    pub cold_daily_sessions: f64,
    pub hot_days: f64,
    pub cold_days: f64,
    /// Fraction of booked sessions lost to no-shows, 0..=1.
    pub no_show_rate: f64,
}

impl Default for VolumeAssumptions {
    fn default() -> Self {
        Self {
            hot_daily_sessions: 23.0,
            cold_daily_sessions: 14.0,
            hot_days: 8.0,
            cold_days: 22.0,
            no_show_rate: 0.104,
        }
    }
}

/// Percent of clients buying each package tier. Intended, not required, to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMix {
    pub full: f64,
    pub p5: f64,
    pub p10: f64,
    pub p20: f64,
}

impl PackageMix {
    pub fn get(&self, tier: PackageTier) -> f64 {
        match tier {
            PackageTier::Full => self.full,
            PackageTier::Pack5 => self.p5,
            PackageTier::Pack10 => self.p10,
            PackageTier::Pack20 => self.p20,
        }
    }

    pub fn set(&mut self, tier: PackageTier, percent: f64) {
        match tier {
            PackageTier::Full => self.full = percent,
            PackageTier::Pack5 => self.p5 = percent,
            PackageTier::Pack10 => self.p10 = percent,
            PackageTier::Pack20 => self.p20 = percent,
        }
    }

    pub fn entries(&self) -> [(PackageTier, f64); 4] {
        PackageTier::ordered().map(|tier| (tier, self.get(tier)))
    }
}

impl Default for PackageMix {
    fn default() -> Self {
        Self {
            full: 40.0,
            p5: 30.0,
            p10: 20.0,
            p20: 10.0,
        }
    }
}

/// Percent of session volume per service. Services without an entry weigh zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceMix(BTreeMap<ServiceId, f64>);

impl ServiceMix {
    /// Splits 100% across the catalog in one-decimal steps; the last service takes
    /// whatever remains so the total is 100.
    pub fn even(catalog: &ServiceCatalog) -> Self {
        let count = catalog.len();
        let mut mix = BTreeMap::new();
        if count == 0 {
            return Self(mix);
        }

        let base = ((100.0 / count as f64) * 10.0).floor() / 10.0;
        let mut remaining = 100.0;
        for (index, id) in catalog.ids().enumerate() {
            let value = if index == count - 1 {
                (remaining * 10.0_f64).round() / 10.0
            } else {
                base
            };
            mix.insert(id.clone(), value);
            remaining -= value;
        }
        Self(mix)
    }

    pub fn get(&self, id: &ServiceId) -> Option<f64> {
        self.0.get(id).copied()
    }

    pub fn set(&mut self, id: ServiceId, percent: f64) {
        self.0.insert(id, percent);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ServiceId, f64)> + '_ {
        self.0.iter().map(|(id, value)| (id, *value))
    }

    pub(crate) fn sum_excluding(&self, excluded: &ServiceId) -> f64 {
        self.entries()
            .filter(|(id, _)| *id != excluded)
            .map(|(_, value)| value)
            .sum()
    }
}

impl FromIterator<(ServiceId, f64)> for ServiceMix {
    fn from_iter<I: IntoIterator<Item = (ServiceId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether a service is priced from the package mix or pinned to a manual ticket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TicketOverride {
    Manual(f64),
    Blended,
}

/// Sparse manual ticket prices. A missing key means the blended price applies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketOverrides(BTreeMap<ServiceId, f64>);

impl TicketOverrides {
    pub fn lookup(&self, id: &ServiceId) -> TicketOverride {
        match self.0.get(id) {
            Some(price) => TicketOverride::Manual(*price),
            None => TicketOverride::Blended,
        }
    }

    /// `Blended` removes the key; there is no stored "no override" value.
    pub fn apply(&mut self, id: ServiceId, value: TicketOverride) {
        match value {
            TicketOverride::Manual(price) => {
                self.0.insert(id, price);
            }
            TicketOverride::Blended => {
                self.0.remove(&id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    pub variable_cost_per_session: f64,
    pub extra_variable_per_session: f64,
    pub commission_rate: f64,
    pub card_fee_rate: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            variable_cost_per_session: 69.73,
            extra_variable_per_session: 0.0,
            commission_rate: 0.15,
            card_fee_rate: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Therapists,
    Valets,
    Receptionists,
    KitchenStaff,
    Manager,
}

impl StaffRole {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Therapists,
            Self::Valets,
            Self::Receptionists,
            Self::KitchenStaff,
            Self::Manager,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Therapists => "Therapists",
            Self::Valets => "Valets",
            Self::Receptionists => "Receptionists",
            Self::KitchenStaff => "Kitchen staff",
            Self::Manager => "Manager",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffLine {
    pub qty: f64,
    pub salary: f64,
}

impl StaffLine {
    pub const fn new(qty: f64, salary: f64) -> Self {
        Self { qty, salary }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffRoster(BTreeMap<StaffRole, StaffLine>);

impl StaffRoster {
    pub fn get(&self, role: StaffRole) -> StaffLine {
        self.0.get(&role).copied().unwrap_or_default()
    }

    pub fn set(&mut self, role: StaffRole, line: StaffLine) {
        self.0.insert(role, line);
    }

    pub fn lines(&self) -> impl Iterator<Item = (StaffRole, StaffLine)> + '_ {
        self.0.iter().map(|(role, line)| (*role, *line))
    }
}

impl Default for StaffRoster {
    fn default() -> Self {
        Self(BTreeMap::from([
            (StaffRole::Therapists, StaffLine::new(10.0, 1900.0)),
            (StaffRole::Valets, StaffLine::new(3.0, 2100.0)),
            (StaffRole::Receptionists, StaffLine::new(3.0, 3100.0)),
            (StaffRole::KitchenStaff, StaffLine::new(2.0, 2900.0)),
            (StaffRole::Manager, StaffLine::new(1.0, 10000.0)),
        ]))
    }
}

impl FromIterator<(StaffRole, StaffLine)> for StaffRoster {
    fn from_iter<I: IntoIterator<Item = (StaffRole, StaffLine)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedExpenseItem {
    Rent,
    Electricity,
    Water,
    Internet,
    Other,
}

impl FixedExpenseItem {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Rent,
            Self::Electricity,
            Self::Water,
            Self::Internet,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::Electricity => "Electricity",
            Self::Water => "Water",
            Self::Internet => "Internet",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedExpenses(BTreeMap<FixedExpenseItem, f64>);

impl FixedExpenses {
    pub fn get(&self, item: FixedExpenseItem) -> f64 {
        self.0.get(&item).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, item: FixedExpenseItem, amount: f64) {
        self.0.insert(item, amount);
    }

    pub fn amounts(&self) -> impl Iterator<Item = (FixedExpenseItem, f64)> + '_ {
        self.0.iter().map(|(item, amount)| (*item, *amount))
    }
}

impl Default for FixedExpenses {
    fn default() -> Self {
        Self(BTreeMap::from([
            (FixedExpenseItem::Rent, 20000.0),
            (FixedExpenseItem::Electricity, 0.0),
            (FixedExpenseItem::Water, 0.0),
            (FixedExpenseItem::Internet, 0.0),
            (FixedExpenseItem::Other, 0.0),
        ]))
    }
}

impl FromIterator<(FixedExpenseItem, f64)> for FixedExpenses {
    fn from_iter<I: IntoIterator<Item = (FixedExpenseItem, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
