//! Monthly projection engine.
//!
//! A projection is a pure function of an [`AssumptionRecord`] and a read-only
//! [`ServiceCatalog`]: mixes are turned into weights, sessions are counted, each
//! service is priced, prices are blended into an overall ticket, and revenue is
//! set against the expense lines. Nothing is cached between calls.

mod expenses;
mod mix;
mod pricing;
mod result;
mod volume;

pub use expenses::{fixed_cost, staffing_cost, ExpenseBreakdown, PAYROLL_BURDEN};
pub use mix::{is_valid_sum, normalize_mix, MixWeights, MIX_TOLERANCE, PERCENT_SCALE};
pub use pricing::{blend_overall_price, blend_package_prices, resolve_service_prices, ServicePrice};
pub use result::ProjectionResult;
pub use volume::SessionVolume;

use crate::assumptions::{AssumptionEditor, AssumptionPatch, AssumptionRecord};
use crate::catalog::ServiceCatalog;
use result::{MixCheck, PricingOutcome};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Projection engine bound to one catalog.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    catalog: ServiceCatalog,
    baseline: AssumptionRecord,
}

impl ProjectionEngine {
    pub fn new(catalog: ServiceCatalog) -> Self {
        let baseline = AssumptionRecord::baseline_for(&catalog);
        Self { catalog, baseline }
    }

    pub fn standard() -> Self {
        Self::new(ServiceCatalog::standard())
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Independent copy of the default assumptions for this catalog.
    pub fn baseline(&self) -> AssumptionRecord {
        self.baseline.clone()
    }

    /// Completes caller-supplied assumptions with this catalog's baseline.
    pub fn resolve(&self, patch: AssumptionPatch) -> AssumptionRecord {
        patch.apply_to(self.baseline())
    }

    pub fn editor(&self) -> AssumptionEditor {
        AssumptionEditor::with_assumptions(&self.catalog, self.baseline(), self.baseline())
    }

    pub fn compute(&self, assumptions: &AssumptionRecord) -> ProjectionResult {
        let package_weights = normalize_mix(assumptions.package_mix.entries());
        let service_weights = normalize_mix(
            assumptions
                .service_mix
                .entries()
                .map(|(id, value)| (id.clone(), value)),
        );

        let volume = SessionVolume::from_assumptions(&assumptions.volume);

        let by_service =
            resolve_service_prices(&self.catalog, &package_weights, &assumptions.ticket_overrides);
        let by_package = blend_package_prices(&self.catalog, &service_weights);
        let overall = blend_overall_price(&by_service, &service_weights);

        let revenue = result::revenue(&volume, overall);
        let expenses = ExpenseBreakdown::compute(
            volume.net_sessions,
            revenue,
            &assumptions.rates,
            &assumptions.staff,
            &assumptions.fixed_expenses,
        );

        if !package_weights.is_valid || !service_weights.is_valid {
            warn!(
                package_mix_sum = package_weights.sum,
                service_mix_sum = service_weights.sum,
                "mix percentages do not sum to 100"
            );
        }

        let projection = result::assemble(
            MixCheck {
                package_sum: package_weights.sum,
                package_valid: package_weights.is_valid,
                service_sum: service_weights.sum,
                service_valid: service_weights.is_valid,
            },
            volume,
            PricingOutcome {
                by_service,
                by_package,
                overall,
            },
            revenue,
            expenses,
        );

        debug!(
            net_sessions = projection.net_sessions,
            avg_price = projection.avg_price_overall,
            revenue = projection.revenue,
            result = projection.result,
            "projection computed"
        );
        projection
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::standard()
    }
}

static STANDARD_ENGINE: OnceLock<ProjectionEngine> = OnceLock::new();

/// Projects `assumptions` against the standard catalog.
pub fn compute(assumptions: &AssumptionRecord) -> ProjectionResult {
    STANDARD_ENGINE
        .get_or_init(ProjectionEngine::standard)
        .compute(assumptions)
}
