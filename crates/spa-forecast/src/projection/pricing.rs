use super::mix::MixWeights;
use crate::assumptions::{TicketOverride, TicketOverrides};
use crate::catalog::{PackageTier, ServiceCatalog, ServiceId, TierPrices};
use serde::Serialize;

/// Average ticket for one service and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePrice {
    pub id: ServiceId,
    pub avg_price: f64,
    pub is_override: bool,
}

/// Prices every catalog service at its package-mix blend, unless a manual ticket is set.
pub fn resolve_service_prices(
    catalog: &ServiceCatalog,
    package_weights: &MixWeights<PackageTier>,
    overrides: &TicketOverrides,
) -> Vec<ServicePrice> {
    catalog
        .entries()
        .iter()
        .map(|entry| {
            let (avg_price, is_override) = match overrides.lookup(&entry.id) {
                TicketOverride::Manual(price) => (price, true),
                TicketOverride::Blended => (blend_tiers(&entry.prices, package_weights), false),
            };
            ServicePrice {
                id: entry.id.clone(),
                avg_price,
                is_override,
            }
        })
        .collect()
}

fn blend_tiers(prices: &TierPrices, weights: &MixWeights<PackageTier>) -> f64 {
    PackageTier::ordered()
        .into_iter()
        .map(|tier| prices.price(tier) * weights.weight(&tier))
        .fold(0.0, |acc, value| acc + value)
}

/// Service-mix blends of the catalog's list prices, one per tier. Overrides never
/// enter these figures.
pub fn blend_package_prices(
    catalog: &ServiceCatalog,
    service_weights: &MixWeights<ServiceId>,
) -> TierPrices {
    let blend = |tier: PackageTier| {
        catalog.entries().iter().fold(0.0, |acc, entry| {
            acc + entry.prices.price(tier) * service_weights.weight(&entry.id)
        })
    };

    TierPrices::new(
        blend(PackageTier::Full),
        blend(PackageTier::Pack5),
        blend(PackageTier::Pack10),
        blend(PackageTier::Pack20),
    )
}

/// Service-mix blend of the resolved per-service tickets, overrides included.
pub fn blend_overall_price(
    service_prices: &[ServicePrice],
    service_weights: &MixWeights<ServiceId>,
) -> f64 {
    service_prices.iter().fold(0.0, |acc, item| {
        acc + item.avg_price * service_weights.weight(&item.id)
    })
}
