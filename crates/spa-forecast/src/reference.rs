//! Static operating data shown alongside projections. Read-only; never fed to the engine.

use crate::catalog::{ServiceCatalog, TierPrices};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReferenceValue {
    Number(f64),
    Text(&'static str),
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeMetric {
    pub metric: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

impl VolumeMetric {
    pub fn is_percent(&self) -> bool {
        self.unit == "%"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamTerm {
    pub item: &'static str,
    pub value: ReferenceValue,
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostItem {
    pub item: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumableLine {
    pub item: &'static str,
    pub qty: f64,
    pub unit_cost: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicePriceRow {
    pub service: String,
    pub duration: String,
    pub prices: TierPrices,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceTables {
    pub service_prices: Vec<ServicePriceRow>,
    pub volume_performance: Vec<VolumeMetric>,
    pub team_commissions: Vec<TeamTerm>,
    pub cost_per_session: Vec<CostItem>,
    pub laundry_costs: Vec<ConsumableLine>,
    pub other_products: Vec<ConsumableLine>,
    pub session_cost_total: f64,
}

const SESSION_COST_TOTAL: f64 = 69.73;

impl ReferenceTables {
    pub fn for_catalog(catalog: &ServiceCatalog) -> Self {
        Self {
            service_prices: catalog
                .entries()
                .iter()
                .map(|entry| ServicePriceRow {
                    service: entry.name.clone(),
                    duration: entry.duration.clone(),
                    prices: entry.prices,
                })
                .collect(),
            volume_performance: volume_performance(),
            team_commissions: team_commissions(),
            cost_per_session: vec![
                cost("Products (oil/cream)", 69.73),
                cost("Disposables", 5.0),
                cost("Card fee", 0.05),
            ],
            laundry_costs: vec![
                line("Fitted sheet", 1.0, 2.45, 2.45),
                line("Flat sheet", 1.0, 2.45, 2.45),
                line("Pillowcase", 1.0, 1.03, 1.03),
                line("Towels", 3.0, 1.03, 3.09),
            ],
            other_products: vec![
                line("Cream (7 massages/1kg)", 1.0, 35.71, 35.71),
                line("Air freshener (250ml/15 sessions)", 1.0, 12.0, 12.0),
                line("Disposables", 1.0, 13.0, 13.0),
            ],
            session_cost_total: SESSION_COST_TOTAL,
        }
    }
}

fn volume_performance() -> Vec<VolumeMetric> {
    vec![
        metric("Sessions/day (hot day)", 23.0, "sessions/day"),
        metric("Sessions/day (cold day)", 14.0, "sessions/day"),
        metric("Hot days/month", 8.0, "days"),
        metric("Cold days/month", 22.0, "days"),
        metric("Average monthly sessions", 492.0, "sessions/month"),
        metric("No-show rate", 0.104, "%"),
        metric("Returning clients", 0.224, "%"),
        metric("Active clients (2025)", 1137.0, "clients"),
        metric("New clients/month", 53.0, "clients/month"),
        metric("Average visits/month", 338.0, "visits"),
        metric("Average annual ticket", 480.0, "R$"),
        metric("Active packages", 1128.0, "packages"),
    ]
}

fn team_commissions() -> Vec<TeamTerm> {
    vec![
        TeamTerm {
            item: "Number of therapists",
            value: ReferenceValue::Number(10.0),
            note: "employees",
        },
        TeamTerm {
            item: "Commission %",
            value: ReferenceValue::Number(0.15),
            note: "on amount received",
        },
        TeamTerm {
            item: "Fixed salary",
            value: ReferenceValue::Number(1900.0),
            note: "R$/month",
        },
        TeamTerm {
            item: "Employment type",
            value: ReferenceValue::Text("CLT"),
            note: "-",
        },
    ]
}

fn metric(metric: &'static str, value: f64, unit: &'static str) -> VolumeMetric {
    VolumeMetric {
        metric,
        value,
        unit,
    }
}

fn cost(item: &'static str, value: f64) -> CostItem {
    CostItem { item, value }
}

fn line(item: &'static str, qty: f64, unit_cost: f64, subtotal: f64) -> ConsumableLine {
    ConsumableLine {
        item,
        qty,
        unit_cost,
        subtotal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_table_follows_catalog_order() {
        let tables = ReferenceTables::for_catalog(&ServiceCatalog::standard());
        assert_eq!(tables.service_prices.len(), 7);
        assert_eq!(tables.service_prices[2].service, "Miracle Face");
        assert_eq!(tables.service_prices[2].prices.full, 320.0);
    }

    #[test]
    fn mixed_value_types_serialize_untagged() {
        let tables = ReferenceTables::for_catalog(&ServiceCatalog::standard());
        let json = serde_json::to_value(&tables.team_commissions).expect("serializes");
        assert_eq!(json[0]["value"], 10.0);
        assert_eq!(json[3]["value"], "CLT");
        assert!(tables.volume_performance[5].is_percent());
    }
}
