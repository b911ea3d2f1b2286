//! Service catalog: the fixed list of treatments and their four-tier price tables.

mod loader;

pub use loader::CatalogImportError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pricing tier a client buys into: the full price or one of the discount packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageTier {
    Full,
    #[serde(rename = "p5")]
    Pack5,
    #[serde(rename = "p10")]
    Pack10,
    #[serde(rename = "p20")]
    Pack20,
}

impl PackageTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Full, Self::Pack5, Self::Pack10, Self::Pack20]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full price",
            Self::Pack5 => "Pack 5 (-10%)",
            Self::Pack10 => "Pack 10 (-20%)",
            Self::Pack20 => "Pack 20 (-25%)",
        }
    }
}

/// One price per [`PackageTier`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierPrices {
    pub full: f64,
    pub p5: f64,
    pub p10: f64,
    pub p20: f64,
}

impl TierPrices {
    pub const fn new(full: f64, p5: f64, p10: f64, p20: f64) -> Self {
        Self { full, p5, p10, p20 }
    }

    pub const fn price(&self, tier: PackageTier) -> f64 {
        match tier {
            PackageTier::Full => self.full,
            PackageTier::Pack5 => self.p5,
            PackageTier::Pack10 => self.p10,
            PackageTier::Pack20 => self.p20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ServiceId,
    pub name: String,
    pub duration: String,
    pub prices: TierPrices,
}

impl CatalogEntry {
    fn standard(id: &str, name: &str, duration: &str, prices: TierPrices) -> Self {
        Self {
            id: ServiceId::from(id),
            name: name.to_string(),
            duration: duration.to_string(),
            prices,
        }
    }

    /// Name and duration as shown in tables, e.g. `Relaxante 60'`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.duration)
    }
}

/// Ordered, read-only list of services. Entry order drives every per-service listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
}

const SHORT_SESSION: TierPrices = TierPrices::new(520.0, 468.0, 416.0, 390.0);
const LONG_SESSION: TierPrices = TierPrices::new(720.0, 648.0, 576.0, 540.0);
const FACE_SESSION: TierPrices = TierPrices::new(320.0, 288.0, 256.0, 240.0);

impl ServiceCatalog {
    /// Builds a catalog from already-validated entries.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            CatalogEntry::standard("miracle-corporal-50", "Miracle Corporal", "50'", SHORT_SESSION),
            CatalogEntry::standard("miracle-corporal-80", "Miracle Corporal", "80'", LONG_SESSION),
            CatalogEntry::standard("miracle-face-30", "Miracle Face", "30'", FACE_SESSION),
            CatalogEntry::standard("relaxante-60", "Relaxante", "60'", SHORT_SESSION),
            CatalogEntry::standard("relaxante-80", "Relaxante", "80'", LONG_SESSION),
            CatalogEntry::standard("drenagem-50", "Drenagem", "50'", SHORT_SESSION),
            CatalogEntry::standard("ayurvedica-80", "Ayurvédica", "80'", LONG_SESSION),
        ])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &ServiceId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ServiceId> {
        self.entries.iter().map(|entry| &entry.id)
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_seven_services_in_order() {
        let catalog = ServiceCatalog::standard();
        let ids: Vec<&str> = catalog.ids().map(ServiceId::as_str).collect();
        assert_eq!(
            ids,
            vec![
                "miracle-corporal-50",
                "miracle-corporal-80",
                "miracle-face-30",
                "relaxante-60",
                "relaxante-80",
                "drenagem-50",
                "ayurvedica-80",
            ]
        );
    }

    #[test]
    fn tier_prices_resolve_by_tier() {
        let catalog = ServiceCatalog::standard();
        let face = catalog
            .get(&ServiceId::from("miracle-face-30"))
            .expect("face service present");
        assert_eq!(face.prices.price(PackageTier::Full), 320.0);
        assert_eq!(face.prices.price(PackageTier::Pack20), 240.0);
        assert_eq!(face.display_name(), "Miracle Face 30'");
    }

    #[test]
    fn package_tier_serializes_with_short_keys() {
        let json = serde_json::to_string(&PackageTier::ordered()).expect("serializes");
        assert_eq!(json, r#"["full","p5","p10","p20"]"#);
    }
}
