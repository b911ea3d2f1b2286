use super::{CatalogEntry, ServiceCatalog, ServiceId, TierPrices};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read service catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid service catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("service catalog contains no services")]
    Empty,
    #[error("service id {0} appears more than once")]
    DuplicateService(String),
    #[error("service {service} has an invalid {tier} price: {value}")]
    InvalidPrice {
        service: String,
        tier: &'static str,
        value: f64,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    duration: String,
    full: f64,
    p5: f64,
    p10: f64,
    p20: f64,
}

impl CatalogRow {
    fn into_entry(self) -> Result<CatalogEntry, CatalogImportError> {
        let prices = [
            ("full", self.full),
            ("p5", self.p5),
            ("p10", self.p10),
            ("p20", self.p20),
        ];
        if let Some((tier, value)) = prices
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(CatalogImportError::InvalidPrice {
                service: self.id,
                tier,
                value,
            });
        }

        Ok(CatalogEntry {
            id: ServiceId(self.id),
            name: self.name,
            duration: self.duration,
            prices: TierPrices::new(self.full, self.p5, self.p10, self.p20),
        })
    }
}

impl ServiceCatalog {
    /// Reads a catalog from a CSV file with header `id,name,duration,full,p5,p10,p20`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), services = catalog.len(), "service catalog imported");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for record in csv_reader.deserialize::<CatalogRow>() {
            let entry = record?.into_entry()?;
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogImportError::DuplicateService(entry.id.0));
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(CatalogImportError::Empty);
        }

        Ok(Self::new(entries))
    }

    /// Uses the CSV at `path` when one is configured, otherwise the built-in catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogImportError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::standard()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,name,duration,full,p5,p10,p20\n";

    fn read(body: &str) -> Result<ServiceCatalog, CatalogImportError> {
        ServiceCatalog::from_reader(Cursor::new(format!("{HEADER}{body}")))
    }

    #[test]
    fn reads_rows_in_file_order() {
        let catalog = read(
            "hot-stone-90, Hot Stone , 90',800,720,640,600\nreflexo-30,Reflexologia,30',300,270,240,225\n",
        )
        .expect("catalog parses");

        assert_eq!(catalog.len(), 2);
        let first = &catalog.entries()[0];
        assert_eq!(first.id.as_str(), "hot-stone-90");
        assert_eq!(first.name, "Hot Stone");
        assert_eq!(first.prices, TierPrices::new(800.0, 720.0, 640.0, 600.0));
        assert_eq!(catalog.entries()[1].id.as_str(), "reflexo-30");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = read("a,A,30',1,1,1,1\na,A,60',2,2,2,2\n").expect_err("duplicate rejected");
        assert!(matches!(err, CatalogImportError::DuplicateService(id) if id == "a"));
    }

    #[test]
    fn rejects_negative_prices() {
        let err = read("a,A,30',100,-5,80,70\n").expect_err("negative rejected");
        assert!(matches!(
            err,
            CatalogImportError::InvalidPrice { tier: "p5", .. }
        ));
    }

    #[test]
    fn rejects_empty_catalog() {
        let err = read("").expect_err("empty rejected");
        assert!(matches!(err, CatalogImportError::Empty));
    }

    #[test]
    fn rejects_unparseable_prices() {
        let err = read("a,A,30',abc,1,1,1\n").expect_err("bad number rejected");
        assert!(matches!(err, CatalogImportError::Csv(_)));
    }

    #[test]
    fn load_without_path_returns_standard_catalog() {
        let catalog = ServiceCatalog::load(None).expect("standard catalog");
        assert_eq!(catalog, ServiceCatalog::standard());
    }
}
