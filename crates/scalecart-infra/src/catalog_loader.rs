//! Price catalog loader from TOML
//!
//! ```toml
//! [[items]]
//! name = "rice"
//! weight = 500
//! price = 40
//!
//! [[items]]
//! name = "banana"
//! weight = 0
//! price = 0.1
//! sold_by_weight = true
//! ```

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use scalecart_domain::model::{PriceCatalog, PriceRecord};
use scalecart_types::{CatalogError, Error, Result};
use serde::Deserialize;

/// Container for parsing items.toml
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<CatalogItem>,
}

/// One `[[items]]` entry as written in the catalog source
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogItem {
    pub name: String,
    pub weight: u32,
    pub price: Decimal,
    #[serde(default)]
    pub sold_by_weight: bool,
}

impl CatalogItem {
    /// `row` is 1-based, for error messages
    pub(crate) fn into_record(self, row: usize) -> std::result::Result<PriceRecord, CatalogError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidRecord {
                row,
                reason: "empty item name".to_string(),
            });
        }
        if self.price.is_sign_negative() {
            return Err(CatalogError::InvalidRecord {
                row,
                reason: format!("negative price {} for {}", self.price, name),
            });
        }
        Ok(PriceRecord {
            item_name: name.to_string(),
            weight_tier: self.weight,
            unit_price: self.price,
            sold_by_weight: self.sold_by_weight,
        })
    }
}

/// Price catalog loaded from TOML
#[derive(Debug)]
pub struct CatalogLoader {
    catalog: PriceCatalog,
}

impl CatalogLoader {
    /// Load the catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Catalog(CatalogError::ReadError(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load the catalog from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_content)
            .map_err(|e| Error::Catalog(CatalogError::ParseError(e.to_string())))?;

        let records = file
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| item.into_record(idx + 1))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            catalog: PriceCatalog::new(records),
        })
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> PriceCatalog {
        self.catalog
    }

    pub fn count(&self) -> usize {
        self.catalog.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TEST_TOML: &str = r#"
[[items]]
name = "rice"
weight = 500
price = 40

[[items]]
name = "rice"
weight = 1000
price = 75

[[items]]
name = "banana"
weight = 0
price = 0.1
sold_by_weight = true
"#;

    #[test]
    fn test_load_from_str() {
        let loader = CatalogLoader::load_from_str(TEST_TOML).unwrap();
        assert_eq!(loader.count(), 3);
    }

    #[test]
    fn test_tiers_and_defaults() {
        let catalog = CatalogLoader::load_from_str(TEST_TOML).unwrap().into_catalog();
        let rice: Vec<_> = catalog.tiers_for("rice").collect();
        assert_eq!(rice.len(), 2);
        assert_eq!(rice[0].weight_tier, 500);
        assert_eq!(rice[1].unit_price, dec!(75));
        assert!(!rice[0].sold_by_weight);

        let banana = catalog.tiers_for("banana").next().unwrap();
        assert!(banana.sold_by_weight);
        assert_eq!(banana.unit_price, dec!(0.1));
    }

    #[test]
    fn test_rejects_blank_name() {
        let toml = r#"
[[items]]
name = "  "
weight = 10
price = 1
"#;
        let err = CatalogLoader::load_from_str(toml).unwrap_err();
        assert!(matches!(
            err,
            Error::Catalog(CatalogError::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = CatalogLoader::load_from_str("[[items]]\nname = \"rice\"\n").unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::ParseError(_))));
    }
}
