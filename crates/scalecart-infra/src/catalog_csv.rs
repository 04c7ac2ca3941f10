//! CSV loader for the price catalog
//!
//! Expected header: `name,weight,price[,sold_by_weight]`. A missing or blank
//! `sold_by_weight` cell means the item is sold per unit.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use scalecart_domain::model::{PriceCatalog, PriceRecord};
use scalecart_types::{CatalogError, Error, Result};
use serde::Deserialize;

use crate::catalog_loader::CatalogItem;

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    weight: String,
    price: String,
    #[serde(default)]
    sold_by_weight: Option<String>,
}

/// Load the catalog from a CSV file
pub fn load_catalog_csv(path: &Path) -> Result<PriceCatalog> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Catalog(CatalogError::ReadError(format!("{}: {}", path.display(), e)))
    })?;
    load_catalog_csv_str(&content)
}

/// Load the catalog from CSV text
pub fn load_catalog_csv_str(content: &str) -> Result<PriceCatalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (row_idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        // +2: header is row 1
        let row_num = row_idx + 2;
        let row = result.map_err(|e| CatalogError::ParseError(e.to_string()))?;
        records.push(parse_row(row, row_num)?);
    }

    Ok(PriceCatalog::new(records))
}

fn parse_row(row: CsvRow, row_num: usize) -> std::result::Result<PriceRecord, CatalogError> {
    let weight = row.weight.parse::<u32>().map_err(|_| CatalogError::InvalidRecord {
        row: row_num,
        reason: format!("invalid weight '{}'", row.weight),
    })?;
    let price = Decimal::from_str(&row.price).map_err(|_| CatalogError::InvalidRecord {
        row: row_num,
        reason: format!("invalid price '{}'", row.price),
    })?;
    let sold_by_weight = row
        .sold_by_weight
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    CatalogItem {
        name: row.name,
        weight,
        price,
        sold_by_weight,
    }
    .into_record(row_num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_csv() {
        let csv = "name,weight,price,sold_by_weight\n\
                   rice,500,40,\n\
                   rice,1000,75,false\n\
                   banana,0,0.1,TRUE\n";
        let catalog = load_catalog_csv_str(csv).unwrap();
        assert_eq!(catalog.len(), 3);
        let banana = catalog.tiers_for("banana").next().unwrap();
        assert!(banana.sold_by_weight);
        assert_eq!(banana.unit_price, dec!(0.1));
        assert!(catalog.tiers_for("rice").all(|r| !r.sold_by_weight));
    }

    #[test]
    fn test_missing_flag_column() {
        let csv = "name,weight,price\nmilk,500,27.5\n";
        let catalog = load_catalog_csv_str(csv).unwrap();
        let milk = catalog.tiers_for("milk").next().unwrap();
        assert!(!milk.sold_by_weight);
        assert_eq!(milk.unit_price, dec!(27.5));
    }

    #[test]
    fn test_invalid_weight_reports_row() {
        let csv = "name,weight,price\nmilk,500,27.5\nrice,heavy,40\n";
        let err = load_catalog_csv_str(csv).unwrap_err();
        assert!(matches!(
            err,
            Error::Catalog(CatalogError::InvalidRecord { row: 3, .. })
        ));
    }
}
