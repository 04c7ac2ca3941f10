//! Price catalog type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One catalog tier: an item at a nominal weight with its price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Classifier label this price applies to
    pub item_name: String,
    /// Nominal weight of the tier in grams (pack size)
    pub weight_tier: u32,
    /// Price per item, or per gram when `sold_by_weight`
    pub unit_price: Decimal,
    /// Billed by captured weight instead of per unit
    #[serde(default)]
    pub sold_by_weight: bool,
}

/// Price catalog in load order
///
/// Load order matters: it decides which tier wins when two tiers are equally
/// close to a captured weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceCatalog {
    records: Vec<PriceRecord>,
}

impl PriceCatalog {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    /// All tiers for an item, in load order
    pub fn tiers_for<'a>(&'a self, item_name: &'a str) -> impl Iterator<Item = &'a PriceRecord> + 'a {
        self.records.iter().filter(move |r| r.item_name == item_name)
    }

    pub fn contains_item(&self, item_name: &str) -> bool {
        self.records.iter().any(|r| r.item_name == item_name)
    }

    /// Distinct item names in first-seen order
    pub fn item_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.item_name.as_str()) {
                names.push(&record.item_name);
            }
        }
        names
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
