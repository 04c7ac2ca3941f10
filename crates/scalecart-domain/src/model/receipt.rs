//! Itemized receipt produced by reconciliation

use rust_decimal::Decimal;
use scalecart_types::ReceiptError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub item_name: String,
    pub captured_weight: u32,
    /// Nominal weight of the catalog tier the line was priced from
    pub matched_tier: Option<u32>,
    pub unit_price: Decimal,
    pub sold_by_weight: bool,
    pub count: u32,
    pub line_total: Decimal,
    /// No catalog entry exists for the item
    pub unmatched: bool,
}

impl ReceiptLine {
    pub fn unmatched(item_name: impl Into<String>, captured_weight: u32, count: u32) -> Self {
        Self {
            item_name: item_name.into(),
            captured_weight,
            matched_tier: None,
            unit_price: Decimal::ZERO,
            sold_by_weight: false,
            count,
            line_total: Decimal::ZERO,
            unmatched: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub total_price: Decimal,
    pub lines: Vec<ReceiptLine>,
}

impl Receipt {
    /// Build a receipt whose total is the exact sum of its lines
    pub fn from_lines(lines: Vec<ReceiptLine>) -> Self {
        let total_price = lines.iter().map(|l| l.line_total).sum();
        Self { total_price, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn unmatched_count(&self) -> usize {
        self.lines.iter().filter(|l| l.unmatched).count()
    }

    /// Change the quantity of a per-unit line and re-total
    pub fn set_count(&mut self, index: usize, count: u32) -> Result<(), ReceiptError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(ReceiptError::NoSuchLine(index))?;
        if line.unmatched {
            return Err(ReceiptError::Unmatched(index));
        }
        if line.sold_by_weight {
            return Err(ReceiptError::SoldByWeight(index));
        }
        line.count = count;
        line.line_total = Decimal::from(count) * line.unit_price;
        self.total_price = self.lines.iter().map(|l| l.line_total).sum();
        Ok(())
    }
}
