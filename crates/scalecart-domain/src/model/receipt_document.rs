//! Persisted receipt document (`receipt.json`)
//!
//! This is the shape the checkout front-end reads and edits. Line shape depends
//! on how the line was priced:
//!
//! - sold by weight: `weight`, `count`, `price_per_gram`, `sold_by_weight: true`
//! - per unit: `detected_weight`, `actual_weight`, `count`, `price_per_item`, `sold_by_weight: false`
//! - no catalog entry: `weight`, `count`, `price_per_item: 0`, `message`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::receipt::{Receipt, ReceiptLine};

pub const PRICE_NOT_FOUND: &str = "Price not found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDocument {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_per_gram: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_per_item: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_by_weight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&ReceiptLine> for ReceiptItem {
    fn from(line: &ReceiptLine) -> Self {
        if line.unmatched {
            ReceiptItem {
                name: line.item_name.clone(),
                weight: Some(line.captured_weight),
                count: Some(line.count),
                price_per_item: Some(Decimal::ZERO),
                total_price: Decimal::ZERO,
                message: Some(PRICE_NOT_FOUND.to_string()),
                ..Default::default()
            }
        } else if line.sold_by_weight {
            ReceiptItem {
                name: line.item_name.clone(),
                weight: Some(line.captured_weight),
                count: Some(line.count),
                price_per_gram: Some(line.unit_price),
                total_price: line.line_total,
                sold_by_weight: Some(true),
                ..Default::default()
            }
        } else {
            ReceiptItem {
                name: line.item_name.clone(),
                detected_weight: Some(line.captured_weight),
                actual_weight: line.matched_tier,
                count: Some(line.count),
                price_per_item: Some(line.unit_price),
                total_price: line.line_total,
                sold_by_weight: Some(false),
                ..Default::default()
            }
        }
    }
}

impl From<ReceiptItem> for ReceiptLine {
    fn from(item: ReceiptItem) -> Self {
        let count = item.count.unwrap_or(1);
        if item.message.is_some() {
            let weight = item.weight.or(item.detected_weight).unwrap_or(0);
            return ReceiptLine::unmatched(item.name, weight, count);
        }
        if item.sold_by_weight.unwrap_or(false) {
            ReceiptLine {
                item_name: item.name,
                captured_weight: item.weight.or(item.detected_weight).unwrap_or(0),
                matched_tier: item.actual_weight,
                unit_price: item.price_per_gram.unwrap_or_default(),
                sold_by_weight: true,
                count,
                line_total: item.total_price,
                unmatched: false,
            }
        } else {
            ReceiptLine {
                item_name: item.name,
                captured_weight: item.detected_weight.or(item.weight).unwrap_or(0),
                matched_tier: item.actual_weight,
                unit_price: item.price_per_item.unwrap_or_default(),
                sold_by_weight: false,
                count,
                line_total: item.total_price,
                unmatched: false,
            }
        }
    }
}

impl From<&Receipt> for ReceiptDocument {
    fn from(receipt: &Receipt) -> Self {
        Self {
            total_price: receipt.total_price,
            items: receipt.lines.iter().map(ReceiptItem::from).collect(),
        }
    }
}

impl From<ReceiptDocument> for Receipt {
    fn from(document: ReceiptDocument) -> Self {
        Receipt::from_lines(document.items.into_iter().map(ReceiptLine::from).collect())
    }
}
