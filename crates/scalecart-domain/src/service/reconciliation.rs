//! Price reconciliation: cart lines against the price catalog

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::model::{CartLine, PriceCatalog, PriceRecord, Receipt, ReceiptLine};

/// Catalog tier closest in weight to `captured_weight`
///
/// Ties go to the tier loaded first.
pub fn nearest_tier<'a>(
    catalog: &'a PriceCatalog,
    item_name: &str,
    captured_weight: u32,
) -> Option<&'a PriceRecord> {
    let mut best: Option<(&PriceRecord, u32)> = None;
    for record in catalog.records().iter().filter(|r| r.item_name == item_name) {
        let distance = record.weight_tier.abs_diff(captured_weight);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((record, distance)),
        }
    }
    best.map(|(record, _)| record)
}

fn price_line(line: &CartLine, record: &PriceRecord) -> ReceiptLine {
    let line_total = if record.sold_by_weight {
        Decimal::from(line.captured_weight) * record.unit_price
    } else {
        Decimal::from(line.count) * record.unit_price
    };
    ReceiptLine {
        item_name: line.item_name.clone(),
        captured_weight: line.captured_weight,
        matched_tier: Some(record.weight_tier),
        unit_price: record.unit_price,
        sold_by_weight: record.sold_by_weight,
        count: line.count,
        line_total,
        unmatched: false,
    }
}

/// Price every cart line and total the receipt
///
/// Items missing from the catalog become zero-priced lines flagged
/// `unmatched`; they never fail the checkout.
pub fn reconcile(lines: &[CartLine], catalog: &PriceCatalog) -> Receipt {
    let receipt_lines = lines
        .iter()
        .map(|line| match nearest_tier(catalog, &line.item_name, line.captured_weight) {
            Some(record) => {
                let priced = price_line(line, record);
                if priced.sold_by_weight {
                    info!(
                        item = %priced.item_name,
                        weight_g = priced.captured_weight,
                        price_per_gram = %priced.unit_price,
                        total = %priced.line_total,
                        "priced by weight"
                    );
                } else {
                    info!(
                        item = %priced.item_name,
                        weight_g = priced.captured_weight,
                        tier_g = record.weight_tier,
                        price_per_item = %priced.unit_price,
                        total = %priced.line_total,
                        "priced per unit"
                    );
                }
                priced
            }
            None => {
                warn!(
                    item = %line.item_name,
                    weight_g = line.captured_weight,
                    "no price found"
                );
                ReceiptLine::unmatched(line.item_name.clone(), line.captured_weight, line.count)
            }
        })
        .collect();

    Receipt::from_lines(receipt_lines)
}
