//! Customer-facing plain-text receipt body

use crate::model::Receipt;

pub fn format_receipt_message(receipt: &Receipt, store_name: &str, currency: &str) -> String {
    let mut lines = vec![
        "*Thank you for your purchase!*".to_string(),
        String::new(),
        "*Receipt:*".to_string(),
        String::new(),
    ];

    for line in &receipt.lines {
        let mut item = format!("*{}*", line.item_name);
        if line.unmatched {
            item.push_str(&format!("\nQuantity: {} pcs", line.count));
            item.push_str("\nPrice: not found");
        } else if line.sold_by_weight {
            item.push_str(&format!("\nQuantity: {} g", line.captured_weight));
            item.push_str(&format!("\nPrice: {} {}/g", currency, line.unit_price));
        } else {
            item.push_str(&format!("\nQuantity: {} pcs", line.count));
            item.push_str(&format!("\nPrice: {} {}/pc", currency, line.unit_price));
        }
        item.push_str(&format!("\nTotal: {} {:.2}", currency, line.line_total));
        lines.push(item);
        lines.push(String::new());
    }

    lines.push(format!("*Total Amount Paid: {} {:.2}*", currency, receipt.total_price));
    lines.push(String::new());
    lines.push("_Visit us again!_".to_string());
    lines.push(String::new());
    lines.push(format!("*{}*", store_name));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReceiptLine;
    use rust_decimal_macros::dec;

    #[test]
    fn test_message_body() {
        let receipt = Receipt::from_lines(vec![
            ReceiptLine {
                item_name: "banana".to_string(),
                captured_weight: 345,
                matched_tier: Some(0),
                unit_price: dec!(0.1),
                sold_by_weight: true,
                count: 1,
                line_total: dec!(34.5),
                unmatched: false,
            },
            ReceiptLine {
                item_name: "rice".to_string(),
                captured_weight: 600,
                matched_tier: Some(500),
                unit_price: dec!(40),
                sold_by_weight: false,
                count: 2,
                line_total: dec!(80),
                unmatched: false,
            },
        ]);

        let body = format_receipt_message(&receipt, "SA Supermart", "Rs.");
        assert!(body.contains("*banana*\nQuantity: 345 g\nPrice: Rs. 0.1/g\nTotal: Rs. 34.50"));
        assert!(body.contains("*rice*\nQuantity: 2 pcs\nPrice: Rs. 40/pc\nTotal: Rs. 80.00"));
        assert!(body.contains("*Total Amount Paid: Rs. 114.50*"));
        assert!(body.ends_with("*SA Supermart*"));
    }
}
