//! Output formatting module

use scalecart_domain::model::{PriceCatalog, Receipt, ReceiptDocument};
use scalecart_types::{OutputFormat, Result};

pub fn output_receipt(output_format: OutputFormat, receipt: &Receipt, currency: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&ReceiptDocument::from(receipt))?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nReceipt");
    println!("=======");
    if receipt.is_empty() {
        println!("(no items)");
    }
    for (index, line) in receipt.lines.iter().enumerate() {
        let quantity = if line.sold_by_weight {
            format!("{} g", line.captured_weight)
        } else {
            format!("{} pcs", line.count)
        };
        let price = if line.unmatched {
            "Price not found".to_string()
        } else if line.sold_by_weight {
            format!("{} {}/g", currency, line.unit_price)
        } else {
            format!("{} {}/pc", currency, line.unit_price)
        };
        println!(
            "{:>2}  {:<16} {:>9}  {:<18} {} {:>9.2}",
            index, line.item_name, quantity, price, currency, line.line_total
        );
        if let (Some(tier), false) = (line.matched_tier, line.sold_by_weight) {
            if tier != line.captured_weight {
                println!("    (weighed {} g, priced as {} g)", line.captured_weight, tier);
            }
        }
    }
    println!("---------------------------------------------------------------");
    println!("Total: {} {:.2}", currency, receipt.total_price);

    let unmatched = receipt.unmatched_count();
    if unmatched > 0 {
        println!("{} item(s) not found in the catalog", unmatched);
    }

    Ok(())
}

pub fn output_catalog(output_format: OutputFormat, catalog: &PriceCatalog) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(catalog.records())?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nPrice Catalog ({} tiers)", catalog.len());
    println!("==========================");
    println!("{:<16} {:>8}  {:>10}  Billing", "Item", "Tier", "Price");
    for record in catalog.records() {
        println!(
            "{:<16} {:>6} g  {:>10}  {}",
            record.item_name,
            record.weight_tier,
            record.unit_price,
            if record.sold_by_weight { "per gram" } else { "per item" }
        );
    }

    Ok(())
}
