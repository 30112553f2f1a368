//! Plain-text summary printed to the terminal after a run.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use foodwaste_core::Store;

use crate::format::{format_discount, format_expiry, format_price, format_stock};
use crate::html::NO_STORES_TEXT;

/// Renders one block per store listing its offers in the given order.
#[must_use]
pub fn render_summary(stores: &[Store], now: DateTime<Utc>) -> String {
    if stores.is_empty() {
        return format!("{NO_STORES_TEXT}\n");
    }

    let product_count: usize = stores.iter().map(|s| s.products.len()).sum();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} butik(ker), {product_count} vare(r) på tilbud",
        stores.len()
    );

    for store in stores {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", store.name, store.address.one_line());
        if store.products.is_empty() {
            let _ = writeln!(out, "  ingen varer");
            continue;
        }
        for product in &store.products {
            let expiry = product
                .end_time
                .map_or_else(|| "ukendt".to_string(), |ts| format_expiry(ts, now));
            let _ = writeln!(
                out,
                "  - {}: {} ({}), {}, gyldig indtil {expiry}",
                product.description,
                format_price(product.new_price, &product.currency),
                format_discount(product.discount_percent()),
                format_stock(product.stock, &product.stock_unit),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use foodwaste_core::{Address, Product, StockUnit};
    use rust_decimal::Decimal;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn store(name: &str, products: Vec<Product>) -> Store {
        Store {
            id: name.to_lowercase(),
            name: name.to_string(),
            brand: None,
            address: Address {
                street: "Torvet 2".to_string(),
                zip: "8000".to_string(),
                city: "Aarhus C".to_string(),
            },
            location: None,
            products,
        }
    }

    fn product(description: &str, stock: i64) -> Product {
        Product {
            ean: None,
            description: description.to_string(),
            original_price: Decimal::from(20),
            new_price: Decimal::from(10),
            currency: "DKK".to_string(),
            stock: Decimal::from(stock),
            stock_unit: StockUnit::Each,
            start_time: None,
            end_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()),
            last_update: None,
            image_url: None,
        }
    }

    #[test]
    fn summarises_stores_and_products_in_order() {
        let stores = vec![
            store("Netto", vec![product("Skyr", 8), product("Mælk", 2)]),
            store("Føtex", Vec::new()),
        ];
        let summary = render_summary(&stores, now());

        assert!(summary.starts_with("2 butik(ker), 2 vare(r) på tilbud\n"));
        assert!(summary.contains("Netto (Torvet 2, 8000 Aarhus C)"));
        assert!(summary.contains("  - Skyr: 10,00 kr. (-50%), 8 stk., gyldig indtil i dag kl. 21:00"));
        assert!(summary.contains("Føtex (Torvet 2, 8000 Aarhus C)\n  ingen varer"));
        assert!(summary.find("Skyr").unwrap() < summary.find("Mælk").unwrap());
    }

    #[test]
    fn empty_result_prints_no_stores() {
        assert_eq!(render_summary(&[], now()), format!("{NO_STORES_TEXT}\n"));
    }
}
