//! HTML rendering of a search result.
//!
//! The document is self-contained apart from product images, which are
//! referenced by URL. All text from the API is escaped.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use foodwaste_core::{Product, Store};

use crate::format::{format_discount, format_expiry, format_price, format_stock, format_timestamp};

pub const REPORT_TITLE: &str = "Tilbud med kort holdbarhed";
pub const NO_STORES_TEXT: &str = "Ingen butikker fundet for denne søgning.";
pub const NO_PRODUCTS_TEXT: &str = "Ingen varer på tilbud i denne butik lige nu.";
pub const STOCK_DISCLAIMER: &str =
    "Beholdningen er vejledende og er ikke nødvendigvis opdateret i realtid.";

const STYLESHEET: &str = r"
body { font-family: 'Helvetica Neue', Arial, sans-serif; margin: 2em auto; max-width: 860px; color: #222; }
h1 { margin-bottom: 0.2em; }
.updated, .query { color: #666; margin: 0.2em 0; }
.store { border-top: 2px solid #0a6; margin-top: 2em; padding-top: 0.5em; page-break-inside: avoid; }
.item { display: flex; gap: 1em; padding: 0.8em 0; border-bottom: 1px solid #eee; page-break-inside: avoid; }
.item img, .item .no-image { width: 100px; height: 100px; object-fit: contain; flex-shrink: 0; }
.item .no-image { background: #eee; }
.item-details h3 { margin: 0 0 0.3em 0; font-size: 1.05em; }
.item-details p { margin: 0.15em 0; }
.original-price { color: #888; }
.new-price { color: #0a6; font-size: 1.15em; }
.discount { background: #d22; color: #fff; border-radius: 3px; padding: 0 0.35em; font-weight: bold; }
.empty { font-style: italic; color: #666; }
.footer { margin-top: 2em; font-size: 0.85em; color: #888; }
";

/// Metadata shown in the report header.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    /// Run start time; also the reference point for "i dag"/"i morgen".
    pub generated_at: DateTime<Utc>,
    /// Human-readable description of the search, e.g. `postnummer 8000`.
    pub search_label: String,
}

impl ReportMeta {
    #[must_use]
    pub fn new(generated_at: DateTime<Utc>, search_label: impl Into<String>) -> Self {
        Self {
            generated_at,
            search_label: search_label.into(),
        }
    }
}

/// Renders the complete HTML document for `stores`, in the given order.
#[must_use]
pub fn render_html(stores: &[Store], meta: &ReportMeta) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html lang=\"da\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(REPORT_TITLE));
    let _ = writeln!(out, "<style>{STYLESHEET}</style>\n</head>\n<body>");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(REPORT_TITLE));
    let _ = writeln!(
        out,
        "<p class=\"updated\">Opdateret: {}</p>",
        format_timestamp(meta.generated_at)
    );
    if !meta.search_label.is_empty() {
        let _ = writeln!(
            out,
            "<p class=\"query\">Søgning: {}</p>",
            escape_html(&meta.search_label)
        );
    }

    if stores.is_empty() {
        let _ = writeln!(out, "<p class=\"empty\">{NO_STORES_TEXT}</p>");
    }
    for store in stores {
        render_store(&mut out, store, meta.generated_at);
    }

    let _ = writeln!(out, "<p class=\"footer\">{STOCK_DISCLAIMER}</p>");
    out.push_str("</body>\n</html>\n");
    out
}

fn render_store(out: &mut String, store: &Store, now: DateTime<Utc>) {
    let _ = writeln!(
        out,
        "<section class=\"store\" id=\"store-{}\">",
        escape_html(&store.id)
    );
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(&store.name));
    let _ = writeln!(
        out,
        "<p class=\"address\"><strong>Adresse:</strong> {}</p>",
        escape_html(&store.address.one_line())
    );

    if store.products.is_empty() {
        let _ = writeln!(out, "<p class=\"empty\">{NO_PRODUCTS_TEXT}</p>");
    }
    for product in &store.products {
        render_product(out, product, now);
    }

    out.push_str("</section>\n");
}

fn render_product(out: &mut String, product: &Product, now: DateTime<Utc>) {
    let description = escape_html(&product.description);
    out.push_str("<div class=\"item\">\n");
    match &product.image_url {
        Some(url) => {
            let _ = writeln!(
                out,
                "<img src=\"{}\" alt=\"{description}\" loading=\"lazy\">",
                escape_html(url)
            );
        }
        None => out.push_str("<div class=\"no-image\"></div>\n"),
    }

    out.push_str("<div class=\"item-details\">\n");
    let _ = writeln!(out, "<h3>{description}</h3>");
    let _ = writeln!(
        out,
        "<p class=\"price\"><s class=\"original-price\">{}</s> <strong class=\"new-price\">{}</strong> <span class=\"discount\">{}</span></p>",
        escape_html(&format_price(product.original_price, &product.currency)),
        escape_html(&format_price(product.new_price, &product.currency)),
        format_discount(product.discount_percent()),
    );
    let _ = writeln!(
        out,
        "<p class=\"stock\">Beholdning: {}</p>",
        escape_html(&format_stock(product.stock, &product.stock_unit))
    );
    let expiry = product
        .end_time
        .map_or_else(|| "ukendt".to_string(), |ts| format_expiry(ts, now));
    let _ = writeln!(out, "<p class=\"valid-until\">Gyldig indtil: {expiry}</p>");
    out.push_str("</div>\n</div>\n");
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
