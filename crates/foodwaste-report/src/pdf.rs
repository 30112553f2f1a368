//! PDF rendition of the report, built with `genpdf`.
//!
//! Carries the same content as the HTML document in the same order. Product
//! images come pre-downloaded in [`ProductImages`]; a product whose image is
//! missing there is rendered text-only.

use chrono::{DateTime, Utc};
use foodwaste_core::{Product, Store};
use genpdf::elements::{Break, FrameCellDecorator, LinearLayout, Paragraph, TableLayout};
use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Alignment, Element, Position, RenderResult, Scale, SimplePageDecorator, Size};
use image::{DynamicImage, GenericImageView};

use crate::error::RenderError;
use crate::format::{format_discount, format_expiry, format_price, format_stock, format_timestamp};
use crate::html::{ReportMeta, NO_PRODUCTS_TEXT, NO_STORES_TEXT, REPORT_TITLE, STOCK_DISCLAIMER};
use crate::images::ProductImages;

const PAGE_MARGIN_MM: i32 = 15;
const BASE_FONT_SIZE: u8 = 10;
const IMAGE_WIDTH_MM: f64 = 28.0;
const IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

const MUTED: Color = Color::Rgb(110, 110, 110);
const ACCENT: Color = Color::Rgb(0, 150, 90);
const ALERT: Color = Color::Rgb(200, 30, 30);

/// Renders the report as PDF bytes.
///
/// # Errors
///
/// Returns [`RenderError::Pdf`] if layout or serialisation fails.
pub fn render_pdf(
    stores: &[Store],
    meta: &ReportMeta,
    fonts: FontFamily<FontData>,
    images: &ProductImages,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = genpdf::Document::new(fonts);
    doc.set_title(REPORT_TITLE);
    doc.set_font_size(BASE_FONT_SIZE);
    doc.set_line_spacing(1.2);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    decorator.set_header(|page| {
        Paragraph::new(format!("Side {page}"))
            .aligned(Alignment::Right)
            .styled(Style::new().with_font_size(8).with_color(MUTED))
    });
    doc.set_page_decorator(decorator);

    doc.push(Paragraph::new(REPORT_TITLE).styled(Style::new().bold().with_font_size(18)));
    doc.push(
        Paragraph::new(format!("Opdateret: {}", format_timestamp(meta.generated_at)))
            .styled(Style::new().with_color(MUTED)),
    );
    if !meta.search_label.is_empty() {
        doc.push(
            Paragraph::new(format!("Søgning: {}", meta.search_label))
                .styled(Style::new().with_color(MUTED)),
        );
    }
    doc.push(Break::new(1));

    if stores.is_empty() {
        doc.push(Paragraph::new(NO_STORES_TEXT).styled(Style::new().italic()));
    }
    for store in stores {
        push_store(&mut doc, store, meta.generated_at, images)?;
    }

    doc.push(Break::new(1));
    doc.push(
        Paragraph::new(STOCK_DISCLAIMER)
            .styled(Style::new().with_font_size(8).with_color(MUTED)),
    );

    let mut bytes = Vec::new();
    doc.render(&mut bytes)?;
    Ok(bytes)
}

fn push_store(
    doc: &mut genpdf::Document,
    store: &Store,
    now: DateTime<Utc>,
    images: &ProductImages,
) -> Result<(), Error> {
    doc.push(Paragraph::new(store.name.as_str()).styled(Style::new().bold().with_font_size(14)));
    doc.push(Paragraph::new(format!("Adresse: {}", store.address.one_line())));
    doc.push(Break::new(0.5));

    if store.products.is_empty() {
        doc.push(Paragraph::new(NO_PRODUCTS_TEXT).styled(Style::new().italic()));
        doc.push(Break::new(1));
        return Ok(());
    }

    for product in &store.products {
        let details = product_details(product, now);
        let image = product
            .image_url
            .as_deref()
            .and_then(|url| images.get(url))
            .and_then(|img| scaled_image(img.clone()));

        match image {
            Some(image) => {
                let mut table = TableLayout::new(vec![1, 3]);
                table.set_cell_decorator(FrameCellDecorator::new(false, false, false));
                table.row().element(image.padded(1)).element(details).push()?;
                doc.push(table);
            }
            None => doc.push(details),
        }
        doc.push(Break::new(0.5));
    }
    doc.push(Break::new(1));
    Ok(())
}

fn product_details(product: &Product, now: DateTime<Utc>) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    layout.push(Paragraph::new(product.description.as_str()).styled(Style::new().bold()));
    layout.push(PriceLine::new(vec![
        (
            StyledString::new(
                format_price(product.original_price, &product.currency),
                Style::new().with_color(MUTED),
            ),
            true,
        ),
        (StyledString::new("  ", Style::new()), false),
        (
            StyledString::new(
                format_price(product.new_price, &product.currency),
                Style::new().bold().with_color(ACCENT),
            ),
            false,
        ),
        (StyledString::new("  ", Style::new()), false),
        (
            StyledString::new(
                format_discount(product.discount_percent()),
                Style::new().bold().with_color(ALERT),
            ),
            false,
        ),
    ]));
    layout.push(Paragraph::new(format!(
        "Beholdning: {}",
        format_stock(product.stock, &product.stock_unit)
    )));
    let expiry = product
        .end_time
        .map_or_else(|| "ukendt".to_string(), |ts| format_expiry(ts, now));
    layout.push(Paragraph::new(format!("Gyldig indtil: {expiry}")));
    layout
}

fn scaled_image(image: DynamicImage) -> Option<genpdf::elements::Image> {
    let (px_width, _) = image.dimensions();
    if px_width == 0 {
        return None;
    }
    let natural_width_mm = MM_PER_INCH * f64::from(px_width) / IMAGE_DPI;
    let scale = IMAGE_WIDTH_MM / natural_width_mm;
    match genpdf::elements::Image::from_dynamic_image(image) {
        Ok(img) => Some(img.with_scale(Scale::new(scale, scale))),
        Err(err) => {
            tracing::warn!(error = %err, "skipping product image the PDF backend rejected");
            None
        }
    }
}

/// A single line of styled spans where selected spans are struck through.
struct PriceLine {
    spans: Vec<(StyledString, bool)>,
}

impl PriceLine {
    fn new(spans: Vec<(StyledString, bool)>) -> Self {
        Self { spans }
    }
}

impl Element for PriceLine {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let mut prepared = Vec::with_capacity(self.spans.len());
        let mut total_width = genpdf::Mm::default();
        let mut line_height = style.line_height(&context.font_cache);
        let mut glyph_height = genpdf::Mm::default();

        for (span, struck) in &self.spans {
            let mut string = span.clone();
            string.style = style.and(string.style);
            let width = string.width(&context.font_cache);
            total_width += width;
            line_height = line_height.max(string.style.line_height(&context.font_cache));
            glyph_height = glyph_height.max(
                string
                    .style
                    .font(&context.font_cache)
                    .glyph_height(string.style.font_size()),
            );
            prepared.push((string, *struck, width));
        }

        if line_height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let Some(mut section) = area.text_section(&context.font_cache, Position::new(0, 0), style)
        else {
            result.has_more = true;
            return Ok(result);
        };
        for (string, _, _) in &prepared {
            section.print_str(&string.s, string.style)?;
        }
        drop(section);

        // Roughly through the middle of lowercase glyphs.
        let strike_y = glyph_height - glyph_height / 3.0;
        let mut cursor = genpdf::Mm::default();
        for (string, struck, width) in &prepared {
            if *struck {
                let mut line_style = Style::new();
                if let Some(color) = string.style.color() {
                    line_style = line_style.with_color(color);
                }
                area.draw_line(
                    vec![
                        Position::new(cursor, strike_y),
                        Position::new(cursor + *width, strike_y),
                    ],
                    line_style,
                );
            }
            cursor += *width;
        }

        result.size = Size::new(total_width, line_height);
        Ok(result)
    }
}
