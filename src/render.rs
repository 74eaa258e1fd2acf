//! Projects an invoice and its items into printable documents.
//!
//! Both projections share one line layout, so the text document and the PDF
//! always show the same content. Tax and total are printed exactly as stored
//! on the invoice and never recomputed here.

use std::io::BufWriter;

use anyhow::Result;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::models::{Invoice, InvoiceItem};
use crate::money;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_STEP_MM: f32 = 6.0;

/// The document body, one entry per printed line, items in stored order.
fn layout_lines(invoice: &Invoice, items: &[InvoiceItem]) -> Vec<String> {
    let mut lines = vec![
        format!("Invoice ID: {}", invoice.id),
        format!("Date: {}", invoice.date),
        format!("Client: {}", invoice.client_id),
        format!("Status: {}", invoice.status),
        String::new(),
        "Items:".to_string(),
    ];

    for item in items {
        lines.push(format!(
            "{} - {} x ${}",
            item.description,
            item.quantity,
            money::format(item.price)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Tax: ${}", money::format(invoice.tax)));
    lines.push(format!("Total: ${}", money::format(invoice.total)));

    lines
}

/// Plain-text rendering of an invoice. Byte-identical across calls for the
/// same input, so output can be cached or compared in tests.
pub fn invoice_text(invoice: &Invoice, items: &[InvoiceItem]) -> String {
    let mut doc = String::from("Invoice\n\n");
    for line in layout_lines(invoice, items) {
        doc.push_str(&line);
        doc.push('\n');
    }
    doc
}

fn place_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

/// Render an invoice and its items into PDF bytes, starting a new page
/// whenever the cursor passes the bottom margin.
pub fn invoice_pdf(invoice: &Invoice, items: &[InvoiceItem]) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Invoice {}", invoice.id),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| anyhow::anyhow!("builtin font unavailable: {err}"))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| anyhow::anyhow!("builtin font unavailable: {err}"))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    place_line(&layer, &font_bold, "Invoice", 20.0, MARGIN_MM, y);
    y -= 2.0 * LINE_STEP_MM;

    for line in layout_lines(invoice, items) {
        if y < MARGIN_MM {
            let (page, inner_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(inner_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        if !line.is_empty() {
            place_line(&layer, &font, &line, 12.0, MARGIN_MM, y);
        }
        y -= LINE_STEP_MM;
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|err| anyhow::anyhow!("writing invoice pdf: {err}"))?;

    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("flushing invoice pdf: {err}"))
}
