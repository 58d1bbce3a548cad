// ABOUTME: PDF backend drawing the proposal layout with lopdf and the base-14 Helvetica fonts
// ABOUTME: Pages are A4; headers and footers are stamped after the body has been paginated

mod canvas;
mod fonts;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::error::{DocumentError, DocumentResult};
use crate::format::DocumentFormat;
use crate::layout::{Block, DocumentLayout};
use crate::projector::DocumentProjector;

use canvas::{Canvas, Rgb, CONTENT_WIDTH, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use fonts::Font;

const BODY_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 8.0;
const LABEL_COLUMN: f32 = 140.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfProjector;

impl DocumentProjector for PdfProjector {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn render(&self, layout: &DocumentLayout) -> DocumentResult<Vec<u8>> {
        let mut canvas = Canvas::new();
        for block in &layout.blocks {
            draw_block(&mut canvas, block);
        }
        let mut pages = canvas.finish();
        stamp_page_chrome(&mut pages, layout);
        debug!(pages = pages.len(), "Laid out PDF pages");
        assemble(layout, pages)
    }
}

fn pdf_err(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Pdf(e.to_string())
}

fn draw_block(canvas: &mut Canvas, block: &Block) {
    match block {
        Block::Cover {
            brand,
            title,
            number_line,
            client_line,
            created_label,
            created,
            valid_label,
            valid_until,
            expired,
        } => draw_cover(
            canvas,
            brand,
            title,
            number_line,
            client_line,
            (created_label.as_str(), created.as_str()),
            (valid_label.as_str(), valid_until.as_str()),
            *expired,
        ),
        Block::Heading { number, title } => {
            canvas.ensure(60.0);
            canvas.advance(28.0);
            let baseline = canvas.y();
            canvas.text(
                MARGIN,
                baseline,
                Font::Bold,
                14.0,
                Rgb::PRIMARY,
                &format!("{}. {}", number, title),
            );
            canvas.line(MARGIN, baseline - 6.0, PAGE_WIDTH - MARGIN, baseline - 6.0, 1.2, Rgb::ACCENT);
            canvas.advance(10.0);
        }
        Block::KeyValueTable(rows) => {
            for (label, value) in rows {
                let lines = fonts::wrap(value, CONTENT_WIDTH - LABEL_COLUMN, BODY_SIZE, Font::Regular);
                let height = lines.len().max(1) as f32 * BODY_SIZE * 1.45 + 6.0;
                canvas.ensure(height);
                let top = canvas.y();
                canvas.text(MARGIN, top - BODY_SIZE - 2.0, Font::Bold, BODY_SIZE, Rgb::MUTED, label);
                for (i, line) in lines.iter().enumerate() {
                    let baseline = top - BODY_SIZE - 2.0 - i as f32 * BODY_SIZE * 1.45;
                    canvas.text(MARGIN + LABEL_COLUMN, baseline, Font::Regular, BODY_SIZE, Rgb::TEXT, line);
                }
                canvas.advance(height);
                canvas.line(MARGIN, canvas.y() + 2.0, PAGE_WIDTH - MARGIN, canvas.y() + 2.0, 0.4, Rgb::BORDER);
            }
        }
        Block::Paragraph(text) => {
            canvas.advance(4.0);
            canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Regular, BODY_SIZE, Rgb::TEXT, text);
            canvas.advance(4.0);
        }
        Block::BulletList { title, items } => {
            if let Some(title) = title {
                canvas.advance(6.0);
                canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Bold, BODY_SIZE, Rgb::TEXT, title);
            }
            for item in items {
                draw_marked_item(canvas, "•", item, Rgb::TEXT);
            }
        }
        Block::NumberedList(items) => {
            for (i, item) in items.iter().enumerate() {
                draw_marked_item(canvas, &format!("{}.", i + 1), item, Rgb::TEXT);
            }
        }
        Block::DefinitionList(entries) => {
            for (title, text) in entries {
                canvas.ensure(BODY_SIZE * 4.0);
                canvas.advance(6.0);
                canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Bold, 11.0, Rgb::PRIMARY, title);
                canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Regular, BODY_SIZE, Rgb::TEXT, text);
            }
        }
        Block::PackageHighlight {
            badge,
            name,
            price,
            description,
            delivery,
            includes,
            benefits,
        } => {
            canvas.ensure(140.0);
            canvas.advance(8.0);
            let top = canvas.y();
            canvas.fill_rect(MARGIN, top - 62.0, CONTENT_WIDTH, 62.0, Rgb::PRIMARY);
            canvas.text(MARGIN + 12.0, top - 16.0, Font::Bold, SMALL_SIZE, Rgb::WHITE, badge);
            let name_lines = fonts::wrap(name, CONTENT_WIDTH - 150.0, 13.0, Font::Bold);
            for (i, line) in name_lines.iter().take(2).enumerate() {
                canvas.text(MARGIN + 12.0, top - 33.0 - i as f32 * 15.0, Font::Bold, 13.0, Rgb::WHITE, line);
            }
            canvas.text_right(PAGE_WIDTH - MARGIN - 12.0, top - 38.0, Font::Bold, 18.0, Rgb::WHITE, price);
            canvas.advance(66.0);
            canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Regular, BODY_SIZE, Rgb::TEXT, description);
            canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Bold, BODY_SIZE, Rgb::MUTED, delivery);
            if !includes.is_empty() {
                canvas.advance(6.0);
                canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Bold, BODY_SIZE, Rgb::TEXT, "O que está incluso:");
                for item in includes {
                    draw_marked_item(canvas, "•", item, Rgb::TEXT);
                }
            }
            if !benefits.is_empty() {
                canvas.advance(6.0);
                canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Bold, BODY_SIZE, Rgb::TEXT, "Benefícios:");
                for item in benefits {
                    draw_marked_item(canvas, "•", item, Rgb::TEXT);
                }
            }
        }
        Block::Table { headers, widths, rows } => draw_table(canvas, headers, widths, rows),
        Block::ComboCard {
            tag,
            name,
            description,
            price,
            original_price,
            discount,
            includes,
            benefits,
        } => {
            canvas.ensure(170.0);
            canvas.advance(10.0);
            let top = canvas.y();
            canvas.fill_rect(MARGIN, top - 44.0, CONTENT_WIDTH, 44.0, Rgb::LIGHT);
            canvas.fill_rect(MARGIN, top - 44.0, 4.0, 44.0, Rgb::ACCENT);
            if let Some(tag) = tag {
                canvas.text(MARGIN + 14.0, top - 14.0, Font::Bold, SMALL_SIZE, Rgb::ACCENT, &tag.to_uppercase());
            }
            canvas.text(MARGIN + 14.0, top - 32.0, Font::Bold, 12.0, Rgb::PRIMARY, name);
            canvas.text_right(PAGE_WIDTH - MARGIN - 12.0, top - 32.0, Font::Bold, 14.0, Rgb::PRIMARY, price);
            let strike = match (original_price, discount) {
                (Some(original), Some(discount)) => Some(format!("{}  ({})", original, discount)),
                (Some(original), None) => Some(original.clone()),
                (None, Some(discount)) => Some(discount.clone()),
                (None, None) => None,
            };
            if let Some(strike) = strike {
                canvas.text_right(PAGE_WIDTH - MARGIN - 12.0, top - 14.0, Font::Regular, SMALL_SIZE, Rgb::MUTED, &strike);
            }
            canvas.advance(48.0);
            canvas.paragraph(MARGIN, CONTENT_WIDTH, Font::Regular, 9.0, Rgb::MUTED, description);
            for item in includes {
                draw_marked_item(canvas, "•", item, Rgb::TEXT);
            }
            for item in benefits {
                draw_marked_item(canvas, "+", item, Rgb::ACCENT);
            }
        }
        Block::ContactCard { title, lines } => {
            let height = 40.0 + lines.len() as f32 * 16.0;
            canvas.ensure(height + 20.0);
            canvas.advance(20.0);
            let top = canvas.y();
            canvas.fill_rect(MARGIN, top - height, CONTENT_WIDTH, height, Rgb::PRIMARY);
            canvas.text_centered(top - 24.0, Font::Bold, 15.0, Rgb::WHITE, title);
            for (i, line) in lines.iter().enumerate() {
                canvas.text_centered(top - 42.0 - i as f32 * 16.0, Font::Regular, BODY_SIZE, Rgb::WHITE, line);
            }
            canvas.advance(height);
        }
        Block::PageBreak => canvas.new_page(),
    }
}

fn draw_marked_item(canvas: &mut Canvas, marker: &str, text: &str, color: Rgb) {
    let indent = 16.0;
    let leading = BODY_SIZE * 1.45;
    let lines = fonts::wrap(text, CONTENT_WIDTH - indent, BODY_SIZE, Font::Regular);
    for (i, line) in lines.iter().enumerate() {
        canvas.ensure(leading);
        canvas.advance(leading);
        let baseline = canvas.y() + BODY_SIZE * 0.3;
        if i == 0 {
            canvas.text(MARGIN + 4.0, baseline, Font::Bold, BODY_SIZE, color, marker);
        }
        canvas.text(MARGIN + indent, baseline, Font::Regular, BODY_SIZE, Rgb::TEXT, line);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_cover(
    canvas: &mut Canvas,
    brand: &str,
    title: &str,
    number_line: &str,
    client_line: &str,
    created: (&str, &str),
    valid: (&str, &str),
    expired: bool,
) {
    canvas.fill_rect(0.0, PAGE_HEIGHT - 300.0, PAGE_WIDTH, 300.0, Rgb::PRIMARY);
    canvas.text_centered(PAGE_HEIGHT - 120.0, Font::Bold, 30.0, Rgb::WHITE, brand);
    canvas.fill_rect(PAGE_WIDTH / 2.0 - 40.0, PAGE_HEIGHT - 140.0, 80.0, 3.0, Rgb::ACCENT);
    canvas.text_centered(PAGE_HEIGHT - 190.0, Font::Bold, 20.0, Rgb::WHITE, title);
    canvas.text_centered(PAGE_HEIGHT - 220.0, Font::Regular, 12.0, Rgb::WHITE, number_line);

    canvas.text_centered(PAGE_HEIGHT - 380.0, Font::Regular, 11.0, Rgb::MUTED, "Preparada para");
    canvas.text_centered(PAGE_HEIGHT - 405.0, Font::Bold, 18.0, Rgb::TEXT, client_line);

    let box_top = PAGE_HEIGHT - 470.0;
    canvas.fill_rect(MARGIN + 40.0, box_top - 70.0, CONTENT_WIDTH - 80.0, 70.0, Rgb::LIGHT);
    let left = MARGIN + 70.0;
    let right = PAGE_WIDTH / 2.0 + 20.0;
    canvas.text(left, box_top - 26.0, Font::Bold, SMALL_SIZE, Rgb::MUTED, &created.0.to_uppercase());
    canvas.text(left, box_top - 46.0, Font::Bold, 12.0, Rgb::TEXT, created.1);
    canvas.text(right, box_top - 26.0, Font::Bold, SMALL_SIZE, Rgb::MUTED, &valid.0.to_uppercase());
    canvas.text(right, box_top - 46.0, Font::Bold, 12.0, Rgb::TEXT, valid.1);

    if expired {
        canvas.fill_rect(PAGE_WIDTH / 2.0 - 80.0, box_top - 120.0, 160.0, 28.0, Rgb::DANGER);
        canvas.text_centered(box_top - 110.0, Font::Bold, 12.0, Rgb::WHITE, "PROPOSTA EXPIRADA");
    }
}

fn draw_table(canvas: &mut Canvas, headers: &[String], widths: &[f32], rows: &[Vec<String>]) {
    let columns: Vec<(f32, f32)> = widths
        .iter()
        .scan(MARGIN, |x, w| {
            let width = w * CONTENT_WIDTH;
            let column = (*x, width);
            *x += width;
            Some(column)
        })
        .collect();
    let padding = 6.0;
    let leading = 9.0 * 1.4;

    let draw_row = |canvas: &mut Canvas, cells: &[String], header: bool| {
        let font = if header { Font::Bold } else { Font::Regular };
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(&columns)
            .map(|(cell, (_, width))| fonts::wrap(cell, width - 2.0 * padding, 9.0, font))
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let height = line_count as f32 * leading + 2.0 * padding;
        canvas.ensure(height);
        let top = canvas.y();
        if header {
            canvas.fill_rect(MARGIN, top - height, CONTENT_WIDTH, height, Rgb::PRIMARY);
        }
        let color = if header { Rgb::WHITE } else { Rgb::TEXT };
        for (lines, (x, _)) in wrapped.iter().zip(&columns) {
            for (i, line) in lines.iter().enumerate() {
                let baseline = top - padding - 9.0 - i as f32 * leading;
                canvas.text(x + padding, baseline, font, 9.0, color, line);
            }
        }
        canvas.advance(height);
        canvas.line(MARGIN, canvas.y(), PAGE_WIDTH - MARGIN, canvas.y(), 0.5, Rgb::BORDER);
    };

    canvas.advance(6.0);
    draw_row(canvas, headers, true);
    for row in rows {
        draw_row(canvas, row, false);
    }
}

/// Header band on every page after the cover, footer on every page.
fn stamp_page_chrome(pages: &mut [Vec<Operation>], layout: &DocumentLayout) {
    let total = pages.len();
    let brand = layout.author.to_uppercase();
    for (index, ops) in pages.iter_mut().enumerate() {
        if index > 0 {
            canvas::push_rect(ops, 0.0, PAGE_HEIGHT - 40.0, PAGE_WIDTH, 40.0, Rgb::PRIMARY);
            canvas::push_text(ops, MARGIN, PAGE_HEIGHT - 25.0, Font::Bold, 10.0, Rgb::WHITE, &brand);
            let number = &layout.proposal_number;
            let x = PAGE_WIDTH - MARGIN - fonts::text_width(number, 9.0, Font::Regular);
            canvas::push_text(ops, x, PAGE_HEIGHT - 25.0, Font::Regular, 9.0, Rgb::WHITE, number);
        }

        canvas::push_line(ops, MARGIN, 50.0, PAGE_WIDTH - MARGIN, 50.0, 0.5, Rgb::BORDER);
        canvas::push_text(ops, MARGIN, 36.0, Font::Regular, 7.0, Rgb::MUTED, &layout.footer.company_line);
        let right = format!("{} - Página {}/{}", layout.footer.proposal_line, index + 1, total);
        let x = PAGE_WIDTH - MARGIN - fonts::text_width(&right, 7.0, Font::Regular);
        canvas::push_text(ops, x, 36.0, Font::Regular, 7.0, Rgb::MUTED, &right);
    }
}

/// PDF text string in UTF-16BE with a byte order mark, for document metadata
fn utf16_string(text: &str) -> Object {
    let mut bytes = vec![0xfe, 0xff];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn assemble(layout: &DocumentLayout, pages: Vec<Vec<Operation>>) -> DocumentResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts_dict = lopdf::Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts_dict.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts_dict,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let stream = Stream::new(dictionary! {}, content.encode().map_err(pdf_err)?);
        let content_id = doc.add_object(stream);
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => utf16_string(&layout.title),
        "Author" => utf16_string(&layout.author),
        "Producer" => Object::string_literal("skz-documents"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(pdf_err)?;
    Ok(bytes)
}
