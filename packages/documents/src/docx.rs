// ABOUTME: DOCX backend writing WordprocessingML parts with quick-xml into a zip package
// ABOUTME: Page numbering uses PAGE/NUMPAGES fields so Word fills in the real counts

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{DocumentError, DocumentResult};
use crate::format::DocumentFormat;
use crate::layout::{Block, DocumentLayout, Footer};
use crate::projector::DocumentProjector;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const PRIMARY: &str = "1E3A8A";
const ACCENT: &str = "EA580C";
const MUTED: &str = "6B7280";
const LIGHT: &str = "EEF2FA";
const DANGER: &str = "C62121";

/// Usable width of an A4 page with 2 cm margins, in twentieths of a point
const CONTENT_TWIPS: u32 = 9638;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rIdFooter1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/></Relationships>"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxProjector;

impl DocumentProjector for DocxProjector {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn render(&self, layout: &DocumentLayout) -> DocumentResult<Vec<u8>> {
        let document = document_xml(layout)?;
        let footer = footer_xml(&layout.footer)?;
        let core = core_xml(layout)?;

        let parts: [(&str, &[u8]); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes()),
            ("word/document.xml", &document),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            ("word/footer1.xml", &footer),
            ("docProps/core.xml", &core),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in parts {
            zip.start_file(name, options).map_err(docx_err)?;
            zip.write_all(bytes).map_err(docx_err)?;
        }
        let cursor = zip.finish().map_err(docx_err)?;
        Ok(cursor.into_inner())
    }
}

fn docx_err(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Docx(e.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
struct RunStyle {
    bold: bool,
    /// Half-points; 0 keeps the default size
    size: u32,
    color: Option<&'static str>,
}

impl RunStyle {
    fn plain() -> Self {
        RunStyle { size: 20, ..Default::default() }
    }

    fn bold(size: u32, color: &'static str) -> Self {
        RunStyle { bold: true, size, color: Some(color) }
    }

    fn colored(size: u32, color: &'static str) -> Self {
        RunStyle { bold: false, size, color: Some(color) }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ParaStyle {
    center: bool,
    space_after: u32,
    shading: Option<&'static str>,
    bottom_border: Option<&'static str>,
    indent: u32,
}

/// Thin wrapper over the quick-xml writer that maps every error to `DocumentError::Docx`
struct XmlOut {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlOut {
    fn new() -> DocumentResult<Self> {
        let mut out = XmlOut {
            writer: Writer::new(Cursor::new(Vec::new())),
        };
        out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(out)
    }

    fn event(&mut self, event: Event<'_>) -> DocumentResult<()> {
        self.writer.write_event(event).map_err(docx_err)
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> DocumentResult<()> {
        let mut tag = BytesStart::new(name);
        for &attr in attrs {
            tag.push_attribute(attr);
        }
        self.event(Event::Start(tag))
    }

    fn end(&mut self, name: &str) -> DocumentResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> DocumentResult<()> {
        let mut tag = BytesStart::new(name);
        for &attr in attrs {
            tag.push_attribute(attr);
        }
        self.event(Event::Empty(tag))
    }

    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> DocumentResult<()> {
        self.start(name, attrs)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }

    fn run(&mut self, text: &str, style: RunStyle) -> DocumentResult<()> {
        self.start("w:r", &[])?;
        self.start("w:rPr", &[])?;
        if style.bold {
            self.empty("w:b", &[])?;
        }
        if let Some(color) = style.color {
            self.empty("w:color", &[("w:val", color)])?;
        }
        if style.size > 0 {
            let size = style.size.to_string();
            self.empty("w:sz", &[("w:val", &size)])?;
        }
        self.end("w:rPr")?;
        self.text_element("w:t", &[("xml:space", "preserve")], text)?;
        self.end("w:r")
    }

    fn paragraph_props(&mut self, para: ParaStyle) -> DocumentResult<()> {
        self.start("w:pPr", &[])?;
        if let Some(color) = para.bottom_border {
            self.start("w:pBdr", &[])?;
            self.empty(
                "w:bottom",
                &[("w:val", "single"), ("w:sz", "8"), ("w:space", "4"), ("w:color", color)],
            )?;
            self.end("w:pBdr")?;
        }
        if let Some(fill) = para.shading {
            self.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill)])?;
        }
        let after = para.space_after.to_string();
        self.empty("w:spacing", &[("w:before", "0"), ("w:after", &after)])?;
        if para.indent > 0 {
            let indent = para.indent.to_string();
            self.empty("w:ind", &[("w:left", &indent), ("w:hanging", "240")])?;
        }
        if para.center {
            self.empty("w:jc", &[("w:val", "center")])?;
        }
        self.end("w:pPr")
    }

    fn paragraph(&mut self, runs: &[(&str, RunStyle)], para: ParaStyle) -> DocumentResult<()> {
        self.start("w:p", &[])?;
        self.paragraph_props(para)?;
        for (text, style) in runs {
            self.run(text, *style)?;
        }
        self.end("w:p")
    }

    fn line(&mut self, text: &str, style: RunStyle, para: ParaStyle) -> DocumentResult<()> {
        self.paragraph(&[(text, style)], para)
    }

    fn page_break(&mut self) -> DocumentResult<()> {
        self.start("w:p", &[])?;
        self.start("w:r", &[])?;
        self.empty("w:br", &[("w:type", "page")])?;
        self.end("w:r")?;
        self.end("w:p")
    }

    fn table(&mut self, widths: &[u32], header: Option<&[String]>, rows: &[Vec<String>]) -> DocumentResult<()> {
        self.start("w:tbl", &[])?;
        self.start("w:tblPr", &[])?;
        let total = widths.iter().sum::<u32>().to_string();
        self.empty("w:tblW", &[("w:w", &total), ("w:type", "dxa")])?;
        self.start("w:tblBorders", &[])?;
        for edge in ["w:top", "w:bottom", "w:insideH"] {
            self.empty(edge, &[("w:val", "single"), ("w:sz", "4"), ("w:color", "D1D5DB")])?;
        }
        self.end("w:tblBorders")?;
        self.end("w:tblPr")?;
        self.start("w:tblGrid", &[])?;
        for width in widths {
            let width = width.to_string();
            self.empty("w:gridCol", &[("w:w", &width)])?;
        }
        self.end("w:tblGrid")?;

        if let Some(header) = header {
            self.table_row(widths, header, Some(PRIMARY), RunStyle::bold(18, "FFFFFF"))?;
        }
        for row in rows {
            self.table_row(widths, row, None, RunStyle::colored(18, "292930"))?;
        }
        self.end("w:tbl")
    }

    fn table_row(
        &mut self,
        widths: &[u32],
        cells: &[String],
        fill: Option<&'static str>,
        style: RunStyle,
    ) -> DocumentResult<()> {
        self.start("w:tr", &[])?;
        for (cell, width) in cells.iter().zip(widths) {
            self.start("w:tc", &[])?;
            self.start("w:tcPr", &[])?;
            let width = width.to_string();
            self.empty("w:tcW", &[("w:w", &width), ("w:type", "dxa")])?;
            if let Some(fill) = fill {
                self.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill)])?;
            }
            self.end("w:tcPr")?;
            self.line(cell, style, ParaStyle { space_after: 60, ..Default::default() })?;
            self.end("w:tc")?;
        }
        self.end("w:tr")
    }

    fn bullets(&mut self, marker: &str, items: &[String]) -> DocumentResult<()> {
        for item in items {
            let marker = format!("{}\t", marker);
            self.paragraph(
                &[(marker.as_str(), RunStyle::bold(20, ACCENT)), (item.as_str(), RunStyle::plain())],
                ParaStyle { space_after: 40, indent: 360, ..Default::default() },
            )?;
        }
        Ok(())
    }
}

fn document_xml(layout: &DocumentLayout) -> DocumentResult<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("w:document", &[("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)])?;
    out.start("w:body", &[])?;

    for block in &layout.blocks {
        write_block(&mut out, block)?;
    }

    out.start("w:sectPr", &[])?;
    out.empty("w:footerReference", &[("w:type", "default"), ("r:id", "rIdFooter1")])?;
    out.empty("w:pgSz", &[("w:w", "11906"), ("w:h", "16838")])?;
    out.empty(
        "w:pgMar",
        &[
            ("w:top", "1134"),
            ("w:right", "1134"),
            ("w:bottom", "1134"),
            ("w:left", "1134"),
            ("w:header", "567"),
            ("w:footer", "567"),
            ("w:gutter", "0"),
        ],
    )?;
    out.end("w:sectPr")?;

    out.end("w:body")?;
    out.end("w:document")?;
    Ok(out.finish())
}

fn write_block(out: &mut XmlOut, block: &Block) -> DocumentResult<()> {
    let centered = |space_after| ParaStyle { center: true, space_after, ..Default::default() };
    let spaced = |space_after| ParaStyle { space_after, ..Default::default() };

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
        } => {
            out.line("", RunStyle::plain(), spaced(2400))?;
            out.line(brand, RunStyle::bold(56, PRIMARY), centered(240))?;
            out.line(title, RunStyle::bold(40, ACCENT), centered(120))?;
            out.line(number_line, RunStyle::colored(24, MUTED), centered(1200))?;
            out.line("Preparada para", RunStyle::colored(22, MUTED), centered(80))?;
            out.line(client_line, RunStyle::bold(36, "292930"), centered(960))?;
            let created_line = format!("{}: ", created_label);
            let valid_line = format!("{}: ", valid_label);
            out.paragraph(
                &[(created_line.as_str(), RunStyle::bold(20, MUTED)), (created.as_str(), RunStyle::plain())],
                centered(80),
            )?;
            out.paragraph(
                &[(valid_line.as_str(), RunStyle::bold(20, MUTED)), (valid_until.as_str(), RunStyle::plain())],
                centered(240),
            )?;
            if *expired {
                out.line("PROPOSTA EXPIRADA", RunStyle::bold(24, DANGER), centered(0))?;
            }
        }
        Block::Heading { number, title } => {
            let text = format!("{}. {}", number, title);
            out.paragraph(
                &[(text.as_str(), RunStyle::bold(28, PRIMARY))],
                ParaStyle { space_after: 160, bottom_border: Some(ACCENT), ..Default::default() },
            )?;
        }
        Block::KeyValueTable(rows) => {
            let rows: Vec<Vec<String>> = rows.iter().map(|(k, v)| vec![k.clone(), v.clone()]).collect();
            out.table(&[2800, CONTENT_TWIPS - 2800], None, &rows)?;
            out.line("", RunStyle::plain(), spaced(120))?;
        }
        Block::Paragraph(text) => out.line(text, RunStyle::plain(), spaced(160))?,
        Block::BulletList { title, items } => {
            if let Some(title) = title {
                out.line(title, RunStyle::bold(20, "292930"), spaced(80))?;
            }
            out.bullets("•", items)?;
        }
        Block::NumberedList(items) => {
            for (i, item) in items.iter().enumerate() {
                let marker = format!("{}.\t", i + 1);
                out.paragraph(
                    &[(marker.as_str(), RunStyle::bold(20, PRIMARY)), (item.as_str(), RunStyle::plain())],
                    ParaStyle { space_after: 60, indent: 360, ..Default::default() },
                )?;
            }
        }
        Block::DefinitionList(entries) => {
            for (title, text) in entries {
                out.line(title, RunStyle::bold(22, PRIMARY), spaced(40))?;
                out.line(text, RunStyle::plain(), spaced(160))?;
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
            let band = |space_after| ParaStyle {
                space_after,
                shading: Some(PRIMARY),
                ..Default::default()
            };
            out.line(badge, RunStyle::bold(16, "FFFFFF"), band(0))?;
            out.line(name, RunStyle::bold(28, "FFFFFF"), band(0))?;
            out.line(price, RunStyle::bold(36, "FFFFFF"), band(160))?;
            out.line(description, RunStyle::plain(), spaced(80))?;
            out.line(delivery, RunStyle::bold(20, MUTED), spaced(120))?;
            if !includes.is_empty() {
                out.line("O que está incluso:", RunStyle::bold(20, "292930"), spaced(60))?;
                out.bullets("•", includes)?;
            }
            if !benefits.is_empty() {
                out.line("Benefícios:", RunStyle::bold(20, "292930"), spaced(60))?;
                out.bullets("•", benefits)?;
            }
        }
        Block::Table { headers, widths, rows } => {
            let twips: Vec<u32> = widths
                .iter()
                .map(|w| (w * CONTENT_TWIPS as f32).round() as u32)
                .collect();
            out.table(&twips, Some(headers), rows)?;
            out.line("", RunStyle::plain(), spaced(120))?;
        }
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
            let card = |space_after| ParaStyle {
                space_after,
                shading: Some(LIGHT),
                ..Default::default()
            };
            if let Some(tag) = tag {
                out.line(&tag.to_uppercase(), RunStyle::bold(16, ACCENT), card(0))?;
            }
            let price_line = format!("  {}", price);
            out.paragraph(
                &[(name.as_str(), RunStyle::bold(24, PRIMARY)), (price_line.as_str(), RunStyle::bold(24, PRIMARY))],
                card(0),
            )?;
            let was = match (original_price, discount) {
                (Some(original), Some(discount)) => format!("{} ({})", original, discount),
                (Some(original), None) => original.clone(),
                (None, Some(discount)) => discount.clone(),
                (None, None) => String::new(),
            };
            out.line(&was, RunStyle::colored(16, MUTED), card(80))?;
            out.line(description, RunStyle::colored(18, MUTED), spaced(60))?;
            out.bullets("•", includes)?;
            out.bullets("+", benefits)?;
            out.line("", RunStyle::plain(), spaced(120))?;
        }
        Block::ContactCard { title, lines } => {
            let card = |space_after| ParaStyle {
                center: true,
                space_after,
                shading: Some(PRIMARY),
                ..Default::default()
            };
            out.line(title, RunStyle::bold(30, "FFFFFF"), card(80))?;
            for line in lines {
                out.line(line, RunStyle::colored(20, "FFFFFF"), card(40))?;
            }
        }
        Block::PageBreak => out.page_break()?,
    }
    Ok(())
}

fn field(out: &mut XmlOut, instruction: &str, placeholder: &str) -> DocumentResult<()> {
    out.start("w:fldSimple", &[("w:instr", instruction)])?;
    out.run(placeholder, RunStyle::colored(14, MUTED))?;
    out.end("w:fldSimple")
}

fn footer_xml(footer: &Footer) -> DocumentResult<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("w:ftr", &[("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)])?;

    out.paragraph(
        &[(footer.company_line.as_str(), RunStyle::colored(14, MUTED))],
        ParaStyle { center: true, ..Default::default() },
    )?;

    out.start("w:p", &[])?;
    out.paragraph_props(ParaStyle { center: true, ..Default::default() })?;
    let prefix = format!("{} - Página ", footer.proposal_line);
    out.run(&prefix, RunStyle::colored(14, MUTED))?;
    field(&mut out, "PAGE", "1")?;
    out.run("/", RunStyle::colored(14, MUTED))?;
    field(&mut out, "NUMPAGES", "1")?;
    out.end("w:p")?;

    out.end("w:ftr")?;
    Ok(out.finish())
}

fn core_xml(layout: &DocumentLayout) -> DocumentResult<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    out.text_element("dc:title", &[], &layout.title)?;
    out.text_element("dc:creator", &[], &layout.author)?;
    out.text_element("dc:identifier", &[], &layout.proposal_number)?;
    out.end("cp:coreProperties")?;
    Ok(out.finish())
}
