// ABOUTME: HTML backend for the client-facing proposal page
// ABOUTME: Same layout blocks as PDF/DOCX, rendered with inline CSS and optional download links

use crate::error::DocumentResult;
use crate::format::DocumentFormat;
use crate::layout::{Block, DocumentLayout};
use crate::projector::DocumentProjector;
pub use skz_core::html_escape;

const PROPOSAL_CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; color: #292930; background: #f3f4f8; line-height: 1.55; }
.container { max-width: 860px; margin: 0 auto; background: #fff; }
.cover { background: #1e3a8a; color: #fff; text-align: center; padding: 72px 32px 56px; }
.cover .brand { font-size: 34px; font-weight: 700; letter-spacing: 2px; }
.cover .rule { width: 80px; height: 3px; background: #ea580c; margin: 16px auto 28px; }
.cover .title { font-size: 22px; font-weight: 700; }
.cover .number { opacity: .85; margin-top: 6px; }
.cover .client { margin-top: 36px; font-size: 20px; font-weight: 700; }
.cover .dates { display: flex; justify-content: center; gap: 48px; margin-top: 28px; }
.cover .dates span { display: block; font-size: 11px; text-transform: uppercase; opacity: .75; }
.expired { display: inline-block; margin-top: 24px; background: #c62121; color: #fff; padding: 6px 18px; border-radius: 4px; font-weight: 700; }
.downloads { display: flex; gap: 12px; justify-content: center; padding: 20px; border-bottom: 1px solid #e5e7eb; }
.downloads a { background: #ea580c; color: #fff; text-decoration: none; padding: 10px 20px; border-radius: 6px; font-weight: 600; }
section { padding: 8px 40px; }
h2 { color: #1e3a8a; border-bottom: 2px solid #ea580c; padding-bottom: 6px; margin-top: 32px; }
table { width: 100%; border-collapse: collapse; margin: 12px 0; }
th { background: #1e3a8a; color: #fff; text-align: left; padding: 8px; }
td { border-bottom: 1px solid #d1d5db; padding: 8px; vertical-align: top; }
table.kv td:first-child { width: 30%; font-weight: 600; color: #6b7280; }
.highlight { border: 2px solid #1e3a8a; border-radius: 8px; overflow: hidden; margin: 16px 0; }
.highlight header { background: #1e3a8a; color: #fff; padding: 16px 20px; display: flex; justify-content: space-between; align-items: center; }
.highlight .badge { font-size: 11px; font-weight: 700; letter-spacing: 1px; }
.highlight .name { font-size: 18px; font-weight: 700; }
.highlight .price { font-size: 24px; font-weight: 700; }
.highlight .body { padding: 12px 20px; }
.combo { background: #eef2fa; border-left: 4px solid #ea580c; border-radius: 6px; padding: 14px 18px; margin: 16px 0; }
.combo .tag { color: #ea580c; font-size: 11px; font-weight: 700; text-transform: uppercase; }
.combo .top { display: flex; justify-content: space-between; font-weight: 700; color: #1e3a8a; font-size: 16px; }
.combo .was { color: #6b7280; font-size: 12px; text-align: right; }
.combo .was s { margin-right: 6px; }
.muted { color: #6b7280; }
dl dt { font-weight: 700; color: #1e3a8a; margin-top: 12px; }
dl dd { margin: 4px 0 0; }
.contact { background: #1e3a8a; color: #fff; text-align: center; padding: 28px; margin: 32px 0 16px; border-radius: 8px; }
.contact h3 { margin: 0 0 10px; font-size: 22px; }
.choose { background: #f8fafc; border: 1px solid #e5e7eb; border-radius: 8px; padding: 20px; margin: 24px 0; }
.choose form { display: flex; justify-content: space-between; align-items: center; padding: 10px 0; border-bottom: 1px solid #e5e7eb; }
.choose button { background: #1e3a8a; color: #fff; border: 0; padding: 8px 18px; border-radius: 6px; font-weight: 600; cursor: pointer; }
.choose .picked { color: #15803d; font-weight: 700; }
.whatsapp { display: inline-block; background: #25d366; color: #fff; text-decoration: none; padding: 10px 22px; border-radius: 6px; font-weight: 700; margin-top: 12px; }
footer { text-align: center; font-size: 12px; color: #6b7280; padding: 24px; border-top: 1px solid #e5e7eb; }
"#;

/// Absolute or root-relative URLs for the download buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLinks {
    pub pdf: String,
    pub docx: String,
}

/// A package the client can pick from the live proposal page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChoice {
    pub id: String,
    pub name: String,
    pub price: String,
}

/// Interactive part of the live proposal page. Never part of a downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerActions {
    /// Form target; receives a urlencoded `packageId`
    pub select_url: String,
    pub choices: Vec<PackageChoice>,
    /// Package already chosen; the forms are replaced by a confirmation
    pub selected: Option<String>,
    /// Expired proposals list the packages without forms
    pub expired: bool,
    pub whatsapp_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct HtmlProjector {
    pub downloads: Option<DownloadLinks>,
    pub actions: Option<ViewerActions>,
}

impl HtmlProjector {
    pub fn with_downloads(downloads: DownloadLinks) -> Self {
        HtmlProjector {
            downloads: Some(downloads),
            actions: None,
        }
    }

    pub fn with_actions(mut self, actions: ViewerActions) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Renders the complete page as a string
    pub fn render_page(&self, layout: &DocumentLayout) -> String {
        let mut body = String::new();
        let mut section_open = false;

        for block in &layout.blocks {
            match block {
                Block::Cover { .. } => {
                    render_block(&mut body, block);
                    if let Some(links) = &self.downloads {
                        body.push_str(&format!(
                            "<nav class=\"downloads\"><a href=\"{}\">Baixar PDF</a><a href=\"{}\">Baixar DOCX</a></nav>\n",
                            html_escape(&links.pdf),
                            html_escape(&links.docx)
                        ));
                    }
                }
                Block::Heading { .. } => {
                    if section_open {
                        body.push_str("</section>\n");
                    }
                    body.push_str("<section>\n");
                    section_open = true;
                    render_block(&mut body, block);
                }
                _ => render_block(&mut body, block),
            }
        }
        if section_open {
            body.push_str("</section>\n");
        }
        if let Some(actions) = &self.actions {
            render_actions(&mut body, actions);
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="robots" content="noindex">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
    <div class="container">
{}
        <footer>{}<br>{}</footer>
    </div>
</body>
</html>"#,
            html_escape(&layout.title),
            PROPOSAL_CSS,
            body,
            html_escape(&layout.footer.company_line),
            html_escape(&layout.footer.proposal_line)
        )
    }
}

impl DocumentProjector for HtmlProjector {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Html
    }

    fn render(&self, layout: &DocumentLayout) -> DocumentResult<Vec<u8>> {
        Ok(self.render_page(layout).into_bytes())
    }
}

fn list(html: &mut String, tag: &str, items: &[String]) {
    html.push_str(&format!("<{}>\n", tag));
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
    }
    html.push_str(&format!("</{}>\n", tag));
}

fn render_block(html: &mut String, block: &Block) {
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
            html.push_str("<header class=\"cover\">\n");
            html.push_str(&format!("<div class=\"brand\">{}</div><div class=\"rule\"></div>\n", html_escape(brand)));
            html.push_str(&format!("<div class=\"title\">{}</div>\n", html_escape(title)));
            html.push_str(&format!("<div class=\"number\">{}</div>\n", html_escape(number_line)));
            html.push_str(&format!("<div class=\"client\">{}</div>\n", html_escape(client_line)));
            html.push_str(&format!(
                "<div class=\"dates\"><div><span>{}</span>{}</div><div><span>{}</span>{}</div></div>\n",
                html_escape(created_label),
                html_escape(created),
                html_escape(valid_label),
                html_escape(valid_until)
            ));
            if *expired {
                html.push_str("<div class=\"expired\">PROPOSTA EXPIRADA</div>\n");
            }
            html.push_str("</header>\n");
        }
        Block::Heading { number, title } => {
            html.push_str(&format!("<h2>{}. {}</h2>\n", number, html_escape(title)));
        }
        Block::KeyValueTable(rows) => {
            html.push_str("<table class=\"kv\">\n");
            for (label, value) in rows {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td></tr>\n",
                    html_escape(label),
                    html_escape(value)
                ));
            }
            html.push_str("</table>\n");
        }
        Block::Paragraph(text) => html.push_str(&format!("<p>{}</p>\n", html_escape(text))),
        Block::BulletList { title, items } => {
            if let Some(title) = title {
                html.push_str(&format!("<p><strong>{}</strong></p>\n", html_escape(title)));
            }
            list(html, "ul", items);
        }
        Block::NumberedList(items) => list(html, "ol", items),
        Block::DefinitionList(entries) => {
            html.push_str("<dl>\n");
            for (term, text) in entries {
                html.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>\n",
                    html_escape(term),
                    html_escape(text)
                ));
            }
            html.push_str("</dl>\n");
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
            html.push_str("<div class=\"highlight\">\n<header>");
            html.push_str(&format!(
                "<div><div class=\"badge\">{}</div><div class=\"name\">{}</div></div><div class=\"price\">{}</div>",
                html_escape(badge),
                html_escape(name),
                html_escape(price)
            ));
            html.push_str("</header>\n<div class=\"body\">\n");
            html.push_str(&format!("<p>{}</p>\n", html_escape(description)));
            html.push_str(&format!("<p class=\"muted\"><strong>{}</strong></p>\n", html_escape(delivery)));
            if !includes.is_empty() {
                html.push_str("<p><strong>O que está incluso:</strong></p>\n");
                list(html, "ul", includes);
            }
            if !benefits.is_empty() {
                html.push_str("<p><strong>Benefícios:</strong></p>\n");
                list(html, "ul", benefits);
            }
            html.push_str("</div>\n</div>\n");
        }
        Block::Table { headers, rows, .. } => {
            html.push_str("<table>\n<tr>");
            for header in headers {
                html.push_str(&format!("<th>{}</th>", html_escape(header)));
            }
            html.push_str("</tr>\n");
            for row in rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str(&format!("<td>{}</td>", html_escape(cell)));
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</table>\n");
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
            html.push_str("<div class=\"combo\">\n");
            if let Some(tag) = tag {
                html.push_str(&format!("<div class=\"tag\">{}</div>\n", html_escape(tag)));
            }
            html.push_str(&format!(
                "<div class=\"top\"><span>{}</span><span>{}</span></div>\n",
                html_escape(name),
                html_escape(price)
            ));
            if original_price.is_some() || discount.is_some() {
                html.push_str("<div class=\"was\">");
                if let Some(original) = original_price {
                    html.push_str(&format!("<s>{}</s>", html_escape(original)));
                }
                if let Some(discount) = discount {
                    html.push_str(&html_escape(discount));
                }
                html.push_str("</div>\n");
            }
            html.push_str(&format!("<p class=\"muted\">{}</p>\n", html_escape(description)));
            list(html, "ul", includes);
            if !benefits.is_empty() {
                list(html, "ul", benefits);
            }
            html.push_str("</div>\n");
        }
        Block::ContactCard { title, lines } => {
            html.push_str(&format!("<div class=\"contact\">\n<h3>{}</h3>\n", html_escape(title)));
            for line in lines {
                html.push_str(&format!("<div>{}</div>\n", html_escape(line)));
            }
            html.push_str("</div>\n");
        }
        Block::PageBreak => {}
    }
}

fn render_actions(html: &mut String, actions: &ViewerActions) {
    html.push_str("<section class=\"choose\" id=\"escolher\">\n<h2>Escolha seu pacote</h2>\n");

    let picked = actions
        .selected
        .as_deref()
        .map(|id| {
            actions
                .choices
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.as_str())
                .unwrap_or(id)
        });

    match picked {
        Some(name) => html.push_str(&format!(
            "<p class=\"picked\">Pacote selecionado: {}</p>\n",
            html_escape(name)
        )),
        None if actions.expired => {
            html.push_str("<p class=\"muted\">Esta proposta expirou. Fale com a gente para atualizar os valores.</p>\n");
        }
        None => {
            for choice in &actions.choices {
                html.push_str(&format!(
                    "<form method=\"post\" action=\"{}\"><span><strong>{}</strong> {}</span>\
                     <input type=\"hidden\" name=\"packageId\" value=\"{}\">\
                     <button type=\"submit\">Escolher este pacote</button></form>\n",
                    html_escape(&actions.select_url),
                    html_escape(&choice.name),
                    html_escape(&choice.price),
                    html_escape(&choice.id)
                ));
            }
        }
    }

    html.push_str(&format!(
        "<a class=\"whatsapp\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Falar no WhatsApp</a>\n</section>\n",
        html_escape(&actions.whatsapp_url)
    ));
}
