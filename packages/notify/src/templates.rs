// ABOUTME: HTML and plain-text email bodies for proposal delivery and first-view alerts
// ABOUTME: All interpolated values are HTML-escaped in the markup variant

use chrono::{DateTime, Datelike, Utc};
use skz_core::{format_long_date, format_short_date, html_escape, ProposalRecord};

use crate::mailer::OutgoingEmail;

const FALLBACK_SERVICE_NAME: &str = "Serviço personalizado";

/// Content of the "your proposal is ready" email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalEmail {
    pub client_name: String,
    pub proposal_number: String,
    pub proposal_url: String,
    pub service_name: String,
    pub company_name: Option<String>,
    pub valid_until: DateTime<Utc>,
    pub year: i32,
}

impl ProposalEmail {
    pub fn from_record(record: &ProposalRecord, service_name: Option<&str>, proposal_url: &str) -> Self {
        Self {
            client_name: record.client_name.clone(),
            proposal_number: record.proposal_number.clone(),
            proposal_url: proposal_url.to_string(),
            service_name: service_name.unwrap_or(FALLBACK_SERVICE_NAME).to_string(),
            company_name: record
                .client_company
                .clone()
                .filter(|c| !c.trim().is_empty()),
            valid_until: record.valid_until,
            year: record.created_at.year(),
        }
    }

    pub fn subject(&self) -> String {
        format!("✨ Sua Proposta {} está pronta!", self.proposal_number)
    }

    pub fn html(&self) -> String {
        let company = self
            .company_name
            .as_deref()
            .map(|c| format!(" e a {}", html_escape(c)))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Sua Proposta Comercial - SKYZ DESIGN</title>
</head>
<body style="margin:0;padding:0;font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;background-color:#f5f5f5;">
  <table role="presentation" style="width:100%;border-collapse:collapse;">
    <tr><td align="center" style="padding:40px 20px;">
      <table role="presentation" style="width:100%;max-width:600px;border-collapse:collapse;background-color:#ffffff;border-radius:16px;overflow:hidden;">
        <tr><td style="background:linear-gradient(135deg,#0ea5e9 0%,#8b5cf6 100%);padding:40px 30px;text-align:center;">
          <h1 style="color:#ffffff;margin:0;font-size:28px;font-weight:700;">✨ Sua Proposta Está Pronta!</h1>
          <p style="color:rgba(255,255,255,0.9);margin:10px 0 0;font-size:16px;">Proposta {number}</p>
        </td></tr>
        <tr><td style="padding:40px 30px;">
          <p style="color:#334155;font-size:16px;line-height:1.6;margin:0 0 20px;">Olá, <strong>{name}</strong>! 👋</p>
          <p style="color:#64748b;font-size:15px;line-height:1.6;margin:0 0 25px;">
            Preparamos uma proposta comercial personalizada para você{company}.
            Nossa equipe analisou suas necessidades e criou uma solução sob medida.
          </p>
          <table role="presentation" style="width:100%;border-collapse:collapse;margin-bottom:25px;">
            <tr><td style="background:#f0f9ff;padding:20px;border-radius:12px;border-left:4px solid #0ea5e9;">
              <p style="color:#64748b;font-size:13px;margin:0 0 5px;text-transform:uppercase;letter-spacing:0.5px;">Serviço Solicitado</p>
              <p style="color:#1e293b;font-size:18px;font-weight:600;margin:0;">{service}</p>
            </td></tr>
          </table>
          <table role="presentation" style="width:100%;border-collapse:collapse;margin-bottom:30px;">
            <tr><td align="center" style="padding:10px 0;">
              <a href="{url}" style="display:inline-block;background:#0ea5e9;color:#ffffff;text-decoration:none;padding:16px 40px;border-radius:50px;font-size:16px;font-weight:600;">📄 Ver Proposta Completa</a>
            </td></tr>
          </table>
          <table role="presentation" style="width:100%;border-collapse:collapse;margin-bottom:20px;">
            <tr><td style="background-color:#fef3c7;padding:15px 20px;border-radius:8px;text-align:center;">
              <p style="color:#92400e;font-size:14px;margin:0;">⏰ <strong>Válida até {valid}</strong></p>
            </td></tr>
          </table>
          <p style="color:#64748b;font-size:14px;line-height:1.6;margin:0;">
            Caso tenha dúvidas, estamos à disposição para agendar uma conversa.
            É só responder este email ou clicar no botão de WhatsApp na proposta.
          </p>
        </td></tr>
        <tr><td style="background-color:#f8fafc;padding:30px;text-align:center;border-top:1px solid #e2e8f0;">
          <p style="color:#1e293b;font-size:18px;font-weight:700;margin:0 0 5px;">SKYZ DESIGN</p>
          <p style="color:#64748b;font-size:13px;margin:0 0 15px;">Design &amp; Desenvolvimento Web</p>
          <p style="color:#94a3b8;font-size:12px;margin:0;">Este email foi enviado automaticamente.<br>© {year} SKYZ DESIGN. Todos os direitos reservados.</p>
        </td></tr>
      </table>
    </td></tr>
  </table>
</body>
</html>
"#,
            number = html_escape(&self.proposal_number),
            name = html_escape(&self.client_name),
            company = company,
            service = html_escape(&self.service_name),
            url = html_escape(&self.proposal_url),
            valid = format_long_date(self.valid_until),
            year = self.year,
        )
    }

    pub fn text(&self) -> String {
        let intro = match &self.company_name {
            Some(company) => format!(
                "Preparamos uma proposta personalizada para você e a {}.",
                company
            ),
            None => "Preparamos uma proposta personalizada para você.".to_string(),
        };

        format!(
            "Olá, {name}! 👋\n\n\
             Sua Proposta Comercial está pronta!\n\
             Proposta: {number}\n\n\
             {intro}\n\n\
             📋 Serviço Solicitado: {service}\n\n\
             🔗 Acesse sua proposta completa:\n{url}\n\n\
             ⏰ Válida até: {valid}\n\n\
             Caso tenha dúvidas, estamos à disposição para agendar uma conversa.\n\
             É só responder este email.\n\n\
             ---\n\
             SKYZ DESIGN\n\
             Design & Desenvolvimento Web\n\
             © {year} SKYZ DESIGN. Todos os direitos reservados.\n",
            name = self.client_name,
            number = self.proposal_number,
            intro = intro,
            service = self.service_name,
            url = self.proposal_url,
            valid = format_long_date(self.valid_until),
            year = self.year,
        )
    }

    pub fn to_email(&self, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: vec![to.to_string()],
            subject: self.subject(),
            html: self.html(),
            text: self.text(),
        }
    }
}

/// Alert sent to the agency the first time a client opens a proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstViewNotice {
    pub proposal_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_company: Option<String>,
    pub proposal_url: String,
    pub viewed_at: DateTime<Utc>,
}

impl FirstViewNotice {
    pub fn from_record(record: &ProposalRecord, proposal_url: &str, viewed_at: DateTime<Utc>) -> Self {
        Self {
            proposal_number: record.proposal_number.clone(),
            client_name: record.client_name.clone(),
            client_email: record.client_email.clone(),
            client_company: record.client_company.clone(),
            proposal_url: proposal_url.to_string(),
            viewed_at,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "👀 Proposta {} visualizada por {}",
            self.proposal_number, self.client_name
        )
    }

    fn client_line(&self) -> String {
        match self.client_company.as_deref().filter(|c| !c.is_empty()) {
            Some(company) => format!("{} ({}) <{}>", self.client_name, company, self.client_email),
            None => format!("{} <{}>", self.client_name, self.client_email),
        }
    }

    pub fn text(&self) -> String {
        format!(
            "A proposta {} foi aberta pela primeira vez.\n\n\
             Cliente: {}\n\
             Visualizada em: {} às {} UTC\n\n\
             {}\n",
            self.proposal_number,
            self.client_line(),
            format_short_date(self.viewed_at),
            self.viewed_at.format("%H:%M"),
            self.proposal_url,
        )
    }

    pub fn html(&self) -> String {
        format!(
            "<p>A proposta <strong>{}</strong> foi aberta pela primeira vez.</p>\n\
             <p>Cliente: {}<br>Visualizada em: {} às {} UTC</p>\n\
             <p><a href=\"{}\">Abrir proposta</a></p>\n",
            html_escape(&self.proposal_number),
            html_escape(&self.client_line()),
            format_short_date(self.viewed_at),
            self.viewed_at.format("%H:%M"),
            html_escape(&self.proposal_url),
        )
    }

    pub fn to_email(&self, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: vec![to.to_string()],
            subject: self.subject(),
            html: self.html(),
            text: self.text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn email(company: Option<&str>) -> ProposalEmail {
        ProposalEmail {
            client_name: "Ana <Souza>".to_string(),
            proposal_number: "SKZ-20261019-042".to_string(),
            proposal_url: "https://skyz.test/proposta/abc?x=1&y=2".to_string(),
            service_name: "Landing Page / Página de Vendas".to_string(),
            company_name: company.map(str::to_string),
            valid_until: Utc.with_ymd_and_hms(2026, 11, 3, 14, 0, 0).unwrap(),
            year: 2026,
        }
    }

    #[test]
    fn test_subject() {
        assert_eq!(email(None).subject(), "✨ Sua Proposta SKZ-20261019-042 está pronta!");
    }

    #[test]
    fn test_html_escapes_and_mentions_company() {
        let html = email(Some("Café & Cia")).html();
        assert!(html.contains("Olá, <strong>Ana &lt;Souza&gt;</strong>"));
        assert!(html.contains("para você e a Café &amp; Cia."));
        assert!(html.contains("href=\"https://skyz.test/proposta/abc?x=1&amp;y=2\""));
        assert!(html.contains("Válida até 03 de novembro de 2026"));
        assert!(html.contains("© 2026 SKYZ DESIGN"));
        assert!(!html.contains("<Souza>"));
    }

    #[test]
    fn test_text_without_company() {
        let text = email(None).text();
        assert!(text.starts_with("Olá, Ana <Souza>! 👋"));
        assert!(text.contains("Preparamos uma proposta personalizada para você.\n"));
        assert!(text.contains("📋 Serviço Solicitado: Landing Page / Página de Vendas"));
        assert!(text.contains("https://skyz.test/proposta/abc?x=1&y=2"));
        assert!(text.contains("⏰ Válida até: 03 de novembro de 2026"));
    }

    #[test]
    fn test_first_view_notice() {
        let notice = FirstViewNotice {
            proposal_number: "SKZ-20261019-042".to_string(),
            client_name: "Ana".to_string(),
            client_email: "ana@example.com".to_string(),
            client_company: Some("Padaria".to_string()),
            proposal_url: "https://skyz.test/proposta/abc".to_string(),
            viewed_at: Utc.with_ymd_and_hms(2026, 10, 20, 9, 5, 0).unwrap(),
        };
        assert_eq!(notice.subject(), "👀 Proposta SKZ-20261019-042 visualizada por Ana");
        assert!(notice.text().contains("Cliente: Ana (Padaria) <ana@example.com>"));
        assert!(notice.text().contains("Visualizada em: 20/10/2026 às 09:05 UTC"));
        assert!(notice.html().contains("Ana (Padaria) &lt;ana@example.com&gt;"));

        let message = notice.to_email("equipe@skyz.test");
        assert_eq!(message.to, vec!["equipe@skyz.test".to_string()]);
    }
}
