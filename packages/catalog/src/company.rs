use serde::Serialize;
use skz_core::PROPOSAL_VALIDITY_DAYS;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Differentiator {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Term {
    pub title: String,
    pub content: String,
}

/// Agency identity and boilerplate printed on every proposal
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub legal_name: String,
    pub instagram: String,
    pub instagram_url: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub website: String,
    pub about: String,
    pub mission: String,
    pub differentiators: Vec<Differentiator>,
    pub terms: Vec<Term>,
    pub next_steps: Vec<String>,
}

impl CompanyProfile {
    pub fn skyz() -> Self {
        CompanyProfile {
            name: "Skyz Design BR".to_string(),
            legal_name: "Skyz Design BR LTDA".to_string(),
            instagram: "@skyzdesignbr".to_string(),
            instagram_url: "https://instagram.com/skyzdesignbr".to_string(),
            email: "contato@skyzdesign.com.br".to_string(),
            phone: "(11) 99999-9999".to_string(),
            whatsapp: "5511999999999".to_string(),
            website: "https://skyzdesign.com.br".to_string(),
            about: "A Skyz Design BR é uma empresa especializada em design e desenvolvimento \
                    de software que transforma ideias em soluções digitais de alto impacto."
                .to_string(),
            mission: "Criar experiências digitais que impulsionam negócios e transformam a \
                      maneira como as empresas se conectam com seus clientes."
                .to_string(),
            differentiators: vec![
                differentiator(
                    "Metodologia Ágil",
                    "Entregas incrementais com feedback contínuo, garantindo alinhamento \
                     constante com suas expectativas.",
                ),
                differentiator(
                    "Design Centrado no Usuário",
                    "Soluções desenvolvidas com foco na experiência do usuário final, \
                     maximizando engajamento e conversão.",
                ),
                differentiator(
                    "Stack Tecnológico Moderno",
                    "Utilizamos as tecnologias mais modernas e escaláveis do mercado para \
                     garantir performance e longevidade.",
                ),
                differentiator(
                    "Suporte Dedicado",
                    "Acompanhamento pós-entrega com suporte técnico e manutenção para \
                     garantir o sucesso contínuo do projeto.",
                ),
                differentiator(
                    "Transparência Total",
                    "Comunicação clara e honesta em todas as etapas, sem surpresas no \
                     orçamento ou no cronograma.",
                ),
                differentiator(
                    "Resultados Mensuráveis",
                    "Foco em métricas e KPIs que demonstram o retorno real do investimento \
                     em cada projeto.",
                ),
            ],
            terms: vec![
                term(
                    "Validade da Proposta",
                    &format!(
                        "Esta proposta tem validade de {} dias corridos a partir da data de emissão.",
                        PROPOSAL_VALIDITY_DAYS
                    ),
                ),
                term(
                    "Forma de Aceite",
                    "O aceite desta proposta pode ser feito por e-mail ou através de \
                     assinatura digital.",
                ),
                term(
                    "Propriedade Intelectual",
                    "Todos os direitos de propriedade intelectual do projeto serão \
                     transferidos ao cliente após a quitação total do investimento.",
                ),
                term(
                    "Garantia",
                    "Oferecemos garantia de 30 a 180 dias (conforme pacote escolhido) para \
                     correção de bugs e ajustes menores após a entrega final.",
                ),
                term(
                    "Suporte Pós-Entrega",
                    "Suporte técnico incluso por período determinado no pacote escolhido. \
                     Após esse período, oferecemos planos de manutenção mensal.",
                ),
                term(
                    "Cancelamento",
                    "Em caso de cancelamento, serão cobrados os valores proporcionais às \
                     etapas já entregues e aprovadas.",
                ),
            ],
            next_steps: vec![
                "Analise os pacotes apresentados nesta proposta".to_string(),
                "Escolha o pacote que melhor atende suas necessidades".to_string(),
                "Entre em contato conosco via WhatsApp ou e-mail".to_string(),
                "Agendaremos uma reunião para alinhar detalhes".to_string(),
                "Iniciamos o projeto imediatamente após aprovação".to_string(),
            ],
        }
    }

    /// Replaces the WhatsApp number; any formatting is kept for display and
    /// stripped from the link.
    pub fn with_whatsapp(mut self, number: impl Into<String>) -> Self {
        self.whatsapp = number.into();
        self
    }

    pub fn whatsapp_url(&self) -> String {
        let digits: String = self.whatsapp.chars().filter(char::is_ascii_digit).collect();
        format!("https://wa.me/{}", digits)
    }
}

fn differentiator(title: &str, description: &str) -> Differentiator {
    Differentiator {
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn term(title: &str, content: &str) -> Term {
    Term {
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skyz_profile_content() {
        let company = CompanyProfile::skyz();
        assert_eq!(company.differentiators.len(), 6);
        assert_eq!(company.terms.len(), 6);
        assert_eq!(company.next_steps.len(), 5);
        assert!(company.terms[0].content.contains("15 dias corridos"));
        assert_eq!(company.whatsapp_url(), "https://wa.me/5511999999999");
    }

    #[test]
    fn test_whatsapp_override_strips_formatting_from_link() {
        let company = CompanyProfile::skyz().with_whatsapp("+55 (21) 98765-4321");
        assert_eq!(company.whatsapp, "+55 (21) 98765-4321");
        assert_eq!(company.whatsapp_url(), "https://wa.me/5521987654321");
    }
}
