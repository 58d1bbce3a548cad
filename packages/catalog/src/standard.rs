// ABOUTME: Official Skyz Design BR price list
// ABOUTME: Design & social media services first, then web development

use skz_core::{Category, Money};

use crate::services::{ServiceCatalogEntry, ServiceOption};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn option(id: &str, name: &str, price: i64, description: &str) -> ServiceOption {
    ServiceOption {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::from_reais(price),
        savings: None,
        badge: None,
        description: description.to_string(),
        includes: Vec::new(),
        ideal_for: None,
        delivery_time: None,
    }
}

fn creative_option(quantity: &str, price: i64, savings: i64, badge: Option<&str>) -> ServiceOption {
    let name = if quantity == "1" {
        "1 Criativo".to_string()
    } else {
        format!("{} Criativos", quantity)
    };
    let description = if savings == 0 {
        "1 arte personalizada para feed ou stories".to_string()
    } else {
        format!("{} artes + economia de R$ {}", quantity, savings)
    };
    ServiceOption {
        savings: (savings > 0).then(|| Money::from_reais(savings)),
        badge: badge.map(str::to_string),
        ..option(quantity, &name, price, &description)
    }
}

fn criativos() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "criativos".to_string(),
        category: Category::Design,
        name: "Criativos para Redes Sociais".to_string(),
        short_name: "Criativos".to_string(),
        description: "Posts profissionais para Instagram, Facebook e anúncios".to_string(),
        base_price: Money::from_reais(60),
        max_price: None,
        unit: Some("criativo".to_string()),
        is_recurring: false,
        delivery_time: "3-5 dias úteis".to_string(),
        includes: strings(&[
            "Design personalizado com sua identidade",
            "Até 2 revisões por criativo",
            "Formatos para feed e stories",
            "Arquivos em alta resolução (PNG/JPG)",
            "Versões para diferentes redes sociais",
        ]),
        benefits: strings(&[
            "Mais engajamento nas redes sociais",
            "Identidade visual consistente",
            "Conteúdo pronto para publicar",
            "Economia de tempo na criação",
        ]),
        options: vec![
            creative_option("1", 60, 0, None),
            creative_option("3", 170, 10, None),
            creative_option("5", 260, 40, Some("Mais popular")),
            creative_option("10", 500, 100, Some("Melhor custo-benefício")),
            creative_option("15", 720, 180, None),
            creative_option("20", 920, 280, None),
            option(
                "custom",
                "Quantidade Personalizada",
                0,
                "Mais de 20 criativos - R$ 45/unidade",
            ),
        ],
    }
}

fn filmmaker() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "filmmaker".to_string(),
        category: Category::Design,
        name: "Filmmaker - Gravação Profissional".to_string(),
        short_name: "Filmmaker".to_string(),
        description: "Serviço de gravação com equipamento profissional".to_string(),
        base_price: Money::from_reais(150),
        max_price: None,
        unit: None,
        is_recurring: false,
        delivery_time: "Conforme agendamento".to_string(),
        includes: strings(&[
            "Gravação com equipamento 4K",
            "Iluminação profissional",
            "Captação de áudio limpo",
            "Até 3 horas de gravação",
            "Material bruto entregue",
        ]),
        benefits: strings(&[
            "Qualidade cinematográfica",
            "Conteúdo profissional para redes",
            "Material versátil para edição",
            "Equipamento de ponta incluso",
        ]),
        options: Vec::new(),
    }
}

fn edicao_reels() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "edicao_reels".to_string(),
        category: Category::Design,
        name: "Edição de Reels".to_string(),
        short_name: "Reels".to_string(),
        description: "Edição de vídeos curtos até 5 minutos".to_string(),
        base_price: Money::from_reais(150),
        max_price: Some(Money::from_reais(300)),
        unit: None,
        is_recurring: false,
        delivery_time: "3-7 dias úteis".to_string(),
        includes: strings(&[
            "Cortes dinâmicos e modernos",
            "Legendas animadas",
            "Música / efeitos sonoros",
            "Transições profissionais",
            "Até 2 revisões",
            "Formatação para Instagram/TikTok",
        ]),
        benefits: strings(&[
            "Vídeos que prendem a atenção",
            "Otimizado para algoritmo",
            "Maior alcance orgânico",
            "Tendências atualizadas",
        ]),
        options: Vec::new(),
    }
}

fn edicao_videoaulas() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "edicao_videoaulas".to_string(),
        category: Category::Design,
        name: "Edição de Videoaulas".to_string(),
        short_name: "Videoaulas".to_string(),
        description: "Edição completa de videoaulas a partir de 10 min".to_string(),
        base_price: Money::from_reais(320),
        max_price: Some(Money::from_reais(840)),
        unit: None,
        is_recurring: false,
        delivery_time: "5-10 dias úteis".to_string(),
        includes: strings(&[
            "Cortes e limpeza de áudio",
            "Inserção de vinhetas",
            "Legendas / Closed Caption",
            "Animações de texto e gráficos",
            "Thumbnails personalizadas",
            "Até 3 revisões",
            "Exportação otimizada para EAD",
        ]),
        benefits: strings(&[
            "Aulas mais profissionais",
            "Melhor retenção de alunos",
            "Pronto para plataformas EAD",
            "Qualidade de produção elevada",
        ]),
        options: Vec::new(),
    }
}

fn gestao_social() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "gestao_social".to_string(),
        category: Category::Design,
        name: "Gestão de Social Media".to_string(),
        short_name: "Gestão Social".to_string(),
        description: "Gestão completa das suas redes sociais".to_string(),
        base_price: Money::from_reais(700),
        max_price: None,
        unit: Some("mês".to_string()),
        is_recurring: true,
        delivery_time: "Mensal recorrente".to_string(),
        includes: strings(&[
            "Correção de bio e links",
            "Posts mensais profissionais",
            "Planejamento de conteúdo",
            "Relatório de performance",
        ]),
        benefits: strings(&[
            "Presença digital ativa e consistente",
            "Crescimento orgânico",
            "Economia de tempo",
            "Estratégia profissional",
        ]),
        options: vec![
            ServiceOption {
                includes: strings(&[
                    "Correção de bio e links",
                    "2 a 4 posts mensais",
                    "Planejamento básico de conteúdo",
                    "Relatório mensal simples",
                    "Suporte via WhatsApp",
                ]),
                ..option(
                    "simples",
                    "Pacote SIMPLES",
                    700,
                    "Gestão básica para quem está começando",
                )
            },
            ServiceOption {
                badge: Some("Mais popular".to_string()),
                includes: strings(&[
                    "Tudo do pacote Simples",
                    "+2 posts mensais (total 4-6)",
                    "Linktree personalizado",
                    "Stories semanais interativos",
                    "Divulgação no @skyzdesignbr (6k+ seguidores)",
                    "Relatório detalhado de métricas",
                ]),
                ..option(
                    "intermediario",
                    "Pacote INTERMEDIÁRIO",
                    997,
                    "Gestão completa com estratégia e divulgação",
                )
            },
            ServiceOption {
                includes: strings(&[
                    "Tudo do pacote Intermediário",
                    "+8 posts mensais (total 12-14)",
                    "Gestão estratégica de posicionamento digital",
                    "Consultoria mensal de presença online",
                    "Análise de concorrência",
                    "Planejamento estratégico trimestral",
                    "Prioridade no suporte",
                ]),
                ..option(
                    "premium",
                    "Pacote PREMIUM",
                    1397,
                    "Gestão estratégica completa + consultoria",
                )
            },
        ],
    }
}

fn landing_page() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "landing_page".to_string(),
        category: Category::Web,
        name: "Landing Page / Página de Vendas".to_string(),
        short_name: "Landing Page".to_string(),
        description: "Página otimizada para conversão e captura de leads".to_string(),
        base_price: Money::from_reais(397),
        max_price: None,
        unit: None,
        is_recurring: false,
        delivery_time: "5-15 dias úteis".to_string(),
        includes: strings(&[
            "Design responsivo (mobile + desktop)",
            "Formulário de captura de leads",
            "Integração com WhatsApp",
            "SEO básico configurado",
            "Hospedagem incluída (1 ano)",
            "Certificado SSL (site seguro)",
        ]),
        benefits: strings(&[
            "Captura de leads 24/7",
            "Aumento de conversões",
            "Presença profissional online",
            "Rápido carregamento",
        ]),
        options: vec![
            ServiceOption {
                includes: strings(&[
                    "3 seções customizadas (Hero + Benefícios + Formulário)",
                    "Design responsivo (mobile + desktop)",
                    "Formulário de captura de leads",
                    "Integração com WhatsApp",
                    "SEO básico",
                    "Hospedagem incluída (1 ano)",
                    "SSL (site seguro)",
                    "1 revisão incluída",
                ]),
                ideal_for: Some("Lançamentos, captura de leads, validação de produto".to_string()),
                delivery_time: Some("5-7 dias úteis".to_string()),
                ..option(
                    "landing_basic",
                    "Landing Page ESSENCIAL",
                    397,
                    "Perfeita para captura de leads e ofertas simples",
                )
            },
            ServiceOption {
                badge: Some("Mais popular".to_string()),
                includes: strings(&[
                    "6 seções customizadas",
                    "Tudo do plano Essencial",
                    "Seção de depoimentos",
                    "Contador de urgência (opcional)",
                    "FAQ accordion",
                    "Múltiplos CTAs estratégicos",
                    "Google Analytics configurado",
                    "Pixel do Facebook/Meta",
                    "Até 2 revisões incluídas",
                ]),
                ideal_for: Some("Infoprodutos, serviços, eventos, vendas online".to_string()),
                delivery_time: Some("7-10 dias úteis".to_string()),
                ..option(
                    "landing_pro",
                    "Landing Page PROFISSIONAL",
                    697,
                    "Completa para vendas e conversão otimizada",
                )
            },
            ServiceOption {
                badge: Some("Melhor ROI".to_string()),
                includes: strings(&[
                    "10-12 seções customizadas e estratégicas",
                    "Tudo do plano Profissional",
                    "Página de obrigado personalizada",
                    "E-mail de boas-vindas automatizado",
                    "Pop-up de captura (exit intent)",
                    "Vídeo de apresentação integrado",
                    "Seção de comparação de planos",
                    "Chat ao vivo (integração)",
                    "Otimização avançada de SEO",
                    "Consultoria de copywriting",
                    "Até 3 revisões incluídas",
                ]),
                ideal_for: Some(
                    "Lançamentos grandes, produtos premium, campanhas de alto investimento"
                        .to_string(),
                ),
                delivery_time: Some("10-15 dias úteis".to_string()),
                ..option(
                    "landing_premium",
                    "Landing Page PREMIUM",
                    987,
                    "Solução completa para alta conversão",
                )
            },
        ],
    }
}

fn site_institucional() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "site_institucional".to_string(),
        category: Category::Web,
        name: "Site Institucional".to_string(),
        short_name: "Site Institucional".to_string(),
        description: "Site completo e profissional para sua empresa".to_string(),
        base_price: Money::from_reais(900),
        max_price: None,
        unit: None,
        is_recurring: false,
        delivery_time: "15-20 dias úteis".to_string(),
        includes: strings(&[
            "Design personalizado e exclusivo",
            "Até 6 páginas (Home, Sobre, Serviços, Portfolio, Blog, Contato)",
            "Painel administrativo fácil de usar",
            "Formulários de contato",
            "Integração com redes sociais",
            "Google Analytics configurado",
            "SEO otimizado",
            "Hospedagem (1 ano)",
            "E-mail profissional",
            "Até 3 revisões",
        ]),
        benefits: strings(&[
            "Credibilidade profissional",
            "Controle total do conteúdo",
            "Visibilidade no Google",
            "Site próprio sem depender de redes",
        ]),
        options: Vec::new(),
    }
}

fn sistema_saas() -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: "sistema_saas".to_string(),
        category: Category::Web,
        name: "Sistema SaaS".to_string(),
        short_name: "Sistema/SaaS".to_string(),
        description: "Software como serviço customizado para seu negócio".to_string(),
        base_price: Money::from_reais(2297),
        max_price: None,
        unit: None,
        is_recurring: false,
        delivery_time: "30-45 dias úteis".to_string(),
        includes: strings(&[
            "MVP funcional completo",
            "Banco de dados estruturado",
            "Sistema de autenticação seguro",
            "Painel administrativo completo",
            "Dashboard com métricas",
            "Responsivo (web + mobile)",
            "Deploy em nuvem (AWS/Vercel)",
            "3 meses de suporte técnico",
            "Documentação técnica",
        ]),
        benefits: strings(&[
            "Automatização de processos",
            "Escalabilidade infinita",
            "Produto digital próprio",
            "Receita recorrente potencial",
        ]),
        options: Vec::new(),
    }
}

pub(crate) fn services() -> Vec<ServiceCatalogEntry> {
    vec![
        criativos(),
        filmmaker(),
        edicao_reels(),
        edicao_videoaulas(),
        gestao_social(),
        landing_page(),
        site_institucional(),
        sistema_saas(),
    ]
}
