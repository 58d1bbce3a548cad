use serde::Serialize;

/// A business goal the client can tick on the intake form
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Challenge {
    pub id: &'static str,
    pub label: &'static str,
    /// Services suggested as combo partners, in priority order.
    /// A combo whose partner id is absent from the catalog is not offered.
    pub complementary: &'static [&'static str],
}

pub const CHALLENGES: [Challenge; 6] = [
    Challenge {
        id: "visibility",
        label: "Aumentar visibilidade online",
        complementary: &["gestao_social_simples", "criativos", "landing_page"],
    },
    Challenge {
        id: "sales",
        label: "Gerar mais vendas",
        complementary: &["landing_page", "site_institucional", "gestao_social_premium"],
    },
    Challenge {
        id: "branding",
        label: "Fortalecer a marca",
        complementary: &["criativos", "filmmaker", "gestao_social_intermediario"],
    },
    Challenge {
        id: "engagement",
        label: "Aumentar engajamento",
        complementary: &["edicao_reels", "gestao_social_intermediario", "criativos"],
    },
    Challenge {
        id: "presence",
        label: "Criar presença digital",
        complementary: &["site_institucional", "gestao_social_simples", "landing_page"],
    },
    Challenge {
        id: "conversion",
        label: "Melhorar conversão",
        complementary: &["landing_page", "site_institucional", "gestao_social_premium"],
    },
];

pub fn find_challenge(id: &str) -> Option<&'static Challenge> {
    CHALLENGES.iter().find(|c| c.id == id)
}

/// Human label for a challenge tag, or the tag itself when unknown
pub fn challenge_label(id: &str) -> &str {
    find_challenge(id).map(|c| c.label).unwrap_or(id)
}

/// Complementary service ids for a challenge tag (empty when unknown)
pub fn complementary_services(id: &str) -> &'static [&'static str] {
    find_challenge(id).map(|c| c.complementary).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(challenge_label("sales"), "Gerar mais vendas");
        assert_eq!(challenge_label("conversion"), "Melhorar conversão");
        assert_eq!(challenge_label("unknown_tag"), "unknown_tag");
    }

    #[test]
    fn test_complementary_services() {
        assert_eq!(
            complementary_services("sales"),
            &["landing_page", "site_institucional", "gestao_social_premium"]
        );
        assert!(complementary_services("nope").is_empty());
    }
}
