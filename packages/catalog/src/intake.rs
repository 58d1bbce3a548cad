use serde::Serialize;

/// A value/label pair offered by the intake form
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

pub const SEGMENTS: [ChoiceOption; 11] = [
    choice("ecommerce", "E-commerce / Loja online"),
    choice("infoprodutos", "Infoprodutos / Cursos"),
    choice("servicos", "Serviços profissionais"),
    choice("restaurante", "Restaurante / Food"),
    choice("saude", "Saúde e bem-estar"),
    choice("tecnologia", "Tecnologia"),
    choice("moda", "Moda e beleza"),
    choice("educacao", "Educação"),
    choice("imobiliario", "Imobiliário"),
    choice("fitness", "Fitness / Academia"),
    choice("outro", "Outro"),
];

pub const DELIVERY_METHODS: [ChoiceOption; 4] = [
    choice("google_drive", "Google Drive"),
    choice("wetransfer", "WeTransfer"),
    choice("whatsapp", "WhatsApp"),
    choice("email", "E-mail"),
];

pub const MEETING_CHOICES: [ChoiceOption; 3] = [
    choice("sim", "Sim, prefiro alinhar"),
    choice("talvez", "Talvez, depois decidimos"),
    choice("nao", "Não, pode seguir"),
];

pub const HAS_BRANDING_CHOICES: [ChoiceOption; 3] = [
    choice("sim", "Sim, completa"),
    choice("parcial", "Apenas o logo"),
    choice("nao", "Não tenho ainda"),
];

pub fn is_known(choices: &[ChoiceOption], value: &str) -> bool {
    choices.iter().any(|c| c.value == value)
}

pub fn segment_label(value: &str) -> &str {
    SEGMENTS
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label)
        .unwrap_or(value)
}
