use serde::Serialize;
use skz_core::Money;

/// A client-declared investment range. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BudgetBracket {
    pub id: &'static str,
    pub label: &'static str,
    pub min: Money,
    pub max: Option<Money>,
}

const BRACKETS: [BudgetBracket; 5] = [
    BudgetBracket {
        id: "ate_500",
        label: "Até R$ 500",
        min: Money::from_reais(0),
        max: Some(Money::from_reais(500)),
    },
    BudgetBracket {
        id: "500_1000",
        label: "R$ 500 - R$ 1.000",
        min: Money::from_reais(500),
        max: Some(Money::from_reais(1000)),
    },
    BudgetBracket {
        id: "1000_2000",
        label: "R$ 1.000 - R$ 2.000",
        min: Money::from_reais(1000),
        max: Some(Money::from_reais(2000)),
    },
    BudgetBracket {
        id: "2000_5000",
        label: "R$ 2.000 - R$ 5.000",
        min: Money::from_reais(2000),
        max: Some(Money::from_reais(5000)),
    },
    BudgetBracket {
        id: "acima_5000",
        label: "Acima de R$ 5.000",
        min: Money::from_reais(5000),
        max: None,
    },
];

const UNBOUNDED: BudgetBracket = BudgetBracket {
    id: "",
    label: "Sem limite definido",
    min: Money::ZERO,
    max: None,
};

impl BudgetBracket {
    pub fn all() -> &'static [BudgetBracket] {
        &BRACKETS
    }

    pub fn find(id: &str) -> Option<BudgetBracket> {
        BRACKETS.iter().copied().find(|b| b.id == id)
    }

    /// Bracket for an optional budget id; missing or unknown ids are unbounded.
    pub fn resolve(id: Option<&str>) -> BudgetBracket {
        id.and_then(BudgetBracket::find).unwrap_or(UNBOUNDED)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// `price >= min × 0.5` and `price <= max × 1.2`
    pub fn admits_alternative(&self, price: Money) -> bool {
        price.centavos() * 2 >= self.min.centavos() && self.below_max_times(price, 12)
    }

    /// `price <= max × 1.3`
    pub fn admits_essential_combo(&self, price: Money) -> bool {
        self.below_max_times(price, 13)
    }

    /// `price <= max × 1.5`
    pub fn admits_complete_combo(&self, price: Money) -> bool {
        self.below_max_times(price, 15)
    }

    fn below_max_times(&self, price: Money, tenths: i64) -> bool {
        match self.max {
            Some(max) => i128::from(price.centavos()) * 10 <= i128::from(max.centavos()) * i128::from(tenths),
            None => true,
        }
    }

    /// Smallest bracket whose range holds `base_price`, used to pre-fill the intake form
    pub fn suggested_for(base_price: Money) -> BudgetBracket {
        BRACKETS
            .iter()
            .copied()
            .find(|b| b.max.is_some_and(|max| base_price <= max))
            .unwrap_or(BRACKETS[BRACKETS.len() - 1])
    }
}
