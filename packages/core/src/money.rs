// ABOUTME: Fixed-point BRL amounts stored as integer centavos
// ABOUTME: Price scaling rounds to whole reais, BRL formatting follows pt-BR conventions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A BRL amount in centavos.
///
/// Catalog prices are whole reais, and every adjustment (urgency surcharge,
/// combo discount) rounds back to whole reais, so amounts produced by the
/// engine always end in `,00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    pub const fn from_reais(reais: i64) -> Self {
        Money(reais * 100)
    }

    pub const fn centavos(self) -> i64 {
        self.0
    }

    /// Whole reais, truncating any centavos.
    pub const fn reais(self) -> i64 {
        self.0 / 100
    }

    /// Multiplies by `numerator / denominator` and rounds half-up to whole reais.
    pub fn scale_to_whole_reais(self, numerator: i64, denominator: i64) -> Money {
        let scaled = i128::from(self.0) * i128::from(numerator);
        let divisor = i128::from(denominator) * 100;
        let reais = if scaled >= 0 {
            (scaled + divisor / 2) / divisor
        } else {
            (scaled - divisor / 2) / divisor
        };
        Money::from_reais(reais as i64)
    }

    /// Multiplies by a percentage (130 = +30%) rounding to whole reais.
    pub fn percent_of(self, percent: i64) -> Money {
        self.scale_to_whole_reais(percent, 100)
    }

    /// Integer percentage that `discounted` saves relative to `self`, rounded half-up.
    pub fn discount_percent_to(self, discounted: Money) -> u32 {
        if self.0 <= 0 || discounted.0 >= self.0 {
            return 0;
        }
        let saved = i128::from(self.0 - discounted.0) * 100;
        let original = i128::from(self.0);
        ((saved * 2 + original) / (original * 2)) as u32
    }

    /// Formats as `R$ 1.167,00`.
    pub fn format_brl(self) -> String {
        let negative = self.0 < 0;
        let abs = self.0.unsigned_abs();
        let reais = abs / 100;
        let centavos = abs % 100;

        let digits = reais.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        if negative {
            format!("-R$ {},{:02}", grouped, centavos)
        } else {
            format!("R$ {},{:02}", grouped, centavos)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_brl())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "R$ 0,00")]
    #[case(60, "R$ 60,00")]
    #[case(1167, "R$ 1.167,00")]
    #[case(2297, "R$ 2.297,00")]
    #[case(1234567, "R$ 1.234.567,00")]
    fn test_format_brl(#[case] reais: i64, #[case] expected: &str) {
        assert_eq!(Money::from_reais(reais).format_brl(), expected);
    }

    #[test]
    fn test_format_brl_with_centavos() {
        assert_eq!(Money::from_centavos(5667).format_brl(), "R$ 56,67");
        assert_eq!(Money::from_centavos(-150).format_brl(), "-R$ 1,50");
    }

    #[rstest]
    #[case(397, 130, 516)]
    #[case(697, 130, 906)]
    #[case(697, 95, 662)]
    #[case(1297, 90, 1167)]
    #[case(2197, 85, 1867)]
    #[case(10, 95, 10)]
    fn test_percent_rounds_to_whole_reais(
        #[case] base: i64,
        #[case] percent: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(Money::from_reais(base).percent_of(percent), Money::from_reais(expected));
    }

    #[test]
    fn test_discount_percent() {
        let original = Money::from_reais(1297);
        assert_eq!(original.discount_percent_to(Money::from_reais(1167)), 10);
        assert_eq!(Money::from_reais(2197).discount_percent_to(Money::from_reais(1867)), 15);
        assert_eq!(original.discount_percent_to(original), 0);
        assert_eq!(Money::ZERO.discount_percent_to(Money::ZERO), 0);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_reais(697)).unwrap();
        assert_eq!(json, "69700");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_reais(697));
    }
}
