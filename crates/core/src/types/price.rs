//! Rupiah amounts using decimal arithmetic.
//!
//! Asset values are always shown to users as whole rupiah with `.` as the
//! thousands separator, e.g. `Rp 12.345.678`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// An amount in Indonesian rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rupiah(Decimal);

impl Rupiah {
    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse an amount written with `,` thousands separators and an optional
    /// `.` decimal part, such as `12,345.67`.
    #[must_use]
    pub fn parse_grouped(text: &str) -> Option<Self> {
        let cleaned: String = text.chars().filter(|c| *c != ',').collect();
        Decimal::from_str(cleaned.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for Rupiah {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let digits = rounded.abs().trunc().to_string();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}Rp {}", group_thousands(&digits))
    }
}

/// Insert `.` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
