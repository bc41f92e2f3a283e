//! Currency presentation for insight figures.

use serde::{Deserialize, Serialize};

/// How monetary amounts are rendered in insight lines and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol prepended to every amount (e.g. `₹`, `$`, `Rs. `).
    pub symbol: String,
    /// Digits after the decimal point.
    pub decimals: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl CurrencyFormat {
    /// Two-decimal format with the given symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            decimals: 2,
        }
    }

    /// Render `amount` as `<sign><symbol><grouped integer>.<fraction>`.
    ///
    /// ```
    /// use biz_core::CurrencyFormat;
    ///
    /// let fmt = CurrencyFormat::new("$");
    /// assert_eq!(fmt.format(1234.5), "$1,234.50");
    /// assert_eq!(fmt.format(-20.0), "-$20.00");
    /// ```
    #[must_use]
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, amount.abs());
        let (integer, fraction) = fixed
            .split_once('.')
            .map_or((fixed.as_str(), None), |(i, f)| (i, Some(f)));

        let mut out = String::with_capacity(fixed.len() + self.symbol.len() + 4);
        // "-0.00" is not worth a sign.
        if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(integer));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
