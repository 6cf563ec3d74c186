use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency code with its decimal precision rules
///
/// All amounts flow through the pipeline at full precision; rounding to the
/// currency scale happens once, at the invoice totals boundary. `round` uses
/// banker's rounding (`round_dp`), which is the crate-wide tie-break policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: [u8; 3],
}

/// Currencies whose minor unit is the whole unit (no decimal places)
const ZERO_DECIMAL_CURRENCIES: [&str; 4] = ["IDR", "JPY", "KRW", "VND"];

impl Currency {
    /// Parse and validate a 3-letter currency code (case-insensitive)
    pub fn new(code: &str) -> Result<Self, String> {
        let code = code.trim().to_uppercase();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(format!("Invalid currency code: {}", code));
        }
        let mut bytes = [0u8; 3];
        bytes.copy_from_slice(code.as_bytes());
        Ok(Currency { code: bytes })
    }

    /// The currency code as a string slice
    pub fn code(&self) -> &str {
        // Constructor guarantees ASCII uppercase
        std::str::from_utf8(&self.code).unwrap_or("???")
    }

    /// Returns the decimal scale for this currency
    /// - Zero-decimal currencies (IDR, JPY, KRW, VND): 0
    /// - Everything else: 2
    pub fn scale(&self) -> u32 {
        if ZERO_DECIMAL_CURRENCIES.contains(&self.code()) {
            0
        } else {
            2
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Returns the smallest representable unit for this currency
    pub fn smallest_unit(&self) -> Decimal {
        Decimal::new(1, self.scale())
    }

    /// Formats an amount for display with the correct decimal places
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.scale();
        if scale == 0 {
            format!("{} {}", self, amount.round_dp(0))
        } else {
            format!("{} {:.width$}", self, amount, width = scale as usize)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> String {
        c.code().to_string()
    }
}
