//! Display-currency table for GCC visitors.
//!
//! Catalog prices are stored in USD. Rates are fixed and only used for
//! display; nothing here is suitable for billing.

use serde::Serialize;

/// Currency shown when no country can be determined.
pub const DEFAULT_COUNTRY: &str = "US";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencyInfo {
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: &'static str,
    /// ISO 4217 currency code.
    pub code: &'static str,
    pub symbol: &'static str,
    /// Units of this currency per USD.
    pub rate: f64,
}

pub const CURRENCIES: [CurrencyInfo; 8] = [
    CurrencyInfo { country_code: "AE", code: "AED", symbol: "د.إ", rate: 3.67 },
    CurrencyInfo { country_code: "SA", code: "SAR", symbol: "ر.س", rate: 3.75 },
    CurrencyInfo { country_code: "KW", code: "KWD", symbol: "د.ك", rate: 0.31 },
    CurrencyInfo { country_code: "OM", code: "OMR", symbol: "ر.ع", rate: 0.38 },
    CurrencyInfo { country_code: "QA", code: "QAR", symbol: "ر.ق", rate: 3.64 },
    CurrencyInfo { country_code: "BH", code: "BHD", symbol: "د.ب", rate: 0.38 },
    CurrencyInfo { country_code: "IN", code: "INR", symbol: "₹", rate: 83.0 },
    CurrencyInfo { country_code: "US", code: "USD", symbol: "$", rate: 1.0 },
];

impl CurrencyInfo {
    /// Look up a supported country; matching is case-insensitive.
    pub fn for_country(country_code: &str) -> Option<CurrencyInfo> {
        let code = country_code.trim();
        CURRENCIES
            .iter()
            .find(|c| c.country_code.eq_ignore_ascii_case(code))
            .copied()
    }

    /// The USD entry.
    pub fn default_currency() -> CurrencyInfo {
        CURRENCIES[CURRENCIES.len() - 1]
    }

    pub fn convert(&self, amount_usd: f64) -> i64 {
        convert(amount_usd, self.rate)
    }

    /// Symbol and grouped amount, e.g. `د.ب380` or `د.ب380 BHD`.
    pub fn format(&self, amount_usd: f64, show_code: bool) -> String {
        let formatted = format!("{}{}", self.symbol, group_thousands(self.convert(amount_usd)));
        if show_code {
            format!("{formatted} {}", self.code)
        } else {
            formatted
        }
    }

    pub fn format_range(&self, min_usd: f64, max_usd: f64) -> String {
        format!("{} - {}", self.format(min_usd, false), self.format(max_usd, false))
    }
}

/// Map an IANA timezone to a supported country.
pub fn country_from_timezone(timezone: &str) -> Option<&'static str> {
    match timezone.trim() {
        "Asia/Dubai" => Some("AE"),
        "Asia/Riyadh" => Some("SA"),
        "Asia/Kuwait" => Some("KW"),
        "Asia/Muscat" => Some("OM"),
        "Asia/Qatar" => Some("QA"),
        "Asia/Bahrain" => Some("BH"),
        "Asia/Kolkata" | "Asia/Calcutta" => Some("IN"),
        _ => None,
    }
}

/// `round(amount_usd * rate)`.
pub fn convert(amount_usd: f64, rate: f64) -> i64 {
    (amount_usd * rate).round() as i64
}

/// Insert `,` every three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
