//! Locale-aware EUR price formatting
//!
//! Covers the number conventions of the locales the app ships in. Locales
//! not listed fall back to English, and regional variants share the
//! language's style unless an override exists (`de-AT`, `de-CH`). This is
//! a table, not full CLDR: `pt-BR` and `pt-PT`, for instance, both format
//! like `pt`.

/// Where the euro sign goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    /// `€1.00`
    Prefix,
    /// `€ 1,00`
    PrefixSpaced,
    /// `1,00 €`
    Suffix,
}

/// Separators and symbol placement for one family of locales
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CurrencyStyle {
    group: &'static str,
    decimal: &'static str,
    symbol: Symbol,
    /// Integer digits needed before any grouping happens
    min_grouping_digits: usize,
}

const ENGLISH: CurrencyStyle = CurrencyStyle {
    group: ",",
    decimal: ".",
    symbol: Symbol::Prefix,
    min_grouping_digits: 4,
};

const CONTINENTAL: CurrencyStyle = CurrencyStyle {
    group: ".",
    decimal: ",",
    symbol: Symbol::Suffix,
    min_grouping_digits: 4,
};

const SPANISH: CurrencyStyle = CurrencyStyle {
    min_grouping_digits: 5,
    ..CONTINENTAL
};

const DUTCH: CurrencyStyle = CurrencyStyle {
    symbol: Symbol::PrefixSpaced,
    ..CONTINENTAL
};

const SWISS: CurrencyStyle = CurrencyStyle {
    group: "\u{2019}",
    decimal: ".",
    symbol: Symbol::PrefixSpaced,
    min_grouping_digits: 4,
};

const FRENCH: CurrencyStyle = CurrencyStyle {
    group: "\u{202f}",
    decimal: ",",
    symbol: Symbol::Suffix,
    min_grouping_digits: 4,
};

const NORDIC: CurrencyStyle = CurrencyStyle {
    group: "\u{a0}",
    decimal: ",",
    symbol: Symbol::Suffix,
    min_grouping_digits: 4,
};

const POLISH: CurrencyStyle = CurrencyStyle {
    min_grouping_digits: 5,
    ..NORDIC
};

/// Locale used when the host reports none
pub const DEFAULT_LOCALE: &str = "en-US";

fn style_for(locale: &str) -> CurrencyStyle {
    let mut parts = locale.split(['-', '_']);
    let language = parts.next().unwrap_or_default().to_lowercase();
    let region = parts.last().unwrap_or_default().to_uppercase();

    match (language.as_str(), region.as_str()) {
        ("de", "AT") => DUTCH,
        ("de", "CH") => SWISS,
        ("nl", _) => DUTCH,
        ("es", _) => SPANISH,
        ("pl", _) => POLISH,
        ("de" | "it" | "pt" | "da", _) => CONTINENTAL,
        ("fr", _) => FRENCH,
        ("fi" | "sv" | "nb" | "cs" | "sk", _) => NORDIC,
        _ => ENGLISH,
    }
}

fn group_digits(digits: &str, separator: &str, min_grouping_digits: usize) -> String {
    if digits.len() < min_grouping_digits {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Format a EUR amount with exactly two fraction digits
pub fn format_price(price: f64, locale: Option<&str>) -> String {
    let style = style_for(locale.unwrap_or(DEFAULT_LOCALE));

    let cents = (price * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = group_digits(&(cents / 100).to_string(), style.group, style.min_grouping_digits);
    let number = format!("{}{}{:02}", whole, style.decimal, cents % 100);

    match style.symbol {
        Symbol::Prefix => format!("{}€{}", sign, number),
        Symbol::PrefixSpaced => format!("€\u{a0}{}{}", sign, number),
        Symbol::Suffix => format!("{}{}\u{a0}€", sign, number),
    }
}
