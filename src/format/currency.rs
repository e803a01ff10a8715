// ABOUTME: Currency formatting for amounts expressed in cents
// ABOUTME: Provides the five dollar formats used by the currency helpers

/// `12345678` -> `123,456`
pub fn dollars_no_sign(cents: i64) -> String {
    format_cents(cents, Style { symbol: false, cents: false, grouped: true })
}

/// `12345678` -> `$123,456`
pub fn dollars_with_sign(cents: i64) -> String {
    format_cents(cents, Style { symbol: true, cents: false, grouped: true })
}

/// `12345678` -> `123,456.78`
pub fn dollars_and_cents_no_sign(cents: i64) -> String {
    format_cents(cents, Style { symbol: false, cents: true, grouped: true })
}

/// `12345678` -> `$123,456.78`
pub fn dollars_and_cents_with_sign(cents: i64) -> String {
    format_cents(cents, Style { symbol: true, cents: true, grouped: true })
}

/// `12345678` -> `123456.78`
pub fn dollars_and_cents_plain(cents: i64) -> String {
    format_cents(cents, Style { symbol: false, cents: true, grouped: false })
}

#[derive(Debug, Clone, Copy)]
struct Style {
    symbol: bool,
    cents: bool,
    grouped: bool,
}

fn format_cents(amount: i64, style: Style) -> String {
    let magnitude = amount.unsigned_abs();
    let dollars = (magnitude / 100).to_string();

    let mut formatted = String::new();
    if amount < 0 {
        formatted.push('-');
    }
    if style.symbol {
        formatted.push('$');
    }
    if style.grouped {
        formatted.push_str(&group_thousands(&dollars));
    } else {
        formatted.push_str(&dollars);
    }
    if style.cents {
        formatted.push_str(&format!(".{:02}", magnitude % 100));
    }
    formatted
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
