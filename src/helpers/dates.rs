// ABOUTME: Relative timestamp parsing and date formatting helpers
// ABOUTME: Resolves "now" with month/day periods and prints four fixed date patterns

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use serde_json::Value as JsonValue;

use super::error::{HelperError, Result};
use super::{is_empty, param, value_text};

/// `MM/dd/yyyy`
pub const DATE_FORMAT_MMDDYYYY: &str = "%m/%d/%Y";
/// `MMMM d, yyyy`
pub const DATE_FORMAT_MMMM_D_YYYY: &str = "%B %-d, %Y";
/// `yyyy-MM-dd`
pub const DATE_FORMAT_YYYY_MM_DD: &str = "%Y-%m-%d";
/// `MMM dd, yyyy`
pub const DATE_FORMAT_MMM_DD_YYYY: &str = "%b %d, %Y";

const NOW: &str = "now";

/// Resolve a timestamp argument to epoch milliseconds, relative to the
/// current time.
pub fn long_val(value: Option<&JsonValue>) -> Result<i64> {
    long_val_at(value, Utc::now())
}

/// Resolve a timestamp argument to epoch milliseconds.
///
/// Accepts a millisecond number or numeric string, or a relative marker:
/// empty, `"0"` and `"now"` mean `now`; `"now3m15d"` or
/// `"now-1m0d,0m7d"` apply each comma separated period in order.
pub fn long_val_at(value: Option<&JsonValue>, now: DateTime<Utc>) -> Result<i64> {
    let text = match value {
        None | Some(JsonValue::Null) => return Ok(now.timestamp_millis()),
        // numeric zero is the same "now" marker as the text "0"
        Some(JsonValue::Number(n)) if n.as_f64() == Some(0.0) => {
            return Ok(now.timestamp_millis())
        }
        Some(JsonValue::Number(n)) => {
            return n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .ok_or_else(|| illegal(&n.to_string()));
        }
        Some(JsonValue::String(s)) => s.trim(),
        Some(other) => return Err(illegal(&value_text(other))),
    };

    if text.is_empty() || text == "0" || text == NOW {
        return Ok(now.timestamp_millis());
    }

    if let Some(periods) = text.strip_prefix(NOW) {
        let mut result = now;
        // trailing commas leave no period behind them
        let periods = periods.trim_end_matches(',');
        for token in periods.split(',').filter(|_| !periods.is_empty()) {
            result = apply_period(result, Period::parse(token)?)?;
        }
        return Ok(result.timestamp_millis());
    }

    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(|f| f.trunc() as i64))
        .ok_or_else(|| illegal(text))
}

fn illegal(found: &str) -> HelperError {
    HelperError::IllegalArgumentType {
        helper: "longVal",
        found: found.to_string(),
    }
}

/// A signed month/day offset such as `3m15d` or `-1m0d`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub negative: bool,
    pub months: u32,
    pub days: u32,
}

impl Period {
    /// Both components are mandatory and must appear months first
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || HelperError::InvalidPeriod(token.to_string());

        let (negative, body) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (months, rest) = body.split_once('m').ok_or_else(invalid)?;
        let days = rest.strip_suffix('d').ok_or_else(invalid)?;

        Ok(Self {
            negative,
            months: parse_component(months).ok_or_else(invalid)?,
            days: parse_component(days).ok_or_else(invalid)?,
        })
    }
}

fn parse_component(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn apply_period(from: DateTime<Utc>, period: Period) -> Result<DateTime<Utc>> {
    let months = Months::new(period.months);
    let days = Duration::days(i64::from(period.days));

    let shifted = if period.negative {
        from.checked_sub_months(months)
            .and_then(|dt| dt.checked_sub_signed(days))
    } else {
        from.checked_add_months(months)
            .and_then(|dt| dt.checked_add_signed(days))
    };
    shifted.ok_or_else(|| HelperError::TimestampOutOfRange(from.timestamp_millis()))
}

/// Format epoch milliseconds with a chrono pattern, in UTC
pub fn format_millis(millis: i64, pattern: &str) -> Result<String> {
    let datetime = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or(HelperError::TimestampOutOfRange(millis))?;
    Ok(datetime.format(pattern).to_string())
}

fn write_date(h: &Helper, out: &mut dyn Output, pattern: &str) -> std::result::Result<(), RenderError> {
    let source = param(h, 0);
    let default = JsonValue::String(NOW.to_string());
    let source = if is_empty(source) { Some(&default) } else { source };

    let formatted = format_millis(long_val(source)?, pattern)?;
    out.write(&formatted)?;
    Ok(())
}

/// date_short helper - `MM/dd/yyyy`
pub fn date_short_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_date(h, out, DATE_FORMAT_MMDDYYYY)
}

/// date_yyyy_mm_dd helper - `yyyy-MM-dd`
pub fn date_yyyy_mm_dd_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_date(h, out, DATE_FORMAT_YYYY_MM_DD)
}

/// date_mmm_dd_yyyy helper - `MMM dd, yyyy`
pub fn date_mmm_dd_yyyy_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_date(h, out, DATE_FORMAT_MMM_DD_YYYY)
}

/// date_long helper - `MMMM d, yyyy`
pub fn date_long_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_date(h, out, DATE_FORMAT_MMMM_D_YYYY)
}
