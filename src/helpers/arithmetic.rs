// ABOUTME: Decimal arithmetic helper for templates
// ABOUTME: Implements expr with arbitrary precision operands and text-driven result typing

use bigdecimal::{BigDecimal, One, RoundingMode, ToPrimitive, Zero};
use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use std::str::FromStr;

use super::error::{HelperError, Result};
use super::{required_param, value_text};

/// Fractional digits kept by `/` before half-even rounding
pub const DIVISION_SCALE: i64 = 16;

/// Largest exponent `^` accepts
pub const MAX_EXPONENT: u32 = 999_999_999;

/// Upper bound on the magnitude of a `^` result, in bits of its unscaled value
pub const MAX_POWER_BITS: u64 = 1 << 20;

/// Evaluate `value1 operator value2` over decimals.
///
/// The output is integer-formatted unless either operand's text contains a
/// decimal point. A `/` whose quotient has a fractional part is always
/// float-formatted.
pub fn expr(value1: &str, operator: &str, value2: &str) -> Result<String> {
    let left = parse_decimal(value1)?;
    let right = parse_decimal(value2)?;

    let result = match operator {
        "+" => &left + &right,
        "-" => &left - &right,
        "*" => &left * &right,
        "/" => divide(&left, &right)?,
        "%" => {
            if right.is_zero() {
                return Err(HelperError::DivisionByZero);
            }
            (&left % &right).abs()
        }
        "^" => pow(&left, checked_exponent(&left, &right)?),
        other => return Err(HelperError::InvalidOperator(other.to_string())),
    };

    let floating = value1.contains('.')
        || value2.contains('.')
        || (operator == "/" && result != result.with_scale(0));

    if floating {
        format_float(&result)
    } else {
        Ok(format_integer(&result))
    }
}

/// Quotient rounded half-to-even at `DIVISION_SCALE` fractional digits
pub fn divide(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal> {
    if right.is_zero() {
        return Err(HelperError::DivisionByZero);
    }
    Ok((left / right).with_scale_round(DIVISION_SCALE, RoundingMode::HalfEven))
}

fn parse_decimal(text: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(text.trim()).map_err(|e| HelperError::InvalidArgument {
        helper: "expr",
        message: format!("not a number '{}': {}", text, e),
    })
}

/// Integer part of the exponent operand
fn exponent(value: &BigDecimal) -> Result<u32> {
    value
        .with_scale(0)
        .to_i64()
        .and_then(|e| u32::try_from(e).ok())
        .ok_or_else(|| HelperError::InvalidArgument {
            helper: "expr",
            message: format!("invalid exponent {}", value),
        })
}

/// Reject exponents that would take unbounded time or memory to evaluate
fn checked_exponent(base: &BigDecimal, value: &BigDecimal) -> Result<u32> {
    let exp = exponent(value)?;
    if exp > MAX_EXPONENT {
        return Err(HelperError::InvalidArgument {
            helper: "expr",
            message: format!("exponent {} exceeds {}", exp, MAX_EXPONENT),
        });
    }

    // |base|^exp has at least (bits - 1) * exp bits
    let (unscaled, _) = base.as_bigint_and_exponent();
    let estimate = unscaled.bits().saturating_sub(1).saturating_mul(u64::from(exp));
    if estimate > MAX_POWER_BITS {
        return Err(HelperError::InvalidArgument {
            helper: "expr",
            message: format!("{} ^ {} is too large", base, exp),
        });
    }
    Ok(exp)
}

fn pow(base: &BigDecimal, mut exp: u32) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut square = base.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            result = &result * &square;
        }
        exp >>= 1;
        if exp > 0 {
            square = &square * &square;
        }
    }
    result
}

fn format_integer(value: &BigDecimal) -> String {
    let (digits, _) = value.with_scale(0).as_bigint_and_exponent();
    digits.to_string()
}

fn format_float(value: &BigDecimal) -> Result<String> {
    let float = value
        .to_string()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| HelperError::InvalidArgument {
            helper: "expr",
            message: format!("result {} does not fit a float", value),
        })?;
    // Debug keeps the trailing ".0" on whole numbers
    Ok(format!("{:?}", float))
}

/// expr helper - `{{expr value1 "op" value2}}`
pub fn expr_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value1 = value_text(required_param(h, 0, "expr")?);
    let operator = value_text(required_param(h, 1, "expr")?);
    let value2 = value_text(required_param(h, 2, "expr")?);

    let result = expr(&value1, &operator, &value2)?;
    out.write(&result)?;
    Ok(())
}
