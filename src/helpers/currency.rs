// ABOUTME: Currency helpers for templates
// ABOUTME: Formats cent amounts as dollars, empty input renders as empty text

use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};

use super::{integer_arg, is_empty, param};
use crate::format::currency;

fn write_amount(
    h: &Helper,
    out: &mut dyn Output,
    helper: &'static str,
    format: fn(i64) -> String,
) -> std::result::Result<(), RenderError> {
    let source = match param(h, 0) {
        Some(value) if !is_empty(Some(value)) => value,
        _ => return Ok(()),
    };
    let cents = integer_arg(source, helper)?;
    out.write(&format(cents))?;
    Ok(())
}

pub fn dollars_no_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_amount(h, out, "dollarsNoSign", currency::dollars_no_sign)
}

pub fn dollars_with_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_amount(h, out, "dollarsWithSign", currency::dollars_with_sign)
}

pub fn dollars_and_cents_no_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_amount(h, out, "dollarsAndCentsNoSign", currency::dollars_and_cents_no_sign)
}

pub fn dollars_and_cents_with_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_amount(h, out, "dollarsAndCentsWithSign", currency::dollars_and_cents_with_sign)
}

pub fn dollars_and_cents_plain_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    write_amount(h, out, "dollarsAndCentsPlain", currency::dollars_and_cents_plain)
}
