// ABOUTME: Formatting utilities shared by the template helpers
// ABOUTME: Currency amounts and small string transformations

pub mod currency;
pub mod strings;

pub use currency::{
    dollars_and_cents_no_sign, dollars_and_cents_plain, dollars_and_cents_with_sign,
    dollars_no_sign, dollars_with_sign,
};
pub use strings::{prefix, url_encode};
