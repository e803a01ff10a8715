// ABOUTME: Small string utilities used by the helpers
// ABOUTME: Form-style URL encoding and character-safe prefixes

/// Encode text as an `application/x-www-form-urlencoded` component.
/// Spaces become `+`; only alphanumerics and `*-._` pass through.
pub fn url_encode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// The first `count` characters of `text`, or all of it when shorter
pub fn prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
