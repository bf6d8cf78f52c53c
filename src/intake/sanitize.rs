//! Markup neutralization applied to validated values before persistence.
//!
//! Stored text must never reproduce raw HTML when rendered, so the five
//! characters with markup meaning are replaced with entities on the way in.

/// Escapes `&`, `<`, `>`, `"`, and `'` into HTML entities.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(escape_html("Robert Smith"), "Robert Smith");
    }

    #[test]
    fn neutralizes_markup_characters() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn escapes_ampersand_first_so_entities_stay_inert() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
