//! Small XML helpers shared by the renderers.

/// Escape text for use in XML content or attribute values.
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalize a hex color (`#RRGGBB` or `RRGGBB`) to uppercase `RRGGBB`,
/// falling back to `default` for anything malformed.
pub fn normalize_color(color: &str, default: &str) -> String {
    let stripped = color.trim().trim_start_matches('#');
    if stripped.len() == 6 && stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        stripped.to_ascii_uppercase()
    } else {
        default.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup_characters() {
        assert_eq!(xml_escape("R&D <fast> \"ok\""), "R&amp;D &lt;fast&gt; &quot;ok&quot;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(xml_escape("hello world"), "hello world");
    }

    #[test]
    fn test_normalize_color_strips_hash() {
        assert_eq!(normalize_color("#0a74da", "FFFFFF"), "0A74DA");
        assert_eq!(normalize_color("123ABC", "FFFFFF"), "123ABC");
    }

    #[test]
    fn test_normalize_color_rejects_garbage() {
        assert_eq!(normalize_color("red", "FFFFFF"), "FFFFFF");
        assert_eq!(normalize_color("#12", "000000"), "000000");
    }
}
