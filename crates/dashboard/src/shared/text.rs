//! Text helpers for rich-text fields: markup stripping, case-insensitive
//! matching and list previews.

/// Length of the answer preview in list rows
pub const PREVIEW_LEN: usize = 150;

/// Removes every `<...>` tag and trims the result.
///
/// An unterminated `<` is kept as text.
///
/// # Example
/// ```rust
/// use dashboard::shared::text::strip_html;
/// assert_eq!(strip_html("<p>Hello <b>world</b></p> "), "Hello world");
/// ```
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        match rest[start..].find('>') {
            Some(len) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + len + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Case-insensitive substring check. `needle_lower` must already be lowercase.
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Stripped preview of a rich-text value, cut at `PREVIEW_LEN` characters
pub fn truncate_preview(html: &str) -> String {
    let plain = strip_html(html);
    if plain.chars().count() > PREVIEW_LEN {
        let cut: String = plain.chars().take(PREVIEW_LEN).collect();
        format!("{}...", cut)
    } else {
        plain
    }
}

/// True when the rich-text value has no visible text
pub fn is_blank_rich_text(html: &str) -> bool {
    strip_html(html).is_empty()
}

/// Original image size encoded in a media URI fragment
/// (`...#originWidth=378&originHeight=358`). Missing values are 0.
pub fn image_dimensions(uri: Option<&str>) -> (u32, u32) {
    let Some(uri) = uri else {
        return (0, 0);
    };
    (
        query_number(uri, "originWidth=").unwrap_or(0),
        query_number(uri, "originHeight=").unwrap_or(0),
    )
}

fn query_number(uri: &str, key: &str) -> Option<u32> {
    let start = uri.find(key)? + key.len();
    let digits: String = uri[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Setup <em>guide</em></p>"), "Setup guide");
        assert_eq!(strip_html("  plain  "), "plain");
        assert_eq!(strip_html("a < b"), "a < b");
        assert_eq!(strip_html("<a<b>c"), "c");
        assert_eq!(strip_html("<p></p>"), "");
    }

    #[test]
    fn test_truncate_preview() {
        let long = format!("<p>{}</p>", "x".repeat(200));
        let preview = truncate_preview(&long);
        assert_eq!(preview.len(), PREVIEW_LEN + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(truncate_preview("<b>short</b>"), "short");
    }

    #[test]
    fn test_image_dimensions() {
        let uri = "wix:image://v1/4404aa~mv2.png/image.png#originWidth=378&originHeight=358";
        assert_eq!(image_dimensions(Some(uri)), (378, 358));
        assert_eq!(image_dimensions(Some("https://example.com/a.png")), (0, 0));
        assert_eq!(image_dimensions(None), (0, 0));
    }

    #[test]
    fn test_blank_rich_text() {
        assert!(is_blank_rich_text("<p> </p>"));
        assert!(!is_blank_rich_text("<p>x</p>"));
    }
}
