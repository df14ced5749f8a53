// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Case-insensitive match against a list of placeholder names.
pub fn is_sentinel(name: &str, sentinels: &[String]) -> bool {
    sentinels.iter().any(|s| s.trim().eq_ignore_ascii_case(name.trim()))
}

/// Minimal escaping for text placed inside HTML elements or quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  Lord \t Drazos \n"), "Lord Drazos");
        assert_eq!(normalize_ws("   "), "");
    }

    #[test]
    fn sentinel_is_case_insensitive() {
        let sentinels = vec![s!("count")];
        assert!(is_sentinel("Count", &sentinels));
        assert!(is_sentinel(" COUNT ", &sentinels));
        assert!(!is_sentinel("Counter", &sentinels));
    }

    #[test]
    fn escape_html_covers_markup() {
        assert_eq!(escape_html(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }
}
