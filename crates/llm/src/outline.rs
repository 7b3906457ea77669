//! Parsing of outline-suggestion responses.
//!
//! Providers are asked for a JSON array of strings but routinely wrap it in
//! markdown fences or return a loose list. Parsing is forgiving: strip
//! fences, try to extract a JSON array, then fall back to line splitting.

use regex::Regex;

/// Upper bound on suggested titles.
const MAX_TITLES: usize = 10;

/// Parse a provider response into a list of outline titles.
pub fn parse_outline_response(content: &str) -> Vec<String> {
    let cleaned = strip_fences(content);

    if let Some(titles) = extract_json_array(&cleaned) {
        return titles.into_iter().take(MAX_TITLES).collect();
    }

    split_lines(&cleaned).into_iter().take(MAX_TITLES).collect()
}

/// Remove markdown code fences (```json ... ```).
fn strip_fences(content: &str) -> String {
    let fence = Regex::new(r"```(?:json)?\n?").expect("static regex");
    fence.replace_all(content, "").replace("```", "")
}

/// Try to pull a JSON array of strings out of the text.
fn extract_json_array(content: &str) -> Option<Vec<String>> {
    let array = Regex::new(r"(?s)(\[\s*[^\]]+\s*\])").expect("static regex");
    let captured = array.captures(content)?.get(1)?.as_str();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(captured).ok()?;
    let titles: Vec<String> = parsed
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        })
        .filter(|s| !s.is_empty())
        .collect();
    if titles.is_empty() {
        None
    } else {
        Some(titles)
    }
}

/// Fallback: one title per line, list prefixes and stray punctuation removed.
fn split_lines(content: &str) -> Vec<String> {
    let prefix = Regex::new(r"^[-*\d.)\s]+").expect("static regex");
    let mut titles = Vec::new();
    for raw in content.lines() {
        let line = prefix.replace(raw.trim(), "");
        let line = line.trim_matches(|c| matches!(c, '{' | '}' | ',' | '"')).trim();
        if line.is_empty() || line.eq_ignore_ascii_case("json") {
            continue;
        }
        if !titles.iter().any(|t| t == line) {
            titles.push(line.to_string());
        }
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_array() {
        let titles = parse_outline_response(r#"["Intro", "Methods", "Results"]"#);
        assert_eq!(titles, vec!["Intro", "Methods", "Results"]);
    }

    #[test]
    fn test_fenced_json_array() {
        let titles = parse_outline_response("```json\n[\"A\", \"B\"]\n```");
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_bulleted_lines_fallback() {
        let titles = parse_outline_response("- First\n- Second\n3. Third\n");
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_duplicate_lines_deduped() {
        let titles = parse_outline_response("Overview\nOverview\nDetails");
        assert_eq!(titles, vec!["Overview", "Details"]);
    }

    #[test]
    fn test_caps_at_ten_titles() {
        let body = (1..=15)
            .map(|i| format!("\"T{i}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let titles = parse_outline_response(&format!("[{body}]"));
        assert_eq!(titles.len(), 10);
    }
}
