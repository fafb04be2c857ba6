//! Minimal CSV field handling shared by the loaders

/// Tokens treated as "no data" (compared case-insensitively after trimming)
const MISSING_TOKENS: &[&str] = &["", "nan", "na", "n/a", "null", "none"];

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
pub(crate) fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

pub(crate) fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
}

/// Parse an optional number. `Err` carries the offending text.
pub(crate) fn parse_optional(raw: &str) -> Result<Option<f64>, String> {
    if is_missing(raw) {
        return Ok(None);
    }
    raw.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| raw.trim().to_string())
}

/// Trimmed, with internal whitespace runs collapsed to one space
pub(crate) fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Column name normalized for matching: collapsed and lower-case
pub(crate) fn normalize_header(name: &str) -> String {
    collapse_whitespace(name).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split_line("a,b,,c"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_split_quoted_comma_and_escaped_quote() {
        assert_eq!(
            split_line(r#""Smith, 1H",12,"say ""hi""""#),
            vec!["Smith, 1H", "12", r#"say "hi""#]
        );
    }

    #[test]
    fn test_missing_tokens() {
        for raw in ["", "  ", "NaN", "nan", "NA", "null", "None"] {
            assert_eq!(parse_optional(raw), Ok(None), "{raw:?}");
        }
        assert_eq!(parse_optional(" 4.5 "), Ok(Some(4.5)));
        assert_eq!(parse_optional("abc"), Err("abc".to_string()));
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Weight   on Bit "), "weight on bit");
        assert_eq!(collapse_whitespace(" Gamma \t Ray "), "Gamma Ray");
    }
}
