//! JSON With Line Comments
//!
//! The persisted settings file is plain JSON except that operators may
//! annotate it with `//` line comments. Comments are stripped before
//! parsing; `//` sequences inside string literals are preserved.

use serde::de::DeserializeOwned;

/// Remove `//` line comments outside of string literals. Newlines are
/// kept so parse errors still point at the right line.
pub fn strip_line_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            output.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                output.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        output.push('\n');
                        break;
                    }
                }
            }
            _ => output.push(c),
        }
    }

    output
}

/// Parse a JSON document that may contain line comments.
pub fn parse<T: DeserializeOwned>(input: &str) -> serde_json::Result<T> {
    serde_json::from_str(&strip_line_comments(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    // ==========================================================================
    // Comment Stripping Tests
    // ==========================================================================

    #[test]
    fn test_plain_json_passes_through_unchanged() {
        let input = r#"{"name": "notify", "port": 3000}"#;
        assert_eq!(strip_line_comments(input), input);
    }

    #[test]
    fn test_full_line_comment_is_removed() {
        let input = "{\n// operator note\n\"port\": 3000\n}";
        assert_eq!(strip_line_comments(input), "{\n\n\"port\": 3000\n}");
    }

    #[test]
    fn test_trailing_comment_is_removed() {
        let input = "{\"port\": 3000 // default\n}";
        assert_eq!(strip_line_comments(input), "{\"port\": 3000 \n}");
    }

    #[test_case(r#"{"url": "https://example.com"}"# ; "double slash in url")]
    #[test_case(r#"{"note": "not // a comment"}"# ; "double slash mid string")]
    #[test_case(r#"{"path": "C:\\dir\\file"}"# ; "escaped backslashes")]
    #[test_case(r#"{"quote": "she said \"hi\" // still text"}"# ; "escaped quotes")]
    fn test_string_contents_are_preserved(input: &str) {
        assert_eq!(strip_line_comments(input), input);
    }

    #[test]
    fn test_crlf_comment_consumes_carriage_return() {
        let input = "{\r\n// note\r\n\"port\": 1\r\n}";
        assert_eq!(strip_line_comments(input), "{\r\n\n\"port\": 1\r\n}");
    }

    #[test]
    fn test_comment_at_end_of_input_without_newline() {
        let input = "{\"port\": 1}\n// trailing";
        assert_eq!(strip_line_comments(input), "{\"port\": 1}\n");
    }

    // ==========================================================================
    // Parse Tests
    // ==========================================================================

    #[test]
    fn test_parse_commented_document() {
        let input = r#"
        {
            // which bot this process runs as
            "name": "alerts",
            "port": 8443 // matches the reverse proxy
        }
        "#;
        let value: serde_json::Value = parse(input).unwrap();
        assert_eq!(value["name"], "alerts");
        assert_eq!(value["port"], 8443);
    }

    #[test]
    fn test_parse_surfaces_real_syntax_errors() {
        let result: serde_json::Result<serde_json::Value> = parse("{ not json");
        assert!(result.is_err());
    }
}
