//! String Literal Tests
//!
//! Verbatim versus escaped literals, line splitting and surrogate handling.

use razor_compiler::codegen::CSharpCodeWriter;

fn literal(value: &str) -> String {
    let mut writer = CSharpCodeWriter::default();
    writer.write_string_literal(value);
    writer.finish().0
}

/// Reads a literal written by the generator back into its value.
fn read_back(code: &str) -> String {
    if let Some(body) = code.strip_prefix("@\"") {
        return body.strip_suffix('"').unwrap_or(body).replace("\"\"", "\"");
    }
    let mut value = String::new();
    for part in code.split("\" +\n") {
        let part = part.strip_prefix('"').unwrap_or(part);
        let part = part.strip_suffix('"').unwrap_or(part);
        let mut chars = part.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                value.push(ch);
                continue;
            }
            match chars.next() {
                Some('r') => value.push('\r'),
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('0') => value.push('\0'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let code_point = u32::from_str_radix(&hex, 16).unwrap();
                    value.push(char::from_u32(code_point).unwrap());
                }
                Some(other) => value.push(other),
                None => {}
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_write_short_literals_in_quotes() {
        assert_eq!(literal("Hello"), "\"Hello\"");
        assert_eq!(literal(""), "\"\"");
    }

    #[test]
    fn should_escape_special_characters() {
        assert_eq!(literal("a\"b\\c\r\n\t'\0"), r#""a\"b\\c\r\n\t\'\0""#);
        assert_eq!(literal("\u{2028}x\u{2029}"), r#""\u2028x\u2029""#);
    }

    #[test]
    fn should_use_verbatim_literal_from_256_units() {
        let value = format!("{}\"", "a".repeat(255));
        assert_eq!(literal(&value), format!("@\"{}\"\"\"", "a".repeat(255)));
    }

    #[test]
    fn should_use_escaped_literal_outside_verbatim_range() {
        assert!(literal(&"a".repeat(255)).starts_with("\"a"));
        assert!(literal(&"a".repeat(1500)).starts_with("@\""));
        assert!(literal(&"a".repeat(1501)).starts_with("\"a"));
    }

    #[test]
    fn should_not_use_verbatim_literal_for_nul() {
        let value = format!("{}\0", "a".repeat(299));
        let code = literal(&value);
        assert!(code.starts_with("\"a"));
        assert!(code.contains("\\0"));
    }

    #[test]
    fn should_break_escaped_literals_every_80_units() {
        let expected = format!("\"{}\" +\n\"{}\"", "a".repeat(81), "a".repeat(19));
        assert_eq!(literal(&"a".repeat(100)), expected);
    }

    #[test]
    fn should_allow_break_at_the_very_end() {
        let expected = format!("\"{}\" +\n\"\"", "a".repeat(81));
        assert_eq!(literal(&"a".repeat(81)), expected);
    }

    #[test]
    fn should_break_after_pair_ending_on_boundary() {
        let value = format!("{}\u{1F600}b", "a".repeat(79));
        let expected = format!("\"{}\u{1F600}\" +\n\"b\"", "a".repeat(79));
        assert_eq!(literal(&value), expected);
    }

    #[test]
    fn should_not_split_pair_starting_on_boundary() {
        let value = format!("{}\u{1F600}b", "a".repeat(80));
        let expected = format!("\"{}\u{1F600}\" +\n\"b\"", "a".repeat(80));
        assert_eq!(literal(&value), expected);
    }

    #[test]
    fn should_read_back_as_the_original_text() {
        let samples = [
            "plain".to_string(),
            "tab\there \"quoted\" and \\slashes\\\r\n".to_string(),
            format!("{}\u{1F600}{}", "x".repeat(150), "y".repeat(30)),
            format!("<div class=\"{}\">", "c".repeat(400)),
        ];
        for sample in samples.iter() {
            assert_eq!(read_back(&literal(sample)), *sample);
        }
    }

    #[test]
    fn should_use_writer_new_line_between_parts() {
        let mut writer = CSharpCodeWriter::new("\r\n", 4);
        writer.write_string_literal(&"a".repeat(90));
        assert!(writer.code().contains("\" +\r\n\""));
    }
}
