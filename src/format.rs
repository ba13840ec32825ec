//! Text Formatter
//!
//! Normalizes pasted text (line-break policy, control-character stripping)
//! and renders CP values with a configurable thousands separator. Pure
//! functions; the UI calls these over IPC and the import pipeline calls
//! them directly.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::domain::Separator;

static BREAK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static WIDE_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static INDENTED_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]+").unwrap());

/// Line-break handling for [`format_input_text`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    /// Collapse every run of newlines to a single space
    pub remove_all_line_breaks: bool,
    /// Normalize paragraph breaks to exactly one blank line
    pub leave_double_line_breaks: bool,
    /// Strip code points outside the XML-permitted ranges
    pub xml_safe: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            remove_all_line_breaks: false,
            leave_double_line_breaks: false,
            xml_safe: true,
        }
    }
}

/// Whether a code point survives XML-safe stripping.
///
/// Permitted: TAB, LF, CR, U+0020..=U+D7FF, U+E000..=U+FFFD.
fn is_xml_permitted(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{0020}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
}

/// Normalize pasted text.
///
/// CRLF/CR become LF, then newline runs collapse according to the options:
/// single newlines become a space while paragraph breaks (two or more
/// newlines) pass through untouched, or normalize to exactly one blank
/// line with `leave_double_line_breaks`, or flatten to spaces along with
/// everything else with `remove_all_line_breaks`. Runs of horizontal
/// whitespace collapse to one space and indentation after a newline is
/// stripped. The result is trimmed; empty input stays empty.
///
/// Idempotent for any fixed set of options.
pub fn format_input_text(input: &str, options: &FormatOptions) -> String {
    if input.is_empty() {
        return String::new();
    }

    let text = input.replace("\r\n", "\n").replace('\r', "\n");

    let text = if options.remove_all_line_breaks {
        BREAK_RUN.replace_all(&text, " ").into_owned()
    } else {
        BREAK_RUN
            .replace_all(&text, |caps: &Captures| {
                if caps[0].len() == 1 {
                    " ".to_string()
                } else if options.leave_double_line_breaks {
                    "\n\n".to_string()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    };

    let text = WIDE_GAP.replace_all(&text, " ");
    let text = INDENTED_LINE.replace_all(&text, "\n");

    let text = if options.xml_safe {
        text.chars().filter(|c| is_xml_permitted(*c)).collect()
    } else {
        text.into_owned()
    };

    text.trim().to_string()
}

/// Render a CP value with a thousands separator.
///
/// Non-finite input is coerced to 0 and the value truncated toward zero
/// before grouping digits in threes from the right. A leading minus sign
/// is preserved.
pub fn format_budget(value: f64, separator: Separator) -> String {
    let value = if value.is_finite() { value.trunc() } else { 0.0 };
    let magnitude = value.abs() as i64;
    let negative = value < 0.0 && magnitude != 0;

    let digits = magnitude.to_string();
    let glyph = separator.glyph();

    let grouped = if glyph.is_empty() {
        digits
    } else {
        let bytes = digits.as_bytes();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, b) in bytes.iter().enumerate() {
            if i > 0 && (bytes.len() - i) % 3 == 0 {
                out.push_str(glyph);
            }
            out.push(*b as char);
        }
        out
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_flattens_singles_keeps_paragraphs() {
        let input = "First line\r\n Second line\r\n\r\nThird   line";
        let out = format_input_text(input, &FormatOptions::default());
        assert_eq!(out, "First line Second line\n\nThird line");
    }

    #[test]
    fn test_default_policy_is_stable_under_reapplication() {
        let once = format_input_text("First\nSecond\n\n\nThird", &FormatOptions::default());
        assert_eq!(once, "First Second\n\n\nThird");
        assert_eq!(format_input_text(&once, &FormatOptions::default()), once);
    }

    #[test]
    fn test_remove_all_line_breaks() {
        let options = FormatOptions {
            remove_all_line_breaks: true,
            ..FormatOptions::default()
        };
        let out = format_input_text("a\nb\n\n\nc", &options);
        assert_eq!(out, "a b c");
    }

    #[test]
    fn test_leave_double_line_breaks() {
        let options = FormatOptions {
            leave_double_line_breaks: true,
            ..FormatOptions::default()
        };
        let out = format_input_text("a\nb\n\n\n\nc", &options);
        assert_eq!(out, "a b\n\nc");
    }

    #[test]
    fn test_idempotent() {
        let cases = [
            "First\r\nSecond\r\n\r\n  Third",
            "one\ttwo   three",
            "\n\n  padded  \n\n",
        ];
        for options in [
            FormatOptions::default(),
            FormatOptions {
                remove_all_line_breaks: true,
                ..FormatOptions::default()
            },
            FormatOptions {
                leave_double_line_breaks: true,
                ..FormatOptions::default()
            },
        ] {
            for case in cases {
                let once = format_input_text(case, &options);
                let twice = format_input_text(&once, &options);
                assert_eq!(once, twice, "not idempotent for {:?}", case);
            }
        }
    }

    #[test]
    fn test_xml_safe_strips_control_characters() {
        let out = format_input_text("bad\u{0}control\u{8} here", &FormatOptions::default());
        assert_eq!(out, "badcontrol here");
    }

    #[test]
    fn test_xml_safe_boundary_code_points() {
        // U+D7FF and U+E000 bracket the surrogate gap and stay; U+FFFE
        // and U+FFFF sit past U+FFFD and go
        let out = format_input_text(
            "a\u{D7FF}b\u{E000}c\u{FFFE}d\u{FFFF}e",
            &FormatOptions::default(),
        );
        assert_eq!(out, "a\u{D7FF}b\u{E000}cde");
    }

    #[test]
    fn test_xml_safe_disabled_keeps_everything() {
        let options = FormatOptions {
            xml_safe: false,
            ..FormatOptions::default()
        };
        let out = format_input_text("keep\u{1}this", &options);
        assert_eq!(out, "keep\u{1}this");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_input_text("", &FormatOptions::default()), "");
    }

    #[test]
    fn test_format_budget_separators() {
        assert_eq!(format_budget(-4200.0, Separator::Period), "-4.200");
        assert_eq!(format_budget(1234567.0, Separator::Comma), "1,234,567");
        assert_eq!(format_budget(1234567.0, Separator::Space), "1 234 567");
        assert_eq!(format_budget(1234567.0, Separator::None), "1234567");
        assert_eq!(format_budget(100.0, Separator::Comma), "100");
        assert_eq!(format_budget(1000.0, Separator::Comma), "1,000");
    }

    #[test]
    fn test_format_budget_degenerate_input() {
        assert_eq!(format_budget(f64::NAN, Separator::Comma), "0");
        assert_eq!(format_budget(f64::INFINITY, Separator::Comma), "0");
        assert_eq!(format_budget(0.0, Separator::Comma), "0");
        // Truncation toward zero, no "-0"
        assert_eq!(format_budget(-0.5, Separator::Comma), "0");
        assert_eq!(format_budget(1999.9, Separator::Comma), "1,999");
    }
}
