//! Date helper functions

use chrono::NaiveDate;

use crate::content::parse_date_string;

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM D, YYYY") // -> "November 12, 2025"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a post date for display, keeping the raw string when it does not parse
pub fn display_date(raw: &str, format: &str) -> String {
    match parse_date_string(raw) {
        Some(date) => format_date(&date, format),
        None => raw.trim().to_string(),
    }
}

/// ISO 8601 calendar date for `<time datetime>`
pub fn date_xml(raw: &str) -> Option<String> {
    parse_date_string(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Convert a Moment.js format to a chrono format
///
/// Tokens are read as runs of the same letter, so `D` and `DD` never collide.
/// Text in `[brackets]` is copied literally.
pub fn moment_to_chrono_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut result = String::with_capacity(format.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '[' {
            let end = chars[i + 1..]
                .iter()
                .position(|&ch| ch == ']')
                .map(|p| i + 1 + p);
            if let Some(end) = end {
                for &ch in &chars[i + 1..end] {
                    push_literal(&mut result, ch);
                }
                i = end + 1;
                continue;
            }
        }

        let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
        let token: String = std::iter::repeat(c).take(run).collect();
        match chrono_token(&token) {
            Some(directive) => result.push_str(directive),
            None => token.chars().for_each(|ch| push_literal(&mut result, ch)),
        }
        i += run;
    }

    result
}

fn chrono_token(token: &str) -> Option<&'static str> {
    let directive = match token {
        "YYYY" => "%Y",
        "YY" => "%y",
        "MMMM" => "%B",
        "MMM" => "%b",
        "MM" => "%m",
        "M" => "%-m",
        "DDDD" => "%j",
        "DD" => "%d",
        "D" => "%-d",
        "dddd" => "%A",
        "ddd" => "%a",
        "HH" => "%H",
        "H" => "%-H",
        "hh" => "%I",
        "h" => "%-I",
        "mm" => "%M",
        "ss" => "%S",
        "A" => "%p",
        "ZZ" => "%z",
        _ => return None,
    };
    Some(directive)
}

fn push_literal(result: &mut String, ch: char) {
    if ch == '%' {
        result.push_str("%%");
    } else {
        result.push(ch);
    }
}
