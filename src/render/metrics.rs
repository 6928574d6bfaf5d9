//! Helvetica advance widths and greedy word wrapping.
//!
//! Widths are the standard AFM metrics for the two built-in Helvetica faces,
//! in 1/1000 em, for the printable ASCII range. Characters outside that range
//! are measured at an average glyph width.

use super::surface::{FontWeight, TextStyle};

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;
const WIDE_WIDTH: u16 = 1000;

fn glyph_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        '\u{2E80}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' | '\u{FF00}'..='\u{FFEF}' => WIDE_WIDTH,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at `style.size`.
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| u32::from(glyph_width(c, style.weight)))
        .sum();
    units as f32 * style.size / 1000.0
}

/// Greedy word wrap.
///
/// Explicit newlines always break. Runs of whitespace collapse to one space.
/// A word wider than `max_width` on its own is split between characters;
/// every line holds at least one character so the result always terminates.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = split_long_word(word, max_width, &measure);
                // the tail may still accept following words
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn split_long_word<F>(word: &str, max_width: f32, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if measure(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle::regular(10.0)
    }

    #[test]
    fn test_known_widths() {
        // "Hello" = 722 + 556 + 222 + 222 + 556
        assert!((text_width("Hello", &style()) - 22.78).abs() < 1e-3);
        assert!(text_width("W", &TextStyle::bold(10.0)) > text_width("i", &TextStyle::bold(10.0)));
        assert_eq!(text_width("", &style()), 0.0);
    }

    #[test]
    fn test_cjk_is_full_em() {
        assert_eq!(text_width("中国", &style()), 20.0);
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let lines = wrap_text("Bank of China", 500.0, |s| text_width(s, &style()));
        assert_eq!(lines, vec!["Bank of China"]);
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        // fixed-width measure: 1pt per char
        let lines = wrap_text("aaa bbb ccc", 7.0, |s| s.chars().count() as f32);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_text("abcdefghij xy", 4.0, |s| s.chars().count() as f32);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_respects_newlines_and_empty_input() {
        let lines = wrap_text("one\ntwo", 100.0, |s| s.chars().count() as f32);
        assert_eq!(lines, vec!["one", "two"]);
        assert!(wrap_text("   ", 100.0, |s| s.chars().count() as f32).is_empty());
    }

    #[test]
    fn test_wrap_terminates_when_nothing_fits() {
        let lines = wrap_text("abc", 0.5, |s| s.chars().count() as f32);
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}
