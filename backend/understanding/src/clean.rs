//! Text cleaner: normalizes raw OCR output into the lowercase ASCII form the
//! nutrient patterns are written against.
//!
//! Double spaces are collapsed in a single pass, so a run of three or more
//! spaces can survive as two. The patterns use `\s+` between words and do not
//! care.

use std::fmt;
use std::ops::Deref;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ASCII_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").unwrap());

static UNWANTED_SYMBOLS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9%.,() ]+").unwrap());

/// Text that has been through [`clean`].
///
/// Only contains `[a-z0-9%.,() ]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CleanedText(String);

impl CleanedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CleanedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw recognized text. Never fails; any string is valid input.
///
/// Steps run in this order:
/// 1. newlines become spaces
/// 2. each `"  "` becomes `" "` (one pass)
/// 3. lowercase
/// 4. drop non-ASCII
/// 5. drop anything outside `[a-z0-9%.,() ]`
pub fn clean(raw: &str) -> CleanedText {
    let text = raw.replace('\n', " ");
    let text = text.replace("  ", " ");
    let text = text.to_lowercase();
    let text = NON_ASCII_RE.replace_all(&text, "");
    let text = UNWANTED_SYMBOLS_RE.replace_all(&text, "");
    CleanedText(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || "%.,() ".contains(c)
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(
            clean("Calories 250\nTotal Fat 10g").as_str(),
            "calories 250 total fat 10g"
        );
    }

    #[test]
    fn collapses_double_spaces() {
        assert_eq!(clean("Sodium 200mg  Protein 5g").as_str(), "sodium 200mg protein 5g");
    }

    #[test]
    fn collapse_is_single_pass() {
        let once = clean("a   b");
        assert_eq!(once.as_str(), "a  b");
        // A second pass finishes the job, so the cleaner is not idempotent here.
        assert_eq!(clean(&once).as_str(), "a b");
    }

    #[test]
    fn stripping_symbols_can_leave_double_spaces() {
        assert_eq!(clean("fat ! 3g").as_str(), "fat  3g");
    }

    #[test]
    fn newline_next_to_space_leaves_double_space_collapsed() {
        // "\n " -> "  " -> " "
        assert_eq!(clean("fat\n 3g").as_str(), "fat 3g");
    }

    #[test]
    fn idempotent_on_cleaned_text_without_double_spaces() {
        let samples = [
            "Nutrition Facts\nServing Size 1 cup (228g)\nCalories 250",
            "Total Fat 12g 18%\nSaturated Fat 3g 15%",
            "Vitamin A 4%, Vitamin C 2%",
            "",
            "%.,()",
        ];
        for raw in samples {
            let once = clean(raw);
            assert!(!once.contains("  "), "sample {raw:?} left a double space");
            assert_eq!(clean(&once), once, "sample {raw:?}");
        }
    }

    #[test]
    fn output_stays_in_allowed_charset() {
        let raw = "Ünïcödé — 12g\tTAB\r\n🍎 [brackets] {braces} 5% <tag> Fat: 3.5g; ok?";
        let cleaned = clean(raw);
        assert!(cleaned.chars().all(allowed), "got {cleaned:?}");
        assert!(!cleaned.contains('\n'));
    }

    #[test]
    fn output_stays_in_allowed_charset_across_code_points() {
        let separators = [" ", "\n", "  ", "\n\n"];
        let mut raw = String::new();
        for (i, c) in (0u32..=0x3000).filter_map(char::from_u32).enumerate() {
            raw.push(c);
            raw.push_str(separators[i % separators.len()]);
        }
        let cleaned = clean(&raw);
        assert!(cleaned.chars().all(allowed));
        // Every ASCII letter and digit survives lowercased.
        for c in ('a'..='z').chain('0'..='9') {
            assert!(cleaned.contains(c), "{c} missing");
        }
    }

    #[test]
    fn removes_rather_than_transliterates() {
        assert_eq!(clean("café").as_str(), "caf");
        assert_eq!(clean("Ø5g").as_str(), "5g");
    }

    #[test]
    fn tabs_and_carriage_returns_are_dropped() {
        assert_eq!(clean("Calories\t250").as_str(), "calories250");
        assert_eq!(clean("Calories 250\r\nFat").as_str(), "calories 250 fat");
    }

    #[test]
    fn empty_and_emoji_only_inputs_clean_to_empty() {
        assert_eq!(clean("").as_str(), "");
        assert_eq!(clean("🍎🥑🍌").as_str(), "");
    }
}
