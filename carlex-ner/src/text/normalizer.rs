// Text Normalizer - Deterministic String Cleaning
//
// lowercase → drop apostrophes → dashes to spaces → punctuation to spaces
// (hyphens survive only between two alphanumerics) → drop standalone 1-3
// digit numbers → collapse whitespace

use once_cell::sync::Lazy;
use regex::Regex;

/// Apostrophes removed without leaving a gap ("I'm" → "im")
static APOSTROPHE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"['\x{2019}]").unwrap());

/// Figure, en, em and horizontal-bar dashes
static DASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{2012}-\x{2015}]").unwrap());

/// Anything but letters, digits, whitespace, control characters and hyphens
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}\s\p{Cc}-]").unwrap());

/// Hyphen without a word character on both sides
static LOOSE_HYPHEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\B-|-\B").unwrap());

/// Standalone 1-3 digit number
static SHORT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,3}$").unwrap());

/// Clean a sentence for tokenization
///
/// Idempotent: `clean(&clean(x)) == clean(x)`. Numeric tokens of four or more
/// digits ("2015") and numbers attached to letters or hyphens ("328i",
/// "5,000-mile" → "000-mile") are kept.
pub fn clean(text: &str) -> String {
    let text = text.to_lowercase();
    let text = APOSTROPHE_RE.replace_all(&text, "");
    let text = DASH_RE.replace_all(&text, " ");
    let text = PUNCTUATION_RE.replace_all(&text, " ");
    let text = LOOSE_HYPHEN_RE.replace_all(&text, " ");

    text.split_whitespace()
        .filter(|token| !SHORT_NUMBER_RE.is_match(token))
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Text biased toward the characters the cleaning steps act on
    fn arb_forum_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                any::<char>(),
                prop::sample::select(vec![
                    '-', '\'', '\u{2019}', '\u{2014}', ' ', '\n', '7', 'A', '_', '.',
                ]),
            ],
            0..64,
        )
        .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn clean_is_idempotent(text in any::<String>()) {
            let once = clean(&text);
            prop_assert_eq!(clean(&once), once);
        }

        #[test]
        fn clean_is_idempotent_on_forum_text(text in arb_forum_text()) {
            let once = clean(&text);
            prop_assert_eq!(clean(&once), once);
        }

        #[test]
        fn clean_output_has_no_short_numbers(text in arb_forum_text()) {
            let cleaned = clean(&text);
            prop_assert!(!cleaned.starts_with(' ') && !cleaned.ends_with(' '));
            for token in cleaned.split(' ') {
                prop_assert!(!(1..=3).contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()));
            }
        }
    }
}
