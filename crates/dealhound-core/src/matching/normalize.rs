//! Text normalization shared by every matching component.

use regex::Regex;
use std::sync::OnceLock;

fn non_alnum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").unwrap())
}

fn digit_letter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d)([a-z])").unwrap())
}

fn letter_digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z])(\d)").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Canonicalizes listing text into comparable token form.
///
/// Lowercases, replaces every non-alphanumeric character with a space, splits
/// digit/letter boundaries in both directions (`"14pro"` becomes `"14 pro"`,
/// `"iphone14"` becomes `"iphone 14"`), and collapses whitespace runs. The
/// result contains only lowercase alphanumeric tokens separated by single
/// spaces, so whole-word containment reduces to token membership.
pub fn clean_listing_text(text: &str) -> String {
    let text = text.to_lowercase();
    let text = non_alnum_re().replace_all(&text, " ");
    let text = digit_letter_re().replace_all(&text, "$1 $2");
    let text = letter_digit_re().replace_all(&text, "$1 $2");
    whitespace_re().replace_all(&text, " ").trim().to_string()
}

/// Strips text down to bare lowercase alphanumerics.
///
/// Used by the fuzzy model resolver, where punctuation and spacing in model
/// names ("WH-1000XM5" vs "wh1000 xm5") carry no signal.
pub fn squash(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_digit_letter_boundaries() {
        assert_eq!(clean_listing_text("14pro"), "14 pro");
        assert_eq!(clean_listing_text("iphone14"), "iphone 14");
        assert_eq!(clean_listing_text("256GB"), "256 gb");
    }

    #[test]
    fn strips_punctuation_to_spaces() {
        assert_eq!(
            clean_listing_text("Apple iPhone 14 Pro Max (256GB) – Space Black"),
            "apple iphone 14 pro max 256 gb space black"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(clean_listing_text("  sony   wh-1000xm5  "), "sony wh 1000 xm 5");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_listing_text(""), "");
        assert_eq!(clean_listing_text("!!!"), "");
    }

    #[test]
    fn squash_keeps_only_alphanumerics() {
        assert_eq!(squash("WH-1000XM5"), "wh1000xm5");
        assert_eq!(squash("QuietComfort 45"), "quietcomfort45");
        assert_eq!(squash("  AirPods Pro (2nd Gen) "), "airpodspro2ndgen");
    }
}
