//! Intent matching: does a genuine title refer to the product the user
//! actually described?
//!
//! The check is whole-word coverage of the stored search query against the
//! candidate title. Extra title tokens never penalize; missing query tokens
//! do. The gaming profile additionally ignores packaging words and
//! short-circuits single-token queries to plain containment.

use super::normalize::clean_listing_text;
use crate::category::Category;
use std::collections::HashSet;

/// Query tokens that describe packaging rather than product identity.
const STRATIFICATION_TOKENS: &[&str] = &["limited", "special", "collectors", "edition", "bundle"];

/// Minimum fraction of considered query tokens that must appear in the title.
const MATCH_THRESHOLD: f64 = 0.9;

/// Per-category matching behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchProfile {
    stratification_tokens: &'static [&'static str],
    single_token_containment: bool,
}

/// Plain coverage matching; used by phones, laptops, and headphones.
pub const DEFAULT_PROFILE: MatchProfile = MatchProfile {
    stratification_tokens: &[],
    single_token_containment: false,
};

/// Console matching: packaging tokens are excluded from the ratio and a
/// single-token query reduces to whole-word containment.
pub const GAMING_PROFILE: MatchProfile = MatchProfile {
    stratification_tokens: STRATIFICATION_TOKENS,
    single_token_containment: true,
};

/// The match profile for a category.
pub fn profile_for(category: Category) -> MatchProfile {
    match category {
        Category::Gaming => GAMING_PROFILE,
        _ => DEFAULT_PROFILE,
    }
}

/// Whole-word coverage test of `search_query` against `title`.
///
/// Both strings are normalized with [`clean_listing_text`]; after that every
/// token is a run of lowercase alphanumerics, so word-boundary containment is
/// exactly token-set membership.
pub fn is_intended_product(profile: MatchProfile, search_query: &str, title: &str) -> bool {
    if search_query.is_empty() || title.is_empty() {
        return false;
    }
    let cleaned_query = clean_listing_text(search_query);
    let cleaned_title = clean_listing_text(title);
    let query_tokens: Vec<&str> = cleaned_query.split_whitespace().collect();
    if query_tokens.is_empty() {
        return false;
    }
    let title_tokens: HashSet<&str> = cleaned_title.split_whitespace().collect();

    // Single-token queries are decided before any stratification filtering.
    if profile.single_token_containment && query_tokens.len() == 1 {
        return title_tokens.contains(query_tokens[0]);
    }

    let considered: Vec<&str> = query_tokens
        .iter()
        .copied()
        .filter(|token| !profile.stratification_tokens.contains(token))
        .collect();
    if considered.is_empty() {
        return false;
    }
    let found = considered
        .iter()
        .filter(|token| title_tokens.contains(**token))
        .count();
    found as f64 / considered.len() as f64 >= MATCH_THRESHOLD
}
