//! Canned conversational replies with light randomization.
//!
//! The randomness source is always passed in by the caller so replies stay
//! deterministic under test.

use rand::Rng;

use crate::category::Category;

/// Reply pool for categories the tracker does not support yet. Each template
/// interpolates the category label the user asked for.
const FRIENDLY_TEMPLATES: [&str; 4] = [
    "Oops! I'm not tracking products in the *{category}* category just yet.",
    "Thanks for your interest in *{category}*, I'm working on adding support for that soon!",
    "*{category}* is not available at the moment, but it's on my radar!",
    "I'm not tracking *{category}* yet, but stay tuned, it's coming!",
];

/// Picks one of the canned unsupported-category replies.
pub fn unsupported_category_reply<R: Rng + ?Sized>(rng: &mut R, category_label: &str) -> String {
    let template = FRIENDLY_TEMPLATES[rng.gen_range(0..FRIENDLY_TEMPLATES.len())];
    template.replace("{category}", category_label)
}

/// Builds the target-price prompt with a category-appropriate example amount.
pub fn target_price_prompt<R: Rng + ?Sized>(rng: &mut R, category: Category) -> String {
    let example = example_price(rng, category);
    format!("💵 Enter your target price:\nExample: {example}.99")
}

fn example_price<R: Rng + ?Sized>(rng: &mut R, category: Category) -> u32 {
    match category {
        Category::Laptops => rng.gen_range(800..=1000),
        _ => rng.gen_range(450..=900),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn unsupported_reply_interpolates_the_label() {
        let mut rng = StdRng::seed_from_u64(7);
        let expected: Vec<String> = FRIENDLY_TEMPLATES
            .iter()
            .map(|t| t.replace("{category}", "TVs"))
            .collect();
        for _ in 0..50 {
            let reply = unsupported_category_reply(&mut rng, "TVs");
            assert!(reply.contains("TVs"));
            assert!(expected.contains(&reply));
        }
    }

    #[test]
    fn all_four_templates_get_used() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(unsupported_category_reply(&mut rng, "Cameras"));
        }
        assert_eq!(seen.len(), FRIENDLY_TEMPLATES.len());
    }

    #[test]
    fn price_prompt_examples_stay_in_category_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let prompt = target_price_prompt(&mut rng, Category::Laptops);
            let example = extract_example(&prompt);
            assert!((800..=1000).contains(&example), "laptop example {example}");

            let prompt = target_price_prompt(&mut rng, Category::Phones);
            let example = extract_example(&prompt);
            assert!((450..=900).contains(&example), "phone example {example}");
        }
    }

    #[test]
    fn price_prompt_has_the_expected_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let prompt = target_price_prompt(&mut rng, Category::Gaming);
        assert!(prompt.starts_with("💵 Enter your target price:\nExample: "));
        assert!(prompt.ends_with(".99"));
    }

    fn extract_example(prompt: &str) -> u32 {
        prompt
            .rsplit_once("Example: ")
            .and_then(|(_, tail)| tail.strip_suffix(".99"))
            .and_then(|n| n.parse().ok())
            .expect("prompt carries an example amount")
    }
}
