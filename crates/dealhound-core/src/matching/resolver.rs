//! Fuzzy headphone model resolution.
//!
//! The headphone sub-flow has no structured attribute sequence; instead a
//! closed vocabulary of known model names is consulted. Input and vocabulary
//! are squashed to bare alphanumerics before scoring, so punctuation and
//! spacing differences ("WH-1000XM5" vs "wh1000 xm5") never cost points.

use super::normalize::squash;
use strsim::jaro_winkler;

/// Similarity score (0-100) at or above which the best candidate is offered
/// directly for yes/no confirmation.
pub const CONFIDENT_SCORE: u8 = 85;

/// How many candidates to suggest when no confident match exists.
const SUGGESTION_COUNT: usize = 3;

/// The known headphone model vocabulary.
pub const KNOWN_MODELS: &[&str] = &[
    "WH-1000XM5",
    "WH-1000XM4",
    "WH-CH520",
    "WH-XB910N",
    "WH-RF400",
    "WF-1000XM5",
    "WF-1000XM4",
    "WH-CH720N",
    "WF-C700N",
    "WF-C510",
    "MDR-ZX110",
    "QuietComfort 45",
    "QuietComfort Ultra",
    "Bose 700",
    "SoundLink II",
    "QuietComfort Earbuds II",
    "Ultra Open-Ear",
    "Studio3 Wireless",
    "Solo3 Wireless",
    "Solo4",
    "Powerbeats Pro",
    "Beats Fit Pro",
    "Studio Buds",
    "Solo Buds",
    "AirPods 2nd Gen",
    "AirPods 3rd Gen",
    "AirPods Pro 2nd Gen",
    "AirPods Max",
    "AirPods 4",
    "AirPods Max USB-C",
    "Momentum 4 Wireless",
    "Momentum True Wireless 3",
    "Momentum Sport",
    "HD 660S",
    "HD 569",
    "HD 600",
    "HD 560S",
    "Accentum Over-Ear",
    "Accentum Plus",
    "RS 175",
    "IE 200",
    "Momentum True Wireless 4",
    "Tune 510BT",
    "Tune 520BT",
    "Tune 670NC",
    "Tune 770NC",
    "Live 460NC",
    "Live 660NC",
    "Vibe Flex",
    "T110",
    "Endurance Race",
    "Hesh 2 Wireless",
    "Crusher Evo",
    "Grind Fuel",
    "Smokin Buds",
    "Hesh Evo",
    "Life Q20",
    "Life Q30",
    "Space One",
    "Aerofit 2",
    "Life Dot 3i",
    "JBuds Lux",
    "Go Air Pop",
    "Flex Open-Ear",
    "Major IV",
    "Monitor II ANC",
    "OpenRun Pro",
    "OpenRun Pro 2",
    "OpenMove",
    "HA-S31M",
    "HA-A10T",
    "G733 LIGHTSPEED",
    "Astro A50",
    "Astro A40 TR",
    "Galaxy Buds FE",
    "Galaxy Buds3",
    "Galaxy Buds3 Pro",
    "Elite 10 Gen 2",
    "Elite 4",
    "HS80 Max",
    "Virtuoso RGB Wireless XT",
    "Kraken V3 X",
    "Stealth Pro",
    "ROG Delta",
    "Achieve 100 Airlinks",
    "Dobuds ONE",
];

/// Outcome of resolving free-text model input against the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Best candidate scored at or above [`CONFIDENT_SCORE`]; the caller
    /// must still get a yes/no confirmation before committing it.
    Confident { model: &'static str, score: u8 },
    /// No confident hit; the top candidates by score, best first.
    Suggestions(Vec<&'static str>),
}

/// Maps noisy user input to the closest known model name.
pub fn resolve_model(input: &str) -> Resolution {
    let needle = squash(input);
    let mut scored: Vec<(&'static str, u8)> = KNOWN_MODELS
        .iter()
        .map(|model| (*model, similarity(&needle, &squash(model))))
        .collect();
    // Stable sort: ties keep vocabulary order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let (best_model, best_score) = scored[0];
    if best_score >= CONFIDENT_SCORE {
        Resolution::Confident {
            model: best_model,
            score: best_score,
        }
    } else {
        Resolution::Suggestions(
            scored
                .into_iter()
                .take(SUGGESTION_COUNT)
                .map(|(model, _)| model)
                .collect(),
        )
    }
}

fn similarity(a: &str, b: &str) -> u8 {
    (jaro_winkler(a, b) * 100.0).round() as u8
}
