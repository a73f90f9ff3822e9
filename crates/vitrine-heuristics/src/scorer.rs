//! Lexicon-based sentiment scorer for French product reviews.

use crate::types::SentimentResult;

/// Upper bound on the confidence a lexicon match can claim.
pub const MAX_CONFIDENCE: f64 = 0.8;

/// Words per text at which the length signal saturates.
const SATURATION_WORDS: f64 = 50.0;

/// Share of words expected to carry polarity in an opinionated text.
const EXPECTED_MATCH_DENSITY: f64 = 0.2;

/// Polarity marker words.
///
/// Entries are lowercase and matched by substring containment against each
/// lowercased whitespace token, so `"bonjour"` counts as a hit for `"bon"`.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon<'a> {
    pub positive: &'a [&'a str],
    pub negative: &'a [&'a str],
}

impl Lexicon<'static> {
    /// The built-in French review lexicon.
    #[must_use]
    pub const fn french() -> Self {
        Self {
            positive: POSITIVE,
            negative: NEGATIVE,
        }
    }
}

impl Default for Lexicon<'static> {
    fn default() -> Self {
        Self::french()
    }
}

const POSITIVE: &[&str] = &[
    "bon",
    "bien",
    "excellent",
    "super",
    "génial",
    "parfait",
    "adore",
    "aime",
    "magnifique",
    "formidable",
    "satisfait",
    "recommande",
    "top",
    "merveilleux",
    "fantastique",
    "agréable",
];

const NEGATIVE: &[&str] = &[
    "mauvais",
    "nul",
    "terrible",
    "horrible",
    "déteste",
    "décevant",
    "déçu",
    "problème",
    "défaut",
    "cassé",
    "lenteur",
    "pire",
    "médiocre",
    "arnaque",
    "inutile",
    "catastrophe",
];

/// Score `text` with the built-in French lexicon.
///
/// Empty or unmatched text yields the neutral rating `3`.
#[must_use]
pub fn score(text: &str) -> SentimentResult {
    score_with(&Lexicon::french(), text)
}

/// Score `text` against an arbitrary lexicon.
///
/// The positive and negative shares of whitespace tokens are mapped onto a
/// `1..=5` rating; confidence averages a text-length signal and a
/// match-density signal and is capped at [`MAX_CONFIDENCE`].
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn score_with(lexicon: &Lexicon<'_>, text: &str) -> SentimentResult {
    let mut word_count = 0_usize;
    let mut positive = 0_usize;
    let mut negative = 0_usize;

    for token in text.split_whitespace() {
        let token = token.to_lowercase();
        word_count += 1;
        if lexicon.positive.iter().any(|w| token.contains(w)) {
            positive += 1;
        }
        if lexicon.negative.iter().any(|w| token.contains(w)) {
            negative += 1;
        }
    }

    let total = word_count.max(1) as f64;
    let ratio = positive as f64 / total - negative as f64 / total;
    // ratio is in [-1, 1], so the rounded value is already a small positive number.
    let rating = ((ratio + 1.0) * 2.5).round().clamp(1.0, 5.0) as u8;

    let words = word_count as f64;
    let length_signal = (words / SATURATION_WORDS).min(1.0);
    let density_signal =
        ((positive + negative) as f64 / (words * EXPECTED_MATCH_DENSITY).max(1.0)).min(1.0);
    let confidence = ((length_signal + density_signal) / 2.0).min(MAX_CONFIDENCE);

    SentimentResult { rating, confidence }
}
