//! Frequency-based extractive summarizer.

use std::collections::HashMap;

/// Number of sentences kept in a summary.
pub const SUMMARY_SENTENCES: usize = 3;

/// Bonus granted to the first sentences, decreasing by one per position.
const LEAD_BONUS: usize = 3;

/// Tokens of this many characters or fewer are ignored when counting.
const MIN_TOKEN_CHARS: usize = 2;

const STOP_WORDS: &[&str] = &[
    "les", "des", "une", "est", "dans", "pour", "que", "qui", "avec", "sur", "pas", "par", "plus",
    "mais", "sont", "ont", "aux", "ces", "cette", "son", "ses", "leur", "nous", "vous", "ils",
    "elle", "the", "and", "for", "are", "with", "that", "this",
];

struct SentenceScore<'a> {
    text: &'a str,
    score: f64,
    original_index: usize,
}

/// Summarize `text` by keeping its most representative sentences.
///
/// Texts of [`SUMMARY_SENTENCES`] sentences or fewer are returned verbatim.
/// Otherwise the top-scoring sentences are joined in their original order
/// with `". "` and terminated by a period. The result is deterministic.
#[must_use]
pub fn summarize(text: &str) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= SUMMARY_SENTENCES {
        return text.to_string();
    }

    let frequencies = word_frequencies(&sentences);

    let mut scored: Vec<SentenceScore<'_>> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| SentenceScore {
            text: sentence,
            score: score_sentence(sentence, index, &frequencies),
            original_index: index,
        })
        .collect();

    // Stable sort: equal scores keep the earlier sentence first.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(SUMMARY_SENTENCES);
    scored.sort_by_key(|s| s.original_index);

    let mut summary = scored
        .iter()
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join(". ");
    summary.push('.');
    summary
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn is_counted(word: &str) -> bool {
    word.chars().count() > MIN_TOKEN_CHARS && !STOP_WORDS.contains(&word)
}

fn word_frequencies(sentences: &[&str]) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for sentence in sentences {
        for word in sentence.split_whitespace().map(normalize) {
            if is_counted(&word) {
                *frequencies.entry(word).or_insert(0) += 1;
            }
        }
    }
    frequencies
}

#[allow(clippy::cast_precision_loss)]
fn score_sentence(sentence: &str, index: usize, frequencies: &HashMap<String, usize>) -> f64 {
    let mut word_count = 0_usize;
    let mut weight = LEAD_BONUS.saturating_sub(index);
    for word in sentence.split_whitespace() {
        word_count += 1;
        weight += frequencies.get(&normalize(word)).copied().unwrap_or(0);
    }
    weight as f64 / word_count.max(1) as f64
}
