//! Similarity metrics for hybrid ranking.
//!
//! Three metrics feed the ranker: cosine similarity over embedding
//! vectors (semantic), trigram-set similarity over the content soup
//! (lexical), and word-level trigram similarity for fuzzy autocomplete.
//! The trigram metrics follow the usual convention of lowercasing,
//! splitting on non-alphanumerics, and padding each word with two leading
//! spaces and one trailing space before extracting character 3-grams.

use ahash::AHashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero norm (degenerate vectors, e.g.
/// the embedding of an empty content soup, rank last instead of
/// crashing). For unit-normalized inputs this equals the dot product, and
/// `1 - cosine_distance` equals this value.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vector dimensions must match");

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Character trigrams of a text, one padded word at a time.
fn trigrams(text: &str) -> AHashSet<[char; 3]> {
    let mut set = AHashSet::new();
    for word in text.to_lowercase().unicode_words() {
        collect_word_trigrams(word, &mut set);
    }
    set
}

fn collect_word_trigrams(word: &str, set: &mut AHashSet<[char; 3]>) {
    let mut padded: Vec<char> = Vec::with_capacity(word.chars().count() + 3);
    padded.push(' ');
    padded.push(' ');
    padded.extend(word.chars());
    padded.push(' ');

    for window in padded.windows(3) {
        set.insert([window[0], window[1], window[2]]);
    }
}

/// Trigram-set similarity between two texts: `|A ∩ B| / |A ∪ B|`.
///
/// Symmetric, in `[0, 1]`, and 0.0 when either side yields no trigrams.
pub fn trigram_similarity(a: &str, b: &str) -> f32 {
    let set_a = trigrams(a);
    let set_b = trigrams(b);

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;
    intersection as f32 / union as f32
}

/// Word-level fuzzy similarity of a query against a stored term.
///
/// The query's trigrams are compared against each individual word of the
/// term and against the term as a whole; the best match wins. This makes
/// a partial word ("Aerodyn") or a typo score highly against a term it
/// belongs to ("Aerodynamics", "Boundary Layer Aerodynamics") without
/// requiring the full term to match.
pub fn word_similarity(query: &str, term: &str) -> f32 {
    let query_trigrams = trigrams(query);
    if query_trigrams.is_empty() {
        return 0.0;
    }

    let mut best: f32 = 0.0;
    let lowered = term.to_lowercase();
    for word in lowered.unicode_words() {
        let mut word_trigrams = AHashSet::new();
        collect_word_trigrams(word, &mut word_trigrams);
        best = best.max(set_similarity(&query_trigrams, &word_trigrams));
    }

    let term_trigrams = trigrams(term);
    best.max(set_similarity(&query_trigrams, &term_trigrams))
}

fn set_similarity(a: &AHashSet<[char; 3]>, b: &AHashSet<[char; 3]>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f32 / union as f32
}
