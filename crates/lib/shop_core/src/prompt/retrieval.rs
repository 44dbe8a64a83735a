//! Keyword retrieval over the product catalog.
//!
//! Matching is plain substring containment of query words in the product's
//! searchable text. There is no stemming and no relevance score: results keep
//! catalog order and only the first [`MAX_MATCHES`] are returned.

use crate::catalog::{Catalog, ProductRecord};

/// Upper bound on products injected into a single prompt.
pub const MAX_MATCHES: usize = 3;

/// Words shorter than this many characters are ignored.
const MIN_WORD_CHARS: usize = 3;

/// Lower-cases `query`, splits it on whitespace and keeps words longer than
/// two characters, in query order.
pub fn search_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_WORD_CHARS)
        .map(str::to_owned)
        .collect()
}

/// Returns up to [`MAX_MATCHES`] products whose searchable text contains any
/// of `words`.
pub fn match_products<'a>(catalog: &'a Catalog, words: &[String]) -> Vec<&'a ProductRecord> {
    if words.is_empty() {
        return Vec::new();
    }

    catalog
        .products()
        .iter()
        .filter(|product| {
            let text = product.searchable_text();
            !text.is_empty() && words.iter().any(|word| text.contains(word.as_str()))
        })
        .take(MAX_MATCHES)
        .collect()
}
