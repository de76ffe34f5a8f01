//! Free-text search over the stored page corpus
//!
//! Queries are split into distinct lowercase terms and each page is scored
//! by the fraction of those terms present in its content. Every search
//! scans the full corpus it is given; there is no persistent inverted
//! index, which is acceptable for corpora bounded by a single browsing
//! session's crawls.

mod text;

pub use text::{plain_text, snippet, title};

use crate::store::StoredPage;

/// Maximum number of results returned by a single query
pub const RESULT_CAP: usize = 50;

/// A stored page annotated with its relevance for one query
///
/// Transient: exists only for the duration of the query that produced it.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub page: StoredPage,

    /// Fraction of distinct query terms present in the page content,
    /// always in `[0, 1]`
    pub relevance: f64,
}

/// Searches the corpus for pages matching a free-text query
///
/// Pages are scored by distinct-term presence: a term occurring once or a
/// hundred times contributes identically. Non-matching pages are dropped,
/// results are ordered by descending relevance with ties keeping their
/// corpus order, and the sequence is capped at [`RESULT_CAP`] entries.
///
/// An all-whitespace query returns an empty sequence without touching the
/// corpus.
pub fn search(query: &str, corpus: &[StoredPage]) -> Vec<SearchResult> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    struct Hit<'a> {
        matched: usize,
        page: &'a StoredPage,
    }

    let mut hits: Vec<Hit> = Vec::new();
    for page in corpus {
        let content = page.content.to_lowercase();
        let matched = terms.iter().filter(|t| content.contains(t.as_str())).count();
        if matched > 0 {
            hits.push(Hit { matched, page });
        }
    }

    // Stable sort: equal scores keep their corpus order
    hits.sort_by(|a, b| b.matched.cmp(&a.matched));
    hits.truncate(RESULT_CAP);

    let total = terms.len() as f64;
    hits.into_iter()
        .map(|hit| SearchResult {
            page: hit.page.clone(),
            relevance: hit.matched as f64 / total,
        })
        .collect()
}

/// Splits a query into distinct lowercase terms, keeping first-seen order
fn query_terms(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut terms: Vec<String> = Vec::new();
    for term in lowered.split_whitespace() {
        if !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, content: &str) -> StoredPage {
        StoredPage::new(
            url.to_string(),
            "example.com".to_string(),
            content.to_string(),
            "success".to_string(),
        )
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let corpus = vec![page("https://example.com/1", "anything")];
        assert!(search("", &corpus).is_empty());
        assert!(search("   \t  ", &corpus).is_empty());
    }

    #[test]
    fn test_single_term_full_relevance() {
        let corpus = vec![
            page("https://example.com/1", "cats are great"),
            page("https://example.com/2", "dogs rule"),
        ];

        let results = search("cats", &corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].page.url, "https://example.com/1");
        assert_eq!(results[0].relevance, 1.0);
    }

    #[test]
    fn test_partial_match_scores_fraction() {
        let corpus = vec![
            page("https://example.com/1", "cats are great"),
            page("https://example.com/2", "dogs rule"),
        ];

        let results = search("cats dogs", &corpus);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].relevance, 0.5);
        assert_eq!(results[1].relevance, 0.5);
        // Ties keep corpus order
        assert_eq!(results[0].page.url, "https://example.com/1");
        assert_eq!(results[1].page.url, "https://example.com/2");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let corpus = vec![page("https://example.com/1", "All About CATS")];
        let results = search("Cats", &corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relevance, 1.0);
    }

    #[test]
    fn test_duplicate_terms_collapse() {
        let corpus = vec![page("https://example.com/1", "cats")];
        let results = search("cats cats cats", &corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relevance, 1.0);
    }

    #[test]
    fn test_frequency_does_not_change_score() {
        let corpus = vec![
            page("https://example.com/1", "cats cats cats cats"),
            page("https://example.com/2", "cats"),
        ];

        let results = search("cats", &corpus);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].relevance, results[1].relevance);
        assert_eq!(results[0].page.url, "https://example.com/1");
    }

    #[test]
    fn test_relevance_bounds() {
        let corpus = vec![
            page("https://example.com/1", "alpha beta gamma"),
            page("https://example.com/2", "alpha only here"),
            page("https://example.com/3", "nothing relevant"),
        ];

        let results = search("alpha beta gamma", &corpus);
        for result in &results {
            assert!(result.relevance > 0.0 && result.relevance <= 1.0);
        }
        assert_eq!(results[0].relevance, 1.0);
        assert_eq!(results[0].page.url, "https://example.com/1");
    }

    #[test]
    fn test_ranking_descends_by_relevance() {
        let corpus = vec![
            page("https://example.com/1", "beta"),
            page("https://example.com/2", "alpha beta"),
        ];

        let results = search("alpha beta", &corpus);
        assert_eq!(results[0].page.url, "https://example.com/2");
        assert_eq!(results[0].relevance, 1.0);
        assert_eq!(results[1].relevance, 0.5);
    }

    #[test]
    fn test_result_cap_keeps_highest_scores() {
        let mut corpus: Vec<StoredPage> = (0..60)
            .map(|i| page(&format!("https://example.com/weak/{}", i), "alpha"))
            .collect();
        // A page matching both terms, inserted after the weak matches
        corpus.push(page("https://example.com/strong", "alpha beta"));

        let results = search("alpha beta", &corpus);
        assert_eq!(results.len(), RESULT_CAP);
        // The strong match survives the cap despite its corpus position
        assert_eq!(results[0].page.url, "https://example.com/strong");
    }

    #[test]
    fn test_search_is_deterministic() {
        let corpus: Vec<StoredPage> = (0..20)
            .map(|i| page(&format!("https://example.com/{}", i), "alpha beta"))
            .collect();

        let first = search("alpha beta", &corpus);
        let second = search("alpha beta", &corpus);

        let first_urls: Vec<&str> = first.iter().map(|r| r.page.url.as_str()).collect();
        let second_urls: Vec<&str> = second.iter().map(|r| r.page.url.as_str()).collect();
        assert_eq!(first_urls, second_urls);
    }
}
