//! Deterministic fallback catalog, served whenever the model path yields
//! nothing usable.

use crate::models::BookRecommendation;
use once_cell::sync::Lazy;

/// Gives the genre-filter loop `attempts = limit * ATTEMPTS_PER_SLOT`
/// iterations before giving up on filling the list.
const ATTEMPTS_PER_SLOT: usize = 10;

static FALLBACK_CATALOG: Lazy<Vec<BookRecommendation>> = Lazy::new(|| {
    vec![
        entry("The Little Guide to Feeling Good", "A. Author", &["self-help"], 0.9),
        entry("A Cozy Mystery", "B. Writer", &["mystery", "cozy"], 0.85),
        entry("Space Adventures", "C. Scribe", &["sci-fi"], 0.8),
        entry("Historical Tales", "D. Chronicler", &["history"], 0.75),
        entry("Poems for Quiet Nights", "E. Lyric", &["poetry"], 0.72),
    ]
});

fn entry(title: &str, author: &str, genres: &[&str], score: f32) -> BookRecommendation {
    BookRecommendation {
        title: title.to_string(),
        author: Some(author.to_string()),
        genres: Some(genres.iter().map(|g| g.to_string()).collect()),
        score: Some(score),
    }
}

/// Generate up to `limit` fallback recommendations, preferring catalog
/// entries whose genres intersect the requested filter.
///
/// Titles get a ` (n)` suffix so cycling the catalog never produces exact
/// duplicates. A filter matching no entry terminates after a bounded number
/// of attempts and returns whatever was collected, possibly nothing.
pub fn generate(limit: usize, genres: Option<&[String]>) -> Vec<BookRecommendation> {
    let mut results = Vec::with_capacity(limit);
    let mut attempt = 0;

    while results.len() < limit {
        let template = &FALLBACK_CATALOG[attempt % FALLBACK_CATALOG.len()];
        if matches_filter(template.genres.as_deref(), genres) {
            let mut item = template.clone();
            item.title = format!("{} ({})", template.title, results.len() + 1);
            results.push(item);
        }

        attempt += 1;
        if attempt > limit * ATTEMPTS_PER_SLOT {
            break;
        }
    }

    results.truncate(limit);
    results
}

fn matches_filter(entry_genres: Option<&[String]>, filter: Option<&[String]>) -> bool {
    match filter {
        None => true,
        Some(wanted) if wanted.is_empty() => true,
        Some(wanted) => entry_genres
            .unwrap_or_default()
            .iter()
            .any(|g| wanted.contains(g)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_up_to_limit_without_filter() {
        let results = generate(5, None);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].title, "The Little Guide to Feeling Good (1)");
        assert_eq!(results[4].title, "Poems for Quiet Nights (5)");
    }

    #[test]
    fn cycles_catalog_for_large_limits_without_duplicate_titles() {
        let results = generate(12, None);
        assert_eq!(results.len(), 12);

        let mut titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        titles.dedup();
        assert_eq!(titles.len(), 12);
    }

    #[test]
    fn same_inputs_produce_identical_output() {
        let genres = vec!["mystery".to_string()];
        assert_eq!(generate(7, Some(&genres)), generate(7, Some(&genres)));
    }

    #[test]
    fn genre_filter_keeps_only_matching_entries() {
        let genres = vec!["poetry".to_string()];
        let results = generate(3, Some(&genres));

        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|r| r.genres.as_deref() == Some(&["poetry".to_string()][..])));
    }

    #[test]
    fn nonexistent_genre_terminates_with_empty_list() {
        let genres = vec!["nonexistent-genre".to_string()];
        let results = generate(5, Some(&genres));
        assert!(results.len() <= 5);
        assert!(results.is_empty());
    }

    #[test]
    fn empty_filter_behaves_like_no_filter() {
        let genres: Vec<String> = Vec::new();
        assert_eq!(generate(5, Some(&genres)), generate(5, None));
    }
}
