use crate::error::{ApiError, Result};
use ndarray::Array1;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9']+").unwrap());

/// TF-IDF vectorizer with a fit-offline / transform-online split.
///
/// `fit` is only ever run by the offline trainer; the serving path
/// deserializes the fitted state from `vectorizer.json` and calls
/// `transform`. IDF uses the smoothed formula `ln((1 + n) / (1 + df)) + 1`,
/// and transformed vectors are L2-normalized so cosine similarity reduces
/// to a dot product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

/// On-disk wrapper around a fitted vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub fitted_at: String,
    pub corpus_size: usize,
    pub vectorizer: TfidfVectorizer,
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

impl TfidfVectorizer {
    /// Learn vocabulary and document frequencies from a corpus.
    ///
    /// Terms are indexed in alphabetical order so that fitting the same
    /// corpus twice yields byte-identical artifacts.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        if documents.is_empty() {
            return Err(ApiError::ModelLoadError(
                "cannot fit a vectorizer on an empty corpus".to_string(),
            ));
        }

        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = doc_freq.keys().cloned().collect();
        terms.sort();

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = doc_freq[&term];
            idf.push(((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Project a text into the fitted vector space.
    ///
    /// Out-of-vocabulary tokens are ignored; a text with no known token
    /// maps to the zero vector.
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut vector = Array1::<f32>::zeros(self.idf.len());

        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += 1.0;
            }
        }

        for (index, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[index];
        }

        let norm = vector.dot(&vector).sqrt();
        if norm > 0.0 {
            vector.mapv_inplace(|w| w / norm);
        }

        vector
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> TfidfVectorizer {
        TfidfVectorizer::fit(&[
            "a cozy mystery in a small village",
            "spaceships and distant galaxies",
            "a quiet book of poems for rainy nights",
        ])
        .unwrap()
    }

    #[test]
    fn fit_rejects_empty_corpus() {
        let documents: Vec<String> = Vec::new();
        assert!(TfidfVectorizer::fit(&documents).is_err());
    }

    #[test]
    fn fit_learns_lowercased_vocabulary() {
        let vectorizer = TfidfVectorizer::fit(&["Cozy MYSTERY", "cozy village"]).unwrap();
        assert_eq!(vectorizer.n_features(), 3);
        assert!(vectorizer.vocabulary.contains_key("cozy"));
        assert!(vectorizer.vocabulary.contains_key("mystery"));
    }

    #[test]
    fn transform_is_l2_normalized() {
        let vectorizer = fitted();
        let vector = vectorizer.transform("cozy mystery village");
        let norm = vector.dot(&vector).sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unknown_tokens_map_to_zero_vector() {
        let vectorizer = fitted();
        let vector = vectorizer.transform("zeppelin xylophone");
        assert!(vector.iter().all(|w| *w == 0.0));
    }

    #[test]
    fn rarer_terms_get_higher_idf() {
        let vectorizer =
            TfidfVectorizer::fit(&["rain rain common", "common words", "common again"]).unwrap();
        let common = vectorizer.idf[vectorizer.vocabulary["common"]];
        let rare = vectorizer.idf[vectorizer.vocabulary["rain"]];
        assert!(rare > common);
    }
}
