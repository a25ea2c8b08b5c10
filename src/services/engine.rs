//! TF-IDF cosine-similarity engine over the precomputed corpus.
//!
//! Artifacts are produced offline (`build_corpus`, `train_vectorizer`) and
//! loaded exactly once at startup; everything here is read-only afterwards.

use crate::error::{ApiError, Result};
use crate::ml::similarity::rank_by_similarity;
use crate::ml::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use crate::models::CorpusBook;
use crate::services::recommender::{MoodModel, RecommendationQuery};
use ndarray::Array2;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs::File;
use std::path::Path;
use tracing::info;

pub const CORPUS_FILE: &str = "books.csv";
pub const VECTORIZER_FILE: &str = "vectorizer.json";

#[derive(Debug, Deserialize)]
struct CorpusCsvRecord {
    id: Option<String>,
    #[serde(alias = "Title")]
    title: Option<String>,
    #[serde(alias = "Authors", alias = "Author")]
    author: Option<String>,
    #[serde(alias = "Description")]
    description: Option<String>,
    #[serde(alias = "Categories", alias = "categories")]
    genres: Option<String>,
}

/// Skip rows without an id or title; split the comma-separated genre column.
fn validate_record(record: CorpusCsvRecord) -> Option<CorpusBook> {
    let id = record.id?.trim().to_string();
    let title = record.title?.trim().to_string();
    if id.is_empty() || title.is_empty() {
        return None;
    }

    let author = record
        .author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    let genres = record
        .genres
        .map(|g| {
            g.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let description = record
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Some(CorpusBook {
        id,
        title,
        author,
        genres,
        description,
    })
}

/// Read the corpus CSV, dropping rows that fail validation.
pub fn load_corpus(path: &Path) -> Result<Vec<CorpusBook>> {
    let file = File::open(path)
        .map_err(|e| ApiError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let mut corpus = Vec::new();
    for record in reader.deserialize() {
        let record: CorpusCsvRecord = record?;
        if let Some(book) = validate_record(record) {
            corpus.push(book);
        }
    }

    Ok(corpus)
}

/// The text a book is matched against: its description, or the title for
/// the few entries that have none.
pub fn searchable_text(book: &CorpusBook) -> &str {
    book.description.as_deref().unwrap_or(&book.title)
}

pub struct SimilarityEngine {
    corpus: Vec<CorpusBook>,
    vectorizer: TfidfVectorizer,
    doc_matrix: Array2<f32>,
}

impl SimilarityEngine {
    /// Assemble an engine from an already-loaded corpus and fitted
    /// vectorizer, precomputing the document matrix.
    pub fn new(corpus: Vec<CorpusBook>, vectorizer: TfidfVectorizer) -> Result<Self> {
        if vectorizer.n_features() == 0 {
            return Err(ApiError::ModelLoadError(
                "vectorizer has an empty vocabulary".to_string(),
            ));
        }

        let n_features = vectorizer.n_features();
        let mut data = Vec::with_capacity(corpus.len() * n_features);
        for book in &corpus {
            let vector = vectorizer.transform(searchable_text(book));
            data.extend(vector.iter().copied());
        }
        let doc_matrix = Array2::from_shape_vec((corpus.len(), n_features), data)?;

        Ok(Self {
            corpus,
            vectorizer,
            doc_matrix,
        })
    }

    /// Load `books.csv` and `vectorizer.json` from the model directory.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let corpus = load_corpus(&model_dir.join(CORPUS_FILE))?;

        let vectorizer_path = model_dir.join(VECTORIZER_FILE);
        let file = File::open(&vectorizer_path)
            .map_err(|e| ApiError::ModelLoadError(format!("{}: {}", vectorizer_path.display(), e)))?;
        let artifact: VectorizerArtifact = serde_json::from_reader(file)
            .map_err(|e| ApiError::ModelLoadError(format!("{}: {}", vectorizer_path.display(), e)))?;

        info!(
            corpus_size = corpus.len(),
            fitted_at = %artifact.fitted_at,
            "loaded model artifacts"
        );

        Self::new(corpus, artifact.vectorizer)
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus.len()
    }

    /// Top-`k` corpus indices by cosine similarity to the query, ties in
    /// original corpus order. An empty corpus yields an empty ranking.
    pub fn rank(&self, query_text: &str, k: usize) -> Vec<(usize, f32)> {
        let query = self.vectorizer.transform(query_text);
        rank_by_similarity(&self.doc_matrix, &query, k)
    }
}

impl MoodModel for SimilarityEngine {
    fn name(&self) -> &str {
        "tfidf-cosine"
    }

    fn recommend(&self, query: &RecommendationQuery) -> Result<Vec<Value>> {
        let ranked = self.rank(&query.mood, query.limit);

        Ok(ranked
            .into_iter()
            .map(|(index, score)| {
                let book = &self.corpus[index];
                let mut item = json!({ "title": book.title, "score": score });
                if let Some(author) = &book.author {
                    item["author"] = json!(author);
                }
                if !book.genres.is_empty() {
                    item["genres"] = json!(book.genres);
                }
                item
            })
            .collect())
    }
}
