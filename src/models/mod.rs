use serde::{Deserialize, Serialize};

// Re-export types from book.rs
pub use book::{BookRecommendation, CorpusBook};

mod book;

/// Request structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Free-text description of the mood the reader is in
    pub mood: String,
    /// Optional sentiment hint (carried through, unused by the similarity path)
    #[serde(default)]
    pub sentiment: Option<String>,
    /// Optional genre filter, applied to the fallback catalog
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    /// Number of recommendations to return (default: 5, clamped to [1, 50])
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Response structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<BookRecommendation>,
}

fn default_limit() -> usize {
    5
}
