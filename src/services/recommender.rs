use crate::models::{BookRecommendation, RecommendationRequest};
use crate::services::{mock, normalizer};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Hard ceiling on the number of recommendations per request.
pub const MAX_LIMIT: usize = 50;

/// The query a model sees, derived from a validated request with the limit
/// already clamped.
#[derive(Debug, Clone)]
pub struct RecommendationQuery {
    pub mood: String,
    pub sentiment: Option<String>,
    pub genres: Option<Vec<String>>,
    pub limit: usize,
}

/// A pluggable recommendation model.
///
/// Implementations return raw, loosely shaped items (JSON objects, arrays
/// or bare strings); the normalizer is responsible for coercing them into
/// the response schema. Returning an error or an empty list are both valid
/// outcomes and simply route the request to the fallback catalog.
pub trait MoodModel: Send + Sync {
    fn name(&self) -> &str;

    fn recommend(&self, query: &RecommendationQuery) -> crate::error::Result<Vec<Value>>;
}

/// Outcome of the model-invocation step. A missing model, a failed call and
/// an empty result are indistinguishable downstream: all serve the fallback.
enum RawCandidates {
    Available(Vec<Value>),
    Unavailable,
}

/// Request orchestration: invoke the model (if any), normalize its output,
/// fall back to the deterministic mock catalog.
///
/// Constructed once at startup and shared read-only across requests;
/// `recommend` is infallible by design.
#[derive(Clone)]
pub struct RecommenderService {
    model: Option<Arc<dyn MoodModel>>,
}

impl RecommenderService {
    pub fn new(model: Arc<dyn MoodModel>) -> Self {
        Self { model: Some(model) }
    }

    /// A service without a model, serving only the fallback catalog. Used
    /// when the startup artifact load fails.
    pub fn mock_only() -> Self {
        Self { model: None }
    }

    pub fn recommend(&self, request: &RecommendationRequest) -> Vec<BookRecommendation> {
        let limit = request.limit.clamp(1, MAX_LIMIT);
        let query = RecommendationQuery {
            mood: request.mood.clone(),
            sentiment: request.sentiment.clone(),
            genres: request.genres.clone(),
            limit,
        };

        match self.fetch_candidates(&query) {
            RawCandidates::Available(raw) => {
                let parsed = normalizer::normalize(&raw, limit);
                if parsed.is_empty() {
                    debug!("no raw item survived normalization, serving fallback list");
                    mock::generate(limit, request.genres.as_deref())
                } else {
                    parsed
                }
            }
            RawCandidates::Unavailable => mock::generate(limit, request.genres.as_deref()),
        }
    }

    fn fetch_candidates(&self, query: &RecommendationQuery) -> RawCandidates {
        let Some(model) = &self.model else {
            return RawCandidates::Unavailable;
        };

        match model.recommend(query) {
            Ok(raw) if !raw.is_empty() => RawCandidates::Available(raw),
            Ok(_) => {
                debug!(model = model.name(), "model returned no candidates");
                RawCandidates::Unavailable
            }
            Err(err) => {
                warn!(
                    model = model.name(),
                    %err,
                    "model call failed, serving fallback list"
                );
                RawCandidates::Unavailable
            }
        }
    }
}
