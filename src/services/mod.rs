pub mod engine;
pub mod mock;
pub mod normalizer;
pub mod recommender;

// Re-export public types
pub use engine::SimilarityEngine;
pub use recommender::{MoodModel, RecommendationQuery, RecommenderService};
