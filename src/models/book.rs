use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

fn deserialize_opt_genres<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        String(String),
        Vec(Vec<String>),
    }

    match Option::<StringOrVec>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrVec::Vec(v)) => Ok(Some(v)),
        Some(StringOrVec::String(s)) => {
            // Handle comma-separated genres or a single genre
            let genres: Vec<String> = s
                .split(',')
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect();
            Ok(Some(genres))
        }
    }
}

fn deserialize_opt_score<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        Float(f32),
        String(String),
    }

    match Option::<StringOrFloat>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrFloat::Float(f)) => Ok(Some(f)),
        Some(StringOrFloat::String(s)) => f32::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A single recommendation as served to clients.
///
/// The tolerant deserializers let this double as the target type for
/// object-shaped raw model output: `genres` accepts a list or a
/// comma-separated string, `score` accepts a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecommendation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_genres",
        skip_serializing_if = "Option::is_none"
    )]
    pub genres: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f32>,
}

impl BookRecommendation {
    /// A recommendation carrying nothing but a title.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            genres: None,
            score: None,
        }
    }
}

/// One entry of the precomputed corpus, immutable after startup load.
#[derive(Debug, Clone)]
pub struct CorpusBook {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub genres: Vec<String>,
    pub description: Option<String>,
}
