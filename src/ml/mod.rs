pub mod similarity;
pub mod vectorizer;

pub use vectorizer::{TfidfVectorizer, VectorizerArtifact};
