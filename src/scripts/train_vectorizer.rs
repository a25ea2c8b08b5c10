//! Fits the TF-IDF vectorizer on the corpus and writes `vectorizer.json`.
//!
//! Usage: `cargo run --bin train_vectorizer` after `build_corpus` has
//! produced `books.csv` in `MODEL_DIR` (default `./model`).

use anyhow::Context;
use console::style;
use mood_recommender_api::ml::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use mood_recommender_api::services::engine::{load_corpus, searchable_text, CORPUS_FILE, VECTORIZER_FILE};
use std::fs::File;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let model_dir =
        PathBuf::from(std::env::var("MODEL_DIR").unwrap_or_else(|_| "./model".to_string()));

    let corpus_path = model_dir.join(CORPUS_FILE);
    let corpus =
        load_corpus(&corpus_path).with_context(|| format!("loading {}", corpus_path.display()))?;

    let documents: Vec<&str> = corpus.iter().map(searchable_text).collect();
    let vectorizer = TfidfVectorizer::fit(&documents)?;

    let artifact = VectorizerArtifact {
        fitted_at: chrono::Utc::now().to_rfc3339(),
        corpus_size: corpus.len(),
        vectorizer,
    };

    let artifact_path = model_dir.join(VECTORIZER_FILE);
    let file = File::create(&artifact_path)
        .with_context(|| format!("creating {}", artifact_path.display()))?;
    serde_json::to_writer_pretty(file, &artifact)?;

    println!(
        "{} fitted {} features over {} books, wrote {}",
        style("done:").green().bold(),
        artifact.vectorizer.n_features(),
        artifact.corpus_size,
        artifact_path.display()
    );

    Ok(())
}
