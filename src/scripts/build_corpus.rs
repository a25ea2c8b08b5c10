//! Builds `books.csv` from the Google Books volumes API.
//!
//! Usage: `cargo run --bin build_corpus` (writes into `MODEL_DIR`, default
//! `./model`). The fetch is sequential with a short delay between pages to
//! stay polite to the public API.

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::time::{sleep, Duration};
use tracing::warn;

const BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

const QUERIES: &[&str] = &[
    "fiction",
    "fantasy",
    "science fiction",
    "romance",
    "mystery",
    "self help",
    "history",
    "poetry",
    "philosophy",
];

const PAGE_SIZE: usize = 40;
const MAX_RESULTS_PER_QUERY: usize = 200;
const PAGE_DELAY_MS: u64 = 200;

#[derive(Debug, Deserialize)]
struct VolumesPage {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: Option<String>,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    description: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CorpusRow {
    id: String,
    title: String,
    author: String,
    description: String,
    genres: String,
}

/// Keep only volumes with an id, a title and a description; those are the
/// fields the vectorizer depends on.
fn validate_volume(volume: Volume) -> Option<CorpusRow> {
    let id = volume.id?;
    let info = volume.volume_info;
    let title = info.title?.trim().to_string();
    let description = info.description?.trim().to_string();
    if title.is_empty() || description.is_empty() {
        return None;
    }

    Some(CorpusRow {
        id,
        title,
        author: info.authors.join(", "),
        description,
        genres: info.categories.join(", "),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let model_dir =
        PathBuf::from(std::env::var("MODEL_DIR").unwrap_or_else(|_| "./model".to_string()));
    std::fs::create_dir_all(&model_dir)
        .with_context(|| format!("creating {}", model_dir.display()))?;

    let client = reqwest::Client::new();
    let pages_per_query = MAX_RESULTS_PER_QUERY / PAGE_SIZE;
    let progress = ProgressBar::new((QUERIES.len() * pages_per_query) as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{msg:20} [{bar:40}] {pos}/{len} pages"),
    );

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut rows: Vec<CorpusRow> = Vec::new();

    for query in QUERIES {
        progress.set_message(query.to_string());

        for page in 0..pages_per_query {
            let start_index = page * PAGE_SIZE;
            let params = [
                ("q", query.to_string()),
                ("startIndex", start_index.to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
                ("printType", "books".to_string()),
                ("langRestrict", "en".to_string()),
            ];

            // A failed page should not sink the whole run.
            let page_result = async {
                client
                    .get(BASE_URL)
                    .query(&params)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<VolumesPage>()
                    .await
            }
            .await;

            match page_result {
                Ok(volumes) => {
                    for volume in volumes.items {
                        if let Some(row) = validate_volume(volume) {
                            if seen_ids.insert(row.id.clone()) {
                                rows.push(row);
                            }
                        }
                    }
                }
                Err(err) => {
                    warn!("skipping page {} of '{}': {}", page, query, err);
                }
            }

            progress.inc(1);
            sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
        }
    }
    progress.finish_and_clear();

    let corpus_path = model_dir.join("books.csv");
    let mut writer = csv::Writer::from_path(&corpus_path)
        .with_context(|| format!("creating {}", corpus_path.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "{} collected {} books into {}",
        style("done:").green().bold(),
        rows.len(),
        corpus_path.display()
    );

    Ok(())
}
