use crate::error::Result;
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: i64 = 8000;
const DEFAULT_MODEL_DIR: &str = "./model";

/// Runtime configuration, read from the environment.
///
/// `MODEL_DIR` points at the directory holding the precomputed artifacts
/// (`books.csv` and `vectorizer.json`). A missing or unreadable model
/// directory is not a configuration error; the service then runs in
/// mock-only mode.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_dir: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT)?
            .set_default("model_dir", DEFAULT_MODEL_DIR)?
            .add_source(config::Environment::default())
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
