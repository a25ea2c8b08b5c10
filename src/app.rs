use crate::{
    config::Config,
    error::Result,
    routes::api_routes,
    services::{RecommenderService, SimilarityEngine},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for Docker/Render compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // Model artifacts are loaded before the server accepts requests.
        let recommender = web::Data::new(build_recommender(&self.config));

        let server = HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommender.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run();

        server.await?;

        Ok(())
    }
}

/// Assemble the recommendation service from the configured model directory.
///
/// A missing or corrupt artifact is never fatal: the service comes up in
/// mock-only mode and every request is answered from the fallback catalog.
pub fn build_recommender(config: &Config) -> RecommenderService {
    match SimilarityEngine::load(Path::new(&config.model_dir)) {
        Ok(engine) => {
            info!(
                "Similarity engine ready with a corpus of {} books",
                engine.corpus_size()
            );
            RecommenderService::new(Arc::new(engine))
        }
        Err(err) => {
            warn!(
                "Could not load model artifacts from {}: {}. Serving mock recommendations only",
                config.model_dir, err
            );
            RecommenderService::mock_only()
        }
    }
}
