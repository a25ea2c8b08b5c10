use crate::{
    error::ApiError,
    models::{RecommendationRequest, RecommendationResponse},
    services::RecommenderService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};

pub fn recommend_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommend").route(web::post().to(recommend)));
}

/// Return a list of book recommendations for a mood query.
///
/// The only client error this route can produce is a blank mood; every
/// model-side failure degrades to the fallback catalog inside the service
/// and still answers 200.
pub async fn recommend(
    request: Json<RecommendationRequest>,
    recommender: web::Data<RecommenderService>,
) -> Result<HttpResponse, ApiError> {
    if request.mood.trim().is_empty() {
        return Err(ApiError::InvalidInput("Mood cannot be empty".to_string()));
    }

    let recommendations = recommender.recommend(&request);

    Ok(HttpResponse::Ok().json(RecommendationResponse { recommendations }))
}
