//! End-to-end tests against a real server on a random port, running in
//! mock-only mode (no model artifacts on disk).

use mood_recommender_api::app::Application;
use mood_recommender_api::config::Config;
use serde_json::{json, Value};
use std::net::TcpListener;

fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let config = Config {
        host: "127.0.0.1".to_string(),
        port,
        model_dir: "./does-not-exist".to_string(),
    };
    let application = Application::new(&config);

    tokio::spawn(async move {
        application
            .run_with_listener(listener)
            .await
            .expect("server failed to run");
    });

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn health_check_works() {
    let address = spawn_app();
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/health", address))
        .send()
        .await
        .expect("failed to execute request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn recommend_serves_a_mock_list_when_no_model_is_available() {
    let address = spawn_app();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/recommend", address))
        .json(&json!({ "mood": "thoughtful and a bit nostalgic" }))
        .send()
        .await
        .expect("failed to execute request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    let recommendations = body["recommendations"].as_array().unwrap();

    assert_eq!(recommendations.len(), 5);
    for rec in recommendations {
        assert!(!rec["title"].as_str().unwrap().is_empty());
        assert!(rec["score"].as_f64().is_some());
    }
}

#[tokio::test]
async fn recommend_never_exceeds_the_requested_limit() {
    let address = spawn_app();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/recommend", address))
        .json(&json!({ "mood": "adventurous", "limit": 3 }))
        .send()
        .await
        .expect("failed to execute request");

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn identical_requests_get_identical_responses() {
    let address = spawn_app();
    let client = reqwest::Client::new();
    let payload = json!({ "mood": "gloomy", "genres": ["poetry"], "limit": 4 });

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = client
            .post(format!("{}/api/recommend", address))
            .json(&payload)
            .send()
            .await
            .expect("failed to execute request");
        bodies.push(response.json::<Value>().await.unwrap());
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn unfillable_genre_filter_terminates_with_a_short_list() {
    let address = spawn_app();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/recommend", address))
        .json(&json!({
            "mood": "curious",
            "genres": ["nonexistent-genre"],
            "limit": 5
        }))
        .send()
        .await
        .expect("failed to execute request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert!(body["recommendations"].as_array().unwrap().len() <= 5);
}

#[tokio::test]
async fn blank_mood_is_rejected() {
    let address = spawn_app();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/recommend", address))
        .json(&json!({ "mood": "   " }))
        .send()
        .await
        .expect("failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Mood"));
}
