use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use iris_serve::{
    config::CorsConfig,
    model::{self, Predictor},
    server::{self, AppState},
};
use serde_json::Value;

/// Coefficient file shipped at the repository root
pub const BUNDLED_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/model.json");

pub async fn load_bundled_predictor() -> Predictor {
    model::load(BUNDLED_MODEL)
        .await
        .expect("bundled model should load")
}

/// Router over the bundled model with the default wildcard CORS policy
pub async fn create_test_app() -> Router {
    create_test_app_with_cors(CorsConfig::default()).await
}

pub async fn create_test_app_with_cors(cors: CorsConfig) -> Router {
    let predictor = load_bundled_predictor().await;
    create_app(predictor, &cors)
}

pub fn create_app(predictor: Predictor, cors: &CorsConfig) -> Router {
    server::router(AppState { predictor }, cors).expect("router should build")
}

pub fn predict_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Classic setosa sample from the iris dataset
pub fn setosa_sample() -> Value {
    serde_json::json!({
        "sepal_length": 5.1,
        "sepal_width": 3.5,
        "petal_length": 1.4,
        "petal_width": 0.2
    })
}
