use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use iris_serve::{
    Error,
    config::{Config, CorsConfig},
    model::Predictor,
    server::{self, LIVE_STATUS, PredictResponse},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

mod common;

use common::mocks::MockModel;
use common::test_utils::{
    create_app, create_test_app, create_test_app_with_cors, predict_request, read_json,
    setosa_sample,
};

#[tokio::test]
async fn test_root_reports_live() {
    let app = create_test_app().await;

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"status": "Backend is live"}));
}

#[tokio::test]
async fn test_root_ignores_model_state() {
    // No expectations: any call into the model would panic
    let app = create_app(Predictor::new(Arc::new(MockModel::new())), &CorsConfig::default());

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], LIVE_STATUS);
}

#[tokio::test]
async fn test_predict_setosa_sample() {
    let app = create_test_app().await;

    let response = app.oneshot(predict_request(&setosa_sample())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: PredictResponse = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(body.prediction, 0);
    assert!(body.probabilities.setosa > body.probabilities.versicolor);
    assert!(body.probabilities.setosa > body.probabilities.virginica);
}

#[rstest]
#[case(5.9, 3.0, 4.2, 1.5, 1)]
#[case(6.7, 3.0, 5.2, 2.3, 2)]
#[case(4.9, 3.0, 1.4, 0.2, 0)]
#[tokio::test]
async fn test_predict_known_samples(
    #[case] sepal_length: f64,
    #[case] sepal_width: f64,
    #[case] petal_length: f64,
    #[case] petal_width: f64,
    #[case] expected: usize,
) {
    let app = create_test_app().await;
    let body = json!({
        "sepal_length": sepal_length,
        "sepal_width": sepal_width,
        "petal_length": petal_length,
        "petal_width": petal_width
    });

    let response = app.oneshot(predict_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["prediction"], json!(expected));

    let probabilities = body["probabilities"].as_object().unwrap();
    let keys: Vec<&str> = probabilities.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["setosa", "versicolor", "virginica"]);
}

#[rstest]
#[case("sepal_length")]
#[case("sepal_width")]
#[case("petal_length")]
#[case("petal_width")]
#[tokio::test]
async fn test_predict_missing_field(#[case] field: &str) {
    let app = create_test_app().await;
    let mut body = setosa_sample();
    body.as_object_mut().unwrap().remove(field);

    let response = app.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = read_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains(field), "error should name {}: {}", field, error);
}

#[rstest]
#[case(json!("5.1"))]
#[case(json!(null))]
#[case(json!([5.1]))]
#[case(json!(true))]
#[tokio::test]
async fn test_predict_non_numeric_field(#[case] value: Value) {
    let app = create_test_app().await;
    let mut body = setosa_sample();
    body["sepal_length"] = value;

    let response = app.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());
}

#[rstest]
#[case(json!([5.1, 3.5, 1.4, 0.2]))]
#[case(json!(5.1))]
#[case(json!("sepal_length=5.1"))]
#[case(json!(null))]
#[tokio::test]
async fn test_predict_array_body_is_client_error(#[case] body: Value) {
    let app = create_test_app().await;

    let response = app.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = read_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("expected a map"), "unexpected error: {}", error);
}

#[tokio::test]
async fn test_predict_invalid_json() {
    let app = create_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from("invalid json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_requires_json_content_type() {
    let app = create_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(setosa_sample().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_predict_get_not_allowed() {
    let app = create_test_app().await;

    let request = Request::builder().uri("/predict").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_predict_inference_failure_is_server_error() {
    let mut model = MockModel::new();
    model.expect_predict().returning(|_| Ok(0));
    model
        .expect_predict_proba()
        .returning(|_| Err(Error::inference("decision scores are not finite")));
    let app = create_app(Predictor::new(Arc::new(model)), &CorsConfig::default());

    let response = app.oneshot(predict_request(&setosa_sample())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({"error": "Inference error: decision scores are not finite"})
    );
}

#[tokio::test]
async fn test_predict_passes_features_in_order() {
    let mut model = MockModel::new();
    model
        .expect_predict()
        .withf(|features| features.to_vec() == vec![5.1, 3.5, 1.4, 0.2])
        .times(1)
        .returning(|_| Ok(2));
    model
        .expect_predict_proba()
        .withf(|features| features.to_vec() == vec![5.1, 3.5, 1.4, 0.2])
        .times(1)
        .returning(|_| Ok(vec![0.1, 0.2, 0.7]));
    let app = create_app(Predictor::new(Arc::new(model)), &CorsConfig::default());

    let response = app.oneshot(predict_request(&setosa_sample())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({
            "prediction": 2,
            "probabilities": {"setosa": 0.1, "versicolor": 0.2, "virginica": 0.7}
        })
    );
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let app = create_test_app().await;

    let first = app
        .clone()
        .oneshot(predict_request(&setosa_sample()))
        .await
        .unwrap();
    let second = app.oneshot(predict_request(&setosa_sample())).await.unwrap();

    assert_eq!(read_json(first).await, read_json(second).await);
}

#[tokio::test]
async fn test_cors_preflight_wildcard() {
    let app = create_test_app().await;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/predict")
        .header(header::ORIGIN, "https://iris.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "600");
}

#[tokio::test]
async fn test_cors_allow_list() {
    let cors = CorsConfig {
        allow_origins: vec!["https://iris.example.com/".to_string()],
        ..CorsConfig::default()
    };
    let app = create_test_app_with_cors(cors).await;

    let mut allowed = predict_request(&setosa_sample());
    allowed
        .headers_mut()
        .insert(header::ORIGIN, "https://iris.example.com".parse().unwrap());
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://iris.example.com"
    );

    let mut other = predict_request(&setosa_sample());
    other
        .headers_mut()
        .insert(header::ORIGIN, "https://elsewhere.example.org".parse().unwrap());
    let response = app.oneshot(other).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_cors_credentials_mirror_origin() {
    let cors = CorsConfig {
        allow_credentials: true,
        ..CorsConfig::default()
    };
    let app = create_test_app_with_cors(cors).await;

    let mut request = predict_request(&setosa_sample());
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://localhost:5173".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn test_run_fails_without_model() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.model.path = temp_dir
        .path()
        .join("missing-model.json")
        .to_string_lossy()
        .to_string();

    let err = server::run(config).await.unwrap_err();

    assert!(matches!(err, Error::Model(_)));
    assert!(err.to_string().contains("missing-model.json"));
}
