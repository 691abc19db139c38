use super::types::{ErrorResponse, PredictRequest, PredictResponse, StatusResponse};
use crate::{Error, model::{FeatureVector, Predictor}};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

pub const LIVE_STATUS: &str = "Backend is live";

#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: LIVE_STATUS.to_string(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Only an object is accepted; a bare array would fill the fields by position
    let Json(body) = payload.map_err(reject)?;
    let request: PredictRequest = serde_json::from_value(Value::Object(body)).map_err(|e| {
        warn!("Rejected prediction request: {}", e);
        error_response(&Error::validation(e.to_string()))
    })?;
    info!(
        "Received prediction request: sepal {}x{}, petal {}x{}",
        request.sepal_length, request.sepal_width, request.petal_length, request.petal_width
    );

    let features = FeatureVector::from(request);
    match state.predictor.classify(&features) {
        Ok(prediction) => {
            info!(
                "Predicted class {} with probabilities {:?}",
                prediction.class_index, prediction.probabilities
            );
            Ok(Json(PredictResponse::from(prediction)))
        }
        Err(e) => {
            error!("Failed to classify {:?}: {}", features.as_row(), e);
            Err(error_response(&e))
        }
    }
}

fn reject(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Rejected prediction request: {}", rejection.body_text());
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            error_response(&Error::validation(rejection.body_text()))
        }
        other => (
            other.status(),
            Json(ErrorResponse {
                error: other.body_text(),
            }),
        ),
    }
}

fn error_response(err: &Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        err.status_code(),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
