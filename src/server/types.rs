use crate::model::{FeatureVector, Prediction, Species};
use serde::{Deserialize, Serialize};

/// Body of `POST /predict`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl From<PredictRequest> for FeatureVector {
    fn from(request: PredictRequest) -> Self {
        FeatureVector::new(
            request.sepal_length,
            request.sepal_width,
            request.petal_length,
            request.petal_width,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: usize,
    pub probabilities: Probabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub setosa: f64,
    pub versicolor: f64,
    pub virginica: f64,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            prediction: prediction.class_index,
            probabilities: Probabilities {
                setosa: prediction.probability(Species::Setosa),
                versicolor: prediction.probability(Species::Versicolor),
                virginica: prediction.probability(Species::Virginica),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
