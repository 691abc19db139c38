use super::{FeatureVector, Prediction, Species, classifier::Classifier};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Read-only handle to the loaded classifier, shared by every request.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classify(&self, features: &FeatureVector) -> Result<Prediction> {
        let row = features.as_row();
        let class_index = self.classifier.predict(row)?;
        let proba = self.classifier.predict_proba(row)?;

        let mut probabilities: [f64; 3] = proba.as_slice().try_into().map_err(|_| {
            Error::inference(format!(
                "expected {} probabilities, got {}",
                Species::ALL.len(),
                proba.len()
            ))
        })?;
        if probabilities
            .iter()
            .any(|p| !p.is_finite() || *p < -PROBABILITY_TOLERANCE || *p > 1.0 + PROBABILITY_TOLERANCE)
        {
            return Err(Error::inference(format!(
                "probabilities out of range: {:?}",
                probabilities
            )));
        }
        // rounding noise within tolerance must not leave [0, 1]
        for p in probabilities.iter_mut() {
            *p = p.clamp(0.0, 1.0);
        }
        if Species::from_index(class_index).is_none() {
            return Err(Error::inference(format!(
                "class index {} has no species",
                class_index
            )));
        }

        debug!("Classified {:?} as class {}", row, class_index);
        Ok(Prediction {
            class_index,
            probabilities,
        })
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("n_features", &self.classifier.n_features())
            .field("n_classes", &self.classifier.n_classes())
            .finish()
    }
}
