use super::{
    FEATURE_NAMES, GaussianNb, LogisticRegression, Species, classifier::Classifier,
};
use crate::{Error, Result};
use serde::Deserialize;
use std::sync::Arc;

/// JSON model file: estimator parameters tagged by `kind`, plus optional
/// column and class labels used to verify the ordering contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub classes: Option<Vec<String>>,
    #[serde(flatten)]
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression(LogisticRegression),
    GaussianNb(GaussianNb),
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression(_) => "logistic_regression",
            Estimator::GaussianNb(_) => "gaussian_nb",
        }
    }
}

impl ModelArtifact {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::model(format!("model artifact is not valid: {}", e)))
    }

    /// Validates the artifact and turns it into a shared classifier for the
    /// four iris measurements and three species.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>> {
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(Error::model(format!(
                    "feature_names {:?} do not match expected order {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }
        if let Some(classes) = &self.classes {
            let species: Vec<Option<Species>> =
                classes.iter().map(|label| Species::from_label(label)).collect();
            if species.len() != Species::ALL.len()
                || species.iter().zip(Species::ALL).any(|(s, expected)| *s != Some(expected))
            {
                return Err(Error::model(format!(
                    "classes {:?} do not map onto setosa, versicolor, virginica in order",
                    classes
                )));
            }
        }

        let classifier: Arc<dyn Classifier> = match self.estimator {
            Estimator::LogisticRegression(model) => {
                model.validate()?;
                Arc::new(model)
            }
            Estimator::GaussianNb(model) => {
                model.validate()?;
                Arc::new(model)
            }
        };

        if classifier.n_features() != FEATURE_NAMES.len() {
            return Err(Error::model(format!(
                "model expects {} features, the service provides {}",
                classifier.n_features(),
                FEATURE_NAMES.len()
            )));
        }
        if classifier.n_classes() != Species::ALL.len() {
            return Err(Error::model(format!(
                "model predicts {} classes, the service maps {}",
                classifier.n_classes(),
                Species::ALL.len()
            )));
        }
        Ok(classifier)
    }
}
