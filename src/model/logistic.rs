use super::classifier::{Classifier, check_width, ensure_finite, softmax};
use crate::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    /// Softmax over the per-class decision scores.
    #[default]
    Multinomial,
    /// One sigmoid per class, normalised to sum to one.
    Ovr,
}

/// Linear model with one coefficient row and intercept per class.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(Error::model("logistic regression has no coefficient rows"));
        }
        if self.coefficients.len() != self.intercepts.len() {
            return Err(Error::model(format!(
                "logistic regression has {} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        let width = self.coefficients[0].len();
        if width == 0 {
            return Err(Error::model("logistic regression coefficient rows are empty"));
        }
        for (i, row) in self.coefficients.iter().enumerate() {
            if row.len() != width {
                return Err(Error::model(format!(
                    "coefficient row {} has {} values, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
            ensure_finite("coefficients", row)?;
        }
        ensure_finite("intercepts", &self.intercepts)
    }

    pub fn decision_function(&self, features: &[f64]) -> Result<Vec<f64>> {
        check_width(features, self.n_features())?;
        Ok(self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                intercept + row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>()
            })
            .collect())
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn n_classes(&self) -> usize {
        self.intercepts.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        let scores = self.decision_function(features)?;
        match self.multi_class {
            MultiClass::Multinomial => softmax(&scores),
            MultiClass::Ovr => {
                if scores.iter().any(|s| s.is_nan()) {
                    return Err(Error::inference("decision scores are not finite"));
                }
                let sigmoids: Vec<f64> = scores.iter().map(|s| 1.0 / (1.0 + (-s).exp())).collect();
                let total: f64 = sigmoids.iter().sum();
                if total <= 0.0 {
                    // every class saturated at zero
                    return softmax(&scores);
                }
                Ok(sigmoids.into_iter().map(|p| p / total).collect())
            }
        }
    }
}
