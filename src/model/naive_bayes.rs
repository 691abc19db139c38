use super::classifier::{Classifier, check_width, ensure_finite, softmax};
use crate::{Error, Result};
use serde::Deserialize;
use std::f64::consts::PI;

/// Gaussian naive Bayes with per-class feature means and variances.
#[derive(Debug, Clone, Deserialize)]
pub struct GaussianNb {
    pub class_prior: Vec<f64>,
    pub theta: Vec<Vec<f64>>,
    pub var: Vec<Vec<f64>>,
}

impl GaussianNb {
    pub fn validate(&self) -> Result<()> {
        let n_classes = self.class_prior.len();
        if n_classes == 0 {
            return Err(Error::model("gaussian naive bayes has no classes"));
        }
        if self.theta.len() != n_classes || self.var.len() != n_classes {
            return Err(Error::model(format!(
                "gaussian naive bayes has {} priors, {} mean rows and {} variance rows",
                n_classes,
                self.theta.len(),
                self.var.len()
            )));
        }
        ensure_finite("class_prior", &self.class_prior)?;
        if self.class_prior.iter().any(|p| *p <= 0.0) {
            return Err(Error::model("class priors must be positive"));
        }
        let width = self.theta[0].len();
        if width == 0 {
            return Err(Error::model("gaussian naive bayes mean rows are empty"));
        }
        for (means, vars) in self.theta.iter().zip(&self.var) {
            if means.len() != width || vars.len() != width {
                return Err(Error::model(format!(
                    "mean and variance rows must all have {} values",
                    width
                )));
            }
            ensure_finite("theta", means)?;
            ensure_finite("var", vars)?;
            if vars.iter().any(|v| *v <= 0.0) {
                return Err(Error::model("variances must be strictly positive"));
            }
        }
        Ok(())
    }

    pub fn joint_log_likelihood(&self, features: &[f64]) -> Result<Vec<f64>> {
        check_width(features, self.n_features())?;
        Ok(self
            .class_prior
            .iter()
            .zip(self.theta.iter().zip(&self.var))
            .map(|(prior, (means, vars))| {
                let log_likelihood: f64 = features
                    .iter()
                    .zip(means.iter().zip(vars))
                    .map(|(x, (mu, var))| -0.5 * (2.0 * PI * var).ln() - (x - mu).powi(2) / (2.0 * var))
                    .sum();
                prior.ln() + log_likelihood
            })
            .collect())
    }
}

impl Classifier for GaussianNb {
    fn n_features(&self) -> usize {
        self.theta.first().map_or(0, Vec::len)
    }

    fn n_classes(&self) -> usize {
        self.class_prior.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        softmax(&self.joint_log_likelihood(features)?)
    }
}
