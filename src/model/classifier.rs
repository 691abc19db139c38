use crate::{Error, Result};

/// A trained multi-class classifier operating on one feature row at a time.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    /// Per-class probabilities for a single row, in class-index order.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Index of the most probable class. Ties go to the lowest index.
    fn predict(&self, features: &[f64]) -> Result<usize> {
        let probabilities = self.predict_proba(features)?;
        argmax(&probabilities).ok_or_else(|| Error::inference("classifier returned no probabilities"))
    }
}

pub(crate) fn check_width(features: &[f64], expected: usize) -> Result<()> {
    if features.len() != expected {
        return Err(Error::inference(format!(
            "expected {} features, got {}",
            expected,
            features.len()
        )));
    }
    Ok(())
}

pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Normalises log-scores into probabilities, shifting by the maximum first.
pub(crate) fn softmax(scores: &[f64]) -> Result<Vec<f64>> {
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(Error::inference("decision scores are not finite"));
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / total).collect())
}

pub(crate) fn ensure_finite(name: &str, values: &[f64]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::model(format!("{} contains non-finite values", name)));
    }
    Ok(())
}
