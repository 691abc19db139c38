use super::{ModelArtifact, Predictor};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Reads and validates the model artifact at `path`.
///
/// Called once at startup; any error here means the service must not serve.
pub async fn load(path: impl AsRef<Path>) -> Result<Predictor> {
    let path = path.as_ref();
    debug!("Loading model artifact from: {}", path.display());

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        Error::model(format!(
            "failed to read model artifact {}: {}",
            path.display(),
            e
        ))
    })?;
    let artifact = ModelArtifact::from_json(&bytes)?;
    let kind = artifact.estimator.kind();
    let classifier = artifact.into_classifier()?;

    info!(
        "Loaded {} model from {} ({} features, {} classes)",
        kind,
        path.display(),
        classifier.n_features(),
        classifier.n_classes()
    );
    Ok(Predictor::new(classifier))
}
