mod artifact;
mod classifier;
pub mod loader;
pub mod logistic;
mod naive_bayes;
mod predictor;
mod types;

pub use artifact::{Estimator, ModelArtifact};
pub use classifier::Classifier;
pub use loader::load;
pub use logistic::{LogisticRegression, MultiClass};
pub use naive_bayes::GaussianNb;
pub use predictor::Predictor;
pub use types::{FEATURE_NAMES, FeatureVector, Prediction, Species};
