use iris_serve::{Result, model::Classifier};
use mockall::mock;

mock! {
    // Classifier double for exercising handler error paths
    pub Model {}

    impl Classifier for Model {
        fn n_features(&self) -> usize;
        fn n_classes(&self) -> usize;
        fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>>;
        fn predict(&self, features: &[f64]) -> Result<usize>;
    }
}
