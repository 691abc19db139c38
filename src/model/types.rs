/// Column order of the single-row feature matrix handed to the classifier.
pub const FEATURE_NAMES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// The four flower measurements, in centimeters. No range is enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; 4]);

impl FeatureVector {
    pub fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self([sepal_length, sepal_width, petal_length, petal_width])
    }

    pub fn as_row(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; 4]> for FeatureVector {
    fn from(values: [f64; 4]) -> Self {
        Self(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    /// Class-index order the model artifact was trained with.
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn index(self) -> usize {
        match self {
            Species::Setosa => 0,
            Species::Versicolor => 1,
            Species::Virginica => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Accepts both `setosa` and the dataset's `Iris-setosa` spelling.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let name = label
            .strip_prefix("Iris-")
            .or_else(|| label.strip_prefix("iris-"))
            .unwrap_or(label);
        Self::ALL
            .into_iter()
            .find(|species| species.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    /// Aligned with `Species::ALL`.
    pub probabilities: [f64; 3],
}

impl Prediction {
    pub fn species(&self) -> Option<Species> {
        Species::from_index(self.class_index)
    }

    pub fn probability(&self, species: Species) -> f64 {
        self.probabilities[species.index()]
    }
}
