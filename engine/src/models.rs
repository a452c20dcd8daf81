use crate::{
    reference::REFERENCE_DATA_VERSION,
    types::{Feature, FeatureVector, Label, FEATURE_COUNT, FEATURE_NAMES},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model has {found} weights, expected {}", FEATURE_COUNT)]
    WeightCount { found: usize },

    #[error("model feature order does not match the extractor: {0}")]
    FeatureOrder(String),
}

/// A classifier that estimates `[p_benign, p_phishing]` for one row.
pub trait ProbabilisticModel: Send + Sync {
    fn predict_proba(&self, row: &FeatureVector) -> [f64; 2];
}

/// A classifier that only produces a hard label for one row.
pub trait HardLabelModel: Send + Sync {
    fn predict(&self, row: &FeatureVector) -> Label;
}

/// A loaded classifier, tagged by what it can do. Chosen once at load time.
pub enum Classifier {
    Probabilistic(Box<dyn ProbabilisticModel>),
    HardLabel(Box<dyn HardLabelModel>),
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classifier::Probabilistic(_) => f.write_str("Classifier::Probabilistic"),
            Classifier::HardLabel(_) => f.write_str("Classifier::HardLabel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearWeights {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearWeights {
    fn decision(&self, row: &FeatureVector) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(row.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

/// Logistic regression over the feature vector.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: LinearWeights,
}

impl LogisticRegression {
    pub fn new(weights: LinearWeights) -> Self {
        Self { weights }
    }
}

impl ProbabilisticModel for LogisticRegression {
    fn predict_proba(&self, row: &FeatureVector) -> [f64; 2] {
        let p = sigmoid(self.weights.decision(row));
        [1.0 - p, p]
    }
}

/// Linear SVM: phishing when the decision function is positive.
#[derive(Debug, Clone)]
pub struct LinearSvm {
    weights: LinearWeights,
}

impl LinearSvm {
    pub fn new(weights: LinearWeights) -> Self {
        Self { weights }
    }
}

impl HardLabelModel for LinearSvm {
    fn predict(&self, row: &FeatureVector) -> Label {
        if self.weights.decision(row) > 0.0 {
            Label::Phishing
        } else {
            Label::Benign
        }
    }
}

/// Which classifier a model file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    LinearSvm,
}

/// On-disk model description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub intercept: f64,
    pub weights: Vec<f64>,
    #[serde(default)]
    pub feature_order: Option<Vec<String>>,
    #[serde(default)]
    pub reference_version: Option<String>,
}

impl ModelFile {
    fn validate(&self) -> Result<(), ModelError> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(ModelError::WeightCount {
                found: self.weights.len(),
            });
        }

        if let Some(order) = &self.feature_order {
            if order.len() != FEATURE_COUNT {
                return Err(ModelError::FeatureOrder(format!(
                    "{} names listed, expected {}",
                    order.len(),
                    FEATURE_COUNT
                )));
            }
            if let Some((i, (found, expected))) = order
                .iter()
                .zip(FEATURE_NAMES.iter())
                .enumerate()
                .find(|(_, (found, expected))| found.as_str() != **expected)
            {
                let reason = match Feature::from_name(found) {
                    Some(_) => format!("position {i} is {found:?}, expected {expected:?}"),
                    None => format!("unknown feature {found:?} at position {i}"),
                };
                return Err(ModelError::FeatureOrder(reason));
            }
        }

        if let Some(version) = &self.reference_version {
            if version != REFERENCE_DATA_VERSION {
                warn!(
                    "Model was trained against reference data {}, engine ships {}",
                    version, REFERENCE_DATA_VERSION
                );
            }
        }

        Ok(())
    }
}

impl Classifier {
    pub fn from_model_file(file: ModelFile) -> Result<Self, ModelError> {
        file.validate()?;
        let weights = LinearWeights {
            intercept: file.intercept,
            weights: file.weights,
        };
        Ok(match file.kind {
            ModelKind::LogisticRegression => {
                Classifier::Probabilistic(Box::new(LogisticRegression::new(weights)))
            }
            ModelKind::LinearSvm => Classifier::HardLabel(Box::new(LinearSvm::new(weights))),
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: ModelFile = serde_json::from_str(&content)?;
        let classifier = Self::from_model_file(file)?;
        info!("Loaded {:?} from {}", classifier, path.display());
        Ok(classifier)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
