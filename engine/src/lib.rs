pub mod config;
pub mod domain;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod features;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod reference;
pub mod routes;
pub mod scorer;
pub mod types;

pub use engine::PhishingDetector;
pub use features::{extract, extract_features, Extraction};
pub use models::{Classifier, ModelError};
pub use scorer::{score, Verdict};
pub use types::{Feature, Label, UrlFeatures, FEATURE_COUNT, FEATURE_NAMES};
