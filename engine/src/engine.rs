use crate::{
    config::Config,
    features::extract_features,
    models::Classifier,
    scorer::{score, Verdict},
    types::{PredictResponse, UrlFeatures},
};
use tracing::{debug, info, warn};

/// Scores URLs with an optional classifier that is fixed at construction.
#[derive(Debug, Default)]
pub struct PhishingDetector {
    classifier: Option<Classifier>,
}

impl PhishingDetector {
    pub fn new(classifier: Option<Classifier>) -> Self {
        Self { classifier }
    }

    /// Loads the model named by the config. A missing or broken model file
    /// leaves the detector on the heuristic scorer.
    pub fn from_config(config: &Config) -> Self {
        let classifier = match Classifier::load_from_file(&config.model_path) {
            Ok(classifier) => Some(classifier),
            Err(e) => {
                warn!(
                    "No model loaded from {}: {}; using heuristic scoring",
                    config.model_path.display(),
                    e
                );
                None
            }
        };
        Self::new(classifier)
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn score_features(&self, features: &UrlFeatures) -> Verdict {
        score(self.classifier.as_ref(), features)
    }

    pub fn predict(&self, url: &str) -> PredictResponse {
        let features = extract_features(url);
        let verdict = self.score_features(&features);

        debug!(
            "Scored {:?}: {} (p={:.3})",
            url,
            verdict.label.as_str(),
            verdict.phishing_probability()
        );

        PredictResponse {
            url: url.to_string(),
            label: verdict.label.as_u8(),
            phishing_probability: verdict.phishing_probability(),
            features,
        }
    }

    pub fn describe(&self) {
        match &self.classifier {
            Some(classifier) => info!("Detector ready with {:?}", classifier),
            None => info!("Detector ready with heuristic scoring"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinearSvm, LinearWeights};
    use crate::types::{Feature, FEATURE_COUNT};
    use std::path::PathBuf;

    #[test]
    fn test_heuristic_prediction_for_ip_with_at() {
        let detector = PhishingDetector::default();
        let response = detector.predict("http://user@10.0.0.1/login");
        assert_eq!(response.features.value(Feature::HasIpHost), 1.0);
        assert_eq!(response.features.value(Feature::NumAt), 1.0);
        assert_eq!(response.label, 1);
        assert!((response.phishing_probability - 0.85).abs() < 1e-9);
        assert_eq!(response.url, "http://user@10.0.0.1/login");
    }

    #[test]
    fn test_unparseable_url_scores_as_baseline() {
        let detector = PhishingDetector::default();
        let response = detector.predict("https://[::1");
        assert!(response.features.is_zeroed());
        assert_eq!(response.label, 0);
        assert_eq!(response.phishing_probability, 0.5);
    }

    #[test]
    fn test_hard_label_model_is_used() {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[Feature::Shortener.index()] = 1.0;
        let svm = LinearSvm::new(LinearWeights {
            intercept: -0.5,
            weights,
        });
        let detector = PhishingDetector::new(Some(Classifier::HardLabel(Box::new(svm))));
        assert!(detector.model_loaded());

        let response = detector.predict("http://bit.ly/abc");
        assert_eq!(response.label, 1);
        assert_eq!(response.phishing_probability, 1.0);

        let response = detector.predict("https://example.com/");
        assert_eq!(response.label, 0);
        assert_eq!(response.phishing_probability, 0.0);
    }

    #[test]
    fn test_missing_model_degrades_to_heuristic() {
        let config = Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            model_path: PathBuf::from("/nonexistent/phish-model.json"),
            metrics_enabled: false,
        };
        let detector = PhishingDetector::from_config(&config);
        assert!(!detector.model_loaded());
    }
}
