use crate::{
    models::Classifier,
    types::{Feature, Label, UrlFeatures},
};

const HEURISTIC_BASE: f64 = 0.5;
const HEURISTIC_CEILING: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub label: Label,
    /// `[p_benign, p_phishing]`
    pub probabilities: [f64; 2],
}

impl Verdict {
    pub fn phishing_probability(&self) -> f64 {
        self.probabilities[1]
    }
}

/// Scores with the classifier when one is loaded, otherwise with the fixed
/// heuristic.
pub fn score(classifier: Option<&Classifier>, features: &UrlFeatures) -> Verdict {
    match classifier {
        Some(Classifier::Probabilistic(model)) => {
            let probabilities = model.predict_proba(features.vector());
            // Ties go to the first class.
            let label = if probabilities[1] > probabilities[0] {
                Label::Phishing
            } else {
                Label::Benign
            };
            Verdict {
                label,
                probabilities,
            }
        }
        Some(Classifier::HardLabel(model)) => {
            let label = model.predict(features.vector());
            let p = f64::from(label.as_u8());
            Verdict {
                label,
                probabilities: [1.0 - p, p],
            }
        }
        None => heuristic_score(features),
    }
}

pub fn heuristic_score(features: &UrlFeatures) -> Verdict {
    let mut score = HEURISTIC_BASE;
    if features.value(Feature::HasIpHost) != 0.0 {
        score += 0.20;
    }
    if features.value(Feature::SuspiciousTld) != 0.0 {
        score += 0.15;
    }
    if features.value(Feature::Shortener) != 0.0 {
        score += 0.10;
    }
    if features.value(Feature::NumAt) > 0.0 {
        score += 0.15;
    }
    if features.value(Feature::DigitRatio) > 0.3 {
        score += 0.10;
    }
    let score = score.min(HEURISTIC_CEILING);

    let label = if score > HEURISTIC_BASE {
        Label::Phishing
    } else {
        Label::Benign
    };
    Verdict {
        label,
        probabilities: [1.0 - score, score],
    }
}
