use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use std::collections::HashMap;

pub const FEATURE_COUNT: usize = 24;

/// Wire names of the features, in vector order. Trained models depend on
/// this exact order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "url_len",
    "host_len",
    "path_len",
    "num_dots",
    "num_hyphens",
    "num_at",
    "num_qm",
    "num_pct",
    "num_eq",
    "num_slash",
    "num_digits",
    "digit_ratio",
    "entropy",
    "is_https",
    "has_ip_host",
    "num_subdomains",
    "suspicious_tld",
    "shortener",
    "starts_with_https",
    "has_double_slash_in_path",
    "num_params",
    "path_depth",
    "num_period_in_path",
    "num_reserved",
];

/// Typed index into a feature vector. Discriminants are vector positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    UrlLen,
    HostLen,
    PathLen,
    NumDots,
    NumHyphens,
    NumAt,
    NumQm,
    NumPct,
    NumEq,
    NumSlash,
    NumDigits,
    DigitRatio,
    Entropy,
    IsHttps,
    HasIpHost,
    NumSubdomains,
    SuspiciousTld,
    Shortener,
    StartsWithHttps,
    HasDoubleSlashInPath,
    NumParams,
    PathDepth,
    NumPeriodInPath,
    NumReserved,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::UrlLen,
        Feature::HostLen,
        Feature::PathLen,
        Feature::NumDots,
        Feature::NumHyphens,
        Feature::NumAt,
        Feature::NumQm,
        Feature::NumPct,
        Feature::NumEq,
        Feature::NumSlash,
        Feature::NumDigits,
        Feature::DigitRatio,
        Feature::Entropy,
        Feature::IsHttps,
        Feature::HasIpHost,
        Feature::NumSubdomains,
        Feature::SuspiciousTld,
        Feature::Shortener,
        Feature::StartsWithHttps,
        Feature::HasDoubleSlashInPath,
        Feature::NumParams,
        Feature::PathDepth,
        Feature::NumPeriodInPath,
        Feature::NumReserved,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|i| Self::ALL[i])
    }
}

pub type FeatureVector = [f64; FEATURE_COUNT];

pub type FeatureMap = HashMap<String, f64>;

/// The 24-feature fingerprint of one URL.
///
/// Holds a single vector; the named view is derived from it, so
/// `vector()[i] == to_map()[FEATURE_NAMES[i]]` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlFeatures {
    values: FeatureVector,
}

impl UrlFeatures {
    pub fn zeroed() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
        }
    }

    pub fn from_vector(values: FeatureVector) -> Self {
        Self { values }
    }

    pub fn vector(&self) -> &FeatureVector {
        &self.values
    }

    pub fn value(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.values[feature.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    pub fn to_map(&self) -> FeatureMap {
        self.iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    pub fn is_zeroed(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

impl Default for UrlFeatures {
    fn default() -> Self {
        Self::zeroed()
    }
}

// Serialized as a JSON object whose keys follow the vector order.
impl Serialize for UrlFeatures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Benign,
    Phishing,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Benign => 0,
            Label::Phishing => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Benign => "benign",
            Label::Phishing => "phishing",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub url: String,
    pub label: u8,
    pub phishing_probability: f64,
    pub features: UrlFeatures,
}
