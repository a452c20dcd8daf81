use crate::{
    domain::{decompose, DomainParts},
    entropy::shannon_entropy,
    normalize::normalize,
    parser::{parse, ParseError, ParsedUrl},
    reference,
    types::{Feature, UrlFeatures},
};
use tracing::debug;

const RESERVED_CHARS: [char; 8] = [';', '_', '~', '!', '*', '(', ')', ','];

/// Outcome of extracting features from one raw URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(UrlFeatures),
    Unparseable(ParseError),
}

impl Extraction {
    /// Features for the scorer; unparseable input scores as all zeros.
    pub fn into_features(self) -> UrlFeatures {
        match self {
            Extraction::Parsed(features) => features,
            Extraction::Unparseable(_) => UrlFeatures::zeroed(),
        }
    }
}

/// Normalizes, parses and fingerprints `raw`. Never fails.
pub fn extract(raw: &str) -> Extraction {
    let normalized = normalize(raw);
    match parse(&normalized) {
        Ok(parsed) => {
            let domain = decompose(&parsed.host);
            Extraction::Parsed(build(&parsed, &domain))
        }
        Err(error) => {
            debug!("Falling back to zero features for {:?}: {}", raw, error);
            Extraction::Unparseable(error)
        }
    }
}

pub fn extract_features(raw: &str) -> UrlFeatures {
    extract(raw).into_features()
}

fn build(parsed: &ParsedUrl, domain: &DomainParts) -> UrlFeatures {
    let mut features = UrlFeatures::zeroed();
    extract_lexical_features(&parsed.full, &mut features);
    extract_structural_features(parsed, &mut features);
    extract_domain_features(&parsed.host, domain, &mut features);
    features
}

fn extract_lexical_features(full: &str, features: &mut UrlFeatures) {
    let url_len = full.chars().count();
    let num_digits = full.chars().filter(|c| c.is_ascii_digit()).count();

    features.set(Feature::UrlLen, url_len as f64);
    features.set(Feature::NumDots, count_char(full, '.'));
    features.set(Feature::NumHyphens, count_char(full, '-'));
    features.set(Feature::NumAt, count_char(full, '@'));
    features.set(Feature::NumQm, count_char(full, '?'));
    features.set(Feature::NumPct, count_char(full, '%'));
    features.set(Feature::NumEq, count_char(full, '='));
    features.set(Feature::NumSlash, count_char(full, '/'));
    features.set(Feature::NumDigits, num_digits as f64);
    features.set(
        Feature::DigitRatio,
        num_digits as f64 / url_len.max(1) as f64,
    );
    features.set(Feature::Entropy, shannon_entropy(full));
    features.set(
        Feature::StartsWithHttps,
        flag(full.to_lowercase().starts_with("https")),
    );
    features.set(
        Feature::NumReserved,
        full.chars().filter(|c| RESERVED_CHARS.contains(c)).count() as f64,
    );
}

fn extract_structural_features(parsed: &ParsedUrl, features: &mut UrlFeatures) {
    let path = parsed.path.as_str();
    let query = parsed.query.as_str();

    features.set(Feature::HostLen, parsed.host.chars().count() as f64);
    features.set(Feature::PathLen, path.chars().count() as f64);
    features.set(Feature::IsHttps, flag(parsed.scheme == "https"));
    features.set(
        Feature::HasDoubleSlashInPath,
        flag(path.trim_matches('/').contains("//")),
    );

    let num_params = if query.is_empty() {
        0
    } else {
        query.matches('&').count() + 1
    };
    features.set(Feature::NumParams, num_params as f64);
    features.set(
        Feature::PathDepth,
        path.split('/').filter(|segment| !segment.is_empty()).count() as f64,
    );
    features.set(Feature::NumPeriodInPath, count_char(path, '.'));
}

fn extract_domain_features(host: &str, domain: &DomainParts, features: &mut UrlFeatures) {
    features.set(Feature::HasIpHost, flag(reference::looks_like_ipv4(host)));
    features.set(Feature::NumSubdomains, domain.subdomain_count() as f64);
    features.set(
        Feature::SuspiciousTld,
        flag(reference::is_suspicious_tld(domain.tld())),
    );
    features.set(
        Feature::Shortener,
        flag(reference::is_shortener(&domain.registrable_domain)),
    );
}

fn count_char(text: &str, needle: char) -> f64 {
    text.matches(needle).count() as f64
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}
