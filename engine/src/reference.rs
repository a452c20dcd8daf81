//! Static reference data consulted by the feature extractor.
//!
//! Everything here is built at most once per process and never mutated.
//! Changing any of these tables changes scoring output, so persisted models
//! record the `REFERENCE_DATA_VERSION` they were trained against.

use publicsuffix::List;
use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};

/// Version tag of the suspicious TLD set, shortener set, IP pattern and
/// suffix table below.
pub const REFERENCE_DATA_VERSION: &str = "2024.2";

const PUBLIC_SUFFIX_DATA: &str = include_str!("../data/public_suffix_list.dat");

/// Top-level labels commonly used for throwaway phishing registrations.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    "zip", "xyz", "top", "gq", "work", "tk", "ml", "cf", "ru", "click", "country", "stream",
    "download", "men", "party", "loan", "kim", "mom", "date", "racing", "science", "study",
    "buzz",
];

/// Registrable domains of well-known URL shortening services.
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "goo.gl",
    "t.co",
    "tinyurl.com",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "adf.ly",
    "bit.do",
    "mcaf.ee",
];

// Anchored at the start only: four dotted octets followed by anything.
const IPV4_HOST_PATTERN: &str = r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(\.|$)){4}";

const IPV4_LITERAL_PATTERN: &str =
    r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";

static SUSPICIOUS_TLD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SUSPICIOUS_TLDS.iter().copied().collect());

static SHORTENER_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SHORTENER_DOMAINS.iter().copied().collect());

static IPV4_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IPV4_HOST_PATTERN).expect("IPv4 host pattern compiles"));

static IPV4_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IPV4_LITERAL_PATTERN).expect("IPv4 literal pattern compiles"));

static PUBLIC_SUFFIXES: LazyLock<List> = LazyLock::new(|| {
    PUBLIC_SUFFIX_DATA
        .parse()
        .expect("embedded public suffix list parses")
});

pub fn public_suffixes() -> &'static List {
    &PUBLIC_SUFFIXES
}

pub fn is_suspicious_tld(label: &str) -> bool {
    SUSPICIOUS_TLD_SET.contains(label)
}

pub fn is_shortener(registrable_domain: &str) -> bool {
    SHORTENER_SET.contains(registrable_domain)
}

/// True when `host` starts with an IPv4 dotted quad whose octets are 0-255.
///
/// The match is not anchored at the end, so `1.2.3.4.com` counts while
/// `1.2.3.4extra` and `300.1.1.1` do not.
pub fn looks_like_ipv4(host: &str) -> bool {
    IPV4_HOST.is_match(host)
}

/// True when `name` is exactly a dotted quad with octets 0-255. Leading
/// zeros are allowed.
pub fn is_ipv4_literal(name: &str) -> bool {
    IPV4_LITERAL.is_match(name)
}
