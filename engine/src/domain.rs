//! Public-suffix-aware decomposition of a hostname.

use crate::reference::{is_ipv4_literal, public_suffixes};
use publicsuffix::Psl;
use std::net::Ipv6Addr;

// Ideographic and fullwidth full stops separate labels like '.'.
const UNICODE_DOTS: [char; 3] = ['\u{3002}', '\u{ff0e}', '\u{ff61}'];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    /// Domain label plus public suffix, e.g. `example.co.uk`. Just the domain
    /// label when the host has no known suffix.
    pub registrable_domain: String,
    pub subdomain: String,
    /// Empty when no rule in the suffix table matched.
    pub public_suffix: String,
}

impl DomainParts {
    /// Last dot-separated label of the public suffix (`uk` for `co.uk`).
    pub fn tld(&self) -> &str {
        self.public_suffix.rsplit('.').next().unwrap_or("")
    }

    /// 0 for no subdomain, otherwise the number of labels in it.
    pub fn subdomain_count(&self) -> usize {
        if self.subdomain.is_empty() {
            0
        } else {
            self.subdomain.matches('.').count() + 1
        }
    }
}

/// Splits `host` into subdomain, domain label and public suffix.
///
/// IP literals have no suffix; the whole literal becomes the registrable
/// domain. A trailing root dot is ignored. An empty host yields empty parts.
pub fn decompose(host: &str) -> DomainParts {
    let dotted: String = host
        .chars()
        .map(|c| if UNICODE_DOTS.contains(&c) { '.' } else { c })
        .collect();
    let name = dotted.trim_end_matches('.');
    if name.is_empty() {
        return DomainParts::default();
    }

    if is_ip_literal(name) {
        return DomainParts {
            registrable_domain: name.to_string(),
            ..DomainParts::default()
        };
    }

    let public_suffix = known_suffix(name).unwrap_or("");
    let rest = if public_suffix.is_empty() {
        name
    } else {
        name[..name.len() - public_suffix.len()].trim_end_matches('.')
    };

    let (subdomain, label) = match rest.rsplit_once('.') {
        Some((subdomain, label)) => (subdomain, label),
        None => ("", rest),
    };

    let registrable_domain = if public_suffix.is_empty() {
        label.to_string()
    } else {
        format!("{label}.{public_suffix}")
    };

    DomainParts {
        registrable_domain,
        subdomain: subdomain.to_string(),
        public_suffix: public_suffix.to_string(),
    }
}

fn is_ip_literal(name: &str) -> bool {
    let without_zone = name.split_once('%').map_or(name, |(address, _)| address);
    is_ipv4_literal(name) || without_zone.parse::<Ipv6Addr>().is_ok()
}

fn known_suffix(name: &str) -> Option<&str> {
    let suffix = public_suffixes().suffix(name.as_bytes())?;
    if !suffix.is_known() {
        return None;
    }
    let len = suffix.as_bytes().len();
    // The suffix is always a tail of the input, so this slice is on a label
    // boundary.
    name.get(name.len() - len..)
}
