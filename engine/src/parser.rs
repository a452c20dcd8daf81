use regex::Regex;
use std::{net::Ipv6Addr, sync::LazyLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no URI components in {0:?}")]
    Unsplittable(String),

    #[error("unbalanced brackets in authority {0:?}")]
    UnbalancedBrackets(String),

    #[error("bracketed host {0:?} is not an IPv6 or IPvFuture literal")]
    InvalidBracketedHost(String),
}

// RFC 3986 appendix B: splits any string into its five components.
static URI_COMPONENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URI component pattern compiles")
});

static IPV_FUTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^v[0-9A-Fa-f]+\..+$").expect("IPvFuture pattern compiles")
});

/// Components of one URL.
///
/// Nothing is canonicalized: no dot-segment removal, no host rewriting, no
/// percent-encoding and no port validation. `full` is the input reassembled
/// from its components, so it only differs from the input where a component
/// was empty (a bare `?`, `#` or trailing `;`) or where tab, CR or LF were
/// stripped. Lengths are measured in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    /// Lowercased host without userinfo, port or IPv6 brackets. Empty when
    /// the authority names no host.
    pub host: String,
    /// Path up to the parameters of its last segment. Empty when absent.
    pub path: String,
    pub query: String,
    pub full: String,
}

/// Splits a URL into components without validating them.
///
/// Fails when the authority carries unbalanced brackets or a bracketed host
/// that is not an IP literal.
pub fn parse(input: &str) -> Result<ParsedUrl, ParseError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let Some(caps) = URI_COMPONENTS.captures(&cleaned) else {
        return Err(ParseError::Unsplittable(input.to_string()));
    };
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let scheme = group(1).to_ascii_lowercase();
    let authority = caps.get(2).map(|m| m.as_str());
    let (path, params) = split_params(group(3));
    let query = group(4);
    let fragment = group(5);

    let netloc = authority.unwrap_or("");
    check_brackets(netloc)?;

    let mut full = String::with_capacity(cleaned.len());
    if !scheme.is_empty() {
        full.push_str(&scheme);
        full.push(':');
    }
    if let Some(netloc) = authority {
        full.push_str("//");
        full.push_str(netloc);
    }
    full.push_str(path);
    if !params.is_empty() {
        full.push(';');
        full.push_str(params);
    }
    if !query.is_empty() {
        full.push('?');
        full.push_str(query);
    }
    if !fragment.is_empty() {
        full.push('#');
        full.push_str(fragment);
    }

    Ok(ParsedUrl {
        host: hostname(netloc),
        scheme,
        path: path.to_string(),
        query: query.to_string(),
        full,
    })
}

/// Separates `;params` from the last path segment.
fn split_params(path: &str) -> (&str, &str) {
    let last_segment = path.rfind('/').unwrap_or(0);
    match path[last_segment..].find(';') {
        Some(i) => {
            let at = last_segment + i;
            (&path[..at], &path[at + 1..])
        }
        None => (path, ""),
    }
}

fn check_brackets(netloc: &str) -> Result<(), ParseError> {
    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return Err(ParseError::UnbalancedBrackets(netloc.to_string()));
    }
    if !open {
        return Ok(());
    }

    let bracketed = netloc
        .split_once('[')
        .map(|(_, rest)| rest.split_once(']').map_or(rest, |(inner, _)| inner))
        .unwrap_or("");
    let valid = if bracketed.starts_with('v') {
        IPV_FUTURE.is_match(bracketed)
    } else {
        is_ipv6_literal(bracketed)
    };
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidBracketedHost(bracketed.to_string()))
    }
}

fn is_ipv6_literal(text: &str) -> bool {
    let address = match text.split_once('%') {
        Some((address, zone)) if !zone.is_empty() => address,
        Some(_) => return false,
        None => text,
    };
    address.parse::<Ipv6Addr>().is_ok()
}

fn hostname(netloc: &str) -> String {
    let hostinfo = netloc.rsplit_once('@').map_or(netloc, |(_, host)| host);
    let host = match hostinfo.split_once('[') {
        Some((_, bracketed)) => bracketed.split_once(']').map_or(bracketed, |(host, _)| host),
        None => hostinfo.split_once(':').map_or(hostinfo, |(host, _)| host),
    };
    // A zone identifier keeps its case.
    match host.split_once('%') {
        Some((address, zone)) => format!("{}%{}", address.to_lowercase(), zone),
        None => host.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let parsed = parse("https://Login.Example.COM:8443/a/b.php?x=1&y=2#frag").unwrap();
        assert_eq!(parsed.scheme, "https");
        assert_eq!(parsed.host, "login.example.com");
        assert_eq!(parsed.path, "/a/b.php");
        assert_eq!(parsed.query, "x=1&y=2");
        assert_eq!(parsed.full, "https://Login.Example.COM:8443/a/b.php?x=1&y=2#frag");
    }

    #[test]
    fn test_absent_path_stays_empty() {
        let parsed = parse("http://abc123.com").unwrap();
        assert_eq!(parsed.path, "");
        assert_eq!(parsed.query, "");
        assert_eq!(parsed.full, "http://abc123.com");
    }

    #[test]
    fn test_no_canonicalization() {
        let parsed = parse("http://x.com/a/../b.php").unwrap();
        assert_eq!(parsed.path, "/a/../b.php");
        assert_eq!(parsed.full, "http://x.com/a/../b.php");

        assert_eq!(parse("http://0x7f000001/").unwrap().host, "0x7f000001");
        assert_eq!(parse("http://bücher.de/").unwrap().host, "bücher.de");
        assert_eq!(parse("http://exa mple.com").unwrap().host, "exa mple.com");
    }

    #[test]
    fn test_out_of_range_host_and_port_still_split() {
        let parsed = parse("http://999.999.999.999/login").unwrap();
        assert_eq!(parsed.host, "999.999.999.999");
        assert_eq!(parsed.path, "/login");

        let parsed = parse("http://paypal.com:99999/login").unwrap();
        assert_eq!(parsed.host, "paypal.com");
        assert_eq!(parsed.full, "http://paypal.com:99999/login");
    }

    #[test]
    fn test_ip_hosts() {
        assert_eq!(parse("http://192.168.0.1/login").unwrap().host, "192.168.0.1");
        assert_eq!(parse("http://[::1]:8080/").unwrap().host, "::1");
        assert_eq!(parse("http://[fe80::1%Eth0]/").unwrap().host, "fe80::1%Eth0");
    }

    #[test]
    fn test_userinfo_is_not_host() {
        let parsed = parse("http://paypal.com@evil.example/x").unwrap();
        assert_eq!(parsed.host, "evil.example");
        assert!(parsed.full.contains('@'));
    }

    #[test]
    fn test_empty_authority() {
        let parsed = parse("http://").unwrap();
        assert_eq!(parsed.host, "");
        assert_eq!(parsed.path, "");
        assert_eq!(parsed.full, "http://");
    }

    #[test]
    fn test_params_leave_path_but_stay_in_full() {
        let parsed = parse("http://x.com/a;v=1/b.php;sid=42?q").unwrap();
        assert_eq!(parsed.path, "/a;v=1/b.php");
        assert_eq!(parsed.full, "http://x.com/a;v=1/b.php;sid=42?q");
    }

    #[test]
    fn test_empty_components_are_dropped() {
        assert_eq!(parse("http://x.com/a?").unwrap().full, "http://x.com/a");
        assert_eq!(parse("http://x.com/a#").unwrap().full, "http://x.com/a");
        assert_eq!(parse("http://x.com/a;").unwrap().full, "http://x.com/a");
        assert_eq!(parse("http://x.com/\ta\r\n").unwrap().full, "http://x.com/a");
    }

    #[test]
    fn test_bracket_errors() {
        assert!(matches!(
            parse("https://[::1"),
            Err(ParseError::UnbalancedBrackets(_))
        ));
        assert!(matches!(
            parse("http://host]/"),
            Err(ParseError::UnbalancedBrackets(_))
        ));
        assert!(matches!(
            parse("http://[1.2.3.4]/"),
            Err(ParseError::InvalidBracketedHost(_))
        ));
        assert!(matches!(
            parse("http://[not-an-ip]/"),
            Err(ParseError::InvalidBracketedHost(_))
        ));
        assert!(parse("http://[v1.fe]/").is_ok());
    }
}
