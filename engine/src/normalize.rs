use std::borrow::Cow;

const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Prefixes `http://` unless the input already starts with `http://` or
/// `https://`. The prefix check is case-sensitive.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("{DEFAULT_SCHEME_PREFIX}{raw}"))
    }
}
