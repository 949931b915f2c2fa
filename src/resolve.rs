//! Base URI Resolution
//!
//! `xml:base` values are absolutized against the base in effect at the
//! parent element. Resolution is pluggable; the default follows RFC 3986
//! through the `url` crate.

use url::Url;

/// Turns a possibly relative reference into an absolute URL
pub trait UrlResolver: Send + Sync {
    /// `None` when `reference` cannot be resolved against `base`
    fn absolutize(&self, reference: &str, base: &str) -> Option<String>;
}

impl<F> UrlResolver for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn absolutize(&self, reference: &str, base: &str) -> Option<String> {
        self(reference, base)
    }
}

/// RFC 3986 resolution via [`Url::join`].
///
/// An empty base only accepts references that are already absolute.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlJoin;

impl UrlResolver for UrlJoin {
    fn absolutize(&self, reference: &str, base: &str) -> Option<String> {
        let reference = reference.trim();
        if base.is_empty() {
            return Url::parse(reference).ok().map(String::from);
        }
        let base = Url::parse(base).ok()?;
        base.join(reference).ok().map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_against_base() {
        assert_eq!(
            UrlJoin.absolutize("entries/1", "http://example.org/feed/"),
            Some("http://example.org/feed/entries/1".to_string())
        );
        assert_eq!(
            UrlJoin.absolutize("../img.png", "http://example.org/a/b/c"),
            Some("http://example.org/a/img.png".to_string())
        );
    }

    #[test]
    fn test_absolute_reference_wins() {
        assert_eq!(
            UrlJoin.absolutize("https://other.example/", "http://example.org/"),
            Some("https://other.example/".to_string())
        );
    }

    #[test]
    fn test_empty_base() {
        assert_eq!(
            UrlJoin.absolutize("http://example.org/x", ""),
            Some("http://example.org/x".to_string())
        );
        assert_eq!(UrlJoin.absolutize("relative/path", ""), None);
    }

    #[test]
    fn test_unparseable_base() {
        assert_eq!(UrlJoin.absolutize("x", "not a url"), None);
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |r: &str, b: &str| Some(format!("{}{}", b, r));
        assert_eq!(resolver.absolutize("b", "a/"), Some("a/b".to_string()));
    }
}
