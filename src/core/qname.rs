//! Qualified-Name Splitting
//!
//! Tokens arrive as `"<namespace-uri> <local-name>"` or as a bare local name.
//! Splitting is pure; the LRU only saves re-normalizing the same few dozen
//! names a feed repeats thousands of times.

use super::namespace::normalize_namespace;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Separator between namespace URI and local name in a combined token
pub const SEPARATOR: u8 = b' ';

const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// A namespace URI (possibly empty) and a local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QName {
    pub namespace: String,
    pub local: String,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        QName {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Build the combined token a tokenizer would emit for this name
    pub fn to_token(&self) -> String {
        join_token(&self.namespace, &self.local)
    }
}

/// Join a namespace and local name into a combined token
pub fn join_token(namespace: &str, local: &str) -> String {
    if namespace.is_empty() {
        return local.to_string();
    }
    let mut token = String::with_capacity(namespace.len() + 1 + local.len());
    token.push_str(namespace);
    token.push(SEPARATOR as char);
    token.push_str(local);
    token
}

/// Split a combined token without caching.
///
/// A separator at position 0 is not a split point: the whole token is the
/// local name.
pub fn split_token(token: &str) -> QName {
    match memchr::memchr(SEPARATOR, token.as_bytes()) {
        Some(pos) if pos > 0 => QName {
            namespace: normalize_namespace(token[..pos].to_string()),
            local: token[pos + 1..].to_string(),
        },
        _ => QName {
            namespace: String::new(),
            local: token.to_string(),
        },
    }
}

/// Memoizing splitter, owned by one parse
pub struct NameSplitter {
    cache: LruCache<String, QName>,
}

impl NameSplitter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        NameSplitter {
            cache: LruCache::new(capacity),
        }
    }

    /// Split `token`, serving repeats from the cache
    pub fn split(&mut self, token: &str) -> QName {
        if let Some(hit) = self.cache.get(token) {
            return hit.clone();
        }
        let qname = split_token(token);
        self.cache.put(token.to_string(), qname.clone());
        qname
    }

    /// Number of distinct tokens currently cached
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl Default for NameSplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::namespace::ns;

    #[test]
    fn test_bare_name() {
        assert_eq!(split_token("rss"), QName::new("", "rss"));
    }

    #[test]
    fn test_namespaced_name() {
        let q = split_token("http://www.w3.org/2005/Atom entry");
        assert_eq!(q.namespace, ns::ATOM_10);
        assert_eq!(q.local, "entry");
    }

    #[test]
    fn test_leading_separator_is_not_split() {
        assert_eq!(split_token(" title"), QName::new("", " title"));
    }

    #[test]
    fn test_splits_at_first_separator() {
        let q = split_token("urn:a b c");
        assert_eq!(q, QName::new("urn:a", "b c"));
    }

    #[test]
    fn test_normalizes_aliases() {
        let q = split_token("http://www.rssboard.org/media-rss content");
        assert_eq!(q, QName::new(ns::MEDIARSS, "content"));

        let q = split_token("HTTP://WWW.ITUNES.COM/DTDS/PODCAST-1.0.DTD author");
        assert_eq!(q, QName::new(ns::ITUNES, "author"));
    }

    #[test]
    fn test_cache_is_transparent() {
        let mut splitter = NameSplitter::with_capacity(2);
        let token = "http://search.yahoo.com/mrss thumbnail";
        let first = splitter.split(token);
        let second = splitter.split(token);
        assert_eq!(first, second);
        assert_eq!(first, split_token(token));

        // Evictions never change results
        splitter.split("a");
        splitter.split("b");
        assert_eq!(splitter.split(token), first);
        assert!(splitter.cached() <= 2);
    }

    #[test]
    fn test_token_roundtrip() {
        let q = QName::new(ns::DC_11, "creator");
        assert_eq!(split_token(&q.to_token()), q);
        assert_eq!(QName::new("", "item").to_token(), "item");
    }
}
