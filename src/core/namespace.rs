//! Feed Namespaces
//!
//! Well-known namespace URIs and the alias table that folds broken
//! namespace URIs seen in the wild onto their canonical spelling.

/// Well-known namespace URIs
pub mod ns {
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
    pub const XHTML: &str = "http://www.w3.org/1999/xhtml";

    pub const ATOM_03: &str = "http://purl.org/atom/ns#";
    pub const ATOM_10: &str = "http://www.w3.org/2005/Atom";
    /// RSS 2.0 elements live in no namespace
    pub const RSS_20: &str = "";
    pub const RSS_090: &str = "http://my.netscape.com/rdf/simple/0.9/";
    pub const RSS_10: &str = "http://purl.org/rss/1.0/";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const DC_11: &str = "http://purl.org/dc/elements/1.1/";

    pub const ITUNES: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
    pub const MEDIARSS: &str = "http://search.yahoo.com/mrss/";
}

/// Media RSS namespace spellings that publishers get wrong
const MEDIARSS_ALIASES: [&str; 5] = [
    "http://search.yahoo.com/mrss",
    "http://video.search.yahoo.com/mrss",
    "http://video.search.yahoo.com/mrss/",
    "http://www.rssboard.org/media-rss",
    "http://www.rssboard.org/media-rss/",
];

/// Canonical spelling for `namespace`, or `None` if it is already canonical
/// (or unknown).
pub fn canonical_namespace(namespace: &str) -> Option<&'static str> {
    if namespace != ns::ITUNES && namespace.eq_ignore_ascii_case(ns::ITUNES) {
        return Some(ns::ITUNES);
    }
    if MEDIARSS_ALIASES.contains(&namespace) {
        return Some(ns::MEDIARSS);
    }
    None
}

/// Apply the alias table to an owned namespace
pub fn normalize_namespace(namespace: String) -> String {
    match canonical_namespace(&namespace) {
        Some(canonical) => canonical.to_string(),
        None => namespace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itunes_case_folding() {
        assert_eq!(
            canonical_namespace("http://www.iTunes.com/DTDs/Podcast-1.0.dtd"),
            Some(ns::ITUNES)
        );
        assert_eq!(canonical_namespace(ns::ITUNES), None);
    }

    #[test]
    fn test_mediarss_aliases() {
        for alias in MEDIARSS_ALIASES {
            assert_eq!(normalize_namespace(alias.to_string()), ns::MEDIARSS);
        }
        assert_eq!(normalize_namespace(ns::MEDIARSS.to_string()), ns::MEDIARSS);
    }

    #[test]
    fn test_unknown_untouched() {
        assert_eq!(normalize_namespace(ns::ATOM_10.to_string()), ns::ATOM_10);
        assert_eq!(normalize_namespace(String::new()), "");
    }
}
