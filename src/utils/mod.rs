//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Build the search URL for `term`: `<base>?query=<term>`.
///
/// Any query string already on `base` is replaced.
pub fn build_query_url(base: &Url, term: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().clear().append_pair("query", term);
    url
}

/// Read the `query` parameter back out of a search URL.
pub fn query_term(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == "query")
        .map(|(_, value)| value.into_owned())
}
