//! Owner/app namespace for knowledge-object endpoints.

use super::url_encoding::encode_path_segment;

/// The `servicesNS/{owner}/{app}` scope a saved search lives in.
///
/// An owner of `-` matches objects of any owner shared into the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace<'a> {
    pub owner: &'a str,
    pub app: &'a str,
}

impl<'a> Namespace<'a> {
    pub fn new(owner: &'a str, app: &'a str) -> Self {
        Self { owner, app }
    }

    /// `{base_url}/servicesNS/{owner}/{app}/saved/searches`
    pub fn saved_searches_url(&self, base_url: &str) -> String {
        format!(
            "{}/servicesNS/{}/{}/saved/searches",
            base_url,
            encode_path_segment(self.owner),
            encode_path_segment(self.app)
        )
    }

    /// `{base_url}/servicesNS/{owner}/{app}/saved/searches/{name}`
    pub fn saved_search_url(&self, base_url: &str, name: &str) -> String {
        format!(
            "{}/{}",
            self.saved_searches_url(base_url),
            encode_path_segment(name)
        )
    }
}
