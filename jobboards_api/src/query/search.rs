//! The [`SearchQuery`] builder and the per-board parameter names it serializes to.

use url::form_urlencoded;

/// Query-string parameter names a job board expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text keyword parameter, e.g. `q`.
    pub keyword: &'static str,
    /// Location parameter, e.g. `where`.
    pub location: &'static str,
    /// 1-indexed page parameter.
    pub page: &'static str,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keyword: "q",
            location: "where",
            page: "page",
        }
    }
}

/// One page of a keyword/location search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location: String,
    pub page: u32,
}

impl SearchQuery {
    pub fn new(keyword: &str, location: &str) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            location: location.trim().to_string(),
            page: 1,
        }
    }

    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Form-encodes the non-empty parameters in keyword, location, page order.
    ///
    /// A page of `0` counts as empty and is left out.
    pub fn to_query_string(&self, params: &SearchParams) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.keyword.is_empty() {
            serializer.append_pair(params.keyword, &self.keyword);
        }
        if !self.location.is_empty() {
            serializer.append_pair(params.location, &self.location);
        }
        if self.page > 0 {
            serializer.append_pair(params.page, &self.page.to_string());
        }
        serializer.finish()
    }
}
