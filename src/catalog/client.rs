//! Catalog HTTP endpoint mapping.
//!
//! [`CatalogClient`] knows where the catalog lives. It turns a
//! [`CatalogQuery`] into the URL the plugin hands to Zellij's `web_request`,
//! and turns the host's `WebRequestResult` back into a typed
//! [`CatalogResponse`]. It performs no I/O itself: the host does the
//! transport, and results come back as plugin events.

use crate::catalog::request::{CatalogPayload, CatalogQuery, CatalogRequest, CatalogResponse};
use crate::catalog::wire;
use crate::domain::{CinedexError, NetworkFailure, Result};
use std::collections::BTreeMap;
use url::Url;

/// Default catalog location.
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080";

/// Maps catalog queries to URLs and host results to responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogClient {
    base: Url,
}

impl CatalogClient {
    /// Creates a client for the catalog rooted at `base_url`.
    ///
    /// A path prefix is kept: `http://host/catalog` serves
    /// `http://host/catalog/api/movies/...`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute hierarchical URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cinedex::catalog::{CatalogClient, CatalogQuery};
    ///
    /// let client = CatalogClient::new("http://localhost:8080")?;
    /// let url = client.url_for(&CatalogQuery::TopRated { limit: 20 })?;
    /// assert_eq!(url.as_str(), "http://localhost:8080/api/movies/top-rated?limit=20");
    /// # Ok::<(), cinedex::CinedexError>(())
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(CinedexError::Config(format!(
                "catalog_url must be a hierarchical URL, got {base_url}"
            )));
        }
        Ok(Self { base })
    }

    /// Root URL of the catalog.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the endpoint URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry path segments.
    pub fn url_for(&self, query: &CatalogQuery) -> Result<Url> {
        let mut url = self.base.clone();
        url.set_query(None);

        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                CinedexError::Config(format!("catalog_url {} cannot carry a path", self.base))
            })?;
            segments.pop_if_empty().extend(["api", "movies"]);
            match query {
                CatalogQuery::TopRated { .. } => {
                    segments.push("top-rated");
                }
                CatalogQuery::ByTitle { .. } => {}
                CatalogQuery::Detail { id } => {
                    segments.push(id);
                }
            }
        }

        match query {
            CatalogQuery::TopRated { limit } => {
                url.query_pairs_mut().append_pair("limit", &limit.to_string());
            }
            CatalogQuery::ByTitle { title, page, size } => {
                url.query_pairs_mut()
                    .append_pair("title", title)
                    .append_pair("page", &page.to_string())
                    .append_pair("size", &size.to_string());
            }
            CatalogQuery::Detail { .. } => {}
        }

        Ok(url)
    }

    /// Headers sent with every catalog request.
    #[must_use]
    pub fn headers() -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    /// Settles `request` from the status and body the host reported.
    ///
    /// Any status outside `200..=299` is a failure; a success body is decoded
    /// according to the query kind.
    #[must_use]
    pub fn settle(request: CatalogRequest, status: u16, body: &[u8]) -> CatalogResponse {
        if !(200..=299).contains(&status) {
            tracing::debug!(status, seq = request.seq, "catalog answered with failure status");
            return CatalogResponse::failed(request, NetworkFailure::Status { status });
        }

        let outcome = match &request.query {
            CatalogQuery::TopRated { .. } | CatalogQuery::ByTitle { .. } => {
                wire::decode_movies(body).map(CatalogPayload::Movies)
            }
            CatalogQuery::Detail { id } => {
                wire::decode_detail(body, id).map(CatalogPayload::Detail)
            }
        };

        if let Err(failure) = &outcome {
            tracing::debug!(seq = request.seq, error = %failure, "catalog payload rejected");
        }

        CatalogResponse { request, outcome }
    }

    /// Settles a host `WebRequestResult` if it belongs to the catalog.
    ///
    /// Returns `None` when the context map carries no catalog ticket.
    #[must_use]
    pub fn settle_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<CatalogResponse> {
        let request = CatalogRequest::from_context(context)?;
        Some(Self::settle(request, status, body))
    }
}
