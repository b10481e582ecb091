//! Catalog request and response types.
//!
//! Every request carries a ticket: the sequence number it was issued with and
//! the query it asked for. The ticket travels through the Zellij web request
//! context map and comes back untouched with the result, which is how the
//! discovery core tells a current response from a stale one without any
//! wire-level cancellation. The current trace context rides along as well so
//! the span handling a response links to the span that issued it.

use crate::domain::{MovieDetail, MovieSummary, NetworkFailure};
use std::collections::BTreeMap;

const KEY_KIND: &str = "cinedex.kind";
const KEY_SEQ: &str = "cinedex.seq";
const KEY_QUERY: &str = "cinedex.query";
const KEY_PAGE: &str = "cinedex.page";
const KEY_SIZE: &str = "cinedex.size";
const KEY_LIMIT: &str = "cinedex.limit";
const KEY_ID: &str = "cinedex.id";
const KEY_TRACE_ID: &str = "cinedex.trace_id";
const KEY_PARENT_SPAN_ID: &str = "cinedex.parent_span_id";

const KIND_TOP_RATED: &str = "top_rated";
const KIND_BY_TITLE: &str = "by_title";
const KIND_DETAIL: &str = "detail";

/// The three read operations offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Highest rated movies.
    TopRated {
        /// Maximum number of results.
        limit: u32,
    },

    /// Movies whose title matches `title`.
    ByTitle {
        /// Raw search text as the user typed it.
        title: String,
        /// Zero-based page index.
        page: u32,
        /// Page size.
        size: u32,
    },

    /// Full record for one movie.
    Detail {
        /// Catalog id of the movie.
        id: String,
    },
}

impl CatalogQuery {
    const fn kind(&self) -> &'static str {
        match self {
            Self::TopRated { .. } => KIND_TOP_RATED,
            Self::ByTitle { .. } => KIND_BY_TITLE,
            Self::Detail { .. } => KIND_DETAIL,
        }
    }
}

/// Distributed tracing context captured when a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current span.
    ///
    /// Returns `None` when no OpenTelemetry span is active, which is the case
    /// whenever tracing has not been initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes the captured span the remote parent for the current thread.
    ///
    /// The returned guard must be held while the response is handled.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }
}

/// A catalog query tagged with its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    /// Sequence number assigned at issue time. Main fetches (top rated and
    /// search) share one counter; detail lookups have their own.
    pub seq: u64,

    /// What to fetch.
    pub query: CatalogQuery,

    /// Trace context of the issuing span.
    pub trace_context: Option<TraceContext>,
}

/// Generates constructors that tag a query with `seq` and the current trace
/// context.
macro_rules! catalog_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl CatalogRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with the current trace context")]
                #[must_use]
                pub fn $builder_name(seq: u64, $($field: $ty),*) -> Self {
                    Self {
                        seq,
                        query: CatalogQuery::$variant { $($field,)* },
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

catalog_request_builders! {
    top_rated(TopRated { limit: u32 }),
    by_title(ByTitle { title: String, page: u32, size: u32 }),
    detail(Detail { id: String }),
}

impl CatalogRequest {
    /// Encodes the ticket into a web request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(KEY_KIND.to_string(), self.query.kind().to_string());
        context.insert(KEY_SEQ.to_string(), self.seq.to_string());

        match &self.query {
            CatalogQuery::TopRated { limit } => {
                context.insert(KEY_LIMIT.to_string(), limit.to_string());
            }
            CatalogQuery::ByTitle { title, page, size } => {
                context.insert(KEY_QUERY.to_string(), title.clone());
                context.insert(KEY_PAGE.to_string(), page.to_string());
                context.insert(KEY_SIZE.to_string(), size.to_string());
            }
            CatalogQuery::Detail { id } => {
                context.insert(KEY_ID.to_string(), id.clone());
            }
        }

        if let Some(trace) = &self.trace_context {
            context.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }

        context
    }

    /// Recovers the ticket from a web request context map.
    ///
    /// Returns `None` if the map was not produced by [`Self::to_context`],
    /// e.g. for web requests issued by something other than the catalog.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let seq = context.get(KEY_SEQ)?.parse::<u64>().ok()?;
        let number = |key: &str| context.get(key).and_then(|v| v.parse::<u32>().ok());

        let query = match context.get(KEY_KIND)?.as_str() {
            KIND_TOP_RATED => CatalogQuery::TopRated { limit: number(KEY_LIMIT)? },
            KIND_BY_TITLE => CatalogQuery::ByTitle {
                title: context.get(KEY_QUERY)?.clone(),
                page: number(KEY_PAGE)?,
                size: number(KEY_SIZE)?,
            },
            KIND_DETAIL => CatalogQuery::Detail { id: context.get(KEY_ID)?.clone() },
            _ => return None,
        };

        let trace_context = match (context.get(KEY_TRACE_ID), context.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self { seq, query, trace_context })
    }
}

/// Successful catalog payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPayload {
    /// Result of `TopRated` or `ByTitle`.
    Movies(Vec<MovieSummary>),
    /// Result of `Detail`.
    Detail(MovieDetail),
}

/// A settled catalog request: the original ticket plus its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResponse {
    pub request: CatalogRequest,
    pub outcome: Result<CatalogPayload, NetworkFailure>,
}

impl CatalogResponse {
    /// A response settling `request` as failed.
    #[must_use]
    pub const fn failed(request: CatalogRequest, failure: NetworkFailure) -> Self {
        Self { request, outcome: Err(failure) }
    }

    /// A response settling `request` with a movie list.
    #[must_use]
    pub const fn movies(request: CatalogRequest, movies: Vec<MovieSummary>) -> Self {
        Self { request, outcome: Ok(CatalogPayload::Movies(movies)) }
    }

    /// A response settling `request` with a detail record.
    #[must_use]
    pub const fn detail(request: CatalogRequest, detail: MovieDetail) -> Self {
        Self { request, outcome: Ok(CatalogPayload::Detail(detail)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_ticket_survives_the_context_map() {
        let request = CatalogRequest::by_title(7, "Blade Runner".to_string(), 0, 20);
        let context = request.to_context();

        assert_eq!(context.get("cinedex.kind").map(String::as_str), Some("by_title"));
        assert_eq!(CatalogRequest::from_context(&context), Some(request));
    }

    #[test]
    fn detail_ticket_keeps_trace_context() {
        let mut request = CatalogRequest::detail(3, "tt0083658".to_string());
        request.trace_context = Some(TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        });

        let decoded = CatalogRequest::from_context(&request.to_context());
        assert_eq!(decoded, Some(request));
    }

    #[test]
    fn foreign_context_is_not_a_ticket() {
        let mut context = BTreeMap::new();
        context.insert("source".to_string(), "another-plugin".to_string());
        assert_eq!(CatalogRequest::from_context(&context), None);

        context.insert("cinedex.seq".to_string(), "1".to_string());
        context.insert("cinedex.kind".to_string(), "reviews".to_string());
        assert_eq!(CatalogRequest::from_context(&context), None);
    }
}
