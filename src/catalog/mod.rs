//! Catalog service protocol.
//!
//! The catalog is an external, read-only HTTP service. The plugin never talks
//! to it directly: requests are handed to Zellij as web requests and their
//! results arrive later as plugin events, in any order.
//!
//! - `request`: typed queries, tickets (kind + sequence number) and responses
//! - `gate`: holds requests until the web access permission is answered
//! - `client`: endpoint URLs and settlement of host results
//! - `wire`: JSON record decoding and sentinel normalization

pub mod client;
pub mod gate;
pub mod request;
pub mod wire;

pub use client::{CatalogClient, DEFAULT_CATALOG_URL};
pub use gate::{AccessGate, Admission, WebAccess};
pub use request::{
    CatalogPayload, CatalogQuery, CatalogRequest, CatalogResponse, TraceContext,
};
