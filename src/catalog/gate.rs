//! Web access permission gating for catalog requests.
//!
//! Zellij answers the `WebAccess` permission request asynchronously. Until it
//! does, catalog requests are held; once granted they go out in issue order.
//! After a denial every request, held or new, settles at once as a transport
//! failure, so no fetch is left waiting for an answer that never comes.

use crate::catalog::request::{CatalogRequest, CatalogResponse};
use crate::domain::NetworkFailure;

/// Failure message for requests refused by a denied permission.
pub const ACCESS_DENIED: &str = "web access permission denied";

/// Answer to the `WebAccess` permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebAccess {
    /// Not answered yet.
    #[default]
    Pending,
    Granted,
    Denied,
}

/// What to do with a request offered to the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Send it to the host now.
    Send(CatalogRequest),
    /// Held until the permission is answered.
    Held,
    /// Refused; the failure must be fed back as a catalog response.
    Refused(CatalogResponse),
}

/// Holds catalog requests until web access is answered.
#[derive(Debug, Default)]
pub struct AccessGate {
    access: WebAccess,
    held: Vec<CatalogRequest>,
}

impl AccessGate {
    #[must_use]
    pub const fn access(&self) -> WebAccess {
        self.access
    }

    /// Number of requests waiting for the permission answer.
    #[must_use]
    pub fn held(&self) -> usize {
        self.held.len()
    }

    /// Offers `request` to the gate.
    pub fn admit(&mut self, request: CatalogRequest) -> Admission {
        match self.access {
            WebAccess::Granted => Admission::Send(request),
            WebAccess::Pending => {
                tracing::debug!(seq = request.seq, "holding fetch until web access is answered");
                self.held.push(request);
                Admission::Held
            }
            WebAccess::Denied => {
                tracing::debug!(seq = request.seq, "web access denied, failing fetch");
                Admission::Refused(Self::refuse(request))
            }
        }
    }

    /// Records a grant and releases the held requests in issue order.
    pub fn grant(&mut self) -> Vec<CatalogRequest> {
        self.access = WebAccess::Granted;
        tracing::debug!(held = self.held.len(), "web access granted");
        std::mem::take(&mut self.held)
    }

    /// Records a denial and settles the held requests as failures.
    pub fn deny(&mut self) -> Vec<CatalogResponse> {
        self.access = WebAccess::Denied;
        tracing::warn!(held = self.held.len(), "web access denied - catalog unavailable");
        self.held.drain(..).map(Self::refuse).collect()
    }

    fn refuse(request: CatalogRequest) -> CatalogResponse {
        CatalogResponse::failed(request, NetworkFailure::Transport(ACCESS_DENIED.to_string()))
    }
}
