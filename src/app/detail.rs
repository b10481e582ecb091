//! Detail overlay resolution.
//!
//! Opening a movie shows its summary immediately and asks the catalog for the
//! full record. The answer may come back after the overlay was closed or
//! switched to another movie, so it is only written when the overlay still
//! shows the id it was requested for. A failed lookup leaves the summary in
//! place: the overlay never goes blank and never shows an error.

use crate::app::discovery::{DiscardReason, Settlement};
use crate::catalog::{CatalogPayload, CatalogRequest};
use crate::domain::{MovieSummary, NetworkFailure, Selection};

/// Issues detail lookups and guards their write-back by movie id.
#[derive(Debug, Default)]
pub struct DetailResolver {
    /// Detail-slot sequence counter, independent of the main slot. Only the
    /// lookup carrying the latest value may write the overlay.
    issued: u64,
}

impl DetailResolver {
    /// Opens the overlay on `summary` and returns the detail request for it.
    ///
    /// Replaces whatever the overlay was showing.
    pub fn resolve(&mut self, selected: &mut Option<Selection>, summary: MovieSummary) -> CatalogRequest {
        self.issued += 1;
        let request = CatalogRequest::detail(self.issued, summary.id.clone());

        tracing::debug!(seq = self.issued, id = %summary.id, "detail requested");

        *selected = Some(Selection::Summary(summary));
        request
    }

    /// Writes a detail response back into the overlay if it still applies.
    pub fn settle(
        &self,
        selected: &mut Option<Selection>,
        seq: u64,
        id: &str,
        outcome: Result<CatalogPayload, NetworkFailure>,
    ) -> Settlement {
        let Some(open) = selected.as_ref() else {
            return Settlement::Discarded(DiscardReason::OverlayClosed { id: id.to_string() });
        };

        if open.id() != id {
            return Settlement::Discarded(DiscardReason::OverlayMoved {
                id: id.to_string(),
                open: open.id().to_string(),
            });
        }

        // Same movie reopened: only the latest lookup may settle it.
        if seq != self.issued {
            return Settlement::Discarded(DiscardReason::Superseded {
                seq,
                latest: self.issued,
            });
        }

        match outcome {
            Ok(CatalogPayload::Detail(detail)) if detail.id() == id => {
                *selected = Some(Selection::Detail(detail));
                Settlement::Upgraded { id: id.to_string() }
            }
            Ok(CatalogPayload::Detail(detail)) => Self::keep(
                seq,
                id,
                NetworkFailure::Decode(format!("requested {id} but catalog answered {}", detail.id())),
            ),
            Ok(CatalogPayload::Movies(_)) => Self::keep(
                seq,
                id,
                NetworkFailure::Decode("expected a single record, got a movie list".to_string()),
            ),
            Err(failure) => Self::keep(seq, id, failure),
        }
    }

    fn keep(seq: u64, id: &str, failure: NetworkFailure) -> Settlement {
        tracing::warn!(
            seq,
            id,
            error = %failure,
            "detail unavailable, overlay keeps the summary"
        );
        Settlement::Kept { id: id.to_string(), failure }
    }
}
