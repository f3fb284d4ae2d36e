//! Wire and domain models for the exhibitor order service.
//!
//! Contains the order lifecycle status, orders and their response
//! envelope, exhibitors, derived notifications, and the health probe
//! result.

pub mod exhibitor;
pub mod notification;
pub mod order;
pub mod status;

pub use exhibitor::{BoothParts, Exhibitor};
pub use notification::{Notification, NotificationKind};
pub use order::{Order, OrderSummary, OrdersResponse, Provenance};
pub use status::OrderStatus;

/// Result of probing `GET /abacus-status`.
///
/// The payload is opaque; only whether it arrived matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemStatus {
    pub reachable: bool,
    /// Raw health document, kept for diagnostics.
    pub detail: Option<serde_json::Value>,
}

impl SystemStatus {
    /// A status for when the probe failed.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// A status wrapping a successfully fetched health document.
    #[must_use]
    pub fn online(detail: serde_json::Value) -> Self {
        Self {
            reachable: true,
            detail: Some(detail),
        }
    }

    /// The `status` field of the health document, if present.
    pub fn label(&self) -> Option<&str> {
        self.detail.as_ref()?.get("status")?.as_str()
    }
}
