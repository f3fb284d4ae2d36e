//! Recent-activity notifications derived from an order snapshot.

use serde::Serialize;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// The order is moving (in route or out for delivery).
    Delivery,
    /// The order has been delivered.
    Success,
}

/// A human-readable activity entry. Regenerated on every sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    /// Relative time such as `"12 min ago"`. Decorative only.
    pub time_label: String,
    pub kind: NotificationKind,
}
