//! Static display and priority metadata for each order status.

use crate::models::OrderStatus;

/// Display metadata for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDescriptor {
    pub label: &'static str,
    /// Completion shown on the progress bar, 0 to 100.
    pub progress_percent: u8,
    /// Lower sorts first. Distinct per status.
    pub priority: u8,
}

const IN_PROCESS: StatusDescriptor = StatusDescriptor {
    label: "In Process",
    progress_percent: 25,
    priority: 1,
};

/// One entry per known status, in legend order.
static DESCRIPTORS: [(OrderStatus, StatusDescriptor); 5] = [
    (
        OrderStatus::Delivered,
        StatusDescriptor {
            label: "Delivered",
            progress_percent: 100,
            priority: 5,
        },
    ),
    (
        OrderStatus::OutForDelivery,
        StatusDescriptor {
            label: "Out for Delivery",
            progress_percent: 75,
            priority: 3,
        },
    ),
    (
        OrderStatus::InRoute,
        StatusDescriptor {
            label: "In Route from Warehouse",
            progress_percent: 50,
            priority: 2,
        },
    ),
    (OrderStatus::InProcess, IN_PROCESS),
    (
        OrderStatus::Cancelled,
        StatusDescriptor {
            label: "Cancelled",
            progress_percent: 0,
            priority: 4,
        },
    ),
];

/// Returns the descriptor for `status`.
///
/// Statuses outside the table get the in-process descriptor.
pub fn describe(status: OrderStatus) -> &'static StatusDescriptor {
    DESCRIPTORS
        .iter()
        .find(|(s, _)| *s == status)
        .map_or(&IN_PROCESS, |(_, d)| d)
}

/// The full table, for building a legend.
///
/// Not sorted by priority; sort explicitly if that order is needed.
pub fn all_descriptors() -> &'static [(OrderStatus, StatusDescriptor)] {
    &DESCRIPTORS
}
