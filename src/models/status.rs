//! Order lifecycle status.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle state of a single order.
///
/// Wire names are kebab-case (`"out-for-delivery"`). Any other string
/// decodes to [`OrderStatus::Unrecognized`] instead of failing the whole
/// payload; the taxonomy treats it like [`OrderStatus::InProcess`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Delivered,
    OutForDelivery,
    InRoute,
    InProcess,
    Cancelled,
    #[default]
    Unrecognized,
}

impl OrderStatus {
    /// The five statuses the taxonomy defines, in legend order.
    pub const KNOWN: [OrderStatus; 5] = [
        OrderStatus::Delivered,
        OrderStatus::OutForDelivery,
        OrderStatus::InRoute,
        OrderStatus::InProcess,
        OrderStatus::Cancelled,
    ];

    /// Returns the wire-format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Delivered => "delivered",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::InRoute => "in-route",
            OrderStatus::InProcess => "in-process",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unrecognized => "unrecognized",
        }
    }

    /// Parses a wire-format name; unknown names become `Unrecognized`.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "delivered" => OrderStatus::Delivered,
            "out-for-delivery" => OrderStatus::OutForDelivery,
            "in-route" => OrderStatus::InRoute,
            "in-process" => OrderStatus::InProcess,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Unrecognized,
        }
    }

    /// Whether the status is part of the fixed taxonomy.
    pub fn is_known(&self) -> bool {
        !matches!(self, OrderStatus::Unrecognized)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(OrderStatus::Unrecognized, |raw| OrderStatus::from_wire(&raw)))
    }
}
