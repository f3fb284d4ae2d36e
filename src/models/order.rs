//! Order models and the `GET /orders/exhibitor/{name}` response envelope.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::status::OrderStatus;

/// Date formats the backend has been seen to emit for `order_date`.
const ORDER_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y"];

/// Where an order came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Served by the remote order service.
    #[default]
    Remote,
    /// Synthesized locally because the remote fetch failed.
    Local,
}

/// A single trackable line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub description: String,
    /// Always at least 1; missing, zero, or unparsable values become 1.
    #[serde(default = "default_quantity", deserialize_with = "de_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// Calendar date as sent by the backend; see [`Order::order_day`].
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub booth_number: Option<String>,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Order {
    /// Parses `order_date` in any of the formats the backend uses.
    pub fn order_day(&self) -> Option<NaiveDate> {
        let raw = self.order_date.trim();
        ORDER_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    /// Whether the order was synthesized locally.
    pub fn is_local(&self) -> bool {
        self.provenance == Provenance::Local
    }
}

fn default_quantity() -> u32 {
    1
}

/// Accepts a JSON number or numeric string, clamping to at least 1.
fn de_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Null(()),
    }

    let quantity = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Float(f) => f as i64,
        Raw::Text(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(1),
        Raw::Null(()) => 1,
    };
    Ok(u32::try_from(quantity).unwrap_or(1).max(1))
}

/// Body of `GET /orders/exhibitor/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersResponse {
    /// A missing or `null` list is a valid empty result.
    #[serde(default)]
    pub orders: Option<Vec<Order>>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl OrdersResponse {
    /// Returns the orders, treating an absent list as empty.
    pub fn into_orders(self) -> Vec<Order> {
        self.orders.unwrap_or_default()
    }

    /// Parses `last_updated`, falling back to `now` when missing or invalid.
    ///
    /// Accepts RFC 3339 and the offset-less ISO form the backend emits,
    /// which is read as UTC.
    pub fn last_updated_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.last_updated
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Dashboard counters for a set of orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderSummary {
    pub total: usize,
    pub delivered: usize,
    /// Orders neither delivered nor cancelled.
    pub pending: usize,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        let delivered = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .count();
        let pending = orders
            .iter()
            .filter(|o| !matches!(o.status, OrderStatus::Delivered | OrderStatus::Cancelled))
            .count();
        Self {
            total: orders.len(),
            delivered,
            pending,
        }
    }
}
