//! Synthesized orders shown when an account's orders cannot be fetched.
//!
//! The shape is fixed (six orders, catalog items and statuses cycled by
//! index) while quantities, dates, sections and booth numbers are random.
//! Every order is tagged [`Provenance::Local`].

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::models::{Order, OrderStatus, Provenance};

/// Number of orders synthesized per account.
pub const FALLBACK_ORDER_COUNT: usize = 6;

const CATALOG: [&str; 8] = [
    "Round Table 30\" high",
    "White Side Chair",
    "Black Side Chair",
    "Skirted Table 2' x 4' 30\" High",
    "White Stool with back",
    "2 Meter Curved Counter",
    "Round Table 42\" high",
    "Arm Light",
];

const STATUS_CYCLE: [OrderStatus; 4] = [
    OrderStatus::Delivered,
    OrderStatus::InRoute,
    OrderStatus::InProcess,
    OrderStatus::OutForDelivery,
];

const COLORS: [&str; 3] = ["White", "Black", "Natural Wood"];

const DESCRIPTION: &str = "Professional exhibition furniture and equipment";
const COMMENT: &str = "Coordinated by Expo Convention Contractors";

/// Builds the fallback orders for `account`, dated within the 30 days
/// before `today`.
pub fn fallback_orders<R: Rng>(account: &str, rng: &mut R, today: NaiveDate) -> Vec<Order> {
    let slug = slug(account);
    (0..FALLBACK_ORDER_COUNT)
        .map(|i| {
            let days_ago = rng.gen_range(0..30u64);
            let order_day = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
            Order {
                id: format!("ECC-{slug}-{}", i + 1),
                item: CATALOG[i % CATALOG.len()].to_string(),
                description: DESCRIPTION.to_string(),
                quantity: rng.gen_range(1..=5),
                color: COLORS[i % COLORS.len()].to_string(),
                status: STATUS_CYCLE[i % STATUS_CYCLE.len()],
                order_date: order_day.format("%Y-%m-%d").to_string(),
                comments: COMMENT.to_string(),
                section: format!("Section {}", rng.gen_range(1..=3)),
                booth_number: Some(rng.gen_range(1000..=9999u32).to_string()),
                provenance: Provenance::Local,
            }
        })
        .collect()
}

/// Replaces each run of whitespace with a single `-`.
fn slug(account: &str) -> String {
    account.split_whitespace().collect::<Vec<_>>().join("-")
}
