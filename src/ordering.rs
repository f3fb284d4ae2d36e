//! Priority ordering for presenting orders.

use crate::models::Order;
use crate::taxonomy;

/// Sorts orders so the most urgent statuses come first.
///
/// Stable: orders with equal priority keep their relative order.
/// Unrecognized statuses sort as in-process.
pub fn sort_by_priority(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by_key(|order| taxonomy::describe(order.status).priority);
    orders
}
