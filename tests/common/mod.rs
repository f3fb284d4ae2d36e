//! Shared test utilities: a scriptable order source and engine builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Notify;

use expotrack::client::OrderSource;
use expotrack::clock::{FixedClock, seeded_rng};
use expotrack::models::{Exhibitor, Order, OrderStatus, OrdersResponse, Provenance, SystemStatus};
use expotrack::sync::SyncEngine;
use expotrack::{Result, TrackerError};

pub const ORDERS_JSON: &str = include_str!("../fixtures/orders.json");
pub const EXHIBITORS_JSON: &str = include_str!("../fixtures/exhibitors.json");
pub const ABACUS_STATUS_JSON: &str = include_str!("../fixtures/abacus_status.json");

/// An [`OrderSource`] answering from scripted data.
///
/// Anything not scripted fails: no exhibitors means the directory request
/// errors, and an account without scripted orders errors too. With a gate,
/// every order request waits for one `notify_one` before answering.
#[derive(Default)]
pub struct FakeSource {
    exhibitors: Option<Vec<Exhibitor>>,
    orders: Mutex<HashMap<String, Vec<Order>>>,
    last_updated: Option<String>,
    online: bool,
    gate: Option<Arc<Notify>>,
    order_calls: AtomicUsize,
    force_flags: Mutex<Vec<bool>>,
    requested: Mutex<Vec<String>>,
}

impl FakeSource {
    /// A source where every request fails.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_exhibitors(mut self, exhibitors: Vec<Exhibitor>) -> Self {
        self.exhibitors = Some(exhibitors);
        self
    }

    pub fn with_orders(self, account: &str, orders: Vec<Order>) -> Self {
        self.set_orders(account, orders);
        self
    }

    pub fn with_last_updated(mut self, raw: &str) -> Self {
        self.last_updated = Some(raw.to_string());
        self
    }

    pub fn online(mut self) -> Self {
        self.online = true;
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Replaces the scripted orders for `account`.
    pub fn set_orders(&self, account: &str, orders: Vec<Order>) {
        self.orders
            .lock()
            .unwrap()
            .insert(account.to_string(), orders);
    }

    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    pub fn force_flags(&self) -> Vec<bool> {
        self.force_flags.lock().unwrap().clone()
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl OrderSource for FakeSource {
    async fn exhibitors(&self, _force_refresh: bool) -> Result<Vec<Exhibitor>> {
        self.exhibitors
            .clone()
            .ok_or_else(|| TrackerError::MalformedPayload("directory offline".to_string()))
    }

    async fn orders(&self, exhibitor: &str, force_refresh: bool) -> Result<OrdersResponse> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        self.force_flags.lock().unwrap().push(force_refresh);
        self.requested.lock().unwrap().push(exhibitor.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let orders = self.orders.lock().unwrap().get(exhibitor).cloned();
        match orders {
            Some(orders) => Ok(OrdersResponse {
                orders: Some(orders),
                last_updated: self.last_updated.clone(),
            }),
            None => Err(TrackerError::MalformedPayload(format!(
                "no orders scripted for {exhibitor}"
            ))),
        }
    }

    async fn system_status(&self) -> Result<SystemStatus> {
        if self.online {
            Ok(SystemStatus::online(serde_json::json!({ "status": "connected" })))
        } else {
            Err(TrackerError::MalformedPayload("status offline".to_string()))
        }
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 14, 9, 0, 0).unwrap()
}

/// Builds an engine over `source` with a fixed clock at [`start_time`].
pub fn engine(
    source: Arc<FakeSource>,
    cache_ttl: Duration,
) -> (Arc<SyncEngine<FakeSource>>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(start_time()));
    let engine = SyncEngine::new(source, clock.clone(), seeded_rng(42), cache_ttl);
    (Arc::new(engine), clock)
}

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        item: format!("Item {id}"),
        description: String::new(),
        quantity: 1,
        color: "White".to_string(),
        status,
        order_date: "2025-06-10".to_string(),
        comments: String::new(),
        section: "Section 1".to_string(),
        booth_number: None,
        provenance: Provenance::Remote,
    }
}

pub fn fixture_orders() -> Vec<Order> {
    let response: OrdersResponse =
        serde_json::from_str(ORDERS_JSON).expect("Failed to parse orders fixture");
    response.into_orders()
}
