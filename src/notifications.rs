//! Recent-activity notifications.
//!
//! The relative times are cosmetic. They are drawn at random from a range
//! per status and are not measured latencies; nothing in the order payload
//! records when a status changed.

use rand::Rng;

use crate::models::{Notification, NotificationKind, Order, OrderStatus};

/// Maximum number of notifications kept per snapshot.
pub const MAX_NOTIFICATIONS: usize = 3;

/// Builds notifications for the first qualifying orders in input order.
///
/// In-route, out-for-delivery and delivered orders qualify; the result is
/// truncated to [`MAX_NOTIFICATIONS`] without regard to recency.
pub fn derive<R: Rng>(orders: &[Order], rng: &mut R) -> Vec<Notification> {
    orders
        .iter()
        .filter_map(|order| notification_for(order, rng))
        .take(MAX_NOTIFICATIONS)
        .collect()
}

fn notification_for<R: Rng>(order: &Order, rng: &mut R) -> Option<Notification> {
    let (message, max_minutes, kind) = match order.status {
        OrderStatus::InRoute => (
            format!("{} is in route from warehouse", order.item),
            30,
            NotificationKind::Delivery,
        ),
        OrderStatus::Delivered => (
            format!("{} has been delivered", order.item),
            120,
            NotificationKind::Success,
        ),
        OrderStatus::OutForDelivery => (
            format!("{} is out for delivery", order.item),
            15,
            NotificationKind::Delivery,
        ),
        _ => return None,
    };
    let minutes: u32 = rng.gen_range(1..=max_minutes);
    Some(Notification {
        message,
        time_label: format!("{minutes} min ago"),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::seeded_rng;
    use crate::models::Provenance;

    fn order(item: &str, status: OrderStatus) -> Order {
        Order {
            id: format!("ORD-{item}"),
            item: item.to_string(),
            description: String::new(),
            quantity: 1,
            color: String::new(),
            status,
            order_date: String::new(),
            comments: String::new(),
            section: String::new(),
            booth_number: None,
            provenance: Provenance::Remote,
        }
    }

    fn minutes(label: &str) -> u32 {
        label.trim_end_matches(" min ago").parse().unwrap()
    }

    #[test]
    fn messages_and_kinds_per_status() {
        let orders = vec![
            order("Arm Light", OrderStatus::InRoute),
            order("White Stool with back", OrderStatus::Delivered),
            order("Black Side Chair", OrderStatus::OutForDelivery),
        ];
        let notes = derive(&orders, &mut seeded_rng(1));
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].message, "Arm Light is in route from warehouse");
        assert_eq!(notes[0].kind, NotificationKind::Delivery);
        assert_eq!(notes[1].message, "White Stool with back has been delivered");
        assert_eq!(notes[1].kind, NotificationKind::Success);
        assert_eq!(notes[2].message, "Black Side Chair is out for delivery");
        assert_eq!(notes[2].kind, NotificationKind::Delivery);
    }

    #[test]
    fn caps_at_three_in_input_order() {
        let orders: Vec<Order> = (0..10)
            .map(|i| order(&format!("item-{i}"), OrderStatus::Delivered))
            .collect();
        let notes = derive(&orders, &mut seeded_rng(2));
        assert_eq!(notes.len(), MAX_NOTIFICATIONS);
        assert_eq!(notes[0].message, "item-0 has been delivered");
        assert_eq!(notes[2].message, "item-2 has been delivered");
    }

    #[test]
    fn skips_in_process_and_cancelled() {
        let orders = vec![
            order("a", OrderStatus::InProcess),
            order("b", OrderStatus::Cancelled),
            order("c", OrderStatus::Unrecognized),
        ];
        assert!(derive(&orders, &mut seeded_rng(3)).is_empty());
    }

    #[test]
    fn time_labels_stay_in_status_ranges() {
        let mut rng = seeded_rng(4);
        for _ in 0..200 {
            let notes = derive(
                &[
                    order("r", OrderStatus::InRoute),
                    order("d", OrderStatus::Delivered),
                    order("o", OrderStatus::OutForDelivery),
                ],
                &mut rng,
            );
            assert!((1..=30).contains(&minutes(&notes[0].time_label)));
            assert!((1..=120).contains(&minutes(&notes[1].time_label)));
            assert!((1..=15).contains(&minutes(&notes[2].time_label)));
        }
    }

    #[test]
    fn same_seed_same_output() {
        let orders = vec![order("x", OrderStatus::Delivered), order("y", OrderStatus::InRoute)];
        assert_eq!(
            derive(&orders, &mut seeded_rng(9)),
            derive(&orders, &mut seeded_rng(9))
        );
    }
}
