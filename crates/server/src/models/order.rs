//! Order domain types.
//!
//! An order doubles as the customer's basket while `open` is true and as an
//! immutable delivery record once it has been closed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mealdrop_core::{DeliveryStatus, FoodId, LocationId, OrderId, Price, UserId};

/// One food reference plus quantity and price within an order.
///
/// `food_id` is unique within an order; re-adding the same food overwrites
/// the quantity in place instead of appending a duplicate entry.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LineItem {
    /// The food being ordered.
    pub food_id: FoodId,
    /// How many of it (>= 1).
    pub quantity: i32,
    /// Price per unit at the time the item was first added.
    pub unit_price: Price,
}

/// An incoming line item, before it has been merged into a basket.
#[derive(Debug, Clone, Copy)]
pub struct NewLineItem {
    pub food_id: FoodId,
    pub quantity: i32,
    pub unit_price: Price,
}

/// A customer order (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning account.
    pub user_id: UserId,
    /// Delivery location chosen when the basket was created.
    pub location_id: LocationId,
    /// True while assembling/in transit; false once delivered (terminal).
    pub open: bool,
    /// Line items, one per distinct food.
    pub items: Vec<LineItem>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Delivery status derived from the `open` flag.
    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        DeliveryStatus::from_open(self.open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order(open: bool) -> Order {
        Order {
            id: OrderId::new(1),
            user_id: UserId::new(1),
            location_id: LocationId::new(1),
            open,
            items: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_from_open_flag() {
        assert_eq!(sample_order(true).status(), DeliveryStatus::Open);
        assert_eq!(sample_order(false).status(), DeliveryStatus::Delivered);
    }
}
