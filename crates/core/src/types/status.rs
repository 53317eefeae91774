//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Delivery status of an order.
///
/// An order starts [`Open`](Self::Open) (the customer's current basket,
/// or in transit) and moves to [`Delivered`](Self::Delivered) exactly once
/// when an administrator marks the delivery complete. There is no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryStatus {
    /// Still assembling or in transit.
    #[default]
    Open,
    /// Delivered; terminal.
    Delivered,
}

impl DeliveryStatus {
    /// Derive the status from an order's `open` flag.
    #[must_use]
    pub const fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Delivered }
    }

    /// Whether the order can still be mutated or closed.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid delivery status: {s}")),
        }
    }
}
