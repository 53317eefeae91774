//! Domain types for the Mealdrop API.
//!
//! These types represent validated domain objects separate from raw request
//! and row shapes. Anything that leaves the process serializes from here.

pub mod catalog;
pub mod order;
pub mod user;

pub use catalog::{Feedback, Food, Location, Restaurant};
pub use order::{LineItem, NewLineItem, Order};
pub use user::User;
