//! Application screens
//!
//! Both tabs share [`ScreenController`]; each screen only supplies a
//! [`ScreenSpec`] naming its query and how a row looks.

mod controller;
mod customers;
mod orders;

pub use controller::{FetchTicket, ItemOf, Resolved, ScreenController, ScreenSpec, ScreenState};
pub use customers::{Customers, CustomersScreen};
pub use orders::{Orders, OrdersScreen};
