//! Order Data

use crate::domain::orders::records::OrderUuid;

/// Checkout request
///
/// Totals are never accepted from the caller; they are computed from the
/// locked cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceOrder {
    /// Identity for the new order; generated when absent.
    pub uuid: Option<OrderUuid>,

    pub shipping_address: Option<String>,
}
