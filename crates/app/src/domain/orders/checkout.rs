//! Checkout planning
//!
//! Turns a locked cart into the order lines and total to write, or rejects it.
//! Everything here is pure; the service runs it between the locking read and
//! the first write.

use crate::{
    domain::{carts::records::LockedCartLine, orders::errors::OrdersServiceError},
    money::{line_amount, sum_amounts},
};

/// Validated order contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckoutPlan {
    pub lines: Vec<LockedCartLine>,
    pub total: u64,
}

/// Trim a shipping address, rejecting one that is absent or blank.
pub(crate) fn shipping_address(address: Option<&str>) -> Result<String, OrdersServiceError> {
    address
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(ToString::to_string)
        .ok_or(OrdersServiceError::MissingShippingAddress)
}

/// Check every line against its locked stock and total the cart.
///
/// Lines are never clamped: the first line asking for more than its product's
/// stock rejects the whole checkout.
pub(crate) fn plan_checkout(lines: Vec<LockedCartLine>) -> Result<CheckoutPlan, OrdersServiceError> {
    if lines.is_empty() {
        return Err(OrdersServiceError::CartEmpty);
    }

    if let Some(short) = lines.iter().find(|line| line.quantity > line.stock) {
        return Err(OrdersServiceError::InsufficientStock {
            product_uuid: short.product_uuid,
            product_name: short.product_name.clone(),
            requested: short.quantity,
            available: short.stock,
        });
    }

    let amounts = lines
        .iter()
        .map(|line| line_amount(line.quantity, line.unit_price))
        .collect::<Option<Vec<_>>>()
        .ok_or(OrdersServiceError::TotalOverflow)?;

    let total = sum_amounts(amounts)
        .filter(|total| i64::try_from(*total).is_ok())
        .ok_or(OrdersServiceError::TotalOverflow)?;

    Ok(CheckoutPlan { lines, total })
}
