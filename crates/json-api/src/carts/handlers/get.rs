//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartLineRecord, CartRecord};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the line
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    /// Current product name
    pub product_name: String,

    /// Current unit price in pence/cents
    pub unit_price: u64,

    /// Units currently in stock
    pub stock: u32,

    pub quantity: u32,

    /// Quantity multiplied by the unit price
    pub subtotal: u64,

    pub created_at: String,
    pub updated_at: String,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        CartLineResponse {
            uuid: line.uuid.into(),
            product_uuid: line.product_uuid.into(),
            product_name: line.product_name,
            unit_price: line.unit_price,
            stock: line.stock,
            quantity: line.quantity,
            subtotal: line.subtotal,
            created_at: line.created_at.to_string(),
            updated_at: line.updated_at.to_string(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub lines: Vec<CartLineResponse>,

    /// Sum of line subtotals in pence/cents
    pub total: u64,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            lines: cart.lines.into_iter().map(Into::into).collect(),
            total: cart.total,
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart priced at current catalog prices.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
