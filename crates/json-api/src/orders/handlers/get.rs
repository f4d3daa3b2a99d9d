//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderLineRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product_uuid: Uuid,

    /// Current product name
    pub product_name: String,

    pub quantity: u32,

    /// Unit price paid, in pence/cents
    pub unit_price: u64,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        OrderLineResponse {
            product_uuid: line.product_uuid.into(),
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Order total in pence/cents
    pub total: u64,

    pub status: String,
    pub shipping_address: String,
    pub lines: Vec<OrderLineResponse>,
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            total: order.total,
            status: order.status.to_string(),
            shipping_address: order.shipping_address,
            lines: order.lines.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
