//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::orders::data::PlaceOrder;

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, record_checkout_outcome},
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Checkout Request
///
/// The order is built from the caller's cart; prices and totals are never
/// taken from the request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub shipping_address: Option<String>,
}

impl From<CreateOrderRequest> for PlaceOrder {
    fn from(request: CreateOrderRequest) -> Self {
        PlaceOrder {
            uuid: request.uuid.map(Into::into),
            shipping_address: request.shipping_address,
        }
    }
}

/// Create Order Handler
///
/// Checks out the caller's cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, missing address or insufficient stock"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let result = state
        .app
        .orders
        .place_order(user, json.into_inner().into())
        .await;

    let order = match result {
        Ok(order) => {
            record_checkout_outcome(CheckoutOutcome::Placed);

            order
        }
        Err(error) => {
            if error.is_rejection() {
                info!(user_uuid = %user, "checkout rejected: {error}");
                record_checkout_outcome(CheckoutOutcome::Rejected);
            } else {
                record_checkout_outcome(CheckoutOutcome::Failed);
            }

            return Err(into_status_error(error));
        }
    };

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
