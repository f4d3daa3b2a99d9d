//! Create Cart Line Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::NewCartLine;

use crate::{
    carts::{errors::into_status_error, get::CartLineResponse},
    extensions::*,
    state::State,
};

/// Create Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartLineRequest {
    pub product_uuid: Uuid,

    /// Units to add; added to the existing line for the same product
    pub quantity: u32,
}

impl From<CreateCartLineRequest> for NewCartLine {
    fn from(request: CreateCartLineRequest) -> Self {
        NewCartLine {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Create Cart Line Handler
#[endpoint(
    tags("cart"),
    summary = "Add Product to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart line created or increased"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let line = state
        .app
        .carts
        .add_line(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/lines/{}", line.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(line.into()))
}
