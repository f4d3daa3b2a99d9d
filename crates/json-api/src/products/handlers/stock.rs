//! Adjust Product Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Stock Adjustment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdjustStockRequest {
    /// Signed change, e.g. `12` for a delivery or `-1` for a write-off
    pub delta: i64,
}

/// Adjust Product Stock Handler
#[endpoint(
    tags("products"),
    summary = "Adjust Product Stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock adjusted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Stock would go below zero"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AdjustStockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let product = state
        .app
        .products
        .adjust_stock(product.into_inner().into(), json.into_inner().delta)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
