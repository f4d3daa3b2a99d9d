//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::{DEFAULT_PRODUCTS_LIMIT, ProductFilter};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns listed products, newest first.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let filter = ProductFilter {
        category: category.into_inner(),
        search: search.into_inner().filter(|term| !term.trim().is_empty()),
        limit: limit.into_inner().unwrap_or(DEFAULT_PRODUCTS_LIMIT),
        offset: offset.into_inner().unwrap_or_default(),
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
