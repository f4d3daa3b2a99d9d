//! Update Cart Line Handler

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
    carts::{errors::into_status_error, get::CartLineResponse},
    extensions::*,
    state::State,
};

/// Update Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartLineRequest {
    /// New quantity; must be at least 1
    pub quantity: u32,
}

/// Update Cart Line Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Line Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart line updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    json: JsonBody<UpdateCartLineRequest>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let line = state
        .app
        .carts
        .update_line(user, line.into_inner().into(), json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, records::CartLineUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart_line};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("cart/lines/{line}").put(handler))
    }

    #[tokio::test]
    async fn test_update_line_success() -> TestResult {
        let line = CartLineUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_update_line()
            .once()
            .withf(move |user, l, quantity| *user == TEST_USER_UUID && *l == line && *quantity == 4)
            .return_once(move |_, _, _| Ok(make_cart_line(line, ProductUuid::new(), 4)));

        let body: CartLineResponse = TestClient::put(format!("http://example.com/cart/lines/{line}"))
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(body.quantity, 4);
        assert_eq!(body.subtotal, 4_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_line_zero_quantity_returns_400() -> TestResult {
        let line = CartLineUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_update_line()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::put(format!("http://example.com/cart/lines/{line}"))
            .json(&json!({ "quantity": 0 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_line_returns_404() -> TestResult {
        let line = CartLineUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_update_line()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/cart/lines/{line}"))
            .json(&json!({ "quantity": 1 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
