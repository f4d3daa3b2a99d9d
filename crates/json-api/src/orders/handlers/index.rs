//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The caller's orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, records::OrderUuid};

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service};

    use super::*;

    #[tokio::test]
    async fn test_index_returns_orders_in_service_order() -> TestResult {
        let newer = OrderUuid::new();
        let older = OrderUuid::new();

        let mut repo = MockOrdersService::new();

        repo.expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![make_order(newer), make_order(older)]));

        let body: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&orders_service(repo, Router::with_path("orders").get(handler)))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = body.orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, vec![newer.into_uuid(), older.into_uuid()]);

        Ok(())
    }
}
