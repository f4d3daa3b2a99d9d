//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::MissingShippingAddress => {
            StatusError::bad_request().brief("Shipping address is required")
        }
        OrdersServiceError::CartEmpty => StatusError::bad_request().brief("Cart is empty"),
        error @ OrdersServiceError::InsufficientStock { .. } => StatusError::bad_request()
            .brief("Insufficient stock")
            .detail(error.to_string()),
        OrdersServiceError::TotalOverflow => {
            StatusError::bad_request().brief("Order total is too large")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront_app::domain::products::records::ProductUuid;

    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        for error in [
            OrdersServiceError::MissingShippingAddress,
            OrdersServiceError::CartEmpty,
            OrdersServiceError::TotalOverflow,
        ] {
            assert_eq!(into_status_error(error).code.as_u16(), 400);
        }
    }

    #[test]
    fn insufficient_stock_detail_names_the_product() {
        let status = into_status_error(OrdersServiceError::InsufficientStock {
            product_uuid: ProductUuid::new(),
            product_name: "Teapot".to_string(),
            requested: 3,
            available: 2,
        });

        assert_eq!(status.code.as_u16(), 400);
        assert_eq!(
            status.detail.as_deref(),
            Some("insufficient stock for Teapot: requested 3, available 2")
        );
    }

    #[test]
    fn storage_errors_hide_details() {
        let status = into_status_error(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(status.code.as_u16(), 500);
        assert!(status.detail.is_none(), "storage details must not leak");
    }
}
