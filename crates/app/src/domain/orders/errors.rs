//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("shipping address is required")]
    MissingShippingAddress,

    #[error("cart is empty")]
    CartEmpty,

    #[error(
        "insufficient stock for {product_name}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_uuid: ProductUuid,
        product_name: String,
        requested: u32,
        available: u32,
    },

    #[error("order total overflows")]
    TotalOverflow,

    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Whether the caller can fix the request and try again.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Sql(_))
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
    }

    #[test]
    fn encode_failures_are_storage_errors() {
        let error = OrdersServiceError::from(Error::Encode("position out of range".into()));

        assert!(matches!(error, OrdersServiceError::Sql(_)), "got {error:?}");
    }

    #[test]
    fn storage_failures_are_not_rejections() {
        let error = OrdersServiceError::from(Error::PoolTimedOut);

        assert!(matches!(error, OrdersServiceError::Sql(_)));
        assert!(!error.is_rejection());
        assert!(OrdersServiceError::CartEmpty.is_rejection());
    }

    #[test]
    fn insufficient_stock_names_the_product() {
        let error = OrdersServiceError::InsufficientStock {
            product_uuid: ProductUuid::new(),
            product_name: "Teapot".to_string(),
            requested: 3,
            available: 2,
        };

        assert_eq!(
            error.to_string(),
            "insufficient stock for Teapot: requested 3, available 2"
        );
    }
}
