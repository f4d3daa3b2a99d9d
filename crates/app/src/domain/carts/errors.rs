//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("insufficient stock for product {product_uuid}: requested {requested}, available {available}")]
    InsufficientStock {
        product_uuid: ProductUuid,
        requested: u32,
        available: u32,
    },

    #[error("cart total overflows")]
    TotalOverflow,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(error, Error::Encode(_)) {
            return Self::InvalidQuantity;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            _ => Self::Sql(error),
        }
    }
}
