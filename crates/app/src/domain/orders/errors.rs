//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    orders::{status::IllegalTransition, totals::TotalsError},
    products::records::ProductUuid,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("store not found")]
    StoreNotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("order must contain at least one item")]
    EmptyOrder,

    #[error("quantity for product {0} must be greater than zero")]
    InvalidQuantity(ProductUuid),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("product {0} is not available")]
    ProductUnavailable(ProductUuid),

    #[error("product {0} does not belong to this store")]
    ProductFromOtherStore(ProductUuid),

    #[error(
        "insufficient stock for product {product}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        product: ProductUuid,
        available: u64,
        requested: u64,
    },

    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),

    #[error("update must change status, notes or payment")]
    EmptyUpdate,

    #[error(transparent)]
    Amount(#[from] TotalsError),

    #[error("order already exists")]
    Conflict,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
