//! Product Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use hilo_app::domain::products::ProductsServiceError;

use crate::observability::record_stock_rejection;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Store does not exist")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::EmptyUpdate
        | ProductsServiceError::InvalidPrice
        | ProductsServiceError::InvalidQuantity => StatusError::bad_request().brief(error.to_string()),
        ProductsServiceError::InsufficientStock { .. } => {
            warn!("{error}");
            record_stock_rejection("adjustment");

            StatusError::bad_request().brief(error.to_string())
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
