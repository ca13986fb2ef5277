//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use hilo_app::domain::orders::OrdersServiceError;

use crate::observability::record_stock_rejection;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::StoreNotFound | OrdersServiceError::ProductNotFound(_) => {
            StatusError::not_found().brief(error.to_string())
        }
        OrdersServiceError::InsufficientStock { .. } => {
            warn!("{error}");
            record_stock_rejection("order");

            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::EmptyOrder
        | OrdersServiceError::InvalidQuantity(_)
        | OrdersServiceError::MissingField(_)
        | OrdersServiceError::ProductUnavailable(_)
        | OrdersServiceError::ProductFromOtherStore(_)
        | OrdersServiceError::IllegalTransition(_)
        | OrdersServiceError::EmptyUpdate
        | OrdersServiceError::Amount(_) => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::Conflict => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
