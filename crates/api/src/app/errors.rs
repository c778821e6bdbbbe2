use axum::http::StatusCode;
use axum::response::IntoResponse;

use vendora_core::StoreError;
use vendora_sales::SaleError;

/// Plain-text response. The confirmation and error texts are part of the API
/// contract, so handlers pass them through verbatim.
pub fn text_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, message.into()).into_response()
}

pub fn sale_error_to_response(err: SaleError) -> axum::response::Response {
    match err {
        SaleError::UnknownProductType(_) => text_response(
            StatusCode::BAD_REQUEST,
            "Sale not created! No such product type exists.",
        ),
        SaleError::ProductNotFound => text_response(
            StatusCode::BAD_REQUEST,
            "Sale not created! No such product exists.",
        ),
        SaleError::OutOfStock => text_response(
            StatusCode::BAD_REQUEST,
            "Sale not created! Not such products are left.",
        ),
        SaleError::InvalidQuantity => text_response(
            StatusCode::BAD_REQUEST,
            "Sale not created! Quantity must be positive.",
        ),
        SaleError::Persistence(msg) => {
            tracing::error!(error = %msg, "sale failed on persistence");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "Sale not created!")
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store operation failed");
    text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
