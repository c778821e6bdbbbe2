use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    routing::{get, post},
};

use vendora_core::ProductId;
use vendora_sales::ReportPeriod;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/create", post(create_sale))
        .route("/report", get(report))
}

pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSaleRequest>,
) -> axum::response::Response {
    match services
        .processor
        .create_sale(
            ProductId::new(body.product_id),
            body.product_type,
            body.quantity,
        )
        .await
    {
        Ok(receipt) => {
            tracing::info!(
                sale_id = receipt.sale_id.get(),
                product_id = receipt.product_id.get(),
                category = receipt.product_type.table(),
                nb_sold = receipt.nb_sold,
                "sale recorded"
            );
            errors::text_response(StatusCode::OK, "Sale successfully created!")
        }
        Err(e) => errors::sale_error_to_response(e),
    }
}

pub async fn report(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ReportParams>,
) -> axum::response::Response {
    // Months are rejected here; years are normalized further down, never
    // rejected.
    if !(1..=12).contains(&params.start_month) || !(1..=12).contains(&params.end_month) {
        return errors::text_response(
            StatusCode::BAD_REQUEST,
            "Report months must be between 1 and 12.",
        );
    }

    let period = ReportPeriod {
        start_month: params.start_month,
        start_year: params.start_year,
        end_month: params.end_month,
        end_year: params.end_year,
    };
    match services.processor.report(period).await {
        Ok(report) => errors::text_response(StatusCode::OK, report.to_string()),
        Err(e) => errors::sale_error_to_response(e),
    }
}
