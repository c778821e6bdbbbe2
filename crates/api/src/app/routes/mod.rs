use axum::Router;

use vendora_catalog::ProductCategory;

pub mod products;
pub mod sales;
pub mod system;

/// Router for all `/api/v1` endpoints.
///
/// The three product categories share one handler set; each mount carries its
/// category as an `Extension`.
pub fn router() -> Router {
    let api = Router::new()
        .nest("/cars", products::router(ProductCategory::Car))
        .nest("/phones", products::router(ProductCategory::Phone))
        .nest("/tvs", products::router(ProductCategory::Tv))
        .nest("/sales", sales::router());

    Router::new().nest("/api/v1", api)
}
