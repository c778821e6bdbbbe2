use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;

use vendora_catalog::{Product, ProductCategory, ProductDetails};
use vendora_core::{Page, ProductId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Product routes for one category; the category rides along as an extension.
pub fn router(category: ProductCategory) -> Router {
    Router::new()
        .route("/all", get(list_products))
        .route("/:id", get(get_product))
        .route("/:id/color", get(get_color))
        .route("/:id/brand_name", get(get_brand_name))
        .route("/:id/price", get(get_price))
        .route("/:id/weight", get(get_weight))
        .route("/:id/length", get(get_length))
        .route("/colors/:color", get(list_by_color))
        .route("/price/:price", get(list_by_price))
        .route("/create", post(create_product))
        .route("/update/:id", put(update_product))
        .route("/delete/:id", delete(delete_product))
        .layer(Extension(category))
}

fn not_found(category: ProductCategory) -> axum::response::Response {
    errors::text_response(
        StatusCode::BAD_REQUEST,
        format!("{} not found!", category.display_name()),
    )
}

fn parse_id(category: ProductCategory, raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse().map_err(|_| not_found(category))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Query(params): Query<dto::PageParams>,
) -> axum::response::Response {
    let page = params.to_request();
    match services.inventory.list(category, page).await {
        Ok(products) => {
            Json(dto::ProductListDto::from(Page::from_content(page, products))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(category, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.inventory.get(category, id).await {
        Ok(Some(product)) => Json(dto::ProductDto::from(product)).into_response(),
        Ok(None) => not_found(category),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Shared lookup for the single-attribute endpoints: fetch once, render one
/// field as plain text.
async fn product_field(
    services: Arc<AppServices>,
    category: ProductCategory,
    raw_id: String,
    render: impl FnOnce(Product) -> String,
) -> axum::response::Response {
    let id = match parse_id(category, &raw_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.inventory.get(category, id).await {
        Ok(Some(product)) => errors::text_response(StatusCode::OK, render(product)),
        Ok(None) => not_found(category),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_color(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
) -> axum::response::Response {
    product_field(services, category, id, |p| p.details.color).await
}

pub async fn get_brand_name(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
) -> axum::response::Response {
    product_field(services, category, id, |p| p.details.brand_name).await
}

pub async fn get_price(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
) -> axum::response::Response {
    product_field(services, category, id, |p| format!("{:.2} lv.", p.unit_price())).await
}

pub async fn get_weight(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
) -> axum::response::Response {
    product_field(services, category, id, |p| format!("{} kg.", p.details.weight)).await
}

pub async fn get_length(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
) -> axum::response::Response {
    product_field(services, category, id, |p| format!("{} cm.", p.details.length)).await
}

pub async fn list_by_color(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(color): Path<String>,
    Query(params): Query<dto::PageParams>,
) -> axum::response::Response {
    let page = params.to_request();
    match services.inventory.find_by_color(category, &color, page).await {
        Ok(products) => {
            Json(dto::ProductListDto::from(Page::from_content(page, products))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_by_price(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(price): Path<String>,
    Query(params): Query<dto::PageParams>,
) -> axum::response::Response {
    let ceiling: Decimal = match price.parse() {
        Ok(v) if v >= Decimal::ZERO => v,
        _ => return errors::text_response(StatusCode::BAD_REQUEST, "Invalid price!"),
    };
    let page = params.to_request();
    match services
        .inventory
        .find_by_max_price(category, ceiling, page)
        .await
    {
        Ok(products) => {
            Json(dto::ProductListDto::from(Page::from_content(page, products))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Json(body): Json<dto::ProductBodyRequest>,
) -> axum::response::Response {
    let details = match ProductDetails::validated(
        body.brand_name,
        body.color,
        body.price,
        body.weight,
        body.length,
        body.quantity,
    ) {
        Ok(d) => d,
        Err(_) => {
            return errors::text_response(
                StatusCode::BAD_REQUEST,
                format!("{} not created!", category.display_name()),
            );
        }
    };

    match services.inventory.create(category, &details).await {
        Ok(id) => {
            tracing::info!(category = category.table(), id = id.get(), "product created");
            errors::text_response(
                StatusCode::OK,
                format!("{} successfully created!", category.display_name()),
            )
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
    Json(body): Json<dto::ProductBodyRequest>,
) -> axum::response::Response {
    let not_updated = || {
        errors::text_response(
            StatusCode::BAD_REQUEST,
            format!("{} not updated!", category.display_name()),
        )
    };

    let id = match parse_id(category, &id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let details = match ProductDetails::validated(
        body.brand_name,
        body.color,
        body.price,
        body.weight,
        body.length,
        body.quantity,
    ) {
        Ok(d) => d,
        Err(_) => return not_updated(),
    };

    match services
        .inventory
        .update(category, &Product::new(id, details))
        .await
    {
        Ok(true) => errors::text_response(
            StatusCode::OK,
            format!("{} successfully updated!", category.display_name()),
        ),
        Ok(false) => not_updated(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(category): Extension<ProductCategory>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let not_deleted = || {
        errors::text_response(
            StatusCode::BAD_REQUEST,
            format!("{} not deleted!", category.display_name()),
        )
    };

    let id = match parse_id(category, &id) {
        Ok(v) => v,
        Err(_) => return not_deleted(),
    };
    match services.inventory.delete(category, id).await {
        Ok(true) => errors::text_response(
            StatusCode::OK,
            format!("{} successfully deleted!", category.display_name()),
        ),
        Ok(false) => not_deleted(),
        Err(e) => errors::store_error_to_response(e),
    }
}
