use std::sync::Arc;

use chrono::{Datelike, TimeZone, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use vendora_api::app::{build_app_with, services};
use vendora_catalog::ProductCategory;
use vendora_core::ProductId;
use vendora_sales::Sale;

struct TestServer {
    base_url: String,
    services: Arc<services::AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over in-memory stores, bound to an ephemeral port.
        let services = Arc::new(services::build_in_memory_services());
        let app = build_app_with(services.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            services,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn product_body(brand: &str, color: &str, price: &str, quantity: i64) -> serde_json::Value {
    json!({
        "brand_name": brand,
        "color": color,
        "price": price,
        "weight": 2,
        "length": 15,
        "quantity": quantity,
    })
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_lifecycle_create_get_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/cars/create", srv.base_url))
        .json(&product_body("Opel", "red", "10500.00", 3))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Car successfully created!");

    let res = client
        .get(format!("{}/api/v1/cars/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["brand_name"], "Opel");
    assert_eq!(body["quantity"], 3);

    let res = client
        .put(format!("{}/api/v1/cars/update/1", srv.base_url))
        .json(&product_body("Opel", "green", "9999.99", 2))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Car successfully updated!");

    let res = client
        .get(format!("{}/api/v1/cars/1/color", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "green");

    let res = client
        .delete(format!("{}/api/v1/cars/delete/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Car successfully deleted!");

    let res = client
        .get(format!("{}/api/v1/cars/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Car not found!");
}

#[tokio::test]
async fn single_attribute_endpoints_render_units() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/phones/create", srv.base_url))
        .json(&product_body("Nokia", "blue", "399.99", 5))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let price = client
        .get(format!("{}/api/v1/phones/1/price", srv.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(price, "399.99 lv.");

    let weight = client
        .get(format!("{}/api/v1/phones/1/weight", srv.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(weight, "2 kg.");

    let length = client
        .get(format!("{}/api/v1/phones/1/length", srv.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(length, "15 cm.");

    let brand = client
        .get(format!("{}/api/v1/phones/1/brand_name", srv.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(brand, "Nokia");

    // Missing ids answer with the category text, not a bare 404.
    let res = client
        .get(format!("{}/api/v1/phones/99/price", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Phone not found!");
}

#[tokio::test]
async fn listing_and_filters_page_and_sort() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (brand, color, price) in [
        ("LG", "black", "500.00"),
        ("Sony", "dark grey", "900.00"),
        ("Samsung", "grey", "700.00"),
    ] {
        let res = client
            .post(format!("{}/api/v1/tvs/create", srv.base_url))
            .json(&product_body(brand, color, price, 1))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(format!(
            "{}/api/v1/tvs/all?pageNumber=0&pageSize=2",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["pageNumber"], 0);
    assert_eq!(body["pageSize"], 2);
    assert_eq!(body["numberOfElements"], 2);
    assert_eq!(body["content"][0]["id"], 1);
    assert_eq!(body["content"][1]["id"], 2);

    // Substring color match, most expensive first.
    let res = client
        .get(format!("{}/api/v1/tvs/colors/grey", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["numberOfElements"], 2);
    assert_eq!(body["content"][0]["brand_name"], "Sony");
    assert_eq!(body["content"][1]["brand_name"], "Samsung");

    // Inclusive price ceiling.
    let res = client
        .get(format!("{}/api/v1/tvs/price/700", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["numberOfElements"], 2);
    assert_eq!(body["content"][0]["brand_name"], "Samsung");

    let res = client
        .get(format!("{}/api/v1/tvs/price/not-a-number", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Invalid price!");
}

#[tokio::test]
async fn create_rejects_invalid_bodies_with_the_category_text() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/cars/create", srv.base_url))
        .json(&product_body("", "red", "100.00", 1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Car not created!");
}

#[tokio::test]
async fn sale_clamps_to_available_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/phones/create", srv.base_url))
        .json(&product_body("Nokia", "blue", "1.00", 1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // One unit in stock, two requested: the sale succeeds for one unit.
    let res = client
        .post(format!("{}/api/v1/sales/create", srv.base_url))
        .json(&json!({"product_id": 1, "product_type": 2, "quantity": 2}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Sale successfully created!");

    let res = client
        .get(format!("{}/api/v1/phones/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["quantity"], 0);

    // Stock is exhausted now.
    let res = client
        .post(format!("{}/api/v1/sales/create", srv.base_url))
        .json(&json!({"product_id": 1, "product_type": 2, "quantity": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.text().await.unwrap(),
        "Sale not created! Not such products are left."
    );
}

#[tokio::test]
async fn sale_rejects_bad_product_references() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/sales/create", srv.base_url))
        .json(&json!({"product_id": 1, "product_type": 7, "quantity": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.text().await.unwrap(),
        "Sale not created! No such product type exists."
    );

    let res = client
        .post(format!("{}/api/v1/sales/create", srv.base_url))
        .json(&json!({"product_id": 42, "product_type": 1, "quantity": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.text().await.unwrap(),
        "Sale not created! No such product exists."
    );
}

#[tokio::test]
async fn report_totals_recorded_sales() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Seed the ledger at a fixed mid-year date so the boundary math (ranges
    // end on the first day of the end month) cannot clip it.
    let current_year = Utc::now().year();
    let sale_date = Utc.with_ymd_and_hms(current_year, 6, 15, 9, 0, 0).unwrap();
    srv.services
        .ledger
        .create(&Sale {
            product_id: ProductId::new(1),
            nb_sold: 4,
            sale_date,
            product_type: ProductCategory::Tv,
            price: Decimal::new(100000, 2),
        })
        .await
        .unwrap();

    let year = current_year.to_string();
    let res = client
        .get(format!(
            "{}/api/v1/sales/report?start_year={year}&end_year={year}",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.text().await.unwrap(),
        "Products sold: 4; Final profit: 1000.00 lv."
    );

    // Months outside 1..=12 are the one thing the report rejects.
    let res = client
        .get(format!(
            "{}/api/v1/sales/report?start_month=0&start_year={year}&end_year={year}",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
