use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_catalog::Product;
use vendora_core::{Page, PageRequest};
use vendora_sales::ReportPeriod;

// -------------------------
// Request DTOs
// -------------------------

/// Body for product create/update; the same attribute set either way.
#[derive(Debug, Deserialize)]
pub struct ProductBodyRequest {
    pub brand_name: String,
    pub color: String,
    pub price: Decimal,
    pub weight: i64,
    pub length: i64,
    pub quantity: i64,
}

/// Paging query parameters; both optional with page 0 / size 20 defaults.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(rename = "pageNumber")]
    pub page_number: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

impl PageParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::of(
            self.page_number.unwrap_or(PageRequest::DEFAULT_PAGE),
            self.page_size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub product_id: i64,
    pub product_type: i16,
    pub quantity: i64,
}

/// Report boundaries; months default to the full year when omitted.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    pub start_year: i32,
    #[serde(default = "default_end_month")]
    pub end_month: u32,
    pub end_year: i32,
}

fn default_start_month() -> u32 {
    ReportPeriod::DEFAULT_START_MONTH
}

fn default_end_month() -> u32 {
    ReportPeriod::DEFAULT_END_MONTH
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: i64,
    pub brand_name: String,
    pub color: String,
    pub price: Decimal,
    pub weight: i64,
    pub length: i64,
    pub quantity: i64,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            brand_name: product.details.brand_name,
            color: product.details.color,
            price: product.details.price,
            weight: product.details.weight,
            length: product.details.length,
            quantity: product.details.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListDto {
    pub page_number: u32,
    pub page_size: u32,
    pub number_of_elements: usize,
    pub total_elements: usize,
    pub content: Vec<ProductDto>,
}

impl From<Page<Product>> for ProductListDto {
    fn from(page: Page<Product>) -> Self {
        let page = page.map(ProductDto::from);
        Self {
            page_number: page.page_number,
            page_size: page.page_size,
            number_of_elements: page.number_of_elements,
            total_elements: page.total_elements,
            content: page.content,
        }
    }
}
