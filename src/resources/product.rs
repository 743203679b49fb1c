//! Product resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{ProductListOptions, ProductService};
//!
//! let (products, pagination) = client
//!     .products()
//!     .list_with_pagination(&ProductListOptions::default())
//!     .await?;
//! for product in &products {
//!     println!("{}", product.title.as_deref().unwrap_or(""));
//! }
//! if let Some(next) = pagination.next_page_options {
//!     let options = ProductListOptions::from(next);
//!     let more = client.products().list(&options).await?;
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError, InvalidHttpRequestError, PageOptions, Pagination};
use crate::resources::common::Image;
use crate::resources::options::{CountOptions, GetOptions, ListOptions};

const PRODUCTS_BASE_PATH: &str = "products";

/// A product in a Shopify store.
///
/// Read-only fields are never sent back on create or update.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Product {
    /// The unique identifier of the product.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description, in HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,

    /// The product's vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// A categorization used for filtering and searching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// URL-friendly unique name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// `active`, `archived` or `draft`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Comma-separated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    /// `web` or `global`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,

    /// Suffix of the Liquid template used for the product page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,

    /// Product options such as size or color.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ProductOption>,

    /// Product variants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,

    /// Product images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,

    /// The featured image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,

    /// When the product was published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// When the product was created.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    /// The admin GraphQL API ID.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub admin_graphql_api_id: Option<String>,
}

/// A product option, e.g. `Size` with values `S`, `M`, `L`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Price as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_item_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
}

/// Options for listing products.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductListOptions {
    /// Common list options.
    #[serde(flatten)]
    pub list: ListOptions,

    /// Only products in this collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,

    /// Filter by product type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// Filter by handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Only products published at or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at_min: Option<DateTime<Utc>>,

    /// Only products published at or before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at_max: Option<DateTime<Utc>>,

    /// `published`, `unpublished` or `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_status: Option<String>,

    /// Comma-separated currency codes for presentment prices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentment_currencies: Option<String>,
}

impl From<PageOptions> for ProductListOptions {
    fn from(page: PageOptions) -> Self {
        Self {
            list: page.into(),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct ProductRequest<'a> {
    product: &'a Product,
}

#[derive(Deserialize)]
struct ProductResponse {
    product: Product,
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

/// Product endpoints.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Lists products.
    async fn list(&self, options: &ProductListOptions) -> Result<Vec<Product>, HttpError>;

    /// Lists products along with the cursors for adjacent pages.
    async fn list_with_pagination(
        &self,
        options: &ProductListOptions,
    ) -> Result<(Vec<Product>, Pagination), HttpError>;

    /// Counts products.
    async fn count(&self, options: &CountOptions) -> Result<u64, HttpError>;

    /// Fetches one product.
    async fn get(&self, product_id: u64, options: &GetOptions) -> Result<Product, HttpError>;

    /// Creates a product.
    async fn create(&self, product: &Product) -> Result<Product, HttpError>;

    /// Updates the product identified by `product.id`.
    async fn update(&self, product: &Product) -> Result<Product, HttpError>;

    /// Deletes a product.
    async fn delete(&self, product_id: u64) -> Result<(), HttpError>;
}

/// [`ProductService`] bound to a client. Obtained from [`Client::products`].
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a Client,
}

impl<'a> Products<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductService for Products<'_> {
    async fn list(&self, options: &ProductListOptions) -> Result<Vec<Product>, HttpError> {
        let (products, _) = self.list_with_pagination(options).await?;
        Ok(products)
    }

    async fn list_with_pagination(
        &self,
        options: &ProductListOptions,
    ) -> Result<(Vec<Product>, Pagination), HttpError> {
        let path = format!("{PRODUCTS_BASE_PATH}.json");
        let (response, pagination) = self
            .client
            .get_with_pagination::<ProductsResponse, _>(&path, options)
            .await?;
        Ok((response.products, pagination))
    }

    async fn count(&self, options: &CountOptions) -> Result<u64, HttpError> {
        let path = format!("{PRODUCTS_BASE_PATH}/count.json");
        self.client.count(&path, options).await
    }

    async fn get(&self, product_id: u64, options: &GetOptions) -> Result<Product, HttpError> {
        let path = format!("{PRODUCTS_BASE_PATH}/{product_id}.json");
        let response: ProductResponse = self.client.get(&path, options).await?;
        Ok(response.product)
    }

    async fn create(&self, product: &Product) -> Result<Product, HttpError> {
        let path = format!("{PRODUCTS_BASE_PATH}.json");
        let response: ProductResponse = self
            .client
            .post(&path, &ProductRequest { product })
            .await?;
        Ok(response.product)
    }

    async fn update(&self, product: &Product) -> Result<Product, HttpError> {
        let product_id = product
            .id
            .ok_or(InvalidHttpRequestError::MissingResourceId { resource: "product" })?;
        let path = format!("{PRODUCTS_BASE_PATH}/{product_id}.json");
        let response: ProductResponse = self
            .client
            .put(&path, &ProductRequest { product })
            .await?;
        Ok(response.product)
    }

    async fn delete(&self, product_id: u64) -> Result<(), HttpError> {
        self.client
            .delete(&format!("{PRODUCTS_BASE_PATH}/{product_id}.json"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_read_only_fields_are_not_serialized() {
        let product = Product {
            id: Some(1),
            title: Some("Shirt".to_string()),
            created_at: Some(Utc::now()),
            admin_graphql_api_id: Some("gid://shopify/Product/1".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(ProductRequest { product: &product }).unwrap();
        assert_eq!(json, serde_json::json!({"product": {"title": "Shirt"}}));
    }

    #[test]
    fn test_product_deserializes_api_payload() {
        let json = r#"{
            "product": {
                "id": 632910392,
                "title": "IPod Nano - 8GB",
                "vendor": "Apple",
                "product_type": "Cult Products",
                "created_at": "2024-01-02T09:28:43-05:00",
                "handle": "ipod-nano",
                "tags": "Emotive, Flash Memory",
                "options": [{"id": 594680422, "product_id": 632910392, "name": "Color", "position": 1, "values": ["Pink", "Red"]}],
                "variants": [{"id": 808950810, "product_id": 632910392, "title": "Pink", "price": "199.00", "sku": "IPOD2008PINK", "option1": "Pink"}],
                "images": [],
                "image": null,
                "unknown_field": true
            }
        }"#;

        let product = serde_json::from_str::<ProductResponse>(json).unwrap().product;
        assert_eq!(product.id, Some(632_910_392));
        assert_eq!(product.options[0].values, vec!["Pink", "Red"]);
        assert_eq!(product.variants[0].price.as_deref(), Some("199.00"));
        assert_eq!(
            product.created_at.unwrap().to_rfc3339(),
            "2024-01-02T14:28:43+00:00"
        );
        assert!(product.image.is_none());
    }

    #[test]
    fn test_product_list_options_flatten_common_options() {
        let options = ProductListOptions {
            list: ListOptions {
                limit: Some(10),
                ..Default::default()
            },
            collection_id: Some(42),
            ..Default::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!({"limit": 10, "collection_id": 42}));
    }
}
