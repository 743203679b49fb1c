//! Collection resource: read access to a collection and the products in it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError, Pagination};
use crate::resources::common::Image;
use crate::resources::options::{GetOptions, ListOptions};
use crate::resources::product::Product;

const COLLECTIONS_BASE_PATH: &str = "collections";

/// A custom or smart collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Collection {
    /// The unique identifier of the collection.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// URL-friendly unique name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// The collection name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description, in HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,

    /// How products are ordered, e.g. `best-selling` or `manual`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,

    /// Suffix of the Liquid template used for the collection page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,

    /// The collection image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,

    /// `web` or `global`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,

    /// When the collection was published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// When the collection was last updated.
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct CollectionResponse {
    collection: Collection,
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

/// Collection endpoints.
#[async_trait]
pub trait CollectionService: Send + Sync {
    /// Fetches one collection.
    async fn get(&self, collection_id: u64, options: &GetOptions)
        -> Result<Collection, HttpError>;

    /// Lists the products in a collection.
    async fn list_products(
        &self,
        collection_id: u64,
        options: &ListOptions,
    ) -> Result<Vec<Product>, HttpError>;

    /// Lists the products in a collection along with the cursors for
    /// adjacent pages.
    async fn list_products_with_pagination(
        &self,
        collection_id: u64,
        options: &ListOptions,
    ) -> Result<(Vec<Product>, Pagination), HttpError>;
}

/// [`CollectionService`] bound to a client. Obtained from [`Client::collections`].
#[derive(Debug, Clone, Copy)]
pub struct Collections<'a> {
    client: &'a Client,
}

impl<'a> Collections<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionService for Collections<'_> {
    async fn get(
        &self,
        collection_id: u64,
        options: &GetOptions,
    ) -> Result<Collection, HttpError> {
        let path = format!("{COLLECTIONS_BASE_PATH}/{collection_id}.json");
        let response: CollectionResponse = self.client.get(&path, options).await?;
        Ok(response.collection)
    }

    async fn list_products(
        &self,
        collection_id: u64,
        options: &ListOptions,
    ) -> Result<Vec<Product>, HttpError> {
        let (products, _) = self
            .list_products_with_pagination(collection_id, options)
            .await?;
        Ok(products)
    }

    async fn list_products_with_pagination(
        &self,
        collection_id: u64,
        options: &ListOptions,
    ) -> Result<(Vec<Product>, Pagination), HttpError> {
        let path = format!("{COLLECTIONS_BASE_PATH}/{collection_id}/products.json");
        let (response, pagination) = self
            .client
            .get_with_pagination::<ProductsResponse, _>(&path, options)
            .await?;
        Ok((response.products, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_deserializes_with_nulls() {
        let json = r#"{
            "collection": {
                "id": 25,
                "handle": "more-than-5",
                "title": "More than $5",
                "updated_at": "2024-03-01T12:00:00Z",
                "body_html": null,
                "sort_order": "best-selling",
                "template_suffix": null,
                "image": {"src": "https://cdn.shopify.com/collection.png", "width": 100, "height": 50},
                "published_at": null,
                "published_scope": "web"
            }
        }"#;
        let collection = serde_json::from_str::<CollectionResponse>(json)
            .unwrap()
            .collection;
        assert_eq!(collection.id, Some(25));
        assert_eq!(collection.body_html, None);
        assert_eq!(collection.image.unwrap().width, Some(100));
        assert!(collection.published_at.is_none());
    }
}
