//! Metafield resource, for the shop or scoped to an owning resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{Metafield, MetafieldService};
//!
//! let metafields = client.metafields("products", 632910392);
//! let created = metafields
//!     .create(&Metafield {
//!         namespace: Some("inventory".to_string()),
//!         key: Some("warehouse".to_string()),
//!         value: Some("25".to_string()),
//!         metafield_type: Some("number_integer".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError, InvalidHttpRequestError};
use crate::resources::options::{metafield_path_prefix, CountOptions, GetOptions, ListOptions};

/// Additional data attached to a shop or resource.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Metafield {
    /// The unique identifier of the metafield.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// Groups related metafields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Identifies the metafield within its namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// The stored value, formatted according to `metafield_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// The value type, e.g. `single_line_text_field` or `number_integer`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metafield_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Read-only field.
    #[serde(skip_serializing)]
    pub owner_id: Option<u64>,

    /// The owner's resource type, e.g. `shop` or `product`.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub owner_resource: Option<String>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub admin_graphql_api_id: Option<String>,
}

#[derive(Serialize)]
struct MetafieldRequest<'a> {
    metafield: &'a Metafield,
}

#[derive(Deserialize)]
struct MetafieldResponse {
    metafield: Metafield,
}

#[derive(Deserialize)]
struct MetafieldsResponse {
    metafields: Vec<Metafield>,
}

/// Metafield endpoints for the shop or one owning resource.
#[async_trait]
pub trait MetafieldService: Send + Sync {
    /// Lists metafields.
    async fn list(&self, options: &ListOptions) -> Result<Vec<Metafield>, HttpError>;

    /// Counts metafields.
    async fn count(&self, options: &CountOptions) -> Result<u64, HttpError>;

    /// Fetches one metafield.
    async fn get(&self, metafield_id: u64, options: &GetOptions) -> Result<Metafield, HttpError>;

    /// Creates a metafield.
    async fn create(&self, metafield: &Metafield) -> Result<Metafield, HttpError>;

    /// Updates the metafield identified by `metafield.id`.
    async fn update(&self, metafield: &Metafield) -> Result<Metafield, HttpError>;

    /// Deletes a metafield.
    async fn delete(&self, metafield_id: u64) -> Result<(), HttpError>;
}

/// [`MetafieldService`] bound to a client and an owner. Obtained from
/// [`Client::metafields`].
#[derive(Debug, Clone)]
pub struct Metafields<'a> {
    client: &'a Client,
    prefix: String,
}

impl<'a> Metafields<'a> {
    pub(crate) fn new(client: &'a Client, resource: &str, resource_id: u64) -> Self {
        Self {
            client,
            prefix: metafield_path_prefix(resource, resource_id),
        }
    }

    /// Returns the path prefix, e.g. `products/632910392/metafields`.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.prefix
    }
}

#[async_trait]
impl MetafieldService for Metafields<'_> {
    async fn list(&self, options: &ListOptions) -> Result<Vec<Metafield>, HttpError> {
        let path = format!("{}.json", self.prefix);
        let response: MetafieldsResponse = self.client.get(&path, options).await?;
        Ok(response.metafields)
    }

    async fn count(&self, options: &CountOptions) -> Result<u64, HttpError> {
        let path = format!("{}/count.json", self.prefix);
        self.client.count(&path, options).await
    }

    async fn get(&self, metafield_id: u64, options: &GetOptions) -> Result<Metafield, HttpError> {
        let path = format!("{}/{metafield_id}.json", self.prefix);
        let response: MetafieldResponse = self.client.get(&path, options).await?;
        Ok(response.metafield)
    }

    async fn create(&self, metafield: &Metafield) -> Result<Metafield, HttpError> {
        let path = format!("{}.json", self.prefix);
        let response: MetafieldResponse = self
            .client
            .post(&path, &MetafieldRequest { metafield })
            .await?;
        Ok(response.metafield)
    }

    async fn update(&self, metafield: &Metafield) -> Result<Metafield, HttpError> {
        let metafield_id = metafield
            .id
            .ok_or(InvalidHttpRequestError::MissingResourceId {
                resource: "metafield",
            })?;
        let path = format!("{}/{metafield_id}.json", self.prefix);
        let response: MetafieldResponse = self
            .client
            .put(&path, &MetafieldRequest { metafield })
            .await?;
        Ok(response.metafield)
    }

    async fn delete(&self, metafield_id: u64) -> Result<(), HttpError> {
        self.client
            .delete(&format!("{}/{metafield_id}.json", self.prefix))
            .await
    }
}
