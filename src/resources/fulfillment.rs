//! Fulfillment resource, scoped to a parent such as an order.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{FulfillmentService, ListOptions};
//!
//! let fulfillments = client.fulfillments("orders", 450789469);
//! let all = fulfillments.list(&ListOptions::default()).await?;
//! let cancelled = fulfillments.cancel(all[0].id.unwrap()).await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError, InvalidHttpRequestError};
use crate::resources::common::LineItem;
use crate::resources::options::{fulfillment_path_prefix, CountOptions, GetOptions, ListOptions};

/// A fulfillment: a shipment of some or all line items of an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Fulfillment {
    /// The unique identifier of the fulfillment.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The order this fulfillment belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,

    /// `pending`, `open`, `success`, `cancelled`, `error` or `failure`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The fulfillment service, e.g. `manual`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Carrier-reported delivery status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_status: Option<String>,

    /// The location the items ship from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<OriginAddress>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracking_numbers: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracking_urls: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,

    /// A unique name such as `#1001.1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Read-only field.
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// Read-only field.
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Read-only field.
    #[serde(skip_serializing)]
    pub admin_graphql_api_id: Option<String>,
}

/// The payload for creating a fulfillment from fulfillment orders.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FulfillmentInfo {
    /// The fulfillment order line items to fulfill.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items_by_fulfillment_order: Vec<FulfillmentOrderItem>,

    /// A message for the fulfillment request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Whether the customer is notified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_customer: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<OriginAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_info: Option<TrackingInfo>,
}

/// The line items of one fulfillment order to fulfill.
///
/// An empty `fulfillment_order_line_items` fulfills every remaining item.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FulfillmentOrderItem {
    pub fulfillment_order_id: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_order_line_items: Vec<FulfillmentLineItem>,
}

/// A fulfillment order line item and the quantity to fulfill.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FulfillmentLineItem {
    pub id: u64,
    pub quantity: u64,
}

/// The address items ship from.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OriginAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Carrier tracking details.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrackingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Payment gateway receipt attached to a fulfillment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Receipt {
    #[serde(rename = "testcase", skip_serializing_if = "Option::is_none")]
    pub test_case: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
}

#[derive(Serialize)]
struct FulfillmentRequest<'a> {
    fulfillment: &'a Fulfillment,
}

#[derive(Serialize)]
struct FulfillmentInfoRequest<'a> {
    fulfillment: &'a FulfillmentInfo,
}

#[derive(Deserialize)]
struct FulfillmentResponse {
    fulfillment: Fulfillment,
}

#[derive(Deserialize)]
struct FulfillmentsResponse {
    fulfillments: Vec<Fulfillment>,
}

/// Fulfillment endpoints under one parent resource.
#[async_trait]
pub trait FulfillmentService: Send + Sync {
    /// Lists fulfillments.
    async fn list(&self, options: &ListOptions) -> Result<Vec<Fulfillment>, HttpError>;

    /// Counts fulfillments.
    async fn count(&self, options: &CountOptions) -> Result<u64, HttpError>;

    /// Fetches one fulfillment.
    async fn get(&self, fulfillment_id: u64, options: &GetOptions)
        -> Result<Fulfillment, HttpError>;

    /// Creates a fulfillment.
    async fn create(&self, info: &FulfillmentInfo) -> Result<Fulfillment, HttpError>;

    /// Updates the fulfillment identified by `fulfillment.id`.
    async fn update(&self, fulfillment: &Fulfillment) -> Result<Fulfillment, HttpError>;

    /// Marks a fulfillment as complete.
    async fn complete(&self, fulfillment_id: u64) -> Result<Fulfillment, HttpError>;

    /// Transitions a fulfillment to `open`.
    async fn transition(&self, fulfillment_id: u64) -> Result<Fulfillment, HttpError>;

    /// Cancels a fulfillment.
    async fn cancel(&self, fulfillment_id: u64) -> Result<Fulfillment, HttpError>;
}

/// [`FulfillmentService`] bound to a client and a parent resource. Obtained
/// from [`Client::fulfillments`].
#[derive(Debug, Clone)]
pub struct Fulfillments<'a> {
    client: &'a Client,
    prefix: String,
}

impl<'a> Fulfillments<'a> {
    pub(crate) fn new(client: &'a Client, resource: &str, resource_id: u64) -> Self {
        Self {
            client,
            prefix: fulfillment_path_prefix(resource, resource_id),
        }
    }

    /// Returns the path prefix, e.g. `orders/450789469/fulfillments`.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.prefix
    }

    async fn post_action(&self, fulfillment_id: u64, action: &str) -> Result<Fulfillment, HttpError> {
        let path = format!("{}/{fulfillment_id}/{action}.json", self.prefix);
        let response: FulfillmentResponse = self.client.post(&path, &()).await?;
        Ok(response.fulfillment)
    }
}

#[async_trait]
impl FulfillmentService for Fulfillments<'_> {
    async fn list(&self, options: &ListOptions) -> Result<Vec<Fulfillment>, HttpError> {
        let path = format!("{}.json", self.prefix);
        let response: FulfillmentsResponse = self.client.get(&path, options).await?;
        Ok(response.fulfillments)
    }

    async fn count(&self, options: &CountOptions) -> Result<u64, HttpError> {
        let path = format!("{}/count.json", self.prefix);
        self.client.count(&path, options).await
    }

    async fn get(
        &self,
        fulfillment_id: u64,
        options: &GetOptions,
    ) -> Result<Fulfillment, HttpError> {
        let path = format!("{}/{fulfillment_id}.json", self.prefix);
        let response: FulfillmentResponse = self.client.get(&path, options).await?;
        Ok(response.fulfillment)
    }

    async fn create(&self, info: &FulfillmentInfo) -> Result<Fulfillment, HttpError> {
        let path = format!("{}.json", self.prefix);
        let response: FulfillmentResponse = self
            .client
            .post(&path, &FulfillmentInfoRequest { fulfillment: info })
            .await?;
        Ok(response.fulfillment)
    }

    async fn update(&self, fulfillment: &Fulfillment) -> Result<Fulfillment, HttpError> {
        let fulfillment_id = fulfillment
            .id
            .ok_or(InvalidHttpRequestError::MissingResourceId {
                resource: "fulfillment",
            })?;
        let path = format!("{}/{fulfillment_id}.json", self.prefix);
        let response: FulfillmentResponse = self
            .client
            .put(&path, &FulfillmentRequest { fulfillment })
            .await?;
        Ok(response.fulfillment)
    }

    async fn complete(&self, fulfillment_id: u64) -> Result<Fulfillment, HttpError> {
        self.post_action(fulfillment_id, "complete").await
    }

    async fn transition(&self, fulfillment_id: u64) -> Result<Fulfillment, HttpError> {
        self.post_action(fulfillment_id, "open").await
    }

    async fn cancel(&self, fulfillment_id: u64) -> Result<Fulfillment, HttpError> {
        self.post_action(fulfillment_id, "cancel").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fulfillment_info_request_shape() {
        let info = FulfillmentInfo {
            line_items_by_fulfillment_order: vec![FulfillmentOrderItem {
                fulfillment_order_id: 1_046_000_778,
                fulfillment_order_line_items: vec![FulfillmentLineItem {
                    id: 1_025_578_643,
                    quantity: 1,
                }],
            }],
            notify_customer: Some(true),
            tracking_info: Some(TrackingInfo {
                number: Some("MS1562678".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(FulfillmentInfoRequest { fulfillment: &info }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fulfillment": {
                    "line_items_by_fulfillment_order": [{
                        "fulfillment_order_id": 1_046_000_778,
                        "fulfillment_order_line_items": [{"id": 1_025_578_643, "quantity": 1}]
                    }],
                    "notify_customer": true,
                    "tracking_info": {"number": "MS1562678"}
                }
            })
        );
    }

    #[test]
    fn test_fulfillment_deserializes_receipt_and_tracking() {
        let json = r#"{
            "id": 255858046,
            "order_id": 450789469,
            "status": "failure",
            "tracking_numbers": ["1Z2345"],
            "receipt": {"testcase": true, "authorization": "123456"},
            "shipment_status": null,
            "line_items": [{"id": 466157049, "quantity": 1, "price": "199.00"}]
        }"#;
        let fulfillment: Fulfillment = serde_json::from_str(json).unwrap();
        assert_eq!(fulfillment.order_id, Some(450_789_469));
        assert_eq!(fulfillment.receipt.unwrap().test_case, Some(true));
        assert_eq!(fulfillment.line_items[0].price.as_deref(), Some("199.00"));
        assert!(fulfillment.shipment_status.is_none());
    }
}
