//! Abandoned checkout resource (read-only).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError};
use crate::resources::common::{Address, Customer, DiscountCode, LineItem, TaxLine};

const ABANDONED_CHECKOUTS_BASE_PATH: &str = "checkouts";

/// A checkout the customer left without completing.
///
/// Monetary amounts are decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AbandonedCheckout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Recovery URL to send to the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abandoned_checkout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_accepts_marketing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_accepts_sms_marketing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discount_codes: Vec<DiscountCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_site: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referring_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_lines: Vec<TaxLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes_included: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_discounts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_line_items_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<String>,
    /// Total weight in grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Options for listing abandoned checkouts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AbandonedCheckoutListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
    /// `open` (default) or `closed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Deserialize)]
struct AbandonedCheckoutsResponse {
    checkouts: Vec<AbandonedCheckout>,
}

/// Abandoned checkout endpoints.
#[async_trait]
pub trait AbandonedCheckoutService: Send + Sync {
    /// Lists abandoned checkouts.
    async fn list(
        &self,
        options: &AbandonedCheckoutListOptions,
    ) -> Result<Vec<AbandonedCheckout>, HttpError>;
}

/// [`AbandonedCheckoutService`] bound to a client. Obtained from
/// [`Client::abandoned_checkouts`].
#[derive(Debug, Clone, Copy)]
pub struct AbandonedCheckouts<'a> {
    client: &'a Client,
}

impl<'a> AbandonedCheckouts<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AbandonedCheckoutService for AbandonedCheckouts<'_> {
    async fn list(
        &self,
        options: &AbandonedCheckoutListOptions,
    ) -> Result<Vec<AbandonedCheckout>, HttpError> {
        let path = format!("{ABANDONED_CHECKOUTS_BASE_PATH}.json");
        let response: AbandonedCheckoutsResponse = self.client.get(&path, options).await?;
        Ok(response.checkouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abandoned_checkout_deserializes() {
        let json = r#"{
            "checkouts": [{
                "id": 450789469,
                "token": "2a1ace52255252df566af0faaedfbfa7",
                "email": "bob.norman@mail.example.com",
                "total_price": "398.00",
                "taxes_included": false,
                "discount_codes": [{"code": "TENOFF", "amount": "10.00", "type": "percentage"}],
                "customer": {"id": 207119551, "email": "bob.norman@mail.example.com"},
                "billing_address": {"address1": "Chestnut Street 92", "latitude": 45.41634, "longitude": -75.6868},
                "closed_at": null,
                "created_at": "2024-01-02T09:28:43-05:00"
            }]
        }"#;
        let checkouts = serde_json::from_str::<AbandonedCheckoutsResponse>(json)
            .unwrap()
            .checkouts;
        let checkout = &checkouts[0];
        assert_eq!(checkout.total_price.as_deref(), Some("398.00"));
        assert_eq!(
            checkout.discount_codes[0].discount_type.as_deref(),
            Some("percentage")
        );
        assert_eq!(checkout.customer.as_ref().unwrap().id, Some(207_119_551));
        assert!(checkout.closed_at.is_none());
    }

    #[test]
    fn test_list_options_status_filter() {
        let options = AbandonedCheckoutListOptions {
            status: Some("closed".to_string()),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({"limit": 5, "status": "closed"})
        );
    }
}
