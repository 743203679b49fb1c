//! Shipping zone resource (read-only).

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError};

/// A shipping zone: a set of countries with the rates that apply to them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShippingZone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_graphql_api_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<ShippingCountry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weight_based_shipping_rates: Vec<WeightBasedShippingRate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_based_shipping_rates: Vec<PriceBasedShippingRate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carrier_shipping_rate_providers: Vec<CarrierShippingRateProvider>,
}

/// A country in a shipping zone.
///
/// Tax rates are fractions, e.g. `0.13`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShippingCountry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_zone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provinces: Vec<ShippingProvince>,
}

/// A province of a shipping country.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShippingProvince {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_zone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percentage: Option<f64>,
}

/// A rate selected by order weight.
///
/// Prices are decimal strings; weights are in kilograms.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WeightBasedShippingRate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_zone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_high: Option<f64>,
}

/// A rate selected by order subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PriceBasedShippingRate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_zone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_subtotal: Option<String>,
    /// `None` means no upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_order_subtotal: Option<String>,
}

/// A carrier-calculated rate with optional adjustments.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CarrierShippingRateProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_service_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_zone_id: Option<u64>,
    /// Flat adjustment, as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_modifier: Option<String>,
    /// Percentage adjustment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_modifier: Option<f64>,
    /// Which carrier services are offered.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_filter: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct ShippingZonesResponse {
    shipping_zones: Vec<ShippingZone>,
}

/// Shipping zone endpoints.
#[async_trait]
pub trait ShippingZoneService: Send + Sync {
    /// Lists every shipping zone of the shop.
    async fn list(&self) -> Result<Vec<ShippingZone>, HttpError>;
}

/// [`ShippingZoneService`] bound to a client. Obtained from
/// [`Client::shipping_zones`].
#[derive(Debug, Clone, Copy)]
pub struct ShippingZones<'a> {
    client: &'a Client,
}

impl<'a> ShippingZones<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ShippingZoneService for ShippingZones<'_> {
    async fn list(&self) -> Result<Vec<ShippingZone>, HttpError> {
        let response: ShippingZonesResponse = self.client.get("shipping_zones.json", &()).await?;
        Ok(response.shipping_zones)
    }
}
