//! Typed clients for a representative set of REST Admin resources.
//!
//! Each resource has an `#[async_trait]` service trait and a lightweight
//! implementation that borrows the [`Client`]. Request and response bodies
//! use the API's envelopes: `{"product": {...}}` for one resource and
//! `{"products": [...]}` for a list.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{CountOptions, ProductService, ThemeService};
//!
//! let count = client.products().count(&CountOptions::default()).await?;
//! let themes = client.themes().list(&Default::default()).await?;
//! ```
//!
//! Service traits can be used as trait objects, so callers can swap in their
//! own implementations in tests:
//!
//! ```rust,ignore
//! fn report(products: &dyn ProductService) { /* ... */ }
//! report(&client.products());
//! ```

mod abandoned_checkout;
mod collection;
mod common;
mod fulfillment;
mod metafield;
mod options;
mod price_rule;
mod product;
mod shipping_zone;
mod theme;

pub use abandoned_checkout::{
    AbandonedCheckout, AbandonedCheckoutListOptions, AbandonedCheckoutService, AbandonedCheckouts,
};
pub use collection::{Collection, CollectionService, Collections};
pub use common::{Address, Customer, DiscountCode, Image, LineItem, TaxLine};
pub use fulfillment::{
    Fulfillment, FulfillmentInfo, FulfillmentLineItem, FulfillmentOrderItem, FulfillmentService,
    Fulfillments, OriginAddress, Receipt, TrackingInfo,
};
pub use metafield::{Metafield, MetafieldService, Metafields};
pub use options::{
    fulfillment_path_prefix, metafield_path_prefix, CountOptions, GetOptions, ListOptions,
};
pub use price_rule::{
    PrerequisiteQuantityRange, PrerequisiteShippingPriceRange, PrerequisiteSubtotalRange,
    PrerequisiteToEntitlementQuantityRatio, PriceRule, PriceRuleAllocationMethod,
    PriceRuleCustomerSelection, PriceRuleService, PriceRuleTargetSelection, PriceRuleTargetType,
    PriceRuleValueType, PriceRules,
};
pub use product::{
    Product, ProductListOptions, ProductOption, ProductService, ProductVariant, Products,
};
pub use shipping_zone::{
    CarrierShippingRateProvider, PriceBasedShippingRate, ShippingCountry, ShippingProvince,
    ShippingZone, ShippingZoneService, ShippingZones, WeightBasedShippingRate,
};
pub use theme::{Theme, ThemeListOptions, ThemeRole, ThemeService, Themes};

use crate::clients::Client;

impl Client {
    /// Returns the product endpoints.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Returns the collection endpoints.
    #[must_use]
    pub const fn collections(&self) -> Collections<'_> {
        Collections::new(self)
    }

    /// Returns the theme endpoints.
    #[must_use]
    pub const fn themes(&self) -> Themes<'_> {
        Themes::new(self)
    }

    /// Returns the price rule endpoints.
    #[must_use]
    pub const fn price_rules(&self) -> PriceRules<'_> {
        PriceRules::new(self)
    }

    /// Returns the shipping zone endpoints.
    #[must_use]
    pub const fn shipping_zones(&self) -> ShippingZones<'_> {
        ShippingZones::new(self)
    }

    /// Returns the abandoned checkout endpoints.
    #[must_use]
    pub const fn abandoned_checkouts(&self) -> AbandonedCheckouts<'_> {
        AbandonedCheckouts::new(self)
    }

    /// Returns the fulfillment endpoints under a parent resource, e.g.
    /// `client.fulfillments("orders", 450789469)`.
    ///
    /// An empty `resource` addresses the top-level `fulfillments` path.
    #[must_use]
    pub fn fulfillments(&self, resource: &str, resource_id: u64) -> Fulfillments<'_> {
        Fulfillments::new(self, resource, resource_id)
    }

    /// Returns the metafield endpoints of a resource, e.g.
    /// `client.metafields("products", 632910392)`.
    ///
    /// An empty `resource` addresses the shop's own metafields.
    #[must_use]
    pub fn metafields(&self, resource: &str, resource_id: u64) -> Metafields<'_> {
        Metafields::new(self, resource, resource_id)
    }
}
