//! Price rule resource.
//!
//! Price rules hold the discount logic behind discount codes: what is
//! discounted, by how much, for whom and when.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError, InvalidHttpRequestError};

const PRICE_RULES_BASE_PATH: &str = "price_rules";

/// Whether the discount is a fixed amount or a percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceRuleValueType {
    /// A fixed monetary amount.
    FixedAmount,
    /// A percentage of the price.
    Percentage,
}

/// Which customers the rule applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceRuleCustomerSelection {
    /// Every customer.
    All,
    /// Only customers meeting the prerequisites.
    Prerequisite,
}

/// What the discount applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceRuleTargetType {
    /// Line items.
    LineItem,
    /// Shipping lines.
    ShippingLine,
}

/// Which line items are discounted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceRuleTargetSelection {
    /// Every item in the cart.
    All,
    /// Only the entitled products, variants or collections.
    Entitled,
}

/// How the discount value is spread over the targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceRuleAllocationMethod {
    /// Applied to each target individually.
    Each,
    /// Split across all targets.
    Across,
}

/// A price rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PriceRule {
    /// The unique identifier of the price rule.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// Internal title; also the suggested discount code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<PriceRuleValueType>,

    /// The discount value as a negative decimal string, e.g. `-10.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_selection: Option<PriceRuleCustomerSelection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<PriceRuleTargetType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_selection: Option<PriceRuleTargetSelection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_method: Option<PriceRuleAllocationMethod>,

    /// How many times the discount can be allocated per order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub once_per_customer: Option<bool>,

    /// Total number of uses across all customers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,

    /// `None` means the rule never expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entitled_product_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entitled_variant_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entitled_collection_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entitled_country_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite_product_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite_variant_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite_collection_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite_saved_search_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite_customer_ids: Vec<u64>,

    /// Minimum subtotal for the rule to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_subtotal_range: Option<PrerequisiteSubtotalRange>,

    /// Minimum number of items for the rule to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_quantity_range: Option<PrerequisiteQuantityRange>,

    /// Maximum shipping price for the rule to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_shipping_price_range: Option<PrerequisiteShippingPriceRange>,

    /// Buy X get Y ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_to_entitlement_quantity_ratio: Option<PrerequisiteToEntitlementQuantityRatio>,

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

/// Minimum subtotal, as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PrerequisiteSubtotalRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal_to: Option<String>,
}

/// Minimum item quantity.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PrerequisiteQuantityRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal_to: Option<u32>,
}

/// Maximum shipping price, as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PrerequisiteShippingPriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal_to: Option<String>,
}

/// Buy `prerequisite_quantity`, get `entitled_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PrerequisiteToEntitlementQuantityRatio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitled_quantity: Option<u32>,
}

#[derive(Serialize)]
struct PriceRuleRequest<'a> {
    price_rule: &'a PriceRule,
}

#[derive(Deserialize)]
struct PriceRuleResponse {
    price_rule: PriceRule,
}

#[derive(Deserialize)]
struct PriceRulesResponse {
    price_rules: Vec<PriceRule>,
}

/// Price rule endpoints.
#[async_trait]
pub trait PriceRuleService: Send + Sync {
    /// Lists price rules.
    async fn list(&self) -> Result<Vec<PriceRule>, HttpError>;

    /// Fetches one price rule.
    async fn get(&self, price_rule_id: u64) -> Result<PriceRule, HttpError>;

    /// Creates a price rule.
    async fn create(&self, price_rule: &PriceRule) -> Result<PriceRule, HttpError>;

    /// Updates the price rule identified by `price_rule.id`.
    async fn update(&self, price_rule: &PriceRule) -> Result<PriceRule, HttpError>;

    /// Deletes a price rule.
    async fn delete(&self, price_rule_id: u64) -> Result<(), HttpError>;
}

/// [`PriceRuleService`] bound to a client. Obtained from [`Client::price_rules`].
#[derive(Debug, Clone, Copy)]
pub struct PriceRules<'a> {
    client: &'a Client,
}

impl<'a> PriceRules<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceRuleService for PriceRules<'_> {
    async fn list(&self) -> Result<Vec<PriceRule>, HttpError> {
        let path = format!("{PRICE_RULES_BASE_PATH}.json");
        let response: PriceRulesResponse = self.client.get(&path, &()).await?;
        Ok(response.price_rules)
    }

    async fn get(&self, price_rule_id: u64) -> Result<PriceRule, HttpError> {
        let path = format!("{PRICE_RULES_BASE_PATH}/{price_rule_id}.json");
        let response: PriceRuleResponse = self.client.get(&path, &()).await?;
        Ok(response.price_rule)
    }

    async fn create(&self, price_rule: &PriceRule) -> Result<PriceRule, HttpError> {
        let path = format!("{PRICE_RULES_BASE_PATH}.json");
        let response: PriceRuleResponse = self
            .client
            .post(&path, &PriceRuleRequest { price_rule })
            .await?;
        Ok(response.price_rule)
    }

    async fn update(&self, price_rule: &PriceRule) -> Result<PriceRule, HttpError> {
        let price_rule_id = price_rule
            .id
            .ok_or(InvalidHttpRequestError::MissingResourceId {
                resource: "price_rule",
            })?;
        let path = format!("{PRICE_RULES_BASE_PATH}/{price_rule_id}.json");
        let response: PriceRuleResponse = self
            .client
            .put(&path, &PriceRuleRequest { price_rule })
            .await?;
        Ok(response.price_rule)
    }

    async fn delete(&self, price_rule_id: u64) -> Result<(), HttpError> {
        self.client
            .delete(&format!("{PRICE_RULES_BASE_PATH}/{price_rule_id}.json"))
            .await
    }
}
