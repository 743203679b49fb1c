//! Query options shared by most resource endpoints, and path helpers for
//! nested resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::PageOptions;

/// General list options accepted by most collection endpoints.
///
/// Unset fields are omitted from the query string. `ids` is sent as a
/// comma-separated list.
///
/// # Example
///
/// ```rust
/// use shopify_rest::ListOptions;
///
/// let options = ListOptions {
///     limit: Some(50),
///     ids: vec![1, 2, 3],
///     ..Default::default()
/// };
/// assert_eq!(options.limit, Some(50));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Cursor for cursor-based pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,

    /// Page number for the deprecated page-based pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Maximum number of results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Return results after this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,

    /// Show results created at or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    /// Show results created at or before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    /// Show results last updated at or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    /// Show results last updated at or before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,

    /// Sort order, e.g. `created_at desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    /// Filter by vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Restrict results to these IDs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
}

impl From<PageOptions> for ListOptions {
    fn from(page: PageOptions) -> Self {
        Self {
            page_info: Some(page.page_info),
            limit: page.limit,
            ..Self::default()
        }
    }
}

/// General options accepted by count endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CountOptions {
    /// Count results created at or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    /// Count results created at or before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    /// Count results last updated at or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    /// Count results last updated at or before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
}

/// Options for fetching a single resource.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

/// Returns the path prefix for metafields.
///
/// Shop-level metafields live at `metafields`; metafields owned by a resource
/// live under it.
///
/// # Example
///
/// ```rust
/// use shopify_rest::metafield_path_prefix;
///
/// assert_eq!(metafield_path_prefix("", 0), "metafields");
/// assert_eq!(metafield_path_prefix("products", 123), "products/123/metafields");
/// ```
#[must_use]
pub fn metafield_path_prefix(resource: &str, resource_id: u64) -> String {
    nested_path_prefix("metafields", resource, resource_id)
}

/// Returns the path prefix for fulfillments, e.g. `orders/123/fulfillments`.
///
/// An empty `resource` yields the top-level `fulfillments`.
#[must_use]
pub fn fulfillment_path_prefix(resource: &str, resource_id: u64) -> String {
    nested_path_prefix("fulfillments", resource, resource_id)
}

fn nested_path_prefix(name: &str, resource: &str, resource_id: u64) -> String {
    if resource.is_empty() {
        name.to_string()
    } else {
        format!("{resource}/{resource_id}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_options_skip_unset_fields() {
        let options = ListOptions::default();
        assert_eq!(serde_json::to_string(&options).unwrap(), "{}");
    }

    #[test]
    fn test_list_options_serialize_dates_as_rfc3339() {
        let options = ListOptions {
            created_at_min: Some(
                DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
            ),
            ids: vec![1, 2],
            ..Default::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["created_at_min"], "2024-01-15T10:30:00Z");
        assert_eq!(json["ids"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_page_options_convert_to_list_options() {
        let page = PageOptions {
            page_info: "abc".to_string(),
            limit: Some(25),
        };
        let options = ListOptions::from(page);
        assert_eq!(options.page_info.as_deref(), Some("abc"));
        assert_eq!(options.limit, Some(25));
        assert_eq!(options.since_id, None);
    }

    #[test]
    fn test_path_prefixes() {
        assert_eq!(metafield_path_prefix("", 123), "metafields");
        assert_eq!(metafield_path_prefix("products", 123), "products/123/metafields");
        assert_eq!(fulfillment_path_prefix("", 123), "fulfillments");
        assert_eq!(fulfillment_path_prefix("orders", 123), "orders/123/fulfillments");
    }
}
