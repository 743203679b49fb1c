//! Theme resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{Theme, ThemeListOptions, ThemeRole, ThemeService};
//!
//! let main = client
//!     .themes()
//!     .list(&ThemeListOptions { role: Some(ThemeRole::Main), ..Default::default() })
//!     .await?;
//!
//! let draft = Theme {
//!     name: Some("My Custom Theme".to_string()),
//!     role: Some(ThemeRole::Unpublished),
//!     ..Default::default()
//! };
//! let created = client.themes().create(&draft).await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, HttpError, InvalidHttpRequestError};
use crate::resources::options::GetOptions;

const THEMES_BASE_PATH: &str = "themes";

/// The role of a theme in the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeRole {
    /// The published theme customers see.
    Main,
    /// An unpublished theme.
    #[default]
    Unpublished,
    /// A demo theme from the theme store.
    Demo,
    /// A development theme.
    Development,
}

/// A theme in a Shopify store.
///
/// Only one theme can have the [`ThemeRole::Main`] role at a time.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Theme {
    /// The unique identifier of the theme.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The name of the theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The role of the theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ThemeRole>,

    /// URL of a zip archive to create the theme from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Whether the theme can be previewed.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub previewable: Option<bool>,

    /// Whether the theme is still being processed.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub processing: Option<bool>,

    /// The theme store ID, for themes installed from the theme store.
    #[serde(skip_serializing)]
    pub theme_store_id: Option<u64>,

    /// When the theme was created.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the theme was last updated.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    /// The admin GraphQL API ID.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub admin_graphql_api_id: Option<String>,
}

/// Options for listing themes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ThemeListOptions {
    /// Only themes with this role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ThemeRole>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

#[derive(Serialize)]
struct ThemeRequest<'a> {
    theme: &'a Theme,
}

#[derive(Deserialize)]
struct ThemeResponse {
    theme: Theme,
}

#[derive(Deserialize)]
struct ThemesResponse {
    themes: Vec<Theme>,
}

/// Theme endpoints.
#[async_trait]
pub trait ThemeService: Send + Sync {
    /// Lists themes.
    async fn list(&self, options: &ThemeListOptions) -> Result<Vec<Theme>, HttpError>;

    /// Fetches one theme.
    async fn get(&self, theme_id: u64, options: &GetOptions) -> Result<Theme, HttpError>;

    /// Creates a theme.
    async fn create(&self, theme: &Theme) -> Result<Theme, HttpError>;

    /// Updates the theme identified by `theme.id`.
    async fn update(&self, theme: &Theme) -> Result<Theme, HttpError>;

    /// Deletes a theme.
    async fn delete(&self, theme_id: u64) -> Result<(), HttpError>;
}

/// [`ThemeService`] bound to a client. Obtained from [`Client::themes`].
#[derive(Debug, Clone, Copy)]
pub struct Themes<'a> {
    client: &'a Client,
}

impl<'a> Themes<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ThemeService for Themes<'_> {
    async fn list(&self, options: &ThemeListOptions) -> Result<Vec<Theme>, HttpError> {
        let path = format!("{THEMES_BASE_PATH}.json");
        let response: ThemesResponse = self.client.get(&path, options).await?;
        Ok(response.themes)
    }

    async fn get(&self, theme_id: u64, options: &GetOptions) -> Result<Theme, HttpError> {
        let path = format!("{THEMES_BASE_PATH}/{theme_id}.json");
        let response: ThemeResponse = self.client.get(&path, options).await?;
        Ok(response.theme)
    }

    async fn create(&self, theme: &Theme) -> Result<Theme, HttpError> {
        let path = format!("{THEMES_BASE_PATH}.json");
        let response: ThemeResponse = self.client.post(&path, &ThemeRequest { theme }).await?;
        Ok(response.theme)
    }

    async fn update(&self, theme: &Theme) -> Result<Theme, HttpError> {
        let theme_id = theme
            .id
            .ok_or(InvalidHttpRequestError::MissingResourceId { resource: "theme" })?;
        let path = format!("{THEMES_BASE_PATH}/{theme_id}.json");
        let response: ThemeResponse = self.client.put(&path, &ThemeRequest { theme }).await?;
        Ok(response.theme)
    }

    async fn delete(&self, theme_id: u64) -> Result<(), HttpError> {
        self.client
            .delete(&format!("{THEMES_BASE_PATH}/{theme_id}.json"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_role_wire_format() {
        assert_eq!(serde_json::to_string(&ThemeRole::Main).unwrap(), "\"main\"");
        let role: ThemeRole = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(role, ThemeRole::Development);
    }

    #[test]
    fn test_theme_request_omits_read_only_fields() {
        let theme = Theme {
            id: Some(828_155_753),
            name: Some("Comfort".to_string()),
            role: Some(ThemeRole::Main),
            previewable: Some(true),
            processing: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_value(ThemeRequest { theme: &theme }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"theme": {"name": "Comfort", "role": "main"}})
        );
    }

    #[test]
    fn test_theme_list_options_query_shape() {
        let options = ThemeListOptions {
            role: Some(ThemeRole::Unpublished),
            fields: None,
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({"role": "unpublished"})
        );
    }
}
