//! Shopify API version definitions.
//!
//! The version determines the REST path prefix: a valid version produces
//! `admin/api/<version>`, no version produces the unversioned `admin` prefix.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Path prefix used when no API version is configured.
pub const UNVERSIONED_PATH_PREFIX: &str = "admin";

/// Shopify API version.
///
/// Known quarterly releases have their own variants. Any other value matching
/// `YYYY-MM` parses as `Custom`, and `unstable` selects the development API.
///
/// # Example
///
/// ```rust
/// use shopify_rest::ApiVersion;
///
/// let version: ApiVersion = "2024-10".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2024_10);
/// assert_eq!(version.path_prefix(), "admin/api/2024-10");
/// assert!("2024".parse::<ApiVersion>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2024-01 (January 2024)
    V2024_01,
    /// API version 2024-04 (April 2024)
    V2024_04,
    /// API version 2024-07 (July 2024)
    V2024_07,
    /// API version 2024-10 (October 2024)
    V2024_10,
    /// API version 2025-01 (January 2025)
    V2025_01,
    /// API version 2025-04 (April 2025)
    V2025_04,
    /// API version 2025-07 (July 2025)
    V2025_07,
    /// API version 2025-10 (October 2025)
    V2025_10,
    /// Unstable API version for development and testing.
    Unstable,
    /// Any other `YYYY-MM` version string.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest stable API version known to this crate.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns `true` if this is a known stable API version.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !matches!(self, Self::Unstable | Self::Custom(_))
    }

    /// Returns the REST path prefix for this version, e.g. `admin/api/2024-10`.
    #[must_use]
    pub fn path_prefix(&self) -> String {
        format!("{UNVERSIONED_PATH_PREFIX}/api/{self}")
    }

    /// Parses a version leniently: invalid or empty input yields `None`.
    ///
    /// A rejected non-empty value is reported through `tracing` since the
    /// client silently falls back to the unversioned prefix.
    #[must_use]
    pub fn parse_lenient(version: &str) -> Option<Self> {
        if version.trim().is_empty() {
            return None;
        }
        match version.parse() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!("{err} Falling back to the unversioned API path.");
                None
            }
        }
    }

    // Mirrors the wire pattern ^[0-9]{4}-[0-9]{2}$.
    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };
        year.len() == 4
            && month.len() == 2
            && year.chars().chain(month.chars()).all(|c| c.is_ascii_digit())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2024_01 => "2024-01",
            Self::V2024_04 => "2024-04",
            Self::V2024_07 => "2024-07",
            Self::V2024_10 => "2024-10",
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    /// Matches the raw input: no trimming or case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2024-01" => Ok(Self::V2024_01),
            "2024-04" => Ok(Self::V2024_04),
            "2024-07" => Ok(Self::V2024_07),
            "2024-10" => Ok(Self::V2024_10),
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

/// Returns the path prefix for an optional version.
#[must_use]
pub fn path_prefix_for(version: Option<&ApiVersion>) -> String {
    version.map_or_else(|| UNVERSIONED_PATH_PREFIX.to_string(), ApiVersion::path_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!("2024-01".parse::<ApiVersion>().unwrap(), ApiVersion::V2024_01);
        assert_eq!("2025-10".parse::<ApiVersion>().unwrap(), ApiVersion::V2025_10);
        assert_eq!("unstable".parse::<ApiVersion>().unwrap(), ApiVersion::Unstable);
    }

    #[test]
    fn test_api_version_accepts_any_two_digit_month() {
        let version: ApiVersion = "9999-99".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("9999-99".to_string()));
        assert_eq!(version.path_prefix(), "admin/api/9999-99");
    }

    #[test]
    fn test_api_version_rejects_invalid_formats() {
        for input in [
            "",
            "2024",
            "2024-1",
            "20240-01",
            "abcd-ef",
            "2024-01-01",
            "stable",
            "UNSTABLE",
            "Unstable",
            " 2024-01 ",
            "2024-01\n",
        ] {
            assert!(input.parse::<ApiVersion>().is_err(), "{input}");
        }
    }

    #[test]
    fn test_parse_lenient_falls_back_to_none() {
        assert_eq!(ApiVersion::parse_lenient(""), None);
        assert_eq!(ApiVersion::parse_lenient("2024-1"), None);
        assert_eq!(ApiVersion::parse_lenient("unstable"), Some(ApiVersion::Unstable));
        assert_eq!(ApiVersion::parse_lenient("UNSTABLE"), None);
        assert_eq!(ApiVersion::parse_lenient(" 2024-01 "), None);
    }

    #[test]
    fn test_path_prefix_for_optional_version() {
        assert_eq!(path_prefix_for(None), "admin");
        assert_eq!(path_prefix_for(Some(&ApiVersion::Unstable)), "admin/api/unstable");
        assert_eq!(path_prefix_for(Some(&ApiVersion::V2024_10)), "admin/api/2024-10");
    }

    #[test]
    fn test_api_version_display_and_stability() {
        assert_eq!(ApiVersion::V2024_04.to_string(), "2024-04");
        assert!(ApiVersion::latest().is_stable());
        assert!(!ApiVersion::Unstable.is_stable());
        assert!(!ApiVersion::Custom("2026-01".to_string()).is_stable());
    }
}
