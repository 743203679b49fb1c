//! Request construction: methods, path resolution and query flattening.
//!
//! [`PreparedRequest`] is the fully-qualified request handed to a
//! [`Transport`](crate::Transport). It is built by
//! [`Client::new_request`](crate::Client::new_request) from a method, a path
//! relative to the API prefix, an optional JSON body and optional query
//! options.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderMap;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Shopify REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(InvalidHttpRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// A fully-qualified request, ready to send.
///
/// Immutable once built; the engine clones it for each attempt.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    method: HttpMethod,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl PreparedRequest {
    pub(crate) const fn new(
        method: HttpMethod,
        url: Url,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the absolute request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Joins the API prefix and a relative path, `path.Join` style.
///
/// Leading separators on `rel_path` are stripped, empty and `.` segments are
/// dropped, and `..` pops a segment. Any `?query` suffix is kept verbatim.
pub(crate) fn join_path(prefix: &str, rel_path: &str) -> String {
    let (path, query) = match rel_path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rel_path, None),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in prefix.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut joined = segments.join("/");
    if let Some(query) = query {
        joined.push('?');
        joined.push_str(query);
    }
    joined
}

/// Resolves a prefixed relative path against the base URL.
pub(crate) fn resolve_url(base: &Url, rel_path: &str) -> Result<Url, InvalidHttpRequestError> {
    let invalid = |reason: &str| InvalidHttpRequestError::InvalidPath {
        path: rel_path.to_string(),
        reason: reason.to_string(),
    };

    if rel_path.starts_with(':') {
        return Err(invalid("missing protocol scheme"));
    }
    if rel_path.chars().any(char::is_control) {
        return Err(invalid("invalid control character in URL"));
    }

    base.join(rel_path).map_err(|err| invalid(&err.to_string()))
}

/// Flattens serializable options into query pairs.
///
/// Options must serialize to a map (a struct or map type) or to null, which
/// means "no options". Nulls are skipped, scalars are rendered as text,
/// arrays become comma-joined lists and nested objects are sent as JSON.
pub(crate) fn flatten_query<O: Serialize + ?Sized>(
    options: &O,
) -> Result<Option<Vec<(String, String)>>, InvalidHttpRequestError> {
    let value = serde_json::to_value(options).map_err(|err| {
        InvalidHttpRequestError::InvalidOptions {
            message: err.to_string(),
        }
    })?;

    let map = match value {
        Value::Null => return Ok(None),
        Value::Object(map) => map,
        other => {
            return Err(InvalidHttpRequestError::InvalidOptions {
                message: format!("expected a struct or map, got {}", kind_of(&other)),
            })
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => pairs.push((key, s)),
            Value::Number(n) => pairs.push((key, n.to_string())),
            Value::Bool(b) => pairs.push((key, b.to_string())),
            Value::Array(items) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    pairs.push((key, values.join(",")));
                }
            }
            Value::Object(_) => {
                let json = value.to_string();
                pairs.push((key, json));
            }
        }
    }
    Ok(Some(pairs))
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Merges option pairs into the URL's query.
///
/// Existing values come first for each key, option values are appended after
/// them, and keys are emitted in sorted order.
pub(crate) fn merge_query(url: &mut Url, options: Vec<(String, String)>) {
    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        merged
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    for (key, value) in options {
        merged.entry(key).or_default().push(value);
    }

    url.set_query(None);
    if merged.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (key, values) in &merged {
        for value in values {
            query.append_pair(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;
    use std::collections::HashMap;

    #[test]
    fn test_http_method_display_and_parse() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("PUT".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
    }

    #[test]
    fn test_http_method_rejects_unknown_verbs() {
        let err = "bad method".parse::<HttpMethod>().unwrap_err();
        assert_eq!(
            err,
            InvalidHttpRequestError::InvalidMethod {
                method: "bad method".to_string()
            }
        );
    }

    #[test]
    fn test_join_path_strips_leading_separator() {
        assert_eq!(join_path("admin", "/products.json"), "admin/products.json");
        assert_eq!(
            join_path("admin/api/2024-10", "products/1.json"),
            "admin/api/2024-10/products/1.json"
        );
    }

    #[test]
    fn test_join_path_cleans_segments_and_keeps_query() {
        assert_eq!(join_path("admin", "./foo//bar/../baz?x=1/2"), "admin/foo/baz?x=1/2");
        assert_eq!(join_path("admin", "foo?page=1"), "admin/foo?page=1");
        assert_eq!(join_path("admin", ""), "admin");
    }

    #[test]
    fn test_resolve_url_against_base() {
        let base = Url::parse("https://fooshop.myshopify.com").unwrap();
        let url = resolve_url(&base, "admin/foo?page=1").unwrap();
        assert_eq!(url.as_str(), "https://fooshop.myshopify.com/admin/foo?page=1");
    }

    #[test]
    fn test_resolve_url_rejects_missing_scheme() {
        let base = Url::parse("https://fooshop.myshopify.com").unwrap();
        let err = resolve_url(&base, "://example.com").unwrap_err();
        assert!(matches!(err, InvalidHttpRequestError::InvalidPath { .. }));
        assert!(resolve_url(&base, "foo\nbar").is_err());
    }

    #[derive(Serialize)]
    struct ListOptions {
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        ids: Vec<u64>,
        since_id: Option<u64>,
    }

    #[test]
    fn test_flatten_query_struct() {
        let pairs = flatten_query(&ListOptions {
            limit: Some(10),
            ids: vec![1, 2, 3],
            since_id: None,
        })
        .unwrap()
        .unwrap();

        let map: HashMap<_, _> = pairs.into_iter().collect();
        assert_eq!(map.get("limit").map(String::as_str), Some("10"));
        assert_eq!(map.get("ids").map(String::as_str), Some("1,2,3"));
        assert!(!map.contains_key("since_id"));
    }

    #[test]
    fn test_flatten_query_null_means_no_options() {
        assert_eq!(flatten_query(&()).unwrap(), None);
        assert_eq!(flatten_query(&None::<ListOptions>).unwrap(), None);
    }

    #[test]
    fn test_flatten_query_rejects_non_struct() {
        let err = flatten_query(&123).unwrap_err();
        assert!(matches!(err, InvalidHttpRequestError::InvalidOptions { .. }));
        assert!(flatten_query(&vec!["a"]).is_err());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn test_flatten_query_reports_serializer_errors() {
        let err = flatten_query(&Unserializable).unwrap_err();
        assert_eq!(
            err,
            InvalidHttpRequestError::InvalidOptions {
                message: "cannot serialize".to_string()
            }
        );
    }

    #[test]
    fn test_merge_query_keeps_existing_and_sorts() {
        let mut url = Url::parse("https://fooshop.myshopify.com/foo?page=1&limit=5").unwrap();
        merge_query(&mut url, vec![("limit".to_string(), "10".to_string())]);
        assert_eq!(
            url.as_str(),
            "https://fooshop.myshopify.com/foo?limit=5&limit=10&page=1"
        );
    }

    #[test]
    fn test_merge_query_encodes_values() {
        let mut url = Url::parse("https://fooshop.myshopify.com/foo").unwrap();
        merge_query(&mut url, vec![("ids".to_string(), "1,2".to_string())]);
        assert_eq!(url.as_str(), "https://fooshop.myshopify.com/foo?ids=1%2C2");
    }
}
