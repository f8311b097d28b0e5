//! Url

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{ParseError, Url};

/// Url Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Url error
    #[error(transparent)]
    Url(#[from] ParseError),
    /// Invalid URL structure
    #[error("Invalid URL")]
    InvalidUrl,
}

/// StoreUrl Url
///
/// Normalized base URL of a CloudRetail storefront deployment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreUrl(String);

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Use the to_string implementation to get the correctly formatted URL
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Deserialize as a string and then use from_str to parse it correctly
        let s = String::deserialize(deserializer)?;
        StoreUrl::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl StoreUrl {
    fn format_url(url: &str) -> Result<String, Error> {
        if url.is_empty() {
            return Err(Error::InvalidUrl);
        }

        let url = url.trim_end_matches('/');
        // https://URL.com/path/TO/resource -> https://url.com/path/TO/resource
        let protocol = url
            .split("://")
            .nth(0)
            .ok_or(Error::InvalidUrl)?
            .to_lowercase();
        let host = url
            .split("://")
            .nth(1)
            .ok_or(Error::InvalidUrl)?
            .split('/')
            .nth(0)
            .ok_or(Error::InvalidUrl)?
            .to_lowercase();
        let path = url
            .split("://")
            .nth(1)
            .ok_or(Error::InvalidUrl)?
            .split('/')
            .skip(1)
            .collect::<Vec<&str>>()
            .join("/");
        let mut formatted_url = format!("{protocol}://{host}");
        if !path.is_empty() {
            formatted_url.push_str(&format!("/{}", path));
        }
        Ok(formatted_url)
    }

    /// Join onto url
    pub fn join(&self, path: &str) -> Result<Url, Error> {
        let url = Url::parse(&self.0)?;

        // Get the current path segments
        let base_path = url.path();

        // Check if the path has a trailing slash to avoid double slashes
        let normalized_path = if base_path.ends_with('/') {
            format!("{}{}", base_path, path)
        } else {
            format!("{}/{}", base_path, path)
        };

        // Create a new URL with the combined path
        let mut result = url.clone();
        result.set_path(&normalized_path);
        Ok(result)
    }

    /// Append path elements onto the URL
    pub fn join_paths(&self, path_elements: &[&str]) -> Result<Url, Error> {
        self.join(&path_elements.join("/"))
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let formatted_url = Self::format_url(url);
        match formatted_url {
            Ok(url) => Ok(Self(url)),
            Err(_) => Err(Error::InvalidUrl),
        }
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {

    use super::*;

    #[test]
    fn test_trim_trailing_slashes() {
        let very_unformatted_url = "http://url-to-check.com////";
        let unformatted_url = "http://url-to-check.com/";
        let formatted_url = "http://url-to-check.com";

        let very_trimmed_url = StoreUrl::from_str(very_unformatted_url).unwrap();
        assert_eq!(formatted_url, very_trimmed_url.to_string());

        let trimmed_url = StoreUrl::from_str(unformatted_url).unwrap();
        assert_eq!(formatted_url, trimmed_url.to_string());

        let unchanged_url = StoreUrl::from_str(formatted_url).unwrap();
        assert_eq!(formatted_url, unchanged_url.to_string());
    }

    #[test]
    fn test_case_insensitive() {
        let wrong_cased_url = "http://URL-to-check.com";
        let correct_cased_url = "http://url-to-check.com";

        let cased_url_formatted = StoreUrl::from_str(wrong_cased_url).unwrap();
        assert_eq!(correct_cased_url, cased_url_formatted.to_string());

        let wrong_cased_url_with_path = "http://URL-to-check.com/PATH/to/check";
        let correct_cased_url_with_path = "http://url-to-check.com/PATH/to/check";

        let cased_url_with_path_formatted = StoreUrl::from_str(wrong_cased_url_with_path).unwrap();
        assert_eq!(
            correct_cased_url_with_path,
            cased_url_with_path_formatted.to_string()
        );
    }

    #[test]
    fn test_join_paths() {
        let url_no_path = "http://url-to-check.com";

        let url = StoreUrl::from_str(url_no_path).unwrap();
        assert_eq!(
            format!("{url_no_path}/v1/orders"),
            url.join_paths(&["v1", "orders"]).unwrap().to_string()
        );

        let url_with_path = "http://url-to-check.com/my/path";

        let url = StoreUrl::from_str(url_with_path).unwrap();
        assert_eq!(
            format!("{url_with_path}/v1/orders"),
            url.join_paths(&["v1", "orders"]).unwrap().to_string()
        );
    }

    #[test]
    fn test_store_url_slash_equality() {
        let store_url_with_slash_str = "https://shop.cloudretail.dev/eu/";
        let store_url_with_slash = StoreUrl::from_str(store_url_with_slash_str).unwrap();

        let store_url_without_slash_str = "https://shop.cloudretail.dev/eu";
        let store_url_without_slash = StoreUrl::from_str(store_url_without_slash_str).unwrap();

        assert_eq!(store_url_with_slash, store_url_without_slash);
        assert_eq!(
            store_url_with_slash.to_string(),
            store_url_without_slash_str.to_string()
        );
    }
}
