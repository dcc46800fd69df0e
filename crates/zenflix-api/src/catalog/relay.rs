//! Outbound relay routing.
//!
//! Direct calls to the catalog are blocked in some network contexts, so the
//! fully-built target URL is embedded as the `url` parameter of a fixed relay
//! endpoint: `GET <relay>/raw?url=<url-encoded target>`.

use url::Url;

/// Default relay service.
pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win";

/// How requests reach the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relay {
    /// Route through `<base>/raw?url=<target>`.
    Proxy(Url),
    /// Request the target URL directly.
    Direct,
}

impl Relay {
    /// The default relay (`https://api.allorigins.win`).
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in relay URL fails to parse.
    pub fn default_proxy() -> Result<Self, url::ParseError> {
        Url::parse(DEFAULT_RELAY_URL).map(Self::Proxy)
    }

    /// Returns the URL that is actually requested for `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay base URL cannot carry a path.
    pub fn wrap(&self, target: &Url) -> Result<Url, url::ParseError> {
        match self {
            Self::Direct => Ok(target.clone()),
            Self::Proxy(base) => {
                let mut relay = base.clone();
                relay
                    .path_segments_mut()
                    .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
                    .pop_if_empty()
                    .push("raw");
                relay
                    .query_pairs_mut()
                    .clear()
                    .append_pair("url", target.as_str());
                Ok(relay)
            }
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Proxy(base) => base.host_str().unwrap_or("relay"),
            Self::Direct => "direct",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_proxy_embeds_encoded_target() {
        // Arrange
        let relay = Relay::default_proxy().unwrap();
        let target =
            Url::parse("https://api.themoviedb.org/3/trending/all/week?api_key=k").unwrap();

        // Act
        let wrapped = relay.wrap(&target).unwrap();

        // Assert
        assert_eq!(
            wrapped.as_str(),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fapi.themoviedb.org%2F3%2Ftrending%2Fall%2Fweek%3Fapi_key%3Dk"
        );
    }

    #[test]
    fn test_proxy_decodes_back_to_target() {
        // Arrange
        let relay = Relay::Proxy(Url::parse("http://localhost:9000/relay/").unwrap());
        let target = Url::parse("https://example.org/3/search/multi?query=a+b&api_key=k").unwrap();

        // Act
        let wrapped = relay.wrap(&target).unwrap();
        let embedded = wrapped
            .query_pairs()
            .find(|(k, _)| k == "url")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        // Assert
        assert_eq!(wrapped.path(), "/relay/raw");
        assert_eq!(embedded, target.as_str());
    }

    #[test]
    fn test_direct_passes_target_through() {
        // Arrange
        let target = Url::parse("https://api.themoviedb.org/3/movie/upcoming?api_key=k").unwrap();

        // Act
        let wrapped = Relay::Direct.wrap(&target).unwrap();

        // Assert
        assert_eq!(wrapped, target);
    }

    #[test]
    fn test_labels() {
        // Arrange & Act & Assert
        assert_eq!(Relay::default_proxy().unwrap().label(), "api.allorigins.win");
        assert_eq!(Relay::Direct.label(), "direct");
    }
}
