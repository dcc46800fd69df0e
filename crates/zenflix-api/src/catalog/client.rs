//! `CatalogClient` - catalog API client implementation.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::error::CatalogError;
use super::params::{MediaKind, MediaType, TimeWindow};
use super::relay::Relay;
use super::types::{CatalogPage, ErrorBody, MediaDetails};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Sub-resources appended to details responses.
const DETAILS_APPEND: &str = "videos,credits,similar";

/// Catalog API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL of the catalog API.
    base_url: Url,
    /// Outbound routing.
    relay: Relay,
    /// API key sent as the `api_key` query parameter.
    api_key: String,
    /// Read access token, sent as a bearer token on direct requests.
    read_token: Option<String>,
    /// Response language.
    language: Option<String>,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    relay: Option<Relay>,
    api_key: Option<String>,
    read_token: Option<String>,
    language: Option<String>,
    user_agent: Option<String>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            relay: None,
            api_key: None,
            read_token: None,
            language: None,
            user_agent: None,
        }
    }

    /// Overrides the catalog base URL.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the relay (default: `https://api.allorigins.win`).
    #[must_use]
    pub fn relay(mut self, relay: Relay) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the read access token.
    #[must_use]
    pub fn read_token(mut self, token: impl Into<String>) -> Self {
        self.read_token = Some(token.into());
        self
    }

    /// Sets the response language (e.g. "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient, CatalogError> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or(CatalogError::Config("api_key is required"))?;
        let user_agent = self
            .user_agent
            .ok_or(CatalogError::Config("user_agent is required"))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        let relay = match self.relay {
            Some(relay) => relay,
            None => Relay::default_proxy()?,
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()?;

        Ok(CatalogClient {
            http_client,
            base_url,
            relay,
            api_key,
            read_token: self.read_token.filter(|t| !t.is_empty()),
            language: self.language.filter(|l| !l.is_empty()),
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Returns the configured relay.
    #[must_use]
    pub const fn relay(&self) -> &Relay {
        &self.relay
    }

    /// Builds the real target URL: base + path + query + language + `api_key`.
    fn target_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(ref language) = self.language {
                pairs.append_pair("language", language);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request through the relay and decodes the JSON body.
    #[instrument(skip_all, fields(endpoint = path))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let target = self.target_url(path, query)?;
        tracing::debug!(
            url = %redact_api_key(&target),
            relay = self.relay.label(),
            "Catalog API request"
        );

        let request_url = self.relay.wrap(&target)?;
        let mut request = self.http_client.get(request_url);
        if self.relay == Relay::Direct
            && let Some(ref token) = self.read_token
        {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::error!(error = %e, "Catalog API transport error");
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body).map_or_else(
                |_| format!("Request failed with status code {}", status.as_u16()),
                |error_body| error_body.status_message,
            );
            tracing::error!(status = status.as_u16(), %message, "Catalog API error");
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            endpoint: String::from(path),
            source,
        })
    }
}

/// Copy of `url` with the `api_key` value masked, for logging.
fn redact_api_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "api_key" {
                String::from("***")
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

impl CatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn trending(
        &self,
        media: MediaType,
        window: TimeWindow,
    ) -> Result<CatalogPage, CatalogError> {
        let path = format!("trending/{media}/{window}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn top_rated(&self, kind: MediaKind) -> Result<CatalogPage, CatalogError> {
        let path = format!("{kind}/top_rated");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn popular(&self, kind: MediaKind) -> Result<CatalogPage, CatalogError> {
        let path = format!("{kind}/popular");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn upcoming(&self) -> Result<CatalogPage, CatalogError> {
        self.get_json("movie/upcoming", &[]).await
    }

    #[instrument(skip_all)]
    async fn details(&self, kind: MediaKind, id: u64) -> Result<MediaDetails, CatalogError> {
        let path = format!("{kind}/{id}");
        let query = [("append_to_response", String::from(DETAILS_APPEND))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        let query = [("query", String::from(query))];
        self.get_json("search/multi", &query).await
    }

    #[instrument(skip_all)]
    async fn discover_by_genre(&self, genre_id: u32) -> Result<CatalogPage, CatalogError> {
        let query = [("with_genres", genre_id.to_string())];
        self.get_json("discover/movie", &query).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    const TARGET_BASE: &str = "https://api.themoviedb.org/3/";

    /// Builds a client whose relay is the mock server.
    fn relayed_client(server: &wiremock::MockServer) -> CatalogClient {
        CatalogClient::builder()
            .relay(Relay::Proxy(server.uri().parse().unwrap()))
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    /// Mounts a relay mock that answers `body` for the given target URL.
    async fn mount_relay(server: &wiremock::MockServer, target: &str, status: u16, body: &str) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/raw"))
            .and(wiremock::matchers::query_param("url", target))
            .respond_with(wiremock::ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn test_builder_requires_api_key() {
        // Arrange & Act
        let result = CatalogClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_key is required")
        );
    }

    #[test]
    fn test_builder_rejects_empty_api_key() {
        // Arrange & Act
        let result = CatalogClient::builder()
            .api_key("")
            .user_agent("test/0.0.0")
            .build();

        // Assert
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = CatalogClient::builder().api_key("test-key").build();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults_to_allorigins_relay() {
        // Arrange & Act
        let client = CatalogClient::builder()
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.relay(), &Relay::default_proxy().unwrap());
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_target_url_appends_language_then_api_key() {
        // Arrange
        let client = CatalogClient::builder()
            .api_key("k")
            .language("en-US")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let url = client
            .target_url("discover/movie", &[("with_genres", String::from("28"))])
            .unwrap();

        // Assert
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/discover/movie?with_genres=28&language=en-US&api_key=k"
        );
    }

    #[test]
    fn test_redact_api_key() {
        // Arrange
        let url = Url::parse("https://api.themoviedb.org/3/movie/1?api_key=secret&x=1").unwrap();

        // Act
        let redacted = redact_api_key(&url);

        // Assert
        assert!(!redacted.as_str().contains("secret"));
        assert!(redacted.as_str().contains("x=1"));
    }

    #[tokio::test]
    async fn test_trending_via_relay() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let body = include_str!("../../../../fixtures/catalog/trending_all_week.json");
        let target = format!("{TARGET_BASE}trending/all/week?api_key=test-key");
        mount_relay(&server, &target, 200, body).await;
        let client = relayed_client(&server);

        // Act
        let page = client
            .trending(MediaType::All, TimeWindow::Week)
            .await
            .unwrap();

        // Assert
        assert_eq!(page.len(), 4);
    }

    #[tokio::test]
    async fn test_top_rated_and_popular_paths() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let body = include_str!("../../../../fixtures/catalog/popular_movie.json");
        mount_relay(
            &server,
            &format!("{TARGET_BASE}tv/top_rated?api_key=test-key"),
            200,
            body,
        )
        .await;
        mount_relay(
            &server,
            &format!("{TARGET_BASE}movie/popular?api_key=test-key"),
            200,
            body,
        )
        .await;
        let client = relayed_client(&server);

        // Act
        let top = client.top_rated(MediaKind::Tv).await.unwrap();
        let popular = client.popular(MediaKind::Movie).await.unwrap();

        // Assert
        assert_eq!(top.len(), 2);
        assert_eq!(popular.len(), 2);
    }

    #[tokio::test]
    async fn test_upcoming_path() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let body = include_str!("../../../../fixtures/catalog/empty_page.json");
        let target = format!("{TARGET_BASE}movie/upcoming?api_key=test-key");
        mount_relay(&server, &target, 200, body).await;
        let client = relayed_client(&server);

        // Act
        let page = client.upcoming().await.unwrap();

        // Assert
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_details_appends_sub_resources() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let body = include_str!("../../../../fixtures/catalog/movie_details_533535.json");
        let target = format!(
            "{TARGET_BASE}movie/533535?append_to_response=videos%2Ccredits%2Csimilar&api_key=test-key"
        );
        mount_relay(&server, &target, 200, body).await;
        let client = relayed_client(&server);

        // Act
        let details = client.details(MediaKind::Movie, 533_535).await.unwrap();

        // Assert
        assert_eq!(details.id, 533_535);
        assert_eq!(details.tagline.as_deref(), Some("Come together."));
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let body = include_str!("../../../../fixtures/catalog/search_multi_bear.json");
        let target = format!("{TARGET_BASE}search/multi?query=the+bear&api_key=test-key");
        mount_relay(&server, &target, 200, body).await;
        let client = relayed_client(&server);

        // Act
        let page = client.search("the bear").await.unwrap();

        // Assert
        let results = page.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].display_title(), Some("The Bear"));
    }

    #[tokio::test]
    async fn test_discover_by_genre() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let body = include_str!("../../../../fixtures/catalog/popular_movie.json");
        let target = format!("{TARGET_BASE}discover/movie?with_genres=27&api_key=test-key");
        mount_relay(&server, &target, 200, body).await;
        let client = relayed_client(&server);

        // Act
        let page = client.discover_by_genre(27).await.unwrap();

        // Assert
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_api_error_carries_status_message() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        let target = format!("{TARGET_BASE}movie/popular?api_key=test-key");
        mount_relay(&server, &target, 401, error_body).await;
        let client = relayed_client(&server);

        // Act
        let err = client.popular(MediaKind::Movie).await.unwrap_err();

        // Assert
        assert!(matches!(err, CatalogError::Api { status: 401, .. }));
        assert_eq!(
            err.to_string(),
            "Invalid API key: You must be granted a valid key."
        );
    }

    #[tokio::test]
    async fn test_api_error_without_body_uses_status_line() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let target = format!("{TARGET_BASE}movie/upcoming?api_key=test-key");
        mount_relay(&server, &target, 502, "Bad Gateway").await;
        let client = relayed_client(&server);

        // Act
        let err = client.upcoming().await.unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "Request failed with status code 502");
    }

    #[tokio::test]
    async fn test_rate_limited_response_is_not_retried() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":25,"status_message":"Your request count is over the allowed limit.","success":false}"#;
        let target = format!("{TARGET_BASE}movie/upcoming?api_key=test-key");
        mount_relay(&server, &target, 429, error_body).await;
        let client = relayed_client(&server);

        // Act
        let result = client.upcoming().await;

        // Assert (mock expect(1) verifies a single attempt)
        assert!(matches!(result, Err(CatalogError::Api { status: 429, .. })));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let target = format!("{TARGET_BASE}movie/upcoming?api_key=test-key");
        mount_relay(&server, &target, 200, "<html>relay error</html>").await;
        let client = relayed_client(&server);

        // Act
        let err = client.upcoming().await.unwrap_err();

        // Assert
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_error() {
        // Arrange
        let client = CatalogClient::builder()
            .relay(Relay::Proxy(Url::parse("http://127.0.0.1:9/").unwrap()))
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let err = client.upcoming().await.unwrap_err();

        // Assert
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    async fn test_direct_mode_sends_bearer_token() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        let body = include_str!("../../../../fixtures/catalog/empty_page.json");
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/upcoming"))
            .and(wiremock::matchers::query_param("api_key", "test-key"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer read-token",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::builder()
            .base_url(format!("{}/3/", server.uri()).parse().unwrap())
            .relay(Relay::Direct)
            .api_key("test-key")
            .read_token("read-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act & Assert (mock expect(1) verifies path, key and header)
        client.upcoming().await.unwrap();
    }
}
