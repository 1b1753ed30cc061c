use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::error::{ApiError, ApiErrorKind, ApiResult, classify_reqwest_error};
use crate::catalog::wire::{Envelope, ProductsResponse, SignInRequest, SignInResponse};
use crate::catalog::{Product, ProductPayload};
use crate::config::{API_PATH_ENV, Config};
use crate::session::Session;

/// Standard User-Agent header for shelf API requests.
pub const USER_AGENT: &str = concat!("shelf/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the catalog admin API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    api_path: Option<String>,
    token: Option<String>,
}

impl CatalogClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    /// Returns a `Config` error if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        api_path: Option<String>,
        timeout: Option<Duration>,
    ) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::config(format!("Invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::config(format!(
                "Invalid base URL {base_url}: not a base URL"
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_path,
            token: None,
        })
    }

    /// Creates a client from the effective config values.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let base_url = config.effective_base_url()?;
        Ok(Self::new(
            &base_url,
            config.effective_api_path(),
            config.request_timeout(),
        )?)
    }

    /// Returns a clone that sends `token` on every request.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Exchanges credentials for a session.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects the credentials.
    pub async fn sign_in(&self, identifier: &str, secret: &str) -> ApiResult<Session> {
        let url = self.endpoint(&["v2", "admin", "signin"]);
        let body = SignInRequest {
            username: identifier,
            password: secret,
        };

        let response = self.send(self.http.post(url).json(&body), false).await?;
        let parsed: SignInResponse = decode(response).await?;
        if parsed.token.trim().is_empty() {
            return Err(ApiError::parse("Sign-in response did not include a token"));
        }

        Ok(Session {
            token: parsed.token,
            expires: parsed.expired,
            identifier: identifier.to_string(),
        })
    }

    /// Asks the server whether the current token is still valid.
    ///
    /// # Errors
    /// Returns `Unauthorized` if the server rejects the token.
    pub async fn check_session(&self) -> ApiResult<()> {
        let url = self.endpoint(&["v2", "api", "user", "check"]);
        let response = self.send(self.http.post(url), true).await?;

        let body = response.text().await.map_err(|e| classify_reqwest_error(&e))?;
        if let Ok(json) = serde_json::from_str::<Value>(&body)
            && json.get("success").and_then(Value::as_bool) == Some(false)
        {
            return Err(ApiError::new(
                ApiErrorKind::Unauthorized,
                "Session is no longer valid",
            ));
        }
        Ok(())
    }

    /// Fetches the full product list.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let url = self.catalog_endpoint(&["admin", "products"])?;
        let response = self.send(self.http.get(url), true).await?;
        let parsed: ProductsResponse = decode(response).await?;
        Ok(parsed.products)
    }

    /// Creates a product. The server assigns the id.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create_product(&self, payload: &ProductPayload) -> ApiResult<()> {
        let url = self.catalog_endpoint(&["admin", "product"])?;
        let body = ProductPayload {
            id: None,
            ..payload.clone()
        };
        self.mutate(Method::POST, url, Some(&body)).await
    }

    /// Replaces the product with the given id.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update_product(&self, id: &str, payload: &ProductPayload) -> ApiResult<()> {
        let url = self.catalog_endpoint(&["admin", "product", id])?;
        self.mutate(Method::PUT, url, Some(payload)).await
    }

    /// Deletes the product with the given id.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete_product(&self, id: &str) -> ApiResult<()> {
        let url = self.catalog_endpoint(&["admin", "product", id])?;
        self.mutate(Method::DELETE, url, None).await
    }

    async fn mutate(
        &self,
        method: Method,
        url: Url,
        payload: Option<&ProductPayload>,
    ) -> ApiResult<()> {
        let mut builder = self.http.request(method, url);
        if let Some(payload) = payload {
            builder = builder.json(&Envelope { data: payload });
        }
        self.send(builder, true).await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn catalog_endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let api_path = self.api_path.as_deref().ok_or_else(|| {
            ApiError::config(format!(
                "No catalog path configured. Set {API_PATH_ENV} or api_path in config.toml."
            ))
        })?;

        let mut all = vec!["v2", "api", api_path];
        all.extend_from_slice(segments);
        Ok(self.endpoint(&all))
    }

    async fn send(&self, builder: RequestBuilder, authorized: bool) -> ApiResult<Response> {
        let builder = builder.header("accept", "application/json");
        let builder = if authorized {
            let token = self.token.as_deref().ok_or_else(|| {
                ApiError::new(ApiErrorKind::Unauthorized, "Not signed in")
            })?;
            builder.header("authorization", token)
        } else {
            builder
        };

        let request = builder.build().map_err(|e| classify_reqwest_error(&e))?;
        debug!(method = %request.method(), url = %request.url(), "api request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "api response");
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &error_body));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await.map_err(|e| classify_reqwest_error(&e))?;
    serde_json::from_str(&body).map_err(|e| ApiError {
        kind: ApiErrorKind::Parse,
        message: format!("Failed to parse response: {e}"),
        details: Some(body),
    })
}
