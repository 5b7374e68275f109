//! GraphQL over HTTP client
//!
//! This module implements the request envelope, client configuration and the
//! reqwest-backed transport. Every operation is sent as a JSON `POST` to the
//! single configured endpoint with a static `Authorization` header.

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::error::GraphqlError;
use crate::Result;

// =============================================================================
// Request Types
// =============================================================================

/// GraphQL request body
///
/// # Examples
/// ```
/// use graphql_client::GraphqlRequest;
///
/// let request = GraphqlRequest::new("query GetCustomers { getCustomers { name } }")
///     .operation_name("GetCustomers");
/// assert_eq!(request.operation_name.as_deref(), Some("GetCustomers"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    /// Query document
    pub query: String,
    /// Operation to run when the document holds several
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    /// Create a new request from a query document
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
        }
    }

    /// Set the operation name
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Standard GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    /// Operation result
    pub data: Option<T>,
    /// Errors reported by the server
    #[serde(default)]
    pub errors: Vec<GraphqlErrorResponse>,
}

/// One entry of the `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlErrorResponse {
    /// Error message
    pub message: String,
    /// Path into the response the error applies to
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

impl<T> GraphqlResponse<T> {
    /// Turn the envelope into the data or the reported failure
    pub fn into_result(self) -> Result<T> {
        if !self.errors.is_empty() {
            return Err(GraphqlError::Graphql(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data
            .ok_or_else(|| GraphqlError::Schema("response carried no data".to_string()))
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the GraphQL client
#[derive(Debug, Clone)]
pub struct GraphqlClientConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Value sent in the `Authorization` header of every request
    pub auth_header: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl GraphqlClientConfig {
    /// Create a new config for an endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_header: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("courier-shell/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }

    /// Set the raw `Authorization` header value
    pub fn with_auth_header(mut self, value: impl Into<String>) -> Self {
        self.auth_header = Some(value.into());
        self
    }

    /// Authorize with an API key (`Authorization: apikey <key>`)
    pub fn with_api_key(self, key: impl AsRef<str>) -> Self {
        self.with_auth_header(format!("apikey {}", key.as_ref()))
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Transport
// =============================================================================

/// Something that can run a GraphQL operation and hand back its `data`
///
/// The HTTP client is the production implementation; tests substitute
/// scripted or mocked transports.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Execute the request and return the `data` object of the response
    async fn execute(&self, request: GraphqlRequest) -> Result<serde_json::Value>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// GraphQL client for a single endpoint
///
/// # Examples
/// ```
/// use graphql_client::{GraphqlClient, GraphqlClientConfig};
///
/// let config = GraphqlClientConfig::new("https://example.stepzen.net/api/demo/__graphql")
///     .with_api_key("secret");
/// let client = GraphqlClient::new(config).unwrap();
/// assert_eq!(client.endpoint().host_str(), Some("example.stepzen.net"));
/// ```
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    /// HTTP client
    client: ReqwestClient,
    /// Parsed endpoint
    endpoint: Url,
    /// Validated headers sent with every request
    headers: Vec<(HeaderName, HeaderValue)>,
    /// Configuration
    config: GraphqlClientConfig,
}

impl GraphqlClient {
    /// Create a new client, validating the endpoint and headers
    pub fn new(config: GraphqlClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| GraphqlError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(GraphqlError::InvalidEndpoint(format!(
                "{}: unsupported scheme {}",
                config.endpoint,
                endpoint.scheme()
            )));
        }

        let mut headers = Vec::with_capacity(config.default_headers.len() + 1);
        for (key, value) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| GraphqlError::InvalidHeader(format!("name {key}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| GraphqlError::InvalidHeader(format!("value for {key}")))?;
            headers.push((name, value));
        }
        if let Some(auth) = &config.auth_header {
            let mut value = HeaderValue::from_str(auth)
                .map_err(|_| GraphqlError::InvalidHeader("value for Authorization".to_string()))?;
            value.set_sensitive(true);
            headers.push((AUTHORIZATION, value));
        }

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| GraphqlError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            headers,
            config,
        })
    }

    /// Run a request and deserialize its `data` into `T`
    pub async fn query<T>(&self, request: GraphqlRequest) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.send(&request).await?;
        self.parse_response(response).await
    }

    /// Send the request
    async fn send(&self, request: &GraphqlRequest) -> Result<ReqwestResponse> {
        let mut req = self.client.post(self.endpoint.clone()).json(request);

        for (name, value) in &self.headers {
            req = req.header(name.clone(), value.clone());
        }

        req.send()
            .await
            .map_err(|e| GraphqlError::Network(format!("Request failed: {}", e)))
    }

    /// Parse the HTTP response into the `data` payload
    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GraphqlError::Auth {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GraphqlError::Network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(GraphqlError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphqlResponse<T> = serde_json::from_str(&body)?;
        envelope.into_result()
    }

    /// Get the client configuration
    pub fn config(&self) -> &GraphqlClientConfig {
        &self.config
    }

    /// Get the parsed endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GraphqlTransport for GraphqlClient {
    async fn execute(&self, request: GraphqlRequest) -> Result<serde_json::Value> {
        self.query(request).await
    }
}

// =============================================================================
// Tests
// =============================================================================
