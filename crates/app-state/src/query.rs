//! Query management
//!
//! This module provides the remote data client: it runs the typed list queries
//! against the configured GraphQL endpoint and exposes every execution as a
//! [`QueryResult`] that starts out pending and settles on success or error.
//! Results are written to a normalized cache, and identical queries in flight
//! at the same time share one round trip.

use graphql_client::{
    GraphqlClient, GraphqlClientConfig, GraphqlError, GraphqlRequest, GraphqlTransport,
    QueryDefinition,
};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tokio::sync::watch;

use crate::cache::NormalizedCache;

/// Errors configuring or installing the client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint or header rejected by the transport
    #[error("Transport configuration failed: {0}")]
    Transport(#[from] GraphqlError),

    /// A process-wide client is already installed
    #[error("Remote data client already installed")]
    AlreadyInstalled,
}

/// Result type for client configuration
pub type Result<T> = std::result::Result<T, ClientError>;

// =============================================================================
// Query Results
// =============================================================================

/// Failure surfaced to screens
///
/// Network, schema and authorization failures all arrive as this one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Human-readable message
    pub message: String,
}

impl ErrorInfo {
    /// Create a new error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&GraphqlError> for ErrorInfo {
    fn from(err: &GraphqlError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<GraphqlError> for ErrorInfo {
    fn from(err: GraphqlError) -> Self {
        Self::from(&err)
    }
}

/// Query status without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Waiting for the response
    Pending,
    /// Data arrived
    Success,
    /// The query failed
    Error,
}

/// Outcome of one query execution
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    /// Waiting for the response
    Pending,
    /// Data arrived
    Success(T),
    /// The query failed
    Error(ErrorInfo),
}

impl<T> QueryResult<T> {
    /// Get the status
    pub fn status(&self) -> QueryStatus {
        match self {
            QueryResult::Pending => QueryStatus::Pending,
            QueryResult::Success(_) => QueryStatus::Success,
            QueryResult::Error(_) => QueryStatus::Error,
        }
    }

    /// Check if still waiting
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryResult::Pending)
    }

    /// Data, if the query succeeded
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryResult::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Error, if the query failed
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            QueryResult::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Transform the data
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryResult<U> {
        match self {
            QueryResult::Pending => QueryResult::Pending,
            QueryResult::Success(data) => QueryResult::Success(f(data)),
            QueryResult::Error(error) => QueryResult::Error(error),
        }
    }
}

impl<T> From<std::result::Result<T, GraphqlError>> for QueryResult<T> {
    fn from(result: std::result::Result<T, GraphqlError>) -> Self {
        match result {
            Ok(data) => QueryResult::Success(data),
            Err(e) => QueryResult::Error(ErrorInfo::from(&e)),
        }
    }
}

/// Live view of one query execution
///
/// The handle is returned synchronously; [`QueryHandle::current`] is pending
/// until the network call settles.
#[derive(Debug, Clone)]
pub struct QueryHandle<T> {
    receiver: watch::Receiver<QueryResult<Vec<T>>>,
}

impl<T: Clone> QueryHandle<T> {
    /// A handle that is already settled
    fn ready(result: QueryResult<Vec<T>>) -> Self {
        let (_sender, receiver) = watch::channel(result);
        Self { receiver }
    }

    /// Current result, without waiting
    pub fn current(&self) -> QueryResult<Vec<T>> {
        self.receiver.borrow().clone()
    }

    /// Wait until the query settles
    pub async fn resolved(mut self) -> QueryResult<Vec<T>> {
        let result = match self.receiver.wait_for(|r| !r.is_pending()).await {
            Ok(settled) => (*settled).clone(),
            Err(_) => QueryResult::Error(ErrorInfo::new(
                "query task ended before producing a result",
            )),
        };
        result
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Where a query execution may read its data from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Answer from the cache when the root is cached, else go to the network
    #[default]
    CacheFirst,
    /// Always go to the network
    NetworkOnly,
}

/// Remote data client configuration
#[derive(Debug, Clone)]
pub struct RemoteDataClientConfig {
    /// Let identical in-flight queries share one round trip
    pub dedupe_in_flight: bool,
    /// Policy used by [`RemoteDataClient::execute`]
    pub default_policy: FetchPolicy,
}

impl Default for RemoteDataClientConfig {
    fn default() -> Self {
        Self {
            dedupe_in_flight: true,
            default_policy: FetchPolicy::CacheFirst,
        }
    }
}

impl RemoteDataClientConfig {
    /// Enable or disable in-flight de-duplication
    pub fn dedupe_in_flight(mut self, enabled: bool) -> Self {
        self.dedupe_in_flight = enabled;
        self
    }

    /// Set the default fetch policy
    pub fn default_policy(mut self, policy: FetchPolicy) -> Self {
        self.default_policy = policy;
        self
    }
}

// =============================================================================
// Remote Data Client
// =============================================================================

static GLOBAL: OnceLock<RemoteDataClient> = OnceLock::new();

struct ClientInner {
    transport: Arc<dyn GraphqlTransport>,
    cache: NormalizedCache,
    /// Type-erased `watch::Receiver<QueryResult<Vec<Item>>>` per operation
    in_flight: Mutex<HashMap<&'static str, Box<dyn Any + Send + Sync>>>,
    config: RemoteDataClientConfig,
}

/// Client for the remote GraphQL data source
///
/// Cloning is cheap; clones share the transport, cache and in-flight table.
///
/// # Example
///
/// ```no_run
/// use app_state::query::{QueryResult, RemoteDataClient};
/// use graphql_client::GetCustomers;
///
/// #[tokio::main]
/// async fn main() {
///     let client = RemoteDataClient::configure(
///         "https://example.stepzen.net/api/demo/__graphql",
///         "apikey secret",
///     )
///     .unwrap();
///
///     let handle = client.execute(GetCustomers);
///     assert!(handle.current().is_pending());
///
///     if let QueryResult::Success(customers) = handle.resolved().await {
///         println!("{} customers", customers.len());
///     }
/// }
/// ```
#[derive(Clone)]
pub struct RemoteDataClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for RemoteDataClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteDataClient")
            .field("config", &self.inner.config)
            .field("cached_entities", &self.inner.cache.entity_count())
            .finish()
    }
}

impl RemoteDataClient {
    /// Build a client for an endpoint and a static `Authorization` value
    ///
    /// Only the endpoint syntax and header are checked here; an unreachable
    /// endpoint surfaces later as the error branch of each query.
    pub fn configure(endpoint: &str, auth_header: &str) -> Result<Self> {
        Self::from_config(GraphqlClientConfig::new(endpoint).with_auth_header(auth_header))
    }

    /// Build a client from a full transport configuration
    pub fn from_config(config: GraphqlClientConfig) -> Result<Self> {
        let transport = GraphqlClient::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            RemoteDataClientConfig::default(),
        ))
    }

    /// Build a client over any transport
    pub fn with_transport(
        transport: Arc<dyn GraphqlTransport>,
        config: RemoteDataClientConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                cache: NormalizedCache::new(),
                in_flight: Mutex::new(HashMap::new()),
                config,
            }),
        }
    }

    /// Make this the process-wide client
    pub fn install(self) -> Result<&'static RemoteDataClient> {
        let mut installed = false;
        let client = GLOBAL.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            Ok(client)
        } else {
            Err(ClientError::AlreadyInstalled)
        }
    }

    /// The process-wide client, if installed
    pub fn global() -> Option<&'static RemoteDataClient> {
        GLOBAL.get()
    }

    /// Execute a query with the default fetch policy
    pub fn execute<Q: QueryDefinition>(&self, query: Q) -> QueryHandle<Q::Item> {
        self.execute_with(query, self.inner.config.default_policy)
    }

    /// Execute a query with an explicit fetch policy
    ///
    /// Without a Tokio runtime on the calling thread, anything the cache cannot
    /// answer settles immediately in the error branch.
    pub fn execute_with<Q: QueryDefinition>(
        &self,
        query: Q,
        policy: FetchPolicy,
    ) -> QueryHandle<Q::Item> {
        if policy == FetchPolicy::CacheFirst {
            if let Some(items) = self.inner.cache.read_list::<Q::Item>(Q::ROOT_FIELD) {
                tracing::debug!(operation = Q::OPERATION_NAME, "Answered from cache");
                return QueryHandle::ready(QueryResult::Success(items));
            }
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!("Query {} issued outside a Tokio runtime: {}", Q::OPERATION_NAME, e);
                return QueryHandle::ready(QueryResult::Error(ErrorInfo::new(
                    "no async runtime available to run the query",
                )));
            }
        };

        let dedupe = self.inner.config.dedupe_in_flight;
        let mut in_flight = self.inner.in_flight.lock();

        if dedupe {
            let joined = in_flight.get(Q::OPERATION_NAME).and_then(|entry| {
                entry.downcast_ref::<watch::Receiver<QueryResult<Vec<Q::Item>>>>()
            });
            if let Some(receiver) = joined {
                tracing::debug!(operation = Q::OPERATION_NAME, "Joined in-flight query");
                return QueryHandle {
                    receiver: receiver.clone(),
                };
            }
        }

        let (sender, receiver) = watch::channel(QueryResult::Pending);
        if dedupe {
            in_flight.insert(Q::OPERATION_NAME, Box::new(receiver.clone()));
        }
        drop(in_flight);

        tracing::debug!(operation = Q::OPERATION_NAME, ?policy, "Issuing query");

        let inner = Arc::clone(&self.inner);
        let request = query.request();
        runtime.spawn(async move {
            let result: QueryResult<Vec<Q::Item>> = match inner.fetch_list::<Q>(request).await {
                Ok(items) => QueryResult::Success(items),
                Err(e) => {
                    tracing::warn!("Query {} failed: {}", Q::OPERATION_NAME, e);
                    QueryResult::Error(ErrorInfo::from(&e))
                }
            };

            // Later callers must start a fresh fetch rather than join a settled one
            if dedupe {
                inner.in_flight.lock().remove(Q::OPERATION_NAME);
            }
            let _ = sender.send(result);
        });

        QueryHandle { receiver }
    }

    /// Check if a query is currently in flight
    pub fn is_in_flight<Q: QueryDefinition>(&self) -> bool {
        self.inner.in_flight.lock().contains_key(Q::OPERATION_NAME)
    }

    /// The normalized cache
    pub fn cache(&self) -> &NormalizedCache {
        &self.inner.cache
    }

    /// Drop all cached data
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Get the client configuration
    pub fn config(&self) -> &RemoteDataClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Fetch, decode and cache a list query
    async fn fetch_list<Q: QueryDefinition>(
        &self,
        request: GraphqlRequest,
    ) -> std::result::Result<Vec<Q::Item>, GraphqlError> {
        let data = self.transport.execute(request).await?;

        let root = data.get(Q::ROOT_FIELD).ok_or_else(|| {
            GraphqlError::Schema(format!("response has no field {}", Q::ROOT_FIELD))
        })?;
        let items: Vec<Q::Item> = serde_json::from_value(root.clone())?;

        if let Err(e) = self.cache.write_list(Q::ROOT_FIELD, &items) {
            tracing::warn!("Failed to cache {}: {}", Q::ROOT_FIELD, e);
        }

        Ok(items)
    }
}
