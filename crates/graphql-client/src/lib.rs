//! GraphQL client library for the courier shell
//!
//! This crate provides the wire layer of the shell: endpoint configuration,
//! the GraphQL request/response envelope, an HTTP transport built on reqwest,
//! the entity types served by the endpoint and the two read-only queries the
//! screens bind to.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod queries;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{GraphqlClient, GraphqlClientConfig, GraphqlRequest, GraphqlTransport};
pub use error::{ErrorKind, GraphqlError};
pub use queries::{GetCustomers, GetOrders, QueryDefinition};
pub use types::{Customer, Entity, Order};

/// Result type for GraphQL operations
pub type Result<T> = std::result::Result<T, GraphqlError>;
