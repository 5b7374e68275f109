//! Application state management for Courier Shell
//!
//! This crate provides the remote data client: typed list queries with a
//! tri-state result, a normalized cache and in-flight de-duplication.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod query;

pub use cache::{EntityKey, NormalizedCache};
pub use query::{
    ClientError, ErrorInfo, FetchPolicy, QueryHandle, QueryResult, QueryStatus, RemoteDataClient,
    RemoteDataClientConfig,
};
