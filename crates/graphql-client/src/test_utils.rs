//! Test utilities and fixtures for GraphQL client testing
//!
//! This module provides entity fixtures, response payload builders and a
//! scripted transport whose replies can be held back to force out-of-order
//! arrival.

#![allow(dead_code)] // Test utilities may not all be used by every crate

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::client::{GraphqlRequest, GraphqlTransport};
use crate::error::GraphqlError;
use crate::types::{Customer, Order};
use crate::Result;

/// Customer fixtures
pub mod customers {
    use super::*;

    /// Ana
    pub fn ana() -> Customer {
        Customer {
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    /// Bo
    pub fn bo() -> Customer {
        Customer {
            name: "Bo".to_string(),
            email: "b@x.com".to_string(),
        }
    }

    /// Ana and Bo, in that order
    pub fn pair() -> Vec<Customer> {
        vec![ana(), bo()]
    }

    /// `data` payload of a `GetCustomers` response
    pub fn data(customers: &[Customer]) -> Value {
        json!({ "getCustomers": customers })
    }
}

/// Order fixtures
pub mod orders {
    use super::*;

    /// Raw JSON for one order as the endpoint sends it
    pub fn raw(tracking_id: &str, city: &str, carrier: &str) -> Value {
        json!({
            "Address": "221B Baker Street",
            "City": city,
            "Lat": 51.5237,
            "Lng": -0.1585,
            "carrier": carrier,
            "createdAt": "2023-01-02T03:04:05Z",
            "shippingCost": 9.99,
            "trackingId": tracking_id
        })
    }

    /// An order parsed from [`raw`]
    pub fn order(tracking_id: &str, city: &str, carrier: &str) -> Order {
        serde_json::from_value(raw(tracking_id, city, carrier)).expect("fixture order is valid")
    }

    /// `data` payload of a `GetOrders` response
    pub fn data(raw_orders: &[Value]) -> Value {
        json!({ "getOrders": raw_orders })
    }
}

/// One scripted reply
#[derive(Debug, Clone)]
pub struct ScriptedReply {
    result: Result<Value>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedReply {
    /// Reply with this `data` payload
    pub fn data(data: Value) -> Self {
        Self {
            result: Ok(data),
            gate: None,
        }
    }

    /// Reply with an error
    pub fn error(error: GraphqlError) -> Self {
        Self {
            result: Err(error),
            gate: None,
        }
    }

    /// Hold the reply until the gate is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

/// Transport that replays queued replies per operation name
///
/// A call for an operation with nothing queued fails with a network error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<ScriptedReply>>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    /// Create an empty transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for an operation
    pub fn push(&self, operation: &str, reply: ScriptedReply) -> &Self {
        self.replies
            .lock()
            .expect("scripted transport lock")
            .entry(operation.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Number of requests received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphqlTransport for ScriptedTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let operation = request.operation_name.unwrap_or_default();
        let reply = self
            .replies
            .lock()
            .expect("scripted transport lock")
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);

        let Some(reply) = reply else {
            return Err(GraphqlError::Network(format!(
                "no scripted reply for {}",
                operation
            )));
        };

        if let Some(gate) = reply.gate {
            gate.notified().await;
        }
        reply.result
    }
}
