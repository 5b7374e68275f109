//! Query definitions
//!
//! The endpoint exposes two read-only list queries. Each is a unit type so it
//! can be passed around as a value and still carry its document statically.

use crate::client::GraphqlRequest;
use crate::types::{Customer, Entity, Order};

/// A read-only query whose root field is a list of entities
pub trait QueryDefinition: Send + Sync + 'static {
    /// Entity type of the list
    type Item: Entity;

    /// GraphQL operation name
    const OPERATION_NAME: &'static str;

    /// Field of `data` holding the list
    const ROOT_FIELD: &'static str;

    /// Query document
    const DOCUMENT: &'static str;

    /// Build the request for this query
    fn request(&self) -> GraphqlRequest {
        GraphqlRequest::new(Self::DOCUMENT).operation_name(Self::OPERATION_NAME)
    }
}

/// `GetOrders` query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOrders;

impl QueryDefinition for GetOrders {
    type Item = Order;

    const OPERATION_NAME: &'static str = "GetOrders";
    const ROOT_FIELD: &'static str = "getOrders";
    const DOCUMENT: &'static str = r#"query GetOrders {
  getOrders {
    Address
    City
    Lat
    Lng
    carrier
    createdAt
    shippingCost
    trackingId
  }
}"#;
}

/// `GetCustomers` query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetCustomers;

impl QueryDefinition for GetCustomers {
    type Item = Customer;

    const OPERATION_NAME: &'static str = "GetCustomers";
    const ROOT_FIELD: &'static str = "getCustomers";
    const DOCUMENT: &'static str = r#"query GetCustomers {
  getCustomers {
    email
    name
  }
}"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_document_selects_all_fields() {
        for field in [
            "Address",
            "City",
            "Lat",
            "Lng",
            "carrier",
            "createdAt",
            "shippingCost",
            "trackingId",
        ] {
            assert!(GetOrders::DOCUMENT.contains(field), "missing {field}");
        }
        assert!(GetOrders::DOCUMENT.starts_with("query GetOrders"));
    }

    #[test]
    fn test_customers_document_selects_all_fields() {
        assert!(GetCustomers::DOCUMENT.contains("email"));
        assert!(GetCustomers::DOCUMENT.contains("name"));
        assert!(GetCustomers::DOCUMENT.contains(GetCustomers::ROOT_FIELD));
    }

    #[test]
    fn test_request_carries_operation_name() {
        let request = GetCustomers.request();
        assert_eq!(request.operation_name.as_deref(), Some("GetCustomers"));
        assert_eq!(request.query, GetCustomers::DOCUMENT);

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("variables").is_none());
    }
}
