//! Entity types served by the GraphQL endpoint
//!
//! Both entities are immutable once fetched. Field names follow the
//! endpoint's schema, including its capitalized `Address`/`City`/`Lat`/`Lng`.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A normalizable entity
///
/// `identity` must be stable for the same logical record across responses;
/// the normalized cache stores one copy per `(TYPENAME, identity)`.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static
{
    /// GraphQL type name
    const TYPENAME: &'static str;

    /// Identity of this record within its type
    fn identity(&self) -> String;
}

/// A customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Display name (not guaranteed unique)
    pub name: String,
    /// Email address
    pub email: String,
}

impl Entity for Customer {
    const TYPENAME: &'static str = "Customer";

    // Names collide, so the email is part of the identity
    fn identity(&self) -> String {
        format!("{}/{}", self.email, self.name)
    }
}

/// An order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Tracking identifier (identity key)
    #[serde(rename = "trackingId")]
    pub tracking_id: String,
    /// Street address
    #[serde(rename = "Address")]
    pub address: String,
    /// City
    #[serde(rename = "City")]
    pub city: String,
    /// Latitude
    #[serde(rename = "Lat")]
    pub lat: f64,
    /// Longitude
    #[serde(rename = "Lng")]
    pub lng: f64,
    /// Carrier name
    pub carrier: String,
    /// When the order was created
    #[serde(rename = "createdAt", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Shipping cost
    #[serde(rename = "shippingCost")]
    pub shipping_cost: f64,
}

impl Entity for Order {
    const TYPENAME: &'static str = "Order";

    fn identity(&self) -> String {
        self.tracking_id.clone()
    }
}

/// Accept either an RFC 3339 string or epoch milliseconds
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
                return Ok(parsed.with_timezone(&Utc));
            }
            // Numeric strings are epoch milliseconds
            text.parse::<i64>()
                .ok()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", text)))
        }
        Raw::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
    }
}
