//! Wire encoding for the catalog API.
//!
//! The server stores the enabled flag as a 0/1 integer and is loose about
//! numeric types, so every coercion between the in-memory model and JSON
//! lives here.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Encodes the enabled flag for the wire.
pub fn enabled_to_wire(enabled: bool) -> u8 {
    u8::from(enabled)
}

/// Decodes an enabled flag sent as a bool, a number, or a numeric string.
pub fn enabled_from_wire(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(s.trim(), "1" | "true"),
        _ => false,
    }
}

/// Decodes a price sent as a number or a numeric string. Anything else is 0.
pub fn price_from_wire(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

pub mod enabled_flag {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(enabled: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::enabled_to_wire(*enabled))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::enabled_from_wire(&value))
    }
}

pub mod price {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*price)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::price_from_wire(&value))
    }
}

/// Image lists may be `null` or contain non-string junk; keep only strings.
///
/// # Errors
/// Returns an error only if the input is not valid JSON.
pub fn image_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(value
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Product fields sent on create and update.
///
/// `id` is omitted on create; the server assigns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub title: String,
    pub category: String,
    pub unit: String,
    pub origin_price: f64,
    pub price: f64,
    pub description: String,
    pub content: String,
    pub is_enabled: u8,
    #[serde(rename = "imagesUrl")]
    pub images_url: Vec<String>,
}

/// `{ "data": ... }` wrapper required by the mutation endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T> {
    pub data: &'a T,
}

#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    /// Expiry in epoch milliseconds.
    #[serde(alias = "expiry", deserialize_with = "expiry_millis")]
    pub expired: u64,
}

fn expiry_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let millis = price_from_wire(&value);
    if millis.is_finite() && millis > 0.0 {
        Ok(millis as u64)
    } else {
        Err(serde::de::Error::custom(format!(
            "invalid expiry timestamp: {value}"
        )))
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<crate::catalog::Product>,
}

/// Extracts `message` from an error body, joining list messages with "; ".
pub fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("message")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
