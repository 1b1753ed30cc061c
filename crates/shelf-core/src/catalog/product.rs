use serde::{Deserialize, Serialize};

use super::wire;

/// A product as stored by the catalog server.
///
/// The client never invents an `id`; it is assigned on create.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub title: String,
    pub category: String,
    pub unit: String,
    #[serde(with = "wire::price")]
    pub origin_price: f64,
    #[serde(with = "wire::price")]
    pub price: f64,
    pub description: String,
    pub content: String,
    #[serde(with = "wire::enabled_flag")]
    pub is_enabled: bool,
    #[serde(rename = "imagesUrl", deserialize_with = "wire::image_list")]
    pub images_url: Vec<String>,
}

impl Product {
    /// Short label used in confirmations and logs.
    pub fn label(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Formats a price for display, without a trailing `.0` for whole numbers.
pub fn display_price(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
