use serde::{Deserialize, Serialize};
use wearmatch_scoring::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub base_price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub ai_tags: Vec<String>,
    pub active: bool,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Scoring view of a product: union of its variant colors plus its AI
    /// tags. Duplicate colors collapse case-insensitively, first spelling
    /// wins, order otherwise preserved.
    pub fn to_candidate(&self) -> Candidate {
        let mut colors: Vec<String> = Vec::with_capacity(self.variants.len());
        for variant in &self.variants {
            let hex = variant.color_hex.as_str();
            if !colors.iter().any(|seen| seen.eq_ignore_ascii_case(hex)) {
                colors.push(hex.to_string());
            }
        }
        Candidate {
            id: self.id.clone(),
            colors,
            tags: self.ai_tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub size: String,
    pub color_name: String,
    pub color_hex: String,
    pub stock: u32,
    #[serde(default)]
    pub price_adjustment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub total_amount: f64,
    pub shipping_cost: f64,
    pub status: OrderStatus,
    pub shipping_address: serde_json::Value,
    pub items: Vec<OrderItem>,
}
