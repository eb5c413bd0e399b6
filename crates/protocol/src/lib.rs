use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request body for `POST /ai-match`.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub sneaker_image: String,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

impl MatchRequest {
    pub fn styles(&self) -> &[String] {
        self.preferences
            .as_ref()
            .map(|p| p.style.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, JsonSchema)]
pub struct Preferences {
    #[serde(default)]
    pub style: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct MatchResponse {
    pub matches: Vec<ProductMatch>,
}

/// A catalog product plus its scores for one request.
///
/// Product fields stay snake_case to mirror the catalog schema; score
/// fields are camelCase to match the storefront API.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ProductMatch {
    pub id: String,
    pub title: String,
    pub base_price: f64,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub ai_tags: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub variants: Vec<VariantInfo>,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "colorScore")]
    pub color_score: f64,
    #[serde(rename = "styleScore")]
    pub style_score: f64,
}

/// One purchasable variant of a matched product.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct VariantInfo {
    pub id: String,
    pub size: String,
    pub color_name: String,
    pub color_hex: String,
    pub stock: u32,
    #[serde(default)]
    pub price_adjustment: f64,
}

/// Request body for `POST /checkout`.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub cart_items: Vec<CheckoutItem>,
    #[serde(default)]
    pub shipping_address: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CheckoutItem {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: String,
    pub total_amount: f64,
    pub shipping_cost: f64,
    pub status: String,
}

/// Uniform error envelope for every non-2xx response.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub products: usize,
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_request_accepts_storefront_payloads() {
        let req: MatchRequest = serde_json::from_str(
            r#"{"sneakerImage": "data:image/png;base64,AAAA",
                "preferences": {"style": ["sport", "retro"]}}"#,
        )
        .unwrap();
        assert_eq!(req.sneaker_image, "data:image/png;base64,AAAA");
        assert_eq!(req.styles(), ["sport", "retro"]);
    }

    #[test]
    fn match_request_tolerates_missing_fields() {
        let req: MatchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.sneaker_image.is_empty());
        assert!(req.styles().is_empty());
    }

    #[test]
    fn product_match_scores_are_camel_case_on_the_wire() {
        let entry = ProductMatch {
            id: "p1".to_string(),
            title: "Tee".to_string(),
            base_price: 24.0,
            description: None,
            images: Vec::new(),
            ai_tags: Vec::new(),
            active: true,
            variants: vec![VariantInfo {
                id: "v1".to_string(),
                size: "10".to_string(),
                color_name: "Red".to_string(),
                color_hex: "#FF0000".to_string(),
                stock: 4,
                price_adjustment: 0.0,
            }],
            match_score: 85.0,
            color_score: 100.0,
            style_score: 50.0,
        };
        let json = serialize_json(&entry).unwrap();
        assert!(json.contains("\"matchScore\":85.0"));
        assert!(json.contains("\"colorScore\":100.0"));
        assert!(json.contains("\"base_price\":24.0"));
        assert!(json.contains("\"variants\":[{\"id\":\"v1\""));
        assert!(json.contains("\"active\":true"));
    }

    #[test]
    fn checkout_request_round_trips() {
        let req: CheckoutRequest = serde_json::from_str(
            r#"{"cartItems": [{"product_id": "p1", "variant_id": "v1", "quantity": 2}],
                "shippingAddress": {"city": "Portland"}}"#,
        )
        .unwrap();
        assert_eq!(req.cart_items.len(), 1);
        assert_eq!(req.cart_items[0].quantity, 2);
        assert_eq!(req.shipping_address["city"], "Portland");
    }
}
