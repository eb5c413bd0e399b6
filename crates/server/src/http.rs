use crate::AppState;
use axum::{
    body::{Body, Bytes},
    http::{header::AUTHORIZATION, HeaderMap, Response as HttpResponse, StatusCode},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use wearmatch_catalog::{OrderDraft, OrderItem, ProductVariant};
use wearmatch_protocol::{
    serialize_json, CheckoutRequest, CheckoutResponse, ErrorBody, HealthReport, MatchRequest,
    MatchResponse, ProductMatch, VariantInfo,
};
use wearmatch_scoring::rank_candidates;

// Permissive CORS matching the storefront clients, which send the
// supabase-era headers alongside content-type.
const CORS_ALLOW_ORIGIN: &str = "*";
const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

const FREE_SHIPPING_MINIMUM: f64 = 50.0;
const FLAT_SHIPPING_COST: f64 = 5.99;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/ai-match",
            post({
                let state = state.clone();
                move |body| ai_match(state.clone(), body)
            })
            .options(preflight),
        )
        .route(
            "/checkout",
            post({
                let state = state.clone();
                move |headers, body| checkout(state.clone(), headers, body)
            })
            .options(preflight),
        )
        .route(
            "/health",
            get({
                let state = state.clone();
                move || health(state.clone())
            }),
        )
}

async fn ai_match(state: Arc<AppState>, body: Bytes) -> Response {
    let request: MatchRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON request: {err}"),
            )
        }
    };

    if request.sneaker_image.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Sneaker image is required");
    }

    let palette = match state.extractor.extract(&request.sneaker_image).await {
        Ok(palette) => palette,
        Err(err) => {
            log::error!("Color extraction failed: {err}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    let products = state.store.active_products();
    let candidates = products
        .iter()
        .map(|product| product.to_candidate())
        .collect();
    let ranked = rank_candidates(&state.weights, &palette, request.styles(), candidates);

    // `scored.idx` indexes into the snapshot the candidates were built from,
    // so every ranked entry resolves back to its product.
    let matches: Vec<ProductMatch> = ranked
        .into_iter()
        .map(|scored| {
            let product = products[scored.idx];
            ProductMatch {
                id: product.id.clone(),
                title: product.title.clone(),
                base_price: product.base_price,
                description: product.description.clone(),
                images: product.images.clone(),
                ai_tags: product.ai_tags.clone(),
                active: product.active,
                variants: product.variants.iter().map(variant_info).collect(),
                match_score: scored.match_score,
                color_score: scored.color_score,
                style_score: scored.style_score,
            }
        })
        .collect();

    json_response(StatusCode::OK, &MatchResponse { matches })
}

async fn checkout(state: Arc<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let request: CheckoutRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON request: {err}"),
            )
        }
    };

    if request.cart_items.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Cart is empty");
    }

    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let user_id = headers
        .get("x-client-info")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
        .to_string();

    let mut subtotal = 0.0;
    let mut items = Vec::with_capacity(request.cart_items.len());
    for item in &request.cart_items {
        // Stale carts can reference retired variants; skip them rather
        // than failing the whole checkout.
        let Ok((product, variant)) = state.store.find_variant(&item.variant_id) else {
            log::warn!("Skipping cart item with unknown variant {}", item.variant_id);
            continue;
        };
        subtotal += product.base_price * f64::from(item.quantity);
        items.push(OrderItem {
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
            quantity: item.quantity,
            unit_price: product.base_price,
        });
    }

    let shipping_cost = if subtotal >= FREE_SHIPPING_MINIMUM {
        0.0
    } else {
        FLAT_SHIPPING_COST
    };
    let total_amount = subtotal + shipping_cost;

    let draft = OrderDraft {
        user_id,
        total_amount,
        shipping_cost,
        shipping_address: request.shipping_address,
        items,
    };
    let order = match state.store.place_order(draft).await {
        Ok(order) => order,
        Err(err) => {
            log::error!("Checkout failed: {err}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    json_response(
        StatusCode::OK,
        &CheckoutResponse {
            order_id: order.id,
            total_amount: order.total_amount,
            shipping_cost: order.shipping_cost,
            status: "pending".to_string(),
        },
    )
}

fn variant_info(variant: &ProductVariant) -> VariantInfo {
    VariantInfo {
        id: variant.id.clone(),
        size: variant.size.clone(),
        color_name: variant.color_name.clone(),
        color_hex: variant.color_hex.clone(),
        stock: variant.stock,
        price_adjustment: variant.price_adjustment,
    }
}

async fn health(state: Arc<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        &HealthReport {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            products: state.store.len(),
        },
    )
}

/// Empty 200 for CORS preflights, mirroring the storefront edge functions.
async fn preflight() -> Response {
    with_cors(HttpResponse::builder().status(StatusCode::OK))
        .body(Body::empty())
        .expect("valid HTTP response")
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(token) = &state.auth_token else {
        return Ok(());
    };
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| token.matches_http_authorization_header(value))
        .unwrap_or(false);
    if authorized {
        Ok(())
    } else {
        Err(error_response(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

fn with_cors(builder: axum::http::response::Builder) -> axum::http::response::Builder {
    builder
        .header("access-control-allow-origin", CORS_ALLOW_ORIGIN)
        .header("access-control-allow-headers", CORS_ALLOW_HEADERS)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serialize_json(body) {
        Ok(json) => with_cors(HttpResponse::builder().status(status))
            .header("content-type", "application/json")
            .body(Body::from(json))
            .expect("valid HTTP response"),
        Err(err) => {
            log::error!("Failed to serialize response: {err}");
            with_cors(HttpResponse::builder().status(StatusCode::INTERNAL_SERVER_ERROR))
                .body(Body::empty())
                .expect("valid HTTP response")
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    json_response(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}
