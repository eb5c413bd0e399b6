use crate::error::{CatalogError, Result};
use crate::types::{Order, OrderItem, OrderStatus, Product, ProductVariant};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

const PRODUCTS_FILE: &str = "products.json";
const ORDERS_FILE: &str = "orders.json";

/// Inputs for a new order; the store assigns the id and pending status.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: String,
    pub total_amount: f64,
    pub shipping_cost: f64,
    pub shipping_address: serde_json::Value,
    pub items: Vec<OrderItem>,
}

/// Explicitly constructed data-access handle for products and orders.
///
/// Owned by the request-handling layer; there is deliberately no global
/// instance. Products load once at startup. Orders append to a JSON file
/// through a temp-file rename so a crash never leaves a torn file.
pub struct CatalogStore {
    products: Vec<Product>,
    data_dir: PathBuf,
    order_seq: AtomicU64,
    orders_lock: Mutex<()>,
}

impl CatalogStore {
    pub async fn load(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        log::info!("Loading catalog from {:?}", data_dir);

        let raw = tokio::fs::read_to_string(data_dir.join(PRODUCTS_FILE)).await?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        let existing = read_orders(&data_dir.join(ORDERS_FILE)).await?;

        log::info!(
            "Loaded {} products, {} existing orders",
            products.len(),
            existing.len()
        );

        Ok(Self {
            products,
            data_dir,
            order_seq: AtomicU64::new(existing.len() as u64),
            orders_lock: Mutex::new(()),
        })
    }

    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.active).collect()
    }

    /// Resolves a variant together with its parent product.
    pub fn find_variant(&self, variant_id: &str) -> Result<(&Product, &ProductVariant)> {
        for product in &self.products {
            if let Some(variant) = product.variants.iter().find(|v| v.id == variant_id) {
                return Ok((product, variant));
            }
        }
        Err(CatalogError::VariantNotFound(variant_id.to_string()))
    }

    /// Total number of products, active or not.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Persists a new order and returns it with its assigned id.
    ///
    /// The read-modify-write on the orders file is serialized by a lock so
    /// concurrent checkouts cannot interleave writes.
    pub async fn place_order(&self, draft: OrderDraft) -> Result<Order> {
        let seq = self.order_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let order = Order {
            id: format!("ord-{seq:06}"),
            user_id: draft.user_id,
            total_amount: draft.total_amount,
            shipping_cost: draft.shipping_cost,
            status: OrderStatus::Pending,
            shipping_address: draft.shipping_address,
            items: draft.items,
        };

        let path = self.data_dir.join(ORDERS_FILE);
        let _guard = self.orders_lock.lock().await;
        let mut orders = read_orders(&path).await?;
        orders.push(order.clone());

        let data = serde_json::to_string_pretty(&orders)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &path).await?;

        log::info!("Recorded order {} ({} items)", order.id, order.items.len());
        Ok(order)
    }
}

async fn read_orders(path: &Path) -> Result<Vec<Order>> {
    match tokio::fs::read_to_string(path).await {
        Ok(data) => Ok(serde_json::from_str(&data)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}
