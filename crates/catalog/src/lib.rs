mod error;
mod extract;
mod store;
mod types;

pub use error::{CatalogError, Result};
pub use extract::{ColorExtractor, StaticPaletteExtractor};
pub use store::{CatalogStore, OrderDraft};
pub use types::{Order, OrderItem, OrderStatus, Product, ProductVariant};
