//! Cache value types for the catalog client.

use super::types::{Product, ProductPage};

/// Values stored in the catalog read cache.
///
/// Boxed where large to keep the cache entry size uniform.
#[derive(Clone)]
pub enum CacheValue {
    /// A single product.
    Product(Box<Product>),
    /// The default (unfiltered) product listing page.
    Page(Box<ProductPage>),
}
