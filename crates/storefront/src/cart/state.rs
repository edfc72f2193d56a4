//! Cart state: lines, wishlist entries, and the derived snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use recyclebay_core::{Price, ProductId};

use super::command::CartCommand;

/// Product metadata captured when an item enters the cart or wishlist.
///
/// Display fields are copied at add time and never re-fetched, so a line
/// keeps showing what the shopper actually added even if the catalog
/// record changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Identity key for merge logic. Callers MUST supply a stable
    /// non-empty ID; empty IDs are dropped with a diagnostic.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label (e.g. "sofas", "tables").
    pub category: String,
    /// Primary image URL, if any.
    pub image: Option<String>,
    /// Price at add time.
    pub price: Price,
}

/// One product line in the cart.
///
/// Invariant: at most one line per product ID, `quantity >= 1`. A line
/// whose quantity would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub price: Price,
    pub quantity: u32,
}

impl CartLine {
    fn new(product: ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            image: product.image,
            price: product.price,
            quantity: 1,
        }
    }

    /// Line subtotal (`price * quantity`), with free items contributing zero.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.amount() * Decimal::from(self.quantity)
    }
}

/// A product saved for later. Same shape as a cart line minus quantity.
///
/// Invariant: at most one entry per product ID. Wishlist membership is
/// independent of cart membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub price: Price,
}

impl From<ProductSummary> for WishlistEntry {
    fn from(product: ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            image: product.image,
            price: product.price,
        }
    }
}

/// The full in-memory cart state.
///
/// Mutated exclusively through [`CartCommand`] via [`CartState::apply`].
/// `items` keeps insertion order, which is the display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub(super) items: Vec<CartLine>,
    pub(super) wishlist: Vec<WishlistEntry>,
    pub(super) is_popup_open: bool,
}

impl CartState {
    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Wishlist entries in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    /// Whether the mini-cart popup is currently open.
    #[must_use]
    pub const fn is_popup_open(&self) -> bool {
        self.is_popup_open
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of line subtotals.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLine::subtotal).sum()
    }

    /// Materialize the readable snapshot handed to UI layers.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            total_items: self.total_items(),
            total_price: self.total_price(),
            items: self.items.clone(),
            wishlist: self.wishlist.clone(),
            is_popup_open: self.is_popup_open,
        }
    }

    /// Reduce this state to the durable portion.
    ///
    /// Popup visibility is session-local UI state and deliberately not
    /// part of the persisted snapshot.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedCart {
        PersistedCart {
            items: self.items.clone(),
            wishlist: self.wishlist.clone(),
        }
    }

    /// Rebuild state from a stored snapshot by replaying each stored line
    /// through the add path.
    ///
    /// Replay keeps the add path's validation (duplicate IDs collapse to
    /// the first occurrence, empty IDs are dropped) while restoring the
    /// stored quantity verbatim; a stored line with a zero quantity is
    /// dropped by the same rule that removes zero-quantity lines at
    /// runtime.
    #[must_use]
    pub fn rehydrate(persisted: PersistedCart) -> Self {
        let mut state = Self::default();
        for line in persisted.items {
            if state.items.iter().any(|existing| existing.id == line.id) {
                continue;
            }
            let quantity = i64::from(line.quantity);
            let id = line.id.clone();
            state.apply(CartCommand::AddItem(ProductSummary {
                id: line.id,
                name: line.name,
                category: line.category,
                image: line.image,
                price: line.price,
            }));
            state.apply(CartCommand::UpdateQuantity { id, quantity });
        }
        for entry in persisted.wishlist {
            state.apply(CartCommand::AddToWishlist(ProductSummary {
                id: entry.id,
                name: entry.name,
                category: entry.category,
                image: entry.image,
                price: entry.price,
            }));
        }
        state
    }

    pub(super) fn add_item(&mut self, product: ProductSummary) {
        if product.id.is_empty() {
            tracing::warn!("ignoring cart add with empty product id");
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.id == product.id) {
            // Merge rule: bump the quantity, keep the first add's metadata.
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartLine::new(product));
        }
    }

    pub(super) fn remove_item(&mut self, id: &ProductId) {
        self.items.retain(|line| line.id != *id);
    }

    pub(super) fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
        } else if let Some(line) = self.items.iter_mut().find(|line| line.id == *id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        // Absent id with a positive quantity is a no-op: update never
        // creates a line.
    }

    pub(super) fn add_to_wishlist(&mut self, product: ProductSummary) {
        if product.id.is_empty() {
            tracing::warn!("ignoring wishlist add with empty product id");
            return;
        }
        if self.wishlist.iter().any(|entry| entry.id == product.id) {
            return;
        }
        self.wishlist.push(WishlistEntry::from(product));
    }

    pub(super) fn remove_from_wishlist(&mut self, id: &ProductId) {
        self.wishlist.retain(|entry| entry.id != *id);
    }
}

/// Read-only view of the cart with derived totals, handed to UI layers
/// and serialized in route responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartLine>,
    pub wishlist: Vec<WishlistEntry>,
    pub is_popup_open: bool,
    pub total_items: u64,
    pub total_price: Decimal,
}

/// The durable snapshot layout stored by [`super::CartStorage`] under a
/// single well-known key and overwritten wholesale on every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedCart {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub wishlist: Vec<WishlistEntry>,
}
