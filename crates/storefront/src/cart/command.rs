//! The cart mutation command set.

use recyclebay_core::ProductId;

use super::state::{CartState, ProductSummary};

/// Every mutation the cart state accepts, as a tagged union.
///
/// Keeping the transition table in one exhaustive match makes the no-op
/// branches (remove of an absent ID, update of an absent ID) explicit and
/// individually testable.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a product. Merges into an existing line by ID,
    /// keeping that line's original metadata.
    AddItem(ProductSummary),
    /// Remove the line with this ID. No-op if absent.
    RemoveItem(ProductId),
    /// Set a line's quantity exactly. A quantity of zero or less removes
    /// the line; an absent ID is a no-op (never creates a line).
    UpdateQuantity { id: ProductId, quantity: i64 },
    /// Empty the cart. The wishlist is untouched.
    ClearCart,
    /// Flip the mini-cart popup visibility.
    TogglePopup,
    /// Force the mini-cart popup closed. Idempotent.
    ClosePopup,
    /// Save a product for later. No-op if already saved (no overwrite).
    AddToWishlist(ProductSummary),
    /// Remove the wishlist entry with this ID. No-op if absent.
    RemoveFromWishlist(ProductId),
    /// Empty the wishlist. Cart items are untouched.
    ClearWishlist,
}

impl CartState {
    /// Apply a command as one atomic transition.
    ///
    /// Total over all inputs: no command ever fails or panics.
    pub fn apply(&mut self, command: CartCommand) {
        match command {
            CartCommand::AddItem(product) => self.add_item(product),
            CartCommand::RemoveItem(id) => self.remove_item(&id),
            CartCommand::UpdateQuantity { id, quantity } => self.update_quantity(&id, quantity),
            CartCommand::ClearCart => self.items.clear(),
            CartCommand::TogglePopup => self.is_popup_open = !self.is_popup_open,
            CartCommand::ClosePopup => self.is_popup_open = false,
            CartCommand::AddToWishlist(product) => self.add_to_wishlist(product),
            CartCommand::RemoveFromWishlist(id) => self.remove_from_wishlist(&id),
            CartCommand::ClearWishlist => self.wishlist.clear(),
        }
    }
}
