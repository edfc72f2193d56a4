//! Shared type definitions.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{DonationId, OrderId, ProductId, UserId};
pub use price::Price;
pub use status::{DonationStatus, ItemCondition, OrderStatus, ProductStatus};
