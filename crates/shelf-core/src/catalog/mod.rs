//! Catalog data model: server products, the edit buffer, and wire encoding.

mod draft;
mod product;
pub mod wire;

pub use draft::{
    DraftEdit, DraftField, ImageSlotRejection, ImageSlots, MAX_IMAGE_SLOTS, ProductDraft,
    ValidationError, ValidationReason,
};
pub use product::{Product, display_price};
pub use wire::ProductPayload;
