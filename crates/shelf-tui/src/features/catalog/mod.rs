//! Catalog feature slice: the product table.

mod render;
mod state;
mod update;

pub use render::{LIST_HINTS, render_product_table};
pub use state::CatalogState;
pub use update::{ListAction, handle_list_key, handle_products_loaded};
