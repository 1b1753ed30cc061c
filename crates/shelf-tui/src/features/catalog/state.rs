//! Product list state.

use shelf_core::catalog::Product;

/// Last fetched product list and the table selection.
#[derive(Debug, Default)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub selected: usize,
    /// Whether at least one fetch has completed since sign-in.
    pub loaded: bool,
}

impl CatalogState {
    /// Replaces the whole list and clamps the selection to it.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loaded = true;
        self.clamp_selection();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.products.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.products.len().saturating_sub(1));
    }
}
