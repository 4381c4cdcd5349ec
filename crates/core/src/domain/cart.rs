use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub u64);

impl CartId {
    pub fn matches(&self, raw: &str) -> bool {
        self.0.to_string() == raw
    }
}

/// One entry in a cart. `product` keeps the id text exactly as supplied in
/// the request path; it is not resolved against the product collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub products: Vec<CartLineItem>,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self { id, products: Vec::new() }
    }

    /// Appends a fresh line item with quantity 1. Repeat appends for the same
    /// product add further line items; quantities are never merged.
    pub fn push_line_item(&mut self, product_id: &str) {
        self.products.push(CartLineItem { product: product_id.to_string(), quantity: 1 });
    }
}
