use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl ProductId {
    /// Route parameters arrive as text; lookups compare the rendered id.
    pub fn matches(&self, raw: &str) -> bool {
        self.0.to_string() == raw
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub status: bool,
    pub stock: f64,
    pub category: String,
    pub thumbnails: Vec<String>,
}

/// Creation payload. Every field is optional at the wire level so that the
/// required-field check can produce a validation error instead of a
/// deserialization failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<f64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl NewProduct {
    /// Validates the required fields and assembles the entity under the
    /// store-assigned id. `price` and `stock` only need to be present (zero
    /// counts); the text fields must also be non-empty. `status` defaults to
    /// `true` and `thumbnails` to an empty list.
    pub fn into_product(self, id: ProductId) -> Result<Product, StoreError> {
        let text_missing = |field: &Option<String>| {
            field.as_deref().map_or(true, |value| value.is_empty())
        };

        if text_missing(&self.title)
            || text_missing(&self.description)
            || text_missing(&self.code)
            || text_missing(&self.category)
            || self.price.is_none()
            || self.stock.is_none()
        {
            return Err(StoreError::Validation(
                "all fields are required except thumbnails".to_string(),
            ));
        }

        Ok(Product {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            status: self.status.unwrap_or(true),
            stock: self.stock.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            thumbnails: self.thumbnails.unwrap_or_default(),
        })
    }
}

/// Shallow-merge patch for updates. A supplied `id` is accepted by the
/// deserializer but never applied: the entity keeps its original id.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductUpdate {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<f64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl Product {
    /// Applies a shallow merge: supplied fields overwrite, absent fields are
    /// preserved, and `thumbnails` is replaced wholly rather than appended.
    pub fn apply(&mut self, patch: ProductUpdate) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(thumbnails) = patch.thumbnails {
            self.thumbnails = thumbnails;
        }
    }
}
