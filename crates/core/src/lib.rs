pub mod config;
pub mod domain;
pub mod errors;

pub use domain::cart::{Cart, CartId, CartLineItem};
pub use domain::product::{NewProduct, Product, ProductId, ProductUpdate};
pub use errors::StoreError;
