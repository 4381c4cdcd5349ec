pub mod cart;
pub mod document;
pub mod product;
pub mod warnings;

pub use cart::CartStore;
pub use document::{load_collection, save_collection};
pub use product::ProductStore;
pub use warnings::{
    DocumentOp, PersistenceWarning, RecordingWarningSink, TracingWarningSink, WarningSink,
};
