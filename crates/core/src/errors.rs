use thiserror::Error;

/// Caller-visible failures of the collection stores.
///
/// Document read and write failures never appear here: reads degrade to an
/// empty collection and writes are swallowed, with both reported through the
/// store's warning sink instead of this taxonomy.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
}
