//! Application layer: loading item collections into a tree index
//!
//! This layer decodes external input and wraps domain errors with context.

pub mod error;
pub mod loader;

pub use error::{ApplicationError, ApplicationResult};
pub use loader::{load_items, load_store, load_store_from_path, InputFormat};
