//! Domain layer: items, the tree index and its traversals
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod display;
pub mod entities;
pub mod error;

pub use arena::{Ancestors, Descendants, PostOrderIterator, TreeIterator, TreeNode, TreeStore};
pub use builder::{TreeBuilder, TreeResult};
pub use display::TreeDisplay;
pub use entities::*;
pub use error::DomainError;
