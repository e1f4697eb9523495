//! Index a flat list of parent-referencing records into a navigable tree.
//!
//! ```
//! use treestore::{Item, NodeId, TreeStore};
//!
//! let store = TreeStore::new(vec![
//!     Item::new(1, "root"),
//!     Item::new(2, 1),
//!     Item::new(3, 1),
//!     Item::new(4, 2),
//! ])
//! .unwrap();
//!
//! let parents: Vec<&NodeId> = store.get_all_parents(&4.into()).into_iter().map(|i| &i.id).collect();
//! assert_eq!(parents, vec![&NodeId::from(2), &NodeId::from(1)]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, InputFormat};
pub use domain::{DomainError, Item, NodeId, TreeBuilder, TreeDisplay, TreeNode, TreeStore};
