//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Domain errors reject item collections that do not form a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate item id: {0}")]
    DuplicateId(NodeId),

    #[error("cycle detected in hierarchy at item: {0}")]
    CycleDetected(NodeId),
}
