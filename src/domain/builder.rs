//! Tree builder: indexes a flat item list into a `TreeStore`.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{TreeNode, TreeStore};
use crate::domain::entities::Item;
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs a `TreeStore` from items supplied in arbitrary order.
///
/// Parent references resolve by exact id first, then by numeric
/// interpretation, so a parent written as `"2"` links to the item with id `2`.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    numeric_ids: HashMap<i64, Index>,
    unresolved: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip_all, fields(items = items.len()))]
    pub fn build(&mut self, items: Vec<Item>) -> TreeResult<TreeStore> {
        // Reset state for a fresh pass
        self.numeric_ids.clear();
        self.unresolved = 0;

        let mut store = TreeStore::with_capacity(items.len());
        self.insert_items(&mut store, items)?;
        store.indexed = sort_by_numeric_id(&store);
        self.link_children(&mut store);
        check_acyclic(&store)?;

        debug!(
            nodes = store.len(),
            roots = store.roots().len(),
            unresolved = self.unresolved,
            "tree index built"
        );
        Ok(store)
    }

    /// Number of parent references that did not resolve during the last build.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    fn insert_items(&mut self, store: &mut TreeStore, items: Vec<Item>) -> TreeResult<()> {
        for item in items {
            if store.by_id.contains_key(&item.id) {
                return Err(DomainError::DuplicateId(item.id));
            }
            let id = item.id.clone();
            let number = id.as_number();
            let idx = store.arena.insert(TreeNode {
                item,
                parent: None,
                children: Vec::new(),
            });
            store.by_id.insert(id, idx);
            if let Some(n) = number {
                self.numeric_ids.entry(n).or_insert(idx);
            }
            store.listing.push(idx);
        }
        Ok(())
    }

    fn link_children(&mut self, store: &mut TreeStore) {
        let links: Vec<(Index, Index)> = {
            let store: &TreeStore = store;
            store
                .indexed
                .iter()
                .filter_map(|&child| self.resolve_parent(store, child).map(|parent| (child, parent)))
                .collect()
        };

        for (child, parent) in links {
            if let Some(node) = store.arena.get_mut(child) {
                node.parent = Some(parent);
            }
            if let Some(node) = store.arena.get_mut(parent) {
                node.children.push(child);
            }
        }
    }

    fn resolve_parent(&mut self, store: &TreeStore, child: Index) -> Option<Index> {
        let item = &store.arena.get(child)?.item;
        let parent_id = item.parent.as_ref()?;

        let resolved = store.by_id.get(parent_id).copied().or_else(|| {
            parent_id
                .as_number()
                .and_then(|n| self.numeric_ids.get(&n).copied())
        });

        match resolved {
            // Self-parented root
            Some(parent) if parent == child => None,
            Some(parent) => Some(parent),
            None => {
                trace!(id = %item.id, parent = %parent_id, "parent unresolved, item stays unlinked");
                self.unresolved += 1;
                None
            }
        }
    }
}

/// Ascending by numeric id; ids without a numeric value keep input order at the end.
fn sort_by_numeric_id(store: &TreeStore) -> Vec<Index> {
    let mut indexed = store.listing.clone();
    indexed.sort_by_key(|&idx| {
        let number = store.arena.get(idx).and_then(|node| node.item.id.as_number());
        (number.is_none(), number)
    });
    indexed
}

/// Each node has at most one parent link, so a cycle shows up as a parent
/// chain that revisits a node before reaching a root.
fn check_acyclic(store: &TreeStore) -> TreeResult<()> {
    let mut verified: HashSet<Index> = HashSet::with_capacity(store.len());

    for &start in &store.listing {
        let mut chain = HashSet::new();
        let mut current = Some(start);

        while let Some(idx) = current {
            if verified.contains(&idx) {
                break;
            }
            let Some(node) = store.arena.get(idx) else {
                break;
            };
            if !chain.insert(idx) {
                return Err(DomainError::CycleDetected(node.item.id.clone()));
            }
            current = node.parent;
        }
        verified.extend(chain);
    }
    Ok(())
}
