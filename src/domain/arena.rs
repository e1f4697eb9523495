//! Arena-backed tree index over a flat item collection.

use std::collections::{HashMap, VecDeque};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::builder::{TreeBuilder, TreeResult};
use crate::domain::entities::{Item, NodeId};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// The record this node was built from
    pub item: Item,
    /// Index of the linked parent in the arena, None for roots and orphans
    pub parent: Option<Index>,
    /// Indices of direct children, ascending by numeric id
    pub children: Vec<Index>,
}

/// Index over a flat list of parent-referencing items.
///
/// Every item is stored once in the arena. The original listing and the
/// numerically sorted ordering are index vectors into it, and lookups go
/// through an id map, so node access is O(1) regardless of how sparse
/// the ids are.
#[derive(Debug, Default)]
pub struct TreeStore {
    pub(crate) arena: Arena<TreeNode>,
    /// Caller-supplied order
    pub(crate) listing: Vec<Index>,
    /// Ascending by numeric id, non-numeric ids last
    pub(crate) indexed: Vec<Index>,
    pub(crate) by_id: HashMap<NodeId, Index>,
}

impl TreeStore {
    /// Index `items`, linking every item to its parent.
    ///
    /// Fails when two items share an id or when parent links form a cycle.
    pub fn new(items: Vec<Item>) -> TreeResult<Self> {
        TreeBuilder::new().build(items)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            listing: Vec::with_capacity(capacity),
            indexed: Vec::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.listing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }

    /// Items in original order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.resolve(&self.listing)
    }

    /// Items ascending by numeric id.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Item> + '_ {
        self.resolve(&self.indexed)
    }

    /// The full listing, in the order the items were supplied.
    pub fn get_all(&self) -> Vec<&Item> {
        self.iter().collect()
    }

    pub fn index_of(&self, id: &NodeId) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn node(&self, id: &NodeId) -> Option<&TreeNode> {
        self.index_of(id).and_then(|idx| self.get(idx))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_item(&self, id: &NodeId) -> Option<&Item> {
        self.node(id).map(|node| &node.item)
    }

    /// Direct children of `id`, empty when the item is missing or a leaf.
    #[instrument(level = "trace", skip(self))]
    pub fn get_children(&self, id: &NodeId) -> Vec<&Item> {
        self.node(id)
            .map(|node| self.resolve(&node.children).collect())
            .unwrap_or_default()
    }

    /// All transitive descendants of `id`, breadth-first.
    #[instrument(level = "debug", skip(self))]
    pub fn get_all_children(&self, id: &NodeId) -> Vec<&Item> {
        self.descendants(id).collect()
    }

    /// Ancestor chain of `id`, nearest first.
    #[instrument(level = "debug", skip(self))]
    pub fn get_all_parents(&self, id: &NodeId) -> Vec<&Item> {
        self.ancestors(id).collect()
    }

    pub fn descendants(&self, id: &NodeId) -> Descendants<'_> {
        let queue = self
            .node(id)
            .map(|node| node.children.iter().copied().collect())
            .unwrap_or_default();
        Descendants { store: self, queue }
    }

    pub fn ancestors(&self, id: &NodeId) -> Ancestors<'_> {
        Ancestors {
            store: self,
            next: self.node(id).and_then(|node| node.parent),
        }
    }

    /// Items without a linked parent, in original order.
    pub fn roots(&self) -> Vec<&Item> {
        self.nodes_where(|node| node.parent.is_none())
    }

    /// Items without children, in original order.
    pub fn leaves(&self) -> Vec<&Item> {
        self.nodes_where(|node| node.children.is_empty())
    }

    pub(crate) fn root_indices(&self) -> impl Iterator<Item = Index> + '_ {
        self.listing
            .iter()
            .copied()
            .filter(|&idx| self.get(idx).is_some_and(|node| node.parent.is_none()))
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue: VecDeque<(Index, usize)> = self.root_indices().map(|idx| (idx, 1)).collect();

        while let Some((idx, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get(idx) {
                queue.extend(node.children.iter().map(|&child| (child, depth + 1)));
            }
        }
        max_depth
    }

    /// 1-based depth of `id`; roots and orphans sit at depth 1.
    pub fn depth_of(&self, id: &NodeId) -> Option<usize> {
        self.node(id).map(|_| 1 + self.ancestors(id).count())
    }

    pub fn iter_preorder(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    fn resolve<'a>(&'a self, indices: &'a [Index]) -> impl Iterator<Item = &'a Item> + 'a {
        indices
            .iter()
            .filter_map(move |&idx| self.get(idx))
            .map(|node| &node.item)
    }

    fn nodes_where(&self, pred: impl Fn(&TreeNode) -> bool) -> Vec<&Item> {
        self.listing
            .iter()
            .filter_map(|&idx| self.get(idx))
            .filter(|node| pred(node))
            .map(|node| &node.item)
            .collect()
    }
}

impl TryFrom<Vec<Item>> for TreeStore {
    type Error = crate::domain::DomainError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

/// Breadth-first walk over all descendants of a node.
pub struct Descendants<'a> {
    store: &'a TreeStore,
    queue: VecDeque<Index>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.queue.pop_front() {
            if let Some(node) = self.store.get(idx) {
                self.queue.extend(node.children.iter().copied());
                return Some(&node.item);
            }
        }
        None
    }
}

/// Walk up the parent links, nearest ancestor first.
pub struct Ancestors<'a> {
    store: &'a TreeStore,
    next: Option<Index>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.store.get(self.next?)?;
        self.next = node.parent;
        Some(&node.item)
    }
}

/// Depth-first pre-order walk over every tree of the forest.
pub struct TreeIterator<'a> {
    store: &'a TreeStore,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(store: &'a TreeStore) -> Self {
        let mut stack: Vec<Index> = store.root_indices().collect();
        stack.reverse();
        Self { store, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.store.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Depth-first post-order walk over every tree of the forest.
pub struct PostOrderIterator<'a> {
    store: &'a TreeStore,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(store: &'a TreeStore) -> Self {
        let mut stack: Vec<(Index, bool)> = store.root_indices().map(|idx| (idx, false)).collect();
        stack.reverse();
        Self { store, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.store.get(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
