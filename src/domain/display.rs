use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TreeStore;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for TreeStore {
    /// One tree per root. A forest gets a synthetic `.` root above its trees.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(store: &TreeStore, node_idx: Index) -> Option<Tree<String>> {
            let node = store.get(node_idx)?;
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|&child| build_tree(store, child))
                .collect();
            Some(Tree::new(node.item.to_string()).with_leaves(leaves))
        }

        let mut trees: Vec<Tree<String>> = self
            .root_indices()
            .filter_map(|idx| build_tree(self, idx))
            .collect();

        match trees.len() {
            0 => Tree::new("Empty tree".to_string()),
            1 => trees.remove(0),
            _ => Tree::new(".".to_string()).with_leaves(trees),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;

    #[test]
    fn given_single_root_when_rendering_then_nests_children() {
        let store = TreeStore::new(vec![
            Item::new(1, "root"),
            Item::new(2, 1).with_kind("test"),
            Item::new(3, 1),
            Item::new(4, 2),
        ])
        .unwrap();
        let rendered = store.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "1");
        assert!(lines[1].ends_with("2 [test]"));
        assert!(lines[2].ends_with("4"));
        assert!(lines[3].ends_with("3"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn given_forest_when_rendering_then_uses_synthetic_root() {
        let store = TreeStore::new(vec![Item::root("a"), Item::root("b")]).unwrap();
        let rendered = store.to_tree_string().to_string();
        assert_eq!(rendered.lines().next(), Some("."));
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn given_empty_store_when_rendering_then_placeholder() {
        let rendered = TreeStore::default().to_tree_string().to_string();
        assert_eq!(rendered.trim(), "Empty tree");
    }
}
