//! Folder tree construction
//!
//! Pure transformation of the flat folder set into a navigable forest,
//! plus the display state (expanded nodes, single selection) the views
//! track between renders.
//!
//! The builder indexes folders by parent once and assembles the forest
//! from that index, so one build is O(n) rather than a full-collection
//! filter per node. Each folder is attached at most once; a cyclic clique
//! has no member reachable from a root, so it is dropped rather than
//! recursed into, and the build always terminates.

use crate::database::Folder;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A folder with its resolved children and display flag
#[derive(Debug, Clone, Serialize)]
pub struct FolderNode {
    pub folder: Folder,
    pub expanded: bool,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of nodes in this subtree, including the node itself
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(FolderNode::subtree_len).sum::<usize>()
    }
}

/// The forest of root folders for one user
#[derive(Debug, Clone, Serialize)]
pub struct FolderTree {
    pub roots: Vec<FolderNode>,
}

impl FolderTree {
    /// Build the forest from the complete flat folder set of one user.
    /// Children keep the input order within each parent.
    pub fn build(folders: Vec<Folder>, state: &TreeState) -> FolderTree {
        let mut roots = Vec::new();
        let mut by_parent: HashMap<String, Vec<Folder>> = HashMap::new();

        for folder in folders {
            match folder.parent_id.clone() {
                None => roots.push(folder),
                Some(parent) => by_parent.entry(parent).or_default().push(folder),
            }
        }

        let roots = roots
            .into_iter()
            .map(|folder| attach(folder, &mut by_parent, state))
            .collect();

        FolderTree { roots }
    }

    /// Total number of nodes in the forest
    pub fn len(&self) -> usize {
        self.roots.iter().map(FolderNode::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Move a folder's children out of the index and attach them recursively.
/// Every folder lives under exactly one parent key, so each one is taken
/// at most once.
fn attach(folder: Folder, by_parent: &mut HashMap<String, Vec<Folder>>, state: &TreeState) -> FolderNode {
    let children = by_parent
        .remove(&folder.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach(child, by_parent, state))
        .collect();

    FolderNode {
        expanded: state.is_expanded(&folder.id),
        folder,
        children,
    }
}

/// Display state for the folder pane: which nodes the user has toggled
/// open, and the single folder whose items the content pane shows.
///
/// A node's lifecycle is created → visible/collapsed ⇄ visible/expanded →
/// deleted; nothing else.
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    expanded: HashSet<String>,
    selected: Option<String>,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folders start collapsed until toggled
    pub fn is_expanded(&self, folder_id: &str) -> bool {
        self.expanded.contains(folder_id)
    }

    /// Flip a folder between expanded and collapsed
    pub fn toggle(&mut self, folder_id: &str) {
        if !self.expanded.remove(folder_id) {
            self.expanded.insert(folder_id.to_string());
        }
    }

    /// Select the folder whose items the content pane shows. At most one
    /// folder is selected at a time; items are listed for that folder only,
    /// never its descendants.
    pub fn select(&mut self, folder_id: &str) {
        self.selected = Some(folder_id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Drop display state for a folder that no longer exists, e.g. after a
    /// delete cascaded through its subtree
    pub fn forget(&mut self, folder_id: &str) {
        self.expanded.remove(folder_id);
        if self.selected.as_deref() == Some(folder_id) {
            self.selected = None;
        }
    }
}
