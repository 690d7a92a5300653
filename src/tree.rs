//! Arena-backed directory tree produced by each scan.

use std::path::PathBuf;

use glam::Vec2;
use indextree::Arena;

pub use indextree::NodeId;

/// Kind of a tree entry. Matched exhaustively at every decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// One filesystem entry discovered by the scanner.
#[derive(Debug, Clone)]
pub struct SpiderNode {
    /// Display name (base name of the path).
    pub name: String,
    /// Full path, unique within a scan.
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Distance in hops from the scan root; the root is 0.
    pub depth: u32,
    /// Planar position, overwritten by every layout pass.
    pub pos: Vec2,
    /// True only for nodes visited by the most recent layout pass.
    /// Views must never draw an unplaced node.
    pub placed: bool,
    /// Folder whose listing failed with permission denied; children empty.
    pub inaccessible: bool,
}

impl SpiderNode {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        kind: NodeKind,
        depth: u32,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            depth,
            pos: Vec2::ZERO,
            placed: false,
            inaccessible: false,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File)
    }

    /// Whether this node's children take part in recursive layout and
    /// rendering: folders only, and only above the depth limit.
    pub fn expandable(&self, max_depth: u32) -> bool {
        match self.kind {
            NodeKind::Folder => self.depth < max_depth,
            NodeKind::File => false,
        }
    }
}

/// Counters attached to every completed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub folders: u64,
    pub files: u64,
    /// Files dropped by the per-folder cap.
    pub files_truncated: u64,
    /// Folders that could not be listed (permission denied).
    pub inaccessible_dirs: u64,
    pub duration_ms: u128,
}

/// Directory tree built fresh by each scan, using an arena allocator.
/// Child order is append order: folders first, then kept files.
pub struct SpiderTree {
    arena: Arena<SpiderNode>,
    root: NodeId,
}

impl SpiderTree {
    /// Create a tree holding only the given root node.
    pub fn new(root_node: SpiderNode) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(root_node);
        Self { arena, root }
    }

    /// Append a child under `parent`. Only the scanner calls this, during
    /// construction.
    pub fn add_child(&mut self, parent: NodeId, node: SpiderNode) -> NodeId {
        let id = self.arena.new_node(node);
        parent.append(id, &mut self.arena);
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&SpiderNode> {
        self.arena.get(id).map(|n| n.get())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SpiderNode> {
        self.arena.get_mut(id).map(|n| n.get_mut())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// All node ids, root included, in depth-first order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.arena)
    }

    pub fn node_count(&self) -> usize {
        self.arena.count()
    }

    /// Path of the scan root.
    pub fn root_path(&self) -> Option<&std::path::Path> {
        self.node(self.root).map(|n| n.path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SpiderTree {
        let mut tree = SpiderTree::new(SpiderNode::new("root", "/root", NodeKind::Folder, 0));
        let root = tree.root();
        let sub = tree.add_child(root, SpiderNode::new("sub", "/root/sub", NodeKind::Folder, 1));
        tree.add_child(root, SpiderNode::new("a.txt", "/root/a.txt", NodeKind::File, 1));
        tree.add_child(sub, SpiderNode::new("b.txt", "/root/sub/b.txt", NodeKind::File, 2));
        tree
    }

    #[test]
    fn test_child_order_is_append_order() {
        let tree = sample_tree();
        let names: Vec<&str> = tree
            .children(tree.root())
            .filter_map(|id| tree.node(id).map(|n| n.name.as_str()))
            .collect();
        assert_eq!(names, ["sub", "a.txt"]);
    }

    #[test]
    fn test_depth_follows_parent() {
        let tree = sample_tree();
        for id in tree.descendants() {
            let node = tree.node(id).unwrap();
            for child_id in tree.children(id) {
                let child = tree.node(child_id).unwrap();
                assert_eq!(child.depth, node.depth + 1);
            }
        }
    }

    #[test]
    fn test_expandable_rules() {
        let folder = SpiderNode::new("d", "/d", NodeKind::Folder, 2);
        let file = SpiderNode::new("f", "/f", NodeKind::File, 1);
        assert!(folder.expandable(3));
        assert!(!folder.expandable(2));
        assert!(!file.expandable(10));
    }

    #[test]
    fn test_node_count() {
        let tree = sample_tree();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.descendants().count(), 4);
    }
}
