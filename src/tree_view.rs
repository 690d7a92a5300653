//! Indented text rendering of the tree, with a 1:1 line-to-node index.
//!
//! Lines come from a stack-based depth-first traversal: each popped node
//! emits one line, then its eligible children are pushed in reverse so the
//! LIFO pop visits them in forward order. Folders sort before files at each
//! level and the file cap is applied a second time at render time, always
//! keeping every folder.

use crate::config::SpiderConfig;
use crate::tree::{NodeId, NodeKind, SpiderTree};

/// Independent style channels for the front-ends to map to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSlot {
    /// A folder line up to (not including) its trailing slash.
    FolderName,
    /// The trailing `/` on folder lines.
    FolderSymbol,
    /// Connector glyphs ahead of a file name.
    TreeGlyph,
    /// A file name.
    FileName,
}

/// One rendered line and the node that produced it.
#[derive(Debug, Clone)]
pub struct TreeLine {
    /// Accumulated ancestor prefix plus this node's connector.
    pub glyphs: String,
    pub name: String,
    pub node: NodeId,
    pub kind: NodeKind,
}

impl TreeLine {
    /// Full plain text of the line.
    pub fn text(&self) -> String {
        match self.kind {
            NodeKind::Folder => format!("{}{}/", self.glyphs, self.name),
            NodeKind::File => format!("{}{}", self.glyphs, self.name),
        }
    }

    /// The line split into styled segments. Folder lines color glyphs and
    /// name as one folder-colored run with the slash on its own channel;
    /// file lines separate the glyphs from the name.
    pub fn segments(&self) -> Vec<(String, StyleSlot)> {
        match self.kind {
            NodeKind::Folder => vec![
                (format!("{}{}", self.glyphs, self.name), StyleSlot::FolderName),
                ("/".to_string(), StyleSlot::FolderSymbol),
            ],
            NodeKind::File => vec![
                (self.glyphs.clone(), StyleSlot::TreeGlyph),
                (self.name.clone(), StyleSlot::FileName),
            ],
        }
    }
}

/// Ordered line sequence; `lines[i]` answers clicks on line `i`.
#[derive(Debug, Clone, Default)]
pub struct TreeView {
    pub lines: Vec<TreeLine>,
}

impl TreeView {
    pub fn node_at_line(&self, line: usize) -> Option<NodeId> {
        self.lines.get(line).map(|l| l.node)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Render the tree into lines under the same eligibility rule the layout
/// uses: only folders above the depth limit expand.
pub fn build(tree: &SpiderTree, config: &SpiderConfig) -> TreeView {
    let mut lines = Vec::new();
    // (node, is_last_sibling, one flag per ancestor level: was it last?)
    let mut stack: Vec<(NodeId, bool, Vec<bool>)> = vec![(tree.root(), true, Vec::new())];

    while let Some((id, is_last, ancestors)) = stack.pop() {
        let Some(node) = tree.node(id) else { continue };

        let mut glyphs = String::new();
        for &ancestor_was_last in &ancestors {
            glyphs.push_str(if ancestor_was_last { "    " } else { "│   " });
        }
        glyphs.push_str(if is_last { "└── " } else { "├── " });

        lines.push(TreeLine {
            glyphs,
            name: node.name.clone(),
            node: id,
            kind: node.kind,
        });

        if !node.expandable(config.max_depth) {
            continue;
        }

        let mut children: Vec<NodeId> = tree.children(id).collect();
        // Stable: folders float ahead of files, scan order kept per group.
        children.sort_by_key(|child_id| {
            tree.node(*child_id).map(|c| c.is_file()).unwrap_or(true)
        });
        let folder_count = children
            .iter()
            .filter(|child_id| tree.node(**child_id).map(|c| c.is_folder()).unwrap_or(false))
            .count();
        children.truncate(config.max_files_per_folder + folder_count);

        let mut child_ancestors = ancestors;
        child_ancestors.push(is_last);
        let last_index = children.len().saturating_sub(1);
        for (index, child_id) in children.iter().enumerate().rev() {
            stack.push((*child_id, index == last_index, child_ancestors.clone()));
        }
    }

    TreeView { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SpiderNode;

    fn config(max_depth: u32, max_files: usize) -> SpiderConfig {
        SpiderConfig {
            max_depth,
            max_files_per_folder: max_files,
            ..Default::default()
        }
    }

    /// root/ { sub/ { x.txt, y.txt }, z.txt }
    fn sample_tree() -> SpiderTree {
        let mut tree = SpiderTree::new(SpiderNode::new("root", "/r", NodeKind::Folder, 0));
        let root = tree.root();
        let sub = tree.add_child(root, SpiderNode::new("sub", "/r/sub", NodeKind::Folder, 1));
        tree.add_child(root, SpiderNode::new("z.txt", "/r/z.txt", NodeKind::File, 1));
        tree.add_child(sub, SpiderNode::new("x.txt", "/r/sub/x.txt", NodeKind::File, 2));
        tree.add_child(sub, SpiderNode::new("y.txt", "/r/sub/y.txt", NodeKind::File, 2));
        tree
    }

    #[test]
    fn test_exact_line_formatting() {
        let tree = sample_tree();
        let view = build(&tree, &config(3, 10));
        let texts: Vec<String> = view.lines.iter().map(|l| l.text()).collect();
        assert_eq!(
            texts,
            [
                "└── root/",
                "    ├── sub/",
                "    │   ├── x.txt",
                "    │   └── y.txt",
                "    └── z.txt",
            ]
        );
    }

    #[test]
    fn test_line_index_matches_emission_order() {
        let tree = sample_tree();
        let view = build(&tree, &config(3, 10));
        for (i, line) in view.lines.iter().enumerate() {
            let id = view.node_at_line(i).unwrap();
            assert_eq!(id, line.node);
            assert_eq!(tree.node(id).unwrap().name, line.name);
        }
        assert!(view.node_at_line(view.len()).is_none());
    }

    #[test]
    fn test_line_count_equals_visited_nodes() {
        let tree = sample_tree();
        // All 5 nodes are visited with a generous depth limit.
        assert_eq!(build(&tree, &config(3, 10)).len(), 5);
        // With max_depth 1, sub stops expanding: root, sub, z.txt.
        assert_eq!(build(&tree, &config(1, 10)).len(), 3);
    }

    #[test]
    fn test_folders_sort_before_files() {
        let mut tree = SpiderTree::new(SpiderNode::new("root", "/r", NodeKind::Folder, 0));
        let root = tree.root();
        // Scan order interleaved on purpose; render must regroup.
        tree.add_child(root, SpiderNode::new("a.txt", "/r/a.txt", NodeKind::File, 1));
        tree.add_child(root, SpiderNode::new("dir1", "/r/dir1", NodeKind::Folder, 1));
        tree.add_child(root, SpiderNode::new("b.txt", "/r/b.txt", NodeKind::File, 1));
        tree.add_child(root, SpiderNode::new("dir2", "/r/dir2", NodeKind::Folder, 1));

        let view = build(&tree, &config(2, 10));
        let names: Vec<&str> = view.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["root", "dir1", "dir2", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_render_time_file_cap_keeps_folders() {
        let mut tree = SpiderTree::new(SpiderNode::new("root", "/r", NodeKind::Folder, 0));
        let root = tree.root();
        tree.add_child(root, SpiderNode::new("dir", "/r/dir", NodeKind::Folder, 1));
        for i in 0..4 {
            tree.add_child(
                root,
                SpiderNode::new(format!("f{i}"), format!("/r/f{i}"), NodeKind::File, 1),
            );
        }

        // Cap of 2 files at render time: folder plus first two files.
        let view = build(&tree, &config(2, 2));
        let names: Vec<&str> = view.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["root", "dir", "f0", "f1"]);
    }

    #[test]
    fn test_segments_use_all_four_slots() {
        let tree = sample_tree();
        let view = build(&tree, &config(3, 10));

        let folder_line = &view.lines[1];
        let segs = folder_line.segments();
        assert_eq!(segs[0].1, StyleSlot::FolderName);
        assert_eq!(segs[0].0, "    ├── sub");
        assert_eq!(segs[1], ("/".to_string(), StyleSlot::FolderSymbol));

        let file_line = &view.lines[2];
        let segs = file_line.segments();
        assert_eq!(segs[0].1, StyleSlot::TreeGlyph);
        assert_eq!(segs[0].0, "    │   ├── ");
        assert_eq!(segs[1], ("x.txt".to_string(), StyleSlot::FileName));
    }

    #[test]
    fn test_reconstructed_text_roundtrip() {
        let tree = sample_tree();
        let view = build(&tree, &config(3, 10));
        for line in &view.lines {
            let joined: String = line.segments().into_iter().map(|(s, _)| s).collect();
            assert_eq!(joined, line.text());
        }
    }
}
