//! Graphical "spider web" rendering: positioned labels plus parent/child
//! edges, derived from the placed nodes of the latest layout pass, with a
//! point-based reverse lookup for click routing.

use std::cmp::Ordering;

use glam::Vec2;

use crate::tree::{NodeId, NodeKind, SpiderTree};

/// One drawable label.
#[derive(Debug, Clone)]
pub struct WebNode {
    pub id: NodeId,
    /// `[name]` for folders, bare `name` for files.
    pub label: String,
    pub pos: Vec2,
    pub kind: NodeKind,
    /// Folder whose contents could not be listed; styled dimmed by the
    /// front-ends.
    pub inaccessible: bool,
}

/// One drawable connection between a node and one of its children.
#[derive(Debug, Clone, Copy)]
pub struct WebEdge {
    pub from: Vec2,
    pub to: Vec2,
}

/// Flat render set for the graphical view.
#[derive(Debug, Clone, Default)]
pub struct WebView {
    pub nodes: Vec<WebNode>,
    pub edges: Vec<WebEdge>,
}

/// Collect every placed node and every placed parent/child edge.
pub fn build(tree: &SpiderTree) -> WebView {
    let mut view = WebView::default();
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else { continue };
        if !node.placed {
            continue;
        }

        let label = match node.kind {
            NodeKind::Folder => format!("[{}]", node.name),
            NodeKind::File => node.name.clone(),
        };
        view.nodes.push(WebNode {
            id,
            label,
            pos: node.pos,
            kind: node.kind,
            inaccessible: node.inaccessible,
        });

        for child_id in tree.children(id) {
            if let Some(child) = tree.node(child_id) {
                if child.placed {
                    view.edges.push(WebEdge {
                        from: node.pos,
                        to: child.pos,
                    });
                    stack.push(child_id);
                }
            }
        }
    }

    view
}

impl WebView {
    /// Nearest node within `radius` of `point`, if any. The caller routes
    /// the hit by kind: folders navigate, files focus.
    pub fn hit_test(&self, point: Vec2, radius: f32) -> Option<&WebNode> {
        let max_d2 = radius * radius;
        self.nodes
            .iter()
            .map(|node| (node, node.pos.distance_squared(point)))
            .filter(|(_, d2)| *d2 <= max_d2)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(node, _)| node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpiderConfig;
    use crate::layout;
    use crate::tree::{SpiderNode, SpiderTree};

    fn laid_out_tree() -> (SpiderTree, NodeId, NodeId) {
        let mut tree = SpiderTree::new(SpiderNode::new("root", "/r", NodeKind::Folder, 0));
        let root = tree.root();
        let sub = tree.add_child(root, SpiderNode::new("sub", "/r/sub", NodeKind::Folder, 1));
        tree.add_child(root, SpiderNode::new("a.txt", "/r/a.txt", NodeKind::File, 1));
        tree.add_child(sub, SpiderNode::new("b.txt", "/r/sub/b.txt", NodeKind::File, 2));
        layout::assign_positions(
            &mut tree,
            Vec2::new(500.0, 500.0),
            &SpiderConfig::default(),
        );
        (tree, root, sub)
    }

    #[test]
    fn test_labels_and_edge_count() {
        let (tree, ..) = laid_out_tree();
        let view = build(&tree);

        assert_eq!(view.nodes.len(), 4);
        assert_eq!(view.edges.len(), 3);

        let labels: Vec<&str> = view.nodes.iter().map(|n| n.label.as_str()).collect();
        assert!(labels.contains(&"[root]"));
        assert!(labels.contains(&"[sub]"));
        assert!(labels.contains(&"a.txt"));
        assert!(labels.contains(&"b.txt"));
    }

    #[test]
    fn test_unplaced_nodes_are_skipped() {
        let (mut tree, _, sub) = laid_out_tree();
        // Re-run layout with a depth limit that prunes sub's subtree.
        layout::assign_positions(
            &mut tree,
            Vec2::new(500.0, 500.0),
            &SpiderConfig {
                max_depth: 1,
                ..Default::default()
            },
        );
        let view = build(&tree);
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.edges.len(), 2);
        assert!(view.nodes.iter().all(|n| n.label != "b.txt"));
        // The pruned folder itself is still drawn.
        assert!(view.nodes.iter().any(|n| n.id == sub));
    }

    #[test]
    fn test_hit_test_picks_nearest_within_radius() {
        let (tree, root, _) = laid_out_tree();
        let view = build(&tree);

        let root_pos = tree.node(root).unwrap().pos;
        let hit = view.hit_test(root_pos + Vec2::new(3.0, -2.0), 20.0).unwrap();
        assert_eq!(hit.id, root);
        assert_eq!(hit.kind, NodeKind::Folder);

        // Far away from everything: no hit.
        assert!(view.hit_test(Vec2::new(-5000.0, -5000.0), 20.0).is_none());
    }
}
