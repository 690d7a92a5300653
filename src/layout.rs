//! Radial layout: places every visible node on rings around its parent.
//!
//! The root sits at the chosen center. Each child of a visited node goes on
//! a circle around its parent's position at radius `radius_step * depth`,
//! where depth is the child's distance from the scan root, evenly spaced by
//! sibling index. Recursion descends only into folders above the depth
//! limit, so files and bottom-depth folders get a position but their
//! subtrees do not.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::config::SpiderConfig;
use crate::tree::{NodeId, SpiderTree};

/// Assign a position to every visible node, overwriting the previous pass.
/// Nodes outside the visitation rule are left unplaced and must not be
/// drawn.
pub fn assign_positions(tree: &mut SpiderTree, center: Vec2, config: &SpiderConfig) {
    let ids: Vec<NodeId> = tree.descendants().collect();
    for id in ids {
        if let Some(node) = tree.node_mut(id) {
            node.placed = false;
        }
    }

    let root = tree.root();
    if let Some(node) = tree.node_mut(root) {
        node.pos = center;
        node.placed = true;
    }
    place_children(tree, root, center, config);
}

fn place_children(tree: &mut SpiderTree, parent: NodeId, origin: Vec2, config: &SpiderConfig) {
    let children: Vec<NodeId> = tree.children(parent).collect();
    let count = children.len();

    for (index, child_id) in children.into_iter().enumerate() {
        // count is never 0 inside the loop; the guard keeps the formula
        // total when siblings are added to an empty ring.
        let angle = if count > 0 {
            TAU * index as f32 / count as f32
        } else {
            0.0
        };

        let (depth, expandable) = match tree.node(child_id) {
            Some(child) => (child.depth, child.expandable(config.max_depth)),
            None => continue,
        };
        let radius = config.radius_step * depth as f32;
        let pos = origin + radius * Vec2::new(angle.cos(), angle.sin());

        if let Some(child) = tree.node_mut(child_id) {
            child.pos = pos;
            child.placed = true;
        }

        if expandable {
            place_children(tree, child_id, pos, config);
        }
    }
}
