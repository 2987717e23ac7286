//! Maps pointer coordinates to the deepest interactive node, using the
//! same rounded geometry the rasterizer paints with.

use crate::geometry::{Rect, scale_dip};
use crate::raster::rounded::rounded_rect_contains;
use crate::scene::{CallbackId, Node, NodeKind, Tooltip};

/// Child-index chain identifying a node within one tree instance. Trees
/// are rebuilt every frame, so paths are the only identity that survives a
/// rebuild of an identical tree.
pub type NodePath = Vec<usize>;

/// The interactive node found under the pointer.
#[derive(Debug, Clone)]
pub struct HitInfo {
    pub path: NodePath,
    /// Absolute bounds of the hit panel.
    pub bounds: Rect,
    pub on_click: Option<CallbackId>,
    pub on_double_click: Option<CallbackId>,
    pub on_right_click: Option<CallbackId>,
    pub on_drop: Option<CallbackId>,
    pub tooltip: Option<Tooltip>,
}

/// Pre-order walk recording a candidate for every panel containing the
/// point; the last match wins, which is the innermost panel because a
/// panel is visited before its descendants.
pub fn find_interactive_node_at(
    tree: &Node,
    x: i32,
    y: i32,
    dpi_scale: f32,
) -> Option<HitInfo> {
    let mut best = None;
    let mut path = Vec::new();
    walk(tree, &mut path, x, y, dpi_scale, &mut best);
    best
}

fn walk(
    node: &Node,
    path: &mut NodePath,
    x: i32,
    y: i32,
    dpi_scale: f32,
    best: &mut Option<HitInfo>,
) {
    if let NodeKind::Panel(props) = &node.kind {
        let local_x = x - node.layout.abs_x;
        let local_y = y - node.layout.abs_y;
        let radius = scale_dip(props.corner_radius, dpi_scale);
        let inside = if radius > 0 {
            rounded_rect_contains(node.layout.width, node.layout.height, radius, local_x, local_y)
        } else {
            local_x >= 0
                && local_y >= 0
                && local_x < node.layout.width
                && local_y < node.layout.height
        };
        if inside {
            *best = Some(HitInfo {
                path: path.clone(),
                bounds: Rect::new(
                    node.layout.abs_x,
                    node.layout.abs_y,
                    node.layout.width,
                    node.layout.height,
                ),
                on_click: props.on_click,
                on_double_click: props.on_double_click,
                on_right_click: props.on_right_click,
                on_drop: props.on_drop,
                tooltip: props.tooltip.clone(),
            });
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        walk(child, path, x, y, dpi_scale, best);
        path.pop();
    }
}

/// Mark the panel at `path` as hovered; call between arrange and paint.
/// Returns false when the path no longer resolves in the rebuilt tree.
pub fn apply_hover(tree: &mut Node, path: &[usize]) -> bool {
    match tree.node_at_path_mut(path) {
        Some(node) => {
            node.hovered = true;
            true
        }
        None => false,
    }
}

/// Tracks the hovered panel across frames and reports changes, driving
/// hover repaint and tooltip scheduling.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<NodePath>,
}

impl HoverTracker {
    /// Feed the hit result for the latest pointer position. Returns true
    /// when the hovered panel identity changed since the previous update.
    pub fn update(&mut self, hit: Option<&HitInfo>) -> bool {
        let next = hit.map(|h| h.path.clone());
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Pointer left the widget. Returns true when something was hovered.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&NodePath> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn sized(mut node: Node, x: i32, y: i32, w: i32, h: i32) -> Node {
        node.layout.abs_x = x;
        node.layout.abs_y = y;
        node.layout.width = w;
        node.layout.height = h;
        node
    }

    fn two_panel_tree() -> Node {
        // Outer panel 0..20, inner panel 5..15 with a click handler.
        sized(Node::root(), 0, 0, 20, 20).child(
            sized(Node::panel().with_background(Color::BLACK), 0, 0, 20, 20).child(sized(
                Node::panel().on_click(CallbackId(3)),
                5,
                5,
                10,
                10,
            )),
        )
    }

    #[test]
    fn test_deepest_panel_wins() {
        let tree = two_panel_tree();
        let hit = find_interactive_node_at(&tree, 7, 7, 1.0).expect("hit");
        assert_eq!(hit.path, vec![0, 0]);
        assert_eq!(hit.on_click, Some(CallbackId(3)));

        let outer = find_interactive_node_at(&tree, 1, 1, 1.0).expect("hit");
        assert_eq!(outer.path, vec![0]);
        assert_eq!(outer.on_click, None);
    }

    #[test]
    fn test_miss_returns_none() {
        let tree = two_panel_tree();
        assert!(find_interactive_node_at(&tree, 25, 3, 1.0).is_none());
    }

    #[test]
    fn test_rounded_corner_not_clickable() {
        let panel = sized(
            Node::panel().with_corner_radius(8.0),
            0,
            0,
            20,
            20,
        );
        assert!(find_interactive_node_at(&panel, 0, 0, 1.0).is_none());
        assert!(find_interactive_node_at(&panel, 10, 0, 1.0).is_some());
    }

    #[test]
    fn test_hover_tracker_reports_changes() {
        let tree = two_panel_tree();
        let mut tracker = HoverTracker::default();

        let inner = find_interactive_node_at(&tree, 7, 7, 1.0);
        assert!(tracker.update(inner.as_ref()));
        assert!(!tracker.update(inner.as_ref()));

        let outer = find_interactive_node_at(&tree, 1, 1, 1.0);
        assert!(tracker.update(outer.as_ref()));
        assert!(tracker.clear());
        assert!(!tracker.clear());
    }

    #[test]
    fn test_apply_hover_sets_flag() {
        let mut tree = two_panel_tree();
        assert!(apply_hover(&mut tree, &[0, 0]));
        assert!(tree.node_at_path(&[0, 0]).expect("node").hovered);
        assert!(!apply_hover(&mut tree, &[0, 9]));
    }
}
