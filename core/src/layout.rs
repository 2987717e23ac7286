//! Two-pass box layout: bottom-up measure, top-down arrange.
//!
//! Measure derives each node's physical size from its content (or its
//! requested DIP size), arrange assigns local and absolute positions.
//! Both passes are pure functions of the tree and their inputs, so running
//! them twice yields identical geometry.

use crate::geometry::scale_dip;
use crate::scene::{Node, NodeKind};
use crate::text::TextShaper;

/// Post-order sizing pass. DIP values scale by `dpi_scale`, rounding up.
pub fn measure(node: &mut Node, dpi_scale: f32, shaper: &mut dyn TextShaper) {
    for child in &mut node.children {
        measure(child, dpi_scale, shaper);
    }

    let requested = node
        .requested
        .map(|(w, h)| (scale_dip(w, dpi_scale), scale_dip(h, dpi_scale)));

    let (width, height) = match &node.kind {
        NodeKind::Text(t) => {
            let px_size = t.font.size * dpi_scale;
            let (w, h) = shaper.measure(&t.text, &t.font, px_size);
            (w as i32, h as i32)
        }
        NodeKind::Image(img) => requested.unwrap_or((
            img.bitmap.width() as i32,
            img.bitmap.height() as i32,
        )),
        NodeKind::Canvas(_) => requested.unwrap_or((0, 0)),
        NodeKind::Horizontal => {
            node.layout.gap = scale_dip(node.spacing, dpi_scale);
            let gaps = node.layout.gap * node.children.len().saturating_sub(1) as i32;
            let content_w: i32 = node.children.iter().map(|c| c.layout.width).sum::<i32>() + gaps;
            let content_h = node
                .children
                .iter()
                .map(|c| c.layout.height)
                .max()
                .unwrap_or(0);
            requested.unwrap_or((content_w, content_h))
        }
        NodeKind::Vertical => {
            node.layout.gap = scale_dip(node.spacing, dpi_scale);
            let gaps = node.layout.gap * node.children.len().saturating_sub(1) as i32;
            let content_h: i32 =
                node.children.iter().map(|c| c.layout.height).sum::<i32>() + gaps;
            let content_w = node
                .children
                .iter()
                .map(|c| c.layout.width)
                .max()
                .unwrap_or(0);
            requested.unwrap_or((content_w, content_h))
        }
        NodeKind::Panel(_) | NodeKind::Root => requested.unwrap_or_else(|| {
            // Wrap content: the bounding box of the (centered) children.
            let w = node.children.iter().map(|c| c.layout.width).max().unwrap_or(0);
            let h = node
                .children
                .iter()
                .map(|c| c.layout.height)
                .max()
                .unwrap_or(0);
            (w, h)
        }),
    };

    node.layout.width = width;
    node.layout.height = height;
}

/// Pin the root to the strip's allotted height before arranging, so
/// children center within the full strip rather than the content box.
pub fn force_height(node: &mut Node, height: i32) {
    node.layout.height = height;
}

/// Pre-order position pass. Containers place children sequentially along
/// the main axis, spreading any extra main-axis space as equal inter-child
/// spacing, and center on the cross axis; non-container parents center
/// children on both axes. Absolute positions are resolved in the same pass.
pub fn arrange(node: &mut Node) {
    node.layout.x = 0;
    node.layout.y = 0;
    node.layout.abs_x = 0;
    node.layout.abs_y = 0;
    arrange_children(node);
}

fn arrange_children(node: &mut Node) {
    let parent_w = node.layout.width;
    let parent_h = node.layout.height;
    let parent_abs = (node.layout.abs_x, node.layout.abs_y);
    let n = node.children.len();

    match node.kind {
        NodeKind::Horizontal => {
            let content: i32 = node.children.iter().map(|c| c.layout.width).sum();
            let step = inter_child_step(node.layout.gap, parent_w, content, n);
            let mut x = 0;
            for child in &mut node.children {
                child.layout.x = x;
                child.layout.y = (parent_h - child.layout.height) / 2;
                x += child.layout.width + step;
            }
        }
        NodeKind::Vertical => {
            let content: i32 = node.children.iter().map(|c| c.layout.height).sum();
            let step = inter_child_step(node.layout.gap, parent_h, content, n);
            let mut y = 0;
            for child in &mut node.children {
                child.layout.x = (parent_w - child.layout.width) / 2;
                child.layout.y = y;
                y += child.layout.height + step;
            }
        }
        _ => {
            for child in &mut node.children {
                child.layout.x = (parent_w - child.layout.width) / 2;
                child.layout.y = (parent_h - child.layout.height) / 2;
            }
        }
    }

    for child in &mut node.children {
        child.layout.abs_x = parent_abs.0 + child.layout.x;
        child.layout.abs_y = parent_abs.1 + child.layout.y;
        arrange_children(child);
    }
}

/// Gap plus an even share of leftover main-axis space. A single child has
/// no inter-child spacing by construction.
fn inter_child_step(gap: i32, parent_extent: i32, content: i32, child_count: usize) -> i32 {
    if child_count < 2 {
        return 0;
    }
    let dividers = (child_count - 1) as i32;
    let extra = parent_extent - content - gap * dividers;
    gap + extra / dividers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::color::Color;
    use crate::geometry::Rect;
    use crate::text::{FontSpec, TextAlign, TextShaper};

    /// Deterministic stand-in shaper: each char is 10px wide, line height
    /// equals the rounded pixel size.
    struct FixedShaper;

    impl TextShaper for FixedShaper {
        fn measure(&mut self, text: &str, _font: &FontSpec, px_size: f32) -> (u32, u32) {
            (text.chars().count() as u32 * 10, px_size.ceil() as u32)
        }

        fn draw(
            &mut self,
            _buffer: &mut PixelBuffer,
            _text: &str,
            _font: &FontSpec,
            _px_size: f32,
            _rect: Rect,
            _align: TextAlign,
        ) {
        }
    }

    fn font() -> FontSpec {
        FontSpec::new("Test", 12.0)
    }

    #[test]
    fn test_hstack_sums_widths_plus_gaps() {
        // 20px + 4 gap + 30px = 54, children vertically centered.
        let mut tree = Node::root().with_size(100.0, 40.0).child(
            Node::hstack(4.0)
                .child(Node::text("ab", font(), Color::WHITE))
                .child(Node::text("cde", font(), Color::WHITE)),
        );
        measure(&mut tree, 1.0, &mut FixedShaper);
        arrange(&mut tree);

        let stack = &tree.children[0];
        assert_eq!(stack.layout.width, 54);
        assert_eq!(stack.layout.height, 12);
        assert_eq!(stack.children[0].layout.x, 0);
        assert_eq!(stack.children[1].layout.x, 24);
        // Both children share the stack's height, so both center at 0.
        assert_eq!(stack.children[0].layout.y, 0);
        assert_eq!(stack.children[1].layout.y, 0);
        // The stack itself is centered inside the 100x40 root.
        assert_eq!(stack.layout.x, (100 - 54) / 2);
        assert_eq!(stack.layout.y, (40 - 12) / 2);
    }

    #[test]
    fn test_measure_arrange_is_idempotent() {
        let build = || {
            Node::root().with_size(80.0, 32.0).child(
                Node::vstack(2.0)
                    .child(Node::text("one", font(), Color::WHITE))
                    .child(Node::text("twoo", font(), Color::WHITE)),
            )
        };
        let mut a = build();
        measure(&mut a, 1.25, &mut FixedShaper);
        force_height(&mut a, 40);
        arrange(&mut a);

        let mut b = build();
        measure(&mut b, 1.25, &mut FixedShaper);
        force_height(&mut b, 40);
        arrange(&mut b);
        // Second pass over the same tree must not drift either.
        measure(&mut b, 1.25, &mut FixedShaper);
        force_height(&mut b, 40);
        arrange(&mut b);

        fn collect(node: &Node, out: &mut Vec<crate::scene::NodeLayout>) {
            out.push(node.layout);
            for c in &node.children {
                collect(c, out);
            }
        }
        let (mut la, mut lb) = (Vec::new(), Vec::new());
        collect(&a, &mut la);
        collect(&b, &mut lb);
        assert_eq!(la, lb);
    }

    #[test]
    fn test_single_child_has_no_spacing() {
        let mut tree = Node::hstack(8.0).child(Node::text("x", font(), Color::WHITE));
        measure(&mut tree, 1.0, &mut FixedShaper);
        arrange(&mut tree);
        assert_eq!(tree.layout.width, 10);
        assert_eq!(tree.children[0].layout.x, 0);
    }

    #[test]
    fn test_extra_space_spreads_between_children() {
        // Requested 100 wide, content 20+30 with 0 spacing: 50 extra goes
        // into the single divider.
        let mut tree = Node::hstack(0.0)
            .with_size(100.0, 20.0)
            .child(Node::text("ab", font(), Color::WHITE))
            .child(Node::text("cde", font(), Color::WHITE));
        measure(&mut tree, 1.0, &mut FixedShaper);
        arrange(&mut tree);
        assert_eq!(tree.children[1].layout.x, 20 + 50);
    }

    #[test]
    fn test_dpi_scaling_rounds_up() {
        let mut tree = Node::canvas(Vec::new()).with_size(10.0, 10.0);
        measure(&mut tree, 1.25, &mut FixedShaper);
        assert_eq!(tree.layout.width, 13);
        assert_eq!(tree.layout.height, 13);
    }

    #[test]
    fn test_absolute_positions_accumulate() {
        let mut tree = Node::root().with_size(60.0, 60.0).child(
            Node::panel()
                .with_size(40.0, 40.0)
                .child(Node::text("a", font(), Color::WHITE)),
        );
        measure(&mut tree, 1.0, &mut FixedShaper);
        arrange(&mut tree);

        let panel = &tree.children[0];
        let text = &panel.children[0];
        assert_eq!(panel.layout.abs_x, 10);
        assert_eq!(panel.layout.abs_y, 10);
        assert_eq!(text.layout.abs_x, panel.layout.abs_x + text.layout.x);
        assert_eq!(text.layout.abs_y, panel.layout.abs_y + text.layout.y);
    }
}
