//! Scene node types and the tree builder API.

use std::sync::Arc;

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::scene::CanvasCommand;
use crate::text::FontSpec;

/// Opaque handle into the widget's externally-owned handler table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub u32);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub body: String,
}

/// Interactive panel attributes.
#[derive(Debug, Clone, Default)]
pub struct PanelProps {
    pub background: Color,
    /// Shown instead of `background` while hovered, and during the "on"
    /// phase for blinking panels.
    pub hover_background: Option<Color>,
    /// Corner radius in DIP; 0 means a plain box.
    pub corner_radius: f32,
    pub on_click: Option<CallbackId>,
    pub on_double_click: Option<CallbackId>,
    pub on_right_click: Option<CallbackId>,
    pub on_drop: Option<CallbackId>,
    pub tooltip: Option<Tooltip>,
    pub blink: bool,
}

#[derive(Debug, Clone)]
pub struct TextProps {
    pub text: String,
    pub font: FontSpec,
    /// Ink color; expected opaque (coverage supplies the alpha).
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct ImageProps {
    /// Decoded pixels, owned externally and shared read-only.
    pub bitmap: Arc<Bitmap>,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Root,
    Horizontal,
    Vertical,
    Panel(PanelProps),
    Text(TextProps),
    Image(ImageProps),
    Canvas(Vec<CanvasCommand>),
}

/// Geometry computed by measure/arrange. Only valid after both passes ran
/// over the same tree instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeLayout {
    /// Physical size from the measure pass.
    pub width: i32,
    pub height: i32,
    /// Physical inter-child gap resolved during measure (containers only).
    pub gap: i32,
    /// Local offset within the parent, from the arrange pass.
    pub x: i32,
    pub y: i32,
    /// Root-relative position, from the arrange pass.
    pub abs_x: i32,
    pub abs_y: i32,
}

/// One node of the per-frame scene tree. Children are owned exclusively by
/// their parent.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    /// Requested size in DIP; `None` means content-driven ("wrap content").
    pub requested: Option<(f32, f32)>,
    /// Inter-child spacing in DIP (containers only).
    pub spacing: f32,
    pub layout: NodeLayout,
    /// Set between arrange and paint by the hover tracker.
    pub hovered: bool,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            requested: None,
            spacing: 0.0,
            layout: NodeLayout::default(),
            hovered: false,
        }
    }

    pub fn root() -> Self {
        Self::new(NodeKind::Root)
    }

    /// Left-to-right container with the given inter-child spacing (DIP).
    pub fn hstack(spacing: f32) -> Self {
        let mut node = Self::new(NodeKind::Horizontal);
        node.spacing = spacing;
        node
    }

    /// Top-to-bottom container with the given inter-child spacing (DIP).
    pub fn vstack(spacing: f32) -> Self {
        let mut node = Self::new(NodeKind::Vertical);
        node.spacing = spacing;
        node
    }

    pub fn panel() -> Self {
        Self::new(NodeKind::Panel(PanelProps::default()))
    }

    pub fn text(text: impl Into<String>, font: FontSpec, color: Color) -> Self {
        Self::new(NodeKind::Text(TextProps {
            text: text.into(),
            font,
            color,
        }))
    }

    pub fn image(bitmap: Arc<Bitmap>) -> Self {
        Self::new(NodeKind::Image(ImageProps { bitmap }))
    }

    pub fn canvas(commands: Vec<CanvasCommand>) -> Self {
        Self::new(NodeKind::Canvas(commands))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Builder combinators
    // ─────────────────────────────────────────────────────────────────────

    /// Request an explicit size in DIP instead of wrapping content.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.requested = Some((width, height));
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.background = color;
        }
        self
    }

    pub fn with_hover_background(mut self, color: Color) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.hover_background = Some(color);
        }
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.corner_radius = radius;
        }
        self
    }

    pub fn on_click(mut self, id: CallbackId) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.on_click = Some(id);
        }
        self
    }

    pub fn on_double_click(mut self, id: CallbackId) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.on_double_click = Some(id);
        }
        self
    }

    pub fn on_right_click(mut self, id: CallbackId) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.on_right_click = Some(id);
        }
        self
    }

    pub fn on_drop(mut self, id: CallbackId) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.on_drop = Some(id);
        }
        self
    }

    pub fn with_tooltip(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.tooltip = Some(Tooltip {
                title: title.into(),
                body: body.into(),
            });
        }
        self
    }

    pub fn with_blink(mut self, blink: bool) -> Self {
        if let NodeKind::Panel(p) = &mut self.kind {
            p.blink = blink;
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// True for horizontal/vertical containers (sequential main-axis layout).
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Horizontal | NodeKind::Vertical)
    }

    pub fn panel_props(&self) -> Option<&PanelProps> {
        match &self.kind {
            NodeKind::Panel(p) => Some(p),
            _ => None,
        }
    }

    /// Resolve a child-index path produced by the hit tester.
    pub fn node_at_path(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    pub fn node_at_path_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &i in path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_produces_panel_props() {
        let node = Node::panel()
            .with_background(Color::rgb(10, 20, 30))
            .with_corner_radius(4.0)
            .on_click(CallbackId(7))
            .with_tooltip("CPU", "12%");

        let props = node.panel_props().expect("panel props");
        assert_eq!(props.background, Color::rgb(10, 20, 30));
        assert_eq!(props.on_click, Some(CallbackId(7)));
        assert_eq!(props.tooltip.as_ref().map(|t| t.title.as_str()), Some("CPU"));
    }

    #[test]
    fn test_node_at_path() {
        let tree = Node::root().child(Node::hstack(0.0).child(Node::panel()));
        assert!(matches!(
            tree.node_at_path(&[0, 0]).map(|n| &n.kind),
            Some(NodeKind::Panel(_))
        ));
        assert!(tree.node_at_path(&[0, 1]).is_none());
    }
}
