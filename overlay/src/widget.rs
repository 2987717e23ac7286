//! Per-widget application runner.
//!
//! One `WidgetApp` per process: it owns the builder callback and the
//! handler table, drives invalidate → build → measure → arrange → paint →
//! present, routes pointer events through the hit tester, and speaks the
//! cross-process placement protocol (slot finding, drag-to-reorder,
//! broadcast-driven repositioning).

use std::collections::HashMap;

use ledge_core::{
    CallbackId, Color, DragController, DragRelease, FileOrderStore, HitInfo, HoverOverlay,
    HoverTracker, Node, OrderCoordinator, PixelBuffer, RenderParams, RepositionSignals,
    SiblingWindow, StripConfig, StripGeometry, TextShaper, Tooltip, apply_hover, arrange,
    find_interactive_node_at, find_slot, force_height, measure, render,
};

use crate::host::{PointerEvent, SurfaceHost, WidgetWindows};

/// Externally-owned table resolving the scene tree's opaque callback ids.
/// Trees stay plain values; behavior lives here.
#[derive(Default)]
pub struct Handlers {
    next_id: u32,
    table: HashMap<u32, Box<dyn FnMut()>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler and get the id to attach to a panel node.
    pub fn register(&mut self, handler: impl FnMut() + 'static) -> CallbackId {
        let id = self.next_id;
        self.next_id += 1;
        self.table.insert(id, Box::new(handler));
        CallbackId(id)
    }

    /// Invoke a handler; unknown ids are a no-op.
    pub fn invoke(&mut self, id: CallbackId) {
        if let Some(handler) = self.table.get_mut(&id.0) {
            handler();
        }
    }
}

/// The per-process widget application.
pub struct WidgetApp<H: SurfaceHost, W: WidgetWindows> {
    name: String,
    host: H,
    windows: W,
    shaper: Box<dyn TextShaper>,
    builder: Box<dyn FnMut() -> Node>,
    handlers: Handlers,
    config: StripConfig,
    coordinator: OrderCoordinator<FileOrderStore>,
    signals: Option<RepositionSignals>,
    drag: DragController,
    hover: HoverTracker,
    /// The current frame's arranged tree; replaced wholesale each repaint.
    tree: Option<Node>,
    pointer_inside: bool,
    last_width: i32,
    blink_on: bool,
    needs_paint: bool,
}

impl<H: SurfaceHost, W: WidgetWindows> WidgetApp<H, W> {
    pub fn new(
        name: impl Into<String>,
        host: H,
        windows: W,
        shaper: Box<dyn TextShaper>,
        builder: Box<dyn FnMut() -> Node>,
        handlers: Handlers,
        config: StripConfig,
        store: FileOrderStore,
    ) -> Self {
        let name = name.into();

        let signals = match RepositionSignals::subscribe(&store) {
            Ok(signals) => Some(signals),
            Err(e) => {
                // Degrade to self-driven repositioning only.
                tracing::warn!(error = %e, "reposition signals unavailable");
                None
            }
        };

        let mut coordinator = OrderCoordinator::new(store);
        coordinator.register(&name);

        let drag = DragController::new(
            name.clone(),
            config.drag_dead_zone,
            config.anim_factor,
            config.anim_epsilon,
        );

        Self {
            name,
            host,
            windows,
            shaper,
            builder,
            handlers,
            config,
            coordinator,
            signals,
            drag,
            hover: HoverTracker::default(),
            tree: None,
            pointer_inside: false,
            last_width: 0,
            blink_on: false,
            needs_paint: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request a rebuild + repaint on the next pump.
    pub fn invalidate(&mut self) {
        self.needs_paint = true;
    }

    /// One pass of the event loop: apply any pending reposition broadcast,
    /// then repaint if dirty. Call whenever the platform pump goes idle.
    pub fn pump(&mut self) {
        if self.signals.as_mut().is_some_and(|s| s.poll()) {
            self.reposition();
            self.needs_paint = true;
        }
        if self.needs_paint {
            self.render_frame();
            self.needs_paint = false;
        }
    }

    /// Recompute this widget's slot from the shared order and live sibling
    /// geometry, then move the window there.
    pub fn reposition(&mut self) {
        self.coordinator.refresh();
        let strip = self.strip_geometry();
        let width = self.last_width.max(1);
        let siblings = self.siblings();

        let slot = find_slot(
            width,
            &self.name,
            &strip,
            &siblings,
            self.config.margin,
            self.coordinator.order(),
        );
        let x = if slot.is_valid {
            slot.x
        } else {
            // Explicit fallback: pin against the boundary rather than
            // leaving the widget unplaced.
            tracing::warn!(widget = %self.name, "no valid slot, pinning to boundary");
            (strip.right_boundary() - width).max(strip.min_left())
        };
        self.host.move_window(x);
    }

    /// Build, lay out, paint and present one frame.
    pub fn render_frame(&mut self) {
        let scale = self.host.dpi_scale();
        let strip_height = self.host.strip_height();

        let mut tree = (self.builder)();
        measure(&mut tree, scale, self.shaper.as_mut());
        force_height(&mut tree, strip_height);
        arrange(&mut tree);

        let width = tree.layout.width;
        if width != self.last_width {
            let was_placed = self.last_width != 0;
            self.last_width = width;
            self.host.resize_window(width, strip_height);
            self.reposition();
            if was_placed {
                // Content grew or shrank: tell every sibling to make or
                // reclaim the space.
                self.coordinator.broadcast_reposition();
            }
        }

        if let Some(path) = self.hover.current().cloned() {
            // The path may no longer resolve in the rebuilt tree; that is
            // fine, the next pointer move re-derives it.
            apply_hover(&mut tree, &path);
        }

        let mut buffer = PixelBuffer::new(width.max(1) as u32, strip_height.max(1) as u32);
        let params = RenderParams {
            dpi_scale: scale,
            hover_overlay: self.pointer_inside.then(|| HoverOverlay {
                inset: 1,
                corner_radius: 4.0,
                color: Color::rgba(255, 255, 255, 24),
            }),
            blink_on: self.blink_on,
        };
        render(&mut buffer, &tree, self.shaper.as_mut(), &params);

        let left = self.host.window_left();
        self.host.present(&buffer, left, 0);
        self.tree = Some(tree);
    }

    /// Route a pointer event from the platform event pump.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter => {
                self.pointer_inside = true;
                self.needs_paint = true;
            }
            PointerEvent::Leave => {
                self.pointer_inside = false;
                self.hover.clear();
                self.needs_paint = true;
            }
            PointerEvent::Move { x, y } => self.on_pointer_move(x, y),
            PointerEvent::Down { x, .. } => {
                self.host.begin_pointer_capture();
                let left = self.host.window_left();
                self.drag.pointer_down(left + x, left);
            }
            PointerEvent::Up { x, y } => self.on_pointer_up(x, y),
            PointerEvent::DoubleClick { x, y } => self.dispatch(x, y, |hit| hit.on_double_click),
            PointerEvent::RightDown { x, y } => self.dispatch(x, y, |hit| hit.on_right_click),
            PointerEvent::CaptureLost => {
                if self.drag.capture_lost() {
                    // Cancelled drag: everyone, this widget included, snaps
                    // back to the persisted order.
                    self.coordinator.broadcast_reposition();
                    self.reposition();
                    self.needs_paint = true;
                }
            }
        }
    }

    /// Route an OS file drop at window-local (x, y) to the panel under it.
    pub fn handle_drop(&mut self, x: i32, y: i32) {
        self.dispatch(x, y, |hit| hit.on_drop);
    }

    /// Flip the shared blink clock; call every `blink_interval_ms`.
    pub fn tick_blink(&mut self) {
        self.blink_on = !self.blink_on;
        self.needs_paint = true;
    }

    /// Tooltip of the currently hovered panel, for the tooltip scheduler.
    pub fn hovered_tooltip(&self) -> Option<&Tooltip> {
        let path = self.hover.current()?;
        let node = self.tree.as_ref()?.node_at_path(path)?;
        node.panel_props()?.tooltip.as_ref()
    }

    pub fn coordinator(&self) -> &OrderCoordinator<FileOrderStore> {
        &self.coordinator
    }

    fn on_pointer_move(&mut self, x: i32, y: i32) {
        let left = self.host.window_left();

        if self.drag.is_active() {
            let strip = self.strip_geometry();
            let siblings = self.siblings();
            if let Some(frame) = self.drag.pointer_move(
                left + x,
                self.last_width.max(1),
                &siblings,
                &strip,
                self.config.margin,
            ) {
                self.host.move_window(frame.own_x);
                for (name, sibling_x) in &frame.sibling_moves {
                    self.windows.move_to(name, *sibling_x);
                }
                self.needs_paint = true;
                return;
            }
        }

        let scale = self.host.dpi_scale();
        let hit = self
            .tree
            .as_ref()
            .and_then(|tree| find_interactive_node_at(tree, x, y, scale));
        if self.hover.update(hit.as_ref()) {
            // Hover repaint; the caller reads hovered_tooltip() to schedule
            // the tooltip.
            self.needs_paint = true;
        }
    }

    fn on_pointer_up(&mut self, x: i32, y: i32) {
        self.host.end_pointer_capture();
        match self.drag.pointer_up() {
            DragRelease::Committed { order, snap_x } => {
                self.coordinator.save_order(order);
                self.host.move_window(snap_x);
                self.coordinator.broadcast_reposition();
                self.needs_paint = true;
            }
            DragRelease::Click => self.dispatch(x, y, |hit| hit.on_click),
        }
    }

    fn dispatch(&mut self, x: i32, y: i32, select: impl Fn(&HitInfo) -> Option<CallbackId>) {
        let scale = self.host.dpi_scale();
        let id = self
            .tree
            .as_ref()
            .and_then(|tree| find_interactive_node_at(tree, x, y, scale))
            .and_then(|hit| select(&hit));
        if let Some(id) = id {
            self.handlers.invoke(id);
            self.needs_paint = true;
        }
    }

    fn strip_geometry(&self) -> StripGeometry {
        StripGeometry {
            width: self.windows.strip_width(),
            height: self.host.strip_height(),
            reserved_left: self.windows.reserved_left(),
            fallback_inset: self.config.fallback_inset,
        }
    }

    /// Live sibling windows, this widget excluded.
    fn siblings(&self) -> Vec<SiblingWindow> {
        self.windows
            .list()
            .into_iter()
            .filter(|s| s.name != self.name)
            .collect()
    }
}
