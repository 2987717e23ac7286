//! Drag-to-reorder, driven entirely by the process whose widget is being
//! dragged.
//!
//! A press arms the controller; pointer travel beyond the dead zone turns
//! it into a drag. While dragging, the widget's window tracks the pointer
//! horizontally, a preview order is re-derived from live window centers,
//! and every non-dragged sibling slides toward the slot that preview
//! implies. Release commits the preview; capture loss cancels it.

use crate::order::animate::SlideAnimation;
use crate::order::reposition_all;
use crate::slot::{SiblingWindow, StripGeometry};

#[derive(Debug)]
enum Phase {
    Idle,
    Pressed {
        start_x: i32,
        grab_offset: i32,
    },
    Dragging {
        grab_offset: i32,
        preview: Vec<String>,
        own_target: i32,
        slide: SlideAnimation,
    },
}

/// Window moves the controller wants applied for one frame.
#[derive(Debug, Clone)]
pub struct DragFrame {
    /// Left edge for the dragged window (vertical position stays pinned).
    pub own_x: i32,
    /// Animated left edges for the non-dragged siblings.
    pub sibling_moves: Vec<(String, i32)>,
    /// The order implied by current window centers, rightmost first.
    pub preview: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragRelease {
    /// The press never left the dead zone; let it fall through as a click.
    Click,
    /// Drag committed: persist `order`, snap the dragged window to
    /// `snap_x`, then broadcast a reposition.
    Committed { order: Vec<String>, snap_x: i32 },
}

pub struct DragController {
    own_name: String,
    dead_zone: i32,
    anim_factor: f32,
    anim_epsilon: f32,
    phase: Phase,
}

impl DragController {
    pub fn new(own_name: impl Into<String>, dead_zone: i32, anim_factor: f32, anim_epsilon: f32) -> Self {
        Self {
            own_name: own_name.into(),
            dead_zone,
            anim_factor,
            anim_epsilon,
            phase: Phase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// True from pointer-down until release or cancellation.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Pointer capture begins. `pointer_x` and `window_left` are in strip
    /// coordinates; their difference is the grab offset kept for the whole
    /// drag.
    pub fn pointer_down(&mut self, pointer_x: i32, window_left: i32) {
        self.phase = Phase::Pressed {
            start_x: pointer_x,
            grab_offset: pointer_x - window_left,
        };
    }

    /// Pointer moved while captured. Returns the window moves to apply, or
    /// `None` while still inside the dead zone. `siblings` is the live
    /// enumeration excluding this widget's own window.
    pub fn pointer_move(
        &mut self,
        pointer_x: i32,
        own_width: i32,
        siblings: &[SiblingWindow],
        strip: &StripGeometry,
        margin: i32,
    ) -> Option<DragFrame> {
        if let Phase::Pressed {
            start_x,
            grab_offset,
        } = self.phase
        {
            if (pointer_x - start_x).abs() <= self.dead_zone {
                return None;
            }
            tracing::debug!(widget = %self.own_name, "drag started");
            self.phase = Phase::Dragging {
                grab_offset,
                preview: Vec::new(),
                own_target: pointer_x - grab_offset,
                slide: SlideAnimation::default(),
            };
        }

        let Phase::Dragging {
            grab_offset,
            preview,
            own_target,
            slide,
        } = &mut self.phase
        else {
            return None;
        };

        let own_x = pointer_x - *grab_offset;

        // All visible windows, with the dragged one at its tracked position.
        let mut windows: Vec<SiblingWindow> = siblings
            .iter()
            .filter(|s| s.name != self.own_name)
            .cloned()
            .collect();
        windows.push(SiblingWindow::new(self.own_name.clone(), own_x, own_width));

        // Preview order: descending center-x, index 0 rightmost.
        windows.sort_by(|a, b| b.center().cmp(&a.center()).then_with(|| a.name.cmp(&b.name)));
        *preview = windows.iter().map(|w| w.name.clone()).collect();

        let placements = reposition_all(preview, &windows, strip, margin);
        slide.retain(|name| windows.iter().any(|w| w.name == name));
        for placement in &placements {
            if placement.name == self.own_name {
                *own_target = placement.x;
                continue;
            }
            let live = windows
                .iter()
                .find(|w| w.name == placement.name)
                .map(|w| w.left as f32)
                .unwrap_or(placement.x as f32);
            slide.set_target(&placement.name, live, placement.x as f32);
        }
        slide.tick(self.anim_factor, self.anim_epsilon);

        Some(DragFrame {
            own_x,
            sibling_moves: slide
                .positions()
                .map(|(name, x)| (name.to_string(), x))
                .collect(),
            preview: preview.clone(),
        })
    }

    /// Pointer released while captured.
    pub fn pointer_up(&mut self) -> DragRelease {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging {
                preview,
                own_target,
                ..
            } => {
                tracing::debug!(order = ?preview, "drag committed");
                DragRelease::Committed {
                    order: preview,
                    snap_x: own_target,
                }
            }
            _ => DragRelease::Click,
        }
    }

    /// Pointer capture was stolen. Returns true when a drag was in
    /// progress; the caller then broadcasts a reposition so every widget
    /// (this one included) snaps back to the persisted order.
    pub fn capture_lost(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            tracing::debug!(widget = %self.own_name, "drag cancelled, capture lost");
        }
        self.phase = Phase::Idle;
        was_dragging
    }
}
