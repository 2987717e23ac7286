//! Ledge core engine
//!
//! Immediate-mode layout and compositing for taskbar-strip widgets, plus
//! the cross-process slot allocation and ordering protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  order/ + slot                      │
//! │   OrderCoordinator, DragController, find_slot       │
//! │        (cross-process placement protocol)           │
//! ├─────────────────────────────────────────────────────┤
//! │               hittest + raster/                     │
//! │     deepest-panel hit testing, compositor walk      │
//! ├─────────────────────────────────────────────────────┤
//! │                scene + layout                       │
//! │    per-frame tree, measure/arrange box layout       │
//! ├─────────────────────────────────────────────────────┤
//! │       geometry, color, buffer, bitmap, text         │
//! │        (value types + collaborator traits)          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Every widget instance is a separate process with a single event thread;
//! the only shared state is the durable order list and the payload-free
//! reposition broadcast in [`order::store`].

pub mod bitmap;
pub mod buffer;
pub mod color;
pub mod config;
pub mod geometry;
pub mod hittest;
pub mod layout;
pub mod order;
pub mod raster;
pub mod scene;
pub mod slot;
pub mod text;

// Re-exports for convenience
pub use bitmap::Bitmap;
pub use buffer::PixelBuffer;
pub use color::{Color, blend_over};
pub use config::StripConfig;
pub use geometry::{Point, Rect, Size, scale_dip};
pub use hittest::{HitInfo, HoverTracker, NodePath, apply_hover, find_interactive_node_at};
pub use layout::{arrange, force_height, measure};
pub use order::animate::SlideAnimation;
pub use order::drag::{DragController, DragFrame, DragRelease};
pub use order::store::{FileOrderStore, OrderStore, RepositionSignals, StoreError};
pub use order::{OrderCoordinator, Placement, reposition_all};
pub use raster::{BASE_PIXEL, HoverOverlay, RenderParams, render};
pub use raster::rounded::rounded_rect_contains;
pub use scene::{CallbackId, CanvasCommand, Node, NodeKind, PanelProps, Tooltip};
pub use slot::{SiblingWindow, Slot, StripGeometry, find_slot};
pub use text::{FontSpec, TextAlign, TextShaper};
