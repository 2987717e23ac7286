//! Ledge overlay hosting layer
//!
//! Everything a widget process needs around the core engine: the narrow
//! collaborator traits over the platform, a cosmic-text shaper, PNG
//! bitmap loading and the per-widget application runner.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    widget                           │
//! │                  WidgetApp                          │
//! │   (frame loop, callbacks, hover, drag, reposition)  │
//! ├─────────────────────────────────────────────────────┤
//! │              shaper + bitmap                        │
//! │      cosmic-text TextShaper, PNG decoding           │
//! ├─────────────────────────────────────────────────────┤
//! │                     host                            │
//! │   SurfaceHost, WidgetWindows, PointerEvent          │
//! │        (traits over the real platform)              │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod bitmap;
pub mod host;
pub mod shaper;
pub mod widget;

// Re-export commonly used types
pub use bitmap::{BitmapError, load_png};
pub use host::{PointerEvent, SurfaceHost, WidgetWindows};
pub use shaper::CosmicShaper;
pub use widget::{Handlers, WidgetApp};
