//! Declarative scene tree, rebuilt from scratch every frame.
//!
//! A widget's builder callback returns a fresh tree each render cycle; the
//! tree is measured, arranged, painted and hit-tested, then discarded on
//! the next invalidate. There is no cross-frame node identity.
//!
//! Interactive callbacks are opaque [`CallbackId`] handles resolved against
//! an externally-owned handler table, never embedded closures.

mod canvas;
mod node;

pub use canvas::CanvasCommand;
pub use node::{
    CallbackId, ImageProps, Node, NodeKind, NodeLayout, PanelProps, TextProps, Tooltip,
};
