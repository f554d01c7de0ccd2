//! Gesture handling that is independent of rendering.

pub mod drag_drop;
