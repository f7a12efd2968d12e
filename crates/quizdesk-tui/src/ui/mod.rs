//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, sidebar, status bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styling
//! - `pages`: per-route content rendering (subjects, try-outs, etc.)

pub mod input;
pub mod pages;
pub mod render;
pub mod styles;
