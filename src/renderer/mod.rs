//! Rendering module
//!
//! `shapes` turns simulation state into strokes and blobs; `canvas` paints
//! them with the Canvas 2D API in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderState;
