//! # gilt-canvas
//!
//! A retained-mode 2D scene graph: a tree of positioned, styled layers that
//! resolves CSS-like relative sizing, composes hierarchical affine
//! transforms, hit-tests pointers against transformed geometry and batches
//! redraws into one pass per frame.
//!
//! Pixels are drawn by the host through the [`surface::DrawingSurface`]
//! trait; the scene only decides what goes where.
//!
//! ## Core Systems
//!
//! - **[`scene`]**: Scene arena, canvases, tree operations, layout and paint pass, hit testing, frame ticks
//! - **[`layer`]**: Layer kinds (rect, text, image), typed property updates, paint and text styles
//! - **[`unit`]**: Logos tokenizer for size tokens, two-phase resolved values, four-sided values
//! - **[`surface`]**: The drawing contract handed resolved geometry each frame
//! - **[`collection`]**: Ordered unique set used for sibling order
//! - **[`geometry`]**: Point, Size, Rect, Affine, Quad, point-in-polygon
//! - **[`testing`]**: Recording surface and Pilot for headless tests
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use gilt_canvas::geometry::{Point, Size};
//! use gilt_canvas::layer::LayerOptions;
//! use gilt_canvas::scene::{CanvasConfig, FrameInput, Scene};
//! use gilt_canvas::testing::RecordingSurface;
//!
//! # fn main() -> Result<(), gilt_canvas::scene::SceneError> {
//! let mut scene = Scene::new();
//! let canvas = scene.create_canvas(CanvasConfig::new())?;
//! let card = scene.create_layer(
//!     LayerOptions::rect()
//!         .with_position(10, 10)
//!         .with_size("25%", 100)
//!         .with_background("tomato"),
//! )?;
//! scene.add(canvas, card)?;
//!
//! let mut surface = RecordingSurface::new();
//! let input = FrameInput::new(Duration::from_millis(16), Size::new(400.0, 300.0));
//! scene.tick(canvas, &input, &mut surface)?;
//!
//! assert_eq!(scene.layer(card).unwrap().size(), Size::new(100.0, 100.0));
//! assert_eq!(scene.hit_test(canvas, Point::new(50.0, 50.0)), Some(card));
//! # Ok(())
//! # }
//! ```

// Foundation
pub mod collection;
pub mod geometry;
pub mod unit;

// Scene graph
pub mod layer;
pub mod scene;

// Drawing
pub mod surface;

// Test support
pub mod testing;
