//! Greedy randomized 2D shape packing with infinite zoom.
//!
//! The plane is filled with non-overlapping (or optionally nested) shapes of a
//! single family: each simulation step samples random positions inside the
//! viewport, asks the already-placed shapes how large a new one may grow
//! there, and keeps the result if it clears the configured minimum. A uniform
//! bucket [`Grid`](grid::Grid) keeps those collision queries sub-linear as the
//! pool grows into the thousands. When zooming, every placed shape is rescaled
//! about a focus point; shapes leaving the viewport are recycled back into the
//! placement pool, so the zoom can run forever at a bounded cost per frame.
//!
//! The coordinate system is centered: the viewport covers
//! `[-w/2, w/2] × [-h/2, h/2]` in [`WorldSpace`](pattern::WorldSpace) units,
//! one unit per pixel.
//!
//! # Basic usage
//! ```no_run
//! use {
//!   shape_packing::{
//!     engine::{Config, Engine},
//!     pattern::Primitive,
//!     plotter::SvgPlotter
//!   },
//!   euclid::Size2D
//! };
//!
//! let config = Config {
//!   primitive: Primitive::Circle,
//!   zoom_speed: 0.3,
//!   ..Config::default()
//! };
//! let domain = Size2D::new(512.0, 512.0);
//!
//! let mut engine = Engine::new(0);
//! engine.reset(&config);
//! engine.set_items_count(2000);
//!
//! // one step per rendered frame
//! for _ in 0..600 {
//!   engine.update(1.0 / 60.0, domain, None, &config);
//! }
//!
//! let mut plotter = SvgPlotter::new(domain, config.color_mode());
//! engine.draw(&mut plotter, &config);
//! std::fs::write("out.svg", plotter.into_svg()).unwrap();
//! ```
//!
//! With the `drawing` feature enabled, [`drawing::ImagePlotter`] rasterizes
//! the same shape list into an `image::RgbaImage` instead.

pub mod color;
pub mod pattern;
pub mod grid;
pub mod engine;
pub mod plotter;
#[cfg(feature = "drawing")]
pub mod drawing;
