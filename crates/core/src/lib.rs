#![deny(unsafe_code)]
//! Core types and traits for the wavy flow-field visualization.
//!
//! Provides the `Engine` trait, `SpatialGrid`, the `Color` value engines emit,
//! `DrawCommand` and the CPU raster `Canvas`, the injectable `NoiseSource` and
//! `RandomSource` seams with their default implementations (`PerlinNoise`,
//! `Xorshift64`), and parameter helpers.

pub mod canvas;
pub mod color;
pub mod engine;
pub mod error;
pub mod grid;
pub mod noise;
pub mod params;
pub mod prng;

pub use canvas::{Canvas, DrawCommand};
pub use color::{Color, Srgb};
pub use engine::Engine;
pub use error::EngineError;
pub use grid::{CellRef, SpatialGrid};
pub use crate::noise::{NoiseSource, PerlinNoise};
pub use prng::{RandomSource, Xorshift64};
