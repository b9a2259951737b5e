#![deny(unsafe_code)]
//! Engine registry: maps engine names to implementations, drives frames onto
//! a [`Canvas`], and provides CPU-side snapshot output.
//!
//! This crate sits between `wavy-core` (which defines the `Engine` trait and
//! the canvas) and the engine crates (`wavy-flow`). The CLI depends on it so
//! dispatch logic lives in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use serde_json::Value;
use wavy_core::canvas::{Canvas, DrawCommand};
use wavy_core::error::EngineError;
use wavy_core::Engine;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["flow-field"];

/// Enumeration of all available engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction.
pub enum EngineKind {
    /// Noise-driven particle flow field.
    FlowField(wavy_flow::FlowEngine),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "flow-field" => Ok(EngineKind::FlowField(wavy_flow::FlowEngine::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }

    /// Parameter schema of an engine without constructing it.
    pub fn schema_for(name: &str) -> Result<Value, EngineError> {
        match name {
            "flow-field" => Ok(wavy_flow::FlowConfig::schema()),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<&[DrawCommand], EngineError> {
        match self {
            EngineKind::FlowField(e) => e.step(),
        }
    }

    fn fade_alpha(&self) -> f64 {
        match self {
            EngineKind::FlowField(e) => e.fade_alpha(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::FlowField(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::FlowField(e) => e.param_schema(),
        }
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        match self {
            EngineKind::FlowField(e) => e.resize(width, height),
        }
    }
}

/// Renders one frame: fades the canvas by the engine's fade alpha, steps the
/// engine and draws its commands. Returns the number of commands drawn.
pub fn advance_frame(engine: &mut dyn Engine, canvas: &mut Canvas) -> Result<usize, EngineError> {
    canvas.fade(engine.fade_alpha());
    let commands = engine.step()?;
    canvas.draw(commands);
    Ok(commands.len())
}
