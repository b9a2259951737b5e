#![deny(unsafe_code)]
//! Noise-driven particle flow field.
//!
//! Points are scattered on a jittered lattice and, every frame, move one
//! step along the direction sampled from a smoothed 3D noise volume. Each
//! move emits a circle draw command colored either by the flow angle or by a
//! position gradient. Points that leave the domain respawn at a random
//! position inside it, so the point count never changes.
//!
//! [`Simulation`] is generic over its random and noise sources so hosts can
//! inject their own; [`FlowEngine`] fixes them to the seeded defaults and
//! implements [`Engine`].

pub mod coloring;
pub mod config;
pub mod domain;
pub mod field;
pub mod point;
pub mod simulation;

pub use config::FlowConfig;
pub use domain::Domain;
pub use field::FlowField;
pub use point::Point;
pub use simulation::{Simulation, SimulationState};

use serde_json::Value;
use wavy_core::canvas::DrawCommand;
use wavy_core::error::EngineError;
use wavy_core::grid::SpatialGrid;
use wavy_core::noise::PerlinNoise;
use wavy_core::prng::Xorshift64;
use wavy_core::Engine;

/// Flow-field engine with a seeded Xorshift64 stream and Perlin noise.
pub struct FlowEngine {
    simulation: Simulation<Xorshift64, PerlinNoise>,
}

impl FlowEngine {
    /// Creates and initializes a flow field over a `width × height` domain.
    ///
    /// The same `seed` drives both the random stream and the noise
    /// permutation, so runs with equal arguments are bit-identical.
    ///
    /// Returns `EngineError::InvalidParam` for an out-of-range config, or
    /// `EngineError::InvalidDimensions` if a side is 2 or less.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        config: FlowConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let noise = PerlinNoise::with_detail(
            noise_seed(seed),
            config.noise_octaves as u32,
            config.noise_falloff,
        );
        let mut simulation = Simulation::new(config, Xorshift64::new(seed), noise);
        simulation.initialize(width as f64, height as f64)?;
        Ok(Self { simulation })
    }

    /// Creates a flow-field engine from a JSON params object, falling back to
    /// defaults for missing keys.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(width, height, seed, FlowConfig::from_json(json_params))
    }

    /// The underlying simulation.
    pub fn simulation(&self) -> &Simulation<Xorshift64, PerlinNoise> {
        &self.simulation
    }

    /// Number of points placed at construction.
    pub fn point_count(&self) -> usize {
        self.simulation.points().len()
    }

    /// Point counts over a `side × side` grid; see [`Simulation::occupancy`].
    pub fn occupancy(&self, side: usize) -> Result<SpatialGrid<usize>, EngineError> {
        self.simulation.occupancy(side)
    }
}

/// Folds a 64-bit seed into the 32 bits the noise permutation accepts.
fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

impl Engine for FlowEngine {
    fn step(&mut self) -> Result<&[DrawCommand], EngineError> {
        Ok(self.simulation.step())
    }

    fn fade_alpha(&self) -> f64 {
        self.simulation.config().fade_speed
    }

    fn params(&self) -> Value {
        self.simulation.config().to_json()
    }

    fn param_schema(&self) -> Value {
        FlowConfig::schema()
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        self.simulation.resize(width, height)
    }
}
