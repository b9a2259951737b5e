//! The point collection and its per-frame update.

use crate::coloring::{angle_color, gradient_color};
use crate::config::FlowConfig;
use crate::domain::Domain;
use crate::field::FlowField;
use crate::point::Point;
use glam::DVec2;
use wavy_core::canvas::DrawCommand;
use wavy_core::error::EngineError;
use wavy_core::grid::SpatialGrid;
use wavy_core::noise::NoiseSource;
use wavy_core::prng::RandomSource;

/// Initial placement jitter per axis, drawn from `[-JITTER, JITTER)`.
const PLACEMENT_JITTER: f64 = 10.0;
/// Largest number of points `initialize` will place.
pub const MAX_POINTS: usize = 4_000_000;

/// Lifecycle of a [`Simulation`]. `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Uninitialized,
    Running,
}

/// Owns the points, the configuration and the injected random and noise
/// sources.
///
/// Created uninitialized; [`initialize`](Simulation::initialize) places the
/// points once, after which every [`step`](Simulation::step) moves each point
/// through the field and returns one draw command per point in creation
/// order.
pub struct Simulation<R, N> {
    config: FlowConfig,
    field: FlowField,
    rng: R,
    noise: N,
    domain: Option<Domain>,
    points: Vec<Point>,
    frame: Vec<DrawCommand>,
    frame_count: u64,
}

impl<R, N> Simulation<R, N>
where
    R: RandomSource,
    N: NoiseSource,
{
    /// Creates an uninitialized simulation. The config is checked by
    /// [`initialize`](Simulation::initialize).
    pub fn new(config: FlowConfig, rng: R, noise: N) -> Self {
        Self {
            field: FlowField::from_config(&config),
            config,
            rng,
            noise,
            domain: None,
            points: Vec::new(),
            frame: Vec::new(),
            frame_count: 0,
        }
    }

    /// Places one point per intersection of a square lattice with spacing
    /// `width / density`, jittered by up to 10 units per axis, and moves to
    /// `Running`.
    ///
    /// All points share one depth offset drawn from
    /// `[-depth_range, depth_range)`. Cached colors are computed here when
    /// colors are not evaluated every step.
    ///
    /// Returns `EngineError::AlreadyInitialized` on a second call,
    /// `EngineError::InvalidParam` if the config fails validation or the
    /// lattice would exceed [`MAX_POINTS`], or `EngineError::InvalidDimensions`
    /// if a side is not finite or is at most 2. On error the simulation stays
    /// uninitialized.
    pub fn initialize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        if self.domain.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }
        self.config.validate()?;
        let domain = Domain::new(width, height)?;
        let spacing = width / self.config.density as f64;
        let estimated = self.config.density as f64 * (height / spacing).ceil();
        if estimated > MAX_POINTS as f64 {
            return Err(EngineError::InvalidParam {
                name: "density".into(),
                reason: format!(
                    "would place about {estimated:.0} points on a {width}x{height} domain, limit is {MAX_POINTS}"
                ),
            });
        }
        let depth = self
            .rng
            .random_range(-self.config.depth_range, self.config.depth_range);

        let xs = lattice(spacing, width);
        let ys = lattice(spacing, height);
        let mut points = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                let jitter = DVec2::new(
                    self.rng.random_range(-PLACEMENT_JITTER, PLACEMENT_JITTER),
                    self.rng.random_range(-PLACEMENT_JITTER, PLACEMENT_JITTER),
                );
                let mut point = Point::new(DVec2::new(x, y) + jitter, depth);
                if !self.config.always_evaluate_color {
                    let color = gradient_color(point.position(), &domain, self.config.ellipse_alpha);
                    point = point.with_cached_color(color);
                }
                points.push(point);
            }
        }

        log::debug!(
            "flow field initialized: {}x{} domain, {} points, spacing {spacing:.3}, depth {depth:.3}",
            width,
            height,
            points.len()
        );
        self.points = points;
        self.domain = Some(domain);
        Ok(())
    }

    /// Advances every point one step and returns this frame's draw commands.
    ///
    /// Per point, in creation order: sample the field, advance, derive the
    /// color, emit a command, then respawn if the point left the domain.
    /// The slice is valid until the next call. An uninitialized simulation
    /// emits nothing.
    pub fn step(&mut self) -> &[DrawCommand] {
        self.frame.clear();
        let Some(domain) = self.domain else {
            log::warn!("step called before initialize; emitting no draw commands");
            return &self.frame;
        };

        let config = &self.config;
        let mut respawned = 0usize;
        for point in &mut self.points {
            let angle = self.field.angle_at(
                point.position(),
                point.depth_offset(),
                &self.noise,
                &mut self.rng,
            );
            point.advance(angle, config.flow_speed);

            let color = if config.use_angle_for_color {
                angle_color(angle, config.ellipse_alpha)
            } else if config.always_evaluate_color {
                gradient_color(point.position(), &domain, config.ellipse_alpha)
            } else {
                point
                    .cached_color()
                    .unwrap_or_else(|| gradient_color(point.position(), &domain, config.ellipse_alpha))
            };
            self.frame.push(DrawCommand {
                position: point.position(),
                color,
                radius: config.ellipse_radius,
            });

            if point.is_out_of_domain(&domain) {
                point.respawn(&domain, config, &mut self.rng);
                respawned += 1;
            }
        }

        self.frame_count += 1;
        log::trace!(
            "frame {}: {} commands, {respawned} respawned",
            self.frame_count,
            self.frame.len()
        );
        &self.frame
    }

    /// Updates the domain after a host resize. Points keep their positions;
    /// the next step respawns any that now lie outside.
    ///
    /// Returns `EngineError::NotInitialized` before
    /// [`initialize`](Simulation::initialize).
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        if self.domain.is_none() {
            return Err(EngineError::NotInitialized);
        }
        let domain = Domain::new(width, height)?;
        log::debug!("flow field domain resized to {width}x{height}");
        self.domain = Some(domain);
        Ok(())
    }

    /// Counts points per cell of a `side × side` grid laid over the square
    /// `[0, width)²`. Points outside that square are not counted.
    pub fn occupancy(&self, side: usize) -> Result<SpatialGrid<usize>, EngineError> {
        let domain = self.domain.ok_or(EngineError::NotInitialized)?;
        let mut grid = SpatialGrid::new(side, domain.width(), |_, _, _, _| 0usize)?;
        for point in &self.points {
            let cell = grid.cell_of(point.position());
            if let Ok(count) = grid.get_mut(cell) {
                *count += 1;
            }
        }
        Ok(grid)
    }

    /// `Running` once [`initialize`](Simulation::initialize) has succeeded.
    pub fn state(&self) -> SimulationState {
        if self.domain.is_some() {
            SimulationState::Running
        } else {
            SimulationState::Uninitialized
        }
    }

    /// Points in creation order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Current domain, `None` before initialization.
    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    /// Configuration this simulation was created with.
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Number of steps taken since initialization.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Multiples of `spacing` strictly below `limit`, starting at zero.
fn lattice(spacing: f64, limit: f64) -> Vec<f64> {
    (0u32..)
        .map(|i| f64::from(i) * spacing)
        .take_while(|&v| v < limit)
        .collect()
}
