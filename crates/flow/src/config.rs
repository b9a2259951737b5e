//! Flow-field configuration: defaults, JSON loading, validation and schema.

use serde_json::{json, Value};
use wavy_core::error::EngineError;
use wavy_core::params::{
    param_bool, param_f64, param_usize, require_finite, require_in_range, require_positive,
};

/// Default grid divisions across the domain width.
const DEFAULT_DENSITY: usize = 100;
/// Default noise sampling scale.
const DEFAULT_ANGLE_MULTIPLIER: f64 = 0.005;
/// Default distance moved per step.
const DEFAULT_FLOW_SPEED: f64 = 1.0;
/// Default per-sample depth jitter weight (0 = pure 2D field).
const DEFAULT_DEPTH_RANDOMNESS: f64 = 0.0;
/// Default weight of a point's depth offset in the noise lookup.
const DEFAULT_DEPTH_INFLUENCE: f64 = 0.0;
/// Default bound on depth offsets.
const DEFAULT_DEPTH_RANGE: f64 = 10.0;
/// Default trail fade opacity (0-255).
const DEFAULT_FADE_SPEED: f64 = 1.0;
/// Default drawn dot size.
const DEFAULT_ELLIPSE_RADIUS: f64 = 1.0;
/// Default drawn circle opacity (0-255).
const DEFAULT_ELLIPSE_ALPHA: f64 = 255.0;
const DEFAULT_USE_ANGLE_FOR_COLOR: bool = true;
const DEFAULT_ALWAYS_EVALUATE_COLOR: bool = true;
/// Default noise octave count.
const DEFAULT_NOISE_OCTAVES: usize = 1;
/// Default amplitude ratio between successive noise octaves.
const DEFAULT_NOISE_FALLOFF: f64 = 0.5;
/// Largest accepted noise octave count.
const MAX_NOISE_OCTAVES: usize = 16;
/// Largest accepted density.
pub const MAX_DENSITY: usize = 10_000;

/// Immutable parameters of a flow-field simulation.
///
/// Use [`Default`] for the stock look (pure 2D field, hue from angle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    /// Number of point spacings across the domain width; sets point count.
    pub density: usize,
    /// Scale applied to positions before noise sampling.
    pub angle_multiplier: f64,
    /// Distance a point moves per step.
    pub flow_speed: f64,
    /// Weight of the per-sample random depth jitter.
    pub depth_randomness: f64,
    /// Weight of a point's depth offset in the noise lookup; also scales
    /// the depth perturbation on respawn.
    pub depth_influence: f64,
    /// Depth offsets stay within `[-depth_range, depth_range]`.
    pub depth_range: f64,
    /// Opacity (0-255) of the background painted over each previous frame.
    pub fade_speed: f64,
    /// Size of the dot drawn for each point; the renderer uses it as the
    /// circle's diameter.
    pub ellipse_radius: f64,
    /// Opacity (0-255) of each drawn circle.
    pub ellipse_alpha: f64,
    /// Color points by their flow angle.
    pub use_angle_for_color: bool,
    /// Recompute the position gradient color every step instead of caching it
    /// until respawn. Ignored when `use_angle_for_color` is set.
    pub always_evaluate_color: bool,
    pub noise_octaves: usize,
    pub noise_falloff: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            angle_multiplier: DEFAULT_ANGLE_MULTIPLIER,
            flow_speed: DEFAULT_FLOW_SPEED,
            depth_randomness: DEFAULT_DEPTH_RANDOMNESS,
            depth_influence: DEFAULT_DEPTH_INFLUENCE,
            depth_range: DEFAULT_DEPTH_RANGE,
            fade_speed: DEFAULT_FADE_SPEED,
            ellipse_radius: DEFAULT_ELLIPSE_RADIUS,
            ellipse_alpha: DEFAULT_ELLIPSE_ALPHA,
            use_angle_for_color: DEFAULT_USE_ANGLE_FOR_COLOR,
            always_evaluate_color: DEFAULT_ALWAYS_EVALUATE_COLOR,
            noise_octaves: DEFAULT_NOISE_OCTAVES,
            noise_falloff: DEFAULT_NOISE_FALLOFF,
        }
    }
}

impl FlowConfig {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys. Does not validate.
    pub fn from_json(params: &Value) -> Self {
        Self {
            density: param_usize(params, "density", DEFAULT_DENSITY),
            angle_multiplier: param_f64(params, "angle_multiplier", DEFAULT_ANGLE_MULTIPLIER),
            flow_speed: param_f64(params, "flow_speed", DEFAULT_FLOW_SPEED),
            depth_randomness: param_f64(params, "depth_randomness", DEFAULT_DEPTH_RANDOMNESS),
            depth_influence: param_f64(params, "depth_influence", DEFAULT_DEPTH_INFLUENCE),
            depth_range: param_f64(params, "depth_range", DEFAULT_DEPTH_RANGE),
            fade_speed: param_f64(params, "fade_speed", DEFAULT_FADE_SPEED),
            ellipse_radius: param_f64(params, "ellipse_radius", DEFAULT_ELLIPSE_RADIUS),
            ellipse_alpha: param_f64(params, "ellipse_alpha", DEFAULT_ELLIPSE_ALPHA),
            use_angle_for_color: param_bool(
                params,
                "use_angle_for_color",
                DEFAULT_USE_ANGLE_FOR_COLOR,
            ),
            always_evaluate_color: param_bool(
                params,
                "always_evaluate_color",
                DEFAULT_ALWAYS_EVALUATE_COLOR,
            ),
            noise_octaves: param_usize(params, "noise_octaves", DEFAULT_NOISE_OCTAVES),
            noise_falloff: param_f64(params, "noise_falloff", DEFAULT_NOISE_FALLOFF),
        }
    }

    /// Checks every field against its documented range.
    ///
    /// Returns `EngineError::InvalidParam` naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.density == 0 {
            return Err(EngineError::InvalidParam {
                name: "density".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.density > MAX_DENSITY {
            return Err(EngineError::InvalidParam {
                name: "density".into(),
                reason: format!("must be at most {MAX_DENSITY}, got {}", self.density),
            });
        }
        require_finite("angle_multiplier", self.angle_multiplier)?;
        require_finite("flow_speed", self.flow_speed)?;
        require_in_range("depth_randomness", self.depth_randomness, 0.0, f64::MAX)?;
        require_in_range("depth_influence", self.depth_influence, 0.0, f64::MAX)?;
        require_in_range("depth_range", self.depth_range, 0.0, f64::MAX)?;
        require_in_range("fade_speed", self.fade_speed, 0.0, 255.0)?;
        require_positive("ellipse_radius", self.ellipse_radius)?;
        require_in_range("ellipse_alpha", self.ellipse_alpha, 0.0, 255.0)?;
        if !(1..=MAX_NOISE_OCTAVES).contains(&self.noise_octaves) {
            return Err(EngineError::InvalidParam {
                name: "noise_octaves".into(),
                reason: format!(
                    "must be in [1, {MAX_NOISE_OCTAVES}], got {}",
                    self.noise_octaves
                ),
            });
        }
        require_in_range("noise_falloff", self.noise_falloff, f64::MIN_POSITIVE, 1.0)?;
        Ok(())
    }

    /// Current values as a JSON object keyed like [`FlowConfig::from_json`].
    pub fn to_json(&self) -> Value {
        json!({
            "density": self.density,
            "angle_multiplier": self.angle_multiplier,
            "flow_speed": self.flow_speed,
            "depth_randomness": self.depth_randomness,
            "depth_influence": self.depth_influence,
            "depth_range": self.depth_range,
            "fade_speed": self.fade_speed,
            "ellipse_radius": self.ellipse_radius,
            "ellipse_alpha": self.ellipse_alpha,
            "use_angle_for_color": self.use_angle_for_color,
            "always_evaluate_color": self.always_evaluate_color,
            "noise_octaves": self.noise_octaves,
            "noise_falloff": self.noise_falloff,
        })
    }

    /// Schema describing every parameter, its type, range and default.
    pub fn schema() -> Value {
        json!({
            "density": {
                "type": "integer",
                "default": DEFAULT_DENSITY,
                "min": 1,
                "max": MAX_DENSITY,
                "description": "Point spacings across the domain width; higher means more points"
            },
            "angle_multiplier": {
                "type": "number",
                "default": DEFAULT_ANGLE_MULTIPLIER,
                "description": "Noise sampling scale; smaller values give smoother, wider waves"
            },
            "flow_speed": {
                "type": "number",
                "default": DEFAULT_FLOW_SPEED,
                "description": "Distance each point moves per frame"
            },
            "depth_randomness": {
                "type": "number",
                "default": DEFAULT_DEPTH_RANDOMNESS,
                "min": 0.0,
                "description": "Random jitter into the noise depth axis per sample"
            },
            "depth_influence": {
                "type": "number",
                "default": DEFAULT_DEPTH_INFLUENCE,
                "min": 0.0,
                "description": "Weight of each point's depth offset in the noise lookup"
            },
            "depth_range": {
                "type": "number",
                "default": DEFAULT_DEPTH_RANGE,
                "min": 0.0,
                "description": "Depth offsets are clamped to [-depth_range, depth_range]"
            },
            "fade_speed": {
                "type": "number",
                "default": DEFAULT_FADE_SPEED,
                "min": 0.0,
                "max": 255.0,
                "description": "Background opacity painted each frame; low values leave long trails"
            },
            "ellipse_radius": {
                "type": "number",
                "default": DEFAULT_ELLIPSE_RADIUS,
                "min": 0.0,
                "exclusive_min": true,
                "description": "Size of the dot drawn for each point, rendered as its diameter in pixels"
            },
            "ellipse_alpha": {
                "type": "number",
                "default": DEFAULT_ELLIPSE_ALPHA,
                "min": 0.0,
                "max": 255.0,
                "description": "Opacity of each drawn circle"
            },
            "use_angle_for_color": {
                "type": "boolean",
                "default": DEFAULT_USE_ANGLE_FOR_COLOR,
                "description": "Color points by flow angle instead of position"
            },
            "always_evaluate_color": {
                "type": "boolean",
                "default": DEFAULT_ALWAYS_EVALUATE_COLOR,
                "description": "Recompute position colors every frame instead of on spawn only"
            },
            "noise_octaves": {
                "type": "integer",
                "default": DEFAULT_NOISE_OCTAVES,
                "min": 1,
                "max": MAX_NOISE_OCTAVES,
                "description": "Number of layered noise octaves"
            },
            "noise_falloff": {
                "type": "number",
                "default": DEFAULT_NOISE_FALLOFF,
                "min": 0.0,
                "max": 1.0,
                "description": "Amplitude ratio between successive noise octaves"
            }
        })
    }
}
