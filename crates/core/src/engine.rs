//! The core `Engine` trait that every frame-driven visualization implements.
//!
//! The trait is object-safe so engines can be used as `dyn Engine` for runtime
//! switching between different algorithms.

use crate::canvas::DrawCommand;
use crate::error::EngineError;
use serde_json::Value;

/// Core trait for frame-driven engines.
///
/// Each call to [`step`](Engine::step) advances the simulation by one frame
/// and returns the draw commands for that frame. The host renderer first
/// fades its canvas by [`fade_alpha`](Engine::fade_alpha), then draws the
/// commands in order.
///
/// This trait is **object-safe**: you can use `Box<dyn Engine>` or `&dyn Engine`
/// for runtime polymorphism.
pub trait Engine {
    /// Advance the simulation by one frame and return that frame's draw commands.
    ///
    /// The returned slice is valid until the next call to `step`.
    fn step(&mut self) -> Result<&[DrawCommand], EngineError>;

    /// Opacity (0-255) of the background painted over the previous frame.
    fn fade_alpha(&self) -> f64;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// The host surface changed size.
    ///
    /// Engines that ignore resizes keep the default no-op.
    fn resize(&mut self, _width: f64, _height: f64) -> Result<(), EngineError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use glam::DVec2;
    use serde_json::json;

    /// Minimal engine implementation used to verify trait object safety.
    struct MockEngine {
        frame: Vec<DrawCommand>,
        step_count: usize,
    }

    impl MockEngine {
        fn new() -> Self {
            Self {
                frame: Vec::new(),
                step_count: 0,
            }
        }
    }

    impl Engine for MockEngine {
        fn step(&mut self) -> Result<&[DrawCommand], EngineError> {
            self.step_count += 1;
            self.frame.clear();
            self.frame.push(DrawCommand {
                position: DVec2::splat(self.step_count as f64),
                color: Color::rgb(255.0, 0.0, 0.0, 255.0),
                radius: 1.0,
            });
            Ok(&self.frame)
        }

        fn fade_alpha(&self) -> f64 {
            2.0
        }

        fn params(&self) -> Value {
            json!({"step_count": self.step_count})
        }

        fn param_schema(&self) -> Value {
            json!({
                "step_count": {
                    "type": "integer",
                    "default": 0,
                    "description": "Number of steps executed"
                }
            })
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        // Fails to compile if Engine stops being object-safe.
        let mut engine: Box<dyn Engine> = Box::new(MockEngine::new());
        assert_eq!(engine.step().unwrap().len(), 1);
        assert_eq!(engine.fade_alpha(), 2.0);
    }

    #[test]
    fn step_returns_fresh_frame() {
        let mut engine = MockEngine::new();
        engine.step().unwrap();
        let frame = engine.step().unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].position, DVec2::splat(2.0));
    }

    #[test]
    fn mock_engine_params_reflects_state() {
        let mut engine = MockEngine::new();
        engine.step().unwrap();
        assert_eq!(engine.params()["step_count"], 1);
    }

    #[test]
    fn mock_engine_param_schema_has_expected_structure() {
        let engine = MockEngine::new();
        let schema = engine.param_schema();
        assert_eq!(schema["step_count"]["type"], "integer");
    }

    #[test]
    fn default_resize_is_noop() {
        let mut engine = MockEngine::new();
        assert!(engine.resize(10.0, 20.0).is_ok());
    }

    #[test]
    fn dyn_engine_mut_reference_works() {
        let mut engine = MockEngine::new();
        let engine_ref: &mut dyn Engine = &mut engine;
        engine_ref.step().unwrap();
        assert_eq!(engine_ref.params()["step_count"], 1);
    }
}
