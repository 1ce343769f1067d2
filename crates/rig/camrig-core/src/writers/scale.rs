//! Per-axis position scaling inside the camera pipeline.
//!
//! The baseline is taken right after `Body` on the first tick (or the first
//! tick after `reset`). At `Finalize` the camera's offset from the baseline
//! is scaled per axis. Changing the follow target without calling `reset`
//! keeps the old baseline.

use std::any::Any;

use crate::camera::{CameraExtension, CameraState, PipelineStage};
use crate::config::AxisScaleConfig;
use crate::spatial::scale_about;

#[derive(Debug, Clone, Default)]
pub struct AxisScaler {
    pub config: AxisScaleConfig,
    baseline: Option<[f32; 3]>,
}

impl AxisScaler {
    pub fn new(config: AxisScaleConfig) -> Self {
        Self {
            config,
            baseline: None,
        }
    }

    pub fn baseline(&self) -> Option<[f32; 3]> {
        self.baseline
    }

    /// Forget the baseline; the next `Body` stage captures a fresh one.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

impl CameraExtension for AxisScaler {
    fn post_pipeline_stage(&mut self, stage: PipelineStage, state: &mut CameraState, _dt: f32) {
        match stage {
            PipelineStage::Body => {
                if self.baseline.is_none() {
                    self.baseline = Some(state.raw_position);
                }
            }
            PipelineStage::Finalize => {
                if let Some(base) = self.baseline {
                    state.raw_position = scale_about(base, state.raw_position, self.config.scale);
                }
            }
            _ => {}
        }
    }

    fn type_name(&self) -> &'static str {
        "AxisScaler"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_tick(scaler: &mut AxisScaler, body_position: [f32; 3]) -> [f32; 3] {
        let mut state = CameraState::default();
        for stage in PipelineStage::ORDER {
            if stage == PipelineStage::Body {
                state.raw_position = body_position;
            }
            scaler.post_pipeline_stage(stage, &mut state, 0.016);
        }
        state.raw_position
    }

    #[test]
    fn scales_offset_from_first_body_position() {
        let mut scaler = AxisScaler::new(AxisScaleConfig {
            scale: [2.0, 1.0, 0.0],
        });
        assert_eq!(run_tick(&mut scaler, [1.0, 1.0, 1.0]), [1.0, 1.0, 1.0]);
        assert_eq!(run_tick(&mut scaler, [2.0, 3.0, 4.0]), [3.0, 3.0, 1.0]);
    }

    #[test]
    fn reset_recaptures_on_next_tick() {
        let mut scaler = AxisScaler::new(AxisScaleConfig { scale: [0.5; 3] });
        run_tick(&mut scaler, [0.0; 3]);
        scaler.reset();
        assert_eq!(scaler.baseline(), None);
        assert_eq!(run_tick(&mut scaler, [8.0, 8.0, 8.0]), [8.0, 8.0, 8.0]);
        assert_eq!(scaler.baseline(), Some([8.0, 8.0, 8.0]));
    }
}
