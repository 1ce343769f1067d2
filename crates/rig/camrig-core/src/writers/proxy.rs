//! Target-following proxy: direct copy or scaled relative movement.

use std::any::Any;

use crate::config::ProxyConfig;
use crate::resolver::{resolve_target, TargetReference};
use crate::spatial::{add, scale, sub, SpatialState};
use crate::writers::{FrameWriter, WriterCtx};

/// Positions recorded on the first tick that saw the target.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Baseline {
    target: [f32; 3],
    owner: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct TransformProxy {
    pub config: ProxyConfig,
    target: TargetReference,
    baseline: Option<Baseline>,
}

impl TransformProxy {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config,
            target: TargetReference::Unresolved,
            baseline: None,
        }
    }

    pub fn target(&self) -> TargetReference {
        self.target
    }

    /// Owner/target positions captured for relative movement, if any.
    pub fn baseline(&self) -> Option<([f32; 3], [f32; 3])> {
        self.baseline.map(|b| (b.owner, b.target))
    }

    /// Compute the owner's next state from the current owner and target states.
    fn follow(&mut self, owner: SpatialState, target: SpatialState) -> SpatialState {
        let mut next = owner;
        if self.config.copy_position {
            if self.config.relative_movement {
                let base = *self.baseline.get_or_insert(Baseline {
                    target: target.position,
                    owner: owner.position,
                });
                let offset = scale(sub(target.position, base.target), self.config.relative_scale);
                next.position = add(base.owner, offset);
            } else {
                next.position = target.position;
            }
        }
        if self.config.copy_rotation {
            next.rotation = target.rotation;
        }
        next
    }
}

impl FrameWriter for TransformProxy {
    fn activate(&mut self, ctx: &mut WriterCtx<'_>) {
        self.baseline = None;
        self.target = resolve_target(&self.config.target, &*ctx.scene, ctx.diagnostics, ctx.source);
    }

    fn late_update(&mut self, ctx: &mut WriterCtx<'_>) {
        let Some(target_id) = self.target.handle() else {
            return;
        };
        // Destroyed target: keep the last written state.
        let Some(target) = ctx.scene.state(target_id) else {
            return;
        };
        let Some(owner) = ctx.scene.state(ctx.owner) else {
            return;
        };
        let next = self.follow(owner, target);
        ctx.scene.set_state(ctx.owner, next);
    }

    fn type_name(&self) -> &'static str {
        "TransformProxy"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
