//! Constrained writers driven by the rig's late-update stage.

pub mod lock;
pub mod proxy;
pub mod scale;

use std::any::Any;
use std::fmt;

use crate::diagnostics::Diagnostics;
use crate::ids::ObjectId;
use crate::scene::SceneHost;

pub use lock::AxisLocker;
pub use proxy::TransformProxy;
pub use scale::AxisScaler;

/// Everything a writer sees during one callback.
pub struct WriterCtx<'a> {
    pub scene: &'a mut dyn SceneHost,
    pub diagnostics: &'a mut Diagnostics,
    /// The object this writer is attached to ("self").
    pub owner: ObjectId,
    /// Label used when reporting diagnostics.
    pub source: &'a str,
    pub dt: f32,
}

/// A component that writes spatial state after primary simulation.
pub trait FrameWriter: fmt::Debug + Send + Sync {
    /// Runs once per activation, before the first `late_update` that follows it.
    fn activate(&mut self, ctx: &mut WriterCtx<'_>);

    /// Runs every frame while active.
    fn late_update(&mut self, ctx: &mut WriterCtx<'_>);

    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
