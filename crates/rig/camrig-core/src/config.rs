//! Authored configuration for rig components.
//!
//! Everything here is plain serde data so a rig can be described in JSON and
//! built with [`crate::Rig::from_config`].

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticsCfg;
use crate::error::Result;
use crate::resolver::TargetSpec;
use crate::spatial::Axis;

fn default_true() -> bool {
    true
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

/// Lock flag and fixed value for one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSlot {
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub value: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisLockConfig {
    #[serde(default)]
    pub position: [AxisSlot; 3],
    #[serde(default)]
    pub rotation: [AxisSlot; 3],
    /// Overwrite the fixed position values with the owner's position on activation.
    #[serde(default = "default_true")]
    pub snapshot_position_on_activate: bool,
    #[serde(default = "default_true")]
    pub snapshot_rotation_on_activate: bool,
    /// Push edited fixed values back into the owner state on `validate`.
    #[serde(default)]
    pub sync_on_validate: bool,
}

impl Default for AxisLockConfig {
    fn default() -> Self {
        Self {
            position: [AxisSlot::default(); 3],
            rotation: [AxisSlot::default(); 3],
            snapshot_position_on_activate: true,
            snapshot_rotation_on_activate: true,
            sync_on_validate: false,
        }
    }
}

impl AxisLockConfig {
    /// Lock the given position axes to explicit values, without activation snapshots.
    pub fn fixed_position(axes: &[(Axis, f32)]) -> Self {
        let mut cfg = Self {
            snapshot_position_on_activate: false,
            snapshot_rotation_on_activate: false,
            ..Self::default()
        };
        for (axis, value) in axes {
            cfg.position[axis.index()] = AxisSlot {
                locked: true,
                value: *value,
            };
        }
        cfg
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisScaleConfig {
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

impl Default for AxisScaleConfig {
    fn default() -> Self {
        Self { scale: unit_scale() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub target: TargetSpec,
    #[serde(default = "default_true")]
    pub copy_position: bool,
    #[serde(default = "default_true")]
    pub copy_rotation: bool,
    /// Follow the target's movement since activation, scaled per axis,
    /// instead of copying its absolute position.
    #[serde(default)]
    pub relative_movement: bool,
    #[serde(default = "unit_scale")]
    pub relative_scale: [f32; 3],
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            target: TargetSpec::default(),
            copy_position: true,
            copy_rotation: true,
            relative_movement: false,
            relative_scale: unit_scale(),
        }
    }
}

/// Names of the objects a virtual camera should follow / look at. `None` (or
/// an empty name) leaves the corresponding reference alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraTargetConfig {
    #[serde(default)]
    pub follow: Option<String>,
    #[serde(default)]
    pub look_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WriterKind {
    TransformProxy(ProxyConfig),
    AxisLock(AxisLockConfig),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    pub id: String,
    /// Name of the scene object this writer drives.
    pub owner: String,
    #[serde(flatten)]
    pub kind: WriterKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtensionKind {
    AxisLock(AxisLockConfig),
    AxisScale(AxisScaleConfig),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    pub id: String,
    #[serde(flatten)]
    pub kind: ExtensionKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub id: String,
    /// Scene object carrying the virtual camera.
    pub owner: String,
    /// Object that receives the final state (the render camera), if any.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub follow_offset: [f32; 3],
    #[serde(default)]
    pub targets: CameraTargetConfig,
    #[serde(default)]
    pub extensions: Vec<ExtensionConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RigConfig {
    #[serde(default)]
    pub writers: Vec<WriterConfig>,
    #[serde(default)]
    pub cameras: Vec<CameraConfig>,
    #[serde(default)]
    pub diagnostics: DiagnosticsCfg,
}

impl RigConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
