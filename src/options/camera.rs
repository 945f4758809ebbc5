use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial camera pose.
pub struct CameraOptions {
    /// Eye position before any scroll step applies.
    #[schemars(title = "Position")]
    pub position: [f32; 3],
    /// Look-at target before any scroll step applies.
    #[schemars(title = "Target")]
    pub target: [f32; 3],
}

impl CameraOptions {
    /// The initial pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position.into(), self.target.into())
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [3.6, 0.8, 5.2],
            target: [0.0, 0.0, 0.0],
        }
    }
}
