use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::viewer::Plugin;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
/// Viewer construction, plugins and scene asset.
pub struct ViewerOptions {
    /// Id of the canvas element the viewer draws into.
    pub canvas: String,
    /// Multisample anti-aliasing.
    pub antialias: bool,
    /// RGBM-encoded HDR targets (disables tone mapping by default).
    pub use_rgbm: bool,
    /// Plugins, registered in this order.
    pub plugins: Vec<Plugin>,
    /// Scene asset (`.glb` / `.gltf`), loaded after the pipeline refresh.
    pub asset: Option<String>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        let use_rgbm = false;
        Self {
            canvas: "webgi-canvas".to_owned(),
            antialias: true,
            use_rgbm,
            plugins: vec![
                Plugin::AssetManager,
                Plugin::GBuffer,
                Plugin::Progressive { frames: 32 },
                Plugin::Tonemap { enabled: !use_rgbm },
                Plugin::Ssr,
                Plugin::Ssao,
                Plugin::Bloom,
            ],
            asset: Some("./assets/scene.glb".to_owned()),
        }
    }
}
