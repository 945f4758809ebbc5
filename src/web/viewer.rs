//! Bindings to a JavaScript render-on-demand viewer.
//!
//! Only the surface the bridge needs is bound: the active camera's position
//! and target vectors, the "externally mutated" notifications, shadow reset
//! and the dirty flag, plus the `preFrame` event.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::{camera::CameraPose, viewer::ViewerRuntime};

#[wasm_bindgen]
extern "C" {
    /// A viewer application object (`ViewerApp`-shaped).
    pub type JsViewer;

    #[wasm_bindgen(method, getter)]
    fn scene(this: &JsViewer) -> JsScene;

    #[wasm_bindgen(method, getter)]
    fn renderer(this: &JsViewer) -> JsRenderer;

    #[wasm_bindgen(method, js_name = setDirty)]
    fn set_dirty(this: &JsViewer);

    #[wasm_bindgen(method, js_name = addEventListener)]
    fn add_event_listener(this: &JsViewer, kind: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = removeEventListener)]
    fn remove_event_listener(this: &JsViewer, kind: &str, listener: &js_sys::Function);

    type JsScene;

    #[wasm_bindgen(method, getter, js_name = activeCamera)]
    fn active_camera(this: &JsScene) -> JsCamera;

    type JsCamera;

    #[wasm_bindgen(method, getter)]
    fn position(this: &JsCamera) -> JsVector3;

    #[wasm_bindgen(method, getter)]
    fn target(this: &JsCamera) -> JsVector3;

    #[wasm_bindgen(method, js_name = positionUpdated)]
    fn position_updated(this: &JsCamera, force: bool);

    #[wasm_bindgen(method, js_name = targetUpdated)]
    fn target_updated(this: &JsCamera, force: bool);

    type JsVector3;

    #[wasm_bindgen(method, getter)]
    fn x(this: &JsVector3) -> f32;

    #[wasm_bindgen(method, getter)]
    fn y(this: &JsVector3) -> f32;

    #[wasm_bindgen(method, getter)]
    fn z(this: &JsVector3) -> f32;

    #[wasm_bindgen(method)]
    fn set(this: &JsVector3, x: f32, y: f32, z: f32);

    type JsRenderer;

    #[wasm_bindgen(method, js_name = resetShadows)]
    fn reset_shadows(this: &JsRenderer);
}

impl JsVector3 {
    fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    fn assign(&self, v: Vec3) {
        self.set(v.x, v.y, v.z);
    }
}

/// [`ViewerRuntime`] over a JS viewer.
///
/// The timeline writes a Rust-side copy of the pose; the copy is pushed into
/// the JS camera's vectors when the bridge announces the update.
pub(super) struct JsRuntime {
    viewer: JsViewer,
    camera: JsCamera,
    pose: CameraPose,
}

impl JsRuntime {
    pub(super) fn new(viewer: JsViewer) -> Self {
        let camera = viewer.scene().active_camera();
        let pose = CameraPose::new(camera.position().to_vec3(), camera.target().to_vec3());
        Self {
            viewer,
            camera,
            pose,
        }
    }

    pub(super) fn viewer(&self) -> &JsViewer {
        &self.viewer
    }
}

impl ViewerRuntime for JsRuntime {
    fn pose(&self) -> &CameraPose {
        &self.pose
    }

    fn pose_mut(&mut self) -> &mut CameraPose {
        &mut self.pose
    }

    fn position_updated(&mut self, force: bool) {
        self.camera.position().assign(self.pose.position);
        self.camera.position_updated(force);
    }

    fn target_updated(&mut self, force: bool) {
        self.camera.target().assign(self.pose.target);
        self.camera.target_updated(force);
    }

    fn reset_shadows(&mut self) {
        self.viewer.renderer().reset_shadows();
    }

    fn set_dirty(&mut self) {
        self.viewer.set_dirty();
    }
}

impl JsViewer {
    pub(super) fn on_pre_frame(&self, listener: &js_sys::Function) {
        self.add_event_listener("preFrame", listener);
    }

    pub(super) fn off_pre_frame(&self, listener: &js_sys::Function) {
        self.remove_event_listener("preFrame", listener);
    }
}
