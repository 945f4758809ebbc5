//! The scroll engine: headless viewer, timeline, bridge and page input.

mod accessors;
mod construction;
mod input;

#[cfg(feature = "web")]
pub(crate) use construction::define_steps;
use serde::Serialize;
use web_time::Duration;

use crate::{
    animation::{ElementStyles, StepId, Targets, Timeline},
    bridge::RenderInvalidationBridge,
    camera::CameraPose,
    options::{ButtonOptions, ScrollOptions},
    scroll::{PageLayout, SmoothScroll},
    viewer::{HeadlessViewer, ViewerRuntime},
};

/// What one [`ScrollEngine::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// Viewer frame counter, starting at 1.
    pub frame: u64,
    /// Document scroll offset after this frame's smooth scroll advanced.
    pub scroll_y: f32,
    /// Whether the bridge pushed a pose into the camera this frame.
    pub camera_synced: bool,
    /// Whether the viewer rendered.
    pub rendered: bool,
    /// Whether a button-triggered smooth scroll is still running.
    pub scrolling: bool,
    /// Whether a smoothed step is still catching up with the scroll offset.
    pub catching_up: bool,
    /// Camera pose the viewer's view matrix was derived from.
    pub pose: CameraPose,
}

/// The scroll-synchronized camera sequencer.
///
/// Owns the viewer, the keyframe timeline and the render invalidation
/// bridge, and routes page events between them.
///
/// # Construction
///
/// [`ScrollEngine::new`] sets the scene up from [`Options`]: plugins,
/// pipeline refresh, asset load, timeline steps, bridge. Use
/// [`ScrollEngine::with_layout`] when the page geometry comes from a live
/// document rather than the options.
///
/// # Frame loop
///
/// Forward scroll events to [`handle_scroll`](Self::handle_scroll) and
/// button clicks to [`click`](Self::click), then call
/// [`frame`](Self::frame) once per display frame. Scroll events may arrive
/// any number of times between frames; the camera is synced at most once
/// per frame.
///
/// [`Options`]: crate::options::Options
pub struct ScrollEngine {
    viewer: HeadlessViewer,
    timeline: Timeline,
    bridge: RenderInvalidationBridge,
    layout: PageLayout,
    styles: ElementStyles,
    step_ids: Vec<StepId>,
    buttons: Vec<ButtonOptions>,
    scroll_options: ScrollOptions,
    smooth: Option<SmoothScroll>,
    asset_error: Option<String>,
}

impl ScrollEngine {
    /// Advance one display frame by `dt`.
    ///
    /// Order: the smooth scroll moves the scroll offset, smoothed steps
    /// catch up, then the viewer runs its pre-frame listeners (the bridge
    /// among them) and renders if needed.
    pub fn frame(&mut self, dt: Duration) -> FrameReport {
        if let Some(smooth) = self.smooth.as_mut() {
            let y = smooth.tick(dt);
            if smooth.is_done() {
                self.smooth = None;
                log::debug!("smooth scroll arrived at {y:.1}");
            }
            self.apply_scroll(y);
        }

        let catching_up = {
            let mut targets =
                Targets::new(self.viewer.context_mut().pose_mut(), &mut self.styles);
            self.timeline.tick(dt, &mut targets)
        };

        let stats = self.viewer.render_frame();
        FrameReport {
            frame: stats.frame,
            scroll_y: self.timeline.scroll_y(),
            camera_synced: stats.camera_synced,
            rendered: stats.rendered,
            scrolling: self.smooth.is_some(),
            catching_up,
            pose: self.viewer.context().camera().derived_pose(),
        }
    }

    /// Move the timeline to document offset `y`, clamped to the scrollable
    /// range.
    fn apply_scroll(&mut self, y: f32) {
        let clamped = self.layout.clamp_scroll(y);
        if clamped != y {
            log::warn!("scroll offset {y:.1} clamped to {clamped:.1}");
        }
        let mut targets =
            Targets::new(self.viewer.context_mut().pose_mut(), &mut self.styles);
        self.timeline.scroll(clamped, &mut targets);
    }
}

impl std::fmt::Debug for ScrollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("viewer", &self.viewer)
            .field("timeline", &self.timeline)
            .field("scroll_y", &self.timeline.scroll_y())
            .field("smooth", &self.smooth)
            .field("asset_error", &self.asset_error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        animation::StyleProperty,
        error::ScrollError,
        options::{AnimateOptions, Options, ScrubOptions, StepOptions},
        util::easing::EasingFunction,
    };

    const FRAME: Duration = Duration::from_millis(16);

    fn options() -> Options {
        let mut options = Options::default();
        options.viewer.asset = None;
        options
    }

    fn engine() -> ScrollEngine {
        ScrollEngine::new(&options()).unwrap()
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn second_section_swings_camera_round() {
        let initial = options().camera.pose();
        let mut engine = engine();
        let first = engine.frame(FRAME);
        assert!(first.camera_synced);
        assert_eq!(first.pose, initial);

        engine.handle_scroll(0.0);
        let _ = engine.frame(FRAME);
        assert_eq!(engine.pose(), initial);

        engine.handle_scroll(1000.0);
        let report = engine.frame(FRAME);
        assert!(report.camera_synced);
        assert!(approx(report.pose.position, Vec3::new(-3.83, -2.32, -5.71)));
        assert!(approx(report.pose.target, Vec3::new(-0.72, -0.32, -0.74)));
    }

    #[test]
    fn third_section_lands_on_final_pose() {
        let mut engine = engine();
        engine.handle_scroll(2000.0);
        let report = engine.frame(FRAME);
        assert!(approx(report.pose.position, Vec3::new(4.0, 2.0, 7.0)));
        assert!(approx(report.pose.target, Vec3::new(-1.0, -9.5, -0.5)));

        engine.handle_scroll(0.0);
        let back = engine.frame(FRAME);
        assert_eq!(back.pose, options().camera.pose());
    }

    #[test]
    fn many_scroll_events_sync_once_per_frame() {
        let mut engine = engine();
        let _ = engine.frame(FRAME);
        let revision = engine.viewer().context().camera().revision();

        for y in (0..=1000).step_by(10) {
            engine.handle_scroll(y as f32);
        }
        assert_eq!(
            engine.viewer().context().camera().revision(),
            revision,
            "scroll events never touch the view matrix"
        );
        let report = engine.frame(FRAME);
        assert!(report.camera_synced);
        assert!(report.rendered);

        let idle = engine.frame(FRAME);
        assert!(!idle.camera_synced);
    }

    #[test]
    fn hero_button_scrolls_to_second_section() {
        let mut engine = engine();
        let destination = engine.click(".button--hero").unwrap();
        assert_eq!(destination, 1000.0);

        let mut report = engine.frame(FRAME);
        assert!(report.scrolling);
        assert!(report.scroll_y > 0.0 && report.scroll_y < 1000.0);
        for _ in 0..100 {
            if !report.scrolling {
                break;
            }
            report = engine.frame(FRAME);
        }
        assert!(!report.scrolling);
        assert_eq!(engine.scroll_y(), 1000.0);
        assert!(approx(report.pose.position, Vec3::new(-3.83, -2.32, -5.71)));
    }

    #[test]
    fn footer_button_scrolls_back_to_top() {
        let mut engine = engine();
        engine.handle_scroll(2000.0);
        let _ = engine.frame(FRAME);
        assert_eq!(engine.click(".button--footer").unwrap(), 0.0);
        for _ in 0..100 {
            let _ = engine.frame(FRAME);
        }
        assert_eq!(engine.scroll_y(), 0.0);
        assert_eq!(engine.pose(), options().camera.pose());
    }

    #[test]
    fn user_scroll_cancels_smooth_scroll() {
        let mut engine = engine();
        let _ = engine.click(".button--hero").unwrap();
        let _ = engine.frame(FRAME);
        engine.handle_scroll(300.0);
        let report = engine.frame(FRAME);
        assert!(!report.scrolling);
        assert_eq!(report.scroll_y, 300.0);
    }

    #[test]
    fn unbound_button_is_rejected() {
        let mut engine = engine();
        assert!(matches!(
            engine.click(".nope"),
            Err(ScrollError::Configuration(_))
        ));
    }

    #[test]
    fn hero_copy_fades_out_smoothly() {
        let mut engine = engine();
        engine.handle_scroll(200.0);
        assert_eq!(engine.styles().get(".section--one--container").opacity, 1.0);
        let mut report = engine.frame(FRAME);
        assert!(report.catching_up);
        for _ in 0..200 {
            if !report.catching_up {
                break;
            }
            report = engine.frame(FRAME);
        }
        let style = engine.styles().get(".section--one--container");
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.x_percent, -150.0);
    }

    #[test]
    fn missing_trigger_aborts_setup() {
        let mut options = options();
        let orphan = StepOptions {
            trigger: ".fourth".into(),
            ..options.timeline[0].clone()
        };
        options.timeline.push(orphan);
        assert!(matches!(
            ScrollEngine::new(&options),
            Err(ScrollError::Configuration(_))
        ));
    }

    #[test]
    fn missing_asset_keeps_scroll_wiring() {
        let mut options = options();
        options.viewer.asset = Some("/definitely/not/here.glb".into());
        let mut engine = ScrollEngine::new(&options).unwrap();
        assert!(engine.asset_error().is_some());
        engine.handle_scroll(1000.0);
        let report = engine.frame(FRAME);
        assert!(report.camera_synced);
        assert!(approx(report.pose.position, Vec3::new(-3.83, -2.32, -5.71)));
    }

    #[test]
    fn quiet_steps_do_not_sync_camera() {
        let mut options = options();
        options.timeline = vec![StepOptions {
            trigger: ".second".into(),
            start: "top bottom".into(),
            end: "top top".into(),
            animate: AnimateOptions::Style {
                selector: ".first".into(),
                property: StyleProperty::Opacity,
                to: 0.0,
            },
            scrub: ScrubOptions::Continuous,
            immediate_render: false,
            ease: EasingFunction::Linear,
            notify: false,
        }];
        let mut engine = ScrollEngine::new(&options).unwrap();
        let _ = engine.frame(FRAME);
        engine.handle_scroll(500.0);
        let report = engine.frame(FRAME);
        assert!(!report.camera_synced);
        assert_eq!(engine.styles().get(".first").opacity, 0.5);
    }

    #[test]
    fn resize_moves_windows() {
        let mut engine = engine();
        engine.handle_scroll(500.0);
        let _ = engine.frame(FRAME);
        engine.resize(500.0).unwrap();
        // .second now enters at 500 and is pinned at 1000
        assert_eq!(engine.timeline().progress(engine.step_ids()[0]), Some(0.0));
        engine.handle_scroll(1000.0);
        let report = engine.frame(FRAME);
        assert!(approx(report.pose.position, Vec3::new(-3.83, -2.32, -5.71)));
    }
}
