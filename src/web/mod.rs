//! Browser binding (feature `web`).
//!
//! Drives a JavaScript viewer from the live page: the timeline follows
//! `window` scroll events, smoothed steps and element styles advance on
//! `requestAnimationFrame`, the bridge runs in the viewer's `preFrame`
//! event, and configured buttons start native smooth scrolls.
//!
//! ```js
//! const page = startScrollCamera(viewer);
//! // ...
//! page.free(); // detaches every listener
//! ```

mod dom;
mod viewer;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, Element, Event, Window};
use web_time::Duration;

use self::viewer::JsRuntime;
pub use self::viewer::JsViewer;
use crate::{
    animation::{ElementStyles, Targets, Timeline},
    bridge::RenderInvalidationBridge,
    engine::define_steps,
    error::ScrollError,
    options::Options,
    scroll::{PageLayout, ScrollAction},
    viewer::ViewerRuntime,
};

type EventListener = Closure<dyn FnMut(Event)>;

/// Everything the page's event handlers share.
struct PageState {
    runtime: JsRuntime,
    timeline: Timeline,
    styles: ElementStyles,
    layout: PageLayout,
    document: Document,
    styles_dirty: bool,
    last_frame_ms: Option<f64>,
}

impl PageState {
    fn scroll(&mut self, y: f32) {
        let mut targets = Targets::new(self.runtime.pose_mut(), &mut self.styles);
        self.timeline.scroll(y, &mut targets);
        self.styles_dirty = true;
    }

    fn frame(&mut self, now_ms: f64) {
        let dt = self.last_frame_ms.map_or(Duration::ZERO, |last| {
            Duration::from_secs_f64(((now_ms - last) / 1000.0).max(0.0))
        });
        self.last_frame_ms = Some(now_ms);

        if self.timeline.is_catching_up() {
            let mut targets = Targets::new(self.runtime.pose_mut(), &mut self.styles);
            let _ = self.timeline.tick(dt, &mut targets);
            self.styles_dirty = true;
        }
        if std::mem::take(&mut self.styles_dirty) {
            dom::apply_styles(&self.document, &self.styles);
        }
    }

    fn relayout(&mut self, layout: PageLayout) -> Result<(), ScrollError> {
        let mut targets = Targets::new(self.runtime.pose_mut(), &mut self.styles);
        self.timeline.refresh(&layout, &mut targets)?;
        self.layout = layout;
        self.styles_dirty = true;
        Ok(())
    }
}

/// A running scroll-synchronized page. Dropping it (`free()` from JS)
/// detaches every listener.
#[wasm_bindgen]
pub struct ScrollPage {
    state: Rc<RefCell<PageState>>,
    bridge: RenderInvalidationBridge,
    running: Rc<Cell<bool>>,
    window: Window,
    selectors: Rc<Vec<String>>,
    on_scroll: EventListener,
    on_resize: EventListener,
    on_pre_frame: Closure<dyn FnMut()>,
    on_click: Vec<(Vec<Element>, EventListener)>,
}

#[wasm_bindgen]
impl ScrollPage {
    /// Current document scroll offset as seen by the timeline.
    #[wasm_bindgen(getter, js_name = scrollY)]
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.state.try_borrow().map_or(0.0, |s| s.timeline.scroll_y())
    }

    /// Whether a camera sync is pending for the next frame.
    #[wasm_bindgen(getter, js_name = needsUpdate)]
    #[must_use]
    pub fn needs_update(&self) -> bool {
        self.bridge.is_dirty()
    }

    /// Re-measure the page and re-resolve every scroll window.
    ///
    /// # Errors
    ///
    /// Rejects if a trigger element disappeared from the page.
    pub fn refresh(&self) -> Result<(), JsValue> {
        let layout = dom::measure(&self.window, self.selectors.iter().map(String::as_str))
            .map_err(|e| to_js(&e))?;
        let mut state = self
            .state
            .try_borrow_mut()
            .map_err(|_| to_js(&ScrollError::Web("page state is busy".to_owned())))?;
        state.relayout(layout).map_err(|e| to_js(&e))
    }
}

impl ScrollPage {
    fn attach(viewer: JsViewer, options: &Options) -> Result<Self, ScrollError> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let selectors = Rc::new(measured_selectors(options));
        let layout = dom::measure(&window, selectors.iter().map(String::as_str))?;

        let bridge = RenderInvalidationBridge::new();
        let mut runtime = JsRuntime::new(viewer);
        let mut styles = ElementStyles::default();
        let mut timeline = Timeline::new();
        let _ = define_steps(
            &mut timeline,
            &options.timeline,
            &layout,
            &bridge,
            &mut Targets::new(runtime.pose_mut(), &mut styles),
        )?;

        let state = Rc::new(RefCell::new(PageState {
            runtime,
            timeline,
            styles,
            layout,
            document: document.clone(),
            styles_dirty: true,
            last_frame_ms: None,
        }));
        state.borrow_mut().scroll(dom::scroll_y(&window));

        let on_pre_frame = {
            let state = Rc::clone(&state);
            let bridge = bridge.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Ok(mut state) = state.try_borrow_mut() {
                    let _ = bridge.on_pre_frame(&mut state.runtime);
                }
            })
        };
        state
            .borrow()
            .runtime
            .viewer()
            .on_pre_frame(on_pre_frame.as_ref().unchecked_ref());

        let on_scroll = {
            let state = Rc::clone(&state);
            let window = window.clone();
            EventListener::new(move |_: Event| {
                let y = dom::scroll_y(&window);
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.scroll(y);
                }
            })
        };
        window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
            .map_err(|e| dom::js_error("scroll listener", &e))?;

        let on_resize = {
            let state = Rc::clone(&state);
            let window = window.clone();
            let selectors = Rc::clone(&selectors);
            EventListener::new(move |_: Event| {
                let layout = match dom::measure(&window, selectors.iter().map(String::as_str)) {
                    Ok(layout) => layout,
                    Err(e) => {
                        log::warn!("resize ignored: {e}");
                        return;
                    }
                };
                if let Ok(mut state) = state.try_borrow_mut() {
                    if let Err(e) = state.relayout(layout) {
                        log::warn!("resize ignored: {e}");
                    }
                }
            })
        };
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|e| dom::js_error("resize listener", &e))?;

        let mut on_click = Vec::with_capacity(options.buttons.len());
        for button in &options.buttons {
            let listener = click_listener(&state, &window, button.action.clone());
            let nodes = document
                .query_selector_all(&button.selector)
                .map_err(|e| dom::js_error(&button.selector, &e))?;
            let mut elements = Vec::new();
            for idx in 0..nodes.length() {
                let Some(element) = nodes.get(idx).and_then(|n| n.dyn_into::<Element>().ok())
                else {
                    continue;
                };
                element
                    .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
                    .map_err(|e| dom::js_error("click listener", &e))?;
                elements.push(element);
            }
            if elements.is_empty() {
                log::warn!("button '{}' matches no element", button.selector);
            }
            on_click.push((elements, listener));
        }

        let running = Rc::new(Cell::new(true));
        start_frame_loop(&window, &state, &running)?;

        log::info!(
            "scroll camera attached: {} steps, {} buttons",
            state.borrow().timeline.len(),
            on_click.len()
        );
        Ok(Self {
            state,
            bridge,
            running,
            window,
            selectors,
            on_scroll,
            on_resize,
            on_pre_frame,
            on_click,
        })
    }
}

impl Drop for ScrollPage {
    fn drop(&mut self) {
        self.running.set(false);
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        for (elements, listener) in &self.on_click {
            for element in elements {
                let _ = element
                    .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
            }
        }
        if let Ok(state) = self.state.try_borrow() {
            state
                .runtime
                .viewer()
                .off_pre_frame(self.on_pre_frame.as_ref().unchecked_ref());
        }
    }
}

/// Every selector the page layout must know: step triggers and scroll-to
/// targets.
fn measured_selectors(options: &Options) -> Vec<String> {
    let mut selectors: Vec<String> = options.timeline.iter().map(|s| s.trigger.clone()).collect();
    for button in &options.buttons {
        if let ScrollAction::ToSection(target) = &button.action {
            selectors.push(target.clone());
        }
    }
    selectors.sort();
    selectors.dedup();
    selectors
}

fn click_listener(
    state: &Rc<RefCell<PageState>>,
    window: &Window,
    action: ScrollAction,
) -> EventListener {
    let state = Rc::clone(state);
    let window = window.clone();
    EventListener::new(move |_: Event| {
        let Ok(state) = state.try_borrow() else {
            return;
        };
        match action.destination(&state.layout) {
            Ok(top) => dom::smooth_scroll_to(&window, top),
            Err(e) => log::warn!("{e}"),
        }
    })
}

/// Self-rescheduling `requestAnimationFrame` loop; stops once `running` is
/// cleared.
fn start_frame_loop(
    window: &Window,
    state: &Rc<RefCell<PageState>>,
    running: &Rc<Cell<bool>>,
) -> Result<(), ScrollError> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    let state = Rc::clone(state);
    let running = Rc::clone(running);
    let win = window.clone();
    *slot.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
        if !running.get() {
            // Release the self-reference; freed once this call returns
            drop(next.borrow_mut().take());
            return;
        }
        if let Ok(mut state) = state.try_borrow_mut() {
            state.frame(now_ms);
        }
        if let Some(callback) = next.borrow().as_ref() {
            let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));
    let first = slot.borrow();
    if let Some(callback) = first.as_ref() {
        let _ = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| dom::js_error("requestAnimationFrame", &e))?;
    }
    Ok(())
}

fn to_js(err: &ScrollError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn init_logging_once() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Attach the scroll camera to `viewer`, configured by `options_toml` (the
/// landing-page defaults when absent).
///
/// # Errors
///
/// Rejects on malformed options, a step trigger missing from the page, or
/// an unavailable DOM.
#[wasm_bindgen(js_name = startScrollCamera)]
pub fn start_scroll_camera(
    viewer: JsViewer,
    options_toml: Option<String>,
) -> Result<ScrollPage, JsValue> {
    init_logging_once();
    let options = match options_toml.as_deref() {
        Some(toml) => Options::from_toml(toml).map_err(|e| to_js(&e))?,
        None => Options::default(),
    };
    ScrollPage::attach(viewer, &options).map_err(|e| to_js(&e))
}
