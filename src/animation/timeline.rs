//! Scroll-driven keyframe timeline.
//!
//! The timeline owns every registered step and, on each scroll event or
//! frame tick, folds them into the animated channels:
//!
//! - every channel starts from the value it had when its first step was
//!   registered;
//! - steps are visited in registration order; a step that has never been
//!   entered passes the channel through untouched, an entered step captures
//!   the incoming value as its baseline once and writes
//!   `baseline.lerp(end, ease(progress))`;
//! - later steps therefore win wherever windows on the same channel overlap,
//!   while steps on different channels are independent.
//!
//! A step's `on_applied` observer runs, after all writes of the pass, when
//! its output differs from the previous pass.

use rustc_hash::FxHashMap;
use web_time::Duration;

use super::interpolation::{Channel, StepValue, Targets};
use super::step::{
    KeyframeStep, OnApplied, ScrubConfig, ScrubMode, StepId, StepTarget,
    StepUpdate,
};
use crate::{
    error::ScrollError,
    scroll::{PageLayout, ScrollWindow, Section, SmoothScroll},
    util::easing::EasingFunction,
};

/// Easing of the smoothed-scrub catch-up.
const CATCH_UP_EASE: EasingFunction = EasingFunction::DEFAULT;

/// Playhead of one step: raw scroll progress, or a lagging chase of it.
#[derive(Debug, Clone)]
struct Playhead {
    value: f32,
    catch_up: Option<SmoothScroll>,
}

impl Playhead {
    fn at(value: f32) -> Self {
        Self {
            value,
            catch_up: None,
        }
    }

    /// Track `raw`, directly when `lag` is zero.
    fn follow(&mut self, raw: f32, lag: Duration) {
        if lag.is_zero() {
            self.value = raw;
            self.catch_up = None;
            return;
        }
        let dest = self
            .catch_up
            .as_ref()
            .map_or(self.value, SmoothScroll::destination);
        if dest != raw {
            self.catch_up = Some(SmoothScroll::new(self.value, raw, lag, CATCH_UP_EASE));
        }
    }

    /// Returns whether the playhead moved.
    fn advance(&mut self, dt: Duration) -> bool {
        let Some(catch_up) = self.catch_up.as_mut() else {
            return false;
        };
        let before = self.value;
        self.value = catch_up.tick(dt);
        if catch_up.is_done() {
            self.catch_up = None;
        }
        self.value != before
    }
}

/// Registered step plus its runtime state.
struct StepState {
    target: StepTarget,
    section: Section,
    scrub: ScrubConfig,
    /// Catch-up time of a smoothed step, zero for continuous scrub.
    lag: Duration,
    ease: EasingFunction,
    on_applied: Option<OnApplied>,
    channel: usize,
    window: ScrollWindow,
    playhead: Playhead,
    baseline: Option<StepValue>,
    output: Option<StepValue>,
}

impl StepState {
    fn is_active(&self) -> bool {
        self.scrub.immediate_render || self.playhead.value > 0.0
    }
}

/// Ordered set of scroll-driven keyframe steps.
///
/// Built once at startup and kept for the page's lifetime. The timeline
/// never owns the pose it animates: every call that writes borrows the
/// targets through [`Targets`].
#[derive(Default)]
pub struct Timeline {
    steps: Vec<StepState>,
    /// Channels in first-registration order with their initial values.
    channels: Vec<(Channel, StepValue)>,
    channel_index: FxHashMap<Channel, usize>,
    scroll_y: f32,
}

impl Timeline {
    /// Empty timeline at scroll offset 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one interpolation.
    ///
    /// The step's window is resolved against `layout` immediately; a
    /// trigger selector that matches nothing is a fatal configuration
    /// error. The timeline is re-applied at the current scroll offset, so a
    /// step registered on an already scrolled page (or with
    /// `immediate_render`) writes straight away.
    pub fn define_step(
        &mut self,
        step: KeyframeStep,
        layout: &PageLayout,
        targets: &mut Targets<'_>,
    ) -> Result<StepId, ScrollError> {
        let lag = match step.scrub.mode {
            ScrubMode::Continuous => Duration::ZERO,
            ScrubMode::Smoothed(secs) => Duration::try_from_secs_f32(secs).map_err(|_| {
                ScrollError::config(format!(
                    "smoothing factor must be a non-negative number of seconds, got {secs}"
                ))
            })?,
        };
        let window = step.section.resolve(layout)?;
        let channel = step.target.channel();
        let channel = match self.channel_index.get(&channel) {
            Some(&idx) => idx,
            None => {
                let idx = self.channels.len();
                let initial = targets.read(&channel);
                self.channels.push((channel.clone(), initial));
                let _ = self.channel_index.insert(channel, idx);
                idx
            }
        };

        let id = StepId(self.steps.len());
        log::debug!(
            "{id}: {:?} on {} window {:.1}..{:.1} scrub {:?}",
            step.target,
            step.section.trigger,
            window.start,
            window.end,
            step.scrub
        );
        self.steps.push(StepState {
            target: step.target,
            section: step.section,
            scrub: step.scrub,
            lag,
            ease: step.ease,
            on_applied: step.on_applied,
            channel,
            window,
            playhead: Playhead::at(window.progress(self.scroll_y)),
            baseline: None,
            output: None,
        });
        self.apply(targets);
        Ok(id)
    }

    /// Handle a scroll event at document offset `y`.
    ///
    /// Continuous steps jump to the new progress; smoothed steps start
    /// catching up and move on subsequent [`tick`](Self::tick)s.
    pub fn scroll(&mut self, y: f32, targets: &mut Targets<'_>) {
        self.scroll_y = y;
        for step in &mut self.steps {
            let raw = step.window.progress(y);
            step.playhead.follow(raw, step.lag);
        }
        self.apply(targets);
    }

    /// Advance smoothed steps by `dt`. Returns whether any step is still
    /// catching up.
    pub fn tick(&mut self, dt: Duration, targets: &mut Targets<'_>) -> bool {
        let mut moved = false;
        for step in &mut self.steps {
            moved |= step.playhead.advance(dt);
        }
        if moved {
            self.apply(targets);
        }
        self.is_catching_up()
    }

    /// Re-resolve every window against a new layout (e.g. after a resize)
    /// and re-apply at the current scroll offset. Leaves the timeline
    /// untouched if any trigger no longer resolves.
    pub fn refresh(
        &mut self,
        layout: &PageLayout,
        targets: &mut Targets<'_>,
    ) -> Result<(), ScrollError> {
        let windows = self
            .steps
            .iter()
            .map(|s| s.section.resolve(layout))
            .collect::<Result<Vec<_>, _>>()?;
        for (step, window) in self.steps.iter_mut().zip(windows) {
            step.window = window;
        }
        let y = self.scroll_y;
        self.scroll(y, targets);
        Ok(())
    }

    /// Whether any smoothed step is still chasing the scroll position.
    #[must_use]
    pub fn is_catching_up(&self) -> bool {
        self.steps.iter().any(|s| s.playhead.catch_up.is_some())
    }

    /// Scroll offset of the last scroll event.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Current (possibly lagging) progress of a step.
    #[must_use]
    pub fn progress(&self, id: StepId) -> Option<f32> {
        self.steps.get(id.0).map(|s| s.playhead.value)
    }

    /// Current output of a step, `None` while it passes its channel through.
    #[must_use]
    pub fn output(&self, id: StepId) -> Option<StepValue> {
        self.steps.get(id.0).and_then(|s| s.output)
    }

    /// Resolved scroll window of a step.
    #[must_use]
    pub fn window(&self, id: StepId) -> Option<ScrollWindow> {
        self.steps.get(id.0).map(|s| s.window)
    }

    /// Target of a step.
    #[must_use]
    pub fn target(&self, id: StepId) -> Option<&StepTarget> {
        self.steps.get(id.0).map(|s| &s.target)
    }

    /// Number of registered steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn apply(&mut self, targets: &mut Targets<'_>) {
        let mut values: Vec<StepValue> =
            self.channels.iter().map(|(_, initial)| *initial).collect();
        let mut touched = vec![false; self.channels.len()];
        let mut changed = Vec::new();

        for (idx, step) in self.steps.iter_mut().enumerate() {
            let output = if step.is_active() {
                let baseline = *step.baseline.get_or_insert(values[step.channel]);
                let t = step.ease.evaluate(step.playhead.value);
                let value = baseline.lerp(step.target.end_value(), t);
                values[step.channel] = value;
                Some(value)
            } else {
                None
            };
            if output != step.output {
                step.output = output;
                touched[step.channel] = true;
                changed.push(idx);
            }
        }

        for (idx, (channel, _)) in self.channels.iter().enumerate() {
            if touched[idx] {
                targets.write(channel, values[idx]);
            }
        }

        for idx in changed {
            let step = &mut self.steps[idx];
            if let Some(observer) = step.on_applied.as_mut() {
                observer(&StepUpdate {
                    step: StepId(idx),
                    channel: &self.channels[step.channel].0,
                    progress: step.playhead.value,
                    value: step.output,
                });
            }
        }
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("steps", &self.steps.len())
            .field("channels", &self.channels.len())
            .field("scroll_y", &self.scroll_y)
            .finish()
    }
}
