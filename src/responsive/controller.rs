use std::time::Duration;

use crate::foundation::core::Viewport;
use crate::foundation::error::SceneResult;
use crate::idle::loops::IdleLoopManager;
use crate::region::scroll_region::ScrollRegion;
use crate::region::state::Transitions;
use crate::responsive::classify::{
    BreakpointClassifier, ViewportClass, crossed_min_height, needs_rebuild,
};
use crate::scene::lookup::{BuildCtx, ElementLookup};
use crate::scene::model::SceneConfig;
use crate::scene::state::{SceneSnapshot, SceneState};
use crate::stack::timeline::StackedRevealTimeline;

/// Result of a [`ResponsiveRebuildController::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RebuildOutcome {
    /// No resize is pending.
    Idle,
    /// A resize is pending but the debounce window has not elapsed.
    Pending,
    /// The first settled size mounted the scene.
    Mounted,
    /// The settled size did not warrant a rebuild.
    Skipped,
    /// Everything was torn down and rebuilt.
    Rebuilt,
}

#[derive(Clone, Copy, Debug)]
struct PendingResize {
    viewport: Viewport,
    at: Duration,
}

/// Root of the engine: owns the scene and every component bound to it, and rebuilds them
/// all when the viewport settles on a size that needs it.
///
/// Time is injected as a [`Duration`] since an arbitrary origin, so a recorded sequence
/// of calls always replays to the same snapshots.
pub struct ResponsiveRebuildController {
    config: SceneConfig,
    lookup: Box<dyn ElementLookup>,
    classifier: Box<dyn BreakpointClassifier>,
    scene: SceneState,
    region: ScrollRegion,
    stack: Option<StackedRevealTimeline>,
    idle: IdleLoopManager,
    viewport: Option<Viewport>,
    class: Option<ViewportClass>,
    pending: Option<PendingResize>,
    offset: Option<f64>,
    rebuilds: u64,
}

impl ResponsiveRebuildController {
    /// Validate `config` and create an unmounted controller.
    ///
    /// The classifier defaults to the width bounds declared in `config`.
    pub fn new(config: SceneConfig, lookup: impl ElementLookup + 'static) -> SceneResult<Self> {
        config.validate()?;
        let classifier = Box::new(config.classifier);
        Ok(Self {
            config,
            lookup: Box::new(lookup),
            classifier,
            scene: SceneState::new(),
            region: ScrollRegion::default(),
            stack: None,
            idle: IdleLoopManager::default(),
            viewport: None,
            class: None,
            pending: None,
            offset: None,
            rebuilds: 0,
        })
    }

    /// Replace the breakpoint classifier. Takes effect on the next build.
    pub fn with_classifier(mut self, classifier: impl BreakpointClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Build everything for `viewport`. Mounting an already mounted controller rebuilds it.
    pub fn mount(&mut self, viewport: Viewport, now: Duration) {
        if self.viewport.is_some() {
            self.rebuild(viewport, now);
            return;
        }
        self.pending = None;
        self.build(viewport, now);
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            class = ?self.class,
            "scene mounted"
        );
    }

    /// Record a viewport size. Nothing is rebuilt until the size has been quiet for the
    /// debounce window; see [`Self::poll`].
    pub fn on_resize(&mut self, viewport: Viewport, now: Duration) {
        self.pending = Some(PendingResize { viewport, at: now });
    }

    /// Settle a pending resize once the debounce window has elapsed.
    pub fn poll(&mut self, now: Duration) -> RebuildOutcome {
        let Some(pending) = self.pending else {
            return RebuildOutcome::Idle;
        };
        if now.saturating_sub(pending.at) < self.debounce() {
            return RebuildOutcome::Pending;
        }
        self.pending = None;
        let Some(committed) = self.viewport else {
            self.mount(pending.viewport, now);
            return RebuildOutcome::Mounted;
        };
        if needs_rebuild(
            committed,
            pending.viewport,
            &self.config.breakpoints,
            self.config.size_threshold_px,
        ) || self.stack_height_flipped(committed, pending.viewport)
        {
            self.rebuild(pending.viewport, now);
            RebuildOutcome::Rebuilt
        } else {
            tracing::debug!(
                width = pending.viewport.width,
                height = pending.viewport.height,
                "resize settled without rebuild"
            );
            RebuildOutcome::Skipped
        }
    }

    /// Feed a scroll offset. Before mounting, the offset is only remembered.
    pub fn on_scroll(&mut self, offset: f64, now: Duration) -> Transitions {
        self.offset = Some(offset);
        if self.viewport.is_none() {
            return Transitions::new();
        }
        let transitions = self
            .region
            .sample(offset, now, &mut self.scene, &mut self.idle);
        if let Some(stack) = &mut self.stack {
            stack.sample(offset, now, &mut self.scene);
        }
        transitions
    }

    /// Frame tick: settle any due resize, run idle loops and advance scrub smoothing.
    pub fn tick(&mut self, now: Duration) -> RebuildOutcome {
        let outcome = self.poll(now);
        self.idle.tick(now, &mut self.scene);
        self.region.advance(now, &mut self.scene);
        if let Some(stack) = &mut self.stack {
            stack.advance(now, &mut self.scene);
        }
        outcome
    }

    /// Snap every scrubbed value onto the last scroll sample.
    pub fn settle(&mut self) {
        self.region.settle(&mut self.scene);
        if let Some(stack) = &mut self.stack {
            stack.settle(&mut self.scene);
        }
    }

    /// Current scene values.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.scene.snapshot()
    }

    /// Live scene state.
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Number of rebuilds since mount.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Committed viewport, once mounted.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Class of the committed viewport.
    pub fn class(&self) -> Option<ViewportClass> {
        self.class
    }

    /// The pinned region.
    pub fn region(&self) -> &ScrollRegion {
        &self.region
    }

    /// The card stack, if built for the current viewport.
    pub fn stack(&self) -> Option<&StackedRevealTimeline> {
        self.stack.as_ref()
    }

    /// The idle loop registry.
    pub fn idle(&self) -> &IdleLoopManager {
        &self.idle
    }

    /// Scene definition.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    fn stack_height_flipped(&self, old: Viewport, new: Viewport) -> bool {
        let Some(class) = self.class.filter(|_| self.config.stack.is_some()) else {
            return false;
        };
        let params = self.config.classes.get(class);
        params.stacked_reveal
            && crossed_min_height(old.height, new.height, params.min_height_for_stacked_reveal)
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.debounce_ms)
    }

    #[tracing::instrument(skip_all, fields(width = viewport.width, height = viewport.height))]
    fn rebuild(&mut self, viewport: Viewport, now: Duration) {
        let from = self.viewport;
        self.build(viewport, now);
        self.rebuilds += 1;
        tracing::info!(
            from_width = ?from.map(|v| v.width),
            class = ?self.class,
            rebuilds = self.rebuilds,
            "scene rebuilt"
        );
    }

    fn build(&mut self, viewport: Viewport, now: Duration) {
        self.idle.cancel_all();
        self.region.destroy();
        self.stack = None;
        self.scene.reset_all();

        let class = self.classifier.classify(viewport.width);
        let ctx = BuildCtx {
            lookup: self.lookup.as_ref(),
            viewport,
            class,
            params: self.config.classes.get(class),
        };
        self.region = ScrollRegion::bind(&self.config.region, &ctx, &mut self.scene);
        self.stack = self
            .config
            .stack
            .as_ref()
            .and_then(|def| StackedRevealTimeline::build(def, &ctx, &mut self.scene));
        self.idle = IdleLoopManager::bind(self.config.idle.as_ref(), &ctx);
        for id in self.idle.targets() {
            self.scene.register(*id, ctx.lookup);
        }
        self.idle.create(&self.scene, now);

        self.viewport = Some(viewport);
        self.class = Some(class);

        if let Some(offset) = self.offset {
            self.on_scroll(offset, now);
            self.settle();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/responsive/controller.rs"]
mod tests;
