use std::collections::BTreeSet;
use std::time::Duration;

use crate::foundation::core::TargetId;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::clamp01;
use crate::idle::loops::IdleLoopManager;
use crate::region::scrub::Scrub;
use crate::region::state::{RegionState, Transition, Transitions, step};
use crate::responsive::classify::ClassParam;
use crate::scene::lookup::{BuildCtx, ElementLookup};
use crate::scene::state::{Baseline, SceneState};
use crate::scene::target::PropertyPatch;
use crate::timeline::track::{PhaseTable, TrackDef, ValueDef};

/// Sparse property values for every element matching `selector`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BaselineEntry {
    /// Element selector.
    pub selector: String,
    /// Values to apply.
    #[serde(flatten)]
    pub patch: PropertyPatch,
}

impl BaselineEntry {
    /// Entry for `selector` with `patch`.
    pub fn new(selector: impl Into<String>, patch: PropertyPatch) -> Self {
        Self {
            selector: selector.into(),
            patch,
        }
    }
}

/// Declared pinned region: where it starts, how much scroll it consumes, and what it
/// drives.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionDef {
    /// Selector of the element that is pinned.
    pub anchor: String,
    /// Element whose stacking order is raised while pinned and demoted after leave.
    /// Defaults to the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// Start offset as a fraction of viewport height above the anchor top.
    #[serde(default)]
    pub start_ratio: f64,
    /// Virtual scroll distance of the region.
    #[serde(default = "default_distance")]
    pub distance: ValueDef,
    /// Scrub lag in seconds; 0 follows the scroll position exactly.
    #[serde(default)]
    pub scrub_lag_secs: f64,
    /// Stacking order of the layer while pinned.
    #[serde(default = "default_pinned_z")]
    pub pinned_z_index: i32,
    /// Stacking order of the layer after leave.
    #[serde(default)]
    pub demoted_z_index: i32,
    /// Values restored before entering and after leaving back.
    #[serde(default)]
    pub rest: Vec<BaselineEntry>,
    /// Values applied on top of `rest` on enter and enter-back.
    #[serde(default)]
    pub enter: Vec<BaselineEntry>,
    /// Values locked in on leave.
    #[serde(default)]
    pub terminal: Vec<BaselineEntry>,
    /// Progress-driven phase rows, evaluated in order.
    #[serde(default)]
    pub tracks: Vec<TrackDef>,
}

fn default_distance() -> ValueDef {
    ValueDef::param(ClassParam::VirtualScrollDistance)
}

fn default_pinned_z() -> i32 {
    10
}

impl RegionDef {
    /// Validate selectors, lag and every phase row.
    pub fn validate(&self) -> SceneResult<()> {
        if self.anchor.trim().is_empty() {
            return Err(SceneError::validation("region anchor must be non-empty"));
        }
        if !self.start_ratio.is_finite() {
            return Err(SceneError::validation("region start_ratio must be finite"));
        }
        if !(self.scrub_lag_secs.is_finite() && self.scrub_lag_secs >= 0.0) {
            return Err(SceneError::validation(
                "region scrub_lag_secs must be finite and >= 0",
            ));
        }
        if let ValueDef::Const(d) = self.distance
            && !(d.is_finite() && d > 0.0)
        {
            return Err(SceneError::validation("region distance must be > 0"));
        }
        for entry in self.rest.iter().chain(&self.enter).chain(&self.terminal) {
            if entry.selector.trim().is_empty() {
                return Err(SceneError::validation("baseline selector must be non-empty"));
            }
            if entry.patch.scalars().any(|v| !v.is_finite()) {
                return Err(SceneError::validation(format!(
                    "baseline '{}' values must be finite",
                    entry.selector
                )));
            }
        }
        for track in &self.tracks {
            track.validate()?;
        }
        Ok(())
    }
}

fn resolve_baseline(entries: &[BaselineEntry], lookup: &dyn ElementLookup) -> Baseline {
    Baseline::new(
        entries
            .iter()
            .flat_map(|e| {
                lookup
                    .resolve(&e.selector)
                    .into_iter()
                    .map(|id| (id, e.patch.clone()))
            })
            .collect(),
    )
}

#[derive(Clone, Debug)]
struct Binding {
    layer: Option<TargetId>,
    start_px: f64,
    distance: f64,
    pinned_z_index: i32,
    demoted_z_index: i32,
    rest: Baseline,
    enter: Baseline,
    terminal: Baseline,
    table: PhaseTable,
    scope: BTreeSet<TargetId>,
    scrub: Scrub,
}

impl Binding {
    fn raw(&self, offset: f64) -> f64 {
        (offset - self.start_px) / self.distance
    }

    fn restore_rest(&self, scene: &mut SceneState) {
        self.rest.restore(&self.scope, scene);
    }

    fn restore_enter(&self, scene: &mut SceneState) {
        self.restore_rest(scene);
        self.enter.apply(scene);
        if let Some(layer) = self.layer {
            scene.set_z_index(layer, self.pinned_z_index);
        }
    }

    fn lock_terminal(&mut self, scene: &mut SceneState) {
        self.scrub.snap(1.0);
        self.table.evaluate(1.0, scene);
        self.terminal.apply(scene);
        if let Some(layer) = self.layer {
            scene.set_z_index(layer, self.demoted_z_index);
        }
    }
}

/// The pinned scroll region: an explicit state machine fed by raw scroll offsets.
///
/// A region whose anchor does not resolve is unbound and every operation on it is a
/// no-op.
#[derive(Clone, Debug)]
pub struct ScrollRegion {
    binding: Option<Binding>,
    state: RegionState,
}

impl Default for ScrollRegion {
    fn default() -> Self {
        Self {
            binding: None,
            state: RegionState::BeforeEnter,
        }
    }
}

impl ScrollRegion {
    /// Bind `def` for the current viewport and apply the rest baseline.
    ///
    /// Every element the region can touch is registered in `scene`.
    pub fn bind(def: &RegionDef, ctx: &BuildCtx<'_>, scene: &mut SceneState) -> Self {
        let Some(anchor) = ctx.lookup.resolve(&def.anchor).first().copied() else {
            tracing::debug!(anchor = %def.anchor, "scroll region unbound: anchor missing");
            return Self::default();
        };
        let anchor_top = ctx.lookup.offset_top(anchor).unwrap_or(0.0);
        let distance = def.distance.resolve(ctx);
        if !(distance.is_finite() && distance > 0.0) {
            tracing::debug!(distance, "scroll region unbound: non-positive distance");
            return Self::default();
        }
        let layer = match &def.layer {
            Some(sel) => ctx.lookup.resolve(sel).first().copied(),
            None => Some(anchor),
        };

        let table = PhaseTable::resolve(&def.tracks, ctx);
        let rest = resolve_baseline(&def.rest, ctx.lookup);
        let enter = resolve_baseline(&def.enter, ctx.lookup);
        let terminal = resolve_baseline(&def.terminal, ctx.lookup);

        let mut scope = table.targets();
        scope.extend(rest.targets());
        scope.extend(enter.targets());
        scope.extend(terminal.targets());
        scope.insert(anchor);
        scope.extend(layer);
        for id in &scope {
            scene.register(*id, ctx.lookup);
        }

        let binding = Binding {
            layer,
            start_px: anchor_top - ctx.viewport.height * def.start_ratio,
            distance,
            pinned_z_index: def.pinned_z_index,
            demoted_z_index: def.demoted_z_index,
            rest,
            enter,
            terminal,
            table,
            scope,
            scrub: Scrub::new(def.scrub_lag_secs),
        };
        binding.restore_rest(scene);
        tracing::debug!(
            start_px = binding.start_px,
            distance,
            rows = binding.table.rows().len(),
            "scroll region bound"
        );
        Self {
            binding: Some(binding),
            state: RegionState::BeforeEnter,
        }
    }

    /// Whether the anchor resolved.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Current directional state.
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Smoothed progress in `[0, 1]` that the phase table is evaluated at.
    pub fn progress(&self) -> f64 {
        self.binding.as_ref().map_or(0.0, |b| b.scrub.rendered())
    }

    /// Progress implied by the last scroll sample, before smoothing.
    pub fn target_progress(&self) -> f64 {
        self.binding.as_ref().map_or(0.0, |b| b.scrub.target())
    }

    /// Pixel range `[start, end]` of the region.
    pub fn range_px(&self) -> Option<(f64, f64)> {
        self.binding
            .as_ref()
            .map(|b| (b.start_px, b.start_px + b.distance))
    }

    /// Every target this region writes.
    pub fn scope(&self) -> Option<&BTreeSet<TargetId>> {
        self.binding.as_ref().map(|b| &b.scope)
    }

    /// Resolved phase table.
    pub fn table(&self) -> Option<&PhaseTable> {
        self.binding.as_ref().map(|b| &b.table)
    }

    /// Feed one scroll offset. Returns the transitions taken, in order.
    pub fn sample(
        &mut self,
        offset: f64,
        now: Duration,
        scene: &mut SceneState,
        idle: &mut IdleLoopManager,
    ) -> Transitions {
        let Some(b) = self.binding.as_mut() else {
            return Transitions::new();
        };
        let raw = b.raw(offset);
        if raw.is_nan() {
            return Transitions::new();
        }
        let (next, transitions) = step(self.state, raw);
        for t in &transitions {
            tracing::debug!(transition = ?t, raw, "scroll region transition");
            match t {
                Transition::Enter => {
                    idle.cancel_all();
                    b.restore_enter(scene);
                }
                Transition::Leave => b.lock_terminal(scene),
                Transition::EnterBack => b.restore_enter(scene),
                Transition::LeaveBack => {
                    b.restore_rest(scene);
                    b.scrub.snap(0.0);
                    idle.revive(scene, now);
                }
            }
        }
        self.state = next;
        if self.state == RegionState::Pinned {
            let p = clamp01(raw);
            if p > 0.0 {
                idle.cancel_all();
            }
            b.scrub.set_target(p, now);
            b.table.evaluate(b.scrub.rendered(), scene);
        }
        transitions
    }

    /// Advance scrub smoothing to `now` without a new scroll sample.
    pub fn advance(&mut self, now: Duration, scene: &mut SceneState) {
        if self.state != RegionState::Pinned {
            return;
        }
        if let Some(b) = self.binding.as_mut() {
            b.scrub.advance(now);
            b.table.evaluate(b.scrub.rendered(), scene);
        }
    }

    /// Snap smoothed progress onto the last sample.
    pub fn settle(&mut self, scene: &mut SceneState) {
        if self.state != RegionState::Pinned {
            return;
        }
        if let Some(b) = self.binding.as_mut() {
            b.scrub.settle();
            b.table.evaluate(b.scrub.rendered(), scene);
        }
    }

    /// Drop the binding. Scene values are left as they are.
    pub fn destroy(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/scroll_region.rs"]
mod tests;
