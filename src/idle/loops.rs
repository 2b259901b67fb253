use std::collections::BTreeMap;
use std::time::Duration;

use crate::animation::ease::Ease;
use crate::foundation::core::TargetId;
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::lookup::BuildCtx;
use crate::scene::state::SceneState;
use crate::scene::target::Property;

/// Declared ambient drift for decorative elements.
///
/// Element `i` swings over `base_period_secs + i * period_step_secs` per half-cycle and
/// starts `i * delay_step_secs` late, so neighbours drift out of sync.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdleLoopSpec {
    /// Decorative element selector.
    pub selector: String,
    /// Peak vertical offset in pixels.
    pub amplitude_y: f64,
    /// Peak rotation in degrees.
    pub amplitude_rotation_deg: f64,
    /// Half-cycle duration of element 0.
    pub base_period_secs: f64,
    /// Added half-cycle duration per index.
    pub period_step_secs: f64,
    /// Start delay per index.
    pub delay_step_secs: f64,
    /// Easing of each half-cycle.
    #[serde(default = "default_idle_ease")]
    pub ease: Ease,
}

fn default_idle_ease() -> Ease {
    Ease::InOutSine
}

impl IdleLoopSpec {
    /// Periods must be positive and every number finite.
    pub fn validate(&self) -> SceneResult<()> {
        let finite = [
            self.amplitude_y,
            self.amplitude_rotation_deg,
            self.base_period_secs,
            self.period_step_secs,
            self.delay_step_secs,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite || self.base_period_secs <= 0.0 || self.period_step_secs < 0.0 {
            return Err(SceneError::validation(
                "idle loop periods must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Peak displacement of one idle loop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IdleAmplitude {
    /// Vertical offset in pixels.
    pub y: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

/// One live yoyo loop.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IdleLoopHandle {
    /// Driven element.
    pub target: TargetId,
    /// Peak displacement.
    pub amplitude: IdleAmplitude,
    /// Half-cycle duration in seconds.
    pub period: f64,
    /// Start delay in seconds.
    pub phase_offset: f64,
    /// Set once the loop has been killed; a cancelled handle never writes again.
    pub cancelled: bool,
    ease: Ease,
    rest_y: f64,
    rest_rotation_deg: f64,
}

impl IdleLoopHandle {
    /// Normalized swing in `[0, 1]` at `elapsed` seconds since the loop was created.
    pub fn swing(&self, elapsed: f64) -> f64 {
        let local = elapsed - self.phase_offset;
        if local <= 0.0 {
            return 0.0;
        }
        let cycles = local / self.period;
        let n = cycles.floor();
        let frac = cycles - n;
        let t = if (n as u64) % 2 == 0 { frac } else { 1.0 - frac };
        self.ease.apply(t)
    }

    fn write(&self, elapsed: f64, scene: &mut SceneState) {
        if self.cancelled {
            return;
        }
        let s = self.swing(elapsed);
        scene.write(
            self.target,
            Property::TranslateY,
            self.rest_y + self.amplitude.y * s,
        );
        scene.write(
            self.target,
            Property::RotationDeg,
            self.rest_rotation_deg + self.amplitude.rotation_deg * s,
        );
    }
}

/// Keyed registry of ambient loops, at most one per target.
///
/// Handles are never resumed: [`IdleLoopManager::revive`] always rebuilds the set from the
/// declared parameters.
#[derive(Clone, Debug, Default)]
pub struct IdleLoopManager {
    spec: Option<IdleLoopSpec>,
    targets: Vec<TargetId>,
    handles: BTreeMap<TargetId, IdleLoopHandle>,
    started_at: Duration,
}

impl IdleLoopManager {
    /// Bind the loop definition for the current viewport. Disabled classes and missing elements
    /// produce an empty manager whose operations are all no-ops.
    pub fn bind(spec: Option<&IdleLoopSpec>, ctx: &BuildCtx<'_>) -> Self {
        let Some(spec) = spec else {
            return Self::default();
        };
        if !ctx.params.idle_loops {
            tracing::debug!(class = ?ctx.class, "idle loops disabled for class");
            return Self::default();
        }
        let targets = ctx.lookup.resolve(&spec.selector);
        if targets.is_empty() {
            tracing::debug!(selector = %spec.selector, "idle loops skipped: no targets");
            return Self::default();
        }
        Self {
            spec: Some(spec.clone()),
            targets,
            handles: BTreeMap::new(),
            started_at: Duration::ZERO,
        }
    }

    /// Decorative targets this manager drives.
    pub fn targets(&self) -> &[TargetId] {
        &self.targets
    }

    /// Create one handle per target, replacing any existing set.
    ///
    /// Rest values are captured from `scene`, so loops swing around the current baseline.
    pub fn create(&mut self, scene: &SceneState, now: Duration) {
        self.handles.clear();
        let Some(spec) = &self.spec else {
            return;
        };
        for (i, id) in self.targets.iter().enumerate() {
            let rest = scene.get(*id).copied().unwrap_or_default();
            let i = i as f64;
            self.handles.insert(
                *id,
                IdleLoopHandle {
                    target: *id,
                    amplitude: IdleAmplitude {
                        y: spec.amplitude_y,
                        rotation_deg: spec.amplitude_rotation_deg,
                    },
                    period: spec.base_period_secs + i * spec.period_step_secs,
                    phase_offset: i * spec.delay_step_secs,
                    cancelled: false,
                    ease: spec.ease,
                    rest_y: rest.translate.y,
                    rest_rotation_deg: rest.rotation_deg,
                },
            );
        }
        self.started_at = now;
        tracing::debug!(count = self.handles.len(), "idle loops created");
    }

    /// Kill every live loop and return the killed handles. Idempotent.
    pub fn cancel_all(&mut self) -> Vec<IdleLoopHandle> {
        if self.handles.is_empty() {
            return Vec::new();
        }
        let killed: Vec<_> = std::mem::take(&mut self.handles)
            .into_values()
            .map(|mut h| {
                h.cancelled = true;
                h
            })
            .collect();
        tracing::debug!(count = killed.len(), "idle loops cancelled");
        killed
    }

    /// Recreate the full set if it is currently empty. Reviving a live set is a no-op.
    pub fn revive(&mut self, scene: &SceneState, now: Duration) {
        if self.is_active() || self.spec.is_none() {
            return;
        }
        self.create(scene, now);
    }

    /// Whether any loop is live.
    pub fn is_active(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Live handles in target order.
    pub fn handles(&self) -> impl Iterator<Item = &IdleLoopHandle> {
        self.handles.values()
    }

    /// Targets that currently have a live loop.
    pub fn active_targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.handles.keys().copied()
    }

    /// Whether `id` has a live loop.
    pub fn has_handle(&self, id: TargetId) -> bool {
        self.handles.contains_key(&id)
    }

    /// Advance every live loop to `now` and write the results.
    pub fn tick(&self, now: Duration, scene: &mut SceneState) {
        let elapsed = now.saturating_sub(self.started_at).as_secs_f64();
        for h in self.handles.values() {
            h.write(elapsed, scene);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/idle/loops.rs"]
mod tests;
