use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::foundation::core::TargetId;
use crate::foundation::error::{SceneError, SceneResult};
use crate::responsive::classify::{ClassParam, ViewportClass};
use crate::scene::lookup::BuildCtx;
use crate::scene::state::SceneState;
use crate::scene::target::Property;
use crate::timeline::phase::PhaseWindow;

/// A value that may depend on the active viewport class.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDef {
    /// Fixed number.
    Const(f64),
    /// `params[key] * factor + offset`.
    Param {
        /// Parameter to read.
        key: ClassParam,
        /// Multiplier.
        #[serde(default = "one")]
        factor: f64,
        /// Added after scaling.
        #[serde(default)]
        offset: f64,
    },
    /// Percentage of viewport height.
    Vh(f64),
}

fn one() -> f64 {
    1.0
}

impl From<f64> for ValueDef {
    fn from(v: f64) -> Self {
        Self::Const(v)
    }
}

impl ValueDef {
    /// Reference a class parameter unchanged.
    pub fn param(key: ClassParam) -> Self {
        Self::Param {
            key,
            factor: 1.0,
            offset: 0.0,
        }
    }

    /// Resolve against the bound viewport.
    pub fn resolve(&self, ctx: &BuildCtx<'_>) -> f64 {
        match *self {
            Self::Const(v) => v,
            Self::Param {
                key,
                factor,
                offset,
            } => ctx.params.get(key) * factor + offset,
            Self::Vh(pct) => ctx.viewport.height * pct / 100.0,
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            Self::Const(v) | Self::Vh(v) => v.is_finite(),
            Self::Param { factor, offset, .. } => factor.is_finite() && offset.is_finite(),
        }
    }
}

/// One declarative row: drive `property` of every element matching `selector` from
/// `from` to `to` across `window`.
///
/// For element `i` the travelled delta is scaled by `1 + i * spread`, so staggered
/// elements can travel progressively further.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackDef {
    /// Element selector.
    pub selector: String,
    /// Property written by this row.
    pub property: Property,
    /// Progress window.
    pub window: PhaseWindow,
    /// Value at local progress 0.
    pub from: ValueDef,
    /// Value at local progress 1.
    pub to: ValueDef,
    /// Easing applied to local progress.
    #[serde(default)]
    pub ease: Ease,
    /// Per-index delta multiplier.
    #[serde(default)]
    pub spread: f64,
    /// Restrict the row to these classes. `None` means every class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<ViewportClass>>,
}

impl TrackDef {
    /// Validate static invariants.
    pub fn validate(&self) -> SceneResult<()> {
        if self.selector.trim().is_empty() {
            return Err(SceneError::validation("track selector must be non-empty"));
        }
        self.window.validate()?;
        if !(self.from.is_finite() && self.to.is_finite() && self.spread.is_finite()) {
            return Err(SceneError::validation(format!(
                "track '{}' values must be finite",
                self.selector
            )));
        }
        Ok(())
    }

    fn applies_to(&self, class: ViewportClass) -> bool {
        self.classes.as_ref().is_none_or(|c| c.contains(&class))
    }
}

/// A row bound to concrete targets and resolved numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTrack {
    /// Bound targets in document order.
    pub targets: SmallVec<[TargetId; 4]>,
    /// Written property.
    pub property: Property,
    /// Progress window.
    pub window: PhaseWindow,
    /// Resolved start value.
    pub from: f64,
    /// Resolved end value.
    pub to: f64,
    /// Easing.
    pub ease: Ease,
    /// Per-index delta multiplier.
    pub spread: f64,
}

impl ResolvedTrack {
    /// Value of element `index` at top-level progress `p`.
    pub fn value_at(&self, p: f64, index: usize) -> f64 {
        let t = self.ease.apply(self.window.local(p, index));
        let delta = (self.to - self.from) * (1.0 + index as f64 * self.spread);
        self.from + delta * t
    }
}

/// Ordered table of resolved rows.
///
/// Rows are evaluated in declaration order; when two rows write the same property of the
/// same target, the later row wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseTable {
    rows: Vec<ResolvedTrack>,
}

impl PhaseTable {
    /// Bind `defs` for the current viewport.
    ///
    /// Rows excluded by class, or whose selector resolves to nothing, are skipped.
    pub fn resolve(defs: &[TrackDef], ctx: &BuildCtx<'_>) -> Self {
        let mut rows = Vec::with_capacity(defs.len());
        for def in defs {
            if !def.applies_to(ctx.class) {
                continue;
            }
            let targets: SmallVec<[TargetId; 4]> = ctx.lookup.resolve(&def.selector).into();
            if targets.is_empty() {
                tracing::debug!(selector = %def.selector, "phase row skipped: no targets");
                continue;
            }
            rows.push(ResolvedTrack {
                targets,
                property: def.property,
                window: def.window,
                from: def.from.resolve(ctx),
                to: def.to.resolve(ctx),
                ease: def.ease,
                spread: def.spread,
            });
        }
        Self { rows }
    }

    /// Resolved rows in evaluation order.
    pub fn rows(&self) -> &[ResolvedTrack] {
        &self.rows
    }

    /// Every target written by some row.
    pub fn targets(&self) -> BTreeSet<TargetId> {
        self.rows
            .iter()
            .flat_map(|r| r.targets.iter().copied())
            .collect()
    }

    /// Evaluate every row at progress `p` and write the results.
    pub fn evaluate(&self, p: f64, scene: &mut SceneState) {
        for row in &self.rows {
            for (i, id) in row.targets.iter().enumerate() {
                scene.write(*id, row.property, row.value_at(p, i));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/track.rs"]
mod tests;
