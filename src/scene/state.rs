use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::TargetId;
use crate::scene::lookup::ElementLookup;
use crate::scene::target::{AnimatedTarget, Property, PropertyPatch, PropertySet};

/// Current visual properties of every bound element.
///
/// Writes are plain assignments, so replaying the same sequence of writes always yields
/// the same values. Writing to an unregistered target is a silent no-op.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    targets: BTreeMap<TargetId, AnimatedTarget>,
}

impl SceneState {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` with default properties. Already registered targets keep their values.
    pub fn register(&mut self, id: TargetId, lookup: &dyn ElementLookup) {
        self.targets.entry(id).or_insert_with(|| AnimatedTarget {
            id,
            label: lookup.label(id).unwrap_or_else(|| format!("#{}", id.0)),
            props: PropertySet::default(),
            background: lookup.background(id),
        });
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    /// Current properties of `id`.
    pub fn get(&self, id: TargetId) -> Option<&PropertySet> {
        self.targets.get(&id).map(|t| &t.props)
    }

    /// Full target record of `id`.
    pub fn target(&self, id: TargetId) -> Option<&AnimatedTarget> {
        self.targets.get(&id)
    }

    /// Write one scalar property. Returns `false` when `id` is not registered.
    pub fn write(&mut self, id: TargetId, prop: Property, value: f64) -> bool {
        match self.targets.get_mut(&id) {
            Some(t) => {
                t.props.set(prop, value);
                true
            }
            None => false,
        }
    }

    /// Apply a sparse patch to `id`.
    pub fn patch(&mut self, id: TargetId, patch: &PropertyPatch) {
        if let Some(t) = self.targets.get_mut(&id) {
            patch.apply(&mut t.props);
        }
    }

    /// Set the stacking order of `id`.
    pub fn set_z_index(&mut self, id: TargetId, z_index: i32) {
        if let Some(t) = self.targets.get_mut(&id) {
            t.props.z_index = z_index;
        }
    }

    /// Reset the given targets to default properties.
    pub fn reset<'a>(&mut self, ids: impl IntoIterator<Item = &'a TargetId>) {
        for id in ids {
            if let Some(t) = self.targets.get_mut(id) {
                t.props = PropertySet::default();
            }
        }
    }

    /// Reset every registered target to default properties.
    pub fn reset_all(&mut self) {
        for t in self.targets.values_mut() {
            t.props = PropertySet::default();
        }
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterate targets in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AnimatedTarget> {
        self.targets.values()
    }

    /// Copy the current state for a renderer.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            targets: self.targets.values().cloned().collect(),
        }
    }
}

/// A declared baseline resolved to concrete targets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Baseline {
    entries: Vec<(TargetId, PropertyPatch)>,
}

impl Baseline {
    /// Build from resolved `(target, patch)` pairs; later entries win.
    pub fn new(entries: Vec<(TargetId, PropertyPatch)>) -> Self {
        Self { entries }
    }

    /// Targets mentioned by this baseline.
    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Patch every entry on top of the current state.
    pub fn apply(&self, scene: &mut SceneState) {
        for (id, patch) in &self.entries {
            scene.patch(*id, patch);
        }
    }

    /// Reset `scope` to defaults, then apply this baseline.
    pub fn restore(&self, scope: &BTreeSet<TargetId>, scene: &mut SceneState) {
        scene.reset(scope);
        self.apply(scene);
    }
}

/// Per-frame output consumed by the rendering layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneSnapshot {
    /// Targets in id order.
    pub targets: Vec<AnimatedTarget>,
}

impl SceneSnapshot {
    /// Find a target by label.
    pub fn by_label(&self, label: &str) -> Option<&AnimatedTarget> {
        self.targets.iter().find(|t| t.label == label)
    }

    /// Find a target by id.
    pub fn get(&self, id: TargetId) -> Option<&AnimatedTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Compare two snapshots property by property within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.targets.len() == other.targets.len()
            && self
                .targets
                .iter()
                .zip(&other.targets)
                .all(|(a, b)| a.id == b.id && a.props.approx_eq(&b.props, tol))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
