use crate::foundation::core::{Rgba, TargetId, Viewport};
use crate::responsive::classify::{ClassParams, ViewportClass};

/// Element-lookup collaborator: resolves declared selectors to stable target handles.
///
/// An empty resolution is never an error; the component that asked simply skips its
/// binding.
pub trait ElementLookup {
    /// Resolve `selector` to target handles in document order.
    fn resolve(&self, selector: &str) -> Vec<TargetId>;

    /// Human-readable label for `id`, used in snapshots and logs.
    fn label(&self, id: TargetId) -> Option<String> {
        let _ = id;
        None
    }

    /// Document offset of the element's top edge in pixels.
    fn offset_top(&self, id: TargetId) -> Option<f64>;

    /// Base background color of the element, if it has one.
    fn background(&self, id: TargetId) -> Option<Rgba> {
        let _ = id;
        None
    }
}

/// One element declared in a [`StaticLookup`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementDecl {
    /// Stable handle.
    pub id: TargetId,
    /// Label for diagnostics.
    pub label: String,
    /// Selectors that match this element.
    pub selectors: Vec<String>,
    /// Document offset of the top edge in pixels.
    #[serde(default)]
    pub offset_top: f64,
    /// Base background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba>,
}

/// In-memory element table, used by the CLI and by tests.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaticLookup {
    /// Declared elements in document order.
    pub elements: Vec<ElementDecl>,
}

impl StaticLookup {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element with the next free id and return its handle.
    pub fn element(
        &mut self,
        label: impl Into<String>,
        selectors: &[&str],
        offset_top: f64,
    ) -> TargetId {
        let id = TargetId(
            self.elements
                .iter()
                .map(|e| e.id.0 + 1)
                .max()
                .unwrap_or(0),
        );
        self.elements.push(ElementDecl {
            id,
            label: label.into(),
            selectors: selectors.iter().map(|s| (*s).to_owned()).collect(),
            offset_top,
            background: None,
        });
        id
    }

    /// Attach a background color to an already declared element.
    pub fn with_background(&mut self, id: TargetId, color: Rgba) -> &mut Self {
        if let Some(e) = self.elements.iter_mut().find(|e| e.id == id) {
            e.background = Some(color);
        }
        self
    }

    /// Remove every element matching `selector`, simulating absent markup.
    pub fn remove_selector(&mut self, selector: &str) {
        self.elements
            .retain(|e| !e.selectors.iter().any(|s| s == selector));
    }

    fn find(&self, id: TargetId) -> Option<&ElementDecl> {
        self.elements.iter().find(|e| e.id == id)
    }
}

impl ElementLookup for StaticLookup {
    fn resolve(&self, selector: &str) -> Vec<TargetId> {
        self.elements
            .iter()
            .filter(|e| e.selectors.iter().any(|s| s == selector))
            .map(|e| e.id)
            .collect()
    }

    fn label(&self, id: TargetId) -> Option<String> {
        self.find(id).map(|e| e.label.clone())
    }

    fn offset_top(&self, id: TargetId) -> Option<f64> {
        self.find(id).map(|e| e.offset_top)
    }

    fn background(&self, id: TargetId) -> Option<Rgba> {
        self.find(id).and_then(|e| e.background)
    }
}

/// Everything a component needs to bind itself for one viewport.
#[derive(Clone, Copy)]
pub struct BuildCtx<'a> {
    /// Element lookup collaborator.
    pub lookup: &'a dyn ElementLookup,
    /// Committed viewport size.
    pub viewport: Viewport,
    /// Class selected for `viewport`.
    pub class: ViewportClass,
    /// Parameter set of `class`.
    pub params: &'a ClassParams,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/lookup.rs"]
mod tests;
