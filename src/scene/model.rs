use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SceneError, SceneResult};
use crate::idle::loops::IdleLoopSpec;
use crate::region::scroll_region::RegionDef;
use crate::responsive::classify::{ClassTable, WidthClassifier};
use crate::scene::lookup::StaticLookup;
use crate::stack::timeline::StackDef;

/// Full declarative scene: the pinned region, the optional card stack, ambient loops and
/// the responsive tuning that binds them to a viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// The pinned intro region.
    pub region: RegionDef,
    /// Stacked card reveal, if the page has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackDef>,
    /// Ambient loops for decorative elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle: Option<IdleLoopSpec>,
    /// Widths whose crossing forces a rebuild.
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<f64>,
    /// Width classifier bounds.
    #[serde(default)]
    pub classifier: WidthClassifier,
    /// Tuning per viewport class.
    pub classes: ClassTable,
    /// Quiet period before a resize settles.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Size change that forces a rebuild even without crossing a breakpoint.
    #[serde(default = "default_size_threshold")]
    pub size_threshold_px: f64,
}

fn default_breakpoints() -> Vec<f64> {
    vec![480.0, 768.0, 1024.0, 1200.0, 1400.0]
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_size_threshold() -> f64 {
    150.0
}

impl SceneConfig {
    /// Validate every part of the scene.
    pub fn validate(&self) -> SceneResult<()> {
        self.region.validate()?;
        if let Some(stack) = &self.stack {
            stack.validate()?;
        }
        if let Some(idle) = &self.idle {
            idle.validate()?;
        }
        self.classifier.validate()?;
        self.classes.validate()?;

        if self.breakpoints.is_empty() {
            return Err(SceneError::config("breakpoint list must be non-empty"));
        }
        if self
            .breakpoints
            .iter()
            .any(|bp| !bp.is_finite() || *bp <= 0.0)
        {
            return Err(SceneError::config("breakpoints must be finite and > 0"));
        }
        let mut sorted = self.breakpoints.clone();
        sorted.sort_by(f64::total_cmp);
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(SceneError::config("breakpoints must be unique"));
        }
        if !(self.size_threshold_px.is_finite() && self.size_threshold_px >= 0.0) {
            return Err(SceneError::config("size_threshold_px must be finite and >= 0"));
        }
        Ok(())
    }

    /// Parse and validate a JSON scene.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON scene file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        let config = Self::from_json(&json)?;
        tracing::debug!(
            rows = config.region.tracks.len(),
            stack = config.stack.is_some(),
            "scene loaded"
        );
        Ok(config)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A scene together with the elements it animates, as consumed by the CLI.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDocument {
    /// Scene definition.
    pub scene: SceneConfig,
    /// Static element table.
    pub elements: StaticLookup,
}

impl SceneDocument {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.scene.validate()?;
        Ok(doc)
    }

    /// Read, parse and validate a JSON document file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read scene document '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
