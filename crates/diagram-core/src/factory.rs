// File: crates/diagram-core/src/factory.rs
// Summary: Entry points that normalize a raw config, pick the chart kind and render into the host document.

use serde_json::Value;

use crate::chart::{Chart, ChartKind, Diagram, RenderedChart};
use crate::config::normalize;
use crate::error::{DiagramError, DiagramResult};
use crate::surface::Document;
use crate::theme::Theme;

/// Holds one raw configuration and renders it as any of the three chart kinds.
///
/// The `create_*` methods never fail loudly: errors are logged and `None` is
/// returned, so the caller can fix the input and try again. Use
/// [`DiagramFactory::try_create`] to receive the error instead.
#[derive(Clone, Debug)]
pub struct DiagramFactory {
    config: Value,
    theme: Theme,
}

impl DiagramFactory {
    pub fn new(config: Value) -> Self {
        Self { config, theme: Theme::default() }
    }

    /// Parse a JSON document into a factory.
    pub fn from_json(json: &str) -> DiagramResult<Self> {
        let config = serde_json::from_str(json).map_err(anyhow::Error::from)?;
        Ok(Self::new(config))
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn create_bar_diagram(&self, doc: &mut Document) -> Option<RenderedChart> {
        self.create_logged(ChartKind::Bar, doc)
    }

    pub fn create_line_diagram(&self, doc: &mut Document) -> Option<RenderedChart> {
        self.create_logged(ChartKind::Line, doc)
    }

    pub fn create_circle_diagram(&self, doc: &mut Document) -> Option<RenderedChart> {
        self.create_logged(ChartKind::Circular, doc)
    }

    /// Validate, resolve the target surface and render. Nothing is drawn
    /// unless validation succeeds.
    pub fn try_create(&self, kind: ChartKind, doc: &mut Document) -> DiagramResult<RenderedChart> {
        let model = normalize(&self.config, doc)?;
        let target = model.surface().target.clone();
        let surface = doc
            .resolve_mut(&target)
            .ok_or(DiagramError::SurfaceDetached(target))?;
        Chart::new(kind, model).render(surface, &self.theme)
    }

    fn create_logged(&self, kind: ChartKind, doc: &mut Document) -> Option<RenderedChart> {
        match self.try_create(kind, doc) {
            Ok(chart) => Some(chart),
            Err(err) => {
                tracing::error!(kind = kind.name(), error = %err, "failed to create diagram");
                None
            }
        }
    }
}
