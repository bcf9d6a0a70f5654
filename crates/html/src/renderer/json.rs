use super::RendererAdapter;
use crate::error::RenderError;
use xcompare_core::LayoutModel;

/// Serializes the layout model as JSON for JavaScript front ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    /// Pretty-print the output.
    pub pretty: bool,
}

impl JsonRenderer {
    /// Compact output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl RendererAdapter for JsonRenderer {
    type Output = String;

    fn render(&self, layout: &LayoutModel) -> Result<String, RenderError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(layout)?
        } else {
            serde_json::to_string(layout)?
        };
        Ok(json)
    }
}
