//! Renderer adapters turning a layout model into output.

mod html;
mod json;

pub use html::{HtmlOptions, HtmlRenderer};
pub use json::JsonRenderer;

use crate::error::RenderError;
use xcompare_core::LayoutModel;

/// Consumes a resolved layout and produces rendered output.
pub trait RendererAdapter {
    /// Rendered representation.
    type Output;

    /// Render one document's layout.
    fn render(&self, layout: &LayoutModel) -> Result<Self::Output, RenderError>;
}
