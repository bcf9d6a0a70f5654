#![deny(missing_docs)]
//! xcompare HTML engine: renders a [`LayoutModel`](xcompare_core::LayoutModel)
//! into static markup or JSON.

/// Render errors.
pub mod error;
/// Language display names.
pub mod registry;
/// Renderer adapters (HTML, JSON).
pub mod renderer;

pub use error::RenderError;
pub use registry::LanguageRegistry;
pub use renderer::{HtmlOptions, HtmlRenderer, JsonRenderer, RendererAdapter};
