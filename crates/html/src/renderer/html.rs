use serde::Deserialize;
use xcompare_core::{CodeBlock, LayoutModel, ResolvedGroup};

use super::RendererAdapter;
use crate::error::RenderError;
use crate::registry::LanguageRegistry;

/// Options for [`HtmlRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlOptions {
    /// BEM block name used for every class (`xcompare`, `xcompare__pane`, ...).
    pub class_prefix: String,
    /// Emit a heading for titled groups.
    pub show_titles: bool,
    /// Caption names for language tags and labels.
    pub registry: LanguageRegistry,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            class_prefix: "xcompare".to_string(),
            show_titles: true,
            registry: LanguageRegistry::defaults(),
        }
    }
}

/// Renders each comparison group as a static `<section>`.
///
/// Side-by-side groups get a `--split` panes container, all others a
/// `--stacked` one; styling is left to the host page.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: HtmlOptions,
}

impl HtmlRenderer {
    /// Create a renderer.
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Markup for a single group, without validating options.
    pub fn render_group(&self, group: &ResolvedGroup) -> String {
        let prefix = self.options.class_prefix.as_str();
        let mut out = String::new();

        out.push_str(&format!(r#"<section class="{prefix}""#));
        if let Some(anchor) = &group.anchor {
            out.push_str(&format!(r#" id="{}""#, escape_attr(anchor)));
        }
        out.push_str(">\n");

        if self.options.show_titles
            && let Some(title) = group.title()
        {
            out.push_str(&format!(
                "<h3 class=\"{prefix}__title\">{}</h3>\n",
                html_escape::encode_text(title)
            ));
        }

        let arrangement = if group.side_by_side { "split" } else { "stacked" };
        out.push_str(&format!(
            "<div class=\"{prefix}__panes {prefix}__panes--{arrangement}\">\n"
        ));
        for pane in group.panes() {
            self.render_pane(pane, &mut out);
        }
        out.push_str("</div>\n</section>\n");
        out
    }

    fn render_pane(&self, pane: &CodeBlock, out: &mut String) {
        let prefix = self.options.class_prefix.as_str();
        out.push_str(&format!("<figure class=\"{prefix}__pane\">\n"));

        if let Some(caption) = self.caption(pane) {
            out.push_str(&format!(
                "<figcaption>{}</figcaption>\n",
                html_escape::encode_text(caption)
            ));
        }

        match pane.language_tag.as_deref() {
            Some(tag) => out.push_str(&format!(
                r#"<pre><code class="language-{}">"#,
                escape_attr(tag)
            )),
            None => out.push_str("<pre><code>"),
        }
        out.push_str(&html_escape::encode_text(&pane.code));
        out.push_str("</code></pre>\n</figure>\n");
    }

    /// Label first, then language tag; both resolved through the registry.
    fn caption<'a>(&'a self, pane: &'a CodeBlock) -> Option<&'a str> {
        let raw = pane.label.as_deref().or(pane.language_tag.as_deref())?;
        Some(self.options.registry.display_name(raw).unwrap_or(raw))
    }

    fn validate(&self) -> Result<(), RenderError> {
        let prefix = &self.options.class_prefix;
        let valid = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(RenderError::InvalidClassPrefix(prefix.clone()))
        }
    }
}

impl RendererAdapter for HtmlRenderer {
    type Output = String;

    fn render(&self, layout: &LayoutModel) -> Result<String, RenderError> {
        self.validate()?;
        let html: String = layout
            .groups
            .iter()
            .map(|group| self.render_group(group))
            .collect();
        log::debug!(
            "{}: rendered {} group(s) to html",
            layout.path.as_deref().unwrap_or("<anonymous>"),
            layout.len()
        );
        Ok(html)
    }
}

fn escape_attr(value: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}
