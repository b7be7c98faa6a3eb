#![forbid(unsafe_code)]

//! `cortex` renders Cortex-system character sheets from JSON code blocks embedded in markdown.
//!
//! The single entry point is [`render`]: it takes the code block body and an output element, and
//! never fails. Parse and validation problems turn into one visible error element; a block that
//! asks for a template (`{ "template": "underworld" }`) renders nothing and reports the request so
//! the host can rewrite the block with [`apply_template_requests`].

pub mod markdown;

pub use cortex_core::*;
pub use cortex_render::dom::{Element, Node};
pub use cortex_render::{catalog, die, dom, layout, trait_block};

use markdown::{CodeBlock, find_code_blocks};
use serde_json::Value;

/// What [`render`] did with a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    Rendered,
    TemplateRequested(TemplateKind),
    /// An error element was written instead of a sheet.
    Failed,
}

/// Parses and renders one code block body into `sink`.
pub fn render(source: &str, sink: &mut Element, config: &SheetConfig) -> BlockStatus {
    match parse_block(source) {
        Ok(ParsedBlock::StatBlock(block)) => {
            cortex_render::render_into(&block, sink, config);
            BlockStatus::Rendered
        }
        Ok(ParsedBlock::Template(kind)) => BlockStatus::TemplateRequested(kind),
        Err(err) => {
            tracing::debug!(error = %err, "statblock rejected");
            sink.append(error_element(&err, config));
            BlockStatus::Failed
        }
    }
}

pub fn error_element(err: &cortex_core::Error, config: &SheetConfig) -> Element {
    Element::new("div")
        .with_class("cortex-error")
        .with_text(format!("{}: {err}", config.error_prefix()))
}

/// A rendered code block of a markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    pub section: SectionInfo,
    pub status: BlockStatus,
    pub container: Element,
}

/// Renders every code block tagged with the configured fence, in document order.
pub fn render_markdown(document: &str, config: &SheetConfig) -> Vec<RenderedBlock> {
    find_code_blocks(document, config.fence())
        .into_iter()
        .map(|CodeBlock { body, section }| {
            let mut container = block_container(config);
            let status = render(&body, &mut container, config);
            RenderedBlock {
                section,
                status,
                container,
            }
        })
        .collect()
}

/// Template requests found in `document`, last block first, so applying them in order keeps the
/// earlier sections' line numbers valid.
pub fn template_requests(path: &str, document: &str, config: &SheetConfig) -> Vec<TemplateRequest> {
    let mut requests: Vec<TemplateRequest> = find_code_blocks(document, config.fence())
        .into_iter()
        .filter_map(|block| {
            let value: Value = serde_json::from_str(&block.body).ok()?;
            let kind = TemplateKind::requested_by(&value)?;
            Some(TemplateRequest {
                source_path: path.to_string(),
                section: Some(block.section),
                kind,
            })
        })
        .collect();
    requests.reverse();
    requests
}

/// Commits each request in order. Stops at the first failure; earlier commits stay applied.
pub fn apply_template_requests(
    host: &mut dyn DocumentHost,
    requests: &[TemplateRequest],
    config: &SheetConfig,
) -> template::Result<usize> {
    for request in requests {
        commit_template_sync(host, request, config)?;
    }
    Ok(requests.len())
}

fn block_container(config: &SheetConfig) -> Element {
    Element::new("div").with_class(format!("block-language-{}", config.fence()))
}

/// Bundles a [`SheetConfig`] for hosts that render many blocks.
#[derive(Debug, Clone, Default)]
pub struct CodeBlockRenderer {
    pub config: SheetConfig,
}

impl CodeBlockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `overrides` onto the built-in defaults.
    pub fn with_config_overrides(mut self, overrides: &Value) -> Self {
        self.config.deep_merge(overrides);
        self
    }

    pub fn render(&self, source: &str, sink: &mut Element) -> BlockStatus {
        render(source, sink, &self.config)
    }

    /// Renders one block body into a fresh container and serializes it.
    pub fn render_html(&self, source: &str) -> String {
        let mut container = block_container(&self.config);
        self.render(source, &mut container);
        container.to_html()
    }

    pub fn render_markdown(&self, document: &str) -> Vec<RenderedBlock> {
        render_markdown(document, &self.config)
    }
}
