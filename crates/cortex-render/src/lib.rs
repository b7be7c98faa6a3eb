#![forbid(unsafe_code)]

//! HTML + inline SVG rendering for validated Cortex statblocks.

pub mod catalog;
pub mod die;
pub mod dom;
pub mod layout;
pub mod trait_block;

use cortex_core::{DieFace, SheetConfig, StatBlock};
use dom::Element;
use trait_block::DieSizes;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no glyph in the die catalog for face {face}")]
    MissingGlyph { face: DieFace },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Renders `block` into `container` using the layout it names.
pub fn render_into(block: &StatBlock, container: &mut Element, config: &SheetConfig) {
    layout::render_stat_block(block, container, DieSizes::from_config(config));
}

/// Renders `block` into a fresh `<div class="cortex-sheet">`.
pub fn render_stat_block(block: &StatBlock, config: &SheetConfig) -> Element {
    let mut container = Element::new("div").with_class("cortex-sheet");
    render_into(block, &mut container, config);
    container
}
