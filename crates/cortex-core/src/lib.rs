#![forbid(unsafe_code)]

//! Cortex statblock model and input handling (headless).
//!
//! A `cortex` code block holds loosely typed JSON. This crate turns it into a canonical
//! [`StatBlock`] (or a template request) and owns the in-place template rewrite. Rendering
//! lives in `cortex-render`.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod template;

pub use config::SheetConfig;
pub use error::{Error, Result};
pub use model::{DieFace, LAYOUT_ONE_THIRD_TWO_THIRD, LayoutRegion, Rating, StatBlock, Trait};
pub use normalize::{ParsedBlock, normalize, normalize_rating, parse_block, parse_stat_block};
pub use template::{
    DocumentHost, MemoryDocumentHost, SectionInfo, TemplateError, TemplateKind, TemplateRequest,
    build_replacement, commit_template, commit_template_sync,
};
