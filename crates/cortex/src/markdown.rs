//! Locating `cortex` code blocks in a markdown document.
//!
//! This stands in for a host editor's code-block registration: every fenced block whose info
//! string starts with the configured fence is reported with its body and its line span.

use cortex_core::SectionInfo;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub body: String,
    pub section: SectionInfo,
}

pub fn find_code_blocks(document: &str, fence: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<(Range<usize>, String)> = None;

    for (event, range) in Parser::new(document).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if info.split_whitespace().next() == Some(fence) =>
            {
                open = Some((range, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, body)) = open.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((range, body)) = open.take() {
                    blocks.push(CodeBlock {
                        body,
                        section: section_for(document, range),
                    });
                }
            }
            _ => {}
        }
    }

    blocks
}

fn section_for(document: &str, range: Range<usize>) -> SectionInfo {
    let bytes = document.as_bytes();
    let mut end = range.end.min(bytes.len());
    while end > range.start && matches!(bytes[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    SectionInfo {
        line_start: line_of(document, range.start),
        line_end: line_of(document, end),
    }
}

fn line_of(document: &str, offset: usize) -> usize {
    document.as_bytes()[..offset]
        .iter()
        .filter(|b| **b == b'\n')
        .count()
}
