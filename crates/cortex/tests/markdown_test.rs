use cortex::markdown::find_code_blocks;
use cortex::{
    BlockStatus, MemoryDocumentHost, SectionInfo, SheetConfig, TemplateKind, apply_template_requests,
    commit_template, parse_stat_block, render_markdown, template_requests,
};
use futures::executor::block_on;

const NOTE: &str = r#"# Session notes

```cortex
{ "name": "Mara", "traits": [] }
```

Some prose.

```rust
fn main() {}
```

```cortex
{ "template": "underworld" }
```
"#;

#[test]
fn finds_only_cortex_blocks_with_their_line_spans() {
    let blocks = find_code_blocks(NOTE, "cortex");
    assert_eq!(blocks.len(), 2);

    assert_eq!(
        blocks[0].section,
        SectionInfo {
            line_start: 2,
            line_end: 4
        }
    );
    assert_eq!(blocks[0].body, "{ \"name\": \"Mara\", \"traits\": [] }\n");

    assert_eq!(
        blocks[1].section,
        SectionInfo {
            line_start: 12,
            line_end: 14
        }
    );
}

#[test]
fn custom_fence_is_respected() {
    let doc = "```sheet\n{ \"name\": \"Jo\", \"traits\": [] }\n```\n";
    assert!(find_code_blocks(doc, "cortex").is_empty());
    assert_eq!(find_code_blocks(doc, "sheet").len(), 1);
}

#[test]
fn render_markdown_reports_each_block() {
    let blocks = render_markdown(NOTE, &SheetConfig::default());
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].status, BlockStatus::Rendered);
    assert_eq!(
        blocks[1].status,
        BlockStatus::TemplateRequested(TemplateKind::Underworld)
    );
    assert!(blocks[1].container.children.is_empty());
}

#[test]
fn template_requests_rewrite_the_document_in_place() {
    let config = SheetConfig::default();
    let mut host = MemoryDocumentHost::new();
    host.insert("mara.md", NOTE);

    let requests = template_requests("mara.md", NOTE, &config);
    assert_eq!(requests.len(), 1);
    assert_eq!(apply_template_requests(&mut host, &requests, &config).unwrap(), 1);

    let doc = host.get("mara.md").unwrap().to_string();
    assert!(doc.starts_with("# Session notes\n\n```cortex\n{ \"name\": \"Mara\", \"traits\": [] }\n```"));
    assert!(doc.contains("```rust\nfn main() {}\n```"));
    assert!(!doc.contains("\"template\""));

    let blocks = find_code_blocks(&doc, "cortex");
    assert_eq!(blocks.len(), 2);
    assert_eq!(
        parse_stat_block(&blocks[1].body).unwrap(),
        TemplateKind::Underworld.stat_block()
    );
    assert!(template_requests("mara.md", &doc, &config).is_empty());
}

#[test]
fn multiple_requests_are_applied_bottom_up() {
    let doc = "```cortex\n{ \"template\": \"underworld\" }\n```\n\n```cortex\n{ \"template\": \"underworld\" }\n```\n";
    let config = SheetConfig::default();
    let mut host = MemoryDocumentHost::new();
    host.insert("two.md", doc);

    let requests = template_requests("two.md", doc, &config);
    assert_eq!(requests.len(), 2);
    assert!(requests[0].section.unwrap().line_start > requests[1].section.unwrap().line_start);
    apply_template_requests(&mut host, &requests, &config).unwrap();

    let rewritten = host.get("two.md").unwrap();
    let blocks = find_code_blocks(rewritten, "cortex");
    assert_eq!(blocks.len(), 2);
    for block in blocks {
        assert_eq!(
            parse_stat_block(&block.body).unwrap(),
            TemplateKind::Underworld.stat_block()
        );
    }
}

#[test]
fn stale_sections_abort_without_touching_the_document() {
    let config = SheetConfig::default();
    let mut host = MemoryDocumentHost::new();
    host.insert("mara.md", NOTE);

    let mut requests = template_requests("mara.md", NOTE, &config);
    requests[0].section = Some(SectionInfo {
        line_start: 6,
        line_end: 14,
    });
    let err = block_on(commit_template(&mut host, &requests[0], &config)).unwrap_err();
    assert!(err.to_string().starts_with("invalid section"));
    assert_eq!(host.get("mara.md"), Some(NOTE));
}
