use cortex::{BlockStatus, CodeBlockRenderer, Element, SheetConfig, TemplateKind, render};

fn render_fresh(source: &str) -> (BlockStatus, Element) {
    let mut sink = Element::new("div");
    let status = render(source, &mut sink, &SheetConfig::default());
    (status, sink)
}

#[test]
fn valid_block_renders_a_sheet() {
    let (status, sink) = render_fresh(
        r#"{ "name": "Mara", "traits": [{ "title": "Attributes", "ratings": { "Might": "d8" } }] }"#,
    );
    assert_eq!(status, BlockStatus::Rendered);
    assert_eq!(sink.find_all_by_tag("h2")[0].text_content(), "Mara");
    assert_eq!(sink.find_all_by_tag("svg").len(), 1);
    assert!(sink.find_by_class("cortex-error").is_none());
}

#[test]
fn missing_name_renders_a_single_error_element() {
    let (status, sink) = render_fresh(r#"{ "traits": [] }"#);
    assert_eq!(status, BlockStatus::Failed);
    assert_eq!(sink.children.len(), 1);

    let error = sink.find_by_class("cortex-error").expect("error element");
    assert_eq!(
        error.text_content(),
        "Error parsing cortex stat block: name: missing required field"
    );
    assert!(sink.find_all_by_tag("h2").is_empty());
}

#[test]
fn non_array_traits_renders_a_single_error_element() {
    let (status, sink) = render_fresh(r#"{ "name": "Mara", "traits": "none" }"#);
    assert_eq!(status, BlockStatus::Failed);
    assert_eq!(sink.children.len(), 1);
    assert!(sink.find_by_class("cortex-error").is_some());
}

#[test]
fn late_validation_errors_leave_no_partial_sheet() {
    let (status, sink) = render_fresh(
        r#"{
            "name": "Mara",
            "traits": [
                { "title": "Attributes", "ratings": { "Might": 8 } },
                { "title": "Roles", "ratings": { "Face": 20 } }
            ]
        }"#,
    );
    assert_eq!(status, BlockStatus::Failed);
    assert_eq!(sink.children.len(), 1);
    assert!(sink.find_all_by_tag("svg").is_empty());
    assert!(sink.text_content().contains("traits[1].ratings.Face"));
}

#[test]
fn invalid_json_is_reported_inline() {
    let (status, sink) = render_fresh("{ name: Mara }");
    assert_eq!(status, BlockStatus::Failed);
    assert!(
        sink.text_content()
            .starts_with("Error parsing cortex stat block: invalid JSON:")
    );
}

#[test]
fn template_requests_render_nothing() {
    let (status, sink) = render_fresh(r#"{ "template": "underworld" }"#);
    assert_eq!(status, BlockStatus::TemplateRequested(TemplateKind::Underworld));
    assert!(sink.children.is_empty());
}

#[test]
fn unknown_layout_renders_like_no_layout() {
    let renderer = CodeBlockRenderer::new();
    let plain = renderer.render_html(r#"{ "name": "Mara", "traits": [{ "title": "Bonds", "ratings": { "Jo": 4 } }] }"#);
    let unknown = renderer.render_html(
        r#"{ "name": "Mara", "layout": "nonexistent", "traits": [{ "title": "Bonds", "ratings": { "Jo": 4 } }] }"#,
    );
    assert_eq!(plain, unknown);
    assert!(plain.starts_with(r#"<div class="block-language-cortex"><h2>Mara</h2>"#));
}

#[test]
fn config_overrides_change_error_prefix_and_die_sizes() {
    let renderer = CodeBlockRenderer::new().with_config_overrides(&serde_json::json!({
        "errorPrefix": "Bad sheet",
        "dice": { "ratingSize": "large" }
    }));

    let html = renderer.render_html(r#"{ "traits": [] }"#);
    assert!(html.contains(">Bad sheet: name: missing required field<"));

    let html = renderer.render_html(r#"{ "name": "Mara", "traits": [{ "title": "Bonds", "ratings": { "Jo": 4 } }] }"#);
    assert!(html.contains(r#"class="die unrolled large""#));
}
