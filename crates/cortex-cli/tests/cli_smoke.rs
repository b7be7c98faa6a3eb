use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

const NOTE: &str = r#"# Mara

```cortex
{ "name": "Mara", "traits": [{ "title": "Attributes", "ratings": { "Might": "d8", "Wit": null } }] }
```

```cortex
{ "template": "underworld" }
```
"#;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("cortex-cli"))
}

#[test]
fn renders_markdown_blocks_to_html() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let note = tmp.path().join("mara.md");
    fs::write(&note, NOTE).expect("write note");
    let out = tmp.path().join("mara.html");

    cli()
        .args([
            "render",
            "--out",
            out.to_string_lossy().as_ref(),
            note.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let html = fs::read_to_string(&out).expect("read html");
    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(r#"<div class="block-language-cortex"><h2>Mara</h2>"#));
    assert!(lines[0].contains(r#"aria-label="A d8""#));
    assert!(lines[0].contains(r#"<span class="no-rating">-</span>"#));
    assert_eq!(lines[1], r#"<div class="block-language-cortex"></div>"#);

    assert_eq!(fs::read_to_string(&note).expect("read note"), NOTE);
}

#[test]
fn renders_bare_json_and_reports_errors_inline() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let body = tmp.path().join("bad.json");
    fs::write(&body, r#"{ "name": "Mara", "traits": [{ "title": "Roles", "ratings": { "Face": 3 } }] }"#)
        .expect("write json");

    let output = cli()
        .args(["render", "--json", body.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let html = String::from_utf8(output.stdout).expect("utf8");
    assert!(html.contains(r#"<div class="cortex-error">Error parsing cortex stat block: traits[0].ratings.Face:"#));
}

#[test]
fn check_fails_on_invalid_blocks() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let note = tmp.path().join("bad.md");
    fs::write(&note, "```cortex\n{ \"traits\": [] }\n```\n").expect("write note");

    let output = cli()
        .args(["check", note.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains(":1: name: missing required field"));
}

#[test]
fn documents_without_blocks_exit_with_code_3() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let note = tmp.path().join("empty.md");
    fs::write(&note, "# Nothing here\n").expect("write note");

    let output = cli()
        .args(["render", note.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn template_command_rewrites_the_request_block() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let note = tmp.path().join("mara.md");
    fs::write(&note, NOTE).expect("write note");

    cli()
        .current_dir(tmp.path())
        .args(["template", "mara.md"])
        .assert()
        .success();

    let doc = fs::read_to_string(&note).expect("read note");
    assert!(!doc.contains("\"template\""));
    assert!(doc.contains("\"name\": \"Character Name\""));
    assert!(doc.contains("\"layout\": \"one-third-two-third\""));
    assert!(doc.starts_with("# Mara\n\n```cortex\n{ \"name\": \"Mara\""));
}

#[test]
fn template_command_requires_a_file() {
    let output = cli().args(["template"]).output().expect("run cli");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn config_file_changes_the_fence() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("cortex.json");
    fs::write(&config, r#"{ "fence": "sheet" }"#).expect("write config");
    let note = tmp.path().join("mara.md");
    fs::write(&note, "```sheet\n{ \"name\": \"Jo\", \"traits\": [] }\n```\n").expect("write note");

    let output = cli()
        .args([
            "render",
            "--config",
            config.to_string_lossy().as_ref(),
            note.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let html = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(html, "<div class=\"block-language-sheet\"><h2>Jo</h2></div>\n");
}

#[test]
fn config_that_is_not_an_object_is_a_usage_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("cortex.json");
    fs::write(&config, "[\"sheet\"]").expect("write config");

    let output = cli()
        .args(["render", "--json", "--config", config.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("--config must point to a JSON object"), "{stderr}");
}
