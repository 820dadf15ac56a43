use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn icongen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_icongen"))
}

#[test]
fn generates_from_json_source_and_writes_manifest() {
    let tmp = tempdir().expect("tempdir");

    let source = tmp.path().join("icons.json");
    fs::write(&source, r#"{"icon_home":"E001","url_chooser":"E002"}"#).expect("seed source");

    let template = tmp.path().join("enum.hbs");
    fs::write(
        &template,
        "enum {{enumName}} {\n{{#each icons}}  case {{lowerFirstWord (snakeToCamelCase key)}} = \"{{unicodeCase value}}\"\n{{/each}}}\n",
    )
    .expect("seed template");

    let output = tmp.path().join("Icons.swift");

    let status = icongen()
        .arg(&source)
        .args(["-p"])
        .arg(&template)
        .args(["-o"])
        .arg(&output)
        .args(["-e", "Glyph"])
        .status()
        .expect("run icongen");
    assert!(status.success());

    let rendered = fs::read_to_string(&output).expect("rendered output");
    assert!(rendered.contains("enum Glyph {"));
    assert!(rendered.contains("case iconHome = \"\\u{E001}\""));
    assert!(rendered.contains("case urlChooser = \"\\u{E002}\""));

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("Icons.json")).expect("manifest"))
            .expect("manifest json");
    assert_eq!(manifest["filename"], "icons.json");
    assert_eq!(manifest["name"], "icons");
    assert_eq!(manifest["unicodes"]["IconHome"], "E001");
    assert_eq!(manifest["unicodes"]["UrlChooser"], "E002");
}

#[test]
fn second_run_reports_unchanged_content() {
    let tmp = tempdir().expect("tempdir");

    let source = tmp.path().join("icons.json");
    fs::write(&source, r#"{"a":"E001"}"#).expect("seed source");

    let template = tmp.path().join("plain.hbs");
    fs::write(&template, "{{#each icons}}{{key}}{{/each}}\n").expect("seed template");

    let output = tmp.path().join("out.txt");

    let first = icongen()
        .arg(&source)
        .arg("-p")
        .arg(&template)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run icongen");
    assert!(first.status.success());
    assert!(String::from_utf8_lossy(&first.stdout).contains("File written"));

    let second = icongen()
        .arg(&source)
        .arg("-p")
        .arg(&template)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run icongen");
    assert!(second.status.success());
    assert!(
        String::from_utf8_lossy(&second.stdout).contains("content is unchanged"),
        "stdout: {}",
        String::from_utf8_lossy(&second.stdout)
    );
}

#[test]
fn stdout_destination_prints_rendered_text_and_no_manifest() {
    let tmp = tempdir().expect("tempdir");

    let source = tmp.path().join("icons.json");
    fs::write(&source, r#"{"a":"E001"}"#).expect("seed source");

    let template = tmp.path().join("plain.hbs");
    fs::write(&template, "{{#each icons}}{{key}}={{value}}{{/each}}").expect("seed template");

    let run = icongen()
        .arg(&source)
        .arg("-p")
        .arg(&template)
        .output()
        .expect("run icongen");

    assert!(run.status.success());
    assert_eq!(String::from_utf8_lossy(&run.stdout), "a=E001");
    assert!(
        !tmp.path().join("icons.json.json").exists() && !tmp.path().join("plain.json").exists(),
        "console destinations must not produce a manifest"
    );
}

#[test]
fn unsupported_extension_fails_fast() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("icons.bmp");
    fs::write(&source, "not an icon source").expect("seed file");

    let run = icongen().arg(&source).output().expect("run icongen");

    assert!(!run.status.success());
    assert!(
        String::from_utf8_lossy(&run.stderr).contains("unsupported source format"),
        "stderr: {}",
        String::from_utf8_lossy(&run.stderr)
    );
}

#[test]
fn missing_named_template_fails_with_lookup_error() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("icons.json");
    fs::write(&source, r#"{"a":"E001"}"#).expect("seed source");

    let run = icongen()
        .arg(&source)
        .args(["-t", "definitely-not-here"])
        .env("ICONGEN_TEMPLATES", tmp.path())
        .output()
        .expect("run icongen");

    assert!(!run.status.success());
    assert!(
        String::from_utf8_lossy(&run.stderr).contains("not found"),
        "stderr: {}",
        String::from_utf8_lossy(&run.stderr)
    );
}
