//! Integration tests for the `skeleton` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("plantilla").unwrap()
}

/// Write a document JSON to a temporary file and return the handle.
fn write_temp_doc(json: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    f.write_all(json.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn invoice_doc() -> tempfile::NamedTempFile {
    write_temp_doc(
        r#"{
        "pages": [{
            "pageNumber": 1,
            "width": 800.0,
            "height": 1100.0,
            "fragments": [
                {"text": "INVOICE", "x": 8.0, "y": 8.0, "width": 30.0, "fontSize": 16.0},
                {"text": "Factura No.", "x": 8.0, "y": 20.0, "width": 14.0, "fontSize": 11.0},
                {"text": "12345", "x": 80.0, "y": 20.0, "width": 12.0, "fontSize": 11.0},
                {"text": "Cliente: ACME S.A.", "x": 8.0, "y": 30.0, "width": 40.0, "fontSize": 11.0},
                {"text": "Total: 1.234,56", "x": 8.0, "y": 45.0, "width": 30.0, "fontSize": 12.0}
            ]
        }],
        "fields": [
            {"label": "Numero Factura", "value": "12345", "confidence": 0.9},
            {"label": "Cliente", "value": "ACME S.A.", "confidence": 0.9},
            {"label": "Total", "value": "1.234,56", "confidence": 0.9}
        ]
    }"#,
    )
}

// --- HTML output tests ---

#[test]
fn skeleton_outputs_html_with_placeholders() {
    let f = invoice_doc();

    cmd()
        .args(["skeleton", f.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("font-family: Arial"))
        .stdout(predicate::str::contains("{{numero_factura}}"))
        .stdout(predicate::str::contains("Cliente: {{cliente}}"))
        .stdout(predicate::str::contains("Firma"));
}

#[test]
fn skeleton_of_empty_document_is_bare_shell() {
    let f = write_temp_doc(r#"{"pages": [], "fields": []}"#);

    cmd()
        .args(["skeleton", f.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("<div"))
        .stdout(predicate::str::contains("Firma"))
        .stdout(predicate::str::contains("{{").not());
}

#[test]
fn skeleton_writes_output_file() {
    let f = invoice_doc();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("template.html");

    cmd()
        .args([
            "skeleton",
            f.path().to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("{{total}}"));
}

// --- JSON output tests ---

#[test]
fn skeleton_json_envelope() {
    let f = invoice_doc();

    let output = cmd()
        .args(["skeleton", f.path().to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(v["pageCount"], 1);
    assert_eq!(v["confidence"], 0.6);
    let variables = v["variables"].as_array().unwrap();
    assert_eq!(variables.len(), 3);
    assert_eq!(variables[0], "{{numero_factura}}");
    assert!(v["html"].as_str().unwrap().contains("{{cliente}}"));
}

// --- Error handling tests ---

#[test]
fn skeleton_missing_file_fails() {
    cmd()
        .args(["skeleton", "/nonexistent/doc.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn skeleton_invalid_json_fails() {
    let f = write_temp_doc("{not valid json");

    cmd()
        .args(["skeleton", f.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid document JSON"));
}
