//! Builder contract tests
//!
//! Verify that the real builder and the fake satisfy the same operation
//! contract, and that application code written against the trait runs
//! unchanged with either implementation.

use playwright_pdf::{
    BridgeError, FakePdfBuilder, Margins, PaperFormat, PdfBuilder, PdfError, PlaywrightBuilder,
    StaticTemplates, Unit,
};
use serde_json::json;

/// Application-style code, generic over the builder implementation
fn configure_invoice<B: PdfBuilder>(pdf: B, number: u32) -> B {
    pdf.html(format!("<h1>Invoice {number}</h1>"))
        .format(PaperFormat::A4)
        .margins(Margins::uniform(12.0, Unit::Millimeter))
        .print_background()
        .name(&format!("invoice-{number}"))
        .download("document.pdf")
}

#[test]
fn test_same_calling_code_works_for_both_implementations() {
    // The real builder configures without any I/O; only terminals render.
    let real = configure_invoice(PlaywrightBuilder::create(), 7);
    let fake = configure_invoice(FakePdfBuilder::create(), 7);

    for state in [real.state(), fake.state()] {
        assert_eq!(state.html.as_deref(), Some("<h1>Invoice 7</h1>"));
        assert_eq!(state.options.format.as_deref(), Some("A4"));
        assert_eq!(state.download_file_name.as_deref(), Some("invoice-7.pdf"));
        assert_eq!(
            state.response_headers.get("Content-Disposition"),
            Some("attachment; filename=\"invoice-7.pdf\"")
        );
    }
}

#[test]
fn test_fake_records_full_invoice_flow() {
    let mut pdf = configure_invoice(FakePdfBuilder::create(), 42);
    pdf.save("invoices/42.pdf").unwrap();

    pdf.assert_html("<h1>Invoice 42</h1>")
        .assert_format(PaperFormat::A4)
        .assert_margins(Margins::uniform(12.0, Unit::Millimeter))
        .assert_print_background()
        .assert_name("invoice-42.pdf")
        .assert_downloaded("invoice-42.pdf")
        .assert_saved("invoices/42.pdf");
}

#[test]
fn test_template_content_flows_through_either_builder() {
    let mut templates = StaticTemplates::new();
    templates.register("report", "<h2>{{ title }}</h2>");
    let data = json!({ "title": "Quarterly" });

    let real = PlaywrightBuilder::create()
        .view(&templates, "report", &data)
        .unwrap();
    let fake = FakePdfBuilder::create()
        .view(&templates, "report", &data)
        .unwrap();

    assert_eq!(real.state().html.as_deref(), Some("<h2>Quarterly</h2>"));
    assert_eq!(fake.state().html.as_deref(), Some("<h2>Quarterly</h2>"));
    fake.assert_template("report");
}

#[test]
fn test_fake_terminals_never_touch_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("never-written.pdf");

    let mut pdf = FakePdfBuilder::create().html("<p>doc</p>");
    let returned = pdf.save(&target).unwrap();

    assert_eq!(returned, target);
    assert!(!target.exists());
    pdf.assert_saved(&target);
}

#[cfg(unix)]
#[test]
fn test_failed_render_leaves_no_staging_directory() {
    let staging_dirs = || -> Vec<std::path::PathBuf> {
        std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("playwright-pdf-"))
            })
            .collect()
    };

    let before = staging_dirs();

    // /bin/false as the "node" binary makes the renderer fail immediately,
    // after the document and header have already been staged.
    let mut pdf = PlaywrightBuilder::create()
        .set_node_binary_path("/bin/false")
        .html("<p>doc</p>")
        .header_template("<div>head</div>");

    let err = pdf.raw().unwrap_err();
    assert!(matches!(
        err,
        PdfError::Bridge(BridgeError::ProcessFailed { .. })
    ));

    assert_eq!(staging_dirs(), before);
}

/// Requires a Node.js runtime with Playwright and its Chromium build
/// installed; run with `cargo test -- --ignored`.
#[test]
#[ignore = "requires Node.js with Playwright installed"]
fn test_live_render_saves_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("live.pdf");

    let saved = PlaywrightBuilder::create()
        .html("<h1>Live</h1>")
        .format(PaperFormat::A2)
        .landscape()
        .save(&output)
        .unwrap();

    let bytes = std::fs::read(saved).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.len() > 1024);
}
