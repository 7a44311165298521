//! Fake builder module
//!
//! A drop-in [`PdfBuilder`] implementation for tests: every setter behaves
//! and validates exactly like the real builder, but terminal operations
//! never touch the filesystem or spawn a process. Instead they synthesize
//! a deterministic placeholder PDF and record it, and one `assert_*`
//! helper per configurable property makes caller expectations checkable.
//!
//! Assertion helpers panic with a message naming the property and the
//! mismatch; setters never fail beyond normal validation.
//!
//! # Example
//!
//! ```rust
//! use playwright_pdf::{FakePdfBuilder, PdfBuilder, PaperFormat};
//!
//! let mut pdf = FakePdfBuilder::create()
//!     .html("<h1>Invoice</h1>")
//!     .format(PaperFormat::A4)
//!     .landscape();
//!
//! pdf.save("invoices/42.pdf").unwrap();
//!
//! pdf.assert_html("<h1>Invoice</h1>")
//!     .assert_format(PaperFormat::A4)
//!     .assert_landscape()
//!     .assert_saved("invoices/42.pdf");
//! ```

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use base64::Engine;
use serde_json::Value;

use crate::builder::{BuilderState, PdfBuilder, Result};
use crate::options::{dimension_token, Margins, PaperFormat, Unit};
use crate::response::{PdfResponse, PDF_CONTENT_TYPE};
use crate::template::TemplateRenderer;

/// The minimal single-page PDF every fake render produces
const PLACEHOLDER_PDF: &str = "%PDF-1.4\n1 0 obj\n<<\n/Type /Catalog\n/Pages 2 0 R\n>>\nendobj\n2 0 obj\n<<\n/Type /Pages\n/Kids [3 0 R]\n/Count 1\n>>\nendobj\n3 0 obj\n<<\n/Type /Page\n/Parent 2 0 R\n/MediaBox [0 0 612 792]\n>>\nendobj\nxref\n0 4\n0000000000 65535 f \n0000000010 00000 n \n0000000053 00000 n \n0000000100 00000 n \ntrailer\n<<\n/Size 4\n/Root 1 0 R\n>>\nstartxref\n149\n%%EOF\n";

/// A recording PdfBuilder that renders nothing
#[derive(Debug, Clone, Default)]
pub struct FakePdfBuilder {
    state: BuilderState,
    template: Option<String>,
    template_data: Option<Value>,
    generated_pdfs: BTreeMap<PathBuf, Vec<u8>>,
}

impl FakePdfBuilder {
    /// Create a new fake builder
    pub fn create() -> Self {
        Self::default()
    }

    fn placeholder_pdf() -> Vec<u8> {
        PLACEHOLDER_PDF.as_bytes().to_vec()
    }

    // ============ Assertion helpers ============

    /// Assert that the PDF was configured from the given URL
    pub fn assert_url(&self, expected: &str) -> &Self {
        let Some(url) = &self.state.url else {
            panic!("PDF was not generated from a URL.");
        };

        assert_property("URL", expected, url.as_str());
        self
    }

    /// Assert that content came from the given template
    pub fn assert_template(&self, expected: &str) -> &Self {
        let Some(template) = &self.template else {
            panic!("No template has been rendered.");
        };

        assert_property("Template", expected, template.as_str());
        self
    }

    /// Assert the rendered template data, via a caller-supplied check
    pub fn assert_template_data(&self, check: impl FnOnce(&Value) -> bool) -> &Self {
        let Some(data) = &self.template_data else {
            panic!("No template has been rendered.");
        };

        assert!(check(data), "Template data does not match expected value.");
        self
    }

    /// Assert the document HTML content
    pub fn assert_html(&self, expected: &str) -> &Self {
        assert_property("HTML content", Some(expected), self.state.html.as_deref());
        self
    }

    /// Assert the header template HTML
    pub fn assert_header_template(&self, expected: &str) -> &Self {
        assert_property(
            "Header template",
            Some(expected),
            self.state.header_html.as_deref(),
        );
        self
    }

    /// Assert the footer template HTML
    pub fn assert_footer_template(&self, expected: &str) -> &Self {
        assert_property(
            "Footer template",
            Some(expected),
            self.state.footer_html.as_deref(),
        );
        self
    }

    /// Assert the paper format
    pub fn assert_format(&self, expected: PaperFormat) -> &Self {
        assert_property(
            "Format",
            Some(expected.name()),
            self.state.options.format.as_deref(),
        );
        self
    }

    /// Assert the paper width
    pub fn assert_width(&self, expected: f64, unit: Unit) -> &Self {
        assert_property(
            "Width",
            Some(dimension_token(expected, unit).as_str()),
            self.state.options.width.as_deref(),
        );
        self
    }

    /// Assert the paper height
    pub fn assert_height(&self, expected: f64, unit: Unit) -> &Self {
        assert_property(
            "Height",
            Some(dimension_token(expected, unit).as_str()),
            self.state.options.height.as_deref(),
        );
        self
    }

    /// Assert landscape orientation was requested
    pub fn assert_landscape(&self) -> &Self {
        assert_flag("Landscape", self.state.options.landscape);
        self
    }

    /// Assert the document outline was requested
    pub fn assert_outline(&self) -> &Self {
        assert_flag("Outline", self.state.options.outline);
        self
    }

    /// Assert CSS page size preference was requested
    pub fn assert_prefer_css_page_size(&self) -> &Self {
        assert_flag(
            "Prefer CSS page size",
            self.state.options.prefer_css_page_size,
        );
        self
    }

    /// Assert background printing was requested
    pub fn assert_print_background(&self) -> &Self {
        assert_flag("Print background", self.state.options.print_background);
        self
    }

    /// Assert header/footer display was requested
    pub fn assert_display_header_footer(&self) -> &Self {
        assert_flag(
            "Display header footer",
            self.state.options.display_header_footer,
        );
        self
    }

    /// Assert the tagged PDF option was requested
    pub fn assert_tagged(&self) -> &Self {
        assert_flag("Tagged", self.state.options.tagged);
        self
    }

    /// Assert the configured margins
    pub fn assert_margins(&self, expected: Margins) -> &Self {
        assert_property("Margins", &expected, &self.state.margins);
        self
    }

    /// Assert the rendering scale
    pub fn assert_scale(&self, expected: f64) -> &Self {
        assert_property("Scale", Some(expected), self.state.options.scale);
        self
    }

    /// Assert the page ranges
    pub fn assert_page_ranges(&self, expected: &str) -> &Self {
        assert_property(
            "Page ranges",
            Some(expected),
            self.state.options.page_ranges.as_deref(),
        );
        self
    }

    /// Assert the normalized download filename
    pub fn assert_name(&self, expected: &str) -> &Self {
        assert_property(
            "Name",
            Some(expected),
            self.state.download_file_name.as_deref(),
        );
        self
    }

    /// Assert that a PDF was saved to the given path on this instance
    pub fn assert_saved(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        assert!(
            self.generated_pdfs.contains_key(path),
            "PDF was not saved to path: {}",
            path.display()
        );
        self
    }

    /// Assert download disposition headers for the given filename
    pub fn assert_downloaded(&self, file_name: &str) -> &Self {
        self.assert_disposition("attachment", file_name)
    }

    /// Assert inline disposition headers for the given filename
    pub fn assert_inline(&self, file_name: &str) -> &Self {
        self.assert_disposition("inline", file_name)
    }

    fn assert_disposition(&self, disposition: &str, file_name: &str) -> &Self {
        assert_property(
            "Download filename",
            Some(file_name),
            self.state.download_file_name.as_deref(),
        );

        let headers = &self.state.response_headers;
        assert!(headers.contains("Content-Type"), "Content-Type header is not set.");
        assert!(
            headers.contains("Content-Disposition"),
            "Content-Disposition header is not set."
        );

        assert_property(
            "Content-Type header",
            Some(PDF_CONTENT_TYPE),
            headers.get("Content-Type"),
        );
        assert_property(
            "Content-Disposition header",
            Some(format!("{disposition}; filename=\"{file_name}\"").as_str()),
            headers.get("Content-Disposition"),
        );
        self
    }
}

fn assert_property<T: PartialEq + Debug>(property: &str, expected: T, actual: T) {
    assert!(
        expected == actual,
        "{property} does not match expected value. Expected {expected:?}, got {actual:?}."
    );
}

fn assert_flag(property: &str, actual: Option<bool>) {
    assert!(
        actual == Some(true),
        "{property} option does not match expected value. Expected true, got {actual:?}."
    );
}

impl PdfBuilder for FakePdfBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }

    /// Record the template invocation in addition to rendering it
    fn view<T: TemplateRenderer>(
        mut self,
        templates: &T,
        template: &str,
        data: &Value,
    ) -> Result<Self> {
        if self.state.html.is_none() {
            let html = templates.render(template, data)?;
            self.template = Some(template.to_string());
            self.template_data = Some(data.clone());
            self.state.html = Some(html);
        }

        Ok(self)
    }

    fn save(&mut self, output_path: impl AsRef<Path>) -> Result<PathBuf> {
        let output_path = output_path.as_ref().to_path_buf();
        self.generated_pdfs
            .insert(output_path.clone(), Self::placeholder_pdf());
        Ok(output_path)
    }

    fn raw(&mut self) -> Result<Vec<u8>> {
        Ok(Self::placeholder_pdf())
    }

    fn base64(&mut self) -> Result<String> {
        Ok(base64::engine::general_purpose::STANDARD.encode(Self::placeholder_pdf()))
    }

    fn to_response(&mut self) -> Result<PdfResponse> {
        if !self.state.response_headers.contains("Content-Disposition") {
            self.state
                .response_headers
                .insert("Content-Disposition", "inline; filename=\"document.pdf\"");
        }

        Ok(PdfResponse::new(
            self.state.response_headers.clone(),
            Self::placeholder_pdf(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::StaticTemplates;
    use serde_json::json;

    #[test]
    fn test_save_records_without_touching_disk() {
        let mut pdf = FakePdfBuilder::create().html("<p>doc</p>");
        let path = pdf.save("reports/out.pdf").unwrap();

        assert_eq!(path, PathBuf::from("reports/out.pdf"));
        assert!(!path.exists());
        pdf.assert_saved("reports/out.pdf");
    }

    #[test]
    #[should_panic(expected = "PDF was not saved to path: other.pdf")]
    fn test_assert_saved_fails_for_unsaved_path() {
        let mut pdf = FakePdfBuilder::create().html("<p>doc</p>");
        pdf.save("out.pdf").unwrap();
        pdf.assert_saved("other.pdf");
    }

    #[test]
    fn test_raw_and_base64_agree_on_placeholder() {
        let mut pdf = FakePdfBuilder::create().html("<p>doc</p>");
        let raw = pdf.raw().unwrap();

        assert!(raw.starts_with(b"%PDF-1.4"));
        assert_eq!(
            pdf.base64().unwrap(),
            base64::engine::general_purpose::STANDARD.encode(&raw)
        );
    }

    #[test]
    fn test_layout_assertions_pass_after_matching_calls() {
        let pdf = FakePdfBuilder::create()
            .format(PaperFormat::A2)
            .width(100.0, Unit::Pixel)
            .height(200.0, Unit::Pixel)
            .landscape()
            .outline()
            .prefer_css_page_size()
            .print_background()
            .tagged()
            .scale(0.5)
            .unwrap()
            .page_ranges("1-3")
            .unwrap()
            .margins(Margins::uniform(10.0, Unit::Millimeter));

        pdf.assert_format(PaperFormat::A2)
            .assert_width(100.0, Unit::Pixel)
            .assert_height(200.0, Unit::Pixel)
            .assert_landscape()
            .assert_outline()
            .assert_prefer_css_page_size()
            .assert_print_background()
            .assert_tagged()
            .assert_scale(0.5)
            .assert_page_ranges("1-3")
            .assert_margins(Margins::uniform(10.0, Unit::Millimeter));
    }

    #[test]
    #[should_panic(expected = "Format does not match expected value")]
    fn test_assert_format_mismatch_names_property() {
        FakePdfBuilder::create()
            .format(PaperFormat::A4)
            .assert_format(PaperFormat::A5);
    }

    #[test]
    #[should_panic(expected = "Landscape option does not match expected value")]
    fn test_assert_landscape_fails_when_unset() {
        FakePdfBuilder::create().assert_landscape();
    }

    #[test]
    fn test_view_recorded_for_assertions() {
        let mut templates = StaticTemplates::new();
        templates.register("letter", "<p>Dear {{ name }}</p>");

        let pdf = FakePdfBuilder::create()
            .view(&templates, "letter", &json!({ "name": "Ada" }))
            .unwrap();

        pdf.assert_template("letter")
            .assert_template_data(|data| data["name"] == "Ada")
            .assert_html("<p>Dear Ada</p>");
    }

    #[test]
    fn test_view_not_recorded_when_html_already_set() {
        let mut templates = StaticTemplates::new();
        templates.register("letter", "<p>template</p>");

        let pdf = FakePdfBuilder::create()
            .html("<p>explicit</p>")
            .view(&templates, "letter", &json!({}))
            .unwrap();

        assert!(pdf.template.is_none());
        pdf.assert_html("<p>explicit</p>");
    }

    #[test]
    fn test_assert_downloaded_checks_headers() {
        let pdf = FakePdfBuilder::create().html("<p>doc</p>").download("x.pdf");
        pdf.assert_downloaded("x.pdf");
    }

    #[test]
    #[should_panic(expected = "Content-Type header is not set.")]
    fn test_assert_downloaded_fails_without_headers() {
        FakePdfBuilder::create()
            .html("<p>doc</p>")
            .name("x.pdf")
            .assert_downloaded("x.pdf");
    }

    #[test]
    fn test_assert_inline_checks_disposition() {
        let pdf = FakePdfBuilder::create().html("<p>doc</p>").inline("note");
        pdf.assert_inline("note.pdf");
    }

    #[test]
    fn test_to_response_defaults_inline_disposition() {
        let mut pdf = FakePdfBuilder::create().html("<p>doc</p>");
        let response = pdf.to_response().unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Disposition"),
            Some("inline; filename=\"document.pdf\"")
        );
        assert!(response.body.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn test_assert_url_passes_for_matching_url() {
        let pdf = FakePdfBuilder::create()
            .from_url("https://example.com/report")
            .unwrap();

        pdf.assert_url("https://example.com/report");
    }

    #[test]
    #[should_panic(expected = "PDF was not generated from a URL.")]
    fn test_assert_url_fails_without_url() {
        FakePdfBuilder::create().html("<p>doc</p>").assert_url("https://example.com");
    }
}
