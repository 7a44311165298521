//! Document builder module
//!
//! The public fluent surface for PDF generation. [`PdfBuilder`] is the
//! operation contract shared by the real [`PlaywrightBuilder`] and the
//! test fake ([`FakePdfBuilder`](crate::FakePdfBuilder)): configuration
//! setters live as default methods over one shared [`BuilderState`], so
//! both implementations validate and record identically, and only the
//! terminal operations differ.
//!
//! # Example
//!
//! ```rust,no_run
//! use playwright_pdf::{PdfBuilder, PlaywrightBuilder, PaperFormat};
//!
//! let path = PlaywrightBuilder::create()
//!     .html("<h1>Invoice</h1>")
//!     .format(PaperFormat::A4)
//!     .landscape()
//!     .scale(1.2)?
//!     .save("output/invoice.pdf")?;
//! # Ok::<(), playwright_pdf::PdfError>(())
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::bridge::{BridgeError, NodeBridge, RenderRequest};
use crate::options::{Margins, OptionsError, PageOptions, PaperFormat, Unit};
use crate::response::{PdfResponse, ResponseHeaders, PDF_CONTENT_TYPE};
use crate::template::{TemplateError, TemplateRenderer};
use crate::util::{ensure_dir_writable, normalize_pdf_file_name};

/// Builder error types
///
/// Umbrella over configuration, resource, and bridge failures; all are
/// unrecoverable at the builder level and surface to the caller.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Invalid URL [{0}]. Expected a valid URL format starts with http:// or https://")]
    InvalidUrl(String),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("{0}")]
    OutputDirectory(String),

    #[error("Failed to write PDF content to [{path}]: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Accumulated configuration of one builder instance
///
/// Built incrementally by the chained setter calls and read once at
/// invocation time; the bridge never mutates it.
#[derive(Debug, Clone, Default)]
pub struct BuilderState {
    /// Document HTML, from `html()` or a rendered template
    pub html: Option<String>,
    /// URL content source
    pub url: Option<String>,
    /// Header template HTML
    pub header_html: Option<String>,
    /// Footer template HTML
    pub footer_html: Option<String>,
    /// Page layout options
    pub options: PageOptions,
    /// Page margins
    pub margins: Margins,
    /// Accumulated response headers
    pub response_headers: ResponseHeaders,
    /// Normalized download filename, once explicitly named
    pub download_file_name: Option<String>,
}

/// The full PDF builder operation contract
///
/// Setters consume and return `self` for chaining; each one validates its
/// input before touching the state. Terminal operations take `&mut self`
/// so a fake can keep recording after them. Code written against this
/// trait runs unchanged against the real builder and the fake.
pub trait PdfBuilder: Sized {
    /// Read access to the accumulated configuration
    fn state(&self) -> &BuilderState;

    /// Mutable access to the accumulated configuration
    fn state_mut(&mut self) -> &mut BuilderState;

    // ============ Content sources ============

    /// Set the HTML content to convert to PDF
    ///
    /// Always takes precedence over [`view`](Self::view) content,
    /// regardless of call order.
    fn html(mut self, html: impl Into<String>) -> Self {
        self.state_mut().html = Some(html.into());
        self
    }

    /// Set the URL to generate the PDF from
    ///
    /// Fails unless the URL starts with `http://` or `https://`.
    fn from_url(mut self, url: &str) -> Result<Self> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PdfError::InvalidUrl(url.to_string()));
        }

        self.state_mut().url = Some(url.to_string());
        Ok(self)
    }

    /// Render a named template with the given data as the document content
    ///
    /// Has no effect once explicit HTML has been set; template errors
    /// propagate unchanged.
    fn view<T: TemplateRenderer>(
        mut self,
        templates: &T,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<Self> {
        if self.state().html.is_none() {
            let html = templates.render(template, data)?;
            self.state_mut().html = Some(html);
        }

        Ok(self)
    }

    /// Set the HTML template for the print header
    ///
    /// Implies [`display_header_footer`](Self::display_header_footer).
    /// The renderer injects print values into elements carrying the
    /// `date`, `title`, `url`, `pageNumber` and `totalPages` classes.
    fn header_template(mut self, template: impl Into<String>) -> Self {
        let state = self.state_mut();
        state.options.display_header_footer = Some(true);
        state.header_html = Some(template.into());
        self
    }

    /// Set the HTML template for the print footer
    ///
    /// Implies [`display_header_footer`](Self::display_header_footer);
    /// same injected classes as [`header_template`](Self::header_template).
    fn footer_template(mut self, template: impl Into<String>) -> Self {
        let state = self.state_mut();
        state.options.display_header_footer = Some(true);
        state.footer_html = Some(template.into());
        self
    }

    // ============ Page layout ============

    /// Set the paper format
    ///
    /// Takes priority over [`width`](Self::width)/[`height`](Self::height)
    /// when both are present.
    fn format(mut self, format: PaperFormat) -> Self {
        self.state_mut().options.set_format(format);
        self
    }

    /// Set the paper width
    fn width(mut self, width: f64, unit: Unit) -> Self {
        self.state_mut().options.set_width(width, unit);
        self
    }

    /// Set the paper height
    fn height(mut self, height: f64, unit: Unit) -> Self {
        self.state_mut().options.set_height(height, unit);
        self
    }

    /// Replace all four margins atomically
    fn margins(mut self, margins: Margins) -> Self {
        self.state_mut().margins = margins;
        self
    }

    /// Use landscape orientation
    fn landscape(mut self) -> Self {
        self.state_mut().options.landscape = Some(true);
        self
    }

    /// Embed the document outline into the PDF
    fn outline(mut self) -> Self {
        self.state_mut().options.outline = Some(true);
        self
    }

    /// Give CSS `@page` sizes priority over width/height/format
    fn prefer_css_page_size(mut self) -> Self {
        self.state_mut().options.prefer_css_page_size = Some(true);
        self
    }

    /// Print background graphics
    fn print_background(mut self) -> Self {
        self.state_mut().options.print_background = Some(true);
        self
    }

    /// Display header and footer templates
    fn display_header_footer(mut self) -> Self {
        self.state_mut().options.display_header_footer = Some(true);
        self
    }

    /// Set the rendering scale, within [0.1, 2.0]
    fn scale(mut self, scale: f64) -> Result<Self> {
        self.state_mut().options.set_scale(scale)?;
        Ok(self)
    }

    /// Generate a tagged (accessible) PDF
    fn tagged(mut self) -> Self {
        self.state_mut().options.tagged = Some(true);
        self
    }

    /// Set the paper ranges to print, e.g. `"1-5, 8, 11-13"`
    fn page_ranges(mut self, ranges: &str) -> Result<Self> {
        self.state_mut().options.set_page_ranges(ranges)?;
        Ok(self)
    }

    // ============ Identity and response ============

    /// Set the download filename, normalized to lower case with a `.pdf`
    /// suffix
    ///
    /// Once set, disposition operations never overwrite it with their
    /// default.
    fn name(mut self, file_name: &str) -> Self {
        self.state_mut().download_file_name = Some(normalize_pdf_file_name(file_name));
        self
    }

    /// Merge custom headers into the response; later keys override earlier
    fn add_headers<N, V>(mut self, headers: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let state = self.state_mut();
        for (name, value) in headers {
            state.response_headers.insert(name, value);
        }
        self
    }

    /// Set the response headers for downloading the PDF as an attachment
    ///
    /// `file_name` is used only when no explicit [`name`](Self::name) was
    /// set.
    fn download(mut self, file_name: &str) -> Self {
        if self.state().download_file_name.is_none() {
            self = self.name(file_name);
        }

        set_disposition_headers(self.state_mut(), "attachment");
        self
    }

    /// Set the response headers for displaying the PDF inline
    ///
    /// `file_name` is used only when no explicit [`name`](Self::name) was
    /// set.
    fn inline(mut self, file_name: &str) -> Self {
        if self.state().download_file_name.is_none() {
            self = self.name(file_name);
        }

        set_disposition_headers(self.state_mut(), "inline");
        self
    }

    // ============ Terminal operations ============

    /// Generate the PDF and save it to the given path, creating parent
    /// directories as needed; returns the saved path
    fn save(&mut self, output_path: impl AsRef<Path>) -> Result<PathBuf>;

    /// Generate the PDF and return its raw bytes
    fn raw(&mut self) -> Result<Vec<u8>>;

    /// Generate the PDF and return its content base64-encoded
    fn base64(&mut self) -> Result<String>;

    /// Generate the PDF and package it as an HTTP-style response
    ///
    /// Defaults `Content-Disposition` to `inline; filename="document.pdf"`
    /// when no disposition was set.
    fn to_response(&mut self) -> Result<PdfResponse>;
}

fn set_disposition_headers(state: &mut BuilderState, disposition: &str) {
    // download()/inline() always ensure a filename first
    let file_name = state
        .download_file_name
        .clone()
        .unwrap_or_else(|| "document.pdf".to_string());

    state
        .response_headers
        .insert("Content-Type", PDF_CONTENT_TYPE);
    state.response_headers.insert(
        "Content-Disposition",
        format!("{disposition}; filename=\"{file_name}\""),
    );
}

/// The real builder, rendering through the Playwright subprocess bridge
#[derive(Debug, Clone, Default)]
pub struct PlaywrightBuilder {
    state: BuilderState,
    bridge: NodeBridge,
}

impl PlaywrightBuilder {
    /// Create a new builder with default bridge configuration
    pub fn create() -> Self {
        Self::default()
    }

    /// Create a builder over a pre-configured bridge
    pub fn with_bridge(bridge: NodeBridge) -> Self {
        Self {
            state: BuilderState::default(),
            bridge,
        }
    }

    /// Set the path to the Node.js binary, skipping discovery
    pub fn set_node_binary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bridge = self.bridge.with_node_binary(path);
        self
    }

    /// Set the path to the renderer entry script
    pub fn set_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bridge = self.bridge.with_script(path);
        self
    }

    /// Bound the renderer invocation to the given timeout
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.bridge = self.bridge.with_timeout(timeout);
        self
    }

    fn render_request(&self) -> RenderRequest<'_> {
        let mut request = RenderRequest::new(&self.state.options, &self.state.margins);
        request.html = self.state.html.as_deref();
        request.url = self.state.url.as_deref();
        request.header_html = self.state.header_html.as_deref();
        request.footer_html = self.state.footer_html.as_deref();
        request
    }
}

impl PdfBuilder for PlaywrightBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }

    fn save(&mut self, output_path: impl AsRef<Path>) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        let content = self.raw()?;

        if let Some(directory) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir_writable(directory).map_err(PdfError::OutputDirectory)?;
        }

        std::fs::write(output_path, &content).map_err(|source| PdfError::OutputWrite {
            path: output_path.to_path_buf(),
            source,
        })?;

        info!(path = %output_path.display(), bytes = content.len(), "saved PDF");
        Ok(output_path.to_path_buf())
    }

    fn raw(&mut self) -> Result<Vec<u8>> {
        Ok(self.bridge.render_raw(&self.render_request())?)
    }

    fn base64(&mut self) -> Result<String> {
        debug!("rendering PDF to base64");
        Ok(self.bridge.render_base64(&self.render_request())?)
    }

    fn to_response(&mut self) -> Result<PdfResponse> {
        if !self.state.response_headers.contains("Content-Disposition") {
            self.state
                .response_headers
                .insert("Content-Disposition", "inline; filename=\"document.pdf\"");
        }

        let content = self.raw()?;
        Ok(PdfResponse::new(self.state.response_headers.clone(), content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::StaticTemplates;
    use serde_json::json;

    fn invoice_templates() -> StaticTemplates {
        let mut templates = StaticTemplates::new();
        templates.register("invoice", "<h1>Invoice {{ number }}</h1>");
        templates
    }

    #[test]
    fn test_from_url_accepts_http_schemes() {
        let builder = PlaywrightBuilder::create()
            .from_url("https://example.com")
            .unwrap();
        assert_eq!(builder.state().url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_from_url_rejects_other_schemes() {
        let err = PlaywrightBuilder::create()
            .from_url("ftp://example.com")
            .unwrap_err();
        assert!(matches!(err, PdfError::InvalidUrl(_)));
        assert!(err.to_string().contains("ftp://example.com"));
    }

    #[test]
    fn test_html_wins_over_view_in_either_order() {
        let templates = invoice_templates();

        let html_first = PlaywrightBuilder::create()
            .html("<p>explicit</p>")
            .view(&templates, "invoice", &json!({ "number": 1 }))
            .unwrap();
        assert_eq!(html_first.state().html.as_deref(), Some("<p>explicit</p>"));

        let view_first = PlaywrightBuilder::create()
            .view(&templates, "invoice", &json!({ "number": 1 }))
            .unwrap()
            .html("<p>explicit</p>");
        assert_eq!(view_first.state().html.as_deref(), Some("<p>explicit</p>"));
    }

    #[test]
    fn test_view_renders_template_when_no_html_set() {
        let templates = invoice_templates();
        let builder = PlaywrightBuilder::create()
            .view(&templates, "invoice", &json!({ "number": 7 }))
            .unwrap();

        assert_eq!(
            builder.state().html.as_deref(),
            Some("<h1>Invoice 7</h1>")
        );
    }

    #[test]
    fn test_header_template_forces_display_flag() {
        let builder = PlaywrightBuilder::create().header_template("<div>Header</div>");

        assert_eq!(builder.state().options.display_header_footer, Some(true));
        assert_eq!(
            builder.state().header_html.as_deref(),
            Some("<div>Header</div>")
        );
    }

    #[test]
    fn test_width_and_height_tokens() {
        let builder = PlaywrightBuilder::create()
            .width(210.0, Unit::Millimeter)
            .height(11.69, Unit::Inch);

        assert_eq!(builder.state().options.width.as_deref(), Some("210mm"));
        assert_eq!(builder.state().options.height.as_deref(), Some("11.69in"));
    }

    #[test]
    fn test_margins_replace_atomically() {
        let builder = PlaywrightBuilder::create()
            .margins(Margins::new(10.0, 20.0, 30.0, 40.0, Unit::Millimeter))
            .margins(Margins::uniform(5.0, Unit::Pixel));

        let margins = &builder.state().margins;
        assert_eq!(margins.top, "5px");
        assert_eq!(margins.right, "5px");
        assert_eq!(margins.bottom, "5px");
        assert_eq!(margins.left, "5px");
    }

    #[test]
    fn test_scale_out_of_range_is_configuration_error() {
        let err = PlaywrightBuilder::create().scale(2.5).unwrap_err();
        assert!(matches!(
            err,
            PdfError::Options(OptionsError::ScaleOutOfRange(_))
        ));
    }

    #[test]
    fn test_name_normalizes_to_pdf_suffix() {
        let builder = PlaywrightBuilder::create().name("Invoice");
        assert_eq!(
            builder.state().download_file_name.as_deref(),
            Some("invoice.pdf")
        );

        let builder = PlaywrightBuilder::create().name("invoice.pdf");
        assert_eq!(
            builder.state().download_file_name.as_deref(),
            Some("invoice.pdf")
        );
    }

    #[test]
    fn test_download_sets_disposition_headers() {
        let builder = PlaywrightBuilder::create().download("x.pdf");
        let headers = &builder.state().response_headers;

        assert_eq!(headers.get("Content-Type"), Some(PDF_CONTENT_TYPE));
        assert_eq!(
            headers.get("Content-Disposition"),
            Some("attachment; filename=\"x.pdf\"")
        );
    }

    #[test]
    fn test_inline_sets_disposition_headers() {
        let builder = PlaywrightBuilder::create().inline("x.pdf");
        assert_eq!(
            builder.state().response_headers.get("Content-Disposition"),
            Some("inline; filename=\"x.pdf\"")
        );
    }

    #[test]
    fn test_explicit_name_survives_disposition_default() {
        let builder = PlaywrightBuilder::create().name("report").download("document.pdf");

        assert_eq!(
            builder.state().download_file_name.as_deref(),
            Some("report.pdf")
        );
        assert_eq!(
            builder.state().response_headers.get("Content-Disposition"),
            Some("attachment; filename=\"report.pdf\"")
        );
    }

    #[test]
    fn test_add_headers_later_keys_override() {
        let builder = PlaywrightBuilder::create()
            .add_headers([("X-Meta", "one"), ("X-Other", "keep")])
            .add_headers([("X-Meta", "two")]);

        let headers = &builder.state().response_headers;
        assert_eq!(headers.get("X-Meta"), Some("two"));
        assert_eq!(headers.get("X-Other"), Some("keep"));
    }

    #[test]
    fn test_conflicting_sources_fail_before_any_spawn() {
        let mut builder = PlaywrightBuilder::create()
            .html("<p>doc</p>")
            .from_url("https://example.com")
            .unwrap();

        let err = builder.raw().unwrap_err();
        assert!(matches!(
            err,
            PdfError::Bridge(BridgeError::ConflictingSources)
        ));
    }
}
