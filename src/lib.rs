//! playwright-pdf - HTML to PDF conversion through headless Chromium
//!
//! Converts HTML documents (inline markup, rendered templates, or a URL)
//! into PDF byte streams by driving a Playwright renderer script in a Node
//! subprocess, behind a fluent builder API.
//!
//! # Features
//!
//! - **Options Model** ([`options`]) - Validated page layout configuration
//! - **Resource Staging** ([`staging`]) - Scoped temp files with guaranteed cleanup
//! - **Render Bridge** ([`bridge`]) - Node discovery, bounded-timeout subprocess execution
//! - **Document Builder** ([`builder`]) - Fluent configuration and terminal operations
//! - **Test Fake** ([`fake`]) - Drop-in recording builder with assertion helpers
//! - **Templates** ([`template`]) - Pluggable template rendering collaborator
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use playwright_pdf::{PdfBuilder, PlaywrightBuilder, Margins, PaperFormat, Unit};
//!
//! let path = PlaywrightBuilder::create()
//!     .html("<h1>Hello</h1>")
//!     .format(PaperFormat::A4)
//!     .margins(Margins::uniform(10.0, Unit::Millimeter))
//!     .print_background()
//!     .save("out/hello.pdf")?;
//! # Ok::<(), playwright_pdf::PdfError>(())
//! ```
//!
//! # Testing without a renderer
//!
//! [`FakePdfBuilder`] satisfies the same [`PdfBuilder`] contract, renders
//! nothing, and records every setter for assertion:
//!
//! ```rust
//! use playwright_pdf::{FakePdfBuilder, PdfBuilder, PaperFormat};
//!
//! let mut fake = FakePdfBuilder::create()
//!     .html("<h1>Report</h1>")
//!     .format(PaperFormat::A4);
//!
//! fake.save("reports/q3.pdf").unwrap();
//! fake.assert_format(PaperFormat::A4).assert_saved("reports/q3.pdf");
//! ```
//!
//! # Architecture
//!
//! ```text
//! caller -> Document Builder -> Resource Staging -> Render Bridge -> PDF bytes
//!                 |                                     (node subprocess)
//!            Test Fake -> recorded state -> assertions
//! ```

pub mod bridge;
pub mod builder;
pub mod cli;
pub mod fake;
pub mod options;
pub mod response;
pub mod staging;
pub mod template;
pub mod util;

// Re-exports for convenience
pub use bridge::{BridgeError, NodeBridge, RenderRequest, DEFAULT_TIMEOUT};
pub use builder::{BuilderState, PdfBuilder, PdfError, PlaywrightBuilder};
pub use cli::{parse_margins, Cli};
pub use fake::FakePdfBuilder;
pub use options::{Margins, OptionsError, PageOptions, PaperFormat, Unit};
pub use response::{PdfResponse, ResponseHeaders, PDF_CONTENT_TYPE};
pub use staging::{StagedResources, StagingError};
pub use template::{StaticTemplates, TemplateError, TemplateRenderer};
pub use util::{ensure_dir_writable, normalize_pdf_file_name};
