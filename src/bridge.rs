//! Render bridge module
//!
//! Drives the external headless-Chromium renderer: locates a Node.js
//! binary, serializes the page options and staged resource paths into an
//! argument list, executes the renderer entry script with a bounded
//! timeout, and decodes its base64 stdout into PDF bytes.
//!
//! Each render call moves through `Staging -> Invoking -> Decoding`;
//! staged resources are released on every exit path, including process
//! failure and timeout.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::options::{Margins, PageOptions};
use crate::staging::{StagedResources, StagingError};

/// Default bound on a single renderer invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Interval at which a running child is polled against the deadline
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Bridge error types
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(
        "Node.js binary not found. Please set the path using set_node_binary_path() method."
    )]
    NodeNotFound,

    #[error("Both HTML content and a URL were provided. PDF can only be generated from one source at a time.")]
    ConflictingSources,

    #[error("Failed to generate PDF: {stderr}")]
    ProcessFailed { stderr: String },

    #[error("PDF generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("PDF generation failed: No output received.")]
    NoOutput,

    #[error("Failed to decode base64 content.")]
    Decode(#[from] base64::DecodeError),

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Content and configuration for one render call
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Document HTML, staged to a file for the renderer
    pub html: Option<&'a str>,
    /// URL to render instead of staged HTML
    pub url: Option<&'a str>,
    /// Header template HTML
    pub header_html: Option<&'a str>,
    /// Footer template HTML
    pub footer_html: Option<&'a str>,
    /// Page layout options
    pub options: &'a PageOptions,
    /// Page margins
    pub margins: &'a Margins,
}

impl<'a> RenderRequest<'a> {
    /// Create a request with no content source set
    pub fn new(options: &'a PageOptions, margins: &'a Margins) -> Self {
        Self {
            html: None,
            url: None,
            header_html: None,
            footer_html: None,
            options,
            margins,
        }
    }
}

/// Captured output of one renderer invocation
#[derive(Debug)]
struct CommandOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

/// Subprocess bridge to the Playwright renderer script
///
/// One bridge value can serve many sequential render calls; concurrent
/// calls on clones are independent, each owning its own staging directory
/// and child process.
#[derive(Debug, Clone)]
pub struct NodeBridge {
    node_binary: Option<PathBuf>,
    script: PathBuf,
    timeout: Duration,
}

impl Default for NodeBridge {
    fn default() -> Self {
        Self {
            node_binary: None,
            script: default_script_path(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NodeBridge {
    /// Create a bridge with the bundled renderer script and defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit Node.js binary instead of discovery
    pub fn with_node_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.node_binary = Some(path.into());
        self
    }

    /// Use an alternative renderer entry script
    pub fn with_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.script = path.into();
        self
    }

    /// Bound the renderer invocation to the given timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Render the request and return the renderer's base64 output verbatim
    pub fn render_base64(&self, request: &RenderRequest<'_>) -> Result<String> {
        if request.html.is_some() && request.url.is_some() {
            return Err(BridgeError::ConflictingSources);
        }

        let node = self.resolve_node_binary()?;

        // Staging lives in this scope only; dropping it removes the whole
        // directory whether the invocation succeeded or not.
        let staged = StagedResources::stage(
            if request.url.is_some() {
                None
            } else {
                Some(request.html.unwrap_or_default())
            },
            request.header_html,
            request.footer_html,
        )?;

        let args = build_args(&self.script, request, &staged);
        debug!(node = %node.display(), ?args, "invoking renderer");

        let output = self.execute(&node, &args)?;
        interpret_output(output)
    }

    /// Render the request and return decoded PDF bytes
    pub fn render_raw(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>> {
        use base64::Engine;

        let encoded = self.render_base64(request)?;
        Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?)
    }

    /// Resolve the Node.js binary: explicit path, well-known install
    /// locations, then a `which`/`where` lookup
    fn resolve_node_binary(&self) -> Result<PathBuf> {
        if let Some(path) = &self.node_binary {
            return Ok(path.clone());
        }

        for candidate in well_known_node_paths() {
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        let lookup = if cfg!(windows) { "where" } else { "which" };
        let output = Command::new(lookup).arg("node").output();

        if let Ok(output) = output {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if let Some(line) = stdout.lines().next() {
                    let line = line.trim();
                    if !line.is_empty() {
                        return Ok(PathBuf::from(line));
                    }
                }
            }
        }

        Err(BridgeError::NodeNotFound)
    }

    /// Run the renderer, draining stdout/stderr while polling the deadline
    fn execute(&self, node: &Path, args: &[OsString]) -> Result<CommandOutput> {
        let mut cmd = Command::new(node);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        apply_renderer_env(&mut cmd);

        let mut child = cmd.spawn()?;

        // The base64 payload easily exceeds the pipe buffer, so both pipes
        // are drained on reader threads while the parent polls the child.
        let stdout_pipe = child.stdout.take().expect("stdout was piped");
        let stderr_pipe = child.stderr.take().expect("stderr was piped");
        let stdout_reader = std::thread::spawn(move || read_pipe(stdout_pipe));
        let stderr_reader = std::thread::spawn(move || read_pipe(stderr_pipe));

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    warn!(timeout = ?self.timeout, "renderer timed out, killing child");
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_reader.join();
                    let _ = stderr_reader.join();
                    return Err(BridgeError::Timeout(self.timeout));
                }
                None => std::thread::sleep(POLL_INTERVAL),
            }
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        Ok(CommandOutput {
            status,
            stdout,
            stderr,
        })
    }
}

fn read_pipe(mut pipe: impl Read) -> String {
    let mut buf = String::new();
    let _ = pipe.read_to_string(&mut buf);
    buf
}

/// Turn captured process output into the base64 payload or a bridge error
fn interpret_output(output: CommandOutput) -> Result<String> {
    if !output.status.success() {
        return Err(BridgeError::ProcessFailed {
            stderr: output.stderr.trim().to_string(),
        });
    }

    let encoded = output.stdout.trim();

    if encoded.is_empty() {
        return Err(BridgeError::NoOutput);
    }

    Ok(encoded.to_string())
}

/// Build the renderer argument list
///
/// Exactly one of `--filePath` and `--url` appears, matching the content
/// source; header/footer flags appear only when those files were staged.
fn build_args(
    script: &Path,
    request: &RenderRequest<'_>,
    staged: &StagedResources,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        script.into(),
        format!("--margins={}", request.margins.to_json()).into(),
        format!("--options={}", request.options.to_json()).into(),
    ];

    if let Some(url) = request.url {
        args.push("--isFromUrl=true".into());
        args.push(format!("--url={url}").into());
    } else if let Some(document) = staged.document() {
        args.push(format!("--filePath={}", document.display()).into());
    }

    if let Some(header) = staged.header() {
        args.push(format!("--headerFilePath={}", header.display()).into());
    }

    if let Some(footer) = staged.footer() {
        args.push(format!("--footerFilePath={}", footer.display()).into());
    }

    args
}

/// Environment for the renderer: a `PATH` that can find the engine's own
/// dependencies, plus Node/Playwright lookup variables passed through
fn apply_renderer_env(cmd: &mut Command) {
    if !cfg!(windows) {
        let path = std::env::var("PATH").unwrap_or_default();
        cmd.env("PATH", format!("{path}:/usr/local/bin:/opt/homebrew/bin"));
    }

    for var in ["NODE_PATH", "PLAYWRIGHT_BROWSERS_PATH"] {
        if let Ok(value) = std::env::var(var) {
            cmd.env(var, value);
        }
    }
}

/// Platform-specific well-known Node.js install locations
fn well_known_node_paths() -> Vec<PathBuf> {
    if cfg!(windows) {
        ["ProgramFiles", "ProgramFiles(x86)"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|prefix| PathBuf::from(prefix).join("nodejs").join("node.exe"))
            .collect()
    } else {
        vec![
            PathBuf::from("/usr/local/bin/node"),
            PathBuf::from("/opt/homebrew/bin/node"),
            PathBuf::from("/usr/bin/node"),
        ]
    }
}

/// Location of the bundled `playwright.cjs` entry script
fn default_script_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("bin")
        .join("playwright.cjs")
}
