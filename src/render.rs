//! External HTML-to-PDF renderer boundary.
//!
//! Rendering shells out to WeasyPrint or wkhtmltopdf. The HTML is
//! staged in a temporary file and the PDF comes back on the child's
//! stdout, so no renderer-specific library binding is needed.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

use tracing::debug;

use crate::error::Error;

/// A supported renderer program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    WeasyPrint,
    WkHtmlToPdf,
}

impl Backend {
    /// Discovery order. WeasyPrint comes first.
    pub const ALL: [Backend; 2] = [Backend::WeasyPrint, Backend::WkHtmlToPdf];

    /// Program name probed on `PATH`.
    pub fn program(self) -> &'static str {
        match self {
            Backend::WeasyPrint => "weasyprint",
            Backend::WkHtmlToPdf => "wkhtmltopdf",
        }
    }

    /// Environment variable that overrides the program location.
    pub fn env_var(self) -> &'static str {
        match self {
            Backend::WeasyPrint => "WEASYPRINT_BIN",
            Backend::WkHtmlToPdf => "WKHTMLTOPDF_BIN",
        }
    }

    /// Arguments that read `input` and write the PDF to stdout.
    fn args(self, input: &Path) -> Vec<OsString> {
        match self {
            Backend::WeasyPrint => vec![input.into(), "-".into()],
            Backend::WkHtmlToPdf => vec!["--quiet".into(), input.into(), "-".into()],
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weasyprint" => Ok(Backend::WeasyPrint),
            "wkhtmltopdf" => Ok(Backend::WkHtmlToPdf),
            other => Err(format!(
                "unknown backend '{other}' (expected weasyprint or wkhtmltopdf)"
            )),
        }
    }
}

/// A resolved renderer: a backend plus the program to invoke.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    backend: Backend,
    program: PathBuf,
}

impl PdfRenderer {
    pub fn new(backend: Backend, program: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            program: program.into(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Find any usable renderer, in [`Backend::ALL`] order.
    pub fn discover() -> Result<Self, Error> {
        Self::discover_among(&Backend::ALL)
    }

    /// Find a specific backend or fail.
    pub fn discover_backend(backend: Backend) -> Result<Self, Error> {
        Self::discover_among(&[backend])
    }

    /// Environment overrides win over `PATH` probes, across all
    /// candidates. An override is trusted as-is so it can point at a
    /// wrapper script.
    fn discover_among(backends: &[Backend]) -> Result<Self, Error> {
        for &backend in backends {
            if let Some(program) = env::var_os(backend.env_var()) {
                let program = PathBuf::from(program);
                debug!(%backend, program = %program.display(), "renderer from environment");
                return Ok(Self::new(backend, program));
            }
        }
        for &backend in backends {
            if probe(backend.program()) {
                debug!(%backend, "renderer found on PATH");
                return Ok(Self::new(backend, backend.program()));
            }
        }
        let tried = backends
            .iter()
            .map(|b| b.program())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::RendererNotFound { tried })
    }

    /// Render `html` to PDF bytes.
    pub fn render(&self, html: &str) -> Result<Vec<u8>, Error> {
        let mut staged = tempfile::Builder::new()
            .prefix("mdreport-")
            .suffix(".html")
            .tempfile()
            .map_err(|e| self.stage_error(e))?;
        staged
            .write_all(html.as_bytes())
            .map_err(|e| self.stage_error(e))?;

        debug!(backend = %self.backend, input = %staged.path().display(), "rendering PDF");
        let output = Command::new(&self.program)
            .args(self.backend.args(staged.path()))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::RendererSpawn {
                backend: self.backend,
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::RendererFailed {
                backend: self.backend,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !output.stdout.starts_with(b"%PDF") {
            return Err(Error::RendererOutputInvalid {
                backend: self.backend,
                magic: output.stdout.iter().copied().take(4).collect(),
            });
        }
        Ok(output.stdout)
    }

    fn stage_error(&self, source: std::io::Error) -> Error {
        Error::RendererStage {
            backend: self.backend,
            source,
        }
    }
}

fn probe(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
