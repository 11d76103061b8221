use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::render::Backend;

/// All errors surfaced by the conversion pipeline.
///
/// The CLI maps any of these to a printed message and exit code 1.
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist. Reported before anything is transformed.
    #[error("input file not found: '{path}'")]
    InputNotFound { path: PathBuf },

    /// Input exists but could not be read as UTF-8 text.
    #[error("failed to read '{path}': {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Theme file could not be read.
    #[error("failed to read theme '{path}': {source}")]
    ThemeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Theme file is not valid TOML for the theme schema.
    #[error("invalid theme '{path}': {source}")]
    ThemeParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No usable renderer program was found.
    #[error(
        "no PDF renderer found (tried: {tried})\n\
         Install WeasyPrint (pip install weasyprint) or wkhtmltopdf, or point\n\
         WEASYPRINT_BIN / WKHTMLTOPDF_BIN at an existing binary."
    )]
    RendererNotFound { tried: String },

    /// Could not stage the HTML document for the renderer.
    #[error("failed to stage HTML for {backend}: {source}")]
    RendererStage {
        backend: Backend,
        #[source]
        source: std::io::Error,
    },

    /// The renderer program could not be started.
    #[error("failed to run {backend} ('{program}'): {source}")]
    RendererSpawn {
        backend: Backend,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran but exited unsuccessfully.
    #[error("{backend} failed ({status}): {stderr}")]
    RendererFailed {
        backend: Backend,
        status: ExitStatus,
        stderr: String,
    },

    /// The renderer exited successfully but its output is not a PDF.
    #[error("{backend} did not produce a PDF (output began with {magic:?})")]
    RendererOutputInvalid { backend: Backend, magic: Vec<u8> },

    /// The produced PDF could not be written to the output path.
    #[error("failed to write '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
