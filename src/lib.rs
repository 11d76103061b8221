mod error;
mod html;
mod render;
mod template;
mod theme;
mod toc;

pub use error::Error;
pub use render::{Backend, PdfRenderer};
pub use theme::Theme;

use std::fs;
use std::path::Path;

use tracing::info;

/// Conversion knobs. `Default` gives the stock report style, a title
/// taken from the document, and renderer discovery.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub theme: Theme,
    /// Overrides the title taken from the first H1.
    pub title: Option<String>,
    /// Skips discovery when set.
    pub renderer: Option<PdfRenderer>,
}

/// Convert Markdown text to an HTML body fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    html::render(markdown).html
}

/// Convert Markdown text to the complete styled HTML document.
pub fn markdown_to_document(markdown: &str, options: &ConvertOptions) -> String {
    assemble_document(markdown, options, "Document")
}

/// Convert Markdown text to PDF bytes using the stock style and a
/// discovered renderer.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>, Error> {
    markdown_to_pdf_with(markdown, &ConvertOptions::default())
}

/// Convert Markdown text to PDF bytes.
pub fn markdown_to_pdf_with(markdown: &str, options: &ConvertOptions) -> Result<Vec<u8>, Error> {
    let renderer = resolve_renderer(options)?;
    renderer.render(&markdown_to_document(markdown, options))
}

/// Convert a Markdown file to a PDF file.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> Result<(), Error> {
    if !input.exists() {
        return Err(Error::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    let markdown = fs::read_to_string(input).map_err(|source| Error::InputRead {
        path: input.to_path_buf(),
        source,
    })?;

    // A missing renderer is reported before any conversion work starts
    // and before anything is written.
    let renderer = resolve_renderer(options)?;

    let fallback = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string());
    let document = assemble_document(&markdown, options, &fallback);

    let pdf = renderer.render(&document)?;
    fs::write(output, &pdf).map_err(|source| Error::OutputWrite {
        path: output.to_path_buf(),
        source,
    })?;
    info!(
        input = %input.display(),
        output = %output.display(),
        backend = %renderer.backend(),
        bytes = pdf.len(),
        "created PDF"
    );
    Ok(())
}

fn resolve_renderer(options: &ConvertOptions) -> Result<PdfRenderer, Error> {
    match &options.renderer {
        Some(renderer) => Ok(renderer.clone()),
        None => PdfRenderer::discover(),
    }
}

/// Title precedence: explicit option, then the first H1, then `fallback`.
fn assemble_document(markdown: &str, options: &ConvertOptions, fallback: &str) -> String {
    let fragment = html::render(markdown);
    let title = options
        .title
        .as_deref()
        .or(fragment.title.as_deref())
        .unwrap_or(fallback);
    template::render_document(&fragment.html, title, &options.theme)
}
