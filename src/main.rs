use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdreport::{convert_file, Backend, ConvertOptions, PdfRenderer, Theme};

#[derive(Parser)]
#[command(name = "mdreport")]
#[command(about = "Convert a Markdown report to a styled PDF")]
struct Cli {
    /// Input Markdown file
    #[arg(default_value = "PROJECT_REPORT.md")]
    input: PathBuf,

    /// Output PDF file (defaults to input name with .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML theme file overriding the built-in style
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Document title (defaults to the first H1)
    #[arg(long)]
    title: Option<String>,

    /// Renderer to use instead of trying each in turn
    #[arg(long, value_parser = parse_backend)]
    backend: Option<Backend>,
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    s.parse()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.input.exists() {
        eprintln!("Error: {} not found!", cli.input.display());
        std::process::exit(1);
    }

    let theme = match &cli.theme {
        Some(path) => match Theme::load(path) {
            Ok(theme) => theme,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => Theme::default(),
    };

    // A requested backend is resolved up front; discovery across all
    // backends is left to the library.
    let renderer = match cli.backend {
        Some(backend) => match PdfRenderer::discover_backend(backend) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let options = ConvertOptions {
        theme,
        title: cli.title,
        renderer,
    };

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    println!("Converting {} to PDF...", cli.input.display());
    if let Err(e) = convert_file(&cli.input, &output, &options) {
        eprintln!("Error converting to PDF: {e}");
        std::process::exit(1);
    }
    println!("✓ Successfully created {}", output.display());
}
