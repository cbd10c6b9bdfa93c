//! midmark CLI - render parsed PDF mid-data to Markdown and content lists

mod config;
mod locator;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use midmark::{
    write_artifacts, ModelHints, OutputLayout, Pipe, PipeMethod, PipeOptions, PrecomputedEngine,
};

use config::Config;
use locator::{default_model_path, Locator, ManifestRecord};

#[derive(Parser)]
#[command(name = "midmark")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render parsed PDF mid-data to Markdown and content lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a local PDF using its model file
    Pdf {
        /// Input PDF file
        #[arg(long, value_name = "FILE")]
        pdf: PathBuf,

        /// Model file (defaults to the PDF path with a .json extension)
        #[arg(long, value_name = "FILE")]
        model: Option<PathBuf>,

        /// Parse method
        #[arg(long, value_enum, default_value = "auto")]
        method: MethodArg,

        /// Output root directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert the document described by a JSONL manifest record
    Json {
        /// Manifest locator, e.g. "part-01.jsonl?bytes=0,81350"
        #[arg(long, value_name = "LOCATOR")]
        json: String,

        /// Parse method
        #[arg(long, value_enum, default_value = "auto")]
        method: MethodArg,

        /// Output root directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// Let the classifier decide
    Auto,
    /// Force OCR
    Ocr,
    /// Force the text layer
    Txt,
}

impl From<MethodArg> for PipeMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Auto => PipeMethod::Auto,
            MethodArg::Ocr => PipeMethod::Ocr,
            MethodArg::Txt => PipeMethod::Txt,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pdf {
            pdf,
            model,
            method,
            output,
        } => cmd_pdf(&pdf, model.as_deref(), method.into(), output.as_deref()),
        Commands::Json {
            json,
            method,
            output,
        } => cmd_json(&json, method.into(), output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_pdf(
    pdf: &Path,
    model: Option<&Path>,
    method: PipeMethod,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = model
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_model_path(pdf));
    if !model.exists() {
        return Err(format!(
            "Model file {} not found; place it next to the PDF or pass --model",
            model.display()
        )
        .into());
    }

    let pdf_bytes =
        fs::read(pdf).map_err(|e| format!("Cannot read {}: {}", pdf.display(), e))?;
    let hints: ModelHints = serde_json::from_str(&fs::read_to_string(&model)?)
        .map_err(|e| format!("Invalid model file {}: {}", model.display(), e))?;
    let name = pdf
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| format!("Cannot derive a document name from {}", pdf.display()))?;

    convert(&name, pdf_bytes, hints, method, output)
}

fn cmd_json(
    manifest: &str,
    method: PipeMethod,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest: Locator = manifest.parse()?;
    let record = ManifestRecord::read(&manifest)?;

    let document = record.document_locator()?;
    let name = document
        .stem()
        .ok_or_else(|| format!("Cannot derive a document name from {}", record.file_location))?;
    let pdf_bytes = document.read()?;

    convert(&name, pdf_bytes, record.doc_layout_result, method, output)
}

fn convert(
    name: &str,
    pdf_bytes: Vec<u8>,
    hints: ModelHints,
    method: PipeMethod,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let layout = OutputLayout::prepare(config.output_root(output), name, method)?;

    let engine = Arc::new(PrecomputedEngine::for_hints(&hints));
    let options = PipeOptions::new().with_debug(log::log_enabled!(log::Level::Debug));
    let mut pipe = match method {
        PipeMethod::Auto => Pipe::universal(pdf_bytes, hints, engine.clone(), engine),
        PipeMethod::Ocr => Pipe::ocr(pdf_bytes, hints, engine),
        PipeMethod::Txt => Pipe::txt(pdf_bytes, hints, engine),
    }
    .with_options(options);

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Classifying...");
    let pdf_type = pipe.classify()?;
    pb.inc(1);

    pb.set_message(format!("Parsing as {}...", pdf_type));
    let pages = pipe.parse()?.page_count();
    pb.inc(1);

    pb.set_message("Writing output...");
    let paths = write_artifacts(&mut pipe, &layout)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} ({} pages, {})",
        "Converted".green().bold(),
        name,
        pages,
        pdf_type
    );
    println!("{} {}", "Output files in".green(), layout.dir().display());
    for (branch, path) in [
        ("├─", paths.markdown.as_path()),
        ("├─", paths.mid_data.as_path()),
        ("├─", paths.content_list.as_path()),
        ("└─", layout.image_dir()),
    ] {
        let file = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), file);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "midmark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF mid-data to Markdown renderer");
    println!();
    println!("License: MIT");
}
