//! CLI binary for docknife.
//!
//! A thin shim over the library crate that maps each subcommand to its
//! conversion function and prints results.

use anyhow::Result;
use clap::{Parser, Subcommand};
use docknife::{
    docx_to_pdf, image_to_pdf, merge_pdfs, pdf_to_docx, pdf_to_xlsx, split_pdf, PageRange,
    TableMode,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # PDF text into a Word document
  docknife pdf2docx report.pdf report.docx

  # Word document typeset back into a PDF
  docknife docx2pdf notes.docx notes.pdf

  # Tables into a spreadsheet (one sheet per table)
  docknife pdf2xlsx invoice.pdf invoice.xlsx
  docknife pdf2xlsx borderless.pdf out.xlsx --mode stream

  # Photo into a one-page PDF
  docknife img2pdf scan.jpg scan.pdf

  # Concatenate, in argument order
  docknife mergepdf a.pdf b.pdf c.pdf combined.pdf

  # Pages 2 through 4 (inclusive, 1-indexed)
  docknife splitpdf book.pdf 2 4 chapter.pdf

ENVIRONMENT VARIABLES:
  DOCKNIFE_VERBOSE   Enable DEBUG-level tracing logs
  DOCKNIFE_QUIET     Suppress all output except errors
  RUST_LOG           Override the log filter entirely
"#;

/// Everyday document conversions behind one binary.
#[derive(Parser, Debug)]
#[command(
    name = "docknife",
    version,
    about = "Convert between PDF, DOCX, XLSX and images",
    long_about = "A small multi-tool for the document conversions that come up every day: \
PDF to DOCX and back, table extraction to XLSX, image-to-PDF packaging, and PDF merge/split. \
Every run is one conversion: read the inputs, write exactly one output file, exit.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "DOCKNIFE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "DOCKNIFE_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract PDF text into a DOCX (layout is not preserved).
    Pdf2docx {
        /// Input PDF file.
        input: PathBuf,
        /// Output DOCX file.
        output: PathBuf,
    },

    /// Typeset DOCX paragraph text onto A4 PDF pages.
    Docx2pdf {
        /// Input DOCX file.
        input: PathBuf,
        /// Output PDF file.
        output: PathBuf,
    },

    /// Extract tables into an XLSX workbook, one sheet per table.
    Pdf2xlsx {
        /// Input PDF file.
        input: PathBuf,
        /// Output XLSX file (not created when no tables are found).
        output: PathBuf,
        /// Detection mode: lattice follows drawn cell borders, stream
        /// infers columns from text alignment in borderless tables.
        #[arg(long, value_enum, default_value = "lattice")]
        mode: ModeArg,
    },

    /// Pack a JPEG or PNG into a one-page PDF sized to the image.
    Img2pdf {
        /// Input image file (JPEG or PNG).
        input: PathBuf,
        /// Output PDF file.
        output: PathBuf,
    },

    /// Concatenate PDFs in argument order; the last path is the output.
    Mergepdf {
        /// Input PDF files followed by the output PDF file.
        #[arg(required = true, num_args = 2.., value_name = "PDF... OUTPUT")]
        files: Vec<PathBuf>,
    },

    /// Copy an inclusive 1-indexed page range into a new PDF.
    Splitpdf {
        /// Input PDF file.
        input: PathBuf,
        /// First page to keep (1-indexed).
        start: usize,
        /// Last page to keep (inclusive).
        end: usize,
        /// Output PDF file.
        output: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Lattice,
    Stream,
}

impl From<ModeArg> for TableMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Lattice => TableMode::Lattice,
            ModeArg::Stream => TableMode::Stream,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", red("✘"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Pdf2docx { input, output } => {
            let paragraphs = pdf_to_docx(input, output)?;
            done(
                cli,
                &format!(
                    "{} {}  {}",
                    bold(&output.display().to_string()),
                    dim(&format!("({paragraphs} paragraphs)")),
                    dim("pdf → docx"),
                ),
            );
        }
        Command::Docx2pdf { input, output } => {
            let pages = docx_to_pdf(input, output)?;
            done(
                cli,
                &format!(
                    "{} {}  {}",
                    bold(&output.display().to_string()),
                    dim(&format!("({pages} pages)")),
                    dim("docx → pdf"),
                ),
            );
        }
        Command::Pdf2xlsx {
            input,
            output,
            mode,
        } => {
            let tables = pdf_to_xlsx(input, output, (*mode).into())?;
            if tables == 0 {
                // Soft outcome: nothing to extract is not a failure.
                if !cli.quiet {
                    eprintln!(
                        "{} no tables detected in {} — no output written",
                        cyan("⚠"),
                        bold(&input.display().to_string()),
                    );
                }
            } else {
                done(
                    cli,
                    &format!(
                        "{} {}",
                        bold(&output.display().to_string()),
                        dim(&format!("({tables} tables)")),
                    ),
                );
            }
        }
        Command::Img2pdf { input, output } => {
            let (w, h) = image_to_pdf(input, output)?;
            done(
                cli,
                &format!(
                    "{} {}",
                    bold(&output.display().to_string()),
                    dim(&format!("({w}x{h} px)")),
                ),
            );
        }
        Command::Mergepdf { files } => {
            // Last path is the output; everything before it is an input.
            let (output, inputs) = files
                .split_last()
                .ok_or_else(|| anyhow::anyhow!("mergepdf needs at least one input and an output"))?;
            let stats = merge_pdfs(inputs, output)?;
            done(
                cli,
                &format!(
                    "{} {}",
                    bold(&output.display().to_string()),
                    dim(&format!(
                        "({} files, {} pages)",
                        stats.input_files, stats.pages
                    )),
                ),
            );
        }
        Command::Splitpdf {
            input,
            start,
            end,
            output,
        } => {
            let range = PageRange::new(*start, *end)?;
            let pages = split_pdf(input, range, output)?;
            done(
                cli,
                &format!(
                    "{} {}",
                    bold(&output.display().to_string()),
                    dim(&format!("(pages {start}-{end}, {pages} kept)")),
                ),
            );
        }
    }
    Ok(())
}

/// Print the standard success line unless `--quiet`.
fn done(cli: &Cli, msg: &str) {
    if !cli.quiet {
        eprintln!("{} {msg}", green("✔"));
    }
}
