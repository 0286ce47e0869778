//! CLI binary for fileshift-client.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ClientConfig`, builds the form state from the arguments, and renders
//! submission feedback on the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fileshift_client::{
    submit, ApiClient, ClientConfig, FeedbackSink, FileHandle, FormState, MessageKind, NumberBase,
    OperationKind, Presentation, RemoteImageStrategy, SubmissionReport,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
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

// ── Terminal feedback sink using indicatif ───────────────────────────────────

/// Renders submission feedback as log lines above a live spinner.
///
/// The spinner is the loading indicator; status messages are printed
/// through the bar so they never tear into the spinner line.
struct CliFeedback {
    bar: ProgressBar,
}

impl CliFeedback {
    fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        Self { bar }
    }
}

impl FeedbackSink for CliFeedback {
    fn show(&self, _scope: OperationKind, kind: MessageKind, text: &str) {
        let line = match kind {
            MessageKind::Info => format!("{} {}", cyan("◆"), text),
            MessageKind::Success => format!("{} {}", green("✓"), text),
            MessageKind::Error => format!("{} {}", red("✗"), red(text)),
        };
        self.bar.println(line);
    }

    fn show_loading(&self) {
        self.bar.set_message("working…");
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn hide_loading(&self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a local image (result saved in the current directory)
  fileshift image photo.webp

  # Convert a remote image
  fileshift image --url https://example.com/photo.webp

  # Convert a document, saving into a downloads directory
  fileshift document report.docx -o ~/Downloads

  # Convert a number from decimal to hexadecimal (the defaults)
  fileshift base 255

  # Binary to octal, with the solution steps printed
  fileshift base 101101 --from binary --to octal

  # Talk to a remote server, machine-readable report
  fileshift --server https://convert.example.com --json image photo.png

ENVIRONMENT VARIABLES:
  FILESHIFT_SERVER       Conversion server base URL
  FILESHIFT_OUTPUT_DIR   Directory converted files are saved into

The server fetches nothing itself by default: image URLs are downloaded by
this client and uploaded as bytes. Pass --send-url to hand the URL to the
server instead.
"#;

/// Convert images, documents, and numbers via a FileShift server.
#[derive(Parser, Debug)]
#[command(
    name = "fileshift",
    version,
    about = "Convert images, documents, and numbers via a FileShift server",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Conversion server base URL.
    #[arg(
        long,
        global = true,
        env = "FILESHIFT_SERVER",
        default_value = "http://127.0.0.1:5000"
    )]
    server: String,

    /// Directory converted files are saved into.
    #[arg(
        short,
        long,
        global = true,
        env = "FILESHIFT_OUTPUT_DIR",
        default_value = "."
    )]
    output_dir: PathBuf,

    /// Conversion request timeout in seconds.
    #[arg(long, global = true, default_value_t = 60)]
    timeout: u64,

    /// Which front-end presentation mode to mirror (affects the default
    /// image filename when the server suggests none).
    #[arg(long, global = true, value_enum, default_value = "classic")]
    presentation: PresentationArg,

    /// Send image URLs to the server as references instead of downloading
    /// the bytes locally first.
    #[arg(long, global = true)]
    send_url: bool,

    /// Print the submission report as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Disable the spinner and status lines.
    #[arg(long, global = true)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an image file or a remote image URL.
    Image {
        /// Local image file.
        file: Option<PathBuf>,
        /// Remote image URL (ignored when FILE is given).
        #[arg(long)]
        url: Option<String>,
    },
    /// Convert a document (PDF ⇄ DOC/DOCX).
    Document {
        /// Local document file.
        file: PathBuf,
    },
    /// Convert a numeric string between bases.
    Base {
        /// The number to convert.
        value: String,
        /// Source base.
        #[arg(long, value_enum, default_value = "decimal")]
        from: BaseArg,
        /// Target base.
        #[arg(long, value_enum, default_value = "hexadecimal")]
        to: BaseArg,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PresentationArg {
    Classic,
    Modern,
}

impl From<PresentationArg> for Presentation {
    fn from(v: PresentationArg) -> Self {
        match v {
            PresentationArg::Classic => Presentation::Classic,
            PresentationArg::Modern => Presentation::Modern,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum BaseArg {
    Binary,
    Decimal,
    Octal,
    Hexadecimal,
}

impl From<BaseArg> for NumberBase {
    fn from(v: BaseArg) -> Self {
        match v {
            BaseArg::Binary => NumberBase::Binary,
            BaseArg::Decimal => NumberBase::Decimal,
            BaseArg::Octal => NumberBase::Octal,
            BaseArg::Hexadecimal => NumberBase::Hexadecimal,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the feedback lines are live;
    // they already tell the user everything that matters.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and client ──────────────────────────────────────────
    let config = ClientConfig::builder()
        .base_url(&cli.server)
        .request_timeout_secs(cli.timeout)
        .presentation(cli.presentation.into())
        .remote_image(if cli.send_url {
            RemoteImageStrategy::Reference
        } else {
            RemoteImageStrategy::Materialize
        })
        .download_dir(&cli.output_dir)
        .build()
        .context("Invalid configuration")?;

    let client = ApiClient::new(&config).context("Failed to build HTTP client")?;

    // ── Build the form from the arguments ────────────────────────────────
    let mut form = FormState::new();
    let kind = match &cli.command {
        Command::Image { file, url } => {
            if let Some(path) = file {
                let handle = FileHandle::from_path(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                form.choose_image_file(handle);
            } else if let Some(url) = url {
                form.enter_image_url(url.clone());
            }
            OperationKind::Image
        }
        Command::Document { file } => {
            let handle = FileHandle::from_path(file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            form.choose_document_file(handle);
            OperationKind::Document
        }
        Command::Base { value, from, to } => {
            form.enter_base_input(value.clone());
            form.select_bases((*from).into(), (*to).into());
            OperationKind::Base
        }
    };

    // ── Run the submission ───────────────────────────────────────────────
    let report = if show_progress {
        let feedback = CliFeedback::new();
        submit(kind, &mut form, &client, &config, &feedback).await
    } else {
        submit(
            kind,
            &mut form,
            &client,
            &config,
            &fileshift_client::NoopFeedback,
        )
        .await
    };

    render_report(&cli, &report)?;

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the terminal summary (or the JSON report).
fn render_report(cli: &Cli, report: &SubmissionReport) -> Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialise report")?
        );
        return Ok(());
    }

    if cli.quiet {
        return Ok(());
    }

    // Without the live feedback sink, the terminal message has not been
    // printed yet.
    if cli.no_progress {
        if let Some(message) = report.message() {
            let glyph = if report.is_success() {
                green("✓")
            } else {
                red("✗")
            };
            eprintln!("{glyph} {message}");
        }
    }

    if let Some(path) = &report.saved_to {
        eprintln!(
            "{}  {}  {}",
            green("✔"),
            bold(&path.display().to_string()),
            dim(&format!("{}ms", report.duration_ms)),
        );
    }

    if let Some(numeric) = &report.numeric {
        println!("{}", numeric.result);
        if !numeric.solution.is_empty() {
            eprintln!("{}", dim(&numeric.solution));
        }
    }

    Ok(())
}
