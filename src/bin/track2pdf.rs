//! CLI binary for track2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to `SheetConfig`
//! and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use track2pdf::{convert_to_file, plan, ProgressCallback, RenderProgressCallback, SheetConfig};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar while cards are
/// drawn. Cards render strictly in input order, so a plain counter bar is
/// enough.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically by
    /// `on_run_start` (called once the record count is known).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading CSV…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} cards  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Rendering");
    }
}

impl RenderProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_cards: usize) {
        self.activate_bar(total_cards);
    }

    fn on_card_start(&self, card_num: usize, _total: usize) {
        self.bar.set_message(format!("card {card_num}"));
    }

    fn on_card_complete(&self, _card_num: usize, _total: usize) {
        self.bar.inc(1);
    }

    fn on_run_complete(&self, _total_cards: usize, _pages: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion
  track2pdf shipments.csv receipts.pdf

  # Three cards per row, chunkier QR modules
  track2pdf --columns 3 --qr-module-size 4 shipments.csv receipts.pdf

  # Preview the layout without writing anything
  track2pdf --dry-run shipments.csv receipts.pdf

  # Machine-readable run statistics on stdout
  track2pdf --stats-json shipments.csv receipts.pdf

CSV INPUT FORMAT:
  The first row is the header. The `tracking_number` column identifies each
  shipment and becomes the card's QR payload. Recognised columns
  (recipient_name, from_address, to_address, status, last_update, notes)
  override the placeholder details; unknown columns are carried along
  untouched.

    tracking_number,status
    TRK-0001,In Transit
    TRK-0002,Delivered

LAYOUT:
  Cards are dealt left-to-right, top-to-bottom on A4 portrait pages with a
  15 mm margin. Card width is derived from the column count; a row that no
  longer fits opens a fresh page. The defaults yield 6 cards per page.

ENVIRONMENT VARIABLES:
  TRACK2PDF_COLUMNS         Cards per row (1-6)
  TRACK2PDF_QR_MODULE_SIZE  QR module edge in pixels (1-16)
  TRACK2PDF_TITLE           Document title in the PDF metadata
  TRACK2PDF_NO_PROGRESS     Disable the progress bar
  TRACK2PDF_QUIET           Suppress all output except errors
  RUST_LOG                  Tracing filter (overrides the built-in default)
"#;

/// Generate printable shipment receipt cards (with QR codes) from a CSV.
#[derive(Parser, Debug)]
#[command(
    name = "track2pdf",
    version,
    about = "Generate printable shipment receipt cards (with QR codes) from a CSV",
    long_about = "Read a CSV of shipment tracking numbers, resolve the details for each one, and \
deal the resulting receipt cards across A4 pages, every card carrying a scannable QR code of its \
tracking number. The PDF is written atomically, so an interrupted run never leaves a torn file \
at the output path.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input CSV file with a header row.
    input: PathBuf,

    /// Output PDF path; parent directories are created as needed.
    output: PathBuf,

    /// Cards per row (1-6).
    #[arg(long, env = "TRACK2PDF_COLUMNS", default_value_t = 2,
          value_parser = clap::value_parser!(u32).range(1..=6))]
    columns: u32,

    /// QR module edge length in pixels (1-16).
    #[arg(long, env = "TRACK2PDF_QR_MODULE_SIZE", default_value_t = 3,
          value_parser = clap::value_parser!(u32).range(1..=16))]
    qr_module_size: u32,

    /// Document title recorded in the PDF metadata.
    #[arg(long, env = "TRACK2PDF_TITLE")]
    title: Option<String>,

    /// Compute and print the layout, write nothing.
    #[arg(long)]
    dry_run: bool,

    /// Print run statistics as JSON on stdout.
    #[arg(long, env = "TRACK2PDF_STATS_JSON")]
    stats_json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "TRACK2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TRACK2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TRACK2PDF_QUIET")]
    quiet: bool,
}

fn main() {
    let cli = parse_cli();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.dry_run;
    let filter = if cli.quiet || show_progress {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    // In verbose mode we always want all logs regardless of progress.
    let filter = if cli.verbose { "debug" } else { filter };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli, show_progress) {
        println!("{e}");
        std::process::exit(1);
    }
}

/// Parse arguments with the classic exit contract: help and version leave
/// with status 0, everything wrong prints to stdout and leaves with
/// status 1.
fn parse_cli() -> Cli {
    use clap::error::ErrorKind;

    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            // Usage and parse errors share stdout with the rest of the
            // console output; only decoration goes to stderr.
            print!("{}", e.render());
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, show_progress: bool) -> Result<()> {
    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn RenderProgressCallback>)
    } else {
        None
    };

    let mut builder = SheetConfig::builder()
        .columns(cli.columns as usize)
        .qr_module_px(cli.qr_module_size);
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build()?;

    // ── Dry run ──────────────────────────────────────────────────────────
    if cli.dry_run {
        let sheet = plan(&cli.input, &config)?;

        if cli.stats_json {
            let json = serde_json::json!({
                "records": sheet.records,
                "pages": sheet.pages,
                "columns": config.columns,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).context("Failed to serialise plan")?
            );
        } else {
            println!("Input:    {}", cli.input.display());
            println!("Records:  {}", sheet.records);
            println!("Pages:    {}", sheet.pages);
            println!(
                "Card:     {:.1} × {:.1} mm, {} per row",
                config.card_width().0,
                config.card_height.0,
                config.columns
            );
            println!("No output written (dry run).");
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = convert_to_file(&cli.input, &cli.output, &config)?;

    if cli.stats_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        println!("PDF created successfully: {}", cli.output.display());
    }

    // Summary line on stderr (the bar, if any, has already been cleared).
    if !cli.quiet {
        eprintln!(
            "{}  {} cards on {} pages  {}ms  →  {}",
            green("✔"),
            bold(&stats.cards.to_string()),
            stats.pages,
            stats.total_ms,
            bold(&cli.output.display().to_string()),
        );
    }

    Ok(())
}
