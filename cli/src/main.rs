//! pdfdigest CLI - batch PDF summarization tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfdigest::{BatchOptions, BatchProcessor, BatchReport, FileStatus, JsonFormat};

#[derive(Parser)]
#[command(name = "pdfdigest")]
#[command(version)]
#[command(about = "Summarize a directory of PDF files into JSON", long_about = None)]
struct Cli {
    /// Directory containing the PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDFDIGEST_INPUT", default_value = "/app/input")]
    input: PathBuf,

    /// Directory receiving one JSON file per PDF
    #[arg(value_name = "OUTPUT_DIR", env = "PDFDIGEST_OUTPUT", default_value = "/app/output")]
    output: PathBuf,

    /// Maximum number of files processed at once
    #[arg(short, long, default_value_t = pdfdigest::batch::DEFAULT_MAX_WORKERS)]
    workers: usize,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a single PDF file
    Summarize {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Summarize {
            ref input,
            ref output,
            compact,
        }) => cmd_summarize(input, output.as_deref(), compact),
        None => cmd_batch(&cli),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_batch(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = BatchOptions::new(&cli.input, &cli.output)
        .with_max_workers(cli.workers)
        .with_json_format(json_format(cli.compact));
    let processor = BatchProcessor::new(options);

    let files = processor.discover()?;
    let total = files.len() as u64;
    log::debug!("{} PDF files in {}", total, cli.input.display());
    let pb = if cli.quiet || total == 0 {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = processor.run_files(files, |outcome| {
        pb.set_message(outcome.file_name());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    print_summary(&report, &cli.output);
    Ok(())
}

fn print_summary(report: &BatchReport, output_dir: &Path) {
    println!("\n{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Files".bold(), report.total_files());
    println!(
        "{}: {}",
        "Processed".bold(),
        report.processed_count.to_string().green()
    );

    let errors = report.error_count.to_string();
    if report.error_count > 0 {
        println!("{}: {}", "Errors".bold(), errors.red());
    } else {
        println!("{}: {}", "Errors".bold(), errors);
    }

    println!(
        "{}: {:.2}s ({:.2}s per file)",
        "Time".bold(),
        report.elapsed.as_secs_f64(),
        report.average_per_file().as_secs_f64()
    );
    println!("{}: {}", "Output".bold(), output_dir.display());

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!("\n{}", "Failed files:".red().bold());
        for (i, outcome) in failures.iter().enumerate() {
            let branch = if i + 1 == failures.len() { "└─" } else { "├─" };
            if let FileStatus::Failed { reason } = &outcome.status {
                println!("  {} {} {}", branch.dimmed(), outcome.file_name(), reason.dimmed());
            }
        }
    }
}

fn cmd_summarize(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = pdfdigest::to_json(input, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
