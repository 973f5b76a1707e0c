//! pdfoutline CLI - PDF title and heading outline extraction

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::{
    render, try_extract_outline_file, validate_json, BatchOptions, BatchProcessor, BatchSummary,
    ExtractOptions, JsonFormat, OutlineEngine, PdfSpanExtractor,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract titles and heading outlines from PDF files", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Run(RunArgs),

    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the font profile and hierarchy decisions for a PDF
    Fonts {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Validate outline JSON files
    Validate {
        /// Result files to check
        #[arg(value_name = "JSON", required = true)]
        files: Vec<PathBuf>,

        /// Page cap the results were produced with
        #[arg(long, default_value = "50")]
        max_pages: u32,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ExtractArgs {
    /// Maximum number of pages to analyse per document
    #[arg(long, env = "PDFOUTLINE_MAX_PAGES", default_value = "50")]
    max_pages: u32,

    /// Skip pages whose content cannot be read instead of failing the document
    #[arg(long)]
    lenient: bool,
}

impl From<&ExtractArgs> for ExtractOptions {
    fn from(args: &ExtractArgs) -> Self {
        let options = ExtractOptions::new().with_max_pages(args.max_pages);
        if args.lenient {
            options.lenient()
        } else {
            options
        }
    }
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDFOUTLINE_INPUT", default_value = "/app/input")]
    input: PathBuf,

    /// Directory for JSON results
    #[arg(value_name = "OUTPUT_DIR", env = "PDFOUTLINE_OUTPUT", default_value = "/app/output")]
    output: PathBuf,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Process one document at a time
    #[arg(long)]
    sequential: bool,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Also write batch_summary.json
    #[arg(long)]
    summary: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Extract {
            input,
            output,
            extract,
            compact,
        }) => cmd_extract(&input, output.as_deref(), &extract, compact),
        Some(Commands::Fonts { input, extract }) => cmd_fonts(&input, &extract),
        Some(Commands::Validate { files, max_pages }) => cmd_validate(&files, max_pages),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        // Default behavior: batch over the input directory
        None => cmd_run(&cli.run),
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

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new()
        .with_extract_options((&args.extract).into())
        .with_json_format(json_format(args.compact))
        .with_summary(args.summary);
    if args.sequential {
        options = options.sequential();
    }

    log::debug!(
        "Batch {} -> {} (max {} pages)",
        args.input.display(),
        args.output.display(),
        args.extract.max_pages
    );
    let files = BatchProcessor::new(options.clone()).discover(&args.input)?;
    if files.is_empty() {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            args.input.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let progress = pb.clone();
    let processor = BatchProcessor::new(options).with_progress(move |report| {
        let name = report
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.set_message(name);
        progress.inc(1);
    });

    let summary = processor.run(&args.input, &args.output)?;
    pb.finish_and_clear();

    print_summary(&summary, &args.output);
    Ok(())
}

fn print_summary(summary: &BatchSummary, output: &Path) {
    for report in &summary.reports {
        let name = report.input.display();
        match &report.error {
            Some(e) => println!("  {} {} {}", "✗".red(), name, e.dimmed()),
            None => println!(
                "  {} {} {}",
                "✓".green(),
                name,
                format!("({} pages, {} headings)", report.pages, report.headings).dimmed()
            ),
        }
    }

    println!();
    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Documents".bold(), summary.documents);
    println!("{}: {}", "Succeeded".bold(), summary.succeeded().to_string().green());
    if summary.failed > 0 {
        println!("{}: {}", "Failed".bold(), summary.failed.to_string().red());
    }
    println!("{}: {}", "Pages".bold(), summary.total_pages);
    println!("{}: {}", "Headings".bold(), summary.total_headings);
    println!(
        "{}: {:.2}s ({:.1} pages/s)",
        "Elapsed".bold(),
        summary.elapsed_secs,
        summary.pages_per_second
    );
    println!("{}: {}", "Output".bold(), output.display());
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    extract: &ExtractArgs,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = try_extract_outline_file(input, &extract.into())?;
    let json = render::to_json(&result, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_fonts(input: &Path, extract: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = PdfSpanExtractor::open(input)?;
    let analysis = OutlineEngine::new(extract.into()).analyze(&extractor)?;

    println!("{}", "Font Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), extractor.backend().version());
    println!();
    print!("{}", render::profile_report(&analysis));

    Ok(())
}

fn cmd_validate(files: &[PathBuf], max_pages: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut failed = 0;
    for path in files {
        let json = fs::read_to_string(path)?;
        let violations = validate_json(&json, max_pages);
        if violations.is_empty() {
            println!("{} {}", "PASS".green().bold(), path.display());
        } else {
            failed += 1;
            println!("{} {}", "FAIL".red().bold(), path.display());
            for v in &violations {
                println!("  {} {}", "-".dimmed(), v);
            }
        }
    }

    println!();
    if failed > 0 {
        return Err(format!("{} of {} files failed validation", failed, files.len()).into());
    }
    println!("{} {} files valid", "Done!".green().bold(), files.len());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction");
}
