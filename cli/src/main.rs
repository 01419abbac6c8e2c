//! unpage CLI - HTML page region extraction tool

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unpage::archive::{extract_archive, list_files};
use unpage::pipeline::DEFAULT_OUTPUT_DIR;
use unpage::{ExtractOptions, Outcome, PageMap, Pipeline, RegionLocator, RunSummary, Strategy};

#[derive(Parser)]
#[command(name = "unpage")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract page regions from HTML documents into standalone files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every configured page into <OUT>/<slot>/index.html
    Pages(PagesArgs),

    /// Print one page region to stdout
    Show {
        /// Source HTML document
        #[arg(value_name = "SOURCE", env = "UNPAGE_SOURCE")]
        source: PathBuf,

        /// Page identifier (value of the id attribute)
        #[arg(value_name = "ID")]
        identifier: String,

        /// Locator strategy
        #[arg(long, value_enum, default_value = "structural")]
        strategy: LocatorKind,
    },

    /// Extract a ZIP archive and list its files
    Unzip {
        /// ZIP archive
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Target directory (defaults to the archive name without extension)
        #[arg(value_name = "DIR")]
        target: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct PagesArgs {
    /// Source HTML document
    #[arg(value_name = "SOURCE", env = "UNPAGE_SOURCE")]
    source: PathBuf,

    /// Output base directory
    #[arg(short, long, value_name = "DIR", env = "UNPAGE_OUT", default_value = DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// JSON page map ({"id": "slot", ...})
    #[arg(short, long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Page to extract as ID or ID=SLOT (repeatable)
    #[arg(short, long = "page", value_name = "ID[=SLOT]")]
    pages: Vec<String>,

    /// Locator strategy
    #[arg(long, value_enum, default_value = "structural")]
    strategy: LocatorKind,

    /// Write the raw region instead of a standalone document
    #[arg(long)]
    raw: bool,

    /// Assemble and write pages in parallel
    #[arg(long)]
    parallel: bool,

    /// Create missing slot directories
    #[arg(long)]
    create_dirs: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Exit with status 2 unless every page was written
    #[arg(long)]
    strict: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LocatorKind {
    /// Parse the document into a tree (default)
    Structural,
    /// Scan the raw text with balanced tag matching
    Pattern,
}

impl From<LocatorKind> for Strategy {
    fn from(kind: LocatorKind) -> Self {
        match kind {
            LocatorKind::Structural => Strategy::Structural,
            LocatorKind::Pattern => Strategy::Pattern,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pages(args) => cmd_pages(&args),
        Commands::Show {
            source,
            identifier,
            strategy,
        } => cmd_show(&source, &identifier, strategy).map(|()| true),
        Commands::Unzip { archive, target } => {
            cmd_unzip(&archive, target.as_deref()).map(|()| true)
        }
        Commands::Version => {
            cmd_version();
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when `--strict` is set and some page was not written.
fn cmd_pages(args: &PagesArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let pages = build_page_map(args.map.as_deref(), &args.pages)?;
    log::debug!("{} pages configured, writing under {}", pages.len(), args.out.display());

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Loading source...");
    let doc = unpage::load_file(&args.source)?;
    pb.inc(1);

    pb.set_message(format!("Extracting {} pages...", pages.len()));
    let options = ExtractOptions::new()
        .with_strategy(args.strategy.into())
        .with_assemble(!args.raw)
        .with_parallel(args.parallel)
        .with_output_dir(&args.out)
        .with_create_dirs(args.create_dirs);
    let summary = Pipeline::new(options).run(&doc, &pages)?;
    pb.inc(1);
    pb.finish_and_clear();

    if args.json {
        println!("{}", summary.to_json()?);
    } else {
        print_summary(&summary);
    }

    Ok(!args.strict || summary.is_complete())
}

fn build_page_map(
    map: Option<&Path>,
    pairs: &[String],
) -> Result<PageMap, Box<dyn std::error::Error>> {
    let mut pages = match map {
        Some(path) => PageMap::from_json_file(path)?,
        None => PageMap::new(),
    };
    for pair in pairs {
        pages.push(unpage::PageSpec::parse(pair)?)?;
    }

    if pages.is_empty() {
        return Err("no pages configured: use --map FILE or --page ID[=SLOT]".into());
    }
    Ok(pages)
}

fn print_summary(summary: &RunSummary) {
    for result in &summary.results {
        match &result.outcome {
            Outcome::Written { path, .. } => println!(
                "{} {} to {}",
                "Extracted".green(),
                result.identifier,
                path.display()
            ),
            Outcome::NotFound => println!(
                "{} {} page",
                "Could not find".yellow(),
                result.identifier
            ),
            Outcome::Failed { message, .. } => println!(
                "{} {}: {}",
                "Failed".red(),
                result.identifier,
                message
            ),
        }
    }

    println!("\n{} {}", "Done!".green().bold(), summary);
}

fn cmd_show(
    source: &Path,
    identifier: &str,
    strategy: LocatorKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = unpage::load_file(source)?;
    let strategy = Strategy::from(strategy);
    let locator = strategy.locator(&doc, unpage::LocateOptions::default())?;
    let region = locator.require(identifier)?;

    eprintln!(
        "{}: {} ({})",
        "Title".bold(),
        region.display_title(),
        locator.name().dimmed()
    );
    if let Some(span) = &region.span {
        eprintln!("{}: {}..{}", "Bytes".bold(), span.start, span.end);
    }
    println!("{}", region.content);

    Ok(())
}

fn cmd_unzip(archive: &Path, target: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let target_dir = target.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = archive.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(stem.into_owned())
    });

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Extracting {}...", archive.display()));
    let inventory = extract_archive(archive, &target_dir)?;
    pb.finish_and_clear();

    println!("{}", "Contents of zip file:".cyan().bold());
    for entry in &inventory.entries {
        println!("  {} {}", "-".dimmed(), entry.name);
    }
    println!("\n{} {}", "Extracted to:".green(), target_dir.display());

    println!("\n{}", "Extracted files:".cyan().bold());
    for file in list_files(&target_dir)? {
        let name = file
            .path
            .strip_prefix(&target_dir)
            .unwrap_or(&file.path)
            .display();
        println!("  {} {} ({} bytes)", "-".dimmed(), name, file.size);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unpage".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML page region extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unpage".dimmed());
    println!("License: MIT");
}
