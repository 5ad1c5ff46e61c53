use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use markivet::config::Settings;
use markivet::progress::{BarProgress, NoProgress, Progress};
use markivet::{Collection, DatePolicy, LoadOptions, LoadReport, SaveOutcome, Source};

#[derive(Parser)]
#[command(name = "markivet", about = "Convert Retriever Mediearkivet TXT exports into JSON")]
struct Cli {
    /// Log every file and article block
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log warnings and errors, no progress bar
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse exports and save the articles as a JSON array
    Convert {
        #[command(flatten)]
        input: InputArgs,
        /// JSON file to write
        #[arg(short, long)]
        output: PathBuf,
        /// Remove duplicate articles
        #[arg(long)]
        dedupe: bool,
        /// Number articles from 1 in output order
        #[arg(long)]
        ids: bool,
    },
    /// Show counts, missing fields and date range
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print a summary of the first articles
    Show {
        #[command(flatten)]
        input: InputArgs,
        /// Max articles to display
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Export files or glob patterns (e.g. "exports/*.txt")
    #[arg(required = true)]
    inputs: Vec<String>,
    /// Stop at the first unreadable file
    #[arg(long)]
    strict: bool,
    /// Reject articles whose date cannot be parsed
    #[arg(long)]
    strict_dates: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;
    init_tracing(settings.verbose || cli.verbose, cli.quiet);

    let t0 = Instant::now();

    let result: anyhow::Result<usize> = match cli.command {
        Commands::Convert {
            input,
            output,
            dedupe,
            ids,
        } => {
            let (mut collection, report) = load_all(&input, &settings)?;
            if dedupe {
                let progress = progress(cli.quiet);
                collection.dedupe(progress.as_ref());
            }
            if ids {
                collection.assign_sequence_ids();
            }
            match collection.save(&output)? {
                SaveOutcome::Empty => println!("Nothing to save."),
                SaveOutcome::Written(n) => println!("Saved {} articles to {}", n, output.display()),
            }
            print_failures(&report);
            println!("{collection}");
            Ok(collection.len())
        }
        Commands::Stats { input } => {
            let (collection, report) = load_all(&input, &settings)?;
            let (earliest, latest) = collection.date_span();
            let show = |d: Option<chrono::NaiveDateTime>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
            println!("{collection}");
            println!("Files:      {}", report.files);
            println!("Articles:   {}", collection.len());
            println!("Missing:    {}", collection.missing_count());
            println!("Failed:     {}", report.failed);
            println!("Unreadable: {}", report.unreadable.len());
            println!("Earliest:   {}", show(earliest));
            println!("Latest:     {}", show(latest));
            Ok(collection.len())
        }
        Commands::Show { input, limit } => {
            let (collection, report) = load_all(&input, &settings)?;
            for article in collection.iter().take(limit) {
                println!("{article}");
                println!("{}\n", article.summary());
            }
            print_failures(&report);
            println!("{collection}");
            Ok(collection.len())
        }
    };

    let articles = result?;
    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", timing(elapsed, articles));
    }
    Ok(())
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load every input into one collection. CLI flags tighten the settings.
fn load_all(input: &InputArgs, settings: &Settings) -> anyhow::Result<(Collection, LoadReport)> {
    let strict = settings.strict || input.strict;
    let date_policy = if input.strict_dates {
        DatePolicy::Strict
    } else {
        settings.date_policy
    };

    let mut collection = Collection::retriever(date_policy);
    let options = LoadOptions { strict };
    let mut total = LoadReport::default();

    for arg in &input.inputs {
        match collection.load(Source::from_arg(arg), &options) {
            Ok(report) => total.absorb(report),
            Err(e) if strict => return Err(e.into()),
            Err(e) => {
                warn!("Skipping {arg}: {e}");
                total.unreadable.push(PathBuf::from(arg));
            }
        }
    }
    Ok((collection, total))
}

fn progress(quiet: bool) -> Box<dyn Progress> {
    if quiet {
        Box::new(NoProgress)
    } else {
        Box::new(BarProgress::new())
    }
}

fn print_failures(report: &LoadReport) {
    if report.failed > 0 {
        println!("{} article blocks could not be parsed.", report.failed);
    }
    for path in &report.unreadable {
        println!("Could not read {}", path.display());
    }
}

/// Wall time plus throughput, e.g. `2m 05s, 1200 articles (9.6/s)`.
fn timing(elapsed: Duration, articles: usize) -> String {
    let secs = elapsed.as_secs();
    let wall = match secs {
        0..=59 => format!("{:.1}s", elapsed.as_secs_f64()),
        _ => format!("{}m {:02}s", secs / 60, secs % 60),
    };
    let rate = articles as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    format!("{wall}, {articles} articles ({rate:.1}/s)")
}
