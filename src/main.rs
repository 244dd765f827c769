mod asset;
mod branch;
mod fetch;
mod output;
mod parser;
mod report;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use branch::Branch;
use fetch::Fetcher;
use report::{fetch_error_line, scraping_line, RunReport};
use settings::{Settings, Source};

#[derive(Parser)]
#[command(
    name = "mil_assets_scraper",
    about = "Scrape Indian military equipment lists from Wikipedia into a TypeScript data module"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every branch page, extract assets and write the data module
    Run {
        /// Output file (default: services/mockData.ts)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Fetch rendered articles or the MediaWiki parse API
        #[arg(short, long, value_enum)]
        source: Option<Source>,
        /// Only scrape these branches (repeatable)
        #[arg(short, long, value_enum)]
        branch: Vec<Branch>,
        /// Prefix ids with the branch (army-, navy-, af-)
        #[arg(long)]
        prefix_ids: bool,
    },
    /// Extract assets from a saved page without fetching
    Extract {
        #[arg(short, long, value_enum)]
        branch: Branch,
        /// Saved HTML of the list page
        #[arg(short, long)]
        file: PathBuf,
        /// Write a data module instead of printing JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        prefix_ids: bool,
    },
    /// Show each wikitable's headers and inferred column roles
    Inspect {
        #[arg(short, long, value_enum)]
        branch: Branch,
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(?settings, "Settings loaded");

    match cli.command {
        Commands::Run {
            out,
            source,
            branch,
            prefix_ids,
        } => {
            let out = out.unwrap_or(settings.output);
            let source = source.unwrap_or(settings.source);
            let prefix_ids = prefix_ids || settings.prefix_ids;
            let branches = Branch::select(&branch);

            let fetcher = Fetcher::new(source, &settings.user_agent)?;
            let report = scrape_branches(&fetcher, &branches, prefix_ids).await?;

            println!("Total assets found: {}", report.assets().len());
            output::write_module(&out, report.assets())?;
            println!("Updated {}", out.display());
            println!();
            report.print();
        }
        Commands::Extract {
            branch,
            file,
            out,
            prefix_ids,
        } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let page = parser::extract_page(branch, &html, prefix_ids || settings.prefix_ids);
            match out {
                Some(path) => {
                    output::write_module(&path, &page.assets)?;
                    println!("Wrote {} assets to {}", page.assets.len(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&page.assets)?),
            }
            eprintln!(
                "{} tables ({} matched), {} records, {} rows skipped",
                page.stats.tables_seen,
                page.stats.tables_matched,
                page.stats.records,
                page.stats.rows_skipped()
            );
        }
        Commands::Inspect { branch, file } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let tables = parser::inspect_tables(branch, &html);
            if tables.is_empty() {
                println!("No wikitables found.");
                return Ok(());
            }
            for (i, (headers, columns, accepted)) in tables.iter().enumerate() {
                let verdict = if *accepted { "match" } else { "skip" };
                println!("#{:<3} {:<5} | {}", i, verdict, columns);
                println!("      headers: {}", headers.join(" | "));
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

/// Fetch and extract each branch in turn. A failed fetch is reported and the
/// branch contributes no records; it never stops the run.
async fn scrape_branches(
    fetcher: &Fetcher,
    branches: &[Branch],
    prefix_ids: bool,
) -> anyhow::Result<RunReport> {
    let pb = ProgressBar::new(branches.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:30} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut report = RunReport::default();
    for &branch in branches {
        pb.set_message(branch.label());
        // stdout even when the bar is hidden (non-TTY stderr)
        pb.suspend(|| println!("{}", scraping_line(branch)));
        match fetcher.fetch(branch).await {
            Ok(html) => {
                let page = parser::extract_page(branch, &html, prefix_ids);
                info!(
                    branch = %branch,
                    records = page.stats.records,
                    skipped = page.stats.rows_skipped(),
                    "Extracted page"
                );
                report.record_page(branch, page);
            }
            Err(e) => {
                let url = fetcher.url_for(branch);
                pb.suspend(|| println!("{}", fetch_error_line(&url, &e)));
                warn!(branch = %branch, error = %e, "Fetch failed");
                report.record_failure(branch, e);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(report)
}
