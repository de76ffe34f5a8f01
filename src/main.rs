//! Webstash main entry point
//!
//! This is the command-line interface for the webstash knowledge base.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use webstash::config::load_config_with_hash;
use webstash::export::{export_pages, ExportFormat};
use webstash::humanize::{format_bytes, time_ago};
use webstash::ingest::{import_records, load_records};
use webstash::search::{search, snippet, title};
use webstash::store::{open_store, PageStore, SqliteStore, StoredPage};

/// Webstash: a local knowledge base for crawled pages
///
/// Webstash stores pages delivered by a crawl client, keyed by domain.
/// It answers free-text queries over the stored corpus and exports page
/// sets as JSON, CSV, Markdown, or HTML artifacts.
#[derive(Parser, Debug)]
#[command(name = "webstash")]
#[command(version = "1.0.0")]
#[command(about = "A local knowledge base for crawled pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Import crawl records from a JSON file
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// Search the knowledge base with a free-text query
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Restrict search or export to a single domain
    #[arg(long, value_name = "DOMAIN")]
    domain: Option<String>,

    /// List saved domains with page counts and sizes
    #[arg(long)]
    domains: bool,

    /// List stored pages for a domain
    #[arg(long, value_name = "DOMAIN")]
    pages: Option<String>,

    /// Export pages in the given format (json, csv, markdown, html)
    #[arg(long, value_name = "FORMAT")]
    export: Option<ExportFormat>,

    /// Filename prefix for export artifacts (defaults to the configured prefix)
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Remove all pages for a domain
    #[arg(long, value_name = "DOMAIN")]
    clear_domain: Option<String>,

    /// Remove every page and domain aggregate
    #[arg(long)]
    clear_all: bool,

    /// Show store statistics and exit
    #[arg(long)]
    stats: bool,

    /// Recompute domain aggregates from the page set
    #[arg(long)]
    rebuild_stats: bool,
}

impl Cli {
    /// Number of mode flags selected; exactly one is required
    fn selected_modes(&self) -> usize {
        [
            self.import.is_some(),
            self.search.is_some(),
            self.domains,
            self.pages.is_some(),
            self.export.is_some(),
            self.clear_domain.is_some(),
            self.clear_all,
            self.stats,
            self.rebuild_stats,
        ]
        .iter()
        .filter(|selected| **selected)
        .count()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if cli.selected_modes() != 1 {
        anyhow::bail!(
            "exactly one mode is required: --import, --search, --domains, --pages, \
             --export, --clear-domain, --clear-all, --stats, or --rebuild-stats"
        );
    }

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let db_path = PathBuf::from(&config.storage.database_path);

    if let Some(file) = &cli.import {
        handle_import(&db_path, file)?;
    } else if let Some(query) = &cli.search {
        handle_search(&db_path, query, cli.domain.as_deref())?;
    } else if cli.domains {
        handle_domains(&db_path)?;
    } else if let Some(domain) = &cli.pages {
        handle_pages(&db_path, domain)?;
    } else if let Some(format) = cli.export {
        let prefix = cli
            .prefix
            .clone()
            .unwrap_or_else(|| config.export.default_prefix.clone());
        handle_export(
            &db_path,
            format,
            &prefix,
            Path::new(&config.export.output_dir),
            cli.domain.as_deref(),
        )?;
    } else if let Some(domain) = &cli.clear_domain {
        handle_clear_domain(&db_path, domain)?;
    } else if cli.clear_all {
        handle_clear_all(&db_path)?;
    } else if cli.stats {
        handle_stats(&db_path)?;
    } else if cli.rebuild_stats {
        handle_rebuild_stats(&db_path)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webstash=info,warn"),
            1 => EnvFilter::new("webstash=debug,info"),
            2 => EnvFilter::new("webstash=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Opens the store for a read mode, degrading to "empty knowledge base"
/// when the database is unavailable
fn open_store_for_reading(path: &Path) -> Option<SqliteStore> {
    match open_store(path) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("Knowledge base unavailable, treating as empty: {}", e);
            None
        }
    }
}

/// Assembles the query/export corpus: one domain or everything
fn load_corpus(store: &SqliteStore, domain: Option<&str>) -> anyhow::Result<Vec<StoredPage>> {
    let corpus = match domain {
        Some(domain) => store.pages_for_domain(domain)?,
        None => store.all_pages()?,
    };
    Ok(corpus)
}

/// Handles --import: loads a JSON record file and upserts every record
fn handle_import(db_path: &Path, file: &Path) -> anyhow::Result<()> {
    let records = load_records(file)?;
    tracing::info!("Loaded {} records from {}", records.len(), file.display());

    let mut store = open_store(db_path)?;
    let stored = import_records(&mut store, records)?;

    println!("✓ Imported {} pages into {}", stored, db_path.display());
    Ok(())
}

/// Handles --search: prints ranked results with titles and snippets
fn handle_search(db_path: &Path, query: &str, domain: Option<&str>) -> anyhow::Result<()> {
    let Some(store) = open_store_for_reading(db_path) else {
        println!("No results (knowledge base is empty)");
        return Ok(());
    };

    let corpus = load_corpus(&store, domain)?;
    let results = search(query, &corpus);

    if results.is_empty() {
        println!("No results for '{}'", query);
        return Ok(());
    }

    println!("{} results for '{}':\n", results.len(), query);
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:2}. [{:3.0}%] {}",
            rank + 1,
            result.relevance * 100.0,
            title(&result.page.content, &result.page.url)
        );
        println!("    {}", result.page.url);
        println!("    {}\n", snippet(&result.page.content, query));
    }

    Ok(())
}

/// Handles --domains: lists saved domains with aggregate counts and sizes
fn handle_domains(db_path: &Path) -> anyhow::Result<()> {
    let Some(store) = open_store_for_reading(db_path) else {
        println!("No saved domains (knowledge base is empty)");
        return Ok(());
    };

    let domains = store.saved_domains()?;
    if domains.is_empty() {
        println!("No saved domains");
        return Ok(());
    }

    println!("Saved domains ({}):\n", domains.len());
    for info in &domains {
        println!(
            "  {}  ({} pages, {})",
            info.domain,
            info.page_count,
            format_bytes(info.total_size)
        );
    }

    Ok(())
}

/// Handles --pages: lists a domain's stored pages
fn handle_pages(db_path: &Path, domain: &str) -> anyhow::Result<()> {
    let Some(store) = open_store_for_reading(db_path) else {
        println!("No pages for {} (knowledge base is empty)", domain);
        return Ok(());
    };

    let pages = store.pages_for_domain(domain)?;
    if pages.is_empty() {
        println!("No pages for {}", domain);
        return Ok(());
    }

    let now = chrono::Utc::now();
    println!("Pages for {} ({}):\n", domain, pages.len());
    for page in &pages {
        println!(
            "  {}  [{}] {} - {}",
            page.url,
            page.status,
            format_bytes(page.content_size),
            time_ago(page.stored_at, now)
        );
    }

    Ok(())
}

/// Handles --export: serializes the selected corpus into one artifact
fn handle_export(
    db_path: &Path,
    format: ExportFormat,
    prefix: &str,
    out_dir: &Path,
    domain: Option<&str>,
) -> anyhow::Result<()> {
    let Some(store) = open_store_for_reading(db_path) else {
        println!("Nothing to export (knowledge base is empty)");
        return Ok(());
    };

    let pages = load_corpus(&store, domain)?;
    if pages.is_empty() {
        println!("Nothing to export");
        return Ok(());
    }

    let path = export_pages(&pages, format, prefix, out_dir)?;
    println!("✓ Exported {} pages to: {}", pages.len(), path.display());

    Ok(())
}

/// Handles --clear-domain
fn handle_clear_domain(db_path: &Path, domain: &str) -> anyhow::Result<()> {
    let mut store = open_store(db_path)?;
    store.clear_domain(domain)?;

    tracing::info!("Cleared domain {}", domain);
    println!("✓ Cleared {}", domain);
    Ok(())
}

/// Handles --clear-all
fn handle_clear_all(db_path: &Path) -> anyhow::Result<()> {
    let mut store = open_store(db_path)?;
    store.clear_all()?;

    tracing::info!("Cleared all domains");
    println!("✓ Cleared the knowledge base");
    Ok(())
}

/// Handles --stats: shows store totals and the per-domain breakdown
fn handle_stats(db_path: &Path) -> anyhow::Result<()> {
    let Some(store) = open_store_for_reading(db_path) else {
        println!("Knowledge base is empty");
        return Ok(());
    };

    let total_pages = store.count_pages()?;
    let total_domains = store.count_domains()?;
    let domains = store.saved_domains()?;
    let total_size: u64 = domains.iter().map(|d| d.total_size).sum();

    println!("=== Knowledge Base Statistics ===\n");
    println!("  Total pages: {}", total_pages);
    println!("  Domains: {}", total_domains);
    println!("  Total content size: {}", format_bytes(total_size));

    if !domains.is_empty() {
        println!("\nPer domain:");
        for info in &domains {
            println!(
                "  {}: {} pages, {}",
                info.domain,
                info.page_count,
                format_bytes(info.total_size)
            );
        }
    }

    Ok(())
}

/// Handles --rebuild-stats: recomputes aggregates from the page set
fn handle_rebuild_stats(db_path: &Path) -> anyhow::Result<()> {
    let mut store = open_store(db_path)?;
    store.rebuild_stats()?;

    println!("✓ Domain aggregates rebuilt");
    Ok(())
}
