//! get-papers-list - Entry Point
//!
//! Searches PubMed and lists papers with pharma/biotech-affiliated authors as CSV.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pharma_papers::config::api;
use pharma_papers::formatters::{format_query_analysis, format_registry_stats, write_papers_csv};
use pharma_papers::query::{QUERY_HELP, analyze_query};
use pharma_papers::{Config, HttpClient, PaperSearch, PubMedClient, RegistryBuilder};

#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(about = "Find PubMed papers with authors affiliated to pharmaceutical or biotech companies")]
#[command(version)]
struct Cli {
    /// PubMed query (see --query-help for syntax)
    query: Option<String>,

    /// Write results to this CSV file instead of stdout
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print debug information
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of PubMed results to examine
    #[arg(long, default_value_t = api::DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Contact email sent to NCBI
    #[arg(long, env = "PUBMED_EMAIL", default_value = api::DEFAULT_EMAIL)]
    email: String,

    /// NCBI API key (optional, raises the rate limit)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Company registry cache file
    #[arg(long, env = "PHARMA_COMPANY_CACHE", default_value = api::DEFAULT_CACHE_FILE)]
    cache_file: PathBuf,

    /// Analyze query syntax and exit
    #[arg(long)]
    validate_query: bool,

    /// Show query syntax help and exit
    #[arg(long)]
    query_help: bool,

    /// Refetch the company registry from all sources and exit
    #[arg(long)]
    update_companies: bool,

    /// Show company registry statistics and exit
    #[arg(long)]
    show_company_stats: bool,

    /// Use only the built-in company list (no network, no cache)
    #[arg(long)]
    use_hardcoded_only: bool,

    /// Delete and rebuild the company registry with stricter filtering, then exit
    #[arg(long)]
    clean_company_cache: bool,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(debug: bool, json: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr)).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.debug, cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.query_help {
        println!("{QUERY_HELP}");
        return Ok(());
    }

    let config = Config::new(cli.email.clone(), cli.api_key.clone().filter(|k| !k.is_empty()))
        .with_cache_file(&cli.cache_file);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        cache_file = %config.cache_file.display(),
        has_api_key = config.has_api_key(),
        "Starting get-papers-list"
    );

    let http = HttpClient::new(&config)?;
    let builder = RegistryBuilder::from_http(&http, &config);

    if cli.show_company_stats {
        let registry = builder.load_or_fetch(false, cli.use_hardcoded_only).await?;
        print!("{}", format_registry_stats(&builder.stats(&registry)));
        return Ok(());
    }

    if cli.update_companies {
        let registry = builder.load_or_fetch(true, cli.use_hardcoded_only).await?;
        println!("Company registry updated: {} companies", registry.len());
        return Ok(());
    }

    if cli.clean_company_cache {
        let registry = builder.rebuild_cleaned().await?;
        println!("Company registry rebuilt: {} companies", registry.len());
        return Ok(());
    }

    let Some(query) = cli.query.as_deref() else {
        anyhow::bail!(
            "a query is required unless using --query-help, --show-company-stats, \
             --update-companies or --clean-company-cache"
        );
    };

    if cli.validate_query {
        let analysis = analyze_query(query)?;
        print!("{}", format_query_analysis(&analysis));
        return Ok(());
    }

    let registry = builder.load_or_fetch(false, cli.use_hardcoded_only).await?;
    let search = PaperSearch::new(PubMedClient::with_http(http, &config), registry, &config);
    let papers = search.run(query, cli.max_results).await?;

    if papers.is_empty() {
        println!("No papers found with pharmaceutical/biotech company affiliations.");
        return Ok(());
    }

    match &cli.file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_papers_csv(&mut BufWriter::new(file), &papers)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Results saved to {}", path.display());
            println!("Found {} papers with pharmaceutical/biotech affiliations.", papers.len());
        }
        None => {
            write_papers_csv(&mut io::stdout().lock(), &papers)?;
            tracing::debug!(
                count = papers.len(),
                "Found papers with company affiliations"
            );
        }
    }

    Ok(())
}
