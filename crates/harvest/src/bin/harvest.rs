// ABOUTME: CLI binary for the harvest page extractor.
// ABOUTME: Scrapes URLs, HTML files or stdin and prints the result envelopes as JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use digests_harvest::{Client, ExtractOptions, ExtractionOutcome};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(about = "Extract articles, headings, links, images and metadata from web pages")]
struct Args {
    /// Base URL for file or stdin input (default: the file's file:// URL)
    #[arg(long = "url")]
    url: Option<String>,

    /// Article container selector; repeat to try several in order
    #[arg(short = 's', long = "selector")]
    selectors: Vec<String>,

    /// JSON file with extraction options
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Navigation timeout in milliseconds
    #[arg(long = "timeout-ms", default_value_t = 30_000)]
    timeout_ms: u64,

    /// User-Agent header for page loads
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// Print single-line JSON
    #[arg(long = "compact")]
    compact: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// URLs, HTML files, or `-` for stdin
    #[arg(required = true)]
    targets: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_options(args: &Args) -> Result<ExtractOptions> {
    let mut opts = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ExtractOptions::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ExtractOptions::default(),
    };
    if !args.selectors.is_empty() {
        opts.article_selectors = Some(args.selectors.clone());
    }
    Ok(opts)
}

fn is_remote(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn base_url_for(path: &Path, explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }
    fs::canonicalize(path)
        .ok()
        .and_then(|abs| Url::from_file_path(abs).ok())
        .map(String::from)
        .unwrap_or_else(|| "about:blank".to_string())
}

fn read_local(target: &str, explicit_url: Option<&str>) -> Result<(String, String)> {
    if target == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("reading stdin")?;
        let url = explicit_url.unwrap_or("about:blank").to_string();
        return Ok((html, url));
    }

    let path = Path::new(target);
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let html = String::from_utf8_lossy(&bytes).into_owned();
    Ok((html, base_url_for(path, explicit_url)))
}

async fn harvest(client: &Client, target: &str, explicit_url: Option<&str>) -> ExtractionOutcome {
    if is_remote(target) {
        return client.scrape(target).await;
    }
    match read_local(target, explicit_url) {
        Ok((html, url)) => client.scrape_html(&html, &url),
        Err(e) => ExtractionOutcome::failure(format!("{:#}", e), explicit_url.unwrap_or(target)),
    }
}

fn render(outcomes: &[ExtractionOutcome], compact: bool) -> Result<String> {
    let rendered = match (outcomes, compact) {
        ([single], true) => serde_json::to_string(single)?,
        ([single], false) => serde_json::to_string_pretty(single)?,
        (many, true) => serde_json::to_string(many)?,
        (many, false) => serde_json::to_string_pretty(many)?,
    };
    Ok(rendered)
}

async fn run(args: Args) -> Result<bool> {
    let extract = load_options(&args)?;

    let mut builder = Client::builder()
        .timeout(Duration::from_millis(args.timeout_ms))
        .allow_private_networks(args.allow_private_networks)
        .extract_options(extract);
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua);
    }
    let client = builder.build();

    let start = Instant::now();
    let mut outcomes = Vec::with_capacity(args.targets.len());
    for target in &args.targets {
        outcomes.push(harvest(&client, target, args.url.as_deref()).await);
    }
    let elapsed = start.elapsed();

    let rendered = render(&outcomes, args.compact)?;
    match &args.output {
        Some(path) => fs::write(path, format!("{}\n", rendered))
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", rendered),
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    Ok(outcomes.iter().all(ExtractionOutcome::is_success))
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
