//! ddgimage CLI - DuckDuckGo image search command line interface.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use futures::StreamExt;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ddgimage::{Client, ImageQuery, SafeSearch};

/// ddgimage - DuckDuckGo image search CLI
#[derive(Parser)]
#[command(name = "ddgimage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for images
    Search(SearchArgs),

    /// Search for images and download them
    Download(DownloadArgs),

    /// Extract image URLs from a webpage
    Scrape(ScrapeArgs),
}

#[derive(Parser)]
struct CommonArgs {
    /// Request timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Proxy URL (e.g., http://127.0.0.1:8080 or socks5://127.0.0.1:1080)
    #[arg(short, long)]
    proxy: Option<String>,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search keywords
    query: String,

    /// Maximum number of results
    #[arg(short, long, default_value = "10")]
    max_results: usize,

    /// Region/locale (e.g., us-en)
    #[arg(short, long, default_value = "wt-wt")]
    region: String,

    /// Safe search level
    #[arg(short, long, default_value = "moderate")]
    safesearch: SafeSearchArg,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
struct DownloadArgs {
    /// Search keywords
    query: String,

    /// Maximum number of images to download
    #[arg(short, long, default_value = "10")]
    max_results: usize,

    /// Directory to save downloaded images
    #[arg(short, long, default_value = "image_downloads")]
    output_dir: PathBuf,

    /// Skip images with fewer total pixels than this
    #[arg(long)]
    min_pixels: Option<u64>,

    /// Safe search level
    #[arg(short, long, default_value = "moderate")]
    safesearch: SafeSearchArg,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
struct ScrapeArgs {
    /// URL of the webpage to scrape
    url: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum SafeSearchArg {
    On,
    Moderate,
    Off,
}

impl From<SafeSearchArg> for SafeSearch {
    fn from(arg: SafeSearchArg) -> Self {
        match arg {
            SafeSearchArg::On => SafeSearch::On,
            SafeSearchArg::Moderate => SafeSearch::Moderate,
            SafeSearchArg::Off => SafeSearch::Off,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Download(args) => run_download(args).await,
        Commands::Scrape(args) => run_scrape(args).await,
    }
}

fn make_client(common: &CommonArgs) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(common.timeout));
    if let Some(proxy) = &common.proxy {
        builder = builder.proxy(proxy);
    }
    Ok(builder.build()?)
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let client = make_client(&args.common)?;
    let query = ImageQuery::new(&args.query)
        .with_max_results(args.max_results)
        .with_region(&args.region)
        .with_safesearch(args.safesearch.into());

    let results = client.search_collect(query).await?;

    match args.format {
        OutputFormat::Text => {
            println!("\nImage results for \"{}\" ({} results):\n", args.query, results.len());
            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   Image: {}", result.image_url);
                println!("   Source: {}", result.source_url);
                if let (Some(w), Some(h)) = (result.width, result.height) {
                    println!("   Dimensions: {}x{}", w, h);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Compact => {
            for result in &results {
                println!("{}\t{}", result.title, result.image_url);
            }
        }
    }

    Ok(())
}

async fn run_download(args: DownloadArgs) -> Result<()> {
    let client = make_client(&args.common)?;
    let query = ImageQuery::new(&args.query).with_safesearch(args.safesearch.into());

    let mut results = client.search(query);
    let mut downloaded = 0usize;

    while let Some(result) = results.next().await {
        if downloaded >= args.max_results {
            break;
        }
        let result = result?;

        if let Some(min) = args.min_pixels {
            if result.pixels().map_or(true, |p| p < min) {
                continue;
            }
        }

        match client.download_result(&result, &args.output_dir).await {
            Ok(path) => {
                downloaded += 1;
                println!(
                    "[{}/{}] {} -> {}",
                    downloaded,
                    args.max_results,
                    result.title,
                    path.display()
                );
            }
            Err(e) => {
                eprintln!("Download failed for {}: {}", result.image_url, e);
            }
        }
    }

    println!("\nDownloaded {} image(s) to {}", downloaded, args.output_dir.display());
    Ok(())
}

async fn run_scrape(args: ScrapeArgs) -> Result<()> {
    let client = make_client(&args.common)?;
    let urls = client.page_images(&args.url).await?;

    println!("Found {} image(s) on {}:\n", urls.len(), args.url);
    for url in urls {
        println!("{}", url);
    }

    Ok(())
}
