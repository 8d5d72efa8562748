use anyhow::Context;
use clap::Parser;
use ns_scrapers::{create_sources, HtmlContentFetcher, NewsApiConfig, SourceSpec};
use ns_search::{CorpusStore, EnrichmentCache, SearchConfig, SearchEngine, SearchRequest};
use ns_storage::DEFAULT_CACHE_FILE;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod logging;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        // A bare number is seconds
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            let secs = s
                .parse::<u64>()
                .map_err(|e| format!("Invalid duration {}: {}", s, e))?;
            return Ok(HumanDuration(Duration::from_secs(secs)));
        }

        humantime::parse_duration(s)
            .map(HumanDuration)
            .map_err(|e| format!("Invalid duration {}: {}", s, e))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Ranked, sentiment-tagged news search", long_about = None)]
pub struct Cli {
    /// Cache storage backend: json or memory
    #[arg(long, default_value = "json")]
    storage: String,
    #[arg(long, env = "NS_CACHE_FILE", default_value = DEFAULT_CACHE_FILE)]
    cache_file: PathBuf,
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    #[arg(long, default_value = "au")]
    country: String,
    /// Local JSON article listings, read in the given order after NewsAPI
    #[arg(long = "feed")]
    feeds: Vec<PathBuf>,
    #[arg(long, default_value = "lexicon", help = "Sentiment model. Available models: lexicon (default), huggingface")]
    model: String,
    #[arg(long)]
    model_url: Option<String>,
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    hf_token: Option<String>,
    /// Timeout for article pages, NewsAPI and the inference API (e.g. 10s, 1m)
    #[arg(long, default_value = "10s")]
    fetch_timeout: HumanDuration,
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the search API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
        /// Refresh the corpus periodically (e.g. 1h, 30m, 1h15m30s)
        #[arg(long)]
        refresh_interval: Option<HumanDuration>,
    },
    /// Run one search and print the results as JSON
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        include_all: bool,
    },
    /// Fetch the corpus and print the refresh summary
    Refresh,
}

impl Cli {
    fn source_specs(&self) -> Vec<SourceSpec> {
        let mut specs = Vec::new();
        if let Some(api_key) = &self.news_api_key {
            specs.push(SourceSpec::NewsApi(NewsApiConfig {
                api_key: api_key.clone(),
                country: self.country.clone(),
                timeout: self.fetch_timeout.0,
                ..NewsApiConfig::default()
            }));
        }
        specs.extend(self.feeds.iter().cloned().map(SourceSpec::Feed));
        specs
    }
}

async fn build_engine(cli: &Cli) -> anyhow::Result<SearchEngine> {
    let specs = cli.source_specs();
    if specs.is_empty() {
        warn!("⚠️ No news sources configured; set NEWS_API_KEY or pass --feed");
    }
    let sources = create_sources(&specs)?;

    let storage = ns_storage::create_storage(&cli.storage, Some(cli.cache_file.clone()))?;
    let cache = EnrichmentCache::open(storage)
        .await
        .with_context(|| format!("loading cache from {}", cli.cache_file.display()))?;

    let inference_config = ns_inference::InferenceConfig {
        model: cli.model.clone(),
        model_url: cli.model_url.clone(),
        api_token: cli.hf_token.clone(),
        timeout: cli.fetch_timeout.0,
    };
    let model = ns_inference::create_model(&inference_config)?;
    info!("🧠 Sentiment model initialized (using {})", model.name());

    let fetcher = Arc::new(HtmlContentFetcher::new(cli.fetch_timeout.0)?);

    Ok(SearchEngine::new(
        CorpusStore::new(sources),
        cache,
        fetcher,
        model,
        SearchConfig::default(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let engine = Arc::new(build_engine(&cli).await?);
    let summary = engine.refresh().await;
    info!("🦗 Loaded {} articles from {}", summary.count, summary.sources.join(", "));

    match cli.command {
        Commands::Serve { addr, refresh_interval } => {
            if let Some(interval) = refresh_interval {
                info!("Refreshing every {}s", interval.0.as_secs());
                let engine = engine.clone();
                tokio::spawn(async move {
                    loop {
                        tokio::time::sleep(interval.0).await;
                        let summary = engine.refresh().await;
                        info!("Periodic refresh loaded {} articles", summary.count);
                    }
                });
            }
            ns_web::serve(ns_web::AppState { engine }, addr).await?;
        }
        Commands::Search { query, page, include_all } => {
            let request = SearchRequest::new(query).page(page).include_all(include_all);
            let results = engine.search(&request).await?;
            if let Some(e) = &results.cache_error {
                warn!("⚠️ Results were not cached: {}", e);
            }
            println!("{}", serde_json::to_string_pretty(&results.results)?);
        }
        Commands::Refresh => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
