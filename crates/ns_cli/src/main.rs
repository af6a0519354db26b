use clap::Parser;
use ns_core::{logging::init_logging, Error, NewsProvider, NewsQuery, Result, DEFAULT_PAGE_SIZE};
use ns_inference::{create_aggregator, Config, SentimentAggregator};
use ns_news::{NewsApiClient, NewsApiConfig};
use ns_web::{handlers::SentimentResponse, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Parses `--timeout` values such as `10s` or `1m 30s`. A zero timeout would
/// fail every request, so it is refused up front.
fn parse_timeout(s: &str) -> std::result::Result<Duration, String> {
    let timeout = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if timeout.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(timeout)
}

#[derive(Parser, Debug)]
#[command(author, version, about = "News sentiment signals for stock tickers", long_about = None)]
struct Cli {
    #[arg(long, default_value = "vader", help = "Model used to score text. Available models: vader (default), dummy")]
    model: String,
    /// NewsAPI key; without it only `score` works
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    newsapi_key: Option<String>,
    /// NewsAPI base URL
    #[arg(long, env = "NEWSAPI_URL", default_value = ns_news::newsapi::DEFAULT_BASE_URL)]
    newsapi_url: String,
    /// Timeout for news requests (e.g. 10s, 1m 30s)
    #[arg(long, default_value = "10s", value_parser = parse_timeout)]
    timeout: Duration,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the sentiment API over HTTP
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Fetch recent news for a ticker and print the aggregated signal as JSON
    Analyze {
        ticker: String,
        /// Company name to include in the search
        #[arg(long)]
        company: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Score a single piece of text
    Score {
        text: String,
    },
}

fn create_news(cli: &Cli) -> Result<Option<Arc<dyn NewsProvider>>> {
    let Some(key) = cli.newsapi_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        return Ok(None);
    };
    let config = NewsApiConfig::new(key)
        .with_base_url(cli.newsapi_url.clone())
        .with_timeout(cli.timeout);
    Ok(Some(Arc::new(NewsApiClient::new(config)?)))
}

async fn analyze(
    aggregator: &SentimentAggregator,
    news: &dyn NewsProvider,
    query: NewsQuery,
) -> Result<SentimentResponse> {
    info!("📰 Fetching news for {} from {}", query.ticker, news.name());
    let articles = news.fetch_articles(&query).await?;
    info!("🧮 Scoring {} articles", articles.len());
    let result = aggregator.aggregate(&articles)?;

    Ok(SentimentResponse {
        company: query.display_name().to_string(),
        ticker: query.ticker,
        result,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let aggregator = create_aggregator(Some(Config::new(cli.model.clone())))?;
    info!("🧠 Scorer initialized (using {})", aggregator.scorer().name());

    match &cli.command {
        Commands::Serve { host, port } => {
            let news = create_news(&cli)?;
            if news.is_none() {
                warn!("⚠️ NEWSAPI_KEY is not set, /api/sentiment will answer with an error");
            }
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .map_err(|e| Error::Config(format!("Invalid listen address: {}", e)))?;
            ns_web::serve(AppState::new(aggregator, news), addr).await?;
        }
        Commands::Analyze { ticker, company, page_size } => {
            let news = create_news(&cli)?
                .ok_or_else(|| Error::Config("Missing NEWSAPI_KEY in environment.".to_string()))?;
            let query = NewsQuery::new(ticker.as_str())
                .with_company(company.clone())
                .with_page_size(*page_size);
            let body = analyze(&aggregator, news.as_ref(), query).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Score { text } => {
            let polarity = aggregator.scorer().polarity(text)?;
            let label = ns_core::SentimentLabel::from_compound(polarity.compound);
            println!("{:.4}\t{}", polarity.compound, label);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_timeout("1m 30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_timeout("500ms").unwrap(), Duration::from_millis(500));
        assert!(parse_timeout("0s").is_err());
        assert!(parse_timeout("").is_err());
        assert!(parse_timeout("abc").is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected_by_cli() {
        assert!(Cli::try_parse_from(["ns", "--timeout", "0s", "score", "x"]).is_err());
        let cli = Cli::try_parse_from(["ns", "--timeout", "2m", "score", "x"]).unwrap();
        assert_eq!(cli.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["ns", "--model", "dummy", "score", "Shares surge"]).unwrap();
        assert_eq!(cli.model, "dummy");
        assert!(matches!(cli.command, Commands::Score { ref text } if text == "Shares surge"));

        let cli = Cli::try_parse_from([
            "ns", "--newsapi-key", "k", "analyze", "aapl", "--company", "Apple", "--page-size", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { ticker, company, page_size } => {
                assert_eq!(ticker, "aapl");
                assert_eq!(company.as_deref(), Some("Apple"));
                assert_eq!(page_size, 10);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_news_is_optional() {
        let mut cli = Cli::try_parse_from(["ns", "score", "x"]).unwrap();
        cli.newsapi_key = None;
        assert!(create_news(&cli).unwrap().is_none());
        cli.newsapi_key = Some("key".to_string());
        assert!(create_news(&cli).unwrap().is_some());
    }
}
