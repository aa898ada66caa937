use clap::Parser;
use nt_core::parse::articles_from_value;
use nt_core::StoryStorage;
use nt_coverage::{AggregationPolicy, CoverageConfig, CoverageReport, CoverageService};
use nt_storage::{RemoteConfig, StorageKind};
use nt_web::AppState;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let multiplier = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(multiplier)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration too large".to_string())?;
            has_unit = true;
        }

        if !has_unit || total_seconds == 0 {
            return Err("Duration must be a positive number of seconds, minutes or hours".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare how left, center and right outlets cover a story", long_about = None)]
pub struct Cli {
    /// Storage backend: memory, file or remote
    #[arg(long, env = "NT_STORAGE", default_value = "remote")]
    storage: String,
    /// Fixture path for file storage, base URL for remote storage
    #[arg(long, env = "NT_BACKEND_URL")]
    backend_url: Option<String>,
    /// Treat articles below this bias confidence as unlabelled when comparing
    #[arg(long, env = "NT_MIN_CONFIDENCE")]
    min_confidence: Option<f32>,
    /// Minimum confidence for showing a bias badge
    #[arg(long, env = "NT_BADGE_THRESHOLD", default_value_t = nt_coverage::display::DEFAULT_BADGE_THRESHOLD)]
    badge_threshold: f32,
    /// Keywords shown per article
    #[arg(long, default_value_t = nt_coverage::display::DEFAULT_KEYWORD_LIMIT)]
    keyword_limit: usize,
    /// Request timeout for the remote backend (e.g. 10s, 1m)
    #[arg(long, env = "NT_TIMEOUT", default_value = "10s")]
    timeout: HumanDuration,
    /// Print reports as JSON
    #[arg(long)]
    json: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Coverage comparison for a story
    Story { id: String },
    /// Coverage comparison for the story an article belongs to
    Article { id: String },
    /// Compare a local JSON file of articles
    Aggregate { file: PathBuf },
    /// Serve the coverage API
    Serve {
        #[arg(long, env = "NT_ADDR", default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

impl Cli {
    fn coverage_config(&self) -> CoverageConfig {
        CoverageConfig {
            policy: AggregationPolicy {
                min_confidence: self.min_confidence,
            },
            badge_threshold: self.badge_threshold,
            keyword_limit: self.keyword_limit,
        }
    }

    fn log_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

fn print_report(report: &CoverageReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render::render_report(report));
    }
    Ok(())
}

async fn open_storage(
    storage: &str,
    backend_url: Option<&str>,
    timeout: HumanDuration,
) -> anyhow::Result<Arc<dyn StoryStorage>> {
    let kind: StorageKind = storage.parse()?;
    let remote = RemoteConfig::default().with_timeout(timeout.0);
    Ok(nt_storage::create_storage(kind, backend_url, remote).await?)
}

async fn aggregate_file(file: &Path, config: CoverageConfig) -> anyhow::Result<CoverageReport> {
    let raw = tokio::fs::read_to_string(file).await?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let articles = articles_from_value(&value);
    debug!("Parsed {} articles from {}", articles.len(), file.display());
    Ok(CoverageReport::for_articles(&articles, &config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.coverage_config();
    config.validate()?;

    match cli.command {
        Commands::Aggregate { file } => {
            let report = aggregate_file(&file, config).await?;
            print_report(&report, cli.json)?;
        }
        Commands::Story { id } => {
            let storage = open_storage(&cli.storage, cli.backend_url.as_deref(), cli.timeout).await?;
            let service = CoverageService::new(storage, config);
            print_report(&service.story_coverage(&id).await?, cli.json)?;
        }
        Commands::Article { id } => {
            let storage = open_storage(&cli.storage, cli.backend_url.as_deref(), cli.timeout).await?;
            let service = CoverageService::new(storage, config);
            print_report(&service.article_coverage(&id).await?, cli.json)?;
        }
        Commands::Serve { addr } => {
            let storage = open_storage(&cli.storage, cli.backend_url.as_deref(), cli.timeout).await?;
            info!("✨ Serving coverage API over {} storage", storage.name());
            nt_web::serve(AppState::new(storage, config), &addr).await?;
        }
    }

    Ok(())
}
