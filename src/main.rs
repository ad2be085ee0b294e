use clap::Parser;
use smallifier::config::{self, Config, ConfigOverrides};
use smallifier::server;
use tracing_subscriber::EnvFilter;

/// Smallifier - a small URL shortener
#[derive(Parser, Debug)]
#[command(name = "smallifier")]
#[command(version)]
#[command(about = "A small URL shortener", long_about = None)]
struct Cli {
    /// Base URL for links, e.g. https://mtrx.to/ [env: BASE_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Address to listen on [env: LISTEN] [default: 0.0.0.0:3000]
    #[arg(long)]
    addr: Option<String>,

    /// Secret that create requests must carry [env: SECRET]
    #[arg(long)]
    secret: Option<String>,

    /// Max length of URLs being shortened, 0 or less for no limit [env: LENGTH_LIMIT] [default: 256]
    #[arg(long, allow_negative_numbers = true)]
    length_limit: Option<i64>,

    /// Path to the SQLite database [env: SQLITE_DB] [default: smallifier.db]
    #[arg(long)]
    sqlite_db: Option<String>,

    /// Address for the Prometheus metrics listener [env: METRICS_LISTEN]
    #[arg(long)]
    metrics_addr: Option<String>,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        Self {
            base_url: cli.base_url,
            listen_addr: cli.addr,
            secret: cli.secret,
            length_limit: cli.length_limit,
            sqlite_db: cli.sqlite_db,
            metrics_addr: cli.metrics_addr,
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let overrides = ConfigOverrides::from(Cli::parse());
    let config = config::load_from_env(&overrides)?;

    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}
