//! oxide-gauss CLI
//!
//! Command-line helpers for the openGauss dialect.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_core::{Dialect, SqlValue};
use oxide_sql_opengauss::{Config, OpenGaussDialect};

/// openGauss dialect tools.
#[derive(Parser)]
#[command(name = "oxide-gauss")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Connection string, overriding the configuration file.
    #[arg(short, long, env = "OPENGAUSS_DSN")]
    dsn: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print identifiers quoted for openGauss.
    Quote {
        /// Identifiers, optionally qualified (`schema.table`).
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print a statement with its `$n` placeholders replaced by values.
    Explain {
        /// SQL text using `$1`, `$2`, ... placeholders.
        sql: String,

        /// Bound value, in placeholder order. Integers, floats, `true`,
        /// `false` and `null` are recognised; anything else is text.
        #[arg(short, long = "arg")]
        args: Vec<String>,
    },

    /// Connect and run `SELECT 1`.
    Ping,
}

/// Reads a CLI argument as the most specific value it spells.
fn parse_value(raw: &str) -> SqlValue {
    if raw.eq_ignore_ascii_case("null") {
        SqlValue::Null
    } else if let Ok(b) = raw.parse::<bool>() {
        SqlValue::Bool(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        SqlValue::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        SqlValue::Float(f)
    } else {
        SqlValue::Text(raw.to_string())
    }
}

fn load_config(path: Option<&PathBuf>, dsn: Option<String>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration file");
            Config::from_json(&std::fs::read_to_string(path)?)?
        }
        None if dsn.is_some() => Config::default(),
        None => Config::from_env()?,
    };
    if let Some(dsn) = dsn {
        config.dsn = dsn;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Quote { names } => {
            let dialect = OpenGaussDialect::default();
            for name in &names {
                println!("{}", dialect.quote(name));
            }
        }

        Commands::Explain { sql, args } => {
            let dialect = OpenGaussDialect::default();
            let vars: Vec<SqlValue> = args.iter().map(|a| parse_value(a)).collect();
            println!("{}", dialect.explain(&sql, &vars));
        }

        Commands::Ping => {
            let config = load_config(cli.config.as_ref(), cli.dsn)?;
            let session = OpenGaussDialect::new(config).initialize()?;
            session.ping().await?;
            info!("Connection OK.");
        }
    }

    Ok(())
}
