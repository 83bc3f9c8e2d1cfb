use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Wine cellar inventory API")]
pub struct Args {
    /// Host to bind to (overrides CELLAR_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides CELLAR_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides CELLAR_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Size of the SQLite connection pool (overrides CELLAR_MAX_CONNECTIONS)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let migrate = args.migrate;
        Ok((Self::merge(args)?, migrate))
    }

    /// CLI values win over environment values, which win over defaults.
    fn merge(args: Args) -> Result<Self> {
        let env_host = env::var("CELLAR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = parse_env("CELLAR_PORT", 8080u16)?;
        let env_db =
            env::var("CELLAR_DATABASE_URL").unwrap_or_else(|_| "sqlite://./data/cellar.db".into());
        let env_max_connections = parse_env("CELLAR_MAX_CONNECTIONS", 5u32)?;

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            max_connections: args.max_connections.unwrap_or(env_max_connections),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}
