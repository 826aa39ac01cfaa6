use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epg_srbcyr::{
    config::{Config, EpgSourceConfig, FetchConfig},
    epg::{ChannelRules, RewriteOptions, compose, convert},
    errors::AppError,
    sources::{EpgFetcher, EpgLocation, open_reader},
    transliteration::TransliterationEngine,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "epg-srbcyr")]
#[command(version)]
#[command(about = "Partially transliterates XMLTV guides from Serbian Latin to Cyrillic")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path; falls back to $CONFIG_FILE, then config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve converted guides over HTTP, one route per configured key
    Serve {
        /// Listening IP address
        #[arg(short = 'H', long, value_name = "IP")]
        host: Option<String>,

        /// Listening port
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },
    /// Convert a single guide
    Convert {
        /// Configured EPG key providing channel tables (and the url when --input is absent)
        #[arg(short, long)]
        key: Option<String>,

        /// Guide file path or http(s) URL
        #[arg(short, long, value_name = "PATH_OR_URL")]
        input: Option<String>,

        /// Output file; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build a guide from pipe-delimited channel and programme listings
    Compose {
        /// Configured EPG key providing channel tables
        #[arg(short, long)]
        key: String,

        /// Channel listing, one `id|display name` per line
        #[arg(short = 'a', long)]
        channels: PathBuf,

        /// Programme listing, one `channel|start|stop|title|description` per line
        #[arg(short, long)]
        programmes: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Transliterate the given text, or stdin line by line when none is given
    Transliterate { text: Vec<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so converted output can be piped
    let log_filter = if cli.log_level == "trace" {
        format!("epg_srbcyr={},tower_http=trace", cli.log_level)
    } else {
        format!("epg_srbcyr={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Command::Serve { host, port } => serve(cli.config.as_deref(), host, port).await,
        Command::Convert { key, input, output } => {
            convert_guide(cli.config.as_deref(), key, input, output).await
        }
        Command::Compose {
            key,
            channels,
            programmes,
            output,
        } => compose_guide(cli.config.as_deref(), &key, &channels, &programmes, &output).await,
        Command::Transliterate { text } => transliterate(text),
    }
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

async fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    info!("Starting EPG transliteration proxy v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }

    let web_server = WebServer::new(config)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await
}

fn source_config(config: &Config, key: &str) -> Result<EpgSourceConfig> {
    Ok(config
        .epg_source(key)
        .cloned()
        .ok_or_else(|| AppError::unknown_key(key))?)
}

async fn convert_guide(
    config_path: Option<&Path>,
    key: Option<String>,
    input: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (source, fetch, generation_comment) = match &key {
        Some(key) => {
            let config = load_config(config_path)?;
            (
                source_config(&config, key)?,
                config.fetch,
                config.output.generation_comment,
            )
        }
        None => (EpgSourceConfig::default(), FetchConfig::default(), true),
    };

    let location = match input.or_else(|| source.url.clone()) {
        Some(location) => EpgLocation::parse(&location),
        None if key.is_some() => bail!("EPG key has no url configured; pass --input"),
        None => bail!("either --key or --input is required"),
    };

    let data = EpgFetcher::new(&fetch)?.fetch(&location).await?;
    let reader = open_reader(data)?;
    let rules = ChannelRules::from_config(&source);
    let options = RewriteOptions::now(generation_comment);

    let stats = tokio::task::spawn_blocking(move || match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok::<_, anyhow::Error>(convert(reader, file, &rules, &options)?)
        }
        None => Ok(convert(reader, io::stdout().lock(), &rules, &options)?),
    })
    .await??;

    info!(
        "Converted {}: {} channel(s), {} programme(s), {} transliterated node(s)",
        location, stats.channels, stats.programmes, stats.transliterated_nodes
    );
    Ok(())
}

async fn compose_guide(
    config_path: Option<&Path>,
    key: &str,
    channels: &Path,
    programmes: &Path,
    output: &Path,
) -> Result<()> {
    let config = load_config(config_path)?;
    let rules = ChannelRules::from_config(&source_config(&config, key)?);
    let options = RewriteOptions::now(config.output.generation_comment);

    let open = |path: &Path| {
        File::open(path)
            .map(BufReader::new)
            .with_context(|| format!("Failed to open {}", path.display()))
    };
    let channels = open(channels)?;
    let programmes = open(programmes)?;
    let file =
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;

    let stats = compose(channels, programmes, file, &rules, &options)?;
    info!(
        "Wrote {}: {} channel(s), {} programme(s)",
        output.display(),
        stats.channels,
        stats.programmes
    );
    Ok(())
}

fn transliterate(text: Vec<String>) -> Result<()> {
    let engine = TransliterationEngine::default();
    let mut stdout = io::stdout().lock();

    if text.is_empty() {
        for line in io::stdin().lock().lines() {
            writeln!(stdout, "{}", engine.transliterate(&line?))?;
        }
    } else {
        writeln!(stdout, "{}", engine.transliterate(&text.join(" ")))?;
    }
    Ok(())
}
