use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uxlens_core::{AnalysisPipeline, AppConfig, StoreBackend};
use uxlens_gemini::GeminiClient;
use uxlens_server::{routes, AppState};

fn cli() -> Command {
    Command::new("uxlens")
        .version(uxlens_server::VERSION)
        .about("Predict user behavior from UI design screenshots")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP API")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .env("UXLENS_CONFIG")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .env("UXLENS_BIND")
                        .value_parser(value_parser!(SocketAddr))
                        .help("Listen address, e.g. 0.0.0.0:3000"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .env("UXLENS_MODEL")
                        .help("Gemini model name"),
                )
                .arg(
                    Arg::new("api-key")
                        .long("api-key")
                        .env("GEMINI_API_KEY")
                        .hide_env_values(true)
                        .help("Gemini API key"),
                )
                .arg(
                    Arg::new("sqlite")
                        .long("sqlite")
                        .value_parser(value_parser!(PathBuf))
                        .help("Store analyses in this SQLite file instead of memory"),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_parser(value_parser!(u64))
                        .help("Per-analysis deadline in seconds"),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Normalize a raw model response and print the result as JSON")
                .arg(
                    Arg::new("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Response text file; reads stdin when omitted"),
                )
                .arg(
                    Arg::new("elements")
                        .long("elements")
                        .action(ArgAction::SetTrue)
                        .help("Treat input as an element-extraction response"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// File settings first, then flags and environment
fn load_config(args: &ArgMatches) -> Result<AppConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => AppConfig::from_toml_file(path)?,
        None => AppConfig::default(),
    };

    if let Some(bind) = args.get_one::<SocketAddr>("bind") {
        config.server.bind = *bind;
    }
    if let Some(model) = args.get_one::<String>("model") {
        config.gemini.model = model.clone();
    }
    if let Some(key) = args.get_one::<String>("api-key") {
        config.gemini.api_key = key.clone();
    }
    if let Some(path) = args.get_one::<PathBuf>("sqlite") {
        config.store = StoreBackend::Sqlite { path: path.clone() };
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        config.pipeline.timeout_secs = *timeout;
    }
    Ok(config)
}

async fn serve(config: AppConfig) -> Result<()> {
    let model = GeminiClient::new(config.gemini.clone()).context("invalid model configuration")?;
    let store = config.store.open().context("failed to open analysis store")?;
    let pipeline = AnalysisPipeline::new(Arc::new(model), store, config.pipeline);
    let state = AppState::new(pipeline, config.server.max_body_bytes);

    let (addr, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(config.server.bind, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .with_context(|| format!("failed to bind {}", config.server.bind))?;

    tracing::info!(
        %addr,
        model = %config.gemini.model,
        store = ?config.store,
        "uxlens listening"
    );
    server.await;
    tracing::info!("uxlens stopped");
    Ok(())
}

fn normalize(args: &ArgMatches) -> Result<()> {
    let text = match args.get_one::<PathBuf>("file") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let output = if args.get_flag("elements") {
        serde_json::to_string_pretty(&uxlens_normalize::normalize_elements(&text)?)?
    } else {
        serde_json::to_string_pretty(&uxlens_normalize::normalize_behavior(&text)?)?
    };
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("serve", args)) => serve(load_config(args)?).await,
        Some(("normalize", args)) => normalize(args),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let matches = cli()
            .try_get_matches_from([
                "uxlens",
                "serve",
                "--bind",
                "0.0.0.0:8080",
                "--model",
                "gemini-2.0-flash",
                "--api-key",
                "k",
                "--sqlite",
                "/tmp/uxlens.db",
                "--timeout",
                "30",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let config = load_config(args).unwrap();

        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.api_key, "k");
        assert_eq!(config.pipeline.timeout_secs, 30);
        assert_eq!(
            config.store,
            StoreBackend::Sqlite {
                path: PathBuf::from("/tmp/uxlens.db")
            }
        );
    }
}
