use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use translation_table::{load_translation_table, AppConfig, ResourceRef};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let Some(location) = args.get(1) else {
        eprintln!("usage: translation-table <location> [config.toml]");
        std::process::exit(2);
    };

    let config_path = args.get(2).map(String::as_str).unwrap_or("config.toml");
    let config = AppConfig::load_or_default(Some(config_path));

    init_tracing(&config)?;
    tracing::debug!(?config, "Loaded configuration");

    let resource = if location == "-" {
        ResourceRef::named_stream(std::io::stdin().lock(), "<stdin>")
    } else {
        ResourceRef::location(location.as_str())
    };

    let report = load_translation_table(resource, &config)?;
    serde_json::to_writer_pretty(std::io::stdout().lock(), &report.translations)?;
    println!();

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("translation_table={}", config.logging.level)))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
