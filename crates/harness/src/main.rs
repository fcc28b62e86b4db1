pub mod shared;

use contracts::shared::navigation::{FlagRegistry, NavigationCatalog};

use crate::shared::config::{get_catalog_path, load_config};
use crate::shared::runner::Harness;

/// Разрешает адреса из аргументов командной строки (или из сценария в
/// config.toml) и печатает по одной JSON-строке на адрес.
fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("harness.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    // stdout занят JSON-строками, поэтому консольный слой пишет в stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = load_config()?;
    let flags = FlagRegistry::builtin();

    let catalog = match get_catalog_path(&config) {
        Some(path) => {
            tracing::info!("Loading navigation catalog from: {}", path.display());
            let src = std::fs::read_to_string(&path)?;
            NavigationCatalog::from_toml(&src, &flags)?
        }
        None => NavigationCatalog::builtin(&flags)?,
    };
    tracing::info!(
        "Catalog ready: {} modules, {} global aliases",
        catalog.modules().len(),
        catalog.aliases().len()
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let locations: Vec<&str> = if args.is_empty() {
        config.script.locations.iter().map(String::as_str).collect()
    } else {
        args.iter().map(String::as_str).collect()
    };

    let harness = Harness::new(catalog, flags, &config)?;
    for report in harness.run(locations) {
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
