use parcel_dash::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("hyper", LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .init();

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{} default_limit={}",
        config.server.host,
        config.server.port,
        config.tables.default_limit
    );

    parcel_dash::run_server(config).await
}
