use ecoroute::config::Config;
use ecoroute::engine::Engine;
use ecoroute::error::Error;
use ecoroute::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!("using data directory {}", config.data_dir.display());

    let engine = Engine::from_config(&config)?;

    serve(engine, config.addr).await
}
