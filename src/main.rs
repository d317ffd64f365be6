use anyhow::Result;
use macro_theme_engine::{
    app::EngineApp,
    config,
    infrastructure::{directories, logging, shutdown},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut config = config::load_config()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        config.ingest_files = args;
    }

    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let stop = shutdown::StopSignal::new();
    shutdown::install_signal_handlers(stop.clone());

    let app = EngineApp::initialize(config, paths, stop)?;
    app.run().await
}
