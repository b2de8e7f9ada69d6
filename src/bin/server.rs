use corridor::util::trace::initialize_tracer;
use corridor::{bootstrap, server, Config, CorridorEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Loads `.env` before reading the environment.
    let config = Config::from_env()?;

    // Create the tracer first.
    initialize_tracer();
    tracing::info!(?config, "Configuration loaded");

    let engine = CorridorEngine::new();
    if let Some(path) = &config.bootstrap_csv {
        match bootstrap::load_file(path) {
            Ok(points) => {
                engine.bulk_load(points);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Could not load bootstrap points");
            }
        }
    }

    server::run(engine, &config).await?;
    Ok(())
}
