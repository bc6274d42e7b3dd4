use stikerin_core::Config;

// Use mimalloc as the global allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize telemetry, state and routes
    let (_state, router) = stikerin_api::setup::initialize_app(config.clone())?;

    // Start the server
    stikerin_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
