use dropgate_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dropgate_api::telemetry::init_telemetry();

    // Load configuration; missing required settings abort startup here,
    // before any traffic is served.
    let config = Config::from_env()?;

    // Initialize the application (database, storage, routes)
    let (_state, router) = dropgate_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    dropgate_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
