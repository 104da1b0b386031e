use anyhow::Result;
use clap::Parser;
use gateway_exporter::app::Application;
use gateway_exporter::config::Cli;
use utils::version;

/// Sets up global panic hooks.
fn setup_global_hooks() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        default_hook(panic_info);
        tracing::error!("Thread panicked: {}", panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_global_hooks();

    let cli = Cli::parse();
    utils::logging::init();

    tracing::info!("Starting gateway exporter {}", &**version::VERSION);
    tracing::info!(
        target = %cli.target,
        listen = %cli.listen,
        scrape_frequency = ?cli.scrape_frequency,
        "Loaded configuration"
    );

    let app = Application::build(cli)?;
    app.run().await?;

    Ok(())
}
