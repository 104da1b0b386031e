//! Process wiring: build the shared services, run the tasks, shut down.

pub mod tasks;

use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;

use crate::config::Cli;
use crate::gateway::GatewayClient;
use crate::metrics::PrometheusSink;
use crate::scheduler::Scraper;
use tasks::Tasks;

/// Long-lived services shared between tasks
pub struct ApplicationServices {
    pub sink: Arc<PrometheusSink>,
    pub scraper: Arc<Scraper>,
}

pub struct Application {
    services: ApplicationServices,
    cli: Cli,
}

impl Application {
    /// Build every service the configuration asks for
    pub fn build(cli: Cli) -> Result<Self> {
        let sink = Arc::new(PrometheusSink::new().context("register gateway metrics failed")?);
        let client = GatewayClient::new(&cli.target)
            .map_err(|report| anyhow::anyhow!("create gateway client failed: {report:?}"))?;
        tracing::info!(url = client.url(), "Scraping gateway status");

        let scraper = Arc::new(Scraper::new(Arc::new(client), sink.clone()));

        Ok(Self {
            services: ApplicationServices { sink, scraper },
            cli,
        })
    }

    pub fn services(&self) -> &ApplicationServices {
        &self.services
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Start all tasks and wait until shutdown or a task exits
    pub async fn run(&self) -> Result<()> {
        tracing::info!("Starting all application tasks...");

        let mut tasks = Tasks::new();
        tasks.spawn_all_tasks(self);

        if let Err(e) = tasks.wait_for_completion().await {
            tracing::error!("Error during task execution: {e}");
            return Err(e);
        }

        tracing::info!("Application run completed");
        Ok(())
    }
}
