use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::Application;
use crate::api::ApiServer;
use crate::clock::TokioClock;

/// How long running tasks get to finish after a shutdown signal
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Task manager, responsible for starting and stopping the background tasks
pub struct Tasks {
    pub tasks: Vec<JoinHandle<()>>,
    cancellation_token: CancellationToken,
}

impl Default for Tasks {
    fn default() -> Self {
        Self::new()
    }
}

impl Tasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Token cancelled when shutdown starts
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Start the scrape loop and the exposition server
    pub fn spawn_all_tasks(&mut self, app: &Application) {
        let scrape_task = self.spawn_scrape_task(app);
        self.tasks.push(scrape_task);

        let api_server_task = self.spawn_api_server_task(app);
        self.tasks.push(api_server_task);
    }

    /// Wait for a shutdown signal or for any task to exit on its own
    pub async fn wait_for_completion(&mut self) -> Result<()> {
        let signal_handler = {
            #[cfg(unix)]
            {
                use tokio::signal::unix::signal;
                use tokio::signal::unix::SignalKind;
                let mut sigterm = signal(SignalKind::terminate())?;
                let mut sigint = signal(SignalKind::interrupt())?;

                tokio::spawn(async move {
                    tokio::select! {
                        _ = sigterm.recv() => {
                            tracing::info!("Received SIGTERM, initiating graceful shutdown");
                        }
                        _ = sigint.recv() => {
                            tracing::info!("Received SIGINT, initiating graceful shutdown");
                        }
                    }
                })
            }
            #[cfg(not(unix))]
            {
                tokio::spawn(async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!("Failed to listen for Ctrl+C: {e}");
                        return;
                    }
                    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
                })
            }
        };

        tokio::select! {
            _ = signal_handler => {
                tracing::info!("Shutdown signal received, cancelling all tasks");
                self.shutdown(SHUTDOWN_TIMEOUT).await;
            }
            result = futures::future::select_all(&mut self.tasks) => {
                let (result, _index, remaining) = result;
                self.cancellation_token.cancel();
                join_with_timeout(remaining, SHUTDOWN_TIMEOUT).await;
                if let Err(e) = result {
                    tracing::error!("Task completed with error: {e}");
                    return Err(e.into());
                }
                anyhow::bail!("Task completed unexpectedly");
            }
        }

        Ok(())
    }

    /// Cancel every task and wait for them, up to `timeout`
    pub async fn shutdown(&mut self, timeout: Duration) {
        self.cancellation_token.cancel();
        join_with_timeout(self.tasks.iter_mut(), timeout).await;
    }

    fn spawn_scrape_task(&self, app: &Application) -> JoinHandle<()> {
        let scraper = app.services().scraper.clone();
        let interval = app.cli().scrape_frequency;
        let token = self.cancellation_token.clone();

        tokio::spawn(async move {
            tracing::info!("Starting gateway scrape task");
            scraper.run(&TokioClock, interval, token).await;
            tracing::info!("Gateway scrape task completed");
        })
    }

    fn spawn_api_server_task(&self, app: &Application) -> JoinHandle<()> {
        let sink = app.services().sink.clone();
        let listen_addr = app.cli().listen.clone();
        let token = self.cancellation_token.clone();

        tokio::spawn(async move {
            let api_server = ApiServer::new(sink, listen_addr);

            if let Err(e) = api_server.run(token).await {
                tracing::error!("API server failed: {e:?}");
            } else {
                tracing::info!("API server completed");
            }
        })
    }
}

async fn join_with_timeout<'a>(
    tasks: impl IntoIterator<Item = &'a mut JoinHandle<()>>,
    timeout: Duration,
) {
    tokio::time::timeout(timeout, async {
        for task in tasks {
            if let Err(e) = task.await {
                tracing::error!("Task failed during shutdown: {e}");
            }
        }
    })
    .await
    .unwrap_or_else(|_| {
        tracing::warn!("Task shutdown timed out after {:?}", timeout);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shutdown_cancels_and_joins_tasks() {
        let mut tasks = Tasks::new();
        let token = tasks.cancellation_token();
        tasks.tasks.push(tokio::spawn(async move {
            token.cancelled().await;
        }));

        tasks.shutdown(Duration::from_secs(5)).await;

        assert!(tasks.cancellation_token().is_cancelled());
        assert!(tasks.tasks.iter().all(JoinHandle::is_finished));
    }

    #[tokio::test]
    async fn exited_task_ends_the_run_with_an_error() {
        let mut tasks = Tasks::new();
        let token = tasks.cancellation_token();
        tasks.tasks.push(tokio::spawn(async {}));
        tasks.tasks.push(tokio::spawn(async move {
            token.cancelled().await;
        }));

        let result = tokio::time::timeout(Duration::from_secs(5), tasks.wait_for_completion())
            .await
            .expect("should not wait for a signal");

        assert!(result.is_err(), "an exiting task is unexpected");
        assert!(tasks.cancellation_token().is_cancelled());
    }
}
