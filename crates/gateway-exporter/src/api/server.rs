use std::sync::Arc;

use error_stack::Report;
use poem::get;
use poem::listener::TcpListener;
use poem::middleware::Tracing;
use poem::Endpoint;
use poem::EndpointExt;
use poem::Route;
use poem::Server;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;

use super::errors::ApiError;
use super::handlers::get_metrics;
use crate::metrics::PrometheusSink;

/// Path Prometheus scrapes
pub const METRICS_PATH: &str = "/metrics";

/// Routes served by the exporter, without middleware
pub fn routes(sink: Arc<PrometheusSink>) -> impl Endpoint {
    Route::new().at(METRICS_PATH, get(get_metrics)).data(sink)
}

/// HTTP server exposing the metric registry
pub struct ApiServer {
    sink: Arc<PrometheusSink>,
    listen_addr: String,
}

impl ApiServer {
    pub fn new(sink: Arc<PrometheusSink>, listen_addr: String) -> Self {
        Self { sink, listen_addr }
    }

    /// Serve until `token` is cancelled.
    ///
    /// # Errors
    ///
    /// - [`ApiError::ServerError`] if the server fails to bind or stops on its own
    pub async fn run(self, token: CancellationToken) -> Result<(), Report<ApiError>> {
        info!("Listening for connections at {}", self.listen_addr);

        let app = routes(self.sink).with(Tracing);
        let listener = TcpListener::bind(&self.listen_addr);
        let server = Server::new(listener);

        tokio::select! {
            result = server.run(app) => {
                match result {
                    Ok(()) => {
                        info!("API server stopped normally");
                        Ok(())
                    }
                    Err(e) => {
                        error!("API server at {} failed: {e}", self.listen_addr);
                        Err(Report::new(ApiError::ServerError {
                            message: format!("listen at {} failed: {e}", self.listen_addr),
                        }))
                    }
                }
            }
            _ = token.cancelled() => {
                info!("API server shutdown requested");
                Ok(())
            }
        }
    }
}
