use std::sync::Arc;

use poem::handler;
use poem::http::StatusCode;
use poem::web::Data;
use poem::Response;
use tracing::error;

use crate::metrics::PrometheusSink;

/// Render the current contents of the metric registry
#[handler]
pub async fn get_metrics(sink: Data<&Arc<PrometheusSink>>) -> poem::Result<Response> {
    let body = sink.encode().map_err(|e| {
        error!("Failed to encode metrics: {e}");
        poem::Error::from_string(
            format!("failed to encode metrics: {e}"),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    })?;

    Ok(Response::builder()
        .content_type(prometheus::TEXT_FORMAT)
        .body(body))
}
