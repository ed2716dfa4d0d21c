//! Shared utilities for use cases.
//!
//! Bounded backend calls used by both the selector and the extractor.

use crate::ports::llm_gateway::{DecisionRequest, GatewayError, LlmGateway};
use std::time::Duration;
use tracing::{debug, warn};

/// Ask the backend for a decision, giving up after `timeout` if one is set.
pub(crate) async fn decide_bounded(
    gateway: &dyn LlmGateway,
    request: &DecisionRequest,
    timeout: Option<Duration>,
) -> Result<serde_json::Value, GatewayError> {
    debug!(
        "Asking {} to {}",
        gateway.model_name(),
        request.task.as_str()
    );

    let answer = match timeout {
        Some(limit) => match tokio::time::timeout(limit, gateway.decide(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} timed out after {:?}", request.task.as_str(), limit);
                Err(GatewayError::Timeout)
            }
        },
        None => gateway.decide(request).await,
    }?;

    debug!("Backend answered {}: {}", request.task.as_str(), answer);
    Ok(answer)
}
