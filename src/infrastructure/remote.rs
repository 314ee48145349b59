use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tonic::Status;

use crate::domain::errors::DomainError;

/// Lazily connected channel; both connecting and each call are bounded by
/// `timeout`.
pub(crate) fn lazy_channel(url: &str, timeout: Duration) -> Result<Channel, tonic::transport::Error> {
    Ok(Endpoint::from_shared(url.to_string())?
        .connect_timeout(timeout)
        .timeout(timeout)
        .connect_lazy())
}

pub(crate) fn unavailable(service: &'static str, status: Status) -> DomainError {
    log::error!("{service} service call failed: {status}");
    DomainError::RemoteUnavailable {
        service,
        reason: format!("{:?}: {}", status.code(), status.message()),
    }
}

pub(crate) fn bad_payload(service: &'static str, reason: impl Into<String>) -> DomainError {
    DomainError::RemoteUnavailable {
        service,
        reason: reason.into(),
    }
}
