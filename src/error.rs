// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Project watch failed: {0}")]
    WatchError(#[from] kube_runtime::watcher::Error),

    #[error("Failed to set up dashboard client: {0}")]
    KubeconfigError(String),

    /// Message extracted from a failed provisioning response body
    #[error("{0}")]
    RemoteError(String),

    #[error("Request failed with status code {0}")]
    HttpStatusError(u16),

    #[error("Invalid request: {0}")]
    RequestError(String),

    #[error("Failed to read response body: {0}")]
    ResponseError(String),

    /// The call went through but the requested change did not take effect
    #[error("{0}")]
    NotAppliedError(String),

    /// A precondition of a fetch is not met yet; never surfaced as a failure
    #[error("Not ready: {0}")]
    NotReadyError(String),
}

impl DashboardError {
    pub fn is_not_ready(&self) -> bool {
        matches!(self, DashboardError::NotReadyError(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
