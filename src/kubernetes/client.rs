// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation for the dashboard backend

use crate::config::Config;
use crate::error::{DashboardError, Result};
use kube::{Client, Config as KConfig};
use tracing::{debug, instrument};

/// Create a client that talks to the dashboard backend instead of the API server.
///
/// The credentials are inferred the same way as for the cluster client; only the
/// target URL is swapped for the configured dashboard URL.
#[instrument(skip(config), fields(dashboard_url = %config.dashboard_url))]
pub async fn create_dashboard_client(config: &Config) -> Result<Client> {
    let mut c = KConfig::infer()
        .await
        .map_err(|e| DashboardError::KubeconfigError(format!("Failed to infer config: {}", e)))?;

    let dashboard_url = config.dashboard_url.as_str().trim_end_matches('/');
    debug!(
        "Pointing dashboard client at {} instead of {}",
        dashboard_url, c.cluster_url
    );
    c.cluster_url = dashboard_url
        .parse()
        .map_err(|e| DashboardError::KubeconfigError(format!("Invalid URL: {}", e)))?;

    Client::try_from(c)
        .map_err(|e| DashboardError::KubeconfigError(format!("Failed to create client: {}", e)))
}
