// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::DEFAULT_PRODUCT_NAME;
use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the dashboard backend serving the namespace provisioning routes
    pub dashboard_url: Url,
    /// Product name shown in user facing error messages
    pub product_name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let dashboard_url = env::var("DASHBOARD_URL")
            .context("DASHBOARD_URL environment variable not set")?;
        let dashboard_url = Url::parse(&dashboard_url)
            .with_context(|| format!("DASHBOARD_URL is not a valid URL: {}", dashboard_url))?;
        let product_name =
            env::var("ODH_PRODUCT_NAME").unwrap_or_else(|_| DEFAULT_PRODUCT_NAME.to_string());

        Ok(Config {
            dashboard_url,
            product_name,
        })
    }
}
