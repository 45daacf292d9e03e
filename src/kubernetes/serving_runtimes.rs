// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Serving runtime listing

use crate::error::Result;
use crate::types::ServingRuntime;
use async_trait::async_trait;
use kube::{api::ListParams, Api, Client};
use tracing::{debug, instrument};

/// Source of serving runtimes, used to tell which projects can serve models
#[async_trait]
pub trait ServingRuntimeLister: Send + Sync {
    /// List serving runtimes in one namespace, or across all namespaces when `None`
    async fn list_serving_runtimes(
        &self,
        namespace: Option<&str>,
        label_selector: Option<&str>,
    ) -> Result<Vec<ServingRuntime>>;
}

/// Lists `ServingRuntime` resources straight from the API server
#[derive(Clone)]
pub struct KubeServingRuntimes {
    client: Client,
}

impl KubeServingRuntimes {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServingRuntimeLister for KubeServingRuntimes {
    #[instrument(skip(self))]
    async fn list_serving_runtimes(
        &self,
        namespace: Option<&str>,
        label_selector: Option<&str>,
    ) -> Result<Vec<ServingRuntime>> {
        let runtimes: Api<ServingRuntime> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };

        let mut lp = ListParams::default();
        if let Some(selector) = label_selector {
            lp = lp.labels(selector);
        }

        let runtimes = runtimes.list(&lp).await?.items;
        debug!("Found {} serving runtimes", runtimes.len());
        Ok(runtimes)
    }
}
