// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace provisioning through the dashboard backend.
//!
//! After the API server accepts a project, the dashboard backend finishes setting up
//! the namespace (labels, role bindings, serving platform). Its answer is decoded once
//! into a [`ProvisionOutcome`] so callers never inspect response bodies themselves.

pub mod dashboard;

pub use dashboard::DashboardProvisioner;

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Which namespace-level action the backend should apply.
///
/// The discriminant is the routing index used in the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceApplicationCase {
    ProjectCreation = 0,
    ModelMeshPromotion = 1,
    KServePromotion = 2,
}

impl NamespaceApplicationCase {
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Optional query parameters of a provisioning call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionParams {
    /// Ask the backend to validate the change without persisting it
    pub dry_run: bool,
}

impl ProvisionParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if self.dry_run {
            pairs.push(("dryRun", "All"));
        }
        pairs
    }
}

/// Result of a provisioning call that reached the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Applied,
    NotApplied,
    /// The body did not carry a boolean `applied` flag
    Malformed,
}

#[derive(Deserialize)]
struct AppliedFlag {
    applied: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProvisionResponse {
    Wrapped { data: AppliedFlag },
    Bare(AppliedFlag),
}

impl ProvisionOutcome {
    /// Decode a successful response body
    pub fn from_body(body: &[u8]) -> Self {
        let flag = match serde_json::from_slice::<ProvisionResponse>(body) {
            Ok(ProvisionResponse::Wrapped { data }) => data,
            Ok(ProvisionResponse::Bare(flag)) => flag,
            Err(_) => return ProvisionOutcome::Malformed,
        };

        if flag.applied {
            ProvisionOutcome::Applied
        } else {
            ProvisionOutcome::NotApplied
        }
    }

    pub fn is_applied(self) -> bool {
        self == ProvisionOutcome::Applied
    }
}

/// Applies namespace-level actions for a project
#[async_trait]
pub trait NamespaceProvisioner: Send + Sync {
    async fn apply(
        &self,
        namespace: &str,
        case: NamespaceApplicationCase,
        params: &ProvisionParams,
    ) -> Result<ProvisionOutcome>;
}
