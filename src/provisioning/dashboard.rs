// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Provisioner backed by the dashboard's `/api/namespaces` route

use super::{NamespaceApplicationCase, NamespaceProvisioner, ProvisionOutcome, ProvisionParams};
use crate::constants::NAMESPACES_API_PATH;
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Error body returned by the backend on failure
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct DashboardProvisioner {
    client: Client,
}

impl DashboardProvisioner {
    /// Wrap a client whose base URL points at the dashboard backend
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Build the request path, e.g. `/api/namespaces/my-project/1?dryRun=All`
pub fn request_path(
    namespace: &str,
    case: NamespaceApplicationCase,
    params: &ProvisionParams,
) -> String {
    let path = format!("{}/{}/{}", NAMESPACES_API_PATH, namespace, case.index());
    let pairs = params.query_pairs();
    if pairs.is_empty() {
        return path;
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{}?{}", path, query)
}

/// Translate a non-2xx response into the most specific error available
fn failure_from_response(status: StatusCode, body: &[u8]) -> DashboardError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { message }) => DashboardError::RemoteError(message),
        Err(_) => DashboardError::HttpStatusError(status.as_u16()),
    }
}

#[async_trait]
impl NamespaceProvisioner for DashboardProvisioner {
    #[instrument(skip(self, params), fields(case = ?case))]
    async fn apply(
        &self,
        namespace: &str,
        case: NamespaceApplicationCase,
        params: &ProvisionParams,
    ) -> Result<ProvisionOutcome> {
        let path = request_path(namespace, case, params);
        debug!("Calling provisioning endpoint {}", path);

        let request = Request::post(&path)
            .body(Body::from(Vec::new()))
            .map_err(|e| DashboardError::RequestError(format!("{}: {}", path, e)))?;

        let response = self.client.send(request).await?;
        let status = response.status();
        let body: Bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| DashboardError::ResponseError(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            warn!("Provisioning endpoint {} answered {}", path, status);
            return Err(failure_from_response(status, &body));
        }

        let outcome = ProvisionOutcome::from_body(&body);
        debug!("Provisioning endpoint {} returned {:?}", path, outcome);
        Ok(outcome)
    }
}
