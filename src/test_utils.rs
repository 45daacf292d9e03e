// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes and dashboard API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
enum MockReply {
    Respond(u16, String),
    Fail(String),
}

/// A request as seen by the mock service
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Decoded query parameters in request order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_deref().unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), MockReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for requests with the given method matching the exact path
    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            MockReply::Respond(status, body.to_string()),
        );
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Fail POST requests to the path at the transport level
    pub fn fail_post(self, path: &str, message: &str) -> Self {
        self.responses.lock().unwrap().insert(
            ("POST".to_string(), path.to_string()),
            MockReply::Fail(message.to_string()),
        );
        self
    }

    /// Build a kube Client from this mock service
    pub fn client(&self) -> Client {
        Client::new(self.clone(), "default")
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for one method and path
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn find_reply(&self, method: &str, path: &str) -> Option<MockReply> {
        let responses = self.responses.lock().unwrap();

        if let Some(reply) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(reply.clone());
        }

        // Try prefix match for paths with a trailing name
        for ((m, p), reply) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(reply.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(str::to_string);

        let reply = self.find_reply(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req.into_body().collect().await?.to_bytes().to_vec();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path,
                query,
                body,
            });

            match reply {
                Some(MockReply::Respond(status, body)) => Ok(json_response(status, body)),
                Some(MockReply::Fail(message)) => Err(message.into()),
                None => Ok(json_response(404, not_found_json("resource", "unknown"))),
            }
        })
    }
}

fn json_response(status: u16, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.into_bytes()))
        .unwrap()
}

/// Create a mock project JSON value
pub fn project_value(name: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "project.openshift.io/v1",
        "kind": "Project",
        "metadata": {
            "name": name,
            "uid": "test-uid",
            "labels": {
                "opendatahub.io/dashboard": "true",
                "modelmesh-enabled": "true"
            },
            "annotations": {
                "openshift.io/display-name": name,
                "openshift.io/description": ""
            }
        },
        "spec": { "finalizers": ["kubernetes"] },
        "status": { "phase": "Active" }
    })
}

pub fn project_json(name: &str) -> String {
    project_value(name).to_string()
}

/// Create a mock project list JSON response
pub fn project_list_json(names: &[&str]) -> String {
    serde_json::json!({
        "apiVersion": "project.openshift.io/v1",
        "kind": "ProjectList",
        "metadata": { "resourceVersion": "1" },
        "items": names.iter().map(|n| project_value(n)).collect::<Vec<_>>()
    })
    .to_string()
}

/// Create a mock serving runtime list JSON response, one runtime per namespace
pub fn serving_runtime_list_json(namespaces: &[&str]) -> String {
    let items: Vec<_> = namespaces
        .iter()
        .map(|ns| {
            serde_json::json!({
                "apiVersion": "serving.kserve.io/v1alpha1",
                "kind": "ServingRuntime",
                "metadata": {
                    "name": "test-model-server",
                    "namespace": ns,
                    "labels": { "opendatahub.io/dashboard": "true" }
                },
                "spec": {
                    "multiModel": true,
                    "supportedModelFormats": [{ "name": "onnx", "version": "1" }]
                }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "serving.kserve.io/v1alpha1",
        "kind": "ServingRuntimeList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
