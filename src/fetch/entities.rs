// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Single-entity readers for the pipelines and model registry areas.

use super::{callback, FetchOptions, FetchStateHandle, FetchStateOptions};
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A recurring pipeline run as returned by the pipelines server (KFP v2)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PipelineRunJob {
    pub recurring_run_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelArtifact {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_format_name: Option<String>,
}

/// One page of model artifacts
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelArtifactList {
    pub items: Vec<ModelArtifact>,
    pub size: u32,
    pub page_size: u32,
    pub next_page_token: String,
}

#[async_trait]
pub trait PipelinesApi: Send + Sync {
    async fn get_pipeline_run_job(&self, opts: &FetchOptions, id: &str) -> Result<PipelineRunJob>;
}

#[async_trait]
pub trait ModelRegistryApi: Send + Sync {
    async fn get_model_artifacts_by_model_version(
        &self,
        opts: &FetchOptions,
        model_version_id: &str,
    ) -> Result<ModelArtifactList>;
}

/// Track a recurring pipeline run; stays unloaded until a non-empty id is known
pub fn pipeline_run_job_by_id(
    api: Arc<dyn PipelinesApi>,
    id: Option<String>,
) -> FetchStateHandle<Option<PipelineRunJob>> {
    let handle = FetchStateHandle::new(
        callback(move |opts: FetchOptions| {
            let api = api.clone();
            let id = id.clone();
            async move {
                let Some(id) = id.filter(|i| !i.is_empty()) else {
                    return Err(DashboardError::NotReadyError("No pipeline run job id".to_string()));
                };
                api.get_pipeline_run_job(&opts, &id).await.map(Some)
            }
        }),
        None,
        FetchStateOptions::default(),
    );
    handle.start();
    handle
}

/// Track the artifacts of a model version; stays unloaded until a non-empty id is known
pub fn model_artifacts_by_version_id(
    api: Arc<dyn ModelRegistryApi>,
    model_version_id: Option<String>,
) -> FetchStateHandle<ModelArtifactList> {
    let handle = FetchStateHandle::new(
        callback(move |opts: FetchOptions| {
            let api = api.clone();
            let model_version_id = model_version_id.clone();
            async move {
                let Some(id) = model_version_id.filter(|i| !i.is_empty()) else {
                    return Err(DashboardError::NotReadyError("No model version id".to_string()));
                };
                api.get_model_artifacts_by_model_version(&opts, &id).await
            }
        }),
        ModelArtifactList::default(),
        FetchStateOptions {
            initial_promise_purity: true,
            ..Default::default()
        },
    );
    handle.start();
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPipelines {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PipelinesApi for StubPipelines {
        async fn get_pipeline_run_job(
            &self,
            _opts: &FetchOptions,
            id: &str,
        ) -> Result<PipelineRunJob> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if id == "missing" {
                return Err(DashboardError::RemoteError("run job not found".to_string()));
            }
            Ok(PipelineRunJob {
                recurring_run_id: id.to_string(),
                display_name: "nightly-training".to_string(),
                status: Some("ENABLED".to_string()),
                ..Default::default()
            })
        }
    }

    struct StubRegistry {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelRegistryApi for StubRegistry {
        async fn get_model_artifacts_by_model_version(
            &self,
            _opts: &FetchOptions,
            model_version_id: &str,
        ) -> Result<ModelArtifactList> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ModelArtifactList {
                items: vec![ModelArtifact {
                    id: "1".to_string(),
                    name: format!("artifact-{}", model_version_id),
                    uri: Some("s3://models/fraud/1".to_string()),
                    ..Default::default()
                }],
                size: 1,
                page_size: 10,
                next_page_token: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_pipeline_run_job_loads() {
        let api = Arc::new(StubPipelines {
            calls: AtomicUsize::new(0),
        });
        let handle = pipeline_run_job_by_id(api.clone(), Some("job-1".to_string()));

        let state = handle
            .subscribe()
            .wait_for(|s| s.loaded)
            .await
            .unwrap()
            .clone();

        let job = state.value.unwrap();
        assert_eq!(job.recurring_run_id, "job-1");
        assert_eq!(job.display_name, "nightly-training");
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_pipeline_run_job_without_id_is_not_ready() {
        let api = Arc::new(StubPipelines {
            calls: AtomicUsize::new(0),
        });
        let handle = pipeline_run_job_by_id(api.clone(), None);

        let state = handle.refresh().await;

        assert!(state.value.is_none());
        assert!(!state.loaded);
        assert!(state.error.is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pipeline_run_job_with_empty_id_is_not_ready() {
        let api = Arc::new(StubPipelines {
            calls: AtomicUsize::new(0),
        });
        let handle = pipeline_run_job_by_id(api.clone(), Some(String::new()));

        let state = handle.refresh().await;

        assert!(state.value.is_none());
        assert!(!state.loaded);
        assert!(state.error.is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pipeline_run_job_error_is_recorded() {
        let api = Arc::new(StubPipelines {
            calls: AtomicUsize::new(0),
        });
        let handle = pipeline_run_job_by_id(api, Some("missing".to_string()));

        let state = handle
            .subscribe()
            .wait_for(|s| s.error.is_some())
            .await
            .unwrap()
            .clone();

        assert!(!state.loaded);
        assert_eq!(state.error.unwrap().to_string(), "run job not found");
    }

    #[tokio::test]
    async fn test_model_artifacts_load() {
        let api = Arc::new(StubRegistry {
            calls: AtomicUsize::new(0),
        });
        let handle = model_artifacts_by_version_id(api, Some("42".to_string()));

        let state = handle
            .subscribe()
            .wait_for(|s| s.loaded)
            .await
            .unwrap()
            .clone();

        assert_eq!(state.value.size, 1);
        assert_eq!(state.value.items[0].name, "artifact-42");
    }

    #[tokio::test]
    async fn test_model_artifacts_without_id_keep_default() {
        let api = Arc::new(StubRegistry {
            calls: AtomicUsize::new(0),
        });
        let handle = model_artifacts_by_version_id(api.clone(), None);

        let state = handle.refresh().await;

        assert_eq!(state.value, ModelArtifactList::default());
        assert!(!state.loaded);
        assert!(state.error.is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_artifacts_with_empty_id_keep_default() {
        let api = Arc::new(StubRegistry {
            calls: AtomicUsize::new(0),
        });
        let handle = model_artifacts_by_version_id(api.clone(), Some(String::new()));

        let state = handle.refresh().await;

        assert_eq!(state.value, ModelArtifactList::default());
        assert!(!state.loaded);
        assert!(state.error.is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_artifact_list_wire_format() {
        let list: ModelArtifactList = serde_json::from_value(serde_json::json!({
            "items": [{ "id": "7", "name": "fraud", "modelFormatName": "onnx" }],
            "size": 1,
            "pageSize": 20,
            "nextPageToken": "abc"
        }))
        .unwrap();

        assert_eq!(list.page_size, 20);
        assert_eq!(list.next_page_token, "abc");
        assert_eq!(list.items[0].model_format_name.as_deref(), Some("onnx"));
    }
}
