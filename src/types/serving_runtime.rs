// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "serving.kserve.io", version = "v1alpha1", kind = "ServingRuntime")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct ServingRuntimeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_model: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_model_formats: Vec<SupportedModelFormat>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportedModelFormat {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_select: Option<bool>,
}

impl ServingRuntime {
    /// Check if this runtime serves multiple models (ModelMesh)
    pub fn is_multi_model(&self) -> bool {
        self.spec.multi_model.unwrap_or(false)
    }
}
