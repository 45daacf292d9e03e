// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OpenShift project resources.
//!
//! `Project` and `ProjectRequest` are built-in OpenShift kinds rather than CRDs, so
//! `kube::Resource` is implemented by hand instead of derived.

use crate::constants::annotations;
use k8s_openapi::ClusterResourceScope;
use kube::{api::ObjectMeta, Resource, ResourceExt};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const GROUP: &str = "project.openshift.io";
const VERSION: &str = "v1";
const API_VERSION: &str = "project.openshift.io/v1";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "Project::default_api_version")]
    pub api_version: String,
    #[serde(default = "Project::default_kind")]
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ProjectSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProjectSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalizers: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProjectStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl Project {
    fn default_api_version() -> String {
        API_VERSION.to_string()
    }

    fn default_kind() -> String {
        "Project".to_string()
    }

    /// Display name annotation, falling back to the resource name
    pub fn display_name(&self) -> String {
        self.annotations()
            .get(annotations::DISPLAY_NAME)
            .filter(|n| !n.is_empty())
            .cloned()
            .unwrap_or_else(|| self.name_any())
    }

    pub fn description(&self) -> Option<&str> {
        self.annotations()
            .get(annotations::DESCRIPTION)
            .map(|d| d.as_str())
    }

    /// Check whether the project carries the given label key (any value)
    pub fn has_label(&self, key: &str) -> bool {
        self.labels().contains_key(key)
    }
}

impl Resource for Project {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "Project".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "projects".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Request for the API server to provision a new project on behalf of the caller
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default = "Project::default_api_version")]
    pub api_version: String,
    #[serde(default = "ProjectRequest::default_kind")]
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_name: String,
}

impl ProjectRequest {
    fn default_kind() -> String {
        "ProjectRequest".to_string()
    }

    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: Self::default_kind(),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..Default::default()
            },
            description: description.into(),
            display_name: display_name.into(),
        }
    }
}

impl Resource for ProjectRequest {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "ProjectRequest".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "projectrequests".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
