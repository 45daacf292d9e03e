// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project lifecycle operations as performed by the dashboard.

pub mod watch;

pub use watch::{watch_projects, ProjectWatch};

use crate::constants::{annotations, selectors};
use crate::error::{DashboardError, Result};
use crate::kubernetes::ServingRuntimeLister;
use crate::provisioning::{
    NamespaceApplicationCase, NamespaceProvisioner, ProvisionOutcome, ProvisionParams,
};
use crate::types::{Project, ProjectRequest};
use kube::{
    api::{DeleteParams, ListParams, PostParams},
    core::response::Status,
    Api, Client, ResourceExt,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What the API server handed back for a project deletion
#[derive(Debug, Clone)]
pub enum DeletedProject {
    /// The project still exists and is being torn down
    Terminating(Project),
    /// The deletion finished and the server answered with a status
    Gone(Status),
}

/// Resolve the name of a new project: the explicit name if one was given, else the display name
pub fn resolve_project_name<'a>(display_name: &'a str, k8s_name: Option<&'a str>) -> &'a str {
    k8s_name.filter(|n| !n.is_empty()).unwrap_or(display_name)
}

/// Project operations backed by the cluster API and the dashboard's provisioning endpoint
pub struct ProjectApi {
    client: Client,
    provisioner: Arc<dyn NamespaceProvisioner>,
    serving_runtimes: Arc<dyn ServingRuntimeLister>,
    product_name: String,
}

impl ProjectApi {
    pub fn new(
        client: Client,
        provisioner: Arc<dyn NamespaceProvisioner>,
        serving_runtimes: Arc<dyn ServingRuntimeLister>,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            provisioner,
            serving_runtimes,
            product_name: product_name.into(),
        }
    }

    fn projects(&self) -> Api<Project> {
        Api::all(self.client.clone())
    }

    /// List projects, optionally restricted by a label selector
    #[instrument(skip(self))]
    pub async fn list(&self, label_selector: Option<&str>) -> Result<Vec<Project>> {
        let mut lp = ListParams::default();
        if let Some(selector) = label_selector {
            lp = lp.labels(selector);
        }

        let projects = self.projects().list(&lp).await?.items;
        debug!("Found {} projects", projects.len());
        Ok(projects)
    }

    /// List dashboard projects with model serving enabled
    pub async fn list_for_serving_enabled(&self) -> Result<Vec<Project>> {
        self.list(Some(selectors::MODEL_SERVING_PROJECTS)).await
    }

    /// List serving-enabled projects that have at least one serving runtime deployed
    #[instrument(skip(self))]
    pub async fn list_for_serving_available(&self) -> Result<Vec<Project>> {
        let runtimes = self
            .serving_runtimes
            .list_serving_runtimes(None, Some(selectors::DASHBOARD_RESOURCE))
            .await?;
        let projects = self.list_for_serving_enabled().await?;

        let namespaces: HashSet<String> = runtimes.iter().filter_map(|r| r.namespace()).collect();

        Ok(projects
            .into_iter()
            .filter(|p| namespaces.contains(&p.name_any()))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<Project> {
        Ok(self.projects().get(name).await?)
    }

    /// Create a project and let the dashboard finish setting up its namespace.
    ///
    /// Returns the name of the new project.
    #[instrument(skip(self, display_name, description), fields(user = %requesting_user))]
    pub async fn create(
        &self,
        requesting_user: &str,
        display_name: &str,
        description: &str,
        k8s_name: Option<&str>,
    ) -> Result<String> {
        let name = resolve_project_name(display_name, k8s_name);

        info!("Requesting project {}", name);
        let requests: Api<ProjectRequest> = Api::all(self.client.clone());
        requests
            .create(
                &PostParams::default(),
                &ProjectRequest::new(name, display_name, description),
            )
            .await?;

        let outcome = self
            .provisioner
            .apply(
                name,
                NamespaceApplicationCase::ProjectCreation,
                &ProvisionParams::default(),
            )
            .await?;
        self.ensure_applied(name, outcome, "Unable to fully create your project.")?;

        info!("Project {} created", name);
        Ok(name.to_string())
    }

    /// Enable a model serving platform on an existing project.
    ///
    /// Returns the project name.
    #[instrument(skip(self, params))]
    pub async fn add_serving_platform_support(
        &self,
        name: &str,
        case: NamespaceApplicationCase,
        params: ProvisionParams,
    ) -> Result<String> {
        let outcome = self.provisioner.apply(name, case, &params).await?;
        self.ensure_applied(
            name,
            outcome,
            "Unable to enable model serving platform in your project.",
        )?;

        info!("Serving platform {:?} enabled on project {}", case, name);
        Ok(name.to_string())
    }

    /// Update the display name and description of a project
    #[instrument(skip(self, project, description), fields(project = %project.name_any()))]
    pub async fn update(
        &self,
        project: &Project,
        display_name: &str,
        description: &str,
    ) -> Result<Project> {
        let mut resource = project.clone();
        let entries = resource
            .metadata
            .annotations
            .get_or_insert_with(BTreeMap::new);
        entries.insert(annotations::DISPLAY_NAME.to_string(), display_name.to_string());
        entries.insert(annotations::DESCRIPTION.to_string(), description.to_string());

        Ok(self
            .projects()
            .replace(&project.name_any(), &PostParams::default(), &resource)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<DeletedProject> {
        let deleted = self
            .projects()
            .delete(name, &DeleteParams::default())
            .await?;

        info!("Project {} deleted", name);
        Ok(deleted.either(DeletedProject::Terminating, DeletedProject::Gone))
    }

    /// Turn anything but an applied outcome into a product branded advisory error
    fn ensure_applied(&self, name: &str, outcome: ProvisionOutcome, summary: &str) -> Result<()> {
        if outcome.is_applied() {
            return Ok(());
        }

        warn!("Provisioning of {} was not applied: {:?}", name, outcome);
        Err(DashboardError::NotAppliedError(format!(
            "{} Ask a {} admin for assistance.",
            summary, self.product_name
        )))
    }
}
