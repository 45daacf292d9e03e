// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Label keys the dashboard puts on the resources it manages
pub mod labels {
    /// Marks a resource as visible in the dashboard
    pub const DASHBOARD_RESOURCE: &str = "opendatahub.io/dashboard";
    /// Present on projects that have multi-model serving enabled
    pub const MODEL_SERVING_PROJECT: &str = "modelmesh-enabled";
}

/// Annotation keys carrying the human readable project metadata
pub mod annotations {
    pub const DISPLAY_NAME: &str = "openshift.io/display-name";
    pub const DESCRIPTION: &str = "openshift.io/description";
}

/// Label selectors used when listing
pub mod selectors {
    pub const DASHBOARD_RESOURCE: &str = "opendatahub.io/dashboard=true";
    pub const MODEL_SERVING_PROJECTS: &str = "opendatahub.io/dashboard=true,modelmesh-enabled";
}

/// Product name used in user facing messages when none is configured
pub const DEFAULT_PRODUCT_NAME: &str = "Open Data Hub";

/// Base path of the dashboard backend's namespace provisioning route
pub const NAMESPACES_API_PATH: &str = "/api/namespaces";
