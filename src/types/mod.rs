// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster resource kinds read and written by the dashboard.

pub mod project;
pub mod serving_runtime;

pub use project::{Project, ProjectRequest, ProjectSpec, ProjectStatus};
pub use serving_runtime::{ServingRuntime, ServingRuntimeSpec, SupportedModelFormat};
