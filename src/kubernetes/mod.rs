// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and serving runtime discovery.

pub mod client;
pub mod serving_runtimes;

pub use client::create_dashboard_client;
pub use serving_runtimes::{KubeServingRuntimes, ServingRuntimeLister};
