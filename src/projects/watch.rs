// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::fetch::FetchState;
use crate::types::Project;
use futures::StreamExt;
use kube::{Api, Client};
use kube_runtime::{reflector, watcher, WatchStreamExt};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Live view of all projects, kept current by a background reflector
pub struct ProjectWatch {
    state: watch::Receiver<FetchState<Vec<Project>>>,
    task: JoinHandle<()>,
}

impl ProjectWatch {
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Vec<Project>>> {
        self.state.clone()
    }

    pub fn state(&self) -> FetchState<Vec<Project>> {
        self.state.borrow().clone()
    }
}

impl Drop for ProjectWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn snapshot(reader: &reflector::Store<Project>) -> Vec<Project> {
    let mut projects: Vec<Project> = reader
        .state()
        .into_iter()
        .map(Arc::unwrap_or_clone)
        .collect();
    projects.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
    projects
}

/// Start watching projects; the state is loaded once the initial list completes
pub fn watch_projects(client: Client) -> ProjectWatch {
    let api: Api<Project> = Api::all(client);
    let (reader, writer) = reflector::store();
    let (tx, rx) = watch::channel(FetchState::new(Vec::new()));

    let task = tokio::spawn(async move {
        let mut events = watcher(api, watcher::Config::default())
            .default_backoff()
            .reflect(writer)
            .boxed();

        info!("Watching projects");
        while let Some(event) = events.next().await {
            match event {
                Ok(watcher::Event::InitDone)
                | Ok(watcher::Event::Apply(_))
                | Ok(watcher::Event::Delete(_)) => {
                    let projects = snapshot(&reader);
                    debug!("Project view now holds {} projects", projects.len());
                    tx.send_modify(|state| state.resolve(projects));
                }
                Ok(watcher::Event::Init) | Ok(watcher::Event::InitApply(_)) => {}
                Err(e) => {
                    warn!("Project watch failed: {}", e);
                    tx.send_modify(|state| state.fail(e.into()));
                }
            }
        }
        debug!("Project watch stream ended");
    });

    ProjectWatch { state: rx, task }
}
